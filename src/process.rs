use aws_lambda_events::event::sqs::{BatchItemFailure, SqsBatchResponse, SqsMessage};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::publish::TopicPublisher;

/// Per-record failures. None of these abort the batch.
#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("record has no body")]
    EmptyBody,
    #[error("failed to decode JSON body - {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("field 'msg' is missing")]
    MissingField,
    #[error("field 'msg' must be a string, found {found}")]
    InvalidField { found: &'static str },
    #[error("failed to publish - {0}")]
    Publish(lambda_runtime::Error),
}

impl RecordError {
    /// Only publish failures are worth redelivering; a malformed body will
    /// fail the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RecordError::Publish(_))
    }
}

/// Body of an inbound queue message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub msg: String,
}

impl InboundMessage {
    pub fn new(msg: impl Into<String>) -> Self {
        InboundMessage { msg: msg.into() }
    }

    /// Decodes a message body. The body must be a JSON object carrying a
    /// string `msg`; other fields are ignored.
    pub fn parse(body: &str) -> Result<Self, RecordError> {
        let mut object: Map<String, Value> = serde_json::from_str(body)?;
        match object.remove("msg") {
            None => Err(RecordError::MissingField),
            Some(Value::String(msg)) => Ok(InboundMessage { msg }),
            Some(other) => Err(RecordError::InvalidField {
                found: json_type(&other),
            }),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The business rule applied to every message before it is forwarded.
pub fn transform(msg: &str) -> String {
    info!(stage = "process", "processing message: {}", msg);
    msg.to_uppercase()
}

/// Decodes, transforms and publishes a single record. Returns the payload
/// that was published.
pub async fn process_record<P>(
    publisher: &P,
    topic_arn: &str,
    record: &SqsMessage,
) -> Result<String, RecordError>
where
    P: TopicPublisher + ?Sized,
{
    let body = record.body.as_deref().ok_or(RecordError::EmptyBody)?;
    info!(stage = "sqs", message_id = ?record.message_id, "message received from queue: {}", body);

    let message = InboundMessage::parse(body)?;
    let payload = transform(&message.msg);

    info!(stage = "sns", "publishing message to sns: {}", payload);
    let sns_message_id = publisher
        .publish_message(topic_arn, &payload)
        .await
        .map_err(RecordError::Publish)?;
    info!(stage = "sns", sns_message_id = ?sns_message_id, "message published to sns");

    Ok(payload)
}

/// Outcome of one invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub published: usize,
    pub skipped: usize,
    /// Message ids of records whose publish failed.
    pub failed: Vec<String>,
}

impl BatchSummary {
    /// Converts the summary into the partial batch response. Failures are only
    /// surfaced when the caller opted in; otherwise the whole batch is
    /// acknowledged.
    pub fn into_response(self, report_batch_item_failures: bool) -> SqsBatchResponse {
        let batch_item_failures = if report_batch_item_failures {
            self.failed
                .into_iter()
                .map(|item_identifier| BatchItemFailure { item_identifier })
                .collect()
        } else {
            Vec::new()
        };
        SqsBatchResponse {
            batch_item_failures,
        }
    }
}

/// Runs every record of a batch through [process_record], sequentially.
/// A failing record is logged and never stops its siblings.
pub async fn process_batch<P>(
    publisher: &P,
    config: &Config,
    records: &[SqsMessage],
) -> BatchSummary
where
    P: TopicPublisher + ?Sized,
{
    let mut summary = BatchSummary::default();

    for record in records {
        match process_record(publisher, &config.topic_arn, record).await {
            Ok(_) => summary.published += 1,
            Err(e) if e.is_retryable() => {
                error!(stage = "error", message_id = ?record.message_id, "{}", e);
                match &record.message_id {
                    Some(id) => summary.failed.push(id.clone()),
                    None => warn!("record without message id can not be reported for redelivery"),
                }
            }
            Err(e) => {
                warn!(stage = "sqs", message_id = ?record.message_id, "skipping message - {}", e);
                summary.skipped += 1;
            }
        }
    }

    debug!("batch summary: {:?}", summary);
    summary
}
