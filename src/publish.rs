use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use lambda_runtime::Error;
use std::fmt::Debug;
use tracing::debug;

/// Outbound side of the relay: something that can deliver a plain-text
/// notification to a topic.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publishes `message` to `topic_arn`, returning the message id assigned
    /// by the service when it reports one.
    async fn publish_message(&self, topic_arn: &str, message: &str)
        -> Result<Option<String>, Error>;
}

#[async_trait]
impl TopicPublisher for SnsClient {
    async fn publish_message(
        &self,
        topic_arn: &str,
        message: &str,
    ) -> Result<Option<String>, Error> {
        let output = self
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| describe_sdk_error(topic_arn, &e))?;

        debug!(message_id = ?output.message_id(), "sns publish acknowledged");
        Ok(output.message_id().map(str::to_string))
    }
}

fn describe_sdk_error<E, R>(topic_arn: &str, err: &SdkError<E, R>) -> String
where
    E: std::error::Error + 'static,
    R: Debug + 'static,
{
    format!(
        "failed to publish to {} - {}",
        topic_arn,
        DisplayErrorContext(err)
    )
}
