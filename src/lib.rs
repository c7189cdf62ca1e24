use aws_lambda_events::event::sqs::{SqsBatchResponse, SqsEvent};
use lambda_runtime::{Error, LambdaEvent};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::publish::TopicPublisher;

pub mod clients;
pub mod config;
pub mod process;
pub mod publish;

pub use clients::AwsClients;

pub fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

// lambda handler
pub async fn function_handler<P>(
    publisher: &P,
    config: &Config,
    evt: LambdaEvent<SqsEvent>,
) -> Result<SqsBatchResponse, Error>
where
    P: TopicPublisher + ?Sized,
{
    info!(
        request_id = %evt.context.request_id,
        records = evt.payload.records.len(),
        "Handling lambda invocation"
    );
    debug!("Handling event payload: {:?}", evt.payload);

    let summary = process::process_batch(publisher, config, &evt.payload.records).await;

    info!(
        published = summary.published,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        "batch processed"
    );

    Ok(summary.into_response(config.report_batch_item_failures))
}
