use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use sqs_sns_relay::config::Config;
use sqs_sns_relay::AwsClients;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    sqs_sns_relay::set_up_logging();

    info!(
        "Initializing {} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::load_from_env().inspect_err(|e| error!(stage = "init", "{}", e))?;
    let aws_config = config.load_aws_config().await;
    let clients =
        AwsClients::new(&aws_config, &config).inspect_err(|e| error!(stage = "init", "{}", e))?;

    info!(stage = "init", topic_arn = %config.topic_arn, "relay ready");

    run(service_fn(|request: LambdaEvent<SqsEvent>| {
        sqs_sns_relay::function_handler(&clients.sns, &config, request)
    }))
    .await
}
