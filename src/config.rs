use std::env;
use std::string::String;

use aws_config::{BehaviorVersion, Region, SdkConfig};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SNS_TOPIC_ARN is not set")]
    MissingTopicArn,
    #[error("no AWS region configured. Set AWS_REGION or configure a default region")]
    MissingRegion,
    #[error("invalid value {value:?} for {name} - expected true or false")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub topic_arn: String,
    pub region: Option<String>,
    pub sns_endpoint_url: Option<String>,
    pub report_batch_item_failures: bool,
}

impl Config {
    pub fn load_from_env() -> Result<Config, ConfigError> {
        let conf = Config {
            topic_arn: non_empty_var("SNS_TOPIC_ARN").ok_or(ConfigError::MissingTopicArn)?,
            region: non_empty_var("AWS_REGION"),
            sns_endpoint_url: non_empty_var("SNS_ENDPOINT_URL"),
            report_batch_item_failures: flag_var("REPORT_BATCH_ITEM_FAILURES")?,
        };

        Ok(conf)
    }

    /// Loads the shared AWS SDK configuration, pinned to `region` when one is set.
    pub async fn load_aws_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag_var(name: &'static str) -> Result<bool, ConfigError> {
    match non_empty_var(name) {
        None => Ok(false),
        Some(value) => value
            .to_lowercase()
            .parse::<bool>()
            .map_err(|_| ConfigError::InvalidFlag { name, value }),
    }
}
