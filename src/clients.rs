use aws_config::SdkConfig;
use aws_sdk_sns::Client as SnsClient;

use crate::config::{Config, ConfigError};

/// A type used to hold the AWS clients required to interact with AWS services
/// used by the lambda function.
#[derive(Clone, Debug)]
pub struct AwsClients {
    pub sns: SnsClient,
}

impl AwsClients {
    /// Builds the clients once at cold start. Fails when the SDK config carries no
    /// region, since every publish would be rejected without one.
    pub fn new(sdk_config: &SdkConfig, config: &Config) -> Result<Self, ConfigError> {
        if sdk_config.region().is_none() {
            return Err(ConfigError::MissingRegion);
        }

        let mut sns_config = aws_sdk_sns::config::Builder::from(sdk_config);
        if let Some(endpoint_url) = &config.sns_endpoint_url {
            sns_config = sns_config.endpoint_url(endpoint_url);
        }

        Ok(AwsClients {
            sns: SnsClient::from_conf(sns_config.build()),
        })
    }
}
