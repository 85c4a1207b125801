//! Runtime configuration read from the environment.

use crate::error::{Error, Result};

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::{
    Client,
    config::{Credentials, Region},
};
use std::{env, fmt};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Static access keys for the store.
#[derive(Clone, PartialEq)]
pub struct StaticCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"...")
            .finish()
    }
}

/// Service configuration.
///
/// | Variable | Default |
/// |----------|---------|
/// | `HOST` | `0.0.0.0` |
/// | `PORT` | `3000` |
/// | `AWS_REGION` | `us-east-1` |
/// | `DYNAMODB_ENDPOINT` | *(unset)* |
/// | `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` | *(unset)* |
/// | `ENV` | *(unset)*, `local` requires static credentials |
/// | `LOG_LEVEL` | `info` |
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Store region.
    pub region: String,
    /// Endpoint override, e.g. a DynamoDB Local instance.
    pub endpoint: Option<String>,
    /// Static credentials; the default credential chain is used otherwise.
    pub credentials: Option<StaticCredentials>,
    /// Whether the service runs against a local store.
    pub local: bool,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            region: DEFAULT_REGION.to_owned(),
            endpoint: None,
            credentials: None,
            local: false,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl Config {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT: {port}")))?,
            None => DEFAULT_PORT,
        };
        let credentials = match (var("AWS_ACCESS_KEY_ID"), var("AWS_SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };
        let local = var("ENV").is_some_and(|value| value == "local");
        if local && credentials.is_none() {
            return Err(Error::Config(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY are required when ENV=local"
                    .to_owned(),
            ));
        }
        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_owned()),
            endpoint: var("DYNAMODB_ENDPOINT"),
            credentials,
            local,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }

    /// The `host:port` the server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the store client.
    ///
    /// Static credentials take priority over the default credential chain.
    pub async fn build_client(&self) -> Client {
        let mut config_loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(self.region.clone()));
        if let Some(credentials) = &self.credentials {
            let credentials = Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
                None,
                "dynamodb-rest-static",
            );
            config_loader = config_loader.credentials_provider(credentials);
        }
        let sdk_config = config_loader.load().await;

        let mut dynamo_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(url) = &self.endpoint {
            dynamo_config = dynamo_config.endpoint_url(url);
        }
        Client::from_conf(dynamo_config.build())
    }
}
