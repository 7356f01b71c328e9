//! read client configuration from values, a file, the environment or a secret

use std::path::Path;
use std::time::Duration;

use aws_config::BehaviorVersion;
use serde::Deserialize;

use crate::errors::Error;

pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refreshToken";

pub enum ConfigLocation {
    File(String),
    Env,
    Secret,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Routes that never trigger a refresh, in addition to the built-in auth routes.
    #[serde(default)]
    pub public_routes: Vec<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Let concurrent requests share one refresh call instead of each issuing their own.
    #[serde(default)]
    pub coalesce_refresh: bool,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Access token installed when the client is built.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_refresh_path() -> String {
    DEFAULT_REFRESH_PATH.to_string()
}

impl Config {
    pub fn from_values(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: default_api_prefix(),
            refresh_path: default_refresh_path(),
            public_routes: Vec::new(),
            timeout_secs,
            coalesce_refresh: false,
            user_agent: None,
            token,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var("ROOMLINK_BASE_URL")
            .map_err(|_| Error::Config("Missing ROOMLINK_BASE_URL env var".to_string()))?;
        let token = std::env::var("ROOMLINK_TOKEN").ok().filter(|t| !t.is_empty());
        let timeout_secs = match std::env::var("ROOMLINK_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|_| {
                Error::Config(format!("Invalid ROOMLINK_TIMEOUT_SECS value '{}'", raw))
            })?),
            Err(_) => None,
        };
        let mut config = Self::from_values(base_url, token, timeout_secs);
        if let Ok(raw) = std::env::var("ROOMLINK_COALESCE_REFRESH") {
            config.coalesce_refresh = parse_flag(&raw)?;
        }
        Ok(config)
    }

    pub async fn from_secret() -> Result<Self, Error> {
        let secret_arn = std::env::var("ROOMLINK_CONFIG_SECRET_ARN").map_err(|_| {
            Error::Config("Missing ROOMLINK_CONFIG_SECRET_ARN env var".to_string())
        })?;
        let client = aws_sdk_secretsmanager::Client::new(
            &aws_config::load_defaults(BehaviorVersion::latest()).await,
        );
        let resp = client
            .get_secret_value()
            .secret_id(secret_arn)
            .send()
            .await
            .map_err(|e| Error::Config(format!("Failed to get secret: {}", e)))?;
        let secret = resp.secret_string().ok_or_else(|| {
            Error::Config("Failed to get secret string, returned None".to_string())
        })?;
        Ok(serde_json::from_str(secret)?)
    }

    pub async fn load(loc: ConfigLocation) -> Result<Self, Error> {
        match loc {
            ConfigLocation::File(path) => Self::from_file(path),
            ConfigLocation::Env => Self::from_env(),
            ConfigLocation::Secret => Self::from_secret().await,
        }
    }

    pub fn with_public_route(mut self, route: impl Into<String>) -> Self {
        self.public_routes.push(route.into());
        self
    }

    pub fn with_coalesce_refresh(mut self, coalesce: bool) -> Self {
        self.coalesce_refresh = coalesce;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Absolute root every request path is resolved against, e.g. `https://host/api`.
    pub fn api_root(&self) -> Result<String, Error> {
        let has_scheme =
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://");
        let origin = if has_scheme {
            self.base_url.clone()
        } else {
            format!("https://{}", self.base_url)
        };
        reqwest::Url::parse(&origin)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", origin, e)))?;
        let prefix = self.api_prefix.trim_matches('/');
        let origin = origin.trim_end_matches('/');
        if prefix.is_empty() {
            Ok(origin.to_string())
        } else {
            Ok(format!("{origin}/{prefix}"))
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool, Error> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::Config(format!(
            "Invalid boolean '{}'; expected true or false",
            other
        ))),
    }
}
