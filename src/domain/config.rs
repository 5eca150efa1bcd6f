use serde::Deserialize;
use url::Url;

use crate::domain::value::{FromId, ServiceId};

/// Push endpoint used when no base URI is configured.
pub const DEFAULT_BASE_URI: &str = "https://www.pling.as/psk/push.php";

const BASE_URI_FIELD: &str = "base_uri";

const ENV_BASE_URI: &str = "FRONTSMS_BASE_URI";
const ENV_SERVICE_ID: &str = "FRONTSMS_SERVICE_ID";
const ENV_FROM_ID: &str = "FRONTSMS_FROM_ID";
const ENV_DEBUG: &str = "FRONTSMS_DEBUG";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Errors produced while building a [`Config`].
pub enum ConfigError {
    /// A required option is missing or empty.
    #[error("missing configuration: {field}")]
    Missing { field: &'static str },

    /// `base_uri` is not an absolute URL.
    #[error("invalid base URI {value:?}: {source}")]
    InvalidBaseUri {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// `base_uri` parsed, but not as an `http`/`https` URL.
    #[error("unsupported base URI scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    /// The debug environment flag is not a recognized boolean.
    #[error("invalid debug flag: {value:?}")]
    InvalidDebugFlag { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ConfigBuilder")]
/// Validated client configuration.
///
/// Once constructed every required field is non-empty and `base_uri` is an
/// absolute `http`/`https` URL. Use [`Config::new`] for the default endpoint
/// or [`Config::builder`] to override individual options.
pub struct Config {
    base_uri: Url,
    service_id: ServiceId,
    from_id: FromId,
    debug: bool,
}

impl Config {
    /// Build a configuration for the default endpoint with `debug` off.
    pub fn new(
        service_id: impl Into<String>,
        from_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .service_id(service_id)
            .from_id(from_id)
            .build()
    }

    /// Start from the defaults and override options one by one.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Read the configuration from `FRONTSMS_*` environment variables.
    ///
    /// `FRONTSMS_SERVICE_ID` and `FRONTSMS_FROM_ID` are required;
    /// `FRONTSMS_BASE_URI` and `FRONTSMS_DEBUG` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = match lookup(ENV_DEBUG) {
            Some(value) => Some(parse_flag(&value)?),
            None => None,
        };

        ConfigBuilder {
            base_uri: lookup(ENV_BASE_URI),
            service_id: lookup(ENV_SERVICE_ID),
            from_id: lookup(ENV_FROM_ID),
            debug,
        }
        .build()
    }

    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub fn from_id(&self) -> &FromId {
        &self.from_id
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
/// Unvalidated configuration options, merged over the defaults by
/// [`ConfigBuilder::build`].
///
/// This is also the serde shape of [`Config`], so the gateway's own option
/// names (`serviceid`, `fromid`) are accepted alongside the snake-case ones.
pub struct ConfigBuilder {
    #[serde(default)]
    base_uri: Option<String>,
    #[serde(default, rename = "serviceid", alias = "service_id")]
    service_id: Option<String>,
    #[serde(default, rename = "fromid", alias = "from_id")]
    from_id: Option<String>,
    #[serde(default)]
    debug: Option<bool>,
}

impl ConfigBuilder {
    /// Override the gateway endpoint.
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    pub fn from_id(mut self, from_id: impl Into<String>) -> Self {
        self.from_id = Some(from_id.into());
        self
    }

    /// Log full request parameters and raw response bodies.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Merge over the defaults and validate.
    ///
    /// Options are checked in the order `base_uri`, `serviceid`, `fromid`;
    /// the first missing one is reported. `debug` is never missing: `false`
    /// is a valid value.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_uri = self
            .base_uri
            .unwrap_or_else(|| DEFAULT_BASE_URI.to_owned());
        if base_uri.is_empty() {
            return Err(ConfigError::Missing {
                field: BASE_URI_FIELD,
            });
        }
        let base_uri = parse_base_uri(base_uri)?;

        let service_id = self
            .service_id
            .and_then(|value| ServiceId::new(value).ok())
            .ok_or(ConfigError::Missing {
                field: ServiceId::FIELD,
            })?;
        let from_id = self
            .from_id
            .and_then(|value| FromId::new(value).ok())
            .ok_or(ConfigError::Missing {
                field: FromId::FIELD,
            })?;

        Ok(Config {
            base_uri,
            service_id,
            from_id,
            debug: self.debug.unwrap_or(false),
        })
    }
}

impl TryFrom<ConfigBuilder> for Config {
    type Error = ConfigError;

    fn try_from(value: ConfigBuilder) -> Result<Self, Self::Error> {
        value.build()
    }
}

fn parse_base_uri(value: String) -> Result<Url, ConfigError> {
    let url = Url::parse(&value).map_err(|source| ConfigError::InvalidBaseUri {
        value: value.clone(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_owned(),
        }),
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(ConfigError::InvalidDebugFlag {
            value: value.to_owned(),
        }),
    }
}
