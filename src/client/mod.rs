//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Config, ConfigError, GatewayResponse, SendSms, ValidationError};
use crate::transport::ProtocolError;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get_query<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.get(url).query(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`FrontSmsClient`].
///
/// Nothing is retried; every failure surfaces from the call that caused it.
/// Connection failures and non-2xx statuses are both transport failures, see
/// [`FrontSmsError::is_transport`].
pub enum FrontSmsError {
    /// The client configuration was rejected.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The message was rejected before any request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, refused connection, timeouts).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the gateway.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The body is not in the gateway's `key=value, ...` format or lacks `ErrorCode`.
    #[error("invalid response from gateway: {body}")]
    Protocol {
        #[source]
        source: ProtocolError,
        body: String,
    },

    /// The gateway answered with a non-zero `ErrorCode`.
    #[error("gateway error: {} ({error_code})", .id.as_deref().unwrap_or("-"))]
    Gateway {
        id: Option<String>,
        error_code: String,
    },
}

impl FrontSmsError {
    /// `true` for connection failures and HTTP error statuses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`FrontSmsClient`].
///
/// Use this when you need a request timeout or a custom user-agent.
pub struct FrontSmsClientBuilder {
    config: Config,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl FrontSmsClientBuilder {
    /// Create a builder with no timeout/user-agent override.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`FrontSmsClient`].
    pub fn build(self) -> Result<FrontSmsClient, FrontSmsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| FrontSmsError::Transport(Box::new(err)))?;

        Ok(FrontSmsClient {
            config: self.config,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Front SMS gateway client.
///
/// Each send validates the message, issues one `GET` to the configured base
/// URI with `serviceid`, `fromid`, `phoneno` and `txt` query parameters, and
/// classifies the plain-text reply. The client holds no mutable state and can
/// be shared between tasks.
pub struct FrontSmsClient {
    config: Config,
    http: Arc<dyn HttpTransport>,
}

impl FrontSmsClient {
    /// Create a client with default HTTP settings.
    ///
    /// For more customization, use [`FrontSmsClient::builder`].
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(config: Config) -> FrontSmsClientBuilder {
        FrontSmsClientBuilder::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send `message` to `to` using the configured credentials.
    ///
    /// `to` is stripped down to `[A-Za-z0-9 ]`, so a leading `+` is dropped.
    pub async fn send(
        &self,
        to: impl AsRef<str>,
        message: impl Into<String>,
    ) -> Result<GatewayResponse, FrontSmsError> {
        self.send_sms(SendSms::new(to.as_ref(), message)).await
    }

    /// Send a prebuilt request.
    ///
    /// Errors:
    /// - [`FrontSmsError::Validation`] for an empty service id, text or recipient,
    /// - [`FrontSmsError::Transport`] / [`FrontSmsError::HttpStatus`] when the call fails,
    /// - [`FrontSmsError::Protocol`] when the body cannot be parsed or lacks `ErrorCode`,
    /// - [`FrontSmsError::Gateway`] when `ErrorCode` is not zero.
    pub async fn send_sms(&self, request: SendSms) -> Result<GatewayResponse, FrontSmsError> {
        let prepared = request.prepare(&self.config)?;
        let params = crate::transport::encode_send_sms_query(&prepared);
        let endpoint = self.config.base_uri().as_str();

        if self.config.debug() {
            tracing::debug!(endpoint, ?params, "sending push request");
        } else {
            tracing::debug!(
                endpoint,
                recipient = prepared.recipient().as_str(),
                "sending push request"
            );
        }

        let response = self
            .http
            .get_query(endpoint, params)
            .await
            .map_err(FrontSmsError::Transport)?;

        if self.config.debug() {
            tracing::debug!(status = response.status, body = %response.body, "gateway replied");
        }

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(FrontSmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let parsed = crate::transport::decode_send_sms_response(&response.body).map_err(
            |source| FrontSmsError::Protocol {
                source,
                body: response.body.clone(),
            },
        )?;

        if !parsed.is_success() {
            let id = parsed.id().map(str::to_owned);
            let error_code = parsed.error_code().unwrap_or_default().to_owned();
            tracing::warn!(id = ?id, error_code = %error_code, "gateway rejected message");
            return Err(FrontSmsError::Gateway { id, error_code });
        }

        tracing::debug!(id = parsed.id(), "message accepted");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        calls: usize,
        last_url: Option<String>,
        last_params: Vec<(String, String)>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    calls: 0,
                    last_url: None,
                    last_params: Vec::new(),
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            (state.last_url.clone(), state.last_params.clone())
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }
    }

    impl HttpTransport for FakeTransport {
        fn get_query<'a>(
            &'a self,
            url: &'a str,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.calls += 1;
                    state.last_url = Some(url.to_owned());
                    state.last_params = params;
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    struct FailingTransport;

    impl HttpTransport for FailingTransport {
        fn get_query<'a>(
            &'a self,
            _url: &'a str,
            _params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let err: Box<dyn StdError + Send + Sync> = Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ));
                Err::<HttpResponse, _>(err)
            })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn test_config() -> Config {
        Config::builder()
            .base_uri("https://example.invalid/psk/push.php")
            .service_id("svc")
            .from_id("from")
            .build()
            .unwrap()
    }

    fn make_client(transport: impl HttpTransport + 'static) -> FrontSmsClient {
        FrontSmsClient {
            config: test_config(),
            http: Arc::new(transport),
        }
    }

    #[tokio::test]
    async fn send_includes_credentials_and_parses_ok_response() {
        let transport = FakeTransport::new(200, "ID=42, ErrorCode=0");
        let client = make_client(transport.clone());

        let response = client.send("+47 123 45 678", "hello").await.unwrap();
        assert_eq!(response.id(), Some("42"));
        assert_eq!(response.error_code(), Some("0"));
        assert_eq!(response.len(), 2);

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/psk/push.php"));
        assert_param(&params, "serviceid", "svc");
        assert_param(&params, "fromid", "from");
        assert_param(&params, "phoneno", "47 123 45 678");
        assert_param(&params, "txt", "hello");
    }

    #[tokio::test]
    async fn send_sms_applies_credential_overrides() {
        let transport = FakeTransport::new(200, "ID=1, ErrorCode=0");
        let client = make_client(transport.clone());

        let request = SendSms::new("12345", "hi")
            .with_service_id("svc-2")
            .with_from_id("from-2");
        client.send_sms(request).await.unwrap();

        let (_, params) = transport.last_request();
        assert_param(&params, "serviceid", "svc-2");
        assert_param(&params, "fromid", "from-2");
    }

    #[tokio::test]
    async fn send_maps_non_zero_error_code_to_gateway_error() {
        let transport = FakeTransport::new(200, "ID=42, ErrorCode=5");
        let client = make_client(transport);

        let err = client.send("12345", "hello").await.unwrap_err();
        match err {
            FrontSmsError::Gateway { id, error_code } => {
                assert_eq!(id.as_deref(), Some("42"));
                assert_eq!(error_code, "5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn gateway_error_without_id_still_reports_code() {
        let transport = FakeTransport::new(200, "ErrorCode=7");
        let client = make_client(transport);

        let err = client.send("12345", "hello").await.unwrap_err();
        assert_eq!(err.to_string(), "gateway error: - (7)");
    }

    #[tokio::test]
    async fn send_maps_missing_error_code_to_protocol_error() {
        let transport = FakeTransport::new(200, "ID=42");
        let client = make_client(transport);

        let err = client.send("12345", "hello").await.unwrap_err();
        match err {
            FrontSmsError::Protocol { source, body } => {
                assert_eq!(source, ProtocolError::MissingField { field: "ErrorCode" });
                assert_eq!(body, "ID=42");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_maps_malformed_body_to_protocol_error() {
        let transport = FakeTransport::new(200, "<html>oops</html>");
        let client = make_client(transport);

        let err = client.send("12345", "hello").await.unwrap_err();
        assert!(matches!(
            err,
            FrontSmsError::Protocol {
                source: ProtocolError::MalformedSegment { .. },
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "invalid response from gateway: <html>oops</html>"
        );
    }

    #[tokio::test]
    async fn send_maps_non_success_http_status() {
        let transport = FakeTransport::new(404, "not found");
        let client = make_client(transport);

        let err = client.send("12345", "hello").await.unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(
            err,
            FrontSmsError::HttpStatus {
                status: 404,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn send_maps_empty_http_body_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(transport);

        let err = client.send("12345", "hello").await.unwrap_err();
        assert!(matches!(
            err,
            FrontSmsError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn send_maps_connection_failure_to_transport_error() {
        let client = make_client(FailingTransport);

        let err = client.send("12345", "hello").await.unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, FrontSmsError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn validation_failures_skip_the_network() {
        let transport = FakeTransport::new(200, "ID=42, ErrorCode=0");
        let client = make_client(transport.clone());

        let err = client.send("", "hello").await.unwrap_err();
        assert!(matches!(
            err,
            FrontSmsError::Validation(ValidationError::Empty { field: "phoneno" })
        ));

        let err = client.send("12345", "").await.unwrap_err();
        assert!(matches!(
            err,
            FrontSmsError::Validation(ValidationError::Empty { field: "txt" })
        ));

        let err = client
            .send_sms(SendSms::new("12345", "hello").with_service_id(""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FrontSmsError::Validation(ValidationError::Empty { field: "serviceid" })
        ));

        assert_eq!(transport.calls(), 0);
        assert!(!err.is_transport());
    }

    #[test]
    fn builder_keeps_config() {
        let client = FrontSmsClient::builder(test_config())
            .timeout(Duration::from_secs(5))
            .user_agent("frontsms-test")
            .build()
            .unwrap();
        assert_eq!(
            client.config().base_uri().as_str(),
            "https://example.invalid/psk/push.php"
        );
        assert_eq!(client.config().service_id().as_str(), "svc");
    }
}
