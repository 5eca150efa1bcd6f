//! Typed Rust client for the Front SMS push gateway.
//!
//! The crate has three layers: a domain layer of validated types, a transport
//! layer for the gateway's query parameters and its `key=value, ...` reply
//! format, and a small client layer issuing the request.
//!
//! ```rust,no_run
//! use frontsms::{Config, FrontSmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), frontsms::FrontSmsError> {
//!     let config = Config::new("my-service-id", "MyShop")?;
//!     let client = FrontSmsClient::new(config);
//!     let reply = client.send("+47 412 34 567", "hello").await?;
//!     println!("accepted as {:?}", reply.id());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{FrontSmsClient, FrontSmsClientBuilder, FrontSmsError};
pub use domain::{
    Config, ConfigBuilder, ConfigError, DEFAULT_BASE_URI, FromId, GatewayResponse, MessageText,
    PreparedSend, Recipient, SendSms, ServiceId, ValidationError,
};
pub use transport::{ProtocolError, parse_response};
