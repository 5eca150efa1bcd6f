//! Domain layer: strong types with validation and invariants (no I/O).

mod config;
mod request;
mod response;
mod validation;
mod value;

pub use config::{Config, ConfigBuilder, ConfigError, DEFAULT_BASE_URI};
pub use request::{PreparedSend, SendSms};
pub use response::GatewayResponse;
pub use validation::ValidationError;
pub use value::{FromId, MessageText, Recipient, ServiceId};
