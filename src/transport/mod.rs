//! Transport layer: query encoding and the gateway's plain-text reply format.

mod send_sms;

pub use send_sms::{ProtocolError, decode_send_sms_response, encode_send_sms_query, parse_response};
