use std::collections::BTreeMap;

use crate::domain::{FromId, GatewayResponse, MessageText, PreparedSend, Recipient, ServiceId};

const PAIR_SEPARATOR: &str = ", ";
const KEY_VALUE_SEPARATOR: char = '=';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// The response body does not follow the gateway's `key=value, ...` format.
pub enum ProtocolError {
    /// A segment did not contain exactly one `=`.
    #[error("malformed response segment: {segment:?}")]
    MalformedSegment { segment: String },

    /// A field required to classify the response is absent.
    #[error("response is missing required field {field}")]
    MissingField { field: &'static str },
}

/// Query parameters for one push request, in the gateway's fixed names.
pub fn encode_send_sms_query(request: &PreparedSend) -> Vec<(String, String)> {
    vec![
        (
            ServiceId::FIELD.to_owned(),
            request.service_id().as_str().to_owned(),
        ),
        (FromId::FIELD.to_owned(), request.from_id().to_owned()),
        (
            Recipient::FIELD.to_owned(),
            request.recipient().as_str().to_owned(),
        ),
        (
            MessageText::FIELD.to_owned(),
            request.text().as_str().to_owned(),
        ),
    ]
}

/// Parse a gateway response body such as `ID=123, ErrorCode=0`.
///
/// The body is split on `", "` and every segment on its single `=`. Keys and
/// values are not trimmed. When a key repeats, the last value wins. A segment
/// without exactly one `=` (including an empty body) is rejected.
pub fn parse_response(body: &str) -> Result<GatewayResponse, ProtocolError> {
    let mut fields = BTreeMap::new();
    for segment in body.split(PAIR_SEPARATOR) {
        let Some((key, value)) = segment.split_once(KEY_VALUE_SEPARATOR) else {
            return Err(malformed(segment));
        };
        if value.contains(KEY_VALUE_SEPARATOR) {
            return Err(malformed(segment));
        }
        fields.insert(key.to_owned(), value.to_owned());
    }
    Ok(GatewayResponse::from(fields))
}

/// Parse a push response and require the `ErrorCode` field.
pub fn decode_send_sms_response(body: &str) -> Result<GatewayResponse, ProtocolError> {
    let response = parse_response(body)?;
    if response.error_code().is_none() {
        return Err(ProtocolError::MissingField {
            field: GatewayResponse::ERROR_CODE,
        });
    }
    Ok(response)
}

fn malformed(segment: &str) -> ProtocolError {
    ProtocolError::MalformedSegment {
        segment: segment.to_owned(),
    }
}
