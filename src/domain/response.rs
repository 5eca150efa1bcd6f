use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Key/value pairs returned by the gateway, e.g. `ID=123, ErrorCode=0`.
///
/// Values are kept exactly as received. Key order is not significant.
pub struct GatewayResponse {
    fields: BTreeMap<String, String>,
}

impl GatewayResponse {
    /// Status field; `0` means the message was accepted.
    pub const ERROR_CODE: &'static str = "ErrorCode";
    /// Gateway-assigned message or error id.
    pub const ID: &'static str = "ID";

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn error_code(&self) -> Option<&str> {
        self.get(Self::ERROR_CODE)
    }

    pub fn id(&self) -> Option<&str> {
        self.get(Self::ID)
    }

    /// `true` when `ErrorCode` is present and numerically zero.
    ///
    /// The comparison is numeric, so `"0"` and `"00"` both succeed while a
    /// missing or non-numeric code never does.
    pub fn is_success(&self) -> bool {
        self.error_code()
            .is_some_and(|code| code.trim().parse::<i64>() == Ok(0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl From<BTreeMap<String, String>> for GatewayResponse {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl From<GatewayResponse> for BTreeMap<String, String> {
    fn from(value: GatewayResponse) -> Self {
        value.fields
    }
}
