use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Front SMS service id (`serviceid`), the account credential.
///
/// Invariant: non-empty. Whitespace is preserved as provided.
pub struct ServiceId(String);

impl ServiceId {
    /// Query parameter name used by the gateway (`serviceid`).
    pub const FIELD: &'static str = "serviceid";

    /// Create a validated [`ServiceId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the service id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id (`fromid`) shown to the recipient.
///
/// Invariant: non-empty. The value must be registered with the gateway.
pub struct FromId(String);

impl FromId {
    /// Query parameter name used by the gateway (`fromid`).
    pub const FIELD: &'static str = "fromid";

    /// Create a validated [`FromId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`txt`).
///
/// Invariant: non-empty. Whitespace-only text is accepted and sent verbatim.
pub struct MessageText(String);

impl MessageText {
    /// Query parameter name used by the gateway (`txt`).
    pub const FIELD: &'static str = "txt";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination phone number as sent to the gateway (`phoneno`).
///
/// Invariant: contains only ASCII letters, digits and spaces. Every other
/// character is stripped on construction, including the leading `+` of
/// international numbers. The result may be empty; emptiness is rejected
/// when a send is prepared, not here.
pub struct Recipient(String);

impl Recipient {
    /// Query parameter name used by the gateway (`phoneno`).
    pub const FIELD: &'static str = "phoneno";

    /// Strip every character outside `[A-Za-z0-9 ]`.
    pub fn sanitize(input: impl AsRef<str>) -> Self {
        Self(
            input
                .as_ref()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
                .collect(),
        )
    }

    /// Parse a phone number, normalize it to E.164 and sanitize the result.
    ///
    /// `default_region` is used when the input has no explicit country prefix.
    /// The normalized form keeps the country code, so `"+47 412 34 567"` and
    /// `"412 34 567"` with region `NO` both become `"4741234567"`.
    pub fn parse_e164(
        default_region: Option<country::Id>,
        input: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let raw = input.as_ref().trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            }
        })?;
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        Ok(Self::sanitize(e164))
    }

    /// Sanitized value as sent to the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if nothing survived sanitization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Recipient {
    fn from(value: &str) -> Self {
        Self::sanitize(value)
    }
}

impl From<String> for Recipient {
    fn from(value: String) -> Self {
        Self::sanitize(value)
    }
}
