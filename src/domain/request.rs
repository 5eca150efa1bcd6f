use crate::domain::config::Config;
use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, Recipient, ServiceId};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single message to push through the gateway.
///
/// Credentials default to the client's [`Config`]; `service_id`/`from_id`
/// set here take precedence for this request only.
pub struct SendSms {
    recipient: Recipient,
    text: String,
    service_id: Option<String>,
    from_id: Option<String>,
}

impl SendSms {
    /// Create a request. `to` is sanitized immediately.
    pub fn new(to: impl Into<Recipient>, text: impl Into<String>) -> Self {
        Self {
            recipient: to.into(),
            text: text.into(),
            service_id: None,
            from_id: None,
        }
    }

    /// Override the configured service id for this request.
    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Override the configured sender id for this request.
    pub fn with_from_id(mut self, from_id: impl Into<String>) -> Self {
        self.from_id = Some(from_id.into());
        self
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Merge with the configured credentials and validate.
    ///
    /// Checks run in a fixed order: service id, message text, recipient.
    /// The sender id is passed through as given.
    pub fn prepare(self, config: &Config) -> Result<PreparedSend, ValidationError> {
        let service_id = match self.service_id {
            Some(value) => ServiceId::new(value)?,
            None => config.service_id().clone(),
        };
        let text = MessageText::new(self.text)?;
        if self.recipient.is_empty() {
            return Err(ValidationError::Empty {
                field: Recipient::FIELD,
            });
        }
        let from_id = self
            .from_id
            .unwrap_or_else(|| config.from_id().as_str().to_owned());

        Ok(PreparedSend {
            service_id,
            from_id,
            recipient: self.recipient,
            text,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A validated [`SendSms`] with credentials resolved, ready to encode.
pub struct PreparedSend {
    service_id: ServiceId,
    from_id: String,
    recipient: Recipient,
    text: MessageText,
}

impl PreparedSend {
    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub fn from_id(&self) -> &str {
        &self.from_id
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}
