use crate::domain::{BodyContentType, Recipients, Sender};
use std::collections::HashMap;
use std::path::PathBuf;

/// Everything needed to compose one outgoing message.
///
/// Owned by the caller and only borrowed for the duration of a send.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SendRequest {
    pub sender: Sender,
    #[serde(default)]
    pub recipients: Recipients,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub body_content_type: Option<BodyContentType>,
    /// Applied after the standard headers, so a colliding name replaces them.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Read from disk when the message is composed.
    #[serde(default)]
    pub attachments: Vec<PathBuf>,
}

impl SendRequest {
    pub fn builder(sender: Sender) -> SendRequestBuilder {
        SendRequestBuilder::new(sender)
    }

    /// The content type the body is sent with; unset means plain text.
    pub fn content_type(&self) -> BodyContentType {
        self.body_content_type.unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct SendRequestBuilder {
    request: SendRequest,
}

impl SendRequestBuilder {
    fn new(sender: Sender) -> Self {
        Self {
            request: SendRequest {
                sender,
                recipients: Recipients::default(),
                subject: String::new(),
                body: String::new(),
                body_content_type: None,
                headers: HashMap::new(),
                attachments: Vec::new(),
            },
        }
    }

    pub fn recipients(mut self, recipients: Recipients) -> Self {
        self.request.recipients = recipients;
        self
    }

    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.request.recipients.to.push(address.into());
        self
    }

    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.request.recipients.cc.push(address.into());
        self
    }

    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.request.recipients.bcc.push(address.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.request.subject = subject.into();
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.request.body = body.into();
        self.request.body_content_type = Some(BodyContentType::Plain);
        self
    }

    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.request.body = body.into();
        self.request.body_content_type = Some(BodyContentType::Html);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name.into(), value.into());
        self
    }

    pub fn attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.request.attachments.push(path.into());
        self
    }

    pub fn build(self) -> SendRequest {
        self.request
    }
}
