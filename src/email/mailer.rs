use crate::configuration::SmtpSettings;
use crate::domain::SendRequest;
use crate::email::{compose_message, Email, SmtpTransport, Transport};
use crate::error::SendEmailError;
use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

/// Composes requests and hands them to a [`Transport`], one attempt per call.
///
/// Holds no per-send state, so a single instance can serve concurrent sends.
pub struct Mailer<T = SmtpTransport> {
    transport: T,
}

impl Mailer<SmtpTransport> {
    pub fn from_settings(settings: &SmtpSettings) -> Result<Self, SendEmailError> {
        Ok(Self::new(SmtpTransport::new(settings)?))
    }
}

impl<T: Transport> Mailer<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[tracing::instrument(
        name = "Sending an email",
        skip(self, request),
        fields(
            request_id = %Uuid::new_v4(),
            subject = %request.subject,
            recipients = request.recipients.len(),
            attachments = request.attachments.len(),
            content_type = %request.content_type(),
        )
    )]
    pub async fn send(&self, request: &SendRequest) -> Result<(), SendEmailError> {
        match self.compose_and_transmit(request).await {
            Ok(()) => {
                tracing::info!("Email accepted by the relay");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to send email");
                Err(SendEmailError::SendEmailFailed(e))
            }
        }
    }

    async fn compose_and_transmit(&self, request: &SendRequest) -> anyhow::Result<()> {
        let message = compose_message(request)
            .await
            .context("Failed to compose the message")?;
        self.transport.transmit(message).await
    }
}

#[async_trait]
impl<T: Transport> Email for Mailer<T> {
    async fn send_email(&self, request: &SendRequest) -> Result<(), SendEmailError> {
        self.send(request).await
    }
}
