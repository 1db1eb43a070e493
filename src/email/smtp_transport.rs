use crate::configuration::SmtpSettings;
use crate::email::Transport;
use crate::error::SendEmailError;
use anyhow::Context;
use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

/// SMTP relay client.
///
/// Building one does not touch the network; every transmission opens its
/// own connection and closes it once the relay has answered.
#[derive(Clone)]
pub struct SmtpTransport {
    relay: AsyncSmtpTransport<Tokio1Executor>,
    endpoint: String,
}

impl SmtpTransport {
    pub fn new(settings: &SmtpSettings) -> Result<Self, SendEmailError> {
        let tls = tls_policy(settings)?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls);
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(Some(timeout));
        }
        if !settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                settings.password.expose_secret().clone(),
            ));
        }

        Ok(Self {
            relay: builder.build(),
            endpoint: format!("{}:{}", settings.host, settings.port),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn tls_policy(settings: &SmtpSettings) -> anyhow::Result<Tls> {
    let mut parameters = TlsParameters::builder(settings.host.clone());
    if settings.tls.insecure_skip_verify {
        tracing::warn!(
            host = %settings.host,
            "TLS certificate verification is disabled for this relay"
        );
        parameters = parameters
            .dangerous_accept_invalid_certs(true)
            .dangerous_accept_invalid_hostnames(true);
    }
    let parameters = parameters
        .build()
        .with_context(|| format!("Failed to prepare TLS for {}", settings.host))?;

    if settings.implicit_tls() {
        Ok(Tls::Wrapper(parameters))
    } else {
        Ok(Tls::Opportunistic(parameters))
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    #[tracing::instrument(
        name = "Transmitting over SMTP",
        skip(self, message),
        fields(endpoint = %self.endpoint)
    )]
    async fn transmit(&self, message: Message) -> anyhow::Result<()> {
        let response = self
            .relay
            .send(message)
            .await
            .with_context(|| format!("SMTP relay {} did not accept the message", self.endpoint))?;
        tracing::debug!(code = %response.code(), "Relay response");
        Ok(())
    }
}
