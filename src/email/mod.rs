mod mailer;
mod message;
mod smtp_transport;
mod transport;

use crate::domain::SendRequest;
use crate::error::SendEmailError;
use async_trait::async_trait;
pub use mailer::Mailer;
pub use message::compose_message;
pub use smtp_transport::SmtpTransport;
pub use transport::Transport;

/// What host applications depend on, usually as `Arc<dyn Email>`.
#[async_trait]
pub trait Email: Send + Sync {
    async fn send_email(&self, request: &SendRequest) -> Result<(), SendEmailError>;
}
