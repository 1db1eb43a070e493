use async_trait::async_trait;
use lettre::Message;
use std::sync::Arc;

/// Hands a composed message to a mail relay.
///
/// Implementations must be safe to share between concurrent sends.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn transmit(&self, message: Message) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn transmit(&self, message: Message) -> anyhow::Result<()> {
        (**self).transmit(message).await
    }
}
