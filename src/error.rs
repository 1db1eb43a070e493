use std::fmt;

/// Stable identifiers for failures surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SendEmailFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::SendEmailFailed => "SendEmailFailed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failure while composing or transmitting a message lands here;
/// transient and permanent causes are not distinguished.
#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error("failed to send email, with err: {0:#}")]
    SendEmailFailed(anyhow::Error),
}

impl SendEmailError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SendEmailError::SendEmailFailed(_) => ErrorCode::SendEmailFailed,
        }
    }
}

impl From<anyhow::Error> for SendEmailError {
    fn from(e: anyhow::Error) -> Self {
        SendEmailError::SendEmailFailed(e)
    }
}

impl fmt::Debug for SendEmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
