use crate::domain::{BodyContentType, SendRequest};
use anyhow::{anyhow, Context};
use lettre::message::header::{ContentType, HeaderName, HeaderValue};
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use std::path::Path;

/// Turn a request into a MIME message ready for the relay.
///
/// Attachments are read from disk here, so a missing file fails the whole
/// send before any connection is opened. A request without any recipient is
/// rejected for the same reason: the envelope cannot be built.
#[tracing::instrument(name = "Composing the message", skip(request))]
pub async fn compose_message(request: &SendRequest) -> anyhow::Result<Message> {
    let from = request.sender.from_header();
    let mut builder = Message::builder()
        .from(parse_mailbox(&from)?)
        .raw_header(HeaderValue::new(HeaderName::new_from_ascii_str("From"), from));

    for address in &request.recipients.to {
        builder = builder.to(parse_mailbox(address)?);
    }
    for address in &request.recipients.cc {
        builder = builder.cc(parse_mailbox(address)?);
    }
    for address in &request.recipients.bcc {
        builder = builder.bcc(parse_mailbox(address)?);
    }
    builder = builder.subject(request.subject.clone());

    let mut extra_headers: Vec<_> = request.headers.iter().collect();
    extra_headers.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (name, value) in extra_headers {
        let header_name = HeaderName::new_from_ascii(name.clone())
            .map_err(|_| anyhow!("{:?} is not a valid header name", name))?;
        builder = builder.raw_header(HeaderValue::new(header_name, value.clone()));
    }

    let body = body_part(request.content_type(), &request.body);
    let message = if request.attachments.is_empty() {
        builder.singlepart(body)
    } else {
        let mut parts = MultiPart::mixed().singlepart(body);
        for path in &request.attachments {
            parts = parts.singlepart(attachment_part(path).await?);
        }
        builder.multipart(parts)
    };

    message.context("Failed to build the message")
}

fn parse_mailbox(address: &str) -> anyhow::Result<Mailbox> {
    address
        .parse()
        .with_context(|| format!("{:?} is not a valid email address", address))
}

fn body_part(content_type: BodyContentType, body: &str) -> SinglePart {
    let header = match content_type {
        BodyContentType::Plain => ContentType::TEXT_PLAIN,
        BodyContentType::Html => ContentType::TEXT_HTML,
    };
    SinglePart::builder().header(header).body(body.to_string())
}

async fn attachment_part(path: &Path) -> anyhow::Result<SinglePart> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} does not name a file", path.display()))?;
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read attachment {}", path.display()))?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let content_type = ContentType::parse(mime.essence_str())
        .map_err(|_| anyhow!("Unusable content type {} for {}", mime, path.display()))?;

    Ok(Attachment::new(filename).body(content, content_type))
}
