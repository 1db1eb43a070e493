mod body_content_type;
mod recipients;
mod send_request;
mod sender;

pub use body_content_type::BodyContentType;
pub use recipients::Recipients;
pub use send_request::{SendRequest, SendRequestBuilder};
pub use sender::Sender;
