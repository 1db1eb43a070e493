use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum BodyContentType {
    #[default]
    Plain,
    Html,
}

impl BodyContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyContentType::Plain => "text/plain",
            BodyContentType::Html => "text/html",
        }
    }
}

impl fmt::Display for BodyContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for BodyContentType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "" | "text/plain" => Ok(Self::Plain),
            "text/html" => Ok(Self::Html),
            other => Err(format!(
                "{} is not a supported body content type. Use either 'text/plain' or 'text/html'.",
                other
            )),
        }
    }
}

impl From<BodyContentType> for String {
    fn from(content_type: BodyContentType) -> Self {
        content_type.as_str().to_string()
    }
}
