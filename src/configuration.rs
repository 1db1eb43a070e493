use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub smtp: SmtpSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_password")]
    pub password: Secret<String>,
    #[serde(default)]
    pub tls: TlsSettings,
    #[serde(default, deserialize_with = "deserialize_optional_millis")]
    pub timeout_milliseconds: Option<u64>,
}

#[derive(serde::Deserialize)]
#[serde(transparent)]
struct Millis(#[serde(deserialize_with = "deserialize_number_from_string")] u64);

fn deserialize_optional_millis<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let millis: Option<Millis> = serde::Deserialize::deserialize(deserializer)?;
    Ok(millis.map(|Millis(value)| value))
}

/// Certificate verification is on unless a deployment opts out explicitly.
#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct TlsSettings {
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

fn empty_password() -> Secret<String> {
    Secret::new(String::new())
}

impl SmtpSettings {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: Secret<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password,
            tls: TlsSettings::default(),
            timeout_milliseconds: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }

    /// Port 465 speaks TLS from the first byte; every other port upgrades
    /// with STARTTLS when the server offers it.
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'local' or 'production'.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!(
            "Failed to determine the current directory: {}",
            e
        ))
    })?;
    let configuration_directory = base_path.join("configuration");
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let mut settings = config::Config::default();
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;
    settings.try_into()
}
