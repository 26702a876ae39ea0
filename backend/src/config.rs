use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_DIR: &str = "public";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Mail settings for the booking intake. Read once at start-up and handed
/// to the endpoint; nothing consults the environment afterwards.
#[derive(Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    /// Sender identity, also the SMTP username.
    pub sender: String,
    pub password: String,
    /// The single destination for every booking email.
    pub recipient: String,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub frontend_dir: PathBuf,
    pub mail: MailConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match lookup("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let mail = MailConfig {
            smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            sender: required("EMAIL_USER")?,
            password: required("EMAIL_PASS")?,
            recipient: required("BOOKING_RECIPIENT")?,
        };

        Ok(Self {
            port,
            frontend_dir: lookup("FRONTEND_DIR")
                .unwrap_or_else(|| DEFAULT_FRONTEND_DIR.to_string())
                .into(),
            mail,
        })
    }
}
