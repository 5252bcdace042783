//! Server configuration.
//!
//! Read from process environment variables (and a `.env` file loaded by the
//! binary beforehand). Every setting has a default, so an empty environment
//! gives a working development server that cannot send mail.

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Deserializer, Serialize};

use greeny_contact::{MailSettings, SmtpSettings};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment name (`development`, `production`, ...)
    #[serde(default = "default_node_env")]
    pub node_env: String,

    /// Rate limit window in minutes
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window: u64,

    /// Contact requests allowed per client per window
    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: u32,

    /// Comma separated CORS allow-list
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,

    /// Identify clients by `X-Forwarded-For` (set behind a reverse proxy)
    #[serde(default, deserialize_with = "flag")]
    pub trust_proxy: bool,

    // SMTP
    /// SMTP host
    #[serde(default = "default_email_host")]
    pub email_host: String,

    /// SMTP port
    #[serde(default = "default_email_port")]
    pub email_port: u16,

    /// Implicit TLS (port 465 style) instead of STARTTLS
    #[serde(default, deserialize_with = "flag")]
    pub email_secure: bool,

    /// SMTP user, also the sender address
    #[serde(default)]
    pub email_user: String,

    /// SMTP password
    #[serde(default)]
    pub email_pass: String,

    /// Bound on one delivery attempt in seconds
    #[serde(default = "default_email_timeout_secs")]
    pub email_timeout_secs: u64,

    // Addressing
    /// Inbox receiving contact notifications
    #[serde(default = "default_organization_email")]
    pub organization_email: String,

    /// Display name on notifications
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Notification subject prefix
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

/// On only for a literal `true`; any other value is off.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(value) => value,
        Raw::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        Raw::Int(_) | Raw::Float(_) => false,
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_node_env() -> String {
    "development".to_string()
}

fn default_rate_limit_window() -> u64 {
    15
}

fn default_rate_limit_max_requests() -> u32 {
    5
}

fn default_allowed_origins() -> String {
    "http://localhost:3001".to_string()
}

fn default_email_host() -> String {
    "localhost".to_string()
}

fn default_email_port() -> u16 {
    587
}

fn default_email_timeout_secs() -> u64 {
    30
}

fn default_organization_email() -> String {
    "info@geenycredit.com".to_string()
}

fn default_from_name() -> String {
    "Contact Form".to_string()
}

fn default_subject_prefix() -> String {
    "[Contact Form]".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            node_env: default_node_env(),
            rate_limit_window: default_rate_limit_window(),
            rate_limit_max_requests: default_rate_limit_max_requests(),
            allowed_origins: default_allowed_origins(),
            trust_proxy: false,
            email_host: default_email_host(),
            email_port: default_email_port(),
            email_secure: false,
            email_user: String::new(),
            email_pass: String::new(),
            email_timeout_secs: default_email_timeout_secs(),
            organization_email: default_organization_email(),
            from_name: default_from_name(),
            subject_prefix: default_subject_prefix(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Variable names are the upper-cased field names: `PORT`, `EMAIL_HOST`,
    /// `RATE_LIMIT_WINDOW` and so on.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Parsed CORS allow-list. Blank entries are dropped.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    /// Rate limit window as a duration.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window.saturating_mul(60))
    }

    /// Delivery timeout as a duration.
    pub fn email_timeout(&self) -> Duration {
        Duration::from_secs(self.email_timeout_secs)
    }

    /// Whether this is a production deployment.
    pub fn is_production(&self) -> bool {
        self.node_env.eq_ignore_ascii_case("production")
    }

    /// SMTP connection settings.
    pub fn smtp_settings(&self) -> SmtpSettings {
        SmtpSettings {
            host: self.email_host.clone(),
            port: self.email_port,
            secure: self.email_secure,
            username: self.email_user.clone(),
            password: self.email_pass.clone(),
            timeout: self.email_timeout(),
        }
    }

    /// Addressing used when rendering contact emails.
    pub fn mail_settings(&self) -> MailSettings {
        MailSettings {
            sender_address: self.email_user.clone(),
            from_name: self.from_name.clone(),
            organization_email: self.organization_email.clone(),
            subject_prefix: self.subject_prefix.clone(),
        }
    }
}
