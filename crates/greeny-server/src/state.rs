//! Application state.

use std::sync::Arc;

use greeny_contact::{ContactPipeline, SmtpConnector};

use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Contact form pipeline.
    pub contact: Arc<ContactPipeline>,

    /// Limiter applied to contact submissions.
    pub contact_limiter: Arc<RateLimiter>,

    /// Browser origins allowed by CORS.
    pub allowed_origins: Arc<[String]>,
}

impl AppState {
    /// Create state from its parts.
    pub fn new(
        contact: ContactPipeline,
        contact_limiter: RateLimiter,
        allowed_origins: Vec<String>,
    ) -> Self {
        Self {
            contact: Arc::new(contact),
            contact_limiter: Arc::new(contact_limiter),
            allowed_origins: allowed_origins.into(),
        }
    }

    /// Create state delivering mail over SMTP as configured.
    pub fn from_config(config: &ServerConfig) -> Self {
        let connector = Arc::new(SmtpConnector::new(config.smtp_settings()));
        let pipeline = ContactPipeline::new(connector, config.mail_settings())
            .with_timeout(config.email_timeout());
        let limiter = RateLimiter::new(config.rate_limit_window(), config.rate_limit_max_requests)
            .with_trusted_proxy(config.trust_proxy);

        Self::new(pipeline, limiter, config.allowed_origins())
    }
}
