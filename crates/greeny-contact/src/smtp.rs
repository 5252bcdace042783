//! SMTP implementation of the mail transport seam, backed by `lettre`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox as LettreMailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::render::{EmailDocument, Mailbox};
use crate::transport::{MailConnector, MailSession};

/// Connection settings for the SMTP server.
#[derive(Clone)]
pub struct SmtpSettings {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Implicit TLS from the first byte. When false, STARTTLS is used if the
    /// server offers it.
    pub secure: bool,
    /// Login user; also the sender address. Empty disables authentication.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Per-command network timeout.
    pub timeout: Duration,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            secure: false,
            username: String::new(),
            password: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Opens SMTP sessions with fixed settings.
#[derive(Debug, Clone)]
pub struct SmtpConnector {
    settings: SmtpSettings,
}

impl SmtpConnector {
    /// Create a connector.
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    /// The settings this connector uses.
    pub fn settings(&self) -> &SmtpSettings {
        &self.settings
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportError> {
        let s = &self.settings;
        let tls_parameters = TlsParameters::new(s.host.clone())
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        let tls = if s.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&s.host)
            .port(s.port)
            .tls(tls)
            .timeout(Some(s.timeout));

        if !s.username.is_empty() {
            builder = builder.credentials(Credentials::new(s.username.clone(), s.password.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl MailConnector for SmtpConnector {
    async fn open(&self) -> Result<Box<dyn MailSession>, TransportError> {
        debug!(
            host = %self.settings.host,
            port = self.settings.port,
            secure = self.settings.secure,
            "Opening SMTP session"
        );
        let transport = self.transport()?;
        Ok(Box::new(SmtpSession { transport }))
    }
}

struct SmtpSession {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

#[async_trait]
impl MailSession for SmtpSession {
    async fn verify(&mut self) -> Result<(), TransportError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(TransportError::Verify(
                "server did not respond".to_string(),
            )),
            Err(e) if e.is_permanent() || e.is_transient() => {
                Err(TransportError::Verify(e.to_string()))
            }
            Err(e) => Err(TransportError::Connect(e.to_string())),
        }
    }

    async fn send(&mut self, document: &EmailDocument) -> Result<(), TransportError> {
        let message = build_message(document)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;
        debug!(to = %document.to.address, subject = %document.subject, "SMTP send accepted");
        Ok(())
    }

    async fn close(self: Box<Self>) {
        // Unpooled: dropping the transport releases every connection.
        drop(self.transport);
    }
}

fn build_message(document: &EmailDocument) -> Result<Message, TransportError> {
    let mut builder = Message::builder()
        .from(mailbox(&document.from)?)
        .to(mailbox(&document.to)?)
        .subject(document.subject.clone());

    if let Some(reply_to) = &document.reply_to {
        builder = builder.reply_to(mailbox(reply_to)?);
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            document.text.clone(),
            document.html.clone(),
        ))
        .map_err(|e| TransportError::Message(e.to_string()))
}

fn mailbox(mailbox: &Mailbox) -> Result<LettreMailbox, TransportError> {
    let address: Address = mailbox.address.parse().map_err(|e| {
        warn!(address = %mailbox.address, "Unparseable mailbox address");
        TransportError::Message(format!("invalid address {:?}: {e}", mailbox.address))
    })?;
    Ok(LettreMailbox::new(mailbox.name.clone(), address))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(reply_to: Option<Mailbox>) -> EmailDocument {
        EmailDocument {
            from: Mailbox::named("Contact Form", "noreply@greenycredit.in"),
            to: Mailbox::bare("branch@greenycredit.in"),
            reply_to,
            subject: "[Contact Form] New inquiry from Asha".to_string(),
            html: "<p>Hello</p>".to_string(),
            text: "Hello".to_string(),
        }
    }

    #[test]
    fn test_build_message_with_reply_to() {
        let message = build_message(&document(Some(Mailbox::named("Asha", "asha@example.com"))))
            .unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("Reply-To: \"Asha\" <asha@example.com>")
            || formatted.contains("Reply-To: Asha <asha@example.com>"));
        assert!(formatted.contains("To: branch@greenycredit.in"));
        assert!(formatted.contains("multipart/alternative"));
    }

    #[test]
    fn test_build_message_rejects_bad_address() {
        let mut doc = document(None);
        doc.from = Mailbox::bare("");

        let err = build_message(&doc).unwrap_err();
        assert!(matches!(err, TransportError::Message(_)));
    }

    #[test]
    fn test_settings_debug_hides_password() {
        let settings = SmtpSettings {
            password: "hunter2".to_string(),
            ..SmtpSettings::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_open_builds_transport_without_connecting() {
        let connector = SmtpConnector::new(SmtpSettings {
            host: "smtp.example.invalid".to_string(),
            ..SmtpSettings::default()
        });
        assert!(connector.open().await.is_ok());
    }
}
