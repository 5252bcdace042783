//! Email documents produced for each accepted submission.
//!
//! Rendering is pure: the same submission, settings and timestamp always give
//! the same documents. User-supplied values are HTML-escaped in the HTML
//! bodies and left as typed in the plain-text bodies.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::submission::ContactSubmission;

/// Registered name of the bank.
pub const BANK_NAME: &str = "Greeny Credit Co-operative Bank";

/// Customer helpline printed in acknowledgments.
pub const HELPLINE: &str = "+1 234 567 8900";

/// Banking hours printed in acknowledgments.
pub const BANKING_HOURS: [&str; 3] = [
    "Monday - Friday: 9:00 AM - 5:00 PM",
    "Saturday: 10:00 AM - 2:00 PM",
    "Sunday: Closed",
];

const NOT_PROVIDED: &str = "Not provided";

/// A display name plus address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// Display name, if any.
    pub name: Option<String>,
    /// Bare address.
    pub address: String,
}

impl Mailbox {
    /// Mailbox with a display name.
    pub fn named(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            address: address.into(),
        }
    }

    /// Mailbox without a display name.
    pub fn bare(address: impl Into<String>) -> Self {
        Self {
            name: None,
            address: address.into(),
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "\"{}\" <{}>", name, self.address),
            None => f.write_str(&self.address),
        }
    }
}

/// A fully rendered message ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDocument {
    /// Sender.
    pub from: Mailbox,
    /// Recipient.
    pub to: Mailbox,
    /// Where replies should go.
    pub reply_to: Option<Mailbox>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative.
    pub text: String,
}

/// Addressing used when rendering documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailSettings {
    /// Authenticated sender address (the SMTP user).
    pub sender_address: String,
    /// Display name on organization notifications.
    pub from_name: String,
    /// Inbox that receives notifications.
    pub organization_email: String,
    /// Prefix for notification subjects.
    pub subject_prefix: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            sender_address: String::new(),
            from_name: "Contact Form".to_string(),
            organization_email: "info@geenycredit.com".to_string(),
            subject_prefix: "[Contact Form]".to_string(),
        }
    }
}

/// Render the notification sent to the organization inbox.
///
/// Replies go straight to the submitter.
pub fn render_notification(
    submission: &ContactSubmission,
    settings: &MailSettings,
    submitted_at: DateTime<Utc>,
) -> EmailDocument {
    let fields = Fields::of(submission, submitted_at);
    let html_fields = fields.escaped();

    let subject = format!(
        "{} New inquiry from {}",
        settings.subject_prefix, fields.name
    );

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ddd;">
  <div style="background-color: #004080; color: white; padding: 20px; text-align: center; margin-bottom: 20px;">
    <h1 style="margin: 0;">{bank}</h1>
    <p style="margin: 5px 0 0 0;">New Contact Form Submission</p>
  </div>
  <div style="padding: 20px; background-color: #f9f9f9; margin-bottom: 20px;">
    <h2 style="color: #004080; margin-top: 0;">Contact Information</h2>
    <table style="width: 100%; border-collapse: collapse;">
      <tr style="border-bottom: 1px solid #ddd;"><td style="padding: 10px 0; font-weight: bold; width: 150px;">Full Name:</td><td style="padding: 10px 0;">{name}</td></tr>
      <tr style="border-bottom: 1px solid #ddd;"><td style="padding: 10px 0; font-weight: bold;">Email:</td><td style="padding: 10px 0;">{email}</td></tr>
      <tr style="border-bottom: 1px solid #ddd;"><td style="padding: 10px 0; font-weight: bold;">Phone:</td><td style="padding: 10px 0;">{phone}</td></tr>
      <tr style="border-bottom: 1px solid #ddd;"><td style="padding: 10px 0; font-weight: bold;">Inquiry Type:</td><td style="padding: 10px 0;">{inquiry}</td></tr>
    </table>
  </div>
  <div style="padding: 20px; background-color: white; border: 1px solid #ddd;">
    <h3 style="color: #004080; margin-top: 0;">Message:</h3>
    <p style="line-height: 1.6; white-space: pre-wrap;">{message}</p>
  </div>
  <div style="margin-top: 20px; padding: 15px; background-color: #e8f4fd; border-left: 4px solid #004080;">
    <p style="margin: 0; font-size: 12px; color: #666;">
      This email was sent from the {bank} website contact form.
      <br>Submitted on: {submitted}
    </p>
  </div>
</div>
"#,
        bank = BANK_NAME,
        name = html_fields.name,
        email = html_fields.email,
        phone = html_fields.phone,
        inquiry = html_fields.inquiry,
        message = html_fields.message,
        submitted = html_fields.submitted,
    );

    let text = format!(
        "New Contact Form Submission - {bank}

Contact Information:
Name: {name}
Email: {email}
Phone: {phone}
Inquiry Type: {inquiry}

Message:
{message}

Submitted on: {submitted}
",
        bank = BANK_NAME,
        name = fields.name,
        email = fields.email,
        phone = fields.phone,
        inquiry = fields.inquiry,
        message = fields.message,
        submitted = fields.submitted,
    );

    EmailDocument {
        from: Mailbox::named(&settings.from_name, &settings.sender_address),
        to: Mailbox::bare(&settings.organization_email),
        reply_to: Some(Mailbox::named(submission.name(), submission.email().as_str())),
        subject,
        html,
        text,
    }
}

/// Render the acknowledgment sent back to the submitter.
pub fn render_acknowledgment(
    submission: &ContactSubmission,
    settings: &MailSettings,
    submitted_at: DateTime<Utc>,
) -> EmailDocument {
    let fields = Fields::of(submission, submitted_at);
    let html_fields = fields.escaped();
    let year = submitted_at.year();

    let html_hours: String = BANKING_HOURS
        .iter()
        .map(|line| format!("      <li>{line}</li>\n"))
        .collect();
    let text_hours: String = BANKING_HOURS
        .iter()
        .map(|line| format!("- {line}\n"))
        .collect();

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background-color: #004080; color: white; padding: 20px; text-align: center; margin-bottom: 20px;">
    <h1 style="margin: 0;">{bank}</h1>
    <p style="margin: 5px 0 0 0;">Thank you for your inquiry</p>
  </div>
  <div style="padding: 20px;">
    <p>Dear {name},</p>
    <p>Thank you for contacting {bank}. We have received your inquiry regarding <strong>{inquiry}</strong> and our team will get back to you as soon as possible.</p>
    <p>Here's a summary of your submission:</p>
    <ul>
      <li><strong>Name:</strong> {name}</li>
      <li><strong>Email:</strong> {email}</li>
      <li><strong>Phone:</strong> {phone}</li>
      <li><strong>Inquiry Type:</strong> {inquiry}</li>
      <li><strong>Submitted:</strong> {submitted}</li>
    </ul>
    <p>If you have any urgent queries, please feel free to call us at <strong>{helpline}</strong> during our banking hours:</p>
    <ul>
{hours}    </ul>
    <p>Best regards,<br>
    Customer Service Team<br>
    {bank}</p>
  </div>
  <div style="background-color: #f0f0f0; padding: 15px; text-align: center; margin-top: 20px;">
    <p style="margin: 0; font-size: 12px; color: #666;">
      This is an automated message. Please do not reply to this email.
      <br>&copy; {year} {bank}. All rights reserved.
    </p>
  </div>
</div>
"#,
        bank = BANK_NAME,
        name = html_fields.name,
        email = html_fields.email,
        phone = html_fields.phone,
        inquiry = html_fields.inquiry,
        submitted = html_fields.submitted,
        helpline = HELPLINE,
        hours = html_hours,
        year = year,
    );

    let text = format!(
        "Dear {name},

Thank you for contacting {bank}. We have received your inquiry regarding {inquiry} and our team will get back to you as soon as possible.

Here's a summary of your submission:
- Name: {name}
- Email: {email}
- Phone: {phone}
- Inquiry Type: {inquiry}
- Submitted: {submitted}

If you have any urgent queries, please feel free to call us at {helpline} during our banking hours:
{hours}
Best regards,
Customer Service Team
{bank}
",
        bank = BANK_NAME,
        name = fields.name,
        email = fields.email,
        phone = fields.phone,
        inquiry = fields.inquiry,
        submitted = fields.submitted,
        helpline = HELPLINE,
        hours = text_hours,
    );

    EmailDocument {
        from: Mailbox::named(BANK_NAME, &settings.sender_address),
        to: Mailbox::named(submission.name(), submission.email().as_str()),
        reply_to: None,
        subject: format!("Thank you for contacting {BANK_NAME}"),
        html,
        text,
    }
}

/// Template values shared by both documents.
struct Fields {
    name: String,
    email: String,
    phone: String,
    inquiry: String,
    message: String,
    submitted: String,
}

impl Fields {
    fn of(submission: &ContactSubmission, submitted_at: DateTime<Utc>) -> Self {
        Self {
            name: submission.name().to_string(),
            email: submission.email().to_string(),
            phone: submission
                .phone()
                .map_or_else(|| NOT_PROVIDED.to_string(), |p| p.to_string()),
            inquiry: submission.inquiry_type().label().to_string(),
            message: submission.message().to_string(),
            submitted: submitted_at.format("%d %b %Y, %H:%M:%S UTC").to_string(),
        }
    }

    fn escaped(&self) -> Self {
        Self {
            name: escape_html(&self.name),
            email: escape_html(&self.email),
            phone: escape_html(&self.phone),
            inquiry: escape_html(&self.inquiry),
            message: escape_html(&self.message),
            submitted: escape_html(&self.submitted),
        }
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
