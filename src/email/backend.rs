use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::error::MonarkError;
use crate::server::config::{MonarkConfigEmailFile, MonarkConfigEmailSmtp};
use lettre::{
    message::MultiPart,
    transport::smtp::authentication::Credentials,
    transport::smtp::client::{Tls, TlsParameters},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Bound on connecting to and greeting the relay, so a hung relay fails the
/// request instead of hanging it.
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully-rendered message ready for a transport. The from/reply addressing
/// is supplied by the dispatcher at send time.
#[derive(Clone, Debug)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait EmailBackend {
    /// Send a single message, returning the transport's delivery identifier.
    /// One attempt only; retries are the caller's policy decision.
    async fn send(&self, from: &str, email: &OutboundEmail) -> Result<String, MonarkError>;
}

pub struct SmtpBackend {
    config: MonarkConfigEmailSmtp,
}

impl SmtpBackend {
    pub fn new(config: MonarkConfigEmailSmtp) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EmailBackend for SmtpBackend {
    async fn send(&self, from: &str, email: &OutboundEmail) -> Result<String, MonarkError> {
        let message = Message::builder()
            .from(from.parse()?)
            .to(email.to.parse()?)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))?;

        let creds = Credentials::new(
            self.config.smtp_username.to_owned(),
            self.config.smtp_password.to_owned(),
        );

        let tls_parameters = TlsParameters::builder(self.config.smtp_host.to_owned())
            .build()
            .map_err(|e| MonarkError::EmailSendError {
                message: format!("Could not configure TLS for the SMTP relay: {e}"),
                details: Some(format!("{e:?}")),
            })?;
        // Implicit TLS on the SMTPS port; STARTTLS upgrade everywhere else.
        let tls = if self.config.smtp_port == 465 {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.smtp_host)
                .credentials(creds)
                .port(self.config.smtp_port)
                .tls(tls)
                .timeout(Some(SMTP_TIMEOUT))
                .build();

        match mailer.send(message).await {
            Ok(response) => Ok(response.message().collect::<Vec<&str>>().join(" ")),
            Err(e) => Err(translate_smtp_error(&e)),
        }
    }
}

/// A 535 reply means the relay rejected the credentials themselves; turn
/// that into operator guidance instead of a bare transport error.
fn translate_smtp_error(error: &lettre::transport::smtp::Error) -> MonarkError {
    let text = error.to_string();
    let debug = format!("{error:?}");
    if text.contains("535") || debug.contains("535") {
        return MonarkError::ConfigurationError {
            message: "SMTP authentication failed (535). Verify the SMTP username and \
                      password/API key for the relay account (for Brevo, the SMTP key from \
                      the dashboard, not the account password), and that the sending address \
                      is a verified sender."
                .to_string(),
        };
    }
    MonarkError::EmailSendError {
        message: format!("Could not send email: {text}"),
        details: Some(debug),
    }
}

/// Captured form of an email written by `FileBackend`, one JSON object per
/// line. Used in local development and by the end-to-end tests.
#[derive(Serialize, Deserialize, Debug)]
pub struct EmailEntry {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub date: String,
    pub text: Vec<String>,
    pub html: String,
}

pub struct FileBackend {
    config: MonarkConfigEmailFile,
}

impl FileBackend {
    pub fn new(config: MonarkConfigEmailFile) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EmailBackend for FileBackend {
    async fn send(&self, from: &str, email: &OutboundEmail) -> Result<String, MonarkError> {
        let date = chrono::Utc::now();
        let email_entry = EmailEntry {
            from: from.to_string(),
            to: email.to.clone(),
            subject: email.subject.clone(),
            date: date.to_rfc2822(),
            text: email.text.lines().map(|s| s.to_string()).collect(),
            html: email.html.clone(),
        };

        let json_line = serde_json::to_string(&email_entry).map_err(|e| MonarkError::Other {
            message: format!("Failed to serialize email: {e:?}"),
        })? + "\n";

        if let Some(parent) = std::path::Path::new(&self.config.path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MonarkError::Other {
                    message: format!("Failed to create email directory: {e:?}"),
                })?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.path)
            .await
            .map_err(|e| MonarkError::Other {
                message: format!("Failed to open email file: {e:?}"),
            })?;

        file.write_all(json_line.as_bytes())
            .await
            .map_err(|e| MonarkError::Other {
                message: format!("Failed to write email to file: {e:?}"),
            })?;

        Ok(format!("file-{}", date.timestamp_millis()))
    }
}
