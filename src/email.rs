use log::{error, info};
use std::sync::Arc;

use crate::email::backend::{EmailBackend, FileBackend, OutboundEmail, SmtpBackend};
use crate::email::templating::AcknowledgmentKind;
use crate::error::MonarkError;
use crate::http::structs::{ContactSubmission, RegistrationSubmission};
use crate::server::config::{resolve_email_settings, MonarkConfig, ResolvedEmailSettings};
use chrono::Utc;

pub mod backend;
pub mod templating;

/// The outcome of a dispatched submission. The admin notification is
/// mandatory; the submitter acknowledgment is best-effort, so a failed
/// acknowledgment still counts as an overall success and is surfaced here
/// instead of as an error.
#[derive(Debug)]
pub enum DispatchOutcome {
    Delivered {
        admin_message_id: String,
        acknowledgment_message_id: String,
    },
    AcknowledgmentFailed {
        admin_message_id: String,
        reason: String,
    },
}

/// Sends the admin notification and submitter acknowledgment for a
/// submission. Constructed once at startup from resolved configuration and
/// shared across requests via `web::Data`.
#[derive(Clone)]
pub struct EmailDispatcher {
    settings: ResolvedEmailSettings,
    backend: Arc<dyn EmailBackend + Send + Sync>,
    development: bool,
}

impl EmailDispatcher {
    pub fn from_config(config: &MonarkConfig) -> Result<Self, MonarkError> {
        let settings = resolve_email_settings(&config.email)?;
        let backend: Arc<dyn EmailBackend + Send + Sync> = if let Some(smtp) = &settings.smtp {
            Arc::new(SmtpBackend::new(smtp.clone()))
        } else if let Some(file) = &settings.file {
            Arc::new(FileBackend::new(file.clone()))
        } else {
            return Err(MonarkError::ConfigurationError {
                message: "No email backend configured".to_string(),
            });
        };
        Ok(Self {
            settings,
            backend,
            development: config.development_on(),
        })
    }

    /// Construct a dispatcher around an explicit backend. Used by tests to
    /// substitute a scripted transport.
    pub fn with_backend(
        settings: ResolvedEmailSettings,
        backend: Arc<dyn EmailBackend + Send + Sync>,
        development: bool,
    ) -> Self {
        Self {
            settings,
            backend,
            development,
        }
    }

    pub async fn dispatch_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<DispatchOutcome, MonarkError> {
        let submitted_at = Utc::now();

        let admin_email = OutboundEmail {
            to: self.settings.admin_email.clone(),
            subject: format!("New Contact Form Inquiry from {} - Monark FX", submission.name),
            text: templating::render_contact_admin_text(submission),
            html: templating::render_contact_admin_html(
                submission,
                &self.settings.site_url,
                submitted_at,
            ),
        };
        let admin_message_id = self.send_required(&admin_email).await?;
        info!(
            "Admin notification for contact inquiry from {} sent: {}",
            submission.email, admin_message_id
        );

        let acknowledgment = OutboundEmail {
            to: submission.email.clone(),
            subject: "Thank You for Contacting Monark FX - We Received Your Message".to_string(),
            text: templating::render_thank_you_text(&submission.name, AcknowledgmentKind::Contact),
            html: templating::render_thank_you_html(
                &submission.name,
                &self.settings.site_url,
                submitted_at,
                AcknowledgmentKind::Contact,
            ),
        };
        Ok(self.send_best_effort(admin_message_id, &acknowledgment).await)
    }

    pub async fn dispatch_registration(
        &self,
        submission: &RegistrationSubmission,
    ) -> Result<DispatchOutcome, MonarkError> {
        let submitted_at = Utc::now();

        let admin_email = OutboundEmail {
            to: self.settings.admin_email.clone(),
            subject: format!("New Registration: {} - Monark FX", submission.full_name),
            text: templating::render_registration_admin_text(submission),
            html: templating::render_registration_admin_html(
                submission,
                &self.settings.site_url,
                submitted_at,
            ),
        };
        let admin_message_id = self.send_required(&admin_email).await?;
        info!(
            "Admin notification for registration from {} sent: {}",
            submission.email, admin_message_id
        );

        let acknowledgment = OutboundEmail {
            to: submission.email.clone(),
            subject: "Thank You for Registering with Monark FX".to_string(),
            text: templating::render_thank_you_text(
                &submission.full_name,
                AcknowledgmentKind::Registration,
            ),
            html: templating::render_thank_you_html(
                &submission.full_name,
                &self.settings.site_url,
                submitted_at,
                AcknowledgmentKind::Registration,
            ),
        };
        Ok(self.send_best_effort(admin_message_id, &acknowledgment).await)
    }

    fn from_mailbox(&self) -> String {
        format!(
            "\"{}\" <{}>",
            self.settings.from_name, self.settings.from_email
        )
    }

    async fn send_required(&self, email: &OutboundEmail) -> Result<String, MonarkError> {
        match self.backend.send(&self.from_mailbox(), email).await {
            Ok(message_id) => Ok(message_id),
            Err(err) => {
                error!("Failed to send admin notification to {}: {}", email.to, err);
                Err(self.scrub_details(err))
            }
        }
    }

    async fn send_best_effort(
        &self,
        admin_message_id: String,
        email: &OutboundEmail,
    ) -> DispatchOutcome {
        match self.backend.send(&self.from_mailbox(), email).await {
            Ok(acknowledgment_message_id) => DispatchOutcome::Delivered {
                admin_message_id,
                acknowledgment_message_id,
            },
            Err(err) => DispatchOutcome::AcknowledgmentFailed {
                admin_message_id,
                reason: err.to_string(),
            },
        }
    }

    /// Transport diagnostics stay server-side outside development mode.
    fn scrub_details(&self, err: MonarkError) -> MonarkError {
        if self.development {
            return err;
        }
        match err {
            MonarkError::EmailSendError { message, .. } => MonarkError::EmailSendError {
                message,
                details: None,
            },
            other => other,
        }
    }
}
