use actix_web::{post, web, HttpResponse};
use log::{info, warn};

use crate::email::{DispatchOutcome, EmailDispatcher};
use crate::error::MonarkError;
use crate::http::structs::{ContactSubmission, SubmissionResponse};
use crate::server::validation::validate_contact;

#[post("/api/contact")]
async fn contact(
    submission: web::Json<ContactSubmission>,
    dispatcher: web::Data<EmailDispatcher>,
) -> Result<HttpResponse, MonarkError> {
    validate_contact(&submission)?;

    info!("Contact inquiry received from {}", submission.email);
    let outcome = dispatcher.dispatch_contact(&submission).await?;
    if let DispatchOutcome::AcknowledgmentFailed { reason, .. } = &outcome {
        warn!(
            "Acknowledgment email to {} failed: {}",
            submission.email, reason
        );
    }

    Ok(HttpResponse::Ok().json(SubmissionResponse {
        success: true,
        message: "Contact form submitted successfully. Please check your email for confirmation."
            .to_string(),
    }))
}
