use actix_web::{post, web, HttpResponse};
use log::{info, warn};

use crate::email::{DispatchOutcome, EmailDispatcher};
use crate::error::MonarkError;
use crate::http::structs::{RegistrationSubmission, SubmissionResponse};
use crate::server::validation::validate_registration;

#[post("/api/registration")]
async fn registration(
    submission: web::Json<RegistrationSubmission>,
    dispatcher: web::Data<EmailDispatcher>,
) -> Result<HttpResponse, MonarkError> {
    validate_registration(&submission)?;

    info!("Registration received from {}", submission.email);
    let outcome = dispatcher.dispatch_registration(&submission).await?;
    if let DispatchOutcome::AcknowledgmentFailed { reason, .. } = &outcome {
        warn!(
            "Acknowledgment email to {} failed: {}",
            submission.email, reason
        );
    }

    Ok(HttpResponse::Ok().json(SubmissionResponse {
        success: true,
        message: "Registration submitted successfully. Please check your email for confirmation."
            .to_string(),
    }))
}
