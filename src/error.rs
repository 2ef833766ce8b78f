use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::{Display, Error};

use crate::http::structs::ErrorResponse;

#[derive(Debug, Display, Error)]
pub enum MonarkError {
    #[display("{message}")]
    ValidationError { message: String },
    #[display("{message}")]
    ConfigurationError { message: String },
    /// A transport-level send failure. `details` carries the underlying
    /// diagnostics and is only left in place when the server runs in
    /// development mode (see `EmailDispatcher::scrub_details`).
    #[display("{message}")]
    EmailSendError {
        message: String,
        details: Option<String>,
    },
    #[display("{message}")]
    Other { message: String },
}

impl ResponseError for MonarkError {
    fn status_code(&self) -> StatusCode {
        match self {
            MonarkError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            MonarkError::ConfigurationError { .. }
            | MonarkError::EmailSendError { .. }
            | MonarkError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            MonarkError::EmailSendError { details, .. } => details.clone(),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            details,
        })
    }
}

impl From<std::io::Error> for MonarkError {
    fn from(cause: std::io::Error) -> Self {
        MonarkError::Other {
            message: format!("{cause:?}"),
        }
    }
}

impl From<toml::ser::Error> for MonarkError {
    fn from(cause: toml::ser::Error) -> Self {
        MonarkError::ConfigurationError {
            message: cause.to_string(),
        }
    }
}

impl From<lettre::address::AddressError> for MonarkError {
    fn from(cause: lettre::address::AddressError) -> Self {
        MonarkError::EmailSendError {
            message: format!("Invalid email address: {cause}"),
            details: None,
        }
    }
}

impl From<lettre::error::Error> for MonarkError {
    fn from(cause: lettre::error::Error) -> Self {
        MonarkError::EmailSendError {
            message: format!("Could not build email: {cause}"),
            details: None,
        }
    }
}
