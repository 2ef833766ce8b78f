use regex::Regex;
use std::sync::OnceLock;

use crate::error::MonarkError;
use crate::http::structs::{ContactSubmission, RegistrationSubmission};

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn mobile_number_regex() -> &'static Regex {
    static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
    MOBILE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{10}$").unwrap())
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// A mobile number is valid when it is exactly 10 digits once whitespace is
/// stripped (the form allows grouping like "98765 43210").
pub fn is_valid_mobile_number(number: &str) -> bool {
    let stripped: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    mobile_number_regex().is_match(&stripped)
}

pub fn validate_contact(submission: &ContactSubmission) -> Result<(), MonarkError> {
    if submission.name.trim().is_empty()
        || submission.email.trim().is_empty()
        || submission.phone.trim().is_empty()
    {
        return Err(MonarkError::ValidationError {
            message: "Name, email, and phone number are required".to_string(),
        });
    }

    if !is_valid_email(&submission.email) {
        return Err(MonarkError::ValidationError {
            message: "Invalid email format".to_string(),
        });
    }

    Ok(())
}

pub fn validate_registration(submission: &RegistrationSubmission) -> Result<(), MonarkError> {
    if submission.full_name.trim().is_empty()
        || submission.email.trim().is_empty()
        || submission.mob_number.trim().is_empty()
    {
        return Err(MonarkError::ValidationError {
            message: "Full Name, Email, and Mobile Number are required".to_string(),
        });
    }

    if !is_valid_email(&submission.email) {
        return Err(MonarkError::ValidationError {
            message: "Invalid email format".to_string(),
        });
    }

    if !is_valid_mobile_number(&submission.mob_number) {
        return Err(MonarkError::ValidationError {
            message: "Please enter a valid 10-digit mobile number".to_string(),
        });
    }

    Ok(())
}
