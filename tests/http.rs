use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use assert_json_diff::assert_json_include;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use monarkfx_api::email::backend::{EmailBackend, OutboundEmail};
use monarkfx_api::email::EmailDispatcher;
use monarkfx_api::error::MonarkError;
use monarkfx_api::server::config::ResolvedEmailSettings;
use monarkfx_api::server::server_runner::{config, json_config};

const ADMIN_EMAIL: &str = "service@monarkfx.com";

/// An in-memory transport: records every attempt and can be scripted to
/// fail sends addressed to a specific recipient.
#[derive(Default)]
struct ScriptedBackend {
    fail_to: Option<String>,
    attempts: Mutex<Vec<String>>,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl ScriptedBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn failing_for(to: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_to: Some(to.to_string()),
            ..Default::default()
        })
    }

    fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailBackend for ScriptedBackend {
    async fn send(&self, _from: &str, email: &OutboundEmail) -> Result<String, MonarkError> {
        self.attempts.lock().unwrap().push(email.to.clone());
        if self.fail_to.as_deref() == Some(email.to.as_str()) {
            return Err(MonarkError::EmailSendError {
                message: "Could not send email: simulated transport failure".to_string(),
                details: Some("simulated".to_string()),
            });
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(format!("scripted-{}", sent.len()))
    }
}

fn dispatcher(backend: Arc<ScriptedBackend>, development: bool) -> EmailDispatcher {
    EmailDispatcher::with_backend(
        ResolvedEmailSettings {
            from_email: "noreply@monarkfx.com".to_string(),
            from_name: "Monark FX".to_string(),
            admin_email: ADMIN_EMAIL.to_string(),
            site_url: "https://monarkfx.com".to_string(),
            smtp: None,
            file: None,
        },
        backend,
        development,
    )
}

async fn submit(dispatcher: EmailDispatcher, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(json_config())
            .app_data(web::Data::new(dispatcher))
            .configure(config),
    )
    .await;
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn contact_missing_email_returns_400_without_sending() {
    let backend = ScriptedBackend::new();
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/contact",
        &json!({"name": "Asha", "phone": "9999999999"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Name, email, and phone number are required"})
    );
    assert!(backend.attempts().is_empty());
}

#[actix_web::test]
async fn contact_empty_required_field_returns_400() {
    let backend = ScriptedBackend::new();
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/contact",
        &json!({"name": "", "email": "asha@example.com", "phone": "9999999999"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(
        actual: body,
        expected: json!({"error": "Name, email, and phone number are required"})
    );
    assert!(backend.attempts().is_empty());
}

#[actix_web::test]
async fn contact_invalid_email_returns_400() {
    let backend = ScriptedBackend::new();
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/contact",
        &json!({"name": "Asha", "email": "not an email", "phone": "9999999999"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(actual: body, expected: json!({"error": "Invalid email format"}));
    assert!(backend.attempts().is_empty());
}

#[actix_web::test]
async fn contact_success_sends_admin_then_acknowledgment() {
    let backend = ScriptedBackend::new();
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/contact",
        &json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "9999999999",
            "message": "Interested in ACT course"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Contact form submitted successfully. Please check your email for confirmation."
        })
    );

    let sent = backend.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, ADMIN_EMAIL);
    assert_eq!(
        sent[0].subject,
        "New Contact Form Inquiry from Asha - Monark FX"
    );
    assert!(sent[0].html.contains("Interested in ACT course"));
    assert_eq!(sent[1].to, "asha@example.com");
    assert_eq!(
        sent[1].subject,
        "Thank You for Contacting Monark FX - We Received Your Message"
    );
}

#[actix_web::test]
async fn contact_admin_send_failure_returns_500_and_skips_acknowledgment() {
    let backend = ScriptedBackend::failing_for(ADMIN_EMAIL);
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/contact",
        &json!({"name": "Asha", "email": "asha@example.com", "phone": "9999999999"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_json_include!(
        actual: body.clone(),
        expected: json!({"error": "Could not send email: simulated transport failure"})
    );
    // Diagnostics stay server-side outside development mode.
    assert!(body.get("details").is_none());
    // The acknowledgment is never attempted once the admin send fails.
    assert_eq!(backend.attempts(), vec![ADMIN_EMAIL.to_string()]);
}

#[actix_web::test]
async fn contact_admin_send_failure_includes_details_in_development() {
    let backend = ScriptedBackend::failing_for(ADMIN_EMAIL);
    let (status, body) = submit(
        dispatcher(backend.clone(), true),
        "/api/contact",
        &json!({"name": "Asha", "email": "asha@example.com", "phone": "9999999999"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_json_include!(actual: body, expected: json!({"details": "simulated"}));
}

#[actix_web::test]
async fn contact_acknowledgment_failure_still_reports_success() {
    let backend = ScriptedBackend::failing_for("asha@example.com");
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/contact",
        &json!({"name": "Asha", "email": "asha@example.com", "phone": "9999999999"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_json_include!(actual: body, expected: json!({"success": true}));
    // Both sends were attempted; only the admin one landed.
    assert_eq!(
        backend.attempts(),
        vec![ADMIN_EMAIL.to_string(), "asha@example.com".to_string()]
    );
    assert_eq!(backend.sent().len(), 1);
}

#[actix_web::test]
async fn registration_missing_required_fields_returns_400() {
    let backend = ScriptedBackend::new();
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/registration",
        &json!({"fullName": "Asha Rao", "email": "asha@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(
        actual: body,
        expected: json!({"error": "Full Name, Email, and Mobile Number are required"})
    );
    assert!(backend.attempts().is_empty());
}

#[actix_web::test]
async fn registration_invalid_mobile_number_returns_400() {
    let backend = ScriptedBackend::new();
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/registration",
        &json!({"fullName": "Asha Rao", "email": "asha@example.com", "mobNumber": "12345"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(
        actual: body,
        expected: json!({"error": "Please enter a valid 10-digit mobile number"})
    );
    assert!(backend.attempts().is_empty());
}

#[actix_web::test]
async fn registration_minimal_payload_renders_placeholders() {
    let backend = ScriptedBackend::new();
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/registration",
        &json!({"fullName": "Asha Rao", "email": "asha@example.com", "mobNumber": "98765 43210"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Registration submitted successfully. Please check your email for confirmation."
        })
    );

    let sent = backend.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, ADMIN_EMAIL);
    assert_eq!(sent[0].subject, "New Registration: Asha Rao - Monark FX");
    assert!(sent[0].html.contains("Not provided"));
    assert!(sent[0].html.contains("Not selected"));
    assert_eq!(sent[1].to, "asha@example.com");
    assert_eq!(sent[1].subject, "Thank You for Registering with Monark FX");
}

#[actix_web::test]
async fn registration_full_payload_renders_every_field() {
    let backend = ScriptedBackend::new();
    let (status, _body) = submit(
        dispatcher(backend.clone(), false),
        "/api/registration",
        &json!({
            "fullName": "Asha Rao",
            "fathersName": "Mohan Rao",
            "email": "asha@example.com",
            "mobNumber": "9999999999",
            "dateOfBirth": {"day": "9", "month": "7", "year": "1994"},
            "gender": "Female",
            "address": "12 MG Road",
            "city": "Pune",
            "zipCode": "411001",
            "alternatePhone": "8888888888",
            "maritalStatus": "Single",
            "occupation": "Analyst",
            "education": "B.Com",
            "experience": "Yes",
            "yearsOfExperience": "2",
            "reference": "Friend",
            "courseIAT": "ONE SEGMENT",
            "courseACT": ""
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = backend.sent();
    let admin_html = &sent[0].html;
    assert!(admin_html.contains("Mohan Rao"));
    assert!(admin_html.contains("9/7/1994"));
    assert!(admin_html.contains("Female"));
    assert!(admin_html.contains("ONE SEGMENT"));
    // Only the untouched ACT course falls back to a placeholder.
    assert!(admin_html.contains("Not selected"));
    assert!(!admin_html.contains("Not provided"));
}

#[actix_web::test]
async fn registration_unknown_course_value_returns_400() {
    let backend = ScriptedBackend::new();
    let (status, body) = submit(
        dispatcher(backend.clone(), false),
        "/api/registration",
        &json!({
            "fullName": "Asha Rao",
            "email": "asha@example.com",
            "mobNumber": "9999999999",
            "courseIAT": "ALL SEGMENTS"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid JSON body"));
    assert!(backend.attempts().is_empty());
}

#[actix_web::test]
async fn malformed_json_body_returns_400() {
    let backend = ScriptedBackend::new();
    let app = test::init_service(
        App::new()
            .app_data(json_config())
            .app_data(web::Data::new(dispatcher(backend.clone(), false)))
            .configure(config),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/contact")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON body"));
    assert!(backend.attempts().is_empty());
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let backend = ScriptedBackend::new();
    let app = test::init_service(
        App::new()
            .app_data(json_config())
            .app_data(web::Data::new(dispatcher(backend, false)))
            .configure(config),
    )
    .await;
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "ok"}));
}
