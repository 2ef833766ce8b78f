use actix_web::{get, HttpResponse};

use crate::error::MonarkError;
use crate::http::structs::HealthResponse;

#[get("/api/health")]
async fn health() -> Result<HttpResponse, MonarkError> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    }))
}
