use crate::store::JobStore;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Health check endpoint
///
/// Reports whether the job store answers, with the current timestamp.
/// Responds 503 when the store is unreachable.
#[get("/health")]
pub async fn health(store: web::Data<dyn JobStore>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "database": "up",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            log::error!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "database": "down",
                "timestamp": Utc::now()
            }))
        }
    }
}
