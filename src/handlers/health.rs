/// Health check endpoint
use actix_web::{web, HttpResponse};

use crate::db::DocumentStore;

/// Report API and database liveness.
///
/// Store faults never propagate past this handler; they degrade to a 503
/// with a disconnected-database payload.
pub async fn health_check(store: web::Data<DocumentStore>) -> HttpResponse {
    if store.health_check().await {
        HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected",
        }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected",
        }))
    }
}
