use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::database::{DbPool, ping};

/// 存活检查：数据库可用返回 200，否则 503
pub async fn health(pool: web::Data<DbPool>) -> HttpResponse {
    match ping(&pool).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "ok" })),
        Err(e) => {
            log::error!("Health check failed: {e}");
            HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
        }
    }
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
