use axum::Json;
use serde_json::json;

/// 健康检查
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "korres",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
