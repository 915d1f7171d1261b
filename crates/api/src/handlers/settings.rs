use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use korres_core::traits::EMAIL_KEY;

use crate::{
    error::{ApiError, ApiResult},
    response::ApiResponse,
    routes::AppState,
};

/// 通知邮箱设置请求
#[derive(Debug, Deserialize)]
pub struct EmailSettingRequest {
    pub email: String,
}

/// 保存邮件Webhook的收件地址
pub async fn set_notification_email(
    State(state): State<AppState>,
    Json(request): Json<EmailSettingRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    if !request.email.contains('@') {
        return Err(ApiError::BadRequest("邮箱地址格式无效".to_string()));
    }

    state
        .store
        .put(EMAIL_KEY, Value::String(request.email.clone()))
        .await?;
    Ok(ApiResponse::success_empty_with_message(
        "通知邮箱已保存".to_string(),
    ))
}
