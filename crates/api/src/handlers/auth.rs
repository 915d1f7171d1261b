use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{error::ApiResult, response::success, routes::AppState};

/// 登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub id: String,
    pub password: String,
}

/// 登录预订服务，失败时直接向调用方返回401
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let profile = state.client.login(&request.id, &request.password).await?;
    Ok(success(profile))
}
