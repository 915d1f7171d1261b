use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::info;

use crate::{error::ApiResult, response::ApiResponse, routes::AppState};

/// 授权回调参数
#[derive(Debug, Deserialize)]
pub struct KakaoCallbackParams {
    pub code: String,
}

/// KakaoTalk 授权重定向回调
///
/// 用授权码换取访问令牌并持久化，之后的预订成功推送才可用。
pub async fn kakao_callback(
    State(state): State<AppState>,
    Query(params): Query<KakaoCallbackParams>,
) -> ApiResult<impl axum::response::IntoResponse> {
    state.chat_auth.exchange_code(&params.code).await?;
    info!("KakaoTalk授权回调处理完成");
    Ok(ApiResponse::success_empty_with_message(
        "카카오 로그인 완료".to_string(),
    ))
}
