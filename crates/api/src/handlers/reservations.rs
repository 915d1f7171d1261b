use axum::extract::{Path, State};

use korres_core::KorresError;

use crate::{
    error::ApiResult,
    response::{success, ApiResponse},
    routes::AppState,
};

/// 当前预约列表
pub async fn list_reservations(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let reservations = state.client.my_reservations().await?;
    Ok(success(reservations))
}

/// 按预约编号取消预约
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let reservations = state.client.my_reservations().await?;
    let reservation = reservations
        .into_iter()
        .find(|r| r.pnr_no == pnr)
        .ok_or_else(|| KorresError::reservation_not_found(&pnr))?;

    state.client.cancel_reservation(&reservation).await?;
    Ok(ApiResponse::success_empty_with_message(format!(
        "预约 {} 已取消",
        pnr
    )))
}

/// 已出票的车票列表
pub async fn list_tickets(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let tickets = state.client.my_tickets().await?;
    Ok(success(tickets))
}
