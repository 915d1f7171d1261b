use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use korres_core::models::Schedule;
use korres_core::KorresError;

use crate::{
    error::ApiResult,
    response::{created, success, ApiResponse},
    routes::AppState,
};

/// 任务创建请求，未指定的参数取队列默认值
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub schedule: Schedule,
    pub seat_count: Option<u32>,
    pub interval_ms: Option<u64>,
    pub stop_on_success: Option<bool>,
}

/// 创建预订任务
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let mut options = state.queue.default_options();
    if let Some(seat_count) = request.seat_count {
        options.seat_count = seat_count;
    }
    if let Some(interval_ms) = request.interval_ms {
        options.interval_ms = interval_ms;
    }
    if let Some(stop_on_success) = request.stop_on_success {
        options.stop_on_success = stop_on_success;
    }

    let task = state
        .queue
        .add_task_with_options(request.schedule, options)
        .await?;
    Ok(created(task))
}

/// 当前任务队列快照
pub async fn list_tasks(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let tasks = state.queue.tasks().await;
    Ok(success(tasks))
}

/// 取消预订任务
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    if !state.queue.remove_task(&id).await {
        return Err(KorresError::task_not_found(id).into());
    }
    Ok(ApiResponse::success_empty_with_message(format!(
        "任务 {} 已取消",
        id
    )))
}
