use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use korres_core::models::{next_departure_cursor, Schedule, SearchRequest};

use crate::{
    error::{ApiError, ApiResult},
    response::success,
    routes::AppState,
};

/// 班次查询参数，after 为上一页返回的游标
#[derive(Debug, Deserialize)]
pub struct ScheduleQueryParams {
    pub dep: String,
    pub arr: String,
    pub date: String,
    pub after: Option<String>,
}

/// 一页班次及下一页游标
#[derive(Debug, Serialize)]
pub struct ScheduleSearchResponse {
    pub schedules: Vec<Schedule>,
    pub next_cursor: Option<String>,
}

/// 分页查询班次
pub async fn search_schedules(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQueryParams>,
) -> ApiResult<impl axum::response::IntoResponse> {
    if params.date.len() != 8 || params.date.chars().any(|c| !c.is_ascii_digit()) {
        return Err(ApiError::BadRequest("date 格式应为 YYYYMMDD".to_string()));
    }

    let request = SearchRequest {
        dep: params.dep,
        arr: params.arr,
        date: params.date,
        after: params.after,
    };

    let schedules = state.client.schedule_search(&request).await?;
    let next_cursor = next_departure_cursor(&schedules);

    Ok(success(ScheduleSearchResponse {
        schedules,
        next_cursor,
    }))
}
