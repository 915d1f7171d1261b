use axum::extract::State;

use crate::{error::ApiResult, response::success, routes::AppState};

/// 车站目录
pub async fn list_stations(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let stations = state.client.station_list().await?;
    Ok(success(stations))
}
