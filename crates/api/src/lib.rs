pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
pub use routes::{create_routes, AppState};

/// 组装带CORS和请求日志中间件的完整应用
pub fn create_app(state: AppState) -> axum::Router {
    create_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
