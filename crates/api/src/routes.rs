use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use korres_core::traits::{BookingClient, ChatAuthGateway, StateStore};
use korres_queue::ReservationQueue;

use crate::handlers::{
    auth::login,
    health::health_check,
    oauth::kakao_callback,
    reservations::{cancel_reservation, list_reservations, list_tickets},
    schedules::search_schedules,
    settings::set_notification_email,
    stations::list_stations,
    tasks::{create_task, delete_task, list_tasks},
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<ReservationQueue>,
    pub client: Arc<dyn BookingClient>,
    pub store: Arc<dyn StateStore>,
    pub chat_auth: Arc<dyn ChatAuthGateway>,
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 会话
        .route("/api/auth/login", post(login))
        // 班次与车站
        .route("/api/stations", get(list_stations))
        .route("/api/schedules", get(search_schedules))
        // 预约与车票
        .route("/api/reservations", get(list_reservations))
        .route("/api/reservations/{pnr}/cancel", post(cancel_reservation))
        .route("/api/tickets", get(list_tickets))
        // 预订任务队列
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}/delete", post(delete_task))
        // 通知设置
        .route("/api/settings/email", post(set_notification_email))
        // KakaoTalk 授权回调
        .route("/oauth/kakao", get(kakao_callback))
        .with_state(state)
}
