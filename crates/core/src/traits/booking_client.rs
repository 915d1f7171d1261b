use async_trait::async_trait;

use crate::errors::KorresResult;
use crate::models::{
    Reservation, ReserveOutcome, Schedule, SearchRequest, Station, Ticket, UserProfile,
};

/// 预订服务客户端接口
///
/// 外部协作方：队列只依赖它的请求/响应契约。登录失败返回
/// `KorresError::LoginFailed`；`reserve` 只在传输层故障时返回 Err，
/// 业务上的预订失败通过 `ReserveOutcome` 表达。
#[async_trait]
pub trait BookingClient: Send + Sync {
    async fn login(&self, member_id: &str, password: &str) -> KorresResult<UserProfile>;

    /// 对指定班次发起一次预订尝试
    async fn reserve(&self, schedule: &Schedule, seat_count: u32) -> KorresResult<ReserveOutcome>;

    /// 班次查询，按出发时刻游标分页，一次返回一页
    async fn schedule_search(&self, request: &SearchRequest) -> KorresResult<Vec<Schedule>>;

    async fn my_reservations(&self) -> KorresResult<Vec<Reservation>>;

    async fn cancel_reservation(&self, reservation: &Reservation) -> KorresResult<()>;

    async fn my_tickets(&self) -> KorresResult<Vec<Ticket>>;

    async fn station_list(&self) -> KorresResult<Vec<Station>>;
}
