use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use korres_core::config::KorailConfig;
use korres_core::models::{
    Reservation, ReserveOutcome, Schedule, SearchRequest, Station, Ticket, UserProfile,
};
use korres_core::traits::BookingClient;
use korres_core::{KorresError, KorresResult};

use super::wire::{
    LoginResponse, ReservationViewResponse, ReserveResponse, ScheduleViewResponse,
    StationDataResponse, TicketListResponse,
};

// 移动端接口的固定标识参数
const DEVICE: &str = "AD";
const VERSION: &str = "190617001";
const KEY: &str = "korail1234567890";

/// 预订服务的HTTP客户端
///
/// 会话凭证保存在 cookie jar 中：登录成功后同一客户端实例的后续
/// 请求自动携带会话 cookie。
pub struct KorailClient {
    http: reqwest::Client,
    base_url: String,
}

impl KorailClient {
    pub fn new(config: &KorailConfig) -> KorresResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| KorresError::network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    fn base_params() -> [(&'static str, &'static str); 3] {
        [("Device", DEVICE), ("Version", VERSION), ("Key", KEY)]
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        name: &str,
        params: &[(&str, String)],
    ) -> KorresResult<T> {
        let response = self
            .http
            .get(self.endpoint(name))
            .query(&Self::base_params())
            .query(params)
            .send()
            .await
            .map_err(|e| KorresError::network(e.to_string()))?
            .error_for_status()
            .map_err(|e| KorresError::network(e.to_string()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| KorresError::provider(format!("解析 {name} 响应失败: {e}")))
    }
}

#[async_trait]
impl BookingClient for KorailClient {
    async fn login(&self, member_id: &str, password: &str) -> KorresResult<UserProfile> {
        let params = [
            ("txtInputFlg", "2".to_string()),
            ("txtMemberNo", member_id.to_string()),
            ("txtPwd", password.to_string()),
        ];

        let response: LoginResponse = self.get_json("login.Login", &params).await?;

        if !response.status.is_success() {
            return Err(KorresError::LoginFailed(response.status.message_text));
        }

        info!("登录成功: {}", response.customer_name);
        Ok(UserProfile {
            name: response.customer_name,
            membership_number: response.membership_number,
            email: response.email,
        })
    }

    async fn reserve(&self, schedule: &Schedule, seat_count: u32) -> KorresResult<ReserveOutcome> {
        let params = [
            ("txtGoAbrdDt", schedule.depart_date.clone()),
            ("txtGoStartCode", schedule.depart_station_code.clone()),
            ("txtGoEndCode", schedule.arrive_station_code.clone()),
            ("txtGoTrnNo", schedule.train_no.clone()),
            ("txtRunDt", schedule.run_date.clone()),
            ("txtGoHour", schedule.depart_time.clone()),
            ("txtTrnGpCd", schedule.train_group_code.clone()),
            ("txtTrnClsfCd", schedule.train_class_code.clone()),
            ("txtPsrmClCd", "1".to_string()),
            ("txtJobId", "1101".to_string()),
            ("txtTotPsgCnt", seat_count.to_string()),
            ("txtPsgTpCd1", "1".to_string()),
            ("txtDiscKndCd1", "000".to_string()),
            ("txtCompaCnt1", seat_count.to_string()),
        ];

        let response: ReserveResponse = self
            .get_json("certification.TicketReservation", &params)
            .await?;

        if response.status.is_success() {
            debug!(
                "车次 {} 预订成功，预约编号 {}",
                schedule.train_no, response.pnr_no
            );
        }
        Ok(response.status.into_outcome())
    }

    async fn schedule_search(&self, request: &SearchRequest) -> KorresResult<Vec<Schedule>> {
        let params = [
            ("radJobId", "1".to_string()),
            ("txtMenuId", "11".to_string()),
            ("selGoTrain", "05".to_string()),
            ("txtGoAbrdDt", request.date.clone()),
            ("txtGoStart", request.dep.clone()),
            ("txtGoEnd", request.arr.clone()),
            (
                "txtGoHour",
                request.after.clone().unwrap_or_else(|| "000000".to_string()),
            ),
            ("txtPsgFlg_1", "1".to_string()),
            ("txtSeatAttCd_4", "015".to_string()),
            ("txtTrnGpCd", "109".to_string()),
        ];

        let response: ScheduleViewResponse =
            self.get_json("seatMovie.ScheduleView", &params).await?;

        // 没有更多班次时服务端返回FAIL，这里按空页处理以结束分页
        if !response.status.is_success() {
            debug!("班次查询无结果: {}", response.status.message_text);
            return Ok(Vec::new());
        }
        Ok(response.into_schedules())
    }

    async fn my_reservations(&self) -> KorresResult<Vec<Reservation>> {
        let response: ReservationViewResponse = self
            .get_json("reservation.ReservationView", &[])
            .await?;

        // 没有预约记录时同样返回FAIL
        if !response.status.is_success() {
            return Ok(Vec::new());
        }
        Ok(response.into_reservations())
    }

    async fn cancel_reservation(&self, reservation: &Reservation) -> KorresResult<()> {
        let params = [
            ("txtPnrNo", reservation.pnr_no.clone()),
            ("txtJrnySqno", reservation.journey_seq_no.clone()),
            ("txtJrnyCnt", reservation.journey_count.clone()),
            ("hidRsvChgNo", reservation.reservation_change_no.clone()),
        ];

        let response: ReserveResponse = self
            .get_json("reservationCancel.ReservationCancelChk", &params)
            .await?;

        if !response.status.is_success() {
            return Err(KorresError::provider(response.status.message_text));
        }
        info!("预约 {} 已取消", reservation.pnr_no);
        Ok(())
    }

    async fn my_tickets(&self) -> KorresResult<Vec<Ticket>> {
        let params = [
            ("txtIndex", "1".to_string()),
            ("h_page_no", "1".to_string()),
            ("txtDeviceId", String::new()),
        ];

        let response: TicketListResponse = self.get_json("myTicket.MyTicketList", &params).await?;

        if !response.status.is_success() {
            return Ok(Vec::new());
        }
        Ok(response.into_tickets())
    }

    async fn station_list(&self) -> KorresResult<Vec<Station>> {
        let response: StationDataResponse = self.get_json("common.stationdata", &[]).await?;
        Ok(response.into_stations())
    }
}
