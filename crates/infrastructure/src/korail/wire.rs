//! 预订服务接口的报文结构
//!
//! 服务端字段保持原样命名（`h_*`、`str*`），这里只定义信封部分，
//! 车次、预约、车站等记录复用核心模型。

use serde::Deserialize;

use korres_core::models::{Reservation, ReserveOutcome, Schedule, Station, Ticket};

/// 所有接口共有的结果标记
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderStatus {
    #[serde(rename = "strResult", default)]
    pub result: String,
    #[serde(rename = "h_msg_cd", default)]
    pub message_code: String,
    #[serde(rename = "h_msg_txt", default)]
    pub message_text: String,
}

impl ProviderStatus {
    pub fn is_success(&self) -> bool {
        self.result == "SUCC"
    }

    /// 结果标记映射为一次尝试的结果
    pub fn into_outcome(self) -> ReserveOutcome {
        ReserveOutcome::from_provider_flag(&self.result, &self.message_code, &self.message_text)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub status: ProviderStatus,
    #[serde(rename = "strCustNm", default)]
    pub customer_name: String,
    #[serde(rename = "strMbCrdNo", default)]
    pub membership_number: String,
    #[serde(rename = "strEmailAdr", default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleViewResponse {
    #[serde(flatten)]
    pub status: ProviderStatus,
    #[serde(rename = "trn_infos", default)]
    pub train_infos: Option<TrainInfos>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrainInfos {
    #[serde(rename = "trn_info", default)]
    pub train_info: Vec<Schedule>,
}

impl ScheduleViewResponse {
    pub fn into_schedules(self) -> Vec<Schedule> {
        self.train_infos
            .map(|infos| infos.train_info)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct ReserveResponse {
    #[serde(flatten)]
    pub status: ProviderStatus,
    #[serde(rename = "h_pnr_no", default)]
    pub pnr_no: String,
}

#[derive(Debug, Deserialize)]
pub struct ReservationViewResponse {
    #[serde(flatten)]
    pub status: ProviderStatus,
    #[serde(rename = "jrny_infos", default)]
    pub journey_infos: Option<JourneyInfos>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JourneyInfos {
    #[serde(rename = "jrny_info", default)]
    pub journey_info: Vec<JourneyInfo>,
}

#[derive(Debug, Deserialize)]
pub struct JourneyInfo {
    #[serde(rename = "train_infos", default)]
    pub train_infos: Option<ReservationTrainInfos>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReservationTrainInfos {
    #[serde(rename = "train_info", default)]
    pub train_info: Vec<Reservation>,
}

impl ReservationViewResponse {
    /// 行程按列车展开为预约记录列表
    pub fn into_reservations(self) -> Vec<Reservation> {
        self.journey_infos
            .map(|journeys| {
                journeys
                    .journey_info
                    .into_iter()
                    .filter_map(|journey| journey.train_infos)
                    .flat_map(|trains| trains.train_info)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct TicketListResponse {
    #[serde(flatten)]
    pub status: ProviderStatus,
    #[serde(rename = "tk_infos", default)]
    pub ticket_infos: Option<TicketInfos>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TicketInfos {
    #[serde(rename = "tk_info", default)]
    pub ticket_info: Vec<Ticket>,
}

impl TicketListResponse {
    pub fn into_tickets(self) -> Vec<Ticket> {
        self.ticket_infos
            .map(|infos| infos.ticket_info)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct StationDataResponse {
    #[serde(rename = "stns", default)]
    pub stations: Option<Stations>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Stations {
    #[serde(rename = "stn", default)]
    pub station: Vec<Station>,
}

impl StationDataResponse {
    pub fn into_stations(self) -> Vec<Station> {
        self.stations
            .map(|stations| stations.station)
            .unwrap_or_default()
    }
}
