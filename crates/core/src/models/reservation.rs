use serde::{Deserialize, Serialize};

/// 已成立的预约记录（未出票），来自预约查询接口
///
/// pnr_no 为预约编号；取消时需要回传行程序号等原样字段。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "h_pnr_no")]
    pub pnr_no: String,
    #[serde(rename = "h_jrny_sqno", default)]
    pub journey_seq_no: String,
    #[serde(rename = "h_jrny_cnt", default)]
    pub journey_count: String,
    #[serde(rename = "h_rsv_chg_no", default)]
    pub reservation_change_no: String,
    #[serde(rename = "h_trn_no", default)]
    pub train_no: String,
    #[serde(rename = "h_trn_clsf_nm", default)]
    pub train_class_name: String,
    /// 运行日期 YYYYMMDD
    #[serde(rename = "h_run_dt", default)]
    pub run_date: String,
    #[serde(rename = "h_dpt_tm", default)]
    pub depart_time: String,
    #[serde(rename = "h_arv_tm", default)]
    pub arrive_time: String,
    #[serde(rename = "h_dpt_rs_stn_nm", default)]
    pub depart_station_name: String,
    #[serde(rename = "h_arv_rs_stn_nm", default)]
    pub arrive_station_name: String,
    #[serde(rename = "h_tot_seat_cnt", default)]
    pub total_seat_count: String,
}

/// 已出票的车票记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "h_pnr_no", default)]
    pub pnr_no: String,
    #[serde(rename = "h_orgtk_wct_no", default)]
    pub ticket_office_no: String,
    #[serde(rename = "h_orgtk_ret_sale_dt", default)]
    pub sale_date: String,
    #[serde(rename = "h_orgtk_sale_sqno", default)]
    pub sale_seq_no: String,
    #[serde(rename = "h_orgtk_ret_pwd", default)]
    pub retrieve_password: String,
    #[serde(rename = "h_trn_no", default)]
    pub train_no: String,
    #[serde(rename = "h_trn_clsf_nm", default)]
    pub train_class_name: String,
    #[serde(rename = "h_dpt_dt", default)]
    pub depart_date: String,
    #[serde(rename = "h_dpt_tm", default)]
    pub depart_time: String,
}
