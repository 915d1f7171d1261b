use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 车次信息，来自预订服务的班次查询接口
///
/// 字段名保留服务端的 `h_*` 命名，便于与接口报文直接互转。
/// 调用方把它当作不可变值使用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// 车次号，队列中任务身份的唯一来源
    #[serde(rename = "h_trn_no")]
    pub train_no: String,
    #[serde(rename = "h_trn_gp_cd", default)]
    pub train_group_code: String,
    #[serde(rename = "h_trn_clsf_cd", default)]
    pub train_class_code: String,
    /// 车种名称，如 "KTX"
    #[serde(rename = "h_trn_clsf_nm", default)]
    pub train_class_name: String,
    /// 运行日期 YYYYMMDD
    #[serde(rename = "h_run_dt", default)]
    pub run_date: String,
    /// 出发日期 YYYYMMDD
    #[serde(rename = "h_dpt_dt", default)]
    pub depart_date: String,
    /// 出发时刻 HHMMSS
    #[serde(rename = "h_dpt_tm", default)]
    pub depart_time: String,
    /// 出发时刻的展示形式，如 "05:13"
    #[serde(rename = "h_dpt_tm_qb", default)]
    pub depart_time_display: String,
    #[serde(rename = "h_arv_tm", default)]
    pub arrive_time: String,
    #[serde(rename = "h_arv_tm_qb", default)]
    pub arrive_time_display: String,
    #[serde(rename = "h_dpt_rs_stn_nm", default)]
    pub depart_station_name: String,
    #[serde(rename = "h_dpt_rs_stn_cd", default)]
    pub depart_station_code: String,
    #[serde(rename = "h_arv_rs_stn_nm", default)]
    pub arrive_station_name: String,
    #[serde(rename = "h_arv_rs_stn_cd", default)]
    pub arrive_station_code: String,
    /// 可预订标记，Y/N
    #[serde(rename = "h_rsv_psb_flg", default)]
    pub reserve_possible_flag: String,
    #[serde(rename = "h_rsv_psb_nm", default)]
    pub reserve_possible_name: String,
}

impl Schedule {
    /// 通知正文使用的简短描述，如 "KTX 05:13 - 07:45"
    pub fn summary(&self) -> String {
        format!(
            "{} {} - {}",
            self.train_class_name, self.depart_time_display, self.arrive_time_display
        )
    }

    /// 行程描述，如 "서울 05:13 -> 부산 07:45"
    pub fn route_summary(&self) -> String {
        format!(
            "{} {} -> {} {}",
            self.depart_station_name,
            self.depart_time_display,
            self.arrive_station_name,
            self.arrive_time_display
        )
    }

    /// 出发时刻，解析失败时返回 None
    pub fn departure_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(
            &format!("{}{}", self.depart_date, self.depart_time),
            "%Y%m%d%H%M%S",
        )
        .ok()
    }
}

/// 班次查询请求，`after` 为分页游标（HHMMSS）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub dep: String,
    pub arr: String,
    /// 查询日期 YYYYMMDD
    pub date: String,
    pub after: Option<String>,
}

/// 计算下一页的查询游标：最后一个班次的出发时刻加一秒
///
/// 返回 None 表示没有可继续的页。
pub fn next_departure_cursor(schedules: &[Schedule]) -> Option<String> {
    let last = schedules.last()?;
    let departure = last.departure_datetime()?;
    let next = departure + Duration::seconds(1);
    Some(next.format("%H%M%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        serde_json::from_value(serde_json::json!({
            "h_trn_no": "0051",
            "h_trn_clsf_nm": "KTX",
            "h_run_dt": "20260801",
            "h_dpt_dt": "20260801",
            "h_dpt_tm": "051300",
            "h_dpt_tm_qb": "05:13",
            "h_arv_tm": "074500",
            "h_arv_tm_qb": "07:45",
            "h_dpt_rs_stn_nm": "서울",
            "h_arv_rs_stn_nm": "부산",
            "h_rsv_psb_flg": "Y"
        }))
        .unwrap()
    }

    #[test]
    fn test_schedule_provider_field_names() {
        let schedule = sample_schedule();
        assert_eq!(schedule.train_no, "0051");
        assert_eq!(schedule.depart_station_name, "서울");

        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["h_trn_no"], "0051");
        assert_eq!(value["h_dpt_tm_qb"], "05:13");
    }

    #[test]
    fn test_schedule_summary() {
        let schedule = sample_schedule();
        assert_eq!(schedule.summary(), "KTX 05:13 - 07:45");
        assert_eq!(schedule.route_summary(), "서울 05:13 -> 부산 07:45");
    }

    #[test]
    fn test_next_departure_cursor_adds_one_second() {
        let schedule = sample_schedule();
        let cursor = next_departure_cursor(std::slice::from_ref(&schedule));
        assert_eq!(cursor.as_deref(), Some("051301"));
    }

    #[test]
    fn test_next_departure_cursor_empty_page() {
        assert!(next_departure_cursor(&[]).is_none());
    }

    #[test]
    fn test_next_departure_cursor_rolls_over_minute() {
        let mut schedule = sample_schedule();
        schedule.depart_time = "055959".to_string();
        let cursor = next_departure_cursor(std::slice::from_ref(&schedule));
        assert_eq!(cursor.as_deref(), Some("060000"));
    }
}
