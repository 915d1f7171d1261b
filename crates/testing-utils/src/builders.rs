//! Test data builders for creating test entities
//!
//! This module provides builder patterns for creating test data with
//! sensible defaults and easy customization.

use korres_core::models::{Reservation, ReservationTask, Schedule, Station, TaskOptions};

/// Builder for creating test Schedule values
pub struct ScheduleBuilder {
    schedule: Schedule,
}

impl ScheduleBuilder {
    pub fn new() -> Self {
        Self {
            schedule: serde_json::from_value(serde_json::json!({
                "h_trn_no": "0051",
                "h_trn_gp_cd": "100",
                "h_trn_clsf_cd": "00",
                "h_trn_clsf_nm": "KTX",
                "h_run_dt": "20260801",
                "h_dpt_dt": "20260801",
                "h_dpt_tm": "051300",
                "h_dpt_tm_qb": "05:13",
                "h_arv_tm": "074500",
                "h_arv_tm_qb": "07:45",
                "h_dpt_rs_stn_nm": "서울",
                "h_dpt_rs_stn_cd": "0001",
                "h_arv_rs_stn_nm": "부산",
                "h_arv_rs_stn_cd": "0020",
                "h_rsv_psb_flg": "Y",
                "h_rsv_psb_nm": "59,800"
            }))
            .expect("valid schedule fixture"),
        }
    }

    pub fn with_train_no(mut self, train_no: &str) -> Self {
        self.schedule.train_no = train_no.to_string();
        self
    }

    pub fn with_route(mut self, dep: &str, arr: &str) -> Self {
        self.schedule.depart_station_name = dep.to_string();
        self.schedule.arrive_station_name = arr.to_string();
        self
    }

    pub fn with_departure(mut self, date: &str, time: &str) -> Self {
        self.schedule.depart_date = date.to_string();
        self.schedule.run_date = date.to_string();
        self.schedule.depart_time = time.to_string();
        self
    }

    pub fn with_train_class(mut self, name: &str) -> Self {
        self.schedule.train_class_name = name.to_string();
        self
    }

    pub fn build(self) -> Schedule {
        self.schedule
    }
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test ReservationTask entities
pub struct TaskBuilder {
    schedule: Schedule,
    options: TaskOptions,
    retries: u32,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            schedule: ScheduleBuilder::new().build(),
            options: TaskOptions::default(),
            retries: 0,
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_train_no(mut self, train_no: &str) -> Self {
        self.schedule.train_no = train_no.to_string();
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.options.interval_ms = interval_ms;
        self
    }

    pub fn with_seat_count(mut self, seat_count: u32) -> Self {
        self.options.seat_count = seat_count;
        self
    }

    pub fn with_stop_on_success(mut self, stop_on_success: bool) -> Self {
        self.options.stop_on_success = stop_on_success;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn build(self) -> ReservationTask {
        let mut task = ReservationTask::new(self.schedule, self.options);
        task.retries = self.retries;
        task
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test Reservation entities
pub struct ReservationBuilder {
    reservation: Reservation,
}

impl ReservationBuilder {
    pub fn new() -> Self {
        Self {
            reservation: serde_json::from_value(serde_json::json!({
                "h_pnr_no": "00012345",
                "h_jrny_sqno": "001",
                "h_jrny_cnt": "01",
                "h_rsv_chg_no": "00000",
                "h_trn_no": "0051",
                "h_trn_clsf_nm": "KTX",
                "h_run_dt": "20260801",
                "h_dpt_tm": "051300",
                "h_arv_tm": "074500",
                "h_dpt_rs_stn_nm": "서울",
                "h_arv_rs_stn_nm": "부산",
                "h_tot_seat_cnt": "000001"
            }))
            .expect("valid reservation fixture"),
        }
    }

    pub fn with_pnr_no(mut self, pnr_no: &str) -> Self {
        self.reservation.pnr_no = pnr_no.to_string();
        self
    }

    pub fn build(self) -> Reservation {
        self.reservation
    }
}

impl Default for ReservationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience constructor for station fixtures
pub fn station(name: &str, code: &str) -> Station {
    Station {
        name: name.to_string(),
        code: code.to_string(),
    }
}
