use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ReserveOutcome, Schedule};

/// 预订任务：持续尝试预订某个车次，直到成功或被取消
///
/// 任务身份取车次号（train_no），同一车次在队列中只允许存在一个任务。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationTask {
    pub id: String,
    pub schedule: Schedule,
    /// 每次尝试预订的席位数
    pub seat_count: u32,
    /// 已完成的尝试次数，成功与失败都计入
    pub retries: u32,
    /// 两次尝试之间的间隔（毫秒），任务生命周期内固定
    pub interval_ms: u64,
    /// 成功后是否自动移出队列
    pub stop_on_success: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 最近一次尝试的结果
    pub latest_result: Option<ReserveOutcome>,
}

/// 新建任务时的可选参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOptions {
    pub seat_count: u32,
    pub interval_ms: u64,
    pub stop_on_success: bool,
}

impl Default for TaskOptions {
    fn default() -> Self {
        Self {
            seat_count: 1,
            interval_ms: 5000,
            stop_on_success: true,
        }
    }
}

impl ReservationTask {
    /// 创建新任务，id 取自车次号，尝试计数从0开始
    pub fn new(schedule: Schedule, options: TaskOptions) -> Self {
        let now = Utc::now();
        Self {
            id: schedule.train_no.clone(),
            schedule,
            seat_count: options.seat_count,
            retries: 0,
            interval_ms: options.interval_ms,
            stop_on_success: options.stop_on_success,
            created_at: now,
            updated_at: now,
            latest_result: None,
        }
    }

    /// 记录一次已完成的尝试：计数加一并覆盖最近结果
    pub fn record_outcome(&mut self, outcome: ReserveOutcome) {
        self.retries += 1;
        self.latest_result = Some(outcome);
        self.updated_at = Utc::now();
    }

    /// 最近一次尝试是否成功
    pub fn is_reserved(&self) -> bool {
        self.latest_result
            .as_ref()
            .map(ReserveOutcome::is_success)
            .unwrap_or(false)
    }
}
