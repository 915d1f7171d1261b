use korres_core::models::ReserveOutcome;

/// 队列对订阅者广播的事件
///
/// 事件通过 `tokio::sync::broadcast` 发送，无订阅者时直接丢弃。
#[derive(Debug, Clone)]
pub enum QueueEvent {
    /// 新任务入队
    TaskAdded { id: String },
    /// 任务被移除（用户取消或成功后自动移除）
    TaskRemoved { id: String },
    /// 一次尝试完成，retries 为该任务累计的尝试次数
    AttemptCompleted {
        id: String,
        retries: u32,
        outcome: ReserveOutcome,
    },
    /// 任务预订成功
    TaskSucceeded { id: String },
}

impl QueueEvent {
    /// 事件关联的任务id
    pub fn task_id(&self) -> &str {
        match self {
            QueueEvent::TaskAdded { id }
            | QueueEvent::TaskRemoved { id }
            | QueueEvent::AttemptCompleted { id, .. }
            | QueueEvent::TaskSucceeded { id } => id,
        }
    }
}
