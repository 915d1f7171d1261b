use thiserror::Error;

/// 预约服务统一错误类型
#[derive(Debug, Error)]
pub enum KorresError {
    #[error("任务已存在: {id}")]
    DuplicateTask { id: String },

    #[error("任务未找到: {id}")]
    TaskNotFound { id: String },

    #[error("预约记录未找到: {pnr}")]
    ReservationNotFound { pnr: String },

    #[error("未登录或会话已过期")]
    Unauthenticated,

    #[error("登录失败: {0}")]
    LoginFailed(String),

    #[error("预订服务接口错误: {0}")]
    Provider(String),

    #[error("网络错误: {0}")]
    Network(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("存储错误: {0}")]
    Storage(String),

    #[error("通知发送失败: {0}")]
    Notification(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 统一的Result类型
pub type KorresResult<T> = std::result::Result<T, KorresError>;

impl KorresError {
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        Self::Provider(msg.into())
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn duplicate_task<S: Into<String>>(id: S) -> Self {
        Self::DuplicateTask { id: id.into() }
    }

    pub fn task_not_found<S: Into<String>>(id: S) -> Self {
        Self::TaskNotFound { id: id.into() }
    }

    pub fn reservation_not_found<S: Into<String>>(pnr: S) -> Self {
        Self::ReservationNotFound { pnr: pnr.into() }
    }

    /// 判断错误是否属于可在下个周期重试的瞬时故障
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            KorresError::Network(_) | KorresError::Provider(_) | KorresError::Storage(_)
        )
    }
}

impl From<serde_json::Error> for KorresError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
