use serde::{Deserialize, Serialize};

/// 单次预订尝试的结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeStatus {
    Success,
    Failure,
}

/// 一次预订尝试的结果，code/message 为服务端原样返回的信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveOutcome {
    pub status: OutcomeStatus,
    pub code: String,
    pub message: String,
}

impl ReserveOutcome {
    pub fn success<C: Into<String>, M: Into<String>>(code: C, message: M) -> Self {
        Self {
            status: OutcomeStatus::Success,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn failure<C: Into<String>, M: Into<String>>(code: C, message: M) -> Self {
        Self {
            status: OutcomeStatus::Failure,
            code: code.into(),
            message: message.into(),
        }
    }

    /// 服务端 strResult 标记（SUCC/FAIL）映射为结果
    pub fn from_provider_flag(flag: &str, code: &str, message: &str) -> Self {
        if flag == "SUCC" {
            Self::success(code, message)
        } else {
            Self::failure(code, message)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}
