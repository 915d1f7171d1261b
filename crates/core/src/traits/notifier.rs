use async_trait::async_trait;

use crate::errors::KorresResult;

/// 通知内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn new<T: Into<String>, B: Into<String>>(title: T, body: B) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// 通知渠道接口，实现方尽力而为，失败不回写任务状态
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 渠道名，用于日志
    fn name(&self) -> &str;

    async fn notify(&self, message: &NotificationMessage) -> KorresResult<()>;
}

/// 聊天渠道的授权回调：用授权码换取访问令牌并持久化
#[async_trait]
pub trait ChatAuthGateway: Send + Sync {
    async fn exchange_code(&self, code: &str) -> KorresResult<()>;
}
