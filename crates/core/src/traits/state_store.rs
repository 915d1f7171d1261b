use async_trait::async_trait;
use serde_json::Value;

use crate::errors::KorresResult;

/// 任务列表的持久化键
pub const TASKS_KEY: &str = "tasks";
/// KakaoTalk 访问令牌的持久化键
pub const KAKAO_AUTH_KEY: &str = "kakao-auth";
/// 通知邮箱的持久化键
pub const EMAIL_KEY: &str = "email";

/// 本地键值存储接口，启动时读取，每次变更时写入
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> KorresResult<Option<Value>>;

    async fn put(&self, key: &str, value: Value) -> KorresResult<()>;

    async fn delete(&self, key: &str) -> KorresResult<()>;
}
