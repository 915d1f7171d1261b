use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use korres_core::traits::{NotificationMessage, Notifier, StateStore, EMAIL_KEY};
use korres_core::{KorresError, KorresResult};

/// 邮件Webhook通知渠道
///
/// 收件地址保存在状态存储的 "email" 键下，未配置时直接跳过。
pub struct EmailWebhookNotifier {
    http: reqwest::Client,
    store: Arc<dyn StateStore>,
    webhook_url: String,
}

impl EmailWebhookNotifier {
    pub fn new(store: Arc<dyn StateStore>, webhook_url: String) -> KorresResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| KorresError::network(e.to_string()))?;

        Ok(Self {
            http,
            store,
            webhook_url,
        })
    }

    async fn recipient(&self) -> KorresResult<Option<String>> {
        let value = self.store.get(EMAIL_KEY).await?;
        Ok(value.and_then(|v| v.as_str().map(str::to_string)))
    }
}

#[async_trait]
impl Notifier for EmailWebhookNotifier {
    fn name(&self) -> &str {
        "email"
    }

    async fn notify(&self, message: &NotificationMessage) -> KorresResult<()> {
        let Some(email) = self.recipient().await? else {
            debug!("未配置通知邮箱，跳过邮件通知");
            return Ok(());
        };

        let params = [
            ("email", email.as_str()),
            ("subject", message.title.as_str()),
            ("content", message.body.as_str()),
        ];
        self.http
            .get(&self.webhook_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| KorresError::network(e.to_string()))?
            .error_for_status()
            .map_err(|e| KorresError::Notification(e.to_string()))?;

        Ok(())
    }
}
