use async_trait::async_trait;

use korres_core::traits::{NotificationMessage, Notifier};
use korres_core::{KorresError, KorresResult};

/// 本地桌面通知渠道
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    fn name(&self) -> &str {
        "desktop"
    }

    async fn notify(&self, message: &NotificationMessage) -> KorresResult<()> {
        let title = message.title.clone();
        let body = message.body.clone();

        // 通知后端是同步调用，放到阻塞线程池执行
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .summary(&title)
                .body(&body)
                .show()
                .map(|_| ())
                .map_err(|e| KorresError::Notification(e.to_string()))
        })
        .await
        .map_err(|e| KorresError::Notification(e.to_string()))?
    }
}
