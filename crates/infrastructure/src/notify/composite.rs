use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use korres_core::traits::{NotificationMessage, Notifier};
use korres_core::KorresResult;

/// 通知扇出：依次调用每个渠道，单个渠道失败只记日志
pub struct CompositeNotifier {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl CompositeNotifier {
    pub fn new(notifiers: Vec<Arc<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

#[async_trait]
impl Notifier for CompositeNotifier {
    fn name(&self) -> &str {
        "composite"
    }

    async fn notify(&self, message: &NotificationMessage) -> KorresResult<()> {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(message).await {
                warn!("通知渠道 {} 发送失败: {}", notifier.name(), e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use korres_testing_utils::RecordingNotifier;

    #[tokio::test]
    async fn test_fans_out_to_all_channels() {
        let first = RecordingNotifier::new();
        let second = RecordingNotifier::new();
        let composite = CompositeNotifier::new(vec![
            Arc::new(first.clone()),
            Arc::new(second.clone()),
        ]);

        let message = NotificationMessage::new("예매가 완료되었습니다.", "KTX 05:13 - 07:45");
        composite.notify(&message).await.unwrap();

        assert_eq!(first.count(), 1);
        assert_eq!(second.count(), 1);
    }

    #[tokio::test]
    async fn test_channel_failure_does_not_stop_fan_out() {
        let failing = RecordingNotifier::failing();
        let healthy = RecordingNotifier::new();
        let composite = CompositeNotifier::new(vec![
            Arc::new(failing.clone()),
            Arc::new(healthy.clone()),
        ]);

        let message = NotificationMessage::new("예매가 완료되었습니다.", "KTX 05:13 - 07:45");
        assert!(composite.notify(&message).await.is_ok());
        assert_eq!(healthy.count(), 1);
    }
}
