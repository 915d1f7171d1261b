use std::sync::Arc;

use anyhow::{Context, Result};
use korres_api::{create_app, AppState};
use korres_core::models::ReservationTask;
use korres_core::traits::{BookingClient, Notifier, StateStore, TASKS_KEY};
use korres_core::AppConfig;
use korres_infrastructure::{
    CompositeNotifier, DesktopNotifier, EmailWebhookNotifier, JsonFileStore, KakaoNotifier,
    KorailClient,
};
use korres_queue::ReservationQueue;
use tokio::{net::TcpListener, sync::broadcast};
use tracing::{info, warn};

/// 主应用程序
///
/// 负责组装状态存储、预订客户端、通知渠道与任务队列，
/// 启动API服务器并在收到关闭信号时停止队列。
pub struct Application {
    config: AppConfig,
    queue: Arc<ReservationQueue>,
    state: AppState,
}

impl Application {
    /// 创建新的应用实例
    pub async fn new(config: AppConfig) -> Result<Self> {
        info!("初始化应用程序");

        // 打开本地状态存储
        let store: Arc<dyn StateStore> = Arc::new(
            JsonFileStore::open(&config.storage.state_file)
                .await
                .with_context(|| format!("打开状态存储失败: {}", config.storage.state_file))?,
        );

        // 创建预订服务客户端
        let client: Arc<dyn BookingClient> =
            Arc::new(KorailClient::new(&config.korail).context("创建预订客户端失败")?);

        // KakaoTalk渠道同时承担授权回调的令牌交换
        let kakao = Arc::new(
            KakaoNotifier::new(
                Arc::clone(&store),
                config.notify.kakao_client_id.clone(),
                config.notify.kakao_redirect_uri.clone(),
            )
            .context("创建KakaoTalk通知渠道失败")?,
        );

        // 按配置装配通知渠道
        let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::new();
        if config.notify.desktop_enabled {
            notifiers.push(Arc::new(DesktopNotifier::new()));
        }
        if config.notify.kakao_enabled {
            notifiers.push(Arc::clone(&kakao) as Arc<dyn Notifier>);
        }
        if let Some(url) = &config.notify.email_webhook_url {
            notifiers.push(Arc::new(
                EmailWebhookNotifier::new(Arc::clone(&store), url.clone())
                    .context("创建邮件Webhook渠道失败")?,
            ));
        }
        if notifiers.is_empty() {
            warn!("未启用任何通知渠道，预订成功时只写日志");
        }
        let notifier: Arc<dyn Notifier> = Arc::new(CompositeNotifier::new(notifiers));

        // 创建任务队列
        let queue = Arc::new(ReservationQueue::new(
            Arc::clone(&client),
            notifier,
            Arc::clone(&store),
            config.queue.clone(),
        ));

        // 恢复持久化的任务
        if let Some(value) = store.get(TASKS_KEY).await? {
            match serde_json::from_value::<Vec<ReservationTask>>(value) {
                Ok(tasks) if !tasks.is_empty() => {
                    queue.restore(tasks).await;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("解析持久化任务失败，忽略快照: {e}");
                }
            }
        }

        let state = AppState {
            queue: Arc::clone(&queue),
            client,
            store,
            chat_auth: kakao,
        };

        Ok(Self {
            config,
            queue,
            state,
        })
    }

    /// 运行应用程序直到收到关闭信号
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&self.config.server.bind_address)
            .await
            .with_context(|| format!("绑定监听地址失败: {}", self.config.server.bind_address))?;
        info!("API服务器监听于 {}", self.config.server.bind_address);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await
            .context("API服务器运行失败")?;

        // 停止队列并持久化最终快照
        self.queue.shutdown().await;

        Ok(())
    }
}
