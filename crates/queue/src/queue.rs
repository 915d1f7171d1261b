use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

use korres_core::config::QueueConfig;
use korres_core::models::{ReservationTask, ReserveOutcome, Schedule, TaskOptions};
use korres_core::traits::{BookingClient, NotificationMessage, Notifier, StateStore, TASKS_KEY};
use korres_core::{KorresError, KorresResult};

use crate::events::QueueEvent;

/// 单个任务的尝试状态
///
/// 定时周期到来时若上一次尝试仍在进行（Attempting），本周期直接跳过，
/// 保证同一任务的尝试严格串行。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptState {
    Idle,
    Attempting,
}

/// 一次尝试结束后给定时循环的指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickControl {
    Continue,
    Stop,
}

struct TaskEntry {
    task: ReservationTask,
    attempt_state: AttemptState,
    /// 该任务专属定时器的句柄，移除任务时取消
    timer: Option<JoinHandle<()>>,
}

struct QueueInner {
    client: Arc<dyn BookingClient>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn StateStore>,
    config: QueueConfig,
    entries: RwLock<HashMap<String, TaskEntry>>,
    events: broadcast::Sender<QueueEvent>,
    shutdown_tx: broadcast::Sender<()>,
}

/// 预订任务队列
///
/// 以车次号为身份维护一组预订任务，每个任务拥有独立的定时器，
/// 每个周期对预订服务发起一次尝试并记录结果。成功时触发一次通知
/// 副作用，并按任务的 stop_on_success 策略决定是否移出队列。
/// 任务列表在每次变更后写入状态存储。
pub struct ReservationQueue {
    inner: Arc<QueueInner>,
}

impl ReservationQueue {
    pub fn new(
        client: Arc<dyn BookingClient>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn StateStore>,
        config: QueueConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer_size.max(1));
        let (shutdown_tx, _) = broadcast::channel(16);

        Self {
            inner: Arc::new(QueueInner {
                client,
                notifier,
                store,
                config,
                entries: RwLock::new(HashMap::new()),
                events,
                shutdown_tx,
            }),
        }
    }

    /// 队列配置给出的新任务默认参数
    pub fn default_options(&self) -> TaskOptions {
        TaskOptions {
            seat_count: 1,
            interval_ms: self.inner.config.default_interval_ms,
            stop_on_success: self.inner.config.stop_on_success,
        }
    }

    /// 以默认参数添加任务
    pub async fn add_task(&self, schedule: Schedule) -> KorresResult<ReservationTask> {
        self.add_task_with_options(schedule, self.default_options())
            .await
    }

    /// 添加任务并启动其专属定时器
    ///
    /// 车次号重复时拒绝添加，队列保持不变，首个注册的任务继续生效。
    pub async fn add_task_with_options(
        &self,
        schedule: Schedule,
        options: TaskOptions,
    ) -> KorresResult<ReservationTask> {
        if options.interval_ms == 0 {
            return Err(KorresError::Configuration(
                "重试间隔必须大于0毫秒".to_string(),
            ));
        }

        let task = ReservationTask::new(schedule, options);
        let id = task.id.clone();

        {
            let mut entries = self.inner.entries.write().await;
            if entries.contains_key(&id) {
                warn!("车次 {} 已在队列中，忽略重复添加", id);
                return Err(KorresError::duplicate_task(id));
            }

            let timer = Self::spawn_timer(
                Arc::clone(&self.inner),
                id.clone(),
                task.interval_ms,
                self.inner.shutdown_tx.subscribe(),
            );
            entries.insert(
                id.clone(),
                TaskEntry {
                    task: task.clone(),
                    attempt_state: AttemptState::Idle,
                    timer: Some(timer),
                },
            );
        }

        self.inner.persist().await?;
        let _ = self.inner.events.send(QueueEvent::TaskAdded { id: id.clone() });
        info!(
            "新增预订任务 {}（{}），重试间隔 {}ms",
            id,
            task.schedule.route_summary(),
            task.interval_ms
        );

        Ok(task)
    }

    /// 按身份移除任务并取消其定时器，移除不存在的任务是无操作
    ///
    /// 正在进行的尝试允许自行结束，其结果会因任务已不在队列而被丢弃。
    pub async fn remove_task(&self, id: &str) -> bool {
        let removed = {
            let mut entries = self.inner.entries.write().await;
            entries.remove(id)
        };

        match removed {
            Some(entry) => {
                if entry.attempt_state == AttemptState::Idle {
                    if let Some(timer) = entry.timer {
                        timer.abort();
                    }
                }
                if let Err(e) = self.inner.persist().await {
                    warn!("持久化任务列表失败: {}", e);
                }
                let _ = self
                    .inner
                    .events
                    .send(QueueEvent::TaskRemoved { id: id.to_string() });
                info!("预订任务 {} 已移除", id);
                true
            }
            None => {
                debug!("移除不存在的任务 {}，忽略", id);
                false
            }
        }
    }

    /// 从持久化快照恢复任务并启动定时器，返回恢复的数量
    pub async fn restore(&self, tasks: Vec<ReservationTask>) -> usize {
        let mut restored = 0;

        {
            let mut entries = self.inner.entries.write().await;
            for task in tasks {
                if task.interval_ms == 0 {
                    warn!("任务 {} 的重试间隔无效，跳过恢复", task.id);
                    continue;
                }
                if entries.contains_key(&task.id) {
                    warn!("持久化快照中车次 {} 重复，跳过", task.id);
                    continue;
                }

                let timer = Self::spawn_timer(
                    Arc::clone(&self.inner),
                    task.id.clone(),
                    task.interval_ms,
                    self.inner.shutdown_tx.subscribe(),
                );
                entries.insert(
                    task.id.clone(),
                    TaskEntry {
                        task,
                        attempt_state: AttemptState::Idle,
                        timer: Some(timer),
                    },
                );
                restored += 1;
            }
        }

        if restored > 0 {
            info!("恢复 {} 个持久化的预订任务", restored);
        }
        restored
    }

    /// 当前任务快照，按创建时间排序
    pub async fn tasks(&self) -> Vec<ReservationTask> {
        self.inner.snapshot().await
    }

    pub async fn get_task(&self, id: &str) -> Option<ReservationTask> {
        let entries = self.inner.entries.read().await;
        entries.get(id).map(|entry| entry.task.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.entries.read().await.is_empty()
    }

    /// 订阅队列事件
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.inner.events.subscribe()
    }

    /// 停止所有定时器并持久化最终快照
    pub async fn shutdown(&self) {
        let _ = self.inner.shutdown_tx.send(());

        {
            let mut entries = self.inner.entries.write().await;
            for entry in entries.values_mut() {
                if let Some(timer) = entry.timer.take() {
                    if entry.attempt_state == AttemptState::Idle {
                        timer.abort();
                    }
                }
            }
        }

        if let Err(e) = self.inner.persist().await {
            warn!("关闭时持久化任务列表失败: {}", e);
        }
        info!("预订任务队列已停止");
    }

    /// 启动任务专属定时循环
    ///
    /// 首次尝试发生在一个完整间隔之后，而不是入队当时。
    fn spawn_timer(
        inner: Arc<QueueInner>,
        id: String,
        interval_ms: u64,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let period = Duration::from_millis(interval_ms);
            let mut ticker = interval_at(Instant::now() + period, period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if inner.run_attempt(&id).await == TickControl::Stop {
                            break;
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("任务 {} 的定时器收到关闭信号", id);
                        break;
                    }
                }
            }
        })
    }
}

impl QueueInner {
    /// 执行一次预订尝试
    async fn run_attempt(&self, id: &str) -> TickControl {
        // 1. 设置占用标记；上一次尝试未结束则跳过本周期
        let (schedule, seat_count) = {
            let mut entries = self.entries.write().await;
            match entries.get_mut(id) {
                Some(entry) => {
                    if entry.attempt_state == AttemptState::Attempting {
                        debug!("任务 {} 上一次尝试仍在进行，跳过本周期", id);
                        return TickControl::Continue;
                    }
                    entry.attempt_state = AttemptState::Attempting;
                    (entry.task.schedule.clone(), entry.task.seat_count)
                }
                None => return TickControl::Stop,
            }
        };

        // 2. 调用预订接口；客户端错误折算为一次失败结果，不中断定时循环
        let outcome = match self.client.reserve(&schedule, seat_count).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("任务 {} 预订调用出错: {}", id, e);
                ReserveOutcome::failure("CLIENT_ERROR", e.to_string())
            }
        };

        // 3. 回写结果。任务可能在等待响应期间被移除，此时丢弃结果
        let (task, stop) = {
            let mut entries = self.entries.write().await;
            match entries.get_mut(id) {
                Some(entry) => {
                    entry.attempt_state = AttemptState::Idle;
                    entry.task.record_outcome(outcome.clone());
                    let stop = outcome.is_success() && entry.task.stop_on_success;
                    let task = entry.task.clone();
                    if stop {
                        entries.remove(id);
                    }
                    (task, stop)
                }
                None => {
                    debug!("任务 {} 已被移除，丢弃迟到的尝试结果", id);
                    return TickControl::Stop;
                }
            }
        };

        if let Err(e) = self.persist().await {
            warn!("持久化任务列表失败: {}", e);
        }

        let _ = self.events.send(QueueEvent::AttemptCompleted {
            id: id.to_string(),
            retries: task.retries,
            outcome: outcome.clone(),
        });

        if !outcome.is_success() {
            debug!(
                "任务 {} 第 {} 次尝试失败: [{}] {}",
                id, task.retries, outcome.code, outcome.message
            );
            return TickControl::Continue;
        }

        // 4. 成功：每次成功的尝试恰好触发一次通知副作用，失败只记录日志
        info!("任务 {} 预订成功，共尝试 {} 次", id, task.retries);
        let message = NotificationMessage::new("예매가 완료되었습니다.", task.schedule.summary());
        if let Err(e) = self.notifier.notify(&message).await {
            warn!("任务 {} 的通知发送失败: {}", id, e);
        }

        let _ = self.events.send(QueueEvent::TaskSucceeded { id: id.to_string() });

        if stop {
            let _ = self.events.send(QueueEvent::TaskRemoved { id: id.to_string() });
            info!("任务 {} 成功后移出队列", id);
            return TickControl::Stop;
        }
        TickControl::Continue
    }

    async fn snapshot(&self) -> Vec<ReservationTask> {
        let entries = self.entries.read().await;
        let mut tasks: Vec<ReservationTask> =
            entries.values().map(|entry| entry.task.clone()).collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        tasks
    }

    /// 把当前任务列表整体写入状态存储
    async fn persist(&self) -> KorresResult<()> {
        let tasks = self.snapshot().await;
        let value = serde_json::to_value(&tasks)?;
        self.store.put(TASKS_KEY, value).await
    }
}
