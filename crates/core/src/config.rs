use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub queue: QueueConfig,
    pub korail: KorailConfig,
    pub notify: NotifyConfig,
    pub storage: StorageConfig,
}

/// API服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
}

/// 预订任务队列配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// 新任务的默认重试间隔（毫秒）
    pub default_interval_ms: u64,
    /// 新任务成功后是否默认移出队列
    pub stop_on_success: bool,
    /// 事件广播通道容量
    pub event_buffer_size: usize,
}

/// 预订服务接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KorailConfig {
    pub base_url: String,
    pub request_timeout_seconds: u64,
}

/// 通知渠道配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    pub desktop_enabled: bool,
    pub kakao_enabled: bool,
    pub kakao_client_id: String,
    pub kakao_redirect_uri: String,
    /// 配置后启用邮件Webhook通知
    pub email_webhook_url: Option<String>,
}

/// 本地状态存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub state_file: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            default_interval_ms: 5000,
            stop_on_success: true,
            event_buffer_size: 64,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1:8420".to_string(),
            },
            queue: QueueConfig::default(),
            korail: KorailConfig {
                base_url: "https://smart.letskorail.com/classes/com.korail.mobile".to_string(),
                request_timeout_seconds: 15,
            },
            notify: NotifyConfig {
                desktop_enabled: true,
                kakao_enabled: false,
                kakao_client_id: String::new(),
                kakao_redirect_uri: "http://127.0.0.1:8420/oauth/kakao".to_string(),
                email_webhook_url: None,
            },
            storage: StorageConfig {
                state_file: "korres-state.json".to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = ["config/korres.toml", "korres.toml"];

            let mut config_file_found = false;
            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    config_file_found = true;
                    break;
                }
            }

            if !config_file_found {
                builder = builder
                    .set_default("server.bind_address", "127.0.0.1:8420")?
                    .set_default("queue.default_interval_ms", 5000)?
                    .set_default("queue.stop_on_success", true)?
                    .set_default("queue.event_buffer_size", 64)?
                    .set_default(
                        "korail.base_url",
                        "https://smart.letskorail.com/classes/com.korail.mobile",
                    )?
                    .set_default("korail.request_timeout_seconds", 15)?
                    .set_default("notify.desktop_enabled", true)?
                    .set_default("notify.kakao_enabled", false)?
                    .set_default("notify.kakao_client_id", "")?
                    .set_default(
                        "notify.kakao_redirect_uri",
                        "http://127.0.0.1:8420/oauth/kakao",
                    )?
                    .set_default("storage.state_file", "korres-state.json")?;
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("KORRES")
                .separator("_")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.bind_address.is_empty() {
            return Err(anyhow::anyhow!("server.bind_address 不能为空"));
        }
        if self.queue.default_interval_ms == 0 {
            return Err(anyhow::anyhow!("queue.default_interval_ms 必须大于0"));
        }
        if self.queue.event_buffer_size == 0 {
            return Err(anyhow::anyhow!("queue.event_buffer_size 必须大于0"));
        }
        if self.korail.base_url.is_empty() {
            return Err(anyhow::anyhow!("korail.base_url 不能为空"));
        }
        if self.notify.kakao_enabled && self.notify.kakao_client_id.is_empty() {
            return Err(anyhow::anyhow!(
                "启用KakaoTalk通知时必须配置 notify.kakao_client_id"
            ));
        }
        if self.storage.state_file.is_empty() {
            return Err(anyhow::anyhow!("storage.state_file 不能为空"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address, "127.0.0.1:8420");
        assert_eq!(config.queue.default_interval_ms, 5000);
        assert!(config.queue.stop_on_success);
        assert_eq!(config.storage.state_file, "korres-state.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_from_toml() {
        let toml_str = r#"
[server]
bind_address = "0.0.0.0:9000"

[queue]
default_interval_ms = 3000
stop_on_success = false
event_buffer_size = 32

[korail]
base_url = "https://smart.letskorail.com/classes/com.korail.mobile"
request_timeout_seconds = 10

[notify]
desktop_enabled = false
kakao_enabled = true
kakao_client_id = "test-client-id"
kakao_redirect_uri = "http://localhost:9000/oauth/kakao"
email_webhook_url = "https://example.com/send"

[storage]
state_file = "/tmp/korres-test.json"
"#;

        let config = AppConfig::from_toml(toml_str).expect("Failed to parse TOML");
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.queue.default_interval_ms, 3000);
        assert!(!config.queue.stop_on_success);
        assert!(config.notify.kakao_enabled);
        assert_eq!(
            config.notify.email_webhook_url.as_deref(),
            Some("https://example.com/send")
        );
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = AppConfig::default();
        config.queue.default_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_kakao_client_id_when_enabled() {
        let mut config = AppConfig::default();
        config.notify.kakao_enabled = true;
        assert!(config.validate().is_err());

        config.notify.kakao_client_id = "client-id".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig::default();
        let serialized = serde_json::to_string(&config).expect("Failed to serialize");
        let deserialized: AppConfig =
            serde_json::from_str(&serialized).expect("Failed to deserialize");

        assert_eq!(
            config.queue.default_interval_ms,
            deserialized.queue.default_interval_ms
        );
        assert_eq!(config.server.bind_address, deserialized.server.bind_address);
    }
}
