use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::info;

use korres_core::traits::StateStore;
use korres_core::{KorresError, KorresResult};

/// 单个JSON文档上的键值存储
///
/// 整份状态常驻内存，每次写操作先写临时文件再原子改名，
/// 进程中途退出不会留下半写的状态文件。
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// 打开（必要时创建）状态文件
    pub async fn open(path: impl Into<PathBuf>) -> KorresResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| KorresError::storage(format!("创建状态目录失败: {e}")))?;
            }
        }

        let state = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Map<String, Value>>(&bytes)
                .map_err(|e| KorresError::storage(format!("状态文件格式损坏: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                return Err(KorresError::storage(format!("读取状态文件失败: {e}")));
            }
        };

        info!("状态存储已打开: {}，{} 个键", path.display(), state.len());
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    async fn flush(&self, state: &Map<String, Value>) -> KorresResult<()> {
        let bytes = serde_json::to_vec_pretty(&Value::Object(state.clone()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| KorresError::storage(format!("写入临时状态文件失败: {e}")))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| KorresError::storage(format!("替换状态文件失败: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn get(&self, key: &str) -> KorresResult<Option<Value>> {
        let state = self.state.lock().await;
        Ok(state.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> KorresResult<()> {
        let mut state = self.state.lock().await;
        state.insert(key.to_string(), value);
        self.flush(&state).await
    }

    async fn delete(&self, key: &str) -> KorresResult<()> {
        let mut state = self.state.lock().await;
        if state.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use korres_core::traits::{EMAIL_KEY, TASKS_KEY};

    #[tokio::test]
    async fn test_put_get_round_trip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let store = JsonFileStore::open(&path).await.unwrap();
            store
                .put(TASKS_KEY, serde_json::json!([{"id": "0051"}]))
                .await
                .unwrap();
            store
                .put(EMAIL_KEY, Value::String("user@example.com".to_string()))
                .await
                .unwrap();
        }

        let store = JsonFileStore::open(&path).await.unwrap();
        let tasks = store.get(TASKS_KEY).await.unwrap().unwrap();
        assert_eq!(tasks[0]["id"], "0051");
        let email = store.get(EMAIL_KEY).await.unwrap().unwrap();
        assert_eq!(email, "user@example.com");
    }

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("state.json"))
            .await
            .unwrap();
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("state.json"))
            .await
            .unwrap();

        store
            .put(EMAIL_KEY, Value::String("user@example.com".to_string()))
            .await
            .unwrap();
        store.delete(EMAIL_KEY).await.unwrap();
        store.delete(EMAIL_KEY).await.unwrap();
        assert!(store.get(EMAIL_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_flush_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        store.put("key", Value::Bool(true)).await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/state.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.put("key", Value::Null).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"not-json").await.unwrap();

        let result = JsonFileStore::open(&path).await;
        assert!(matches!(result, Err(KorresError::Storage(_))));
    }
}
