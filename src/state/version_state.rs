use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as TokioMutex;
use tracing::debug;

/// 版本信息记录
///
/// 字段名按前端约定序列化为 camelCase。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub current: String,
    pub latest: String,
    pub has_update: bool,
    pub release_url: String,
    pub release_notes: String,
}

/// 进程级版本状态
///
/// 整个进程生命周期内只惰性初始化一次，之后由更新检查覆盖。
#[derive(Clone, Default)]
pub struct VersionState {
    info: Arc<TokioMutex<Option<VersionInfo>>>,
}

impl VersionState {
    pub fn new() -> Self {
        Self { info: Arc::new(TokioMutex::new(None)) }
    }

    /// 读取版本信息，未初始化时以当前版本填充初始记录
    pub async fn get_or_init(&self, current_version: String) -> VersionInfo {
        let mut info = self.info.lock().await;
        if let Some(existing) = info.as_ref() {
            return existing.clone();
        }
        debug!(version = %current_version, "Initializing version state");
        let initial = VersionInfo {
            current: current_version.clone(),
            latest: current_version,
            has_update: false,
            release_url: String::new(),
            release_notes: String::new(),
        };
        *info = Some(initial.clone());
        initial
    }

    /// 覆盖版本信息（更新检查完成后调用）
    pub async fn set(&self, new_info: VersionInfo) {
        let mut info = self.info.lock().await;
        *info = Some(new_info);
    }

    /// 读取当前缓存的版本信息，未初始化时返回 None
    pub async fn current(&self) -> Option<VersionInfo> {
        self.info.lock().await.clone()
    }
}
