//! 独立配置文件读写
//!
//! GUI 模式和 MCP 服务器模式运行在不同进程里，MCP 进程没有 Tauri 句柄，
//! 所以配置放在平台配置目录下的一个 JSON 文件中，两边都直接读文件。

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;

/// 继续提示词的兜底值（配置文件缺失或损坏时使用）
pub const DEFAULT_CONTINUE_PROMPT: &str = "请按照最佳实践继续";

/// config.json 的顶层结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StandaloneConfig {
    pub reply: ReplyConfig,
    pub popup: PopupConfig,
    /// 工具启用状态覆盖（工具 id -> 是否启用），只对可禁用的工具生效
    pub tools: HashMap<String, bool>,
}

/// 回复相关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    /// 用户点击“继续”或弹窗超时时发回给 AI 的提示词
    pub continue_prompt: String,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self { continue_prompt: DEFAULT_CONTINUE_PROMPT.to_string() }
    }
}

/// 弹窗行为配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// 等待用户反馈的超时秒数，None 表示一直等待弹窗进程退出
    pub timeout_secs: Option<u64>,
}

/// 应用配置目录（不存在时由写入方创建）
pub fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(std::env::temp_dir).join("weidao")
}

/// config.json 的完整路径
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// 读取独立配置，文件不存在时返回默认配置
pub fn load_standalone_config() -> Result<StandaloneConfig, AppError> {
    read_config_from(&config_path())
}

/// 写入独立配置
pub fn save_standalone_config(config: &StandaloneConfig) -> Result<(), AppError> {
    write_config_to(&config_path(), config)
}

fn read_config_from(path: &Path) -> Result<StandaloneConfig, AppError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StandaloneConfig::default());
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config file");
            return Err(AppError::Io(e));
        }
    };
    serde_json::from_str(&contents).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to parse config file");
        AppError::Config(format!("配置文件格式不正确: {}", e))
    })
}

fn write_config_to(path: &Path, config: &StandaloneConfig) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
