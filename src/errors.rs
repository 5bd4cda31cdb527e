use thiserror::Error;

/// 应用统一错误类型
///
/// Tauri command 边界统一通过 `to_string()` 转为前端可读的字符串。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("网络请求错误: {0}")]
    Network(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("弹窗交互失败: {0}")]
    Popup(String),
}

impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}
