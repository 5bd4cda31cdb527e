use std::path::PathBuf;

use rmcp::ErrorData as McpError;

/// 生成弹窗请求 id
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 弹窗交互失败对应的 MCP 错误
pub fn popup_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// 弹窗请求/响应文件所在目录
pub fn popup_dir() -> PathBuf {
    std::env::temp_dir().join("weidao-popup")
}

/// 请求文件路径
pub fn request_file_path(request_id: &str) -> PathBuf {
    popup_dir().join(format!("request-{}.json", request_id))
}

/// 响应文件路径
pub fn response_file_path(request_id: &str) -> PathBuf {
    popup_dir().join(format!("response-{}.json", request_id))
}

/// 由请求文件路径推导响应文件路径（弹窗进程侧使用）
pub fn response_path_for_request_file(request_path: &std::path::Path) -> Option<PathBuf> {
    let file_name = request_path.file_name()?.to_str()?;
    let request_id = file_name.strip_prefix("request-")?.strip_suffix(".json")?;
    Some(request_path.with_file_name(format!("response-{}.json", request_id)))
}
