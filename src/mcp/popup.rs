//! 弹窗进程的拉起与响应回收
//!
//! MCP 服务器进程没有窗口，向用户提问时把请求写成 JSON 文件，
//! 以 `--popup` 模式拉起本程序的新进程展示弹窗，等它退出后读响应文件。
//! 响应文件不存在即视为用户取消。

use std::path::Path;
use std::time::Duration;

use rmcp::model::Content;
use rmcp::ErrorData as McpError;
use tracing::{debug, info, warn};

use crate::config::load_standalone_config;
use crate::errors::AppError;
use crate::mcp::types::{
    build_continue_response, McpResponse, McpResponseContent, PopupRequest,
    RESPONSE_SOURCE_TIMEOUT,
};
use crate::mcp::util::{popup_dir, popup_error, request_file_path, response_file_path};

/// 拉起弹窗并等待用户反馈，返回原始响应 JSON 字符串
///
/// 超时行为由独立配置控制：配置了 `timeout_secs` 时超时即终止弹窗进程，
/// 并返回“继续”响应而不是报错。
pub async fn request_user_feedback(request: &PopupRequest) -> Result<String, AppError> {
    let dir = popup_dir();
    std::fs::create_dir_all(&dir)?;

    let request_path = request_file_path(&request.id);
    std::fs::write(&request_path, serde_json::to_string_pretty(request)?)?;
    debug!(request_id = %request.id, path = %request_path.display(), "Popup request written");

    let exe = std::env::current_exe()?;
    let mut child = tokio::process::Command::new(exe)
        .arg("--popup")
        .arg(&request_path)
        .spawn()
        .map_err(|e| AppError::Popup(format!("无法拉起弹窗进程: {}", e)))?;

    let timeout_secs = load_standalone_config().map(|c| c.popup.timeout_secs).unwrap_or(None);

    let timed_out = match timeout_secs {
        Some(secs) => {
            match tokio::time::timeout(Duration::from_secs(secs), child.wait()).await {
                Ok(status) => {
                    status.map_err(|e| AppError::Popup(format!("等待弹窗进程失败: {}", e)))?;
                    false
                }
                Err(_) => {
                    warn!(request_id = %request.id, timeout_secs = secs, "Popup timed out, killing process");
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    true
                }
            }
        }
        None => {
            child.wait().await.map_err(|e| AppError::Popup(format!("等待弹窗进程失败: {}", e)))?;
            false
        }
    };

    let response_path = response_file_path(&request.id);
    let result = if timed_out {
        // 超时按配置的继续提示词回复，而不是让 AI 侧收到错误
        Ok(build_continue_response(Some(request.id.clone()), RESPONSE_SOURCE_TIMEOUT))
    } else {
        read_response_file(&response_path)
    };

    cleanup_popup_files(&request_path, &response_path);
    result
}

fn read_response_file(response_path: &Path) -> Result<String, AppError> {
    match std::fs::read_to_string(response_path) {
        Ok(raw) => {
            info!(path = %response_path.display(), "Popup response collected");
            Ok(raw)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::Popup("用户关闭了弹窗，未提供反馈".to_string()))
        }
        Err(e) => Err(AppError::Popup(format!("读取响应文件失败: {}", e))),
    }
}

fn cleanup_popup_files(request_path: &Path, response_path: &Path) {
    for path in [request_path, response_path] {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!(path = %path.display(), error = %e, "Failed to remove popup file");
            }
        }
    }
}

/// 弹窗进程启动时从请求文件加载 PopupRequest
pub fn load_popup_request(path: &Path) -> Result<PopupRequest, AppError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Popup(format!("读取请求文件失败 {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&contents)?)
}

/// 弹窗进程写响应文件（提交、继续两条路径共用）
pub fn write_response_file(path: &Path, payload: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, payload)?;
    Ok(())
}

/// 解析响应内容，支持文本和图片
///
/// 优先按结构化格式解析，失败后尝试旧的 content 数组格式。
pub fn parse_mcp_response(raw: &str) -> Result<Vec<Content>, McpError> {
    if let Ok(response) = serde_json::from_str::<McpResponse>(raw) {
        return Ok(contents_from_structured(response));
    }

    if let Ok(contents) = serde_json::from_str::<Vec<McpResponseContent>>(raw) {
        return Ok(contents_from_legacy(contents));
    }

    Err(popup_error(format!("无法解析的响应格式: {}", raw)))
}

fn contents_from_structured(response: McpResponse) -> Vec<Content> {
    let mut contents = Vec::new();

    if !response.selected_options.is_empty() {
        contents.push(Content::text(format!("已选择: {}", response.selected_options.join("、"))));
    }

    if let Some(user_input) = response.user_input {
        if !user_input.is_empty() {
            contents.push(Content::text(user_input));
        }
    }

    for image in response.images {
        contents.push(Content::image(image.data, image.media_type));
    }

    if contents.is_empty() {
        contents.push(Content::text("用户未提供反馈"));
    }
    contents
}

fn contents_from_legacy(items: Vec<McpResponseContent>) -> Vec<Content> {
    let mut contents = Vec::new();

    for item in items {
        match item.content_type.as_str() {
            "text" => {
                if let Some(text) = item.text {
                    contents.push(Content::text(text));
                }
            }
            "image" => {
                if let Some(source) = item.source {
                    contents.push(Content::image(source.data, source.media_type));
                }
            }
            other => {
                warn!(content_type = %other, "Ignoring unknown legacy content type");
            }
        }
    }

    if contents.is_empty() {
        contents.push(Content::text("用户未提供反馈"));
    }
    contents
}
