//! 弹窗模式的命令面
//!
//! 这些命令只在 `--popup` 模式下有意义：窗口前端取出请求渲染，
//! 用户操作后写响应文件并退出进程，MCP 服务器侧负责回收。

use base64::{engine::general_purpose::STANDARD, Engine};
use tauri::State;
use tracing::{info, instrument, warn};

use crate::mcp::popup::write_response_file;
use crate::mcp::types::{
    build_continue_response, build_send_response, ImageAttachment, PopupRequest,
    RESPONSE_SOURCE_GUI,
};
use crate::state::popup_state::PopupState;

/// 取当前弹窗要展示的请求
#[tauri::command]
pub async fn get_popup_request(state: State<'_, PopupState>) -> Result<PopupRequest, String> {
    Ok(state.request().clone())
}

/// 提交用户反馈（文本 + 选项 + 图片），写响应文件后退出
#[tauri::command]
#[instrument(skip(app_handle, state, user_input, images))]
pub async fn submit_popup_response(
    app_handle: tauri::AppHandle,
    state: State<'_, PopupState>,
    user_input: Option<String>,
    selected_options: Option<Vec<String>>,
    images: Option<Vec<ImageAttachment>>,
) -> Result<(), String> {
    let request_id = state.request().id.clone();
    let payload = build_send_response(
        user_input.filter(|input| !input.trim().is_empty()),
        selected_options.unwrap_or_default(),
        images.unwrap_or_default(),
        Some(request_id.clone()),
        RESPONSE_SOURCE_GUI,
    );

    write_response_file(state.response_path(), &payload).map_err(|e| e.to_string())?;
    info!(request_id = %request_id, "Popup response submitted");

    app_handle.exit(0);
    Ok(())
}

/// 用户选择“继续”，回复配置的继续提示词
#[tauri::command]
#[instrument(skip(app_handle, state))]
pub async fn continue_popup_response(
    app_handle: tauri::AppHandle,
    state: State<'_, PopupState>,
) -> Result<(), String> {
    let request_id = state.request().id.clone();
    let payload = build_continue_response(Some(request_id.clone()), RESPONSE_SOURCE_GUI);

    write_response_file(state.response_path(), &payload).map_err(|e| e.to_string())?;
    info!(request_id = %request_id, "Popup continue submitted");

    app_handle.exit(0);
    Ok(())
}

/// 用户取消：不写响应文件直接退出，服务器侧按取消处理
#[tauri::command]
#[instrument(skip(app_handle, state))]
pub async fn cancel_popup(
    app_handle: tauri::AppHandle,
    state: State<'_, PopupState>,
) -> Result<(), String> {
    if let Err(e) = std::fs::remove_file(state.response_path()) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(error = %e, "Failed to remove stale response file");
        }
    }
    info!(request_id = %state.request().id, "Popup cancelled by user");

    app_handle.exit(0);
    Ok(())
}

/// 读取本地图片文件并编码为附件
#[tauri::command]
#[instrument]
pub async fn attach_popup_image(path: String) -> Result<ImageAttachment, String> {
    let bytes = std::fs::read(&path).map_err(|e| format!("读取图片失败: {}", e))?;

    let media_type = mime_guess::from_path(&path).first_or_octet_stream().to_string();
    if !media_type.starts_with("image/") {
        return Err(format!("不支持的附件类型: {}", media_type));
    }

    let filename = std::path::Path::new(&path)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string());

    Ok(ImageAttachment { data: STANDARD.encode(bytes), media_type, filename })
}
