use tracing::{info, warn};

/// 应用展示名，出现在 app info 字符串和窗口标题里
pub const APP_DISPLAY_NAME: &str = "weidao";

/// 形如 "weidao v0.2.0" 的应用信息字符串
pub fn app_info_string() -> String {
    format!("{} v{}", APP_DISPLAY_NAME, env!("CARGO_PKG_VERSION"))
}

#[tauri::command]
pub fn get_app_info() -> String {
    app_info_string()
}

#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub(crate) fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| format!("无法访问剪贴板: {}", e))?;
    clipboard.set_text(text.to_string()).map_err(|e| format!("写入剪贴板失败: {}", e))
}

#[cfg(any(target_os = "android", target_os = "ios"))]
pub(crate) fn copy_to_clipboard(_text: &str) -> Result<(), String> {
    Err("移动平台不支持剪贴板回退".to_string())
}

/// 打开外部链接；失败时把链接复制到剪贴板并提示用户手动打开
///
/// 错误文案即用户提示，前端直接展示。
pub(crate) fn open_url_with_clipboard_fallback(url: &str) -> Result<(), String> {
    info!(url = %url, "Opening URL in browser");
    if let Err(e) = open::that(url) {
        warn!(error = ?e, url = %url, "Failed to open browser automatically");
        return match copy_to_clipboard(url) {
            Ok(()) => Err(format!("无法自动打开链接，已复制到剪贴板，请手动打开: {}", url)),
            Err(_) => Err(format!("无法打开链接，请手动访问: {}", url)),
        };
    }
    Ok(())
}

#[tauri::command]
pub async fn open_external_url(url: String) -> Result<(), String> {
    open_url_with_clipboard_fallback(&url)
}

#[tauri::command]
pub async fn copy_text_to_clipboard(text: String) -> Result<(), String> {
    copy_to_clipboard(&text)
}

#[tauri::command]
pub async fn open_data_folder() -> Result<(), String> {
    let dir = crate::config::config_dir();
    std::fs::create_dir_all(&dir).map_err(|e| format!("无法创建数据文件夹: {}", e))?;
    if let Err(e) = open::that(&dir) {
        return Err(format!("无法打开数据文件夹: {}", e));
    }
    Ok(())
}
