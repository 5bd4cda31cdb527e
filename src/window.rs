use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};
use tracing::debug;

use crate::api::system_api::APP_DISPLAY_NAME;

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const POPUP_WINDOW_LABEL: &str = "popup";

/// 创建（或聚焦）配置主窗口
pub fn create_main_window(app: &AppHandle) -> tauri::Result<()> {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        debug!("Main window already exists, focusing");
        let _ = window.set_focus();
        return Ok(());
    }

    WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::App("index.html".into()))
        .title(APP_DISPLAY_NAME)
        .inner_size(460.0, 640.0)
        .min_inner_size(380.0, 480.0)
        .build()?;
    Ok(())
}

/// 创建反馈弹窗窗口
///
/// 弹窗进程一次只展示一个请求，窗口置顶并居中。
pub fn create_popup_window(app: &AppHandle) -> tauri::Result<()> {
    WebviewWindowBuilder::new(app, POPUP_WINDOW_LABEL, WebviewUrl::App("index.html".into()))
        .title("等待反馈")
        .inner_size(420.0, 520.0)
        .min_inner_size(360.0, 400.0)
        .always_on_top(true)
        .center()
        .build()?;
    Ok(())
}
