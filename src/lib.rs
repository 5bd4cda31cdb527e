pub mod api;
pub mod config;
pub mod errors;
pub mod mcp;
pub mod prompt;
pub mod state;
mod window;

use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::api::feedback_api::{
    attach_popup_image, cancel_popup, continue_popup_response, get_popup_request,
    submit_popup_response,
};
use crate::api::prompt_api::{
    build_full_prompt, copy_prompt_to_clipboard, get_mcp_tools, set_mcp_tool_enabled,
};
use crate::api::system_api::{
    copy_text_to_clipboard, get_app_info, open_data_folder, open_external_url,
};
use crate::api::updater_api::{check_update, get_version_info, open_release_page};
use crate::mcp::popup::load_popup_request;
use crate::mcp::util::response_path_for_request_file;
use crate::state::popup_state::PopupState;
use crate::state::version_state::VersionState;

/// 初始化 tracing 日志 (RUST_LOG 环境变量可覆盖)
///
/// dev 构建默认 debug，release 构建默认 info。
/// MCP 服务器模式下 stdout 属于协议，日志必须写 stderr。
fn init_tracing(stderr_only: bool) {
    if std::env::var("RUST_LOG").is_err() {
        let default_log = if cfg!(debug_assertions) {
            "debug,weidao=debug,rmcp=debug"
        } else {
            "info,weidao=info,rmcp=warn"
        };
        std::env::set_var("RUST_LOG", default_log);
    }

    if stderr_only {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_line_number(true)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_line_number(true)
            .with_thread_ids(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

/// 从命令行参数取出 `--popup <request-file>` 的请求文件路径
fn popup_request_path(args: &[String]) -> Option<PathBuf> {
    args.windows(2)
        .find(|pair| pair[0] == "--popup")
        .map(|pair| PathBuf::from(pair[1].clone()))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let args: Vec<String> = std::env::args().collect();

    // MCP 服务器模式：无窗口，stdio 上跑协议
    if args.iter().any(|arg| arg == "--mcp-server") {
        init_tracing(true);
        info!("Starting in MCP server mode");

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        if let Err(e) = runtime.block_on(mcp::server::run_server()) {
            error!(error = %e, "MCP 服务器异常退出");
            std::process::exit(1);
        }
        return;
    }

    init_tracing(false);

    // 弹窗模式：加载请求文件，展示单个反馈窗口
    let popup_state = match popup_request_path(&args) {
        Some(request_path) => match load_popup_request(&request_path) {
            Ok(request) => {
                let response_path = match response_path_for_request_file(&request_path) {
                    Some(path) => path,
                    None => {
                        error!(path = %request_path.display(), "请求文件名不符合约定");
                        std::process::exit(1);
                    }
                };
                info!(request_id = %request.id, "Starting in popup mode");
                Some(PopupState::new(request, response_path))
            }
            Err(e) => {
                error!(error = %e, "加载弹窗请求失败");
                std::process::exit(1);
            }
        },
        None => None,
    };
    let popup_mode = popup_state.is_some();

    let mut builder = tauri::Builder::default()
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_clipboard_manager::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(VersionState::new());

    if let Some(state) = popup_state {
        builder = builder.manage(state);
    }

    builder
        .setup(move |app| {
            let app_handle = app.handle();
            if popup_mode {
                window::create_popup_window(app_handle)?;
            } else {
                window::create_main_window(app_handle)?;
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_app_info,
            open_external_url,
            copy_text_to_clipboard,
            open_data_folder,
            get_version_info,
            check_update,
            open_release_page,
            get_mcp_tools,
            set_mcp_tool_enabled,
            build_full_prompt,
            copy_prompt_to_clipboard,
            get_popup_request,
            submit_popup_response,
            continue_popup_response,
            cancel_popup,
            attach_popup_image,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
