use std::path::PathBuf;

use crate::mcp::types::PopupRequest;

/// 弹窗模式的进程状态
///
/// 只在 `--popup` 模式下被 manage，保存本次要展示的请求和响应文件位置。
pub struct PopupState {
    request: PopupRequest,
    response_path: PathBuf,
}

impl PopupState {
    pub fn new(request: PopupRequest, response_path: PathBuf) -> Self {
        Self { request, response_path }
    }

    pub fn request(&self) -> &PopupRequest {
        &self.request
    }

    pub fn response_path(&self) -> &PathBuf {
        &self.response_path
    }
}
