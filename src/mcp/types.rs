use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::config::{load_standalone_config, DEFAULT_CONTINUE_PROMPT};

/// 响应来源标识：GUI 弹窗
pub const RESPONSE_SOURCE_GUI: &str = "gui";
/// 响应来源标识：等待超时后的自动继续
pub const RESPONSE_SOURCE_TIMEOUT: &str = "timeout";

/// ask_user_question 工具的入参
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct AskUserQuestionRequest {
    #[schemars(description = "要显示给用户的消息")]
    pub message: String,
    #[schemars(description = "预定义的选项列表（可选）")]
    #[serde(default)]
    pub predefined_options: Vec<String>,
    #[schemars(description = "消息是否为Markdown格式，默认为true")]
    #[serde(default = "default_is_markdown")]
    pub is_markdown: bool,
}

fn default_is_markdown() -> bool {
    true
}

/// 发给弹窗进程的请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupRequest {
    pub id: String,
    pub message: String,
    pub predefined_options: Option<Vec<String>>,
    pub is_markdown: bool,
}

impl PopupRequest {
    /// 由工具入参构造弹窗请求，空的选项列表归一化为 None
    pub fn from_question(id: String, request: AskUserQuestionRequest) -> Self {
        Self {
            id,
            message: request.message,
            predefined_options: if request.predefined_options.is_empty() {
                None
            } else {
                Some(request.predefined_options)
            },
            is_markdown: request.is_markdown,
        }
    }
}

/// 结构化响应数据格式
#[derive(Debug, Deserialize)]
pub struct McpResponse {
    pub user_input: Option<String>,
    pub selected_options: Vec<String>,
    pub images: Vec<ImageAttachment>,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub data: String,
    pub media_type: String,
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMetadata {
    pub timestamp: Option<String>,
    pub request_id: Option<String>,
    pub source: Option<String>,
}

/// 旧格式兼容性支持
#[derive(Debug, Deserialize)]
pub struct McpResponseContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: Option<String>,
    pub source: Option<ImageSource>,
}

#[derive(Debug, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub media_type: String,
    pub data: String,
}

/// 统一的响应构建函数
///
/// 所有路径（弹窗提交、继续、超时）都经过这里，保证输出 JSON 形状一致。
pub fn build_mcp_response(
    user_input: Option<String>,
    selected_options: Vec<String>,
    images: Vec<ImageAttachment>,
    request_id: Option<String>,
    source: &str,
) -> serde_json::Value {
    serde_json::json!({
        "user_input": user_input,
        "selected_options": selected_options,
        "images": images,
        "metadata": {
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "request_id": request_id,
            "source": source
        }
    })
}

/// 构建发送操作的响应
pub fn build_send_response(
    user_input: Option<String>,
    selected_options: Vec<String>,
    images: Vec<ImageAttachment>,
    request_id: Option<String>,
    source: &str,
) -> String {
    let response = build_mcp_response(user_input, selected_options, images, request_id, source);
    response.to_string()
}

/// 构建继续操作的响应
///
/// 继续提示词从独立配置读取，读取失败时使用兜底值。
pub fn build_continue_response(request_id: Option<String>, source: &str) -> String {
    let continue_prompt = match load_standalone_config() {
        Ok(config) => config.reply.continue_prompt,
        Err(_) => DEFAULT_CONTINUE_PROMPT.to_string(),
    };

    let response = build_mcp_response(Some(continue_prompt), vec![], vec![], request_id, source);
    response.to_string()
}
