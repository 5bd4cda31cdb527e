//! 反馈 MCP 服务器
//!
//! 通过 stdio 向 AI 客户端暴露 `ask_user_question` 工具。stdout 属于协议，
//! 该模式下日志必须走 stderr（见 lib.rs 的 tracing 初始化）。

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::transport::stdio;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use tracing::{debug, error};

use crate::mcp::popup::{parse_mcp_response, request_user_feedback};
use crate::mcp::types::{AskUserQuestionRequest, PopupRequest};
use crate::mcp::util::{generate_request_id, popup_error};

const SERVER_INSTRUCTIONS: &str = "Ask the user a question with predefined options. Use this when you need the user to make a choice between specific options. You can provide up to 4 options, each with a label and description. NEVER include \"other\" as an option - the user can always automatically provide a custom response.";

#[derive(Clone)]
pub struct FeedbackServer {
    tool_router: ToolRouter<Self>,
}

impl FeedbackServer {
    pub fn new() -> Self {
        Self { tool_router: Self::tool_router() }
    }
}

impl Default for FeedbackServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl FeedbackServer {
    #[tool(
        description = "Ask the user a question with predefined options. Use this when you need the user to make a choice between specific options. You can provide up to 4 options, each with a label and description. NEVER include \"other\" as an option - the user can always automatically provide a custom response."
    )]
    pub async fn ask_user_question(
        &self,
        Parameters(request): Parameters<AskUserQuestionRequest>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            options = request.predefined_options.len(),
            is_markdown = request.is_markdown,
            "收到 ask_user_question 调用"
        );

        let popup_request = PopupRequest::from_question(generate_request_id(), request);

        match request_user_feedback(&popup_request).await {
            Ok(raw) => {
                let content = parse_mcp_response(&raw)?;
                Ok(CallToolResult::success(content))
            }
            Err(e) => {
                error!(error = %e, request_id = %popup_request.id, "弹窗交互失败");
                Err(popup_error(e.to_string()))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for FeedbackServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

/// 启动 MCP 服务器并等待关闭
pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let service = FeedbackServer::new().serve(stdio()).await.inspect_err(|e| {
        error!(error = %e, "启动 MCP 服务器失败");
    })?;

    service.waiting().await?;
    Ok(())
}
