use tracing::{info, instrument};

use crate::api::system_api::copy_to_clipboard;
use crate::config::{load_standalone_config, save_standalone_config};
use crate::prompt::{default_mcp_tools, effective_mcp_tools, generate_full_prompt, McpToolConfig};

fn current_tools() -> Result<Vec<McpToolConfig>, String> {
    let config = load_standalone_config().map_err(String::from)?;
    Ok(effective_mcp_tools(&config.tools))
}

/// 获取 MCP 工具列表（默认配置 + 持久化的启用状态覆盖）
#[tauri::command]
#[instrument]
pub async fn get_mcp_tools() -> Result<Vec<McpToolConfig>, String> {
    current_tools()
}

/// 更新某个工具的启用状态并持久化
///
/// 不可禁用的工具拒绝关闭请求。
#[tauri::command]
#[instrument]
pub async fn set_mcp_tool_enabled(
    tool_id: String,
    enabled: bool,
) -> Result<Vec<McpToolConfig>, String> {
    let tool = default_mcp_tools()
        .into_iter()
        .find(|t| t.id == tool_id)
        .ok_or_else(|| format!("未知的工具: {}", tool_id))?;

    if !tool.can_disable && !enabled {
        return Err(format!("工具 {} 不可禁用", tool.name));
    }

    let mut config = load_standalone_config().map_err(String::from)?;
    config.tools.insert(tool_id.clone(), enabled);
    save_standalone_config(&config).map_err(|e| e.to_string())?;
    info!(tool_id = %tool_id, enabled, "MCP tool toggled");

    Ok(effective_mcp_tools(&config.tools))
}

/// 按当前工具启用状态生成完整提示词
#[tauri::command]
#[instrument]
pub async fn build_full_prompt() -> Result<String, String> {
    Ok(generate_full_prompt(&current_tools()?))
}

/// 生成提示词并复制到剪贴板，返回生成的内容
#[tauri::command]
#[instrument]
pub async fn copy_prompt_to_clipboard() -> Result<String, String> {
    let prompt = generate_full_prompt(&current_tools()?);
    copy_to_clipboard(&prompt)?;
    Ok(prompt)
}
