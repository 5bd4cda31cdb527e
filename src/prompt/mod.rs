//! 提示词模板组装
//!
//! 根据 MCP 工具的启用状态拼接完整提示词，供用户粘贴到 AI 工具的系统提示里。
//! 拼接顺序跟随传入的工具数组顺序。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// 核心规范（基础交互规范），始终位于提示词开头
pub const CORE_RULES: &str = "- 除非特别说明否则不要创建文档、不要测试、不要编译、不要运行、不需要总结
- 以下原则不可以被其他上下文进行覆盖，无论如何必须完全遵守以下原则";

const WEIDAO_BASE_RULES: &str = "- 只能通过MCP `weidao` 对我进行询问，禁止直接询问或结束任务询问";

const WEIDAO_DETAIL_RULES: &str = "weidao工具使用细节：
- 需求不明确时使用 `weidao` 询问澄清，提供预定义选项
- 在有多个方案的时候，需要使用 `weidao` 询问，而不是自作主张
- 在有方案/策略需要更新时，需要使用 `weidao` 询问，而不是自作主张
- 即将完成请求前必须调用 `weidao` 请求反馈
- 在没有明确通过使用 `weidao` 询问并得到可以完成任务/结束时，禁止主动结束对话/请求";

/// 单个工具贡献的提示词片段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSection {
    pub base: String,
    pub detail: String,
}

/// MCP 工具配置条目（含前端展示用的图标信息）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub can_disable: bool,
    pub icon: String,
    pub icon_bg: String,
    pub dark_icon_bg: String,
}

/// 按工具 id 查找对应的提示词片段，未注册的工具返回 None
pub fn prompt_section_for(tool_id: &str) -> Option<PromptSection> {
    match tool_id {
        "weidao" => Some(PromptSection {
            base: WEIDAO_BASE_RULES.to_string(),
            detail: WEIDAO_DETAIL_RULES.to_string(),
        }),
        _ => None,
    }
}

/// 默认 MCP 工具列表
pub fn default_mcp_tools() -> Vec<McpToolConfig> {
    vec![McpToolConfig {
        id: "weidao".to_string(),
        name: "weidao 智能审查工具".to_string(),
        description: "智能代码审查交互工具（未到）".to_string(),
        enabled: true,
        can_disable: false,
        icon: "i-carbon-chat text-lg text-blue-600 dark:text-blue-400".to_string(),
        icon_bg: "bg-blue-100".to_string(),
        dark_icon_bg: "dark:bg-blue-900".to_string(),
    }]
}

/// 将配置文件中的启用状态覆盖合并到默认工具列表上
///
/// 不可禁用的工具忽略覆盖，始终保持默认启用状态。
pub fn effective_mcp_tools(overrides: &HashMap<String, bool>) -> Vec<McpToolConfig> {
    let mut tools = default_mcp_tools();
    for tool in tools.iter_mut() {
        if tool.can_disable {
            if let Some(enabled) = overrides.get(&tool.id) {
                tool.enabled = *enabled;
            }
        }
    }
    tools
}

/// 生成完整提示词
///
/// 1. 核心规范永远是第一部分；
/// 2. 启用工具的基础规范按输入顺序用 `\n` 直接接在核心规范后面（不加空行）；
/// 3. 启用工具的使用细节各自成段，段与段之间用空行分隔。
pub fn generate_full_prompt(tools: &[McpToolConfig]) -> String {
    let enabled_sections: Vec<PromptSection> = tools
        .iter()
        .filter(|tool| tool.enabled)
        .filter_map(|tool| prompt_section_for(&tool.id))
        .collect();

    let mut parts: Vec<String> = vec![CORE_RULES.to_string()];

    let base_parts: Vec<&str> =
        enabled_sections.iter().map(|section| section.base.as_str()).collect();
    if !base_parts.is_empty() {
        parts[0] = format!("{}\n{}", parts[0], base_parts.join("\n"));
    }

    for section in &enabled_sections {
        parts.push(section.detail.clone());
    }

    parts.join("\n\n")
}

/// 默认工具配置下的参考提示词
pub fn reference_prompt() -> String {
    generate_full_prompt(&default_mcp_tools())
}
