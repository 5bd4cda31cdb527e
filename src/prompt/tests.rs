//! 提示词组装测试
//!
//! 覆盖内容：
//! - 默认工具列表
//! - 基础规范的紧凑拼接（不加空行）
//! - 禁用/未注册工具不贡献片段
//! - 拼接顺序跟随输入顺序

use std::collections::HashMap;

use super::*;

fn unregistered_tool(enabled: bool) -> McpToolConfig {
    McpToolConfig {
        id: "nonexistent".to_string(),
        name: "不存在的工具".to_string(),
        description: "没有注册提示词片段".to_string(),
        enabled,
        can_disable: true,
        icon: String::new(),
        icon_bg: String::new(),
        dark_icon_bg: String::new(),
    }
}

/// 默认工具列表里必须有 weidao，启用且不可禁用
#[test]
fn test_default_tools_contain_weidao() {
    let tools = default_mcp_tools();
    let weidao = tools.iter().find(|t| t.id == "weidao").expect("weidao tool missing");

    assert!(weidao.enabled);
    assert!(!weidao.can_disable);
    assert!(!weidao.name.is_empty());
}

/// 基础规范直接接在核心规范后面，中间只有一个换行
#[test]
fn test_base_rules_joined_compactly() {
    let prompt = generate_full_prompt(&default_mcp_tools());
    let section = prompt_section_for("weidao").unwrap();

    let expected_head = format!("{}\n{}", CORE_RULES, section.base);
    assert!(
        prompt.starts_with(&expected_head),
        "base rules must follow core rules without a blank line"
    );
}

/// 使用细节单独成段，用空行和前文分隔
#[test]
fn test_detail_rules_form_their_own_part() {
    let prompt = generate_full_prompt(&default_mcp_tools());
    let section = prompt_section_for("weidao").unwrap();

    assert!(prompt.contains(&format!("\n\n{}", section.detail)));
    assert!(prompt.ends_with(&section.detail));
}

/// 全部工具禁用时只剩核心规范
#[test]
fn test_all_disabled_yields_core_rules_only() {
    let mut tools = default_mcp_tools();
    for tool in tools.iter_mut() {
        tool.enabled = false;
    }

    assert_eq!(generate_full_prompt(&tools), CORE_RULES);
}

/// 空工具列表等价于全部禁用
#[test]
fn test_empty_tool_list_yields_core_rules_only() {
    assert_eq!(generate_full_prompt(&[]), CORE_RULES);
}

/// 未注册片段的工具即使启用也不贡献内容，且不影响其他工具
#[test]
fn test_unregistered_tool_contributes_nothing() {
    let mut tools = vec![unregistered_tool(true)];
    tools.extend(default_mcp_tools());

    assert_eq!(generate_full_prompt(&tools), generate_full_prompt(&default_mcp_tools()));
}

/// 参考提示词等于默认工具配置的完整提示词
#[test]
fn test_reference_prompt_matches_defaults() {
    assert_eq!(reference_prompt(), generate_full_prompt(&default_mcp_tools()));
}

/// 启用状态覆盖只对可禁用的工具生效
#[test]
fn test_effective_tools_ignore_overrides_for_locked_tools() {
    let mut overrides = HashMap::new();
    overrides.insert("weidao".to_string(), false);

    let tools = effective_mcp_tools(&overrides);
    let weidao = tools.iter().find(|t| t.id == "weidao").unwrap();

    // weidao 不可禁用，覆盖被忽略
    assert!(weidao.enabled);
}

/// 覆盖表里不存在的工具保持默认状态
#[test]
fn test_effective_tools_without_overrides_match_defaults() {
    let tools = effective_mcp_tools(&HashMap::new());
    let defaults = default_mcp_tools();

    assert_eq!(tools.len(), defaults.len());
    for (tool, default) in tools.iter().zip(defaults.iter()) {
        assert_eq!(tool.enabled, default.enabled);
    }
}
