//! 版本解析与更新检查测试
//!
//! ## 测试范围
//!
//! - app info 字符串里的版本号提取和兜底
//! - 版本号比较（semver 与退化路径）
//! - GitHub Releases API 调用（mockito）
//! - 版本状态的惰性初始化

use rstest::rstest;

use crate::api::updater_api::{
    current_version, fetch_latest_release, is_newer_version, normalize_tag, parse_version,
    FALLBACK_VERSION,
};
use crate::state::version_state::VersionState;

/// 标准格式的 app info 提取版本号
#[test]
fn test_parse_version_basic() {
    assert_eq!(parse_version("weidao v0.2.0"), "0.2.0");
}

/// 版本号前后有其他文本也能提取
#[test]
fn test_parse_version_with_surrounding_text() {
    assert_eq!(parse_version("某应用 v1.12.3 (build 42)"), "1.12.3");
}

/// 没有 v 前缀的版本号不匹配，走兜底
#[test]
fn test_parse_version_requires_v_prefix() {
    assert_eq!(parse_version("weidao 0.3.0"), FALLBACK_VERSION);
}

/// 完全没有版本信息时走兜底
#[test]
fn test_parse_version_fallback() {
    assert_eq!(parse_version("无版本信息"), FALLBACK_VERSION);
}

/// 两段式版本号不满足 X.Y.Z 形式，走兜底
#[test]
fn test_parse_version_rejects_two_segments() {
    assert_eq!(parse_version("weidao v1.2"), FALLBACK_VERSION);
}

/// 当前进程的版本号应当与 Cargo 包版本一致
#[test]
fn test_current_version_matches_package() {
    assert_eq!(current_version(), env!("CARGO_PKG_VERSION"));
}

/// 版本比较用例
#[rstest]
#[case("0.2.0", "0.2.1", true)]
#[case("0.2.0", "0.3.0", true)]
#[case("0.2.0", "1.0.0", true)]
#[case("0.2.0", "0.2.0", false)]
#[case("1.0.0", "0.9.9", false)]
#[case("0.2.0", "0.3.0-beta.1", true)]
// 非法 semver 走逐段数字比较
#[case("abc", "0.1.0", true)]
#[case("1.2", "1.3", true)]
#[case("1.3", "1.2", false)]
fn test_is_newer_version(#[case] current: &str, #[case] latest: &str, #[case] expected: bool) {
    assert_eq!(is_newer_version(current, latest), expected);
}

/// tag 前缀处理
#[rstest]
#[case("v0.3.0", "0.3.0")]
#[case("0.3.0", "0.3.0")]
#[case("v1.0.0-rc.1", "1.0.0-rc.1")]
fn test_normalize_tag(#[case] tag: &str, #[case] expected: &str) {
    assert_eq!(normalize_tag(tag), expected);
}

/// 正常的 Releases API 响应解析出 tag、链接与说明
#[tokio::test]
async fn test_fetch_latest_release_success() {
    let _mock = mockito::mock("GET", "/repos/xieisabug/weidao/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "tag_name": "v0.3.0",
                "html_url": "https://github.com/xieisabug/weidao/releases/tag/v0.3.0",
                "body": "修复若干问题"
            }"#,
        )
        .create();

    let release =
        fetch_latest_release(&mockito::server_url(), "xieisabug/weidao").await.unwrap();

    assert_eq!(release.tag_name, "v0.3.0");
    assert!(release.html_url.contains("/releases/tag/v0.3.0"));
    assert_eq!(release.body.as_deref(), Some("修复若干问题"));
}

/// body 缺失时解析不报错
///
/// 各用例使用不同的仓库路径，避免共享 mock 服务器时互相干扰。
#[tokio::test]
async fn test_fetch_latest_release_without_body() {
    let _mock = mockito::mock("GET", "/repos/xieisabug/weidao-nobody/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"tag_name": "v0.2.1", "html_url": "https://example.com", "body": null}"#)
        .create();

    let release =
        fetch_latest_release(&mockito::server_url(), "xieisabug/weidao-nobody").await.unwrap();

    assert_eq!(release.body, None);
}

/// 非 2xx 状态码返回网络错误
#[tokio::test]
async fn test_fetch_latest_release_http_error() {
    let _mock = mockito::mock("GET", "/repos/xieisabug/weidao-missing/releases/latest")
        .with_status(404)
        .create();

    let result = fetch_latest_release(&mockito::server_url(), "xieisabug/weidao-missing").await;
    assert!(result.is_err());
}

/// 版本状态只在第一次访问时初始化
#[tokio::test]
async fn test_version_state_lazy_init_once() {
    let state = VersionState::new();
    assert!(state.current().await.is_none());

    let first = state.get_or_init("0.2.0".to_string()).await;
    assert_eq!(first.current, "0.2.0");
    assert_eq!(first.latest, "0.2.0");
    assert!(!first.has_update);
    assert!(first.release_url.is_empty());

    // 第二次传入不同版本也不会重新初始化
    let second = state.get_or_init("9.9.9".to_string()).await;
    assert_eq!(second, first);
}

/// 更新检查结果覆盖缓存
#[tokio::test]
async fn test_version_state_set_overrides() {
    let state = VersionState::new();
    let mut info = state.get_or_init("0.2.0".to_string()).await;

    info.latest = "0.3.0".to_string();
    info.has_update = true;
    info.release_url = "https://example.com/releases".to_string();
    state.set(info.clone()).await;

    assert_eq!(state.current().await, Some(info));
}
