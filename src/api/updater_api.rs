use regex::Regex;
use serde::Deserialize;
use tauri::State;
use tracing::{info, instrument, warn};

use crate::api::system_api::{app_info_string, open_url_with_clipboard_fallback};
use crate::errors::AppError;
use crate::state::version_state::{VersionInfo, VersionState};

/// app info 解析失败时使用的版本号
pub const FALLBACK_VERSION: &str = "0.2.0";

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_REPO: &str = "xieisabug/weidao";

/// GitHub Release 信息
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubRelease {
    pub tag_name: String,
    pub html_url: String,
    pub body: Option<String>,
}

/// 从 app info 字符串里提取 vX.Y.Z 形式的版本号，失败时回退常量
pub fn parse_version(app_info: &str) -> String {
    Regex::new(r"v(\d+\.\d+\.\d+)")
        .ok()
        .and_then(|re| {
            re.captures(app_info).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
        })
        .unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

/// 当前进程的版本号
pub fn current_version() -> String {
    parse_version(&app_info_string())
}

/// 比较版本号，latest 比 current 新时返回 true
///
/// 双方都是合法 semver 时用 semver 比较，否则退化为逐段数字比较。
pub fn is_newer_version(current: &str, latest: &str) -> bool {
    match (semver::Version::parse(current), semver::Version::parse(latest)) {
        (Ok(current), Ok(latest)) => latest > current,
        _ => {
            let current_parts: Vec<&str> = current.split('.').collect();
            let latest_parts: Vec<&str> = latest.split('.').collect();
            for i in 0..3 {
                let c = current_parts.get(i).and_then(|s| s.parse::<u32>().ok()).unwrap_or(0);
                let l = latest_parts.get(i).and_then(|s| s.parse::<u32>().ok()).unwrap_or(0);
                if l > c {
                    return true;
                } else if l < c {
                    return false;
                }
            }
            false
        }
    }
}

/// 从 GitHub Releases API 获取最新 Release
pub(crate) async fn fetch_latest_release(
    api_base: &str,
    repo: &str,
) -> Result<GitHubRelease, AppError> {
    let url = format!("{}/repos/{}/releases/latest", api_base, repo);
    info!(repo = %repo, "Checking latest release");

    let client = reqwest::Client::builder()
        .user_agent("weidao-app")
        .build()
        .map_err(|e| AppError::Network(format!("创建客户端失败: {}", e)))?;

    let response = client
        .get(&url)
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .await
        .map_err(|e| AppError::Network(format!("请求失败: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Network(format!("GitHub API 返回错误: {}", response.status())));
    }

    response.json().await.map_err(|e| AppError::Network(format!("解析响应失败: {}", e)))
}

/// 去掉 release tag 的 v 前缀
pub(crate) fn normalize_tag(tag_name: &str) -> String {
    tag_name.strip_prefix('v').unwrap_or(tag_name).to_string()
}

/// 获取版本信息（未初始化时以当前版本惰性初始化，每个进程只发生一次）
#[tauri::command]
#[instrument(skip(state))]
pub async fn get_version_info(state: State<'_, VersionState>) -> Result<VersionInfo, String> {
    Ok(state.get_or_init(current_version()).await)
}

/// 检查更新并刷新缓存的版本信息
#[tauri::command]
#[instrument(skip(state))]
pub async fn check_update(state: State<'_, VersionState>) -> Result<VersionInfo, String> {
    let current = state.get_or_init(current_version()).await.current;

    let release = fetch_latest_release(GITHUB_API_BASE, GITHUB_REPO)
        .await
        .map_err(|e| e.to_string())?;
    let latest = normalize_tag(&release.tag_name);
    let has_update = is_newer_version(&current, &latest);
    info!(current = %current, latest = %latest, has_update, "Update check finished");

    let updated = VersionInfo {
        current,
        latest,
        has_update,
        release_url: release.html_url,
        release_notes: release.body.unwrap_or_default(),
    };
    state.set(updated.clone()).await;
    Ok(updated)
}

/// 打开缓存的 Release 页面
#[tauri::command]
#[instrument(skip(state))]
pub async fn open_release_page(state: State<'_, VersionState>) -> Result<(), String> {
    let info = state.current().await.ok_or("尚未检查更新")?;
    if info.release_url.is_empty() {
        warn!("Release URL not available yet");
        return Err("尚无可打开的发布页面，请先检查更新".to_string());
    }
    open_url_with_clipboard_fallback(&info.release_url)
}
