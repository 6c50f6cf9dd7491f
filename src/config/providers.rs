//! 靜態的 LLM 供應商預設表。
//!
//! 三種線上格式不以子類表達，而是 `AuthStyle` 這個封閉和類型上的窮盡匹配
//! （見 [`crate::core::reading`]）。新增供應商格式是編譯期檢查的擴充。

use serde::{Deserialize, Serialize};

/// 供應商的鑑權/線上格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`，OpenAI 聊天補全信封。
    Bearer,
    /// `x-api-key` + `anthropic-version` 頭部，Anthropic messages 信封。
    HeaderKey,
    /// Key 作為查詢參數、模型名拼入 URL 路徑，Gemini generateContent 信封。
    QueryKey,
}

/// 供應商預設。`models` 僅供選單提示，不做強制校驗。
#[derive(Debug, Clone)]
pub struct LlmProvider {
    pub id: &'static str,
    pub name: &'static str,
    pub base_url: &'static str,
    pub default_model: &'static str,
    pub models: &'static [&'static str],
    pub auth_style: AuthStyle,
    /// 模型名是否必須拼入請求 URL 路徑而非請求體。
    pub url_contains_model: bool,
}

pub static LLM_PROVIDERS: &[LlmProvider] = &[
    LlmProvider {
        id: "openai",
        name: "OpenAI",
        base_url: "https://api.openai.com/v1/chat/completions",
        default_model: "gpt-4o",
        models: &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo", "o1-mini", "o3-mini"],
        auth_style: AuthStyle::Bearer,
        url_contains_model: false,
    },
    LlmProvider {
        id: "anthropic",
        name: "Anthropic (Claude)",
        base_url: "https://api.anthropic.com/v1/messages",
        default_model: "claude-sonnet-4-20250514",
        models: &[
            "claude-sonnet-4-20250514",
            "claude-3-5-sonnet-20241022",
            "claude-3-haiku-20240307",
        ],
        auth_style: AuthStyle::HeaderKey,
        url_contains_model: false,
    },
    LlmProvider {
        id: "gemini",
        name: "Google Gemini",
        base_url: "https://generativelanguage.googleapis.com/v1beta/models",
        default_model: "gemini-2.5-flash",
        models: &["gemini-2.5-flash", "gemini-2.5-pro", "gemini-2.0-flash"],
        auth_style: AuthStyle::QueryKey,
        url_contains_model: true,
    },
    LlmProvider {
        id: "deepseek",
        name: "DeepSeek",
        base_url: "https://api.deepseek.com/v1/chat/completions",
        default_model: "deepseek-chat",
        models: &["deepseek-chat", "deepseek-reasoner"],
        auth_style: AuthStyle::Bearer,
        url_contains_model: false,
    },
    LlmProvider {
        id: "siliconflow",
        name: "硅基流动 (SiliconFlow)",
        base_url: "https://api.siliconflow.cn/v1/chat/completions",
        default_model: "deepseek-ai/DeepSeek-V3",
        models: &[
            "deepseek-ai/DeepSeek-V3",
            "Qwen/Qwen2.5-72B-Instruct",
            "THUDM/glm-4-9b-chat",
        ],
        auth_style: AuthStyle::Bearer,
        url_contains_model: false,
    },
    LlmProvider {
        id: "volcengine",
        name: "火山引擎 (Volcengine)",
        base_url: "https://ark.cn-beijing.volces.com/api/v3/chat/completions",
        default_model: "doubao-1.5-pro-32k-250115",
        models: &["doubao-1.5-pro-32k-250115", "doubao-1.5-lite-32k-250115"],
        auth_style: AuthStyle::Bearer,
        url_contains_model: false,
    },
];

/// 預設供應商：表中的第一項。
pub fn default_provider() -> &'static LlmProvider {
    &LLM_PROVIDERS[0]
}

/// 依 id 解析供應商。未知 id 回退到預設供應商，絕不報錯。
pub fn resolve(id: &str) -> &'static LlmProvider {
    LLM_PROVIDERS
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(default_provider)
}
