//! 解讀客戶端：構建提示詞 → 依供應商鑑權風格分派單次 HTTP 請求 →
//! 解析供應商響應信封 → 清洗 → 回傳正文。
//!
//! 每次呼叫只做一次外發請求（或一次模擬延遲的佔位路徑），無重試、無共享
//! 可變狀態，可安全地對獨立的抽牌會話並發呼叫。

use crate::config::providers::{self, AuthStyle};
use crate::config::LlmConfig;
use crate::core::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::core::sanitize::sanitize;
use crate::domain::model::{DrawnCard, Spread};
use crate::utils::error::{OracleError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// 未配置 API Key 時的佔位回覆所標示的模式名。
pub const PLACEHOLDER_MARKER: &str = "静默观测";

/// 佔位路徑的預設模擬延遲。
pub const DEFAULT_PLACEHOLDER_DELAY: Duration = Duration::from_millis(1500);

pub struct ReadingClient {
    client: reqwest::Client,
    config: LlmConfig,
    placeholder_delay: Duration,
}

impl ReadingClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            placeholder_delay: DEFAULT_PLACEHOLDER_DELAY,
        }
    }

    /// 調整佔位路徑的模擬延遲（測試用）。
    pub fn with_placeholder_delay(mut self, delay: Duration) -> Self {
        self.placeholder_delay = delay;
        self
    }

    /// 為一次抽牌結果取得占卜解讀。
    ///
    /// 未配置 API Key 時不做任何網路 I/O，延遲後回傳佔位解讀，
    /// 讓呼叫端的流程與配置了真實後端時完全一致。
    pub async fn get_reading(
        &self,
        question: &str,
        spread: &Spread,
        cards: &[DrawnCard],
    ) -> Result<String> {
        if cards.is_empty() {
            return Err(OracleError::Configuration {
                message: "cannot request a reading for an empty draw".to_string(),
            });
        }

        let prompt = build_prompt(question, spread, cards);
        tracing::debug!("生成的占卜提示词：\n{}", prompt);

        if self.config.api_key.is_empty() {
            tokio::time::sleep(self.placeholder_delay).await;
            return Ok(placeholder_reading(&cards[0]));
        }

        match self.dispatch(&prompt).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!("占卜解盘请求失败: {}", e);
                Err(OracleError::SignalLost {
                    source: Box::new(e),
                })
            }
        }
    }

    /// 依供應商鑑權風格分派到三種線上格式之一。窮盡匹配：新增第四種格式
    /// 是編譯期檢查的擴充，不存在靜默落空。
    async fn dispatch(&self, prompt: &str) -> Result<String> {
        let provider = providers::resolve(&self.config.provider_id);
        let raw = match provider.auth_style {
            AuthStyle::Bearer => self.call_openai_compatible(prompt).await?,
            AuthStyle::HeaderKey => self.call_anthropic(prompt).await?,
            AuthStyle::QueryKey => self.call_gemini(prompt).await?,
        };
        Ok(sanitize(&raw))
    }

    // ---- OpenAI 兼容格式（OpenAI / DeepSeek / 硅基流动 / 火山引擎） ----
    async fn call_openai_compatible(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let raw = read_success_body(response).await?;
        let parsed: ChatResponse = parse_envelope(&raw)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| OracleError::MalformedResponse {
                message: "choices array is empty".to_string(),
            })
    }

    // ---- Anthropic Claude 格式 ----
    async fn call_anthropic(&self, prompt: &str) -> Result<String> {
        let body = AnthropicRequest {
            model: &self.config.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let raw = read_success_body(response).await?;
        let parsed: AnthropicResponse = parse_envelope(&raw)?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| OracleError::MalformedResponse {
                message: "content array is empty".to_string(),
            })
    }

    // ---- Google Gemini 格式（模型名拼入 URL，Key 作為查詢參數） ----
    async fn call_gemini(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let body = GeminiRequest {
            system_instruction: GeminiContent {
                parts: vec![GeminiPart {
                    text: SYSTEM_PROMPT,
                }],
            },
            contents: vec![GeminiTurn {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_TOKENS,
            },
        };

        let response = self.client.post(&url).json(&body).send().await?;

        let raw = read_success_body(response).await?;
        let parsed: GeminiResponse = parse_envelope(&raw)?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| OracleError::MalformedResponse {
                message: "candidates held no text part".to_string(),
            })
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(OracleError::ProviderHttp {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
        });
    }
    Ok(response.text().await?)
}

fn parse_envelope<'a, T: Deserialize<'a>>(raw: &'a str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| OracleError::MalformedResponse {
        message: e.to_string(),
    })
}

fn placeholder_reading(first: &DrawnCard) -> String {
    format!(
        "# ✨ 命运之轴的转动已为您开启\n\n\
         > *当前处于「{marker}」模式——请先在设置中配置您的 API Key*\n\n\
         待您注入原力（API Key），这里的文字将被真正的高维塔罗意识取代。\n\n\
         ## 🌌 星辰密语 (整体印象)\n\
         牌面展现出的能量深邃而充满变动。\n\n\
         您抽到的 **{name}**（{orientation}）暗示你需要更多的向内探寻。\n\n\
         ## 🗝️ 迷雾指南 (综合建议)\n\
         在当下的十字路口，接纳不确定性。",
        marker = PLACEHOLDER_MARKER,
        name = first.card.name_zh,
        orientation = first.orientation_label(),
    )
}

// ---- 線上格式（請求/響應信封） ----

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize)]
struct ChatCompletionMessage {
    content: String,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    text: String,
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiTurn<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiTurn<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    parts: Vec<GeminiTextPart>,
}

#[derive(Deserialize)]
struct GeminiTextPart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{spreads, Catalog};
    use crate::core::draw::DrawEngine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    fn drawn_cards(spread: &Spread) -> Vec<DrawnCard> {
        let catalog = Catalog::embedded().unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        DrawEngine::default()
            .draw(catalog.cards(), spread, &mut rng)
            .unwrap()
    }

    #[tokio::test]
    async fn empty_key_takes_the_placeholder_path_after_a_delay() {
        let spread = spreads::lookup("three_cards").unwrap();
        let cards = drawn_cards(spread);

        let config = LlmConfig {
            provider_id: "openai".to_string(),
            api_key: String::new(),
            base_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
        };
        let client =
            ReadingClient::new(config).with_placeholder_delay(Duration::from_millis(30));

        let started = Instant::now();
        let reading = client.get_reading("", spread, &cards).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(reading.contains(PLACEHOLDER_MARKER));
        assert!(reading.contains(&cards[0].card.name_zh));
        assert!(reading.contains(cards[0].orientation_label()));
    }

    #[tokio::test]
    async fn empty_draw_is_a_configuration_error() {
        let spread = spreads::lookup("single_card").unwrap();
        let client = ReadingClient::new(LlmConfig::default());

        let result = client.get_reading("问题", spread, &[]).await;
        assert!(matches!(result, Err(OracleError::Configuration { .. })));
    }

    #[test]
    fn placeholder_references_the_first_card() {
        let spread = spreads::lookup("single_card").unwrap();
        let cards = drawn_cards(spread);

        let text = placeholder_reading(&cards[0]);
        assert!(text.contains(PLACEHOLDER_MARKER));
        assert!(text.contains(&cards[0].card.name_zh));
    }
}
