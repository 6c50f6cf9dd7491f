pub mod cli;
pub mod providers;

use crate::domain::ports::ConfigStorage;
use crate::utils::error::Result;
use providers::{default_provider, resolve, LlmProvider};
use serde::{Deserialize, Serialize};

/// 持久化記錄的固定命名空間（沿用既有部署的存儲鍵，勿改）。
pub const CONFIG_NAMESPACE: &str = "tarot_llm_config";

/// 當前生效的供應商選擇與憑證。以原始 JSON 鍵名持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::default_for(default_provider())
    }
}

impl LlmConfig {
    /// 綁定到指定供應商預設值的配置，憑證留空。
    pub fn default_for(provider: &LlmProvider) -> Self {
        Self {
            provider_id: provider.id.to_string(),
            api_key: String::new(),
            base_url: provider.base_url.to_string(),
            model: provider.default_model.to_string(),
        }
    }

    /// 切換生效供應商，`base_url` 與 `model` 重置為新供應商的預設值，
    /// 不保留前一個供應商的自定義值。憑證不動。
    pub fn switch_provider(&mut self, provider_id: &str) {
        let provider = resolve(provider_id);
        self.provider_id = provider.id.to_string();
        self.base_url = provider.base_url.to_string();
        self.model = provider.default_model.to_string();
    }
}

/// 載入配置。存儲缺失、讀取失敗或內容損壞一律回退到預設配置，
/// 絕不向呼叫端報錯。
pub fn load_config<S: ConfigStorage>(storage: &S) -> LlmConfig {
    match storage.read() {
        Ok(Some(raw)) => match serde_json::from_str::<LlmConfig>(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("已保存的配置无法解析，回退到默认配置: {}", e);
                LlmConfig::default()
            }
        },
        Ok(None) => LlmConfig::default(),
        Err(e) => {
            tracing::warn!("读取配置失败，回退到默认配置: {}", e);
            LlmConfig::default()
        }
    }
}

/// 保存配置。
pub fn save_config<S: ConfigStorage>(storage: &S, config: &LlmConfig) -> Result<()> {
    storage.write(&serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::cli::FileStorage;
    use tempfile::TempDir;

    #[test]
    fn missing_storage_yields_the_default_config() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        let config = load_config(&storage);
        assert_eq!(config.provider_id, default_provider().id);
        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, default_provider().base_url);
        assert_eq!(config.model, default_provider().default_model);
    }

    #[test]
    fn corrupted_storage_yields_the_default_config() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write("{not valid json!!").unwrap();

        let config = load_config(&storage);
        assert_eq!(config, LlmConfig::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        let mut config = LlmConfig::default();
        config.switch_provider("anthropic");
        config.api_key = "sk-ant-test".to_string();

        save_config(&storage, &config).unwrap();
        assert_eq!(load_config(&storage), config);
    }

    #[test]
    fn persisted_json_uses_the_original_field_names() {
        let config = LlmConfig::default();
        let raw = serde_json::to_string(&config).unwrap();
        assert!(raw.contains("\"providerId\""));
        assert!(raw.contains("\"apiKey\""));
        assert!(raw.contains("\"baseURL\""));
        assert!(raw.contains("\"model\""));
    }

    #[test]
    fn switching_provider_resets_base_url_and_model() {
        let mut config = LlmConfig::default();
        config.api_key = "sk-test".to_string();
        config.base_url = "https://my-proxy.example.com/v1".to_string();
        config.model = "my-custom-model".to_string();

        config.switch_provider("gemini");

        assert_eq!(config.provider_id, "gemini");
        assert_eq!(config.base_url, resolve("gemini").base_url);
        assert_eq!(config.model, resolve("gemini").default_model);
        // 憑證跨供應商保留
        assert_eq!(config.api_key, "sk-test");
    }

    #[test]
    fn switching_to_unknown_provider_lands_on_the_default() {
        let mut config = LlmConfig::default();
        config.switch_provider("anthropic");
        config.switch_provider("vanished-provider");

        assert_eq!(config.provider_id, default_provider().id);
        assert_eq!(config.base_url, default_provider().base_url);
    }
}
