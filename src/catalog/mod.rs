pub mod spreads;

use crate::domain::model::{ArcanaType, CardRecord};
use crate::utils::error::{OracleError, Result};
use std::collections::HashSet;

/// 由資產準備腳本產出的牌面目錄，卡背不在其中。
static EMBEDDED_CARDS: &str = include_str!("../../assets/cards.json");

/// 不可變的牌面目錄，行程啟動時載入一次。
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<CardRecord>,
}

impl Catalog {
    /// 載入內嵌的標準 78 張目錄。
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CARDS)
    }

    /// 從 JSON 陣列解析目錄並驗證結構不變量。
    ///
    /// 目錄是受信任的輸入，但結構錯誤必須在啟動時暴露而非在抽牌時才出錯：
    /// id 不得重複；`suit` 非空 ⇔ 小阿卡纳。
    pub fn from_json(raw: &str) -> Result<Self> {
        let cards: Vec<CardRecord> = serde_json::from_str(raw)?;

        let mut seen_ids = HashSet::new();
        for card in &cards {
            if !seen_ids.insert(card.id.as_str()) {
                return Err(OracleError::Configuration {
                    message: format!("catalog contains duplicate card id: {}", card.id),
                });
            }

            let is_minor = card.arcana == ArcanaType::Minor;
            if card.suit.is_some() != is_minor {
                return Err(OracleError::Configuration {
                    message: format!(
                        "card {} violates the arcana/suit invariant ({:?}, suit {:?})",
                        card.id, card.arcana, card.suit
                    ),
                });
            }
        }

        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
