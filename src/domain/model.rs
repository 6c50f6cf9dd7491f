use serde::{Deserialize, Serialize};

/// 大阿卡纳 / 小阿卡纳
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcanaType {
    Major,
    Minor,
}

/// 小阿卡纳花色（火/水/风/土）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Court {
    Page,
    Knight,
    Queen,
    King,
}

/// 一張牌的靜態屬性，由資產目錄在啟動時載入，之後不再變動。
///
/// 不變量：`suit` 非空 ⇔ `arcana == Minor`（由 [`crate::catalog::Catalog`] 在載入時驗證）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    #[serde(rename = "nameEn")]
    pub name_en: String,
    #[serde(rename = "nameZh")]
    pub name_zh: String,
    #[serde(rename = "type")]
    pub arcana: ArcanaType,
    pub suit: Option<Suit>,
    pub pip: Option<String>,
    pub court: Option<Court>,
    /// 資產引用，由外部展示層解析，本核心不讀取。
    pub image: String,
}

/// 牌陣中的一個位置。`x`/`y` 僅供展示層排版，對解讀語義無影響。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadPosition {
    pub id: String,
    pub name: String,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// 具名牌陣。位置順序即解讀順序（例如：過去 → 現在 → 未來）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spread {
    pub id: String,
    pub name: String,
    pub description: String,
    pub positions: Vec<SpreadPosition>,
}

/// 一次抽牌中被綁定到某個位置的牌，隨抽牌會話生滅。
#[derive(Debug, Clone)]
pub struct DrawnCard {
    pub card: CardRecord,
    pub is_reversed: bool,
    pub position_name: String,
    pub position_meaning: String,
}

impl DrawnCard {
    pub fn orientation_label(&self) -> &'static str {
        if self.is_reversed {
            "逆位"
        } else {
            "正位"
        }
    }
}
