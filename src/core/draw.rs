use crate::domain::model::{CardRecord, DrawnCard, Spread};
use crate::utils::error::{OracleError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// 預設逆位機率。依觀察到的模型行為調校，視為配置常量而非鐵律。
pub const DEFAULT_REVERSED_RATE: f64 = 0.4;

/// 抽牌引擎：對目錄做不放回抽樣，並為每張牌獨立決定正逆位。
///
/// 純函數：輸出只取決於目錄、牌陣與注入的熵源，無副作用。
#[derive(Debug, Clone, Copy)]
pub struct DrawEngine {
    reversed_rate: f64,
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self {
            reversed_rate: DEFAULT_REVERSED_RATE,
        }
    }
}

impl DrawEngine {
    pub fn with_reversed_rate(reversed_rate: f64) -> Self {
        Self { reversed_rate }
    }

    /// 為牌陣的每個位置各抽一張牌。
    ///
    /// 先對整副目錄做一次均勻隨機排列（Fisher-Yates；絕不可用隨機比較器排序，
    /// 那是有偏的），取前 N 張依序綁定到牌陣位置。正逆位在排列之後逐張獨立抽取。
    pub fn draw<R: Rng + ?Sized>(
        &self,
        catalog: &[CardRecord],
        spread: &Spread,
        rng: &mut R,
    ) -> Result<Vec<DrawnCard>> {
        let wanted = spread.positions.len();
        if wanted > catalog.len() {
            return Err(OracleError::Configuration {
                message: format!(
                    "spread '{}' needs {} cards but the catalog only holds {}",
                    spread.id,
                    wanted,
                    catalog.len()
                ),
            });
        }

        let mut indices: Vec<usize> = (0..catalog.len()).collect();
        indices.shuffle(rng);

        let mut drawn = Vec::with_capacity(wanted);
        for (position, &index) in spread.positions.iter().zip(indices.iter()) {
            let is_reversed = rng.random::<f64>() < self.reversed_rate;
            drawn.push(DrawnCard {
                card: catalog[index].clone(),
                is_reversed,
                position_name: position.name.clone(),
                position_meaning: position.meaning.clone(),
            });
        }

        Ok(drawn)
    }
}
