//! 靜態牌陣註冊表。牌陣是行程生命週期內的常量，沒有修改介面。

use crate::domain::model::{Spread, SpreadPosition};
use std::sync::LazyLock;

fn position(id: &str, name: &str, meaning: &str, x: f32, y: f32) -> SpreadPosition {
    SpreadPosition {
        id: id.to_string(),
        name: name.to_string(),
        meaning: meaning.to_string(),
        x: Some(x),
        y: Some(y),
    }
}

static SPREADS: LazyLock<Vec<Spread>> = LazyLock::new(|| {
    vec![
        Spread {
            id: "single_card".to_string(),
            name: "单牌指引".to_string(),
            description: "一张牌，直指当下最核心的能量。".to_string(),
            positions: vec![position(
                "focus",
                "当下核心",
                "此刻围绕求问者最强烈的能量与课题",
                0.5,
                0.5,
            )],
        },
        Spread {
            id: "three_cards".to_string(),
            name: "时间之河".to_string(),
            description: "过去、现在、未来的因果之流。".to_string(),
            positions: vec![
                position("past", "过去", "塑造当前处境的根源与正在消退的影响", 0.2, 0.5),
                position("present", "现在", "当下的核心能量与真实处境", 0.5, 0.5),
                position("future", "未来", "顺着当前流向最可能抵达的走向", 0.8, 0.5),
            ],
        },
        Spread {
            id: "cross".to_string(),
            name: "元素十字".to_string(),
            description: "现状与阻碍之上，根基与目标之间，指向最终的结果。".to_string(),
            positions: vec![
                position("situation", "现状", "求问者当前所处的能量场", 0.5, 0.5),
                position("obstacle", "阻碍", "横亘在面前、需要被看见的挑战", 0.25, 0.5),
                position("foundation", "根基", "支撑这一切的潜意识基础", 0.5, 0.8),
                position("goal", "目标", "意识层面真正追求的方向", 0.5, 0.2),
                position("outcome", "结果", "诸力交汇之后的趋势终点", 0.75, 0.5),
            ],
        },
    ]
});

/// 依 id 查找牌陣。
pub fn lookup(id: &str) -> Option<&'static Spread> {
    SPREADS.iter().find(|s| s.id == id)
}

/// 全部已註冊的牌陣，依註冊順序。
pub fn all() -> &'static [Spread] {
    SPREADS.as_slice()
}
