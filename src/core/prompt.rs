//! 占卜提示詞構建。純函數：相同輸入必產生逐位元組相同的輸出。
//!
//! 輸出骨架（標題記號與五個固定小節）是下游清洗器與渲染層依賴的穩定介面，
//! 改動這裡必須同步檢視 [`crate::core::sanitize`]。

use crate::domain::model::{DrawnCard, Spread};

/// 佔卜回覆必須以此記號開頭；清洗器以它為最後的截斷錨點。
pub const HEADING_TOKEN: &str = "星辰密语";

/// 回覆必須依序呈現的五個小節標題。
pub const SECTION_HEADINGS: [&str; 5] = [
    "## 星辰密语（整体印象）",
    "## 逐牌深析（单牌解读）",
    "## 命运织网（牌间叙事）",
    "## 迷雾指南（行动建议）",
    "## 星语祝福（结语）",
];

/// 求問者未提問時代入的預設語句。
pub const DEFAULT_QUESTION: &str = "无具体问题——寻求整体指引";

/// 固定的占卜師人設指令，隨每次請求作為 system 角色發送。
pub const SYSTEM_PROMPT: &str = "你是一位神秘、极具洞察力的星际塔罗牌高阶解盘大师，擅长通过荣格心理学与元素变化为求问者答疑解惑。\n你必须以占卜师的口吻，全程使用第二人称“你”来称呼求问者，进行沉浸式、对话式的解盘。\n直接输出最终的占卜内容，绝不呈现任何计算、推理步骤或“思考过程”。\n返回格式必须是优美的 Markdown 文本。使用简体中文回复。";

/// 將問題、牌陣與抽牌結果渲染為結構化的自然語言指令。
pub fn build_prompt(question: &str, spread: &Spread, cards: &[DrawnCard]) -> String {
    let question = if question.trim().is_empty() {
        DEFAULT_QUESTION
    } else {
        question
    };

    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("【求问者的问题】{}", question));
    lines.push(String::new());
    lines.push(format!("【牌阵】{}——{}", spread.name, spread.description));
    lines.push(String::new());

    lines.push("【抽牌结果】".to_string());
    for (index, drawn) in cards.iter().enumerate() {
        lines.push(format!(
            "{}. 位置「{}」（{}）：{}（{}，{}）",
            index + 1,
            drawn.position_name,
            drawn.position_meaning,
            drawn.card.name_zh,
            drawn.card.name_en,
            drawn.orientation_label(),
        ));
    }
    lines.push(String::new());

    lines.push("【解读方法】".to_string());
    lines.push(
        "1. 以荣格“共时性”视角解盘：牌面是内心状态的有意义巧合，而非宿命式的吉凶预言。"
            .to_string(),
    );
    lines.push(
        "2. 元素亲和：相邻两张不同花色的牌之间，考虑火（权杖）、水（圣杯）、风（宝剑）、土（星币）的相生相克对能量流动的影响。"
            .to_string(),
    );
    lines.push("3. 数字学：结合牌面数字（王牌为一）解读所处阶段的能量节奏。".to_string());
    lines.push(
        "4. 逆位五辨：每张逆位牌必须从以下五种含义中择一解读——能量延迟、能量内收或受抑、含义彻底反转、阴影面的暴露、能量过度与矫枉过正——严禁笼统地解读为“坏运气”。"
            .to_string(),
    );
    lines.push(String::new());

    lines.push("【输出格式】".to_string());
    lines.push(format!(
        "你的回复必须以标题“{}”开头，并严格按以下顺序输出五个部分：",
        SECTION_HEADINGS[0]
    ));
    for heading in SECTION_HEADINGS {
        lines.push(heading.to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{spreads, Catalog};
    use crate::core::draw::DrawEngine;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_cards(spread: &Spread) -> Vec<DrawnCard> {
        let catalog = Catalog::embedded().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        DrawEngine::default()
            .draw(catalog.cards(), spread, &mut rng)
            .unwrap()
    }

    #[test]
    fn identical_inputs_produce_identical_output() {
        let spread = spreads::lookup("three_cards").unwrap();
        let cards = sample_cards(spread);

        let a = build_prompt("我该换工作吗？", spread, &cards);
        let b = build_prompt("我该换工作吗？", spread, &cards);
        assert_eq!(a, b);
    }

    #[test]
    fn prompt_contains_the_full_output_skeleton_in_order() {
        let spread = spreads::lookup("three_cards").unwrap();
        let cards = sample_cards(spread);
        let prompt = build_prompt("感情走向如何？", spread, &cards);

        assert!(prompt.contains(HEADING_TOKEN));
        let mut cursor = 0usize;
        for heading in SECTION_HEADINGS {
            let found = prompt[cursor..]
                .find(heading)
                .unwrap_or_else(|| panic!("missing heading {}", heading));
            cursor += found + heading.len();
        }
    }

    #[test]
    fn enumerates_every_card_with_position_and_orientation() {
        let spread = spreads::lookup("cross").unwrap();
        let cards = sample_cards(spread);
        let prompt = build_prompt("", spread, &cards);

        for (index, drawn) in cards.iter().enumerate() {
            assert!(prompt.contains(&format!("{}. 位置「{}」", index + 1, drawn.position_name)));
            assert!(prompt.contains(&drawn.position_meaning));
            assert!(prompt.contains(&drawn.card.name_zh));
            assert!(prompt.contains(&drawn.card.name_en));
        }
        assert!(prompt.contains("正位") || prompt.contains("逆位"));
    }

    #[test]
    fn empty_question_is_replaced_by_the_default_clause() {
        let spread = spreads::lookup("single_card").unwrap();
        let cards = sample_cards(spread);

        let prompt = build_prompt("", spread, &cards);
        assert!(prompt.contains(DEFAULT_QUESTION));

        let prompt = build_prompt("   ", spread, &cards);
        assert!(prompt.contains(DEFAULT_QUESTION));

        let prompt = build_prompt("事业如何？", spread, &cards);
        assert!(!prompt.contains(DEFAULT_QUESTION));
        assert!(prompt.contains("事业如何？"));
    }
}
