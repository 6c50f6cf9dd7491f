//! 清理大模型返回內容中的「思考過程」洩漏。
//!
//! 這是分層的盡力而為啟發式：它假設目標模型大致遵循了提示詞的輸出契約。
//! 不要把它強化成嚴格保證——過度擬合單一模型的怪癖本身就是風險。

use crate::core::prompt::HEADING_TOKEN;
use regex::Regex;

/// 已知的推理定界標籤名。隨觀察到的模型行為調校，視為配置常量。
pub const REASONING_TAG_NAMES: [&str; 2] = ["thought", "think"];

/// 已知的行首推理段落標記（後接空行）。
pub const REASONING_LABELS: [&str; 2] = ["思考过程：", "Thought:"];

/// 依序清理模型輸出：
/// 1. 刪除成對的推理定界標籤（大小寫不敏感、非貪婪、可跨行）；
/// 2. 刪除開頭的標記式推理段落（以空行結束）；
/// 3. 無論前兩步是否命中，定位標題記號的首次出現（容忍緊貼在前的
///    markdown 標題符、粗體符或方括號強調符），丟棄其之前的一切；
/// 4. 修剪首尾空白。
///
/// 冪等：`sanitize(sanitize(x)) == sanitize(x)`。輸入完全不含標題記號時，
/// 僅做前兩步與修剪，絕不誤截。
pub fn sanitize(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut cleaned = content.to_string();

    for tag in REASONING_TAG_NAMES {
        let re = Regex::new(&format!(r"(?is)<{tag}>.*?</{tag}>")).unwrap();
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }

    for label in REASONING_LABELS {
        let re = Regex::new(&format!(r"(?is)\A\s*{}[\s\S]*?\n\n", regex::escape(label))).unwrap();
        cleaned = re.replace(&cleaned, "").into_owned();
    }

    // 不帶標籤的推理模型會把大段思考直接打印在最前面；
    // 以標準占卜標題為錨點抹除其之前的所有囈語。
    let heading = Regex::new(&format!(r"(?:#+|\*\*|【)\s*{}", HEADING_TOKEN)).unwrap();
    if let Some(found) = heading.find(&cleaned) {
        if found.start() > 0 {
            cleaned.replace_range(..found.start(), "");
        }
    }

    cleaned.trim().to_string()
}
