use crate::utils::error::Result;

/// 配置持久化端口。讀寫單一 JSON 記錄，由呼叫端決定落地介質。
///
/// 同步介面：配置的載入/保存必須能直接在渲染設定介面的同一執行緒上呼叫。
pub trait ConfigStorage {
    /// 讀取已保存的原始配置，不存在時回傳 `Ok(None)`。
    fn read(&self) -> Result<Option<String>>;

    /// 覆寫保存原始配置。
    fn write(&self, raw: &str) -> Result<()>;
}
