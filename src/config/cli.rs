use crate::config::CONFIG_NAMESPACE;
use crate::domain::ports::ConfigStorage;
use crate::utils::error::Result;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "tarot-oracle")]
#[command(about = "Draw tarot spreads and ask an LLM oracle for a reading")]
pub struct CliArgs {
    /// 牌陣 id（見 --list-spreads）
    #[arg(long, default_value = "three_cards")]
    pub spread: String,

    /// 求問者的問題；留空則尋求整體指引
    #[arg(long, default_value = "")]
    pub question: String,

    /// 配置落地目錄
    #[arg(long, default_value = ".tarot-oracle")]
    pub config_dir: PathBuf,

    /// 切換生效供應商（base URL 與模型重置為該供應商預設）
    #[arg(long)]
    pub provider: Option<String>,

    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, help = "Persist the merged provider settings for later runs")]
    pub save: bool,

    #[arg(long, help = "List available spreads and exit")]
    pub list_spreads: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 檔案落地的配置存儲：`<config_dir>/tarot_llm_config.json`。
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            path: base_dir.as_ref().join(format!("{}.json", CONFIG_NAMESPACE)),
        }
    }
}

impl ConfigStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_returns_none_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("deeper"));

        storage.write("{}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
    }
}
