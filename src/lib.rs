pub mod catalog;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use catalog::{spreads, Catalog};
pub use config::{load_config, save_config, LlmConfig};
pub use crate::core::draw::DrawEngine;
pub use crate::core::reading::ReadingClient;
pub use utils::error::{OracleError, Result};
