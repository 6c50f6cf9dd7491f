use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Provider returned HTTP {status} {status_text}")]
    ProviderHttp { status: u16, status_text: String },

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed provider response: {message}")]
    MalformedResponse { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 面向求問者的統一失敗訊號；底層原因只進日誌，不外洩給使用者。
    #[error("占星塔的信使遇到了迷雾。请检查 API 配置或网络连接。")]
    SignalLost {
        #[source]
        source: Box<OracleError>,
    },
}

pub type Result<T> = std::result::Result<T, OracleError>;
