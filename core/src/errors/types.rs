//! Search and transport error types with bilingual messages

use thiserror::Error;

use vc_shared::ERROR_CODE_UNKNOWN;

/// Failures raised by an HTTP transport before a response body was obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection failed: {0} | 连接失败: {0}")]
    Connect(String),

    #[error("Request timed out: {0} | 请求超时: {0}")]
    Timeout(String),

    #[error("Request failed: {0} | 请求失败: {0}")]
    Request(String),

    #[error("Failed to read response body: {0} | 读取响应失败: {0}")]
    Body(String),
}

/// Outcome of a failed subscriber search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The server answered with a non-OK code
    #[error("Server rejected search with code {code} | 服务器返回错误码 {code}")]
    Server { code: i32, message: Option<String> },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to build request body: {0} | 请求体构建失败: {0}")]
    Serialization(String),

    #[error("Failed to decode response: {0} | 响应解析失败: {0}")]
    Decode(String),

    /// A newer search on the same client replaced this one
    #[error("Search superseded by a newer request | 搜索已被新的请求取代")]
    Superseded,

    /// The search was cancelled explicitly
    #[error("Search cancelled | 搜索已取消")]
    Cancelled,
}

impl SearchError {
    /// Error code reported to callbacks: the server's code when one was
    /// received, otherwise [`ERROR_CODE_UNKNOWN`]
    pub fn code(&self) -> i32 {
        match self {
            SearchError::Server { code, .. } => *code,
            _ => ERROR_CODE_UNKNOWN,
        }
    }

    /// Whether the error came from the server rather than from this side
    pub fn is_server_error(&self) -> bool {
        matches!(self, SearchError::Server { .. })
    }

    /// Whether the search was abandoned (superseded or cancelled) rather than failed
    pub fn is_abandoned(&self) -> bool {
        matches!(self, SearchError::Superseded | SearchError::Cancelled)
    }
}
