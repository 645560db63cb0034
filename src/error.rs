//! 错误处理模块
//!
//! 定义字符集探测引擎中使用的所有错误类型。
//!
//! 按设计，畸形或对抗性的字节输入永远不会产生错误，它只会把探测器
//! 推向 `NotMe` 状态；错误仅用于程序级问题（非法参数、非法配置）。

use thiserror::Error;

/// 字符集探测引擎的结果类型
pub type Result<T> = std::result::Result<T, DetectorError>;

/// 探测器错误类型
#[derive(Error, Debug)]
pub enum DetectorError {
    /// feed 的 (offset, length) 超出缓冲区范围
    #[error("Invalid range: offset {offset} + length {length} exceeds buffer of {buffer_len} bytes")]
    InvalidRange {
        /// 起始偏移
        offset: usize,
        /// 请求长度
        length: usize,
        /// 缓冲区实际大小
        buffer_len: usize,
    },

    /// 配置错误
    #[error("Configuration error: {message}")]
    ConfigError {
        /// 错误消息
        message: String,
    },

    /// 内部错误
    #[error("Internal error: {message}")]
    InternalError {
        /// 错误消息
        message: String,
    },
}

impl DetectorError {
    /// 创建范围错误
    pub fn invalid_range(offset: usize, length: usize, buffer_len: usize) -> Self {
        Self::InvalidRange {
            offset,
            length,
            buffer_len,
        }
    }

    /// 创建配置错误
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// 创建内部错误
    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// 检查是否为配置相关错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// 检查是否为可恢复错误
    ///
    /// 范围错误和配置错误是调用方的参数错误，修正后可以重试；
    /// 内部错误不可恢复。
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. } | Self::ConfigError { .. }
        )
    }

    /// 获取错误代码
    pub fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRange { .. } => 1001,
            Self::ConfigError { .. } => 1002,
            Self::InternalError { .. } => 1999,
        }
    }
}

/// 从anyhow::Error转换
impl From<anyhow::Error> for DetectorError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal_error(err.to_string())
    }
}

/// 从serde_json::Error转换
impl From<serde_json::Error> for DetectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::config_error(format!("JSON error: {}", err))
    }
}
