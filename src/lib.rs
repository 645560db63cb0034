//! # charset_detector: 字符集探测引擎
//!
//! 一族相互独立、有状态的字节分类器（探测器），各自增量地判断
//! 字节流是否与一种字符编码一致，外加协调器用来选出最终判定的
//! 聚合契约。
//!
//! ## 特性
//!
//! - **增量探测**: 按任意分块喂入，结论与一次性喂入完全一致
//! - **独立判定**: 每个探测器只拥有私有状态，天然可并行
//! - **数值置信**: [0,1]的置信度模型，全有或全无族给出二值判定
//! - **容错设计**: 畸形输入永远不报错，只会淘汰探测器
//! - **可扩展架构**: 支持注入自定义探测器
//!
//! ## 快速开始
//!
//! 用构造器启用需要的探测器族，然后对数据进行探测：
//!
//! ```rust
//! use charset_detector::{Charset, DetectorBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut detector = DetectorBuilder::new().enable_all().build()?;
//! let result = detector.detect(b"Hello, World!")?;
//! assert_eq!(result.charset(), Charset::Ascii);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// 核心模块
pub mod core;
pub mod error;

// 工具模块
pub mod utils;

// 功能模块
#[cfg(feature = "simd-accel")]
pub mod simd;

// 构造器与探测器实现
pub mod builder;
pub mod probers;

// 重新导出核心类型
pub use crate::core::{
    charset::{Charset, CharsetFamily, CharsetInfo},
    detector::{CharsetDetector, DetectionConfig, DetectionResult, DetectionStats, DetectionStatus},
    prober::{CharsetProber, ProbingState},
};

pub use crate::builder::DetectorBuilder;
pub use crate::error::{DetectorError, Result};

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 库描述
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
