//! 核心抽象模块
//!
//! 包含字符集探测的核心接口、字符集定义和协调器。

pub mod charset;
pub mod detector;
pub mod prober;

pub use charset::{Charset, CharsetFamily, CharsetInfo};
pub use detector::{
    CharsetDetector, DetectionConfig, DetectionResult, DetectionStats, DetectionStatus,
};
pub use prober::{CharsetProber, ProbingState};
