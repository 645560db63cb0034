//! 工具模块
//!
//! 包含日志配置等与探测无关的基础设施。

pub mod logger;
