//! 日志模块
//!
//! 封装tracing订阅器，提供统一的日志配置入口。库本身只通过
//! `tracing`门面发事件；是否安装订阅器由使用方决定。

use crate::error::{DetectorError, Result};
use once_cell::sync::OnceCell;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// 错误
    Error,
    /// 警告
    Warn,
    /// 信息
    Info,
    /// 调试
    Debug,
    /// 跟踪
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// 是否启用日志
    pub enabled: bool,
    /// 日志级别
    pub level: LogLevel,
    /// 是否显示事件来源模块
    pub show_target: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用彩色输出
    pub use_colors: bool,
    /// 自定义过滤指令（RUST_LOG语法），优先于level
    pub filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            show_target: true,
            show_line_number: false,
            use_colors: true,
            filter: None,
        }
    }
}

/// 生效中的全局日志配置
static ACTIVE_CONFIG: OnceCell<LoggerConfig> = OnceCell::new();

/// 初始化全局日志订阅器
///
/// 只有第一次调用会安装订阅器；重复调用是空操作。
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    if !config.enabled {
        ACTIVE_CONFIG.get_or_init(|| config.clone());
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_target(config.show_target)
        .with_line_number(config.show_line_number)
        .with_ansi(config.use_colors);

    let install_result = match &config.filter {
        Some(directives) => {
            let filter = EnvFilter::try_new(directives)
                .map_err(|e| DetectorError::config_error(format!("bad log filter: {}", e)))?;
            builder.with_env_filter(filter).try_init()
        }
        None => builder
            .with_max_level(LevelFilter::from(config.level))
            .try_init(),
    };

    match install_result {
        Ok(()) => {
            ACTIVE_CONFIG.get_or_init(|| config);
            Ok(())
        }
        // 已有订阅器时保持现状
        Err(_) => Ok(()),
    }
}

/// 获取生效中的日志配置
pub fn active_config() -> Option<&'static LoggerConfig> {
    ACTIVE_CONFIG.get()
}

/// 构建器模式的日志配置
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// 创建新的配置构建器
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
        }
    }

    /// 设置是否启用日志
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// 设置日志级别
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// 设置是否显示事件来源模块
    pub fn show_target(mut self, show: bool) -> Self {
        self.config.show_target = show;
        self
    }

    /// 设置是否显示行号
    pub fn show_line_number(mut self, show: bool) -> Self {
        self.config.show_line_number = show;
        self
    }

    /// 设置是否使用彩色输出
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.config.use_colors = use_colors;
        self
    }

    /// 设置自定义过滤指令
    pub fn filter<S: Into<String>>(mut self, directives: S) -> Self {
        self.config.filter = Some(directives.into());
        self
    }

    /// 构建配置
    pub fn build(self) -> LoggerConfig {
        self.config
    }

    /// 构建并初始化日志器
    pub fn init(self) -> Result<()> {
        init_logger(self.config)
    }
}

/// 创建禁用日志的配置
pub fn disabled_config() -> LoggerConfig {
    LoggerConfig {
        enabled: false,
        ..Default::default()
    }
}

/// 创建开发环境的日志配置
pub fn dev_config() -> LoggerConfig {
    LoggerConfigBuilder::new()
        .level(LogLevel::Trace)
        .show_target(true)
        .show_line_number(true)
        .use_colors(true)
        .build()
}

/// 创建生产环境的日志配置
pub fn prod_config() -> LoggerConfig {
    LoggerConfigBuilder::new()
        .level(LogLevel::Info)
        .show_target(false)
        .show_line_number(false)
        .use_colors(false)
        .build()
}
