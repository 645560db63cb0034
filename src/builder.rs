//! 探测器构造器模块
//!
//! 提供流畅的链式API来选择探测器组并配置协调器。

use crate::core::charset::Charset;
use crate::core::detector::{CharsetDetector, DetectionConfig};
use crate::core::prober::CharsetProber;
use crate::error::{DetectorError, Result};
use crate::probers::{EscapeProber, Latin1Prober, PureAsciiProber, Utf16Prober, Utf8Prober};
use std::collections::BTreeSet;

/// 探测器构造器
///
/// 提供流畅的API来配置和创建字符集协调器实例。
///
/// # 示例
///
/// ```rust
/// use charset_detector::DetectorBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut detector = DetectorBuilder::new()
///     .enable_ascii()
///     .enable_utf8()
///     .with_min_confidence(0.5)
///     .build()?;
/// let result = detector.detect(b"Hello, World!")?;
/// # Ok(())
/// # }
/// ```
pub struct DetectorBuilder {
    enabled_charsets: BTreeSet<Charset>,
    custom_probers: Vec<Box<dyn CharsetProber>>,
    config: DetectionConfig,
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorBuilder {
    /// 创建新的探测器构造器
    pub fn new() -> Self {
        Self {
            enabled_charsets: BTreeSet::new(),
            custom_probers: Vec::new(),
            config: DetectionConfig::default(),
        }
    }

    /// 启用纯ASCII探测
    pub fn enable_ascii(mut self) -> Self {
        self.enabled_charsets.insert(Charset::Ascii);
        self
    }

    /// 启用UTF-8探测
    pub fn enable_utf8(mut self) -> Self {
        self.enabled_charsets.insert(Charset::Utf8);
        self
    }

    /// 启用UTF-16探测（两种字节序）
    pub fn enable_utf16(mut self) -> Self {
        self.enabled_charsets.insert(Charset::Utf16Le);
        self.enabled_charsets.insert(Charset::Utf16Be);
        self
    }

    /// 启用windows-1252统计探测
    pub fn enable_latin1(mut self) -> Self {
        self.enabled_charsets.insert(Charset::WindowsLatin1);
        self
    }

    /// 启用转义序列族探测（HZ-GB-2312与ISO-2022系）
    pub fn enable_escape(mut self) -> Self {
        self.enabled_charsets.insert(Charset::HzGb2312);
        self.enabled_charsets.insert(Charset::Iso2022Jp);
        self.enabled_charsets.insert(Charset::Iso2022Kr);
        self.enabled_charsets.insert(Charset::Iso2022Cn);
        self
    }

    /// 启用所有内置探测器
    pub fn enable_all(self) -> Self {
        self.enable_ascii()
            .enable_utf8()
            .enable_utf16()
            .enable_latin1()
            .enable_escape()
    }

    /// 设置最小置信度阈值
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.config.min_confidence = confidence;
        self
    }

    /// 设置证据采集的字节数上限
    pub fn with_max_probe_size(mut self, size: usize) -> Self {
        self.config.max_probe_size = size;
        self
    }

    /// 添加自定义探测器
    pub fn add_custom_prober(mut self, prober: Box<dyn CharsetProber>) -> Self {
        self.custom_probers.push(prober);
        self
    }

    /// 创建高精度配置
    ///
    /// 启用全部探测器并抬高置信度阈值，宁可报告未知也不误判。
    pub fn high_accuracy(mut self) -> Self {
        self.config.min_confidence = 0.5;
        self.config.max_probe_size = 32 * 1024;
        self.enable_all()
    }

    /// 创建快速配置
    ///
    /// 只保留结构化探测器并压缩采集窗口，适合吞吐优先的场景。
    pub fn fast(mut self) -> Self {
        self.config.max_probe_size = 1024;
        self.enable_ascii().enable_utf8().enable_utf16()
    }

    /// 创建平衡配置
    pub fn balanced(mut self) -> Self {
        self.config.min_confidence = 0.2;
        self.config.max_probe_size = 8192;
        self.enable_all()
    }

    /// 验证配置
    fn validate(&self) -> Result<()> {
        if self.enabled_charsets.is_empty() && self.custom_probers.is_empty() {
            return Err(DetectorError::config_error(
                "at least one prober must be enabled",
            ));
        }
        self.config.validate()
    }

    /// 为一个启用的字符集实例化对应的探测器
    fn prober_for(charset: Charset) -> Option<Box<dyn CharsetProber>> {
        match charset {
            Charset::Ascii => Some(Box::new(PureAsciiProber::new())),
            Charset::Utf8 => Some(Box::new(Utf8Prober::new())),
            Charset::Utf16Le => Some(Box::new(Utf16Prober::le())),
            Charset::Utf16Be => Some(Box::new(Utf16Prober::be())),
            Charset::WindowsLatin1 => Some(Box::new(Latin1Prober::new())),
            Charset::HzGb2312 => Some(Box::new(EscapeProber::hz_gb2312())),
            Charset::Iso2022Jp => Some(Box::new(EscapeProber::iso_2022_jp())),
            Charset::Iso2022Kr => Some(Box::new(EscapeProber::iso_2022_kr())),
            Charset::Iso2022Cn => Some(Box::new(EscapeProber::iso_2022_cn())),
            Charset::Unknown => None,
        }
    }

    /// 构建协调器实例
    pub fn build(self) -> Result<CharsetDetector> {
        self.validate()?;

        let mut probers: Vec<Box<dyn CharsetProber>> = Vec::new();
        for charset in &self.enabled_charsets {
            if let Some(prober) = Self::prober_for(*charset) {
                probers.push(prober);
            }
        }
        probers.extend(self.custom_probers);

        CharsetDetector::new(probers, self.config)
    }
}
