//! 字符集定义模块
//!
//! 定义探测引擎支持的字符集标识和相关信息。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 字符集类型枚举
///
/// 每个变体对应一个探测器能够给出的最终判定，标识在构造后不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Charset {
    /// 纯7位ASCII（US-ASCII）
    Ascii,
    /// UTF-8
    Utf8,
    /// UTF-16 小端序
    Utf16Le,
    /// UTF-16 大端序
    Utf16Be,
    /// windows-1252（西欧单字节）
    WindowsLatin1,
    /// HZ-GB-2312（7位转义包裹的GB2312）
    HzGb2312,
    /// ISO-2022-JP
    Iso2022Jp,
    /// ISO-2022-KR
    Iso2022Kr,
    /// ISO-2022-CN
    Iso2022Cn,
    /// 未知字符集
    Unknown,
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Charset {
    /// 获取字符集的注册名称（IANA标签）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ascii => "US-ASCII",
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::WindowsLatin1 => "windows-1252",
            Self::HzGb2312 => "HZ-GB-2312",
            Self::Iso2022Jp => "ISO-2022-JP",
            Self::Iso2022Kr => "ISO-2022-KR",
            Self::Iso2022Cn => "ISO-2022-CN",
            Self::Unknown => "Unknown",
        }
    }

    /// 获取字符集所属的探测族
    pub fn family(&self) -> CharsetFamily {
        match self {
            Self::Ascii => CharsetFamily::PureAscii,
            Self::Utf8 | Self::Utf16Le | Self::Utf16Be => CharsetFamily::Unicode,
            Self::WindowsLatin1 => CharsetFamily::SingleByte,
            Self::HzGb2312 | Self::Iso2022Jp | Self::Iso2022Kr | Self::Iso2022Cn => {
                CharsetFamily::EscapeSequence
            }
            Self::Unknown => CharsetFamily::Unknown,
        }
    }

    /// 检查编码单元是否可能超过一个字节
    pub fn is_multi_byte(&self) -> bool {
        matches!(
            self,
            Self::Utf8
                | Self::Utf16Le
                | Self::Utf16Be
                | Self::HzGb2312
                | Self::Iso2022Jp
                | Self::Iso2022Kr
                | Self::Iso2022Cn
        )
    }

    /// 检查字节流是否只使用低7位
    pub fn is_seven_bit(&self) -> bool {
        matches!(
            self,
            Self::Ascii
                | Self::HzGb2312
                | Self::Iso2022Jp
                | Self::Iso2022Kr
                | Self::Iso2022Cn
        )
    }

    /// 获取所有可探测的字符集（不含Unknown）
    pub fn all() -> Vec<Charset> {
        vec![
            Self::Ascii,
            Self::Utf8,
            Self::Utf16Le,
            Self::Utf16Be,
            Self::WindowsLatin1,
            Self::HzGb2312,
            Self::Iso2022Jp,
            Self::Iso2022Kr,
            Self::Iso2022Cn,
        ]
    }
}

/// 字符集探测族
///
/// 同族的探测器共享相同的启发式结构（参见各族的探测器实现）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharsetFamily {
    /// 纯ASCII族：全有或全无的判定
    PureAscii,
    /// Unicode族：结构化的多字节/双字节语法
    Unicode,
    /// 单字节统计族：基于字符类二元组的统计模型
    SingleByte,
    /// 转义序列族：7位流中的转义引导序列
    EscapeSequence,
    /// 未知族
    Unknown,
}

/// 字符集判定信息
///
/// 协调器聚合探测结果后产出的值对象。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharsetInfo {
    /// 字符集类型
    pub charset: Charset,
    /// 置信度 (0.0 - 1.0)
    pub confidence: f32,
    /// 检测到的特征
    pub features: Vec<String>,
    /// 额外元数据
    pub metadata: std::collections::HashMap<String, String>,
}

impl CharsetInfo {
    /// 创建新的字符集判定信息
    pub fn new(charset: Charset, confidence: f32) -> Self {
        Self {
            charset,
            confidence: confidence.clamp(0.0, 1.0),
            features: Vec::new(),
            metadata: std::collections::HashMap::new(),
        }
    }

    /// 添加特征
    pub fn add_feature<S: Into<String>>(&mut self, feature: S) {
        self.features.push(feature.into());
    }

    /// 添加元数据
    pub fn add_metadata<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata.insert(key.into(), value.into());
    }

    /// 检查置信度是否足够高
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }

    /// 检查是否包含特定特征
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// 检查是否为未知判定
    pub fn is_unknown(&self) -> bool {
        self.charset == Charset::Unknown
    }
}
