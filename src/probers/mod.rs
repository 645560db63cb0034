//! 探测器实现模块
//!
//! 每个字符集族一个具体探测器，全部实现相同的
//! [`CharsetProber`](crate::core::prober::CharsetProber) 契约。

pub mod ascii;
pub mod escape;
pub mod latin1;
pub mod utf16;
pub mod utf8;

pub use ascii::PureAsciiProber;
pub use escape::EscapeProber;
pub use latin1::Latin1Prober;
pub use utf16::Utf16Prober;
pub use utf8::Utf8Prober;

use crate::core::prober::CharsetProber;

/// 构建全部内置探测器，每次探测尝试一套新实例
pub fn default_probers() -> Vec<Box<dyn CharsetProber>> {
    vec![
        Box::new(PureAsciiProber::new()),
        Box::new(Utf8Prober::new()),
        Box::new(Utf16Prober::le()),
        Box::new(Utf16Prober::be()),
        Box::new(Latin1Prober::new()),
        Box::new(EscapeProber::hz_gb2312()),
        Box::new(EscapeProber::iso_2022_jp()),
        Box::new(EscapeProber::iso_2022_kr()),
        Box::new(EscapeProber::iso_2022_cn()),
    ]
}
