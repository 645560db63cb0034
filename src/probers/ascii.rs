//! 纯ASCII探测模块
//!
//! 证明或证伪整个字节流是未转义的7位纯文本。该族的判定是
//! 全有或全无：要么流保持纯ASCII（置信度1.0），要么被一个
//! 高位字节或转义引导序列一票否决（置信度0.0）。

use crate::core::charset::Charset;
use crate::core::prober::{checked_chunk, CharsetProber, ProbingState};
use crate::error::Result;
use tracing::trace;

/// ESC控制字节，引导ISO-2022系转义文本
const ESC: u8 = 0x1B;
/// '~'，HZ-GB-2312引导序列的首字节
const TILDE: u8 = 0x7E;
/// '{'，跟在'~'之后构成HZ-GB-2312引导序列
const OPEN_BRACE: u8 = 0x7B;
/// 不间断空格，唯一被放行的高位字节
const NBSP: u8 = 0xA0;

/// 纯ASCII探测器
///
/// 携带的状态只有淘汰标志和上一个已检字节；后者用于跨分块
/// 边界识别两字节的"~{"引导序列。
#[derive(Debug)]
pub struct PureAsciiProber {
    /// 淘汰标志
    disqualified: bool,
    /// 上一个已检字节（初始哨兵为0，不会与'~'混淆）
    last_byte: u8,
}

impl PureAsciiProber {
    /// 创建新的纯ASCII探测器
    pub fn new() -> Self {
        Self {
            disqualified: false,
            last_byte: 0,
        }
    }

    /// 扫描一个分块，遇到否决字节立即停止
    fn scan(&mut self, chunk: &[u8]) {
        let mut i = 0;
        while i < chunk.len() {
            #[cfg(feature = "simd-accel")]
            {
                match crate::simd::find_suspect(&chunk[i..]) {
                    Some(skip) => {
                        if skip > 0 {
                            self.last_byte = chunk[i + skip - 1];
                        }
                        i += skip;
                    }
                    None => {
                        // 剩余字节全部干净
                        self.last_byte = chunk[chunk.len() - 1];
                        return;
                    }
                }
            }

            let byte = chunk[i];
            if byte & 0x80 != 0 && byte != NBSP {
                trace!(byte, position = i, "high-bit byte, stream is not pure ASCII");
                self.disqualified = true;
                return;
            }
            if byte == ESC || (byte == OPEN_BRACE && self.last_byte == TILDE) {
                trace!(byte, position = i, "escape introducer, handing off to escape-aware probers");
                self.disqualified = true;
                return;
            }
            self.last_byte = byte;
            i += 1;
        }
    }
}

impl Default for PureAsciiProber {
    fn default() -> Self {
        Self::new()
    }
}

impl CharsetProber for PureAsciiProber {
    fn charset(&self) -> Charset {
        Charset::Ascii
    }

    fn name(&self) -> &'static str {
        "PureAsciiProber"
    }

    fn state(&self) -> ProbingState {
        if self.disqualified {
            ProbingState::NotMe
        } else {
            ProbingState::Detecting
        }
    }

    fn feed(&mut self, buf: &[u8], offset: usize, length: usize) -> Result<ProbingState> {
        let chunk = checked_chunk(buf, offset, length)?;
        if !self.disqualified && !chunk.is_empty() {
            self.scan(chunk);
        }
        Ok(self.state())
    }

    fn reset(&mut self) {
        self.disqualified = false;
        self.last_byte = 0;
    }

    fn confidence(&self) -> f32 {
        // 全有或全无族的二值置信度
        if self.disqualified {
            0.0
        } else {
            1.0
        }
    }
}
