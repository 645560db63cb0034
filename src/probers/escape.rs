//! 转义序列探测模块
//!
//! 转义序列族的探测器：在7位流中监视各编码专属的转义引导序列，
//! 识别出完整的判别性序列即给出确定匹配。这些编码按构造只用
//! 低7位，任何高位字节都构成结构性否决。

use crate::core::charset::Charset;
use crate::core::prober::{checked_chunk, CharsetProber, ProbingState};
use crate::error::Result;
use tracing::trace;

/// ESC控制字节
const ESC: u8 = 0x1B;
/// 正在累积的转义序列的最大长度
const MAX_SEQ_LEN: usize = 4;
/// 识别出判别性序列后的置信度
const FOUND_CONFIDENCE: f32 = 0.99;

/// ISO-2022-JP的判别性转义序列
const ISO_2022_JP_SEQUENCES: &[&[u8]] = &[
    &[ESC, b'$', b'B'],
    &[ESC, b'$', b'@'],
    &[ESC, b'(', b'J'],
];

/// ISO-2022-KR的判别性转义序列
const ISO_2022_KR_SEQUENCES: &[&[u8]] = &[&[ESC, b'$', b')', b'C']];

/// ISO-2022-CN的判别性转义序列
const ISO_2022_CN_SEQUENCES: &[&[u8]] = &[
    &[ESC, b'$', b')', b'A'],
    &[ESC, b'$', b')', b'G'],
    &[ESC, b'$', b'*', b'H'],
];

/// 转义序列探测器
///
/// 每个实例只针对一个目标字符集；字符集标识在构造时固定。
/// HZ-GB-2312用两字节"~{"引导而非ESC序列，用独立的开关表达。
#[derive(Debug)]
pub struct EscapeProber {
    target: Charset,
    sequences: &'static [&'static [u8]],
    hz_introducer: bool,
    state: ProbingState,
    seq: [u8; MAX_SEQ_LEN],
    seq_len: usize,
    last_byte: u8,
}

impl EscapeProber {
    fn with_target(
        target: Charset,
        sequences: &'static [&'static [u8]],
        hz_introducer: bool,
    ) -> Self {
        Self {
            target,
            sequences,
            hz_introducer,
            state: ProbingState::Detecting,
            seq: [0; MAX_SEQ_LEN],
            seq_len: 0,
            last_byte: 0,
        }
    }

    /// 创建ISO-2022-JP探测器
    pub fn iso_2022_jp() -> Self {
        Self::with_target(Charset::Iso2022Jp, ISO_2022_JP_SEQUENCES, false)
    }

    /// 创建ISO-2022-KR探测器
    pub fn iso_2022_kr() -> Self {
        Self::with_target(Charset::Iso2022Kr, ISO_2022_KR_SEQUENCES, false)
    }

    /// 创建ISO-2022-CN探测器
    pub fn iso_2022_cn() -> Self {
        Self::with_target(Charset::Iso2022Cn, ISO_2022_CN_SEQUENCES, false)
    }

    /// 创建HZ-GB-2312探测器
    pub fn hz_gb2312() -> Self {
        Self::with_target(Charset::HzGb2312, &[], true)
    }

    /// 把累积中的序列与本字符集的判别序列比对
    ///
    /// 返回true表示完整匹配。前缀不再可能匹配时放弃累积；
    /// 未知的转义序列不构成否决，这些编码内部还有其他合法转义。
    fn advance_sequence(&mut self, byte: u8) -> bool {
        self.seq[self.seq_len] = byte;
        self.seq_len += 1;

        let current = &self.seq[..self.seq_len];
        let mut prefix_alive = false;
        for candidate in self.sequences {
            if *candidate == current {
                return true;
            }
            if candidate.len() > current.len() && candidate.starts_with(current) {
                prefix_alive = true;
            }
        }
        if !prefix_alive || self.seq_len == MAX_SEQ_LEN {
            self.seq_len = 0;
            // 放弃的字节若本身是ESC，则立即作为新序列的起点
            if byte == ESC {
                self.seq[0] = ESC;
                self.seq_len = 1;
            }
        }
        false
    }
}

impl CharsetProber for EscapeProber {
    fn charset(&self) -> Charset {
        self.target
    }

    fn name(&self) -> &'static str {
        match self.target {
            Charset::Iso2022Jp => "EscapeProber(ISO-2022-JP)",
            Charset::Iso2022Kr => "EscapeProber(ISO-2022-KR)",
            Charset::Iso2022Cn => "EscapeProber(ISO-2022-CN)",
            _ => "EscapeProber(HZ-GB-2312)",
        }
    }

    fn state(&self) -> ProbingState {
        self.state
    }

    fn feed(&mut self, buf: &[u8], offset: usize, length: usize) -> Result<ProbingState> {
        let chunk = checked_chunk(buf, offset, length)?;
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        for &byte in chunk {
            if byte & 0x80 != 0 {
                trace!(byte, charset = %self.target, "high-bit byte in a 7-bit-only encoding");
                self.state = ProbingState::NotMe;
                break;
            }

            if self.seq_len > 0 {
                if self.advance_sequence(byte) {
                    trace!(charset = %self.target, "distinguishing escape sequence recognized");
                    self.state = ProbingState::FoundIt;
                    break;
                }
            } else if !self.hz_introducer && byte == ESC {
                self.seq[0] = ESC;
                self.seq_len = 1;
            } else if self.hz_introducer && byte == b'{' && self.last_byte == b'~' {
                trace!("HZ-GB-2312 \"~{{\" introducer recognized");
                self.state = ProbingState::FoundIt;
                break;
            }
            self.last_byte = byte;
        }
        Ok(self.state)
    }

    fn reset(&mut self) {
        self.state = ProbingState::Detecting;
        self.seq = [0; MAX_SEQ_LEN];
        self.seq_len = 0;
        self.last_byte = 0;
    }

    fn confidence(&self) -> f32 {
        match self.state {
            ProbingState::FoundIt => FOUND_CONFIDENCE,
            ProbingState::NotMe => 0.0,
            // 未见到判别序列之前不提供正向证据
            ProbingState::Detecting => 0.0,
        }
    }
}
