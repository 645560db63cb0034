//! UTF-8探测模块
//!
//! 在UTF-8的首字节/续字节语法上运行一个显式小状态机（RFC 3629）。
//! 任何违反结构语法的序列立即淘汰；累积到足够多合法的多字节
//! 序列后给出确定匹配。

use crate::core::charset::Charset;
use crate::core::prober::{checked_chunk, CharsetProber, ProbingState};
use crate::error::Result;
use tracing::trace;

/// 达到确定匹配所需的完整多字节序列数
const FOUND_IT_SEQUENCES: u32 = 6;

/// 渐进置信度的序列计数上限，避免powi下溢
const SEQUENCE_CAP: u32 = 24;

/// UTF-8探测器
///
/// `pending` 记录还欠的续字节数；`trail_lo`/`trail_hi` 约束下一个
/// 续字节的合法窗口，用于拒绝过长编码、代理区和超出U+10FFFF的值。
#[derive(Debug)]
pub struct Utf8Prober {
    state: ProbingState,
    pending: u8,
    trail_lo: u8,
    trail_hi: u8,
    mb_sequences: u32,
}

impl Utf8Prober {
    /// 创建新的UTF-8探测器
    pub fn new() -> Self {
        Self {
            state: ProbingState::Detecting,
            pending: 0,
            trail_lo: 0x80,
            trail_hi: 0xBF,
            mb_sequences: 0,
        }
    }

    /// 处理一个首字节，返回false表示结构违例
    fn start_sequence(&mut self, byte: u8) -> bool {
        match byte {
            0x00..=0x7F => {}
            0xC2..=0xDF => {
                self.pending = 1;
            }
            0xE0 => {
                // 拒绝过长编码：首续字节必须 >= 0xA0
                self.pending = 2;
                self.trail_lo = 0xA0;
            }
            0xE1..=0xEC | 0xEE..=0xEF => {
                self.pending = 2;
            }
            0xED => {
                // 拒绝UTF-16代理区 U+D800..U+DFFF
                self.pending = 2;
                self.trail_hi = 0x9F;
            }
            0xF0 => {
                // 拒绝过长编码：首续字节必须 >= 0x90
                self.pending = 3;
                self.trail_lo = 0x90;
            }
            0xF1..=0xF3 => {
                self.pending = 3;
            }
            0xF4 => {
                // 拒绝超出 U+10FFFF 的码位
                self.pending = 3;
                self.trail_hi = 0x8F;
            }
            // 孤立续字节(0x80..0xBF)、过长首字节(0xC0/0xC1)、非法首字节(0xF5..)
            _ => return false,
        }
        true
    }

    /// 处理一个续字节，返回false表示结构违例
    fn continue_sequence(&mut self, byte: u8) -> bool {
        if byte < self.trail_lo || byte > self.trail_hi {
            return false;
        }
        self.pending -= 1;
        self.trail_lo = 0x80;
        self.trail_hi = 0xBF;
        if self.pending == 0 {
            self.mb_sequences = self.mb_sequences.saturating_add(1);
            if self.mb_sequences >= FOUND_IT_SEQUENCES {
                trace!(sequences = self.mb_sequences, "UTF-8 structure confirmed");
                self.state = ProbingState::FoundIt;
            }
        }
        true
    }
}

impl Default for Utf8Prober {
    fn default() -> Self {
        Self::new()
    }
}

impl CharsetProber for Utf8Prober {
    fn charset(&self) -> Charset {
        Charset::Utf8
    }

    fn name(&self) -> &'static str {
        "Utf8Prober"
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
            let ok = if self.pending > 0 {
                self.continue_sequence(byte)
            } else {
                self.start_sequence(byte)
            };
            if !ok {
                trace!(byte, "byte sequence violates UTF-8 grammar");
                self.state = ProbingState::NotMe;
                break;
            }
            if self.state.is_terminal() {
                break;
            }
        }
        Ok(self.state)
    }

    fn reset(&mut self) {
        self.state = ProbingState::Detecting;
        self.pending = 0;
        self.trail_lo = 0x80;
        self.trail_hi = 0xBF;
        self.mb_sequences = 0;
    }

    fn confidence(&self) -> f32 {
        match self.state {
            ProbingState::NotMe => 0.0,
            ProbingState::FoundIt => 1.0,
            ProbingState::Detecting => {
                // 每个合法多字节序列都让流更不可能是碰巧合法的其他编码
                let evidence = self.mb_sequences.min(SEQUENCE_CAP) as i32;
                0.99 * (1.0 - 0.5f32.powi(evidence))
            }
        }
    }
}
