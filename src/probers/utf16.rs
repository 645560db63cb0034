//! UTF-16探测模块
//!
//! UTF变体族的探测器：流起始处的BOM给出确定匹配；没有BOM时，
//! 按拉丁字母文本在UTF-16编码下的零字节交替模式给出渐进置信度
//! （小端序文本的NUL集中在奇数位，大端序集中在偶数位）。
//! 内容本身永远不构成否决。

use crate::core::charset::Charset;
use crate::core::prober::{checked_chunk, CharsetProber, ProbingState};
use crate::error::Result;
use tracing::trace;

/// 无BOM判定的置信度上限
const PATTERN_CONFIDENCE_CAP: f32 = 0.95;

/// 字节序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    /// 小端序
    Little,
    /// 大端序
    Big,
}

/// UTF-16探测器
///
/// 一个实例只针对一种字节序；`position` 跨分块记录流内偏移，
/// 以保持奇偶统计和BOM识别的分块不变性。
#[derive(Debug)]
pub struct Utf16Prober {
    order: ByteOrder,
    state: ProbingState,
    position: usize,
    head: [u8; 2],
    even_nuls: u32,
    odd_nuls: u32,
}

impl Utf16Prober {
    fn with_order(order: ByteOrder) -> Self {
        Self {
            order,
            state: ProbingState::Detecting,
            position: 0,
            head: [0; 2],
            even_nuls: 0,
            odd_nuls: 0,
        }
    }

    /// 创建UTF-16LE探测器
    pub fn le() -> Self {
        Self::with_order(ByteOrder::Little)
    }

    /// 创建UTF-16BE探测器
    pub fn be() -> Self {
        Self::with_order(ByteOrder::Big)
    }

    /// 本字节序期望的BOM
    fn bom(&self) -> [u8; 2] {
        match self.order {
            ByteOrder::Little => [0xFF, 0xFE],
            ByteOrder::Big => [0xFE, 0xFF],
        }
    }
}

impl CharsetProber for Utf16Prober {
    fn charset(&self) -> Charset {
        match self.order {
            ByteOrder::Little => Charset::Utf16Le,
            ByteOrder::Big => Charset::Utf16Be,
        }
    }

    fn name(&self) -> &'static str {
        match self.order {
            ByteOrder::Little => "Utf16Prober(LE)",
            ByteOrder::Big => "Utf16Prober(BE)",
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
            if self.position < 2 {
                self.head[self.position] = byte;
                if self.position == 1 && self.head == self.bom() {
                    trace!(charset = %self.charset(), "byte order mark recognized");
                    self.state = ProbingState::FoundIt;
                    self.position += 1;
                    break;
                }
            }
            if byte == 0 {
                if self.position % 2 == 0 {
                    self.even_nuls += 1;
                } else {
                    self.odd_nuls += 1;
                }
            }
            self.position += 1;
        }
        Ok(self.state)
    }

    fn reset(&mut self) {
        self.state = ProbingState::Detecting;
        self.position = 0;
        self.head = [0; 2];
        self.even_nuls = 0;
        self.odd_nuls = 0;
    }

    fn confidence(&self) -> f32 {
        match self.state {
            ProbingState::FoundIt => 1.0,
            ProbingState::NotMe => 0.0,
            ProbingState::Detecting => {
                let pairs = (self.position / 2) as f32;
                if pairs < 1.0 {
                    return 0.0;
                }
                // 期望位置上的NUL是证据，错误位置上的NUL是反证
                let (hits, misses) = match self.order {
                    ByteOrder::Little => (self.odd_nuls, self.even_nuls),
                    ByteOrder::Big => (self.even_nuls, self.odd_nuls),
                };
                let score = (hits as f32 - misses as f32) / pairs;
                (score * PATTERN_CONFIDENCE_CAP).clamp(0.0, PATTERN_CONFIDENCE_CAP)
            }
        }
    }
}
