//! 探测器契约模块
//!
//! 定义所有字符集探测器实现的核心trait和探测状态。

use crate::core::charset::Charset;
use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 探测状态
///
/// 三值判定。不变式：一旦到达 `NotMe` 或 `FoundIt`，状态只能通过
/// 显式 `reset` 离开；之后的 `feed` 调用不改变判定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbingState {
    /// 判定未决，更多输入可能改变结论
    Detecting,
    /// 确定匹配，协调器可以提前停止同组其他探测器
    FoundIt,
    /// 确定不匹配，探测器被永久淘汰
    NotMe,
}

impl ProbingState {
    /// 检查状态是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FoundIt | Self::NotMe)
    }

    /// 检查探测器是否还在参与判定
    pub fn is_detecting(&self) -> bool {
        matches!(self, Self::Detecting)
    }
}

impl fmt::Display for ProbingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detecting => write!(f, "Detecting"),
            Self::FoundIt => write!(f, "FoundIt"),
            Self::NotMe => write!(f, "NotMe"),
        }
    }
}

/// 字符集探测器trait
///
/// 每个具体探测器针对一个字符集做单遍、分块不变的增量分类：
/// 任意切分方式喂入同一字节序列，最终状态和置信度必须一致。
pub trait CharsetProber: Send + Sync + fmt::Debug {
    /// 探测器针对的字符集；类型的纯函数，构造后不可变
    fn charset(&self) -> Charset;

    /// 探测器名称
    fn name(&self) -> &'static str;

    /// 当前探测状态
    fn state(&self) -> ProbingState;

    /// 消费 `buf[offset..offset + length)` 并返回处理后的新状态
    ///
    /// 零长度分块是合法的空操作。`(offset, length)` 越界是参数错误，
    /// 在改变任何内部状态之前拒绝。状态已是 `NotMe` 时本调用是
    /// 重申 `NotMe` 的空操作，永远不会复活探测器。
    fn feed(&mut self, buf: &[u8], offset: usize, length: usize) -> Result<ProbingState>;

    /// 恢复到刚构造时的初始状态；幂等，可在流中间任意时刻调用
    fn reset(&mut self);

    /// 基于至今喂入的全部字节返回置信度，取值 [0.0, 1.0]
    ///
    /// 不改变状态，可在 `feed` 调用之间重复查询。
    fn confidence(&self) -> f32;

    /// 返回置信度，同时向诊断接收器写入人类可读的状态文本
    ///
    /// 诊断输出不影响返回值；写入失败被忽略。
    fn confidence_with_status(&self, sink: &mut dyn fmt::Write) -> f32 {
        let confidence = self.confidence();
        let _ = write!(
            sink,
            "{}: state={} confidence={:.3}",
            self.name(),
            self.state(),
            confidence
        );
        confidence
    }
}

/// 校验 `(offset, length)` 并返回对应的子切片
///
/// 所有探测器在触碰内部状态之前先经过这里。
pub(crate) fn checked_chunk<'a>(
    buf: &'a [u8],
    offset: usize,
    length: usize,
) -> Result<&'a [u8]> {
    let end = offset
        .checked_add(length)
        .ok_or_else(|| DetectorError::invalid_range(offset, length, buf.len()))?;
    if end > buf.len() {
        return Err(DetectorError::invalid_range(offset, length, buf.len()));
    }
    Ok(&buf[offset..end])
}
