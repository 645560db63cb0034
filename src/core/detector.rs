//! 字符集协调器模块
//!
//! 协调器持有一组探测器，把每个输入分块按锁步喂给所有仍在
//! 判定中的探测器：返回 `NotMe` 的不再被喂入，出现 `FoundIt`
//! 时整组提前收工；输入耗尽后取置信度最高的幸存者作为判定，
//! 低于阈值则报告未知。

use crate::core::charset::{Charset, CharsetInfo};
use crate::core::prober::{CharsetProber, ProbingState};
use crate::error::{DetectorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// 协调器的聚合状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionStatus {
    /// 仍有探测器在判定中，继续喂入有意义
    Detecting,
    /// 已有确定匹配或所有探测器均被淘汰，继续喂入不会改变判定
    Done,
}

impl DetectionStatus {
    /// 检查是否已收工
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// 探测配置
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// 最小置信度阈值，低于此值报告未知
    pub min_confidence: f32,
    /// 证据采集的字节数上限，超出部分不再喂给探测器
    pub max_probe_size: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.2,
            max_probe_size: 8192,
        }
    }
}

impl DetectionConfig {
    /// 创建新的探测配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置最小置信度
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// 设置证据采集上限
    pub fn with_max_probe_size(mut self, size: usize) -> Self {
        self.max_probe_size = size;
        self
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(DetectorError::config_error(
                "min_confidence must be within 0.0..=1.0",
            ));
        }
        if self.max_probe_size == 0 {
            return Err(DetectorError::config_error(
                "max_probe_size must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// 探测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// 判定出的字符集信息
    pub charset_info: CharsetInfo,
    /// 实际参与判定的字节数
    pub bytes_probed: usize,
    /// 协调器名称
    pub detector_name: String,
    /// 判定时刻
    pub detected_at: DateTime<Utc>,
}

impl DetectionResult {
    /// 创建新的探测结果
    pub fn new(charset_info: CharsetInfo, bytes_probed: usize, detector_name: String) -> Self {
        Self {
            charset_info,
            bytes_probed,
            detector_name,
            detected_at: Utc::now(),
        }
    }

    /// 获取字符集
    pub fn charset(&self) -> Charset {
        self.charset_info.charset
    }

    /// 获取置信度
    pub fn confidence(&self) -> f32 {
        self.charset_info.confidence
    }

    /// 检查是否为高置信度结果
    pub fn is_high_confidence(&self) -> bool {
        self.confidence() >= 0.8
    }

    /// 检查是否为可接受的结果
    pub fn is_acceptable(&self, min_confidence: f32) -> bool {
        self.confidence() >= min_confidence
    }

    /// 检查是否为未知判定
    pub fn is_unknown(&self) -> bool {
        self.charset_info.is_unknown()
    }
}

/// 探测统计信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionStats {
    /// 总探测次数
    pub total_detections: u64,
    /// 给出确定字符集的次数
    pub confident_detections: u64,
    /// 报告未知的次数
    pub unknown_results: u64,
    /// 各字符集判定次数
    pub charset_counts: HashMap<Charset, u64>,
}

impl DetectionStats {
    /// 创建新的统计信息
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次有判定的探测
    pub fn record_detection(&mut self, charset: Charset) {
        self.total_detections += 1;
        self.confident_detections += 1;
        *self.charset_counts.entry(charset).or_insert(0) += 1;
    }

    /// 记录一次未知结果
    pub fn record_unknown(&mut self) {
        self.total_detections += 1;
        self.unknown_results += 1;
    }

    /// 获取判定成功率
    pub fn success_rate(&self) -> f64 {
        if self.total_detections == 0 {
            0.0
        } else {
            self.confident_detections as f64 / self.total_detections as f64
        }
    }

    /// 获取最常见的判定
    pub fn most_common_charset(&self) -> Option<Charset> {
        self.charset_counts
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(charset, _)| *charset)
    }
}

/// 字符集协调器
///
/// 一次探测尝试的生命周期：构造（或 `reset`）、零或多次 `feed`、
/// 一次 `close`。`detect` 把三步合成一次调用。
#[derive(Debug)]
pub struct CharsetDetector {
    probers: Vec<Box<dyn CharsetProber>>,
    config: DetectionConfig,
    bytes_probed: usize,
    found: Option<usize>,
    result: Option<DetectionResult>,
    stats: DetectionStats,
}

impl CharsetDetector {
    /// 用给定的探测器组和配置创建协调器
    pub fn new(probers: Vec<Box<dyn CharsetProber>>, config: DetectionConfig) -> Result<Self> {
        if probers.is_empty() {
            return Err(DetectorError::config_error(
                "at least one prober is required",
            ));
        }
        config.validate()?;
        Ok(Self {
            probers,
            config,
            bytes_probed: 0,
            found: None,
            result: None,
            stats: DetectionStats::new(),
        })
    }

    /// 用全部内置探测器和默认配置创建协调器
    pub fn with_defaults() -> Result<Self> {
        Self::new(crate::probers::default_probers(), DetectionConfig::default())
    }

    /// 获取探测配置
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// 获取探测统计
    pub fn stats(&self) -> &DetectionStats {
        &self.stats
    }

    /// 至今喂入的有效字节数
    pub fn bytes_probed(&self) -> usize {
        self.bytes_probed
    }

    /// 仍在判定中的探测器数量
    pub fn active_probers(&self) -> usize {
        self.probers
            .iter()
            .filter(|p| p.state().is_detecting())
            .count()
    }

    /// 当前聚合状态
    pub fn status(&self) -> DetectionStatus {
        if self.found.is_some() || self.active_probers() == 0 {
            DetectionStatus::Done
        } else {
            DetectionStatus::Detecting
        }
    }

    /// 喂入一个输入分块
    ///
    /// 分块被转发给每个仍在判定中的探测器；已收工后的喂入是
    /// 空操作。零长度分块合法。
    pub fn feed(&mut self, chunk: &[u8]) -> Result<DetectionStatus> {
        if self.result.is_some() || self.status().is_done() || chunk.is_empty() {
            return Ok(self.status());
        }

        // 超出采集上限的字节不再提供证据
        let budget = self.config.max_probe_size.saturating_sub(self.bytes_probed);
        if budget == 0 {
            trace!(limit = self.config.max_probe_size, "probe size limit reached");
            return Ok(self.status());
        }
        let effective = &chunk[..chunk.len().min(budget)];

        for (index, prober) in self.probers.iter_mut().enumerate() {
            if !prober.state().is_detecting() {
                continue;
            }
            match prober.feed(effective, 0, effective.len())? {
                ProbingState::NotMe => {
                    debug!(prober = prober.name(), "prober eliminated");
                }
                ProbingState::FoundIt => {
                    debug!(prober = prober.name(), charset = %prober.charset(), "definitive match");
                    self.found = Some(index);
                    break;
                }
                ProbingState::Detecting => {}
            }
        }

        self.bytes_probed += effective.len();
        Ok(self.status())
    }

    /// 结束输入并给出最终判定；幂等，重复调用返回同一结果
    pub fn close(&mut self) -> Result<DetectionResult> {
        if let Some(result) = &self.result {
            return Ok(result.clone());
        }

        let (best_charset, best_confidence, best_name) = match self.found {
            Some(index) => {
                let prober = &self.probers[index];
                (prober.charset(), prober.confidence(), prober.name())
            }
            None => self
                .probers
                .iter()
                .map(|p| (p.charset(), p.confidence(), p.name()))
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .unwrap_or((Charset::Unknown, 0.0, "none")),
        };

        let mut info = if best_confidence >= self.config.min_confidence {
            self.stats.record_detection(best_charset);
            CharsetInfo::new(best_charset, best_confidence)
        } else {
            self.stats.record_unknown();
            CharsetInfo::new(Charset::Unknown, best_confidence)
        };
        info.add_metadata("prober", best_name);

        debug!(
            charset = %info.charset,
            confidence = info.confidence,
            bytes = self.bytes_probed,
            "detection finished"
        );

        let result = DetectionResult::new(
            info,
            self.bytes_probed,
            "CharsetDetector".to_string(),
        );
        self.result = Some(result.clone());
        Ok(result)
    }

    /// 一次性探测：重置、喂入、收尾
    pub fn detect(&mut self, data: &[u8]) -> Result<DetectionResult> {
        self.reset();
        self.feed(data)?;
        self.close()
    }

    /// 重置协调器和所有探测器以复用；统计信息保留
    pub fn reset(&mut self) {
        for prober in &mut self.probers {
            prober.reset();
        }
        self.bytes_probed = 0;
        self.found = None;
        self.result = None;
    }
}
