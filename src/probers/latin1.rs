//! windows-1252统计探测模块
//!
//! 单字节统计族的探测器：维护一个一阶字符类二元组模型，
//! 按相邻字节对在西欧文本中的出现频度给出渐进置信度。
//! 单个异常字节不会淘汰探测器；只有编码空间中根本未定义的
//! 字节（windows-1252的C1空洞）才构成结构性否决。

use crate::core::charset::Charset;
use crate::core::prober::{checked_chunk, CharsetProber, ProbingState};
use crate::error::Result;
use once_cell::sync::Lazy;
use tracing::trace;

/// 字符类数量
const CLASS_NUM: usize = 8;
/// 频度档位数量
const FREQ_CAT_NUM: usize = 4;
/// 与结构化探测器同分时压低统计族的权重
const CONFIDENCE_DISCOUNT: f32 = 0.60;

/// 字符类：按大小写和是否带变音符划分字母，其余归并
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum CharClass {
    /// windows-1252未定义的码位
    Udf = 0,
    /// 非字母（控制、空白、标点、数字）
    Oth = 1,
    /// ASCII大写字母
    Asc = 2,
    /// ASCII小写字母
    Ass = 3,
    /// 带变音符的大写元音
    Acv = 4,
    /// 带变音符的大写辅音及其他大写字母
    Aco = 5,
    /// 带变音符的小写元音
    Asv = 6,
    /// 带变音符的小写辅音及其他小写字母
    Aso = 7,
}

/// 按windows-1252码表对单个字节分类
fn classify(byte: u8) -> CharClass {
    match byte {
        0x41..=0x5A => CharClass::Asc,
        0x61..=0x7A => CharClass::Ass,
        // windows-1252码表中未分配的码位
        0x81 | 0x8D | 0x8F | 0x90 | 0x9D => CharClass::Udf,
        // C1区中的字母：Š/Œ/Ž 及其小写，Ÿ
        0x8A | 0x8C | 0x8E => CharClass::Aco,
        0x9A | 0x9C | 0x9E => CharClass::Aso,
        0x9F => CharClass::Acv,
        // 大写重音区 0xC0..0xDE：元音底字母归ACV，其余归ACO，×是标点
        0xC0..=0xC5 | 0xC8..=0xCF | 0xD2..=0xD6 | 0xD9..=0xDD => CharClass::Acv,
        0xC6 | 0xC7 | 0xD0 | 0xD1 | 0xD8 | 0xDE => CharClass::Aco,
        // 小写重音区 0xDF..0xFF：÷是标点
        0xE0..=0xE5 | 0xE8..=0xEF | 0xF2..=0xF6 | 0xF9..=0xFD | 0xFF => CharClass::Asv,
        0xDF | 0xE6 | 0xE7 | 0xF0 | 0xF1 | 0xF8 | 0xFE => CharClass::Aso,
        _ => CharClass::Oth,
    }
}

/// 字节到字符类的查找表
static CHAR_TO_CLASS: Lazy<[CharClass; 256]> = Lazy::new(|| {
    let mut table = [CharClass::Oth; 256];
    for (byte, entry) in table.iter_mut().enumerate() {
        *entry = classify(byte as u8);
    }
    table
});

/// 字符类二元组频度模型
///
/// 取值0..=3：0为结构性禁止（涉及未定义码位），3为西欧文本中的
/// 常见搭配。压低"小写后跟大写"这类在真实文本中罕见的组合。
#[rustfmt::skip]
const CLASS_PAIR_MODEL: [u8; CLASS_NUM * CLASS_NUM] = [
    //      UDF OTH ASC ASS ACV ACO ASV ASO
    /*UDF*/  0,  0,  0,  0,  0,  0,  0,  0,
    /*OTH*/  0,  3,  3,  3,  3,  3,  3,  3,
    /*ASC*/  0,  3,  3,  3,  3,  3,  3,  3,
    /*ASS*/  0,  3,  3,  3,  1,  1,  3,  3,
    /*ACV*/  0,  3,  3,  3,  1,  2,  1,  2,
    /*ACO*/  0,  3,  3,  3,  3,  3,  3,  3,
    /*ASV*/  0,  3,  1,  3,  1,  1,  1,  3,
    /*ASO*/  0,  3,  1,  3,  1,  1,  3,  3,
];

/// windows-1252统计探测器
#[derive(Debug)]
pub struct Latin1Prober {
    state: ProbingState,
    last_class: CharClass,
    freq_counter: [u32; FREQ_CAT_NUM],
}

impl Latin1Prober {
    /// 创建新的windows-1252探测器
    pub fn new() -> Self {
        Self {
            state: ProbingState::Detecting,
            last_class: CharClass::Oth,
            freq_counter: [0; FREQ_CAT_NUM],
        }
    }
}

impl Default for Latin1Prober {
    fn default() -> Self {
        Self::new()
    }
}

impl CharsetProber for Latin1Prober {
    fn charset(&self) -> Charset {
        Charset::WindowsLatin1
    }

    fn name(&self) -> &'static str {
        "Latin1Prober"
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
            let class = CHAR_TO_CLASS[byte as usize];
            let freq =
                CLASS_PAIR_MODEL[self.last_class as usize * CLASS_NUM + class as usize];
            if freq == 0 {
                trace!(byte, "byte undefined in windows-1252");
                self.state = ProbingState::NotMe;
                break;
            }
            self.freq_counter[freq as usize] += 1;
            self.last_class = class;
        }
        Ok(self.state)
    }

    fn reset(&mut self) {
        self.state = ProbingState::Detecting;
        self.last_class = CharClass::Oth;
        self.freq_counter = [0; FREQ_CAT_NUM];
    }

    fn confidence(&self) -> f32 {
        if self.state == ProbingState::NotMe {
            return 0.0;
        }
        let total: u32 = self.freq_counter.iter().sum();
        if total == 0 {
            return 0.0;
        }
        // 常见搭配加分，罕见搭配重罚
        let score = self.freq_counter[3] as f32 - 20.0 * self.freq_counter[1] as f32;
        let confidence = (score / total as f32).max(0.0) * CONFIDENCE_DISCOUNT;
        confidence.clamp(0.0, 1.0)
    }
}
