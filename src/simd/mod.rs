//! SIMD加速扫描模块
//!
//! 使用SIMD指令加速纯ASCII探测器的字节扫描。对干净的7位文本，
//! 扫描可以整批跳过不含可疑字节的区段；命中可疑字节后回退到
//! 标量路径做精确判定，结果与纯标量扫描逐位一致。

use wide::u8x16;

/// 向量化批宽度
const LANES: usize = 16;

/// 标量判定：字节是否需要精确检查
///
/// 可疑字节包括高位置位的字节（0xA0在标量路径再放行）、
/// ESC (0x1B) 和 '{' (0x7B，是否构成HZ引导取决于前一字节)。
#[inline]
pub fn is_suspect(byte: u8) -> bool {
    byte & 0x80 != 0 || byte == 0x1B || byte == 0x7B
}

/// 查找第一个可疑字节的下标
///
/// 返回 `None` 表示整个切片都是无需检查的干净字节。
pub fn find_suspect(data: &[u8]) -> Option<usize> {
    let high_bit = u8x16::splat(0x80);
    let zero = u8x16::splat(0);
    let esc = u8x16::splat(0x1B);
    let brace = u8x16::splat(0x7B);

    let mut index = 0;
    while index + LANES <= data.len() {
        let mut block = [0u8; LANES];
        block.copy_from_slice(&data[index..index + LANES]);
        let vector = u8x16::from(block);

        // 高位为0的通道在cmp_eq下得到全1，取反得到高位命中掩码
        let ascii_clean = (vector & high_bit).cmp_eq(zero);
        let suspect = !ascii_clean | vector.cmp_eq(esc) | vector.cmp_eq(brace);

        let mask = suspect.to_array();
        if let Some(lane) = mask.iter().position(|&m| m != 0) {
            return Some(index + lane);
        }
        index += LANES;
    }

    data[index..]
        .iter()
        .position(|&b| is_suspect(b))
        .map(|tail| index + tail)
}
