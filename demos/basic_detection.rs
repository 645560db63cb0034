//! 基础字符集探测示例
//!
//! 演示如何使用 charset_detector 进行基本的字符集探测

use charset_detector::utils::logger::{init_logger, LogLevel, LoggerConfigBuilder};
use charset_detector::DetectorBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger(
        LoggerConfigBuilder::new()
            .level(LogLevel::Debug)
            .show_line_number(false)
            .build(),
    )?;

    println!("🔍 charset_detector 基础字符集探测示例");

    // 测试数据集
    let test_cases: Vec<(&str, &[u8])> = vec![
        ("纯ASCII文本", b"Hello, World! Just plain old text.".as_slice()),
        (
            "UTF-8中文文本",
            "字符集探测引擎：增量、无回看、分块不变。".as_bytes(),
        ),
        (
            "UTF-16LE带BOM",
            &[0xFF, 0xFE, 0x48, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F, 0x00],
        ),
        (
            "HZ-GB-2312转义文本",
            b"Mixed line ~{<:Ky2;S{#,~} back to ascii".as_slice(),
        ),
        (
            "ISO-2022-JP转义文本",
            b"Subject: \x1b$B$3$s$K$A$O\x1b(J".as_slice(),
        ),
        (
            "windows-1252西欧文本",
            b"Un caf\xE9 tr\xE8s agr\xE9able \xE0 No\xEBl".as_slice(),
        ),
    ];

    for (label, data) in test_cases {
        let mut detector = DetectorBuilder::new().enable_all().build()?;

        // 按小分块喂入，模拟流式输入
        for chunk in data.chunks(7) {
            if detector.feed(chunk)?.is_done() {
                break;
            }
        }
        let result = detector.close()?;

        println!(
            "{}: {} (置信度 {:.2}, {} 字节)",
            label,
            result.charset(),
            result.confidence(),
            result.bytes_probed
        );
        println!("  {}", serde_json::to_string(&result.charset_info)?);
    }

    Ok(())
}
