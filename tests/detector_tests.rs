//! 协调器集成测试
//!
//! 覆盖锁步喂入、淘汰、提前收工、阈值回退到未知、统计信息
//! 以及协调器生命周期（feed/close/detect/reset）。

use charset_detector::{
    Charset, CharsetDetector, DetectionConfig, DetectionStatus, DetectorBuilder, DetectorError,
};

#[test]
fn test_detect_plain_ascii() {
    let mut detector = CharsetDetector::with_defaults().expect("default detector");
    let result = detector.detect(b"Hello, World!").expect("detect");
    assert_eq!(result.charset(), Charset::Ascii);
    assert_eq!(result.confidence(), 1.0);
    assert!(result.is_high_confidence());
    assert_eq!(result.bytes_probed, 13);
}

#[test]
fn test_detect_utf8_text() {
    let mut detector = CharsetDetector::with_defaults().expect("default detector");
    let result = detector
        .detect("字符集探测引擎确认完毕".as_bytes())
        .expect("detect");
    assert_eq!(result.charset(), Charset::Utf8);
    assert_eq!(result.confidence(), 1.0);
}

#[test]
fn test_found_it_short_circuits_to_done() {
    let mut detector = CharsetDetector::with_defaults().expect("default detector");
    // UTF-16LE BOM 是确定性证据
    let status = detector.feed(&[0xFF, 0xFE, 0x48, 0x00]).expect("feed");
    assert_eq!(status, DetectionStatus::Done);
    assert!(status.is_done());

    let result = detector.close().expect("close");
    assert_eq!(result.charset(), Charset::Utf16Le);
    assert_eq!(result.confidence(), 1.0);
}

#[test]
fn test_escape_sequence_wins_over_ascii() {
    let mut detector = CharsetDetector::with_defaults().expect("default detector");
    let result = detector
        .detect(b"Subject: \x1b$B$3$s$K$A$O\x1b(J")
        .expect("detect");
    assert_eq!(result.charset(), Charset::Iso2022Jp);
}

#[test]
fn test_latin1_wins_on_accented_text() {
    let mut detector = CharsetDetector::with_defaults().expect("default detector");
    let result = detector
        .detect(b"Un caf\xE9 tr\xE8s agr\xE9able \xE0 No\xEBl")
        .expect("detect");
    assert_eq!(result.charset(), Charset::WindowsLatin1);
    assert!(result.confidence() > 0.2);
}

#[test]
fn test_below_threshold_reports_unknown() {
    let mut detector = DetectorBuilder::new()
        .enable_latin1()
        .with_min_confidence(0.95)
        .build()
        .expect("build");
    let result = detector
        .detect(b"Un caf\xE9 tr\xE8s agr\xE9able")
        .expect("detect");
    assert_eq!(result.charset(), Charset::Unknown);
    assert!(result.is_unknown());
    // 未知判定仍保留最佳候选的置信度
    assert!(result.confidence() > 0.0);
    assert!(result.confidence() < 0.95);
}

#[test]
fn test_all_probers_eliminated_reports_unknown() {
    // 高位字节淘汰ASCII，代理区序列淘汰UTF-8
    let mut detector = DetectorBuilder::new()
        .enable_ascii()
        .enable_utf8()
        .build()
        .expect("build");
    let status = detector.feed(&[0xED, 0xA0, 0x80]).expect("feed");
    assert_eq!(status, DetectionStatus::Done);

    let result = detector.close().expect("close");
    assert_eq!(result.charset(), Charset::Unknown);
    assert_eq!(result.confidence(), 0.0);
}

#[test]
fn test_chunked_feed_matches_single_shot() {
    let data = b"Un caf\xE9 tr\xE8s agr\xE9able \xE0 No\xEBl".as_slice();

    let mut whole = CharsetDetector::with_defaults().expect("detector");
    let expected = whole.detect(data).expect("detect");

    let mut chunked = CharsetDetector::with_defaults().expect("detector");
    for chunk in data.chunks(3) {
        chunked.feed(chunk).expect("feed");
    }
    let result = chunked.close().expect("close");

    assert_eq!(result.charset(), expected.charset());
    assert_eq!(result.confidence().to_bits(), expected.confidence().to_bits());
}

#[test]
fn test_close_is_idempotent() {
    let mut detector = CharsetDetector::with_defaults().expect("detector");
    detector.feed(b"Hello").expect("feed");
    let first = detector.close().expect("close");
    let second = detector.close().expect("close");
    assert_eq!(first, second);
}

#[test]
fn test_close_without_feed_reports_best_idle_prober() {
    let mut detector = DetectorBuilder::new()
        .enable_latin1()
        .enable_utf8()
        .build()
        .expect("build");
    let result = detector.close().expect("close");
    // 零证据下没有候选能过阈值
    assert_eq!(result.charset(), Charset::Unknown);
    assert_eq!(result.bytes_probed, 0);
}

#[test]
fn test_max_probe_size_caps_evidence() {
    let mut detector = DetectorBuilder::new()
        .enable_all()
        .with_max_probe_size(4)
        .build()
        .expect("build");
    detector.feed(b"abcdefghij").expect("feed");
    assert_eq!(detector.bytes_probed(), 4);
    // 上限之后的喂入不再积累字节
    detector.feed(b"klmn").expect("feed");
    assert_eq!(detector.bytes_probed(), 4);
}

#[test]
fn test_probe_size_limit_hides_late_evidence() {
    // 判别序列落在采集窗口之外时不参与判定
    let mut capped = DetectorBuilder::new()
        .enable_all()
        .with_max_probe_size(4)
        .build()
        .expect("build");
    capped.feed(b"text \x1b$B").expect("feed");
    let result = capped.close().expect("close");
    assert_ne!(result.charset(), Charset::Iso2022Jp);
}

#[test]
fn test_reset_allows_reuse_and_keeps_stats() {
    let mut detector = CharsetDetector::with_defaults().expect("detector");
    detector.detect(b"Hello").expect("detect");
    detector.detect("中文文本继续探测试验".as_bytes()).expect("detect");

    let stats = detector.stats();
    assert_eq!(stats.total_detections, 2);
    assert_eq!(stats.confident_detections, 2);
    assert_eq!(stats.unknown_results, 0);
    assert_eq!(stats.charset_counts.get(&Charset::Ascii), Some(&1));
    assert_eq!(stats.charset_counts.get(&Charset::Utf8), Some(&1));
    assert!((stats.success_rate() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_stats_record_unknown() {
    let mut detector = DetectorBuilder::new()
        .enable_latin1()
        .with_min_confidence(0.99)
        .build()
        .expect("build");
    detector.detect(b"abc \xE9").expect("detect");
    detector.detect(b"Hola se\xF1or").expect("detect");

    let stats = detector.stats();
    assert_eq!(stats.total_detections, 2);
    assert_eq!(stats.unknown_results, 2);
    assert_eq!(stats.success_rate(), 0.0);
    assert_eq!(stats.most_common_charset(), None);
}

#[test]
fn test_empty_prober_set_is_rejected() {
    let err = CharsetDetector::new(Vec::new(), DetectionConfig::default()).unwrap_err();
    assert!(matches!(err, DetectorError::ConfigError { .. }));
    assert!(err.is_config_error());
    assert_eq!(err.error_code(), 1002);
}

#[test]
fn test_config_validation() {
    assert!(DetectionConfig::default().validate().is_ok());

    let bad = DetectionConfig {
        min_confidence: 1.5,
        max_probe_size: 8192,
    };
    assert!(bad.validate().is_err());

    let bad = DetectionConfig {
        min_confidence: 0.2,
        max_probe_size: 0,
    };
    assert!(bad.validate().is_err());

    // with_min_confidence 对越界值做钳制
    let clamped = DetectionConfig::new().with_min_confidence(2.0);
    assert_eq!(clamped.min_confidence, 1.0);
}

#[test]
fn test_result_serialization_round_trip() {
    let mut detector = CharsetDetector::with_defaults().expect("detector");
    let result = detector.detect(b"Hello, World!").expect("detect");

    let json = serde_json::to_string(&result).expect("serialize");
    let restored: charset_detector::DetectionResult =
        serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, result);
    assert_eq!(restored.charset(), Charset::Ascii);
}

#[test]
fn test_result_metadata_names_winning_prober() {
    let mut detector = CharsetDetector::with_defaults().expect("detector");
    let result = detector.detect(b"plain text").expect("detect");
    assert_eq!(
        result.charset_info.metadata.get("prober").map(String::as_str),
        Some("PureAsciiProber")
    );
}

#[test]
fn test_active_probers_shrinks_as_probers_drop_out() {
    let mut detector = DetectorBuilder::new()
        .enable_ascii()
        .enable_utf8()
        .enable_latin1()
        .build()
        .expect("build");
    let before = detector.active_probers();
    assert_eq!(before, 3);

    // 高位字节淘汰ASCII，其余存活
    detector.feed(b"caf\xE9").expect("feed");
    assert_eq!(detector.active_probers(), 2);
}
