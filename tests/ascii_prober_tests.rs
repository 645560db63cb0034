//! 纯ASCII探测器测试
//!
//! 覆盖参考实现的全部边界规则：高位字节否决、转义引导否决、
//! 0xA0放行、跨分块的"~{"识别、分块不变性和reset语义。

use charset_detector::probers::PureAsciiProber;
use charset_detector::{Charset, CharsetProber, DetectorError, ProbingState};

fn feed_all(prober: &mut PureAsciiProber, data: &[u8]) -> ProbingState {
    prober.feed(data, 0, data.len()).expect("feed in range")
}

#[test]
fn test_identity() {
    let prober = PureAsciiProber::new();
    assert_eq!(prober.charset(), Charset::Ascii);
    assert_eq!(prober.charset().name(), "US-ASCII");
    assert_eq!(prober.name(), "PureAsciiProber");
    assert_eq!(prober.state(), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_clean_seven_bit_text_stays_detecting() {
    let mut prober = PureAsciiProber::new();
    let state = feed_all(&mut prober, b"Hello, World!");
    assert_eq!(state, ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_every_seven_bit_byte_except_esc_is_clean() {
    // 0x00-0x7F 去掉ESC，且避免构造"~{"相邻对
    let mut bytes: Vec<u8> = (0x00..=0x7Fu8).filter(|&b| b != 0x1B).collect();
    bytes.sort_by_key(|&b| std::cmp::Reverse(b)); // 降序排列，0x7E不会紧邻在0x7B之前
    let mut prober = PureAsciiProber::new();
    assert_eq!(feed_all(&mut prober, &bytes), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_high_bit_byte_disqualifies() {
    for high in [0x80u8, 0x9F, 0xA1, 0xC3, 0xFF] {
        let mut prober = PureAsciiProber::new();
        let data = [b'a', b'b', high, b'c'];
        assert_eq!(feed_all(&mut prober, &data), ProbingState::NotMe, "byte 0x{high:02X}");
        assert_eq!(prober.confidence(), 0.0);
    }
}

#[test]
fn test_nbsp_alone_does_not_disqualify() {
    let mut prober = PureAsciiProber::new();
    assert_eq!(feed_all(&mut prober, &[0xA0]), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_esc_alone_disqualifies() {
    let mut prober = PureAsciiProber::new();
    assert_eq!(feed_all(&mut prober, &[0x1B]), ProbingState::NotMe);
    assert_eq!(prober.confidence(), 0.0);
}

#[test]
fn test_hz_introducer_disqualifies() {
    let mut prober = PureAsciiProber::new();
    assert_eq!(feed_all(&mut prober, &[0x7E, 0x7B]), ProbingState::NotMe);
    assert_eq!(prober.confidence(), 0.0);
}

#[test]
fn test_reversed_hz_pair_is_clean() {
    let mut prober = PureAsciiProber::new();
    assert_eq!(feed_all(&mut prober, &[0x7B, 0x7E]), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_escape_after_leading_text() {
    let mut prober = PureAsciiProber::new();
    assert_eq!(feed_all(&mut prober, b"Hello\x1BWorld"), ProbingState::NotMe);
    assert_eq!(prober.confidence(), 0.0);

    let mut prober = PureAsciiProber::new();
    assert_eq!(feed_all(&mut prober, &[0x41, 0x7E, 0x7B, 0x42]), ProbingState::NotMe);
    assert_eq!(prober.confidence(), 0.0);
}

#[test]
fn test_hz_introducer_across_chunk_boundary() {
    let mut prober = PureAsciiProber::new();
    assert_eq!(feed_all(&mut prober, b"text~"), ProbingState::Detecting);
    assert_eq!(feed_all(&mut prober, b"{more"), ProbingState::NotMe);
    assert_eq!(prober.confidence(), 0.0);
}

#[test]
fn test_chunk_invariance_every_split_point() {
    let samples: [&[u8]; 5] = [
        b"plain ascii text with ~ tilde and { brace apart",
        b"bad high bit \xC3\xA9 here",
        b"escaped \x1B[0m sequence",
        b"hz pair ~{ in the middle",
        &[0xA0, b'x', 0x7E, 0x7B],
    ];
    for sample in samples {
        let mut whole = PureAsciiProber::new();
        let expected_state = feed_all(&mut whole, sample);
        let expected_confidence = whole.confidence();

        for split in 0..=sample.len() {
            let mut parts = PureAsciiProber::new();
            feed_all(&mut parts, &sample[..split]);
            let state = feed_all(&mut parts, &sample[split..]);
            assert_eq!(state, expected_state, "split at {split}");
            assert_eq!(parts.confidence(), expected_confidence, "split at {split}");
        }
    }
}

#[test]
fn test_feed_after_not_me_reaffirms_not_me() {
    let mut prober = PureAsciiProber::new();
    feed_all(&mut prober, &[0xFF]);
    assert_eq!(feed_all(&mut prober, b"perfectly clean"), ProbingState::NotMe);
    assert_eq!(prober.confidence(), 0.0);
}

#[test]
fn test_reset_restores_fresh_state() {
    let mut prober = PureAsciiProber::new();
    feed_all(&mut prober, b"~");
    feed_all(&mut prober, &[0xFF]);
    assert_eq!(prober.state(), ProbingState::NotMe);

    prober.reset();
    assert_eq!(prober.state(), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
    // reset也清掉上一字节记忆：'{'不再被当作"~{"的后半
    assert_eq!(feed_all(&mut prober, &[0x7B]), ProbingState::Detecting);

    prober.reset();
    prober.reset(); // 幂等
    assert_eq!(feed_all(&mut prober, b"Hello, World!"), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_zero_length_chunk_is_a_no_op() {
    let mut prober = PureAsciiProber::new();
    assert_eq!(prober.feed(b"abc", 1, 0).expect("in range"), ProbingState::Detecting);
    assert_eq!(prober.feed(&[], 0, 0).expect("in range"), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_offset_window_is_respected() {
    let mut prober = PureAsciiProber::new();
    // 高位字节在窗口之外
    let buf = [0xFFu8, b'o', b'k', 0xFF];
    assert_eq!(prober.feed(&buf, 1, 2).expect("in range"), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_out_of_range_is_rejected_without_state_change() {
    let mut prober = PureAsciiProber::new();
    let err = prober.feed(b"abc", 0, 4).unwrap_err();
    assert!(matches!(err, DetectorError::InvalidRange { .. }));
    assert_eq!(err.error_code(), 1001);

    let err = prober.feed(b"abc", 2, usize::MAX).unwrap_err();
    assert!(matches!(err, DetectorError::InvalidRange { .. }));

    // 拒绝发生在触碰状态之前
    assert_eq!(prober.state(), ProbingState::Detecting);
    assert_eq!(prober.confidence(), 1.0);
}

#[test]
fn test_confidence_with_status_sink() {
    let mut prober = PureAsciiProber::new();
    feed_all(&mut prober, &[0xFF]);
    let mut status = String::new();
    let confidence = prober.confidence_with_status(&mut status);
    assert_eq!(confidence, 0.0);
    assert!(status.contains("PureAsciiProber"));
    assert!(status.contains("NotMe"));
}
