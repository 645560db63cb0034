//! 分块不变性属性测试
//!
//! 对任意字节串和任意切分点，分两次喂入的终态与置信度必须和
//! 一次性喂入逐位一致；reset后的探测器必须与新构造的等价。

use charset_detector::probers::default_probers;
use charset_detector::CharsetProber;
use proptest::prelude::*;

fn feed_whole(prober: &mut dyn CharsetProber, data: &[u8]) {
    prober.feed(data, 0, data.len()).expect("feed in range");
}

proptest! {
    #[test]
    fn prop_two_chunk_feed_equals_single_feed(
        data in proptest::collection::vec(any::<u8>(), 0..96),
        split in 0usize..97,
    ) {
        let split = split.min(data.len());
        let mut whole = default_probers();
        let mut parts = default_probers();

        for (w, p) in whole.iter_mut().zip(parts.iter_mut()) {
            feed_whole(w.as_mut(), &data);
            feed_whole(p.as_mut(), &data[..split]);
            feed_whole(p.as_mut(), &data[split..]);

            prop_assert_eq!(p.state(), w.state(), "{}", w.name());
            prop_assert_eq!(
                p.confidence().to_bits(),
                w.confidence().to_bits(),
                "{}", w.name()
            );
        }
    }

    #[test]
    fn prop_many_chunk_feed_equals_single_feed(
        data in proptest::collection::vec(any::<u8>(), 0..96),
        chunk_size in 1usize..8,
    ) {
        let mut whole = default_probers();
        let mut parts = default_probers();

        for (w, p) in whole.iter_mut().zip(parts.iter_mut()) {
            feed_whole(w.as_mut(), &data);
            for chunk in data.chunks(chunk_size) {
                feed_whole(p.as_mut(), chunk);
            }

            prop_assert_eq!(p.state(), w.state(), "{}", w.name());
            prop_assert_eq!(
                p.confidence().to_bits(),
                w.confidence().to_bits(),
                "{}", w.name()
            );
        }
    }

    #[test]
    fn prop_reset_restores_fresh_behavior(
        garbage in proptest::collection::vec(any::<u8>(), 0..64),
        data in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut fresh = default_probers();
        let mut recycled = default_probers();

        for (f, r) in fresh.iter_mut().zip(recycled.iter_mut()) {
            feed_whole(r.as_mut(), &garbage);
            r.reset();

            feed_whole(f.as_mut(), &data);
            feed_whole(r.as_mut(), &data);

            prop_assert_eq!(r.state(), f.state(), "{}", f.name());
            prop_assert_eq!(
                r.confidence().to_bits(),
                f.confidence().to_bits(),
                "{}", f.name()
            );
        }
    }

    #[test]
    fn prop_terminal_states_are_absorbing(
        data in proptest::collection::vec(any::<u8>(), 0..64),
        extra in proptest::collection::vec(any::<u8>(), 1..32),
    ) {
        for prober in default_probers().iter_mut() {
            feed_whole(prober.as_mut(), &data);
            let state = prober.state();
            if state.is_terminal() {
                feed_whole(prober.as_mut(), &extra);
                prop_assert_eq!(prober.state(), state, "{}", prober.name());
            }
        }
    }
}
