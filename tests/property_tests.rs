//! Property tests: the automaton against a brute-force alignment check

use proptest::prelude::*;
use wildscan::{AutomatonBuilder, TableKind};

/// Every start where each non-wildcard pattern byte equals the text byte
fn naive(pattern: &[u8], text: &[u8]) -> Vec<u64> {
    if pattern.is_empty() {
        return (0..text.len() as u64).collect();
    }
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&start| {
            pattern
                .iter()
                .zip(&text[start..])
                .all(|(&p, &t)| p == b'?' || p == t)
        })
        .map(|start| start as u64)
        .collect()
}

/// Small alphabet so segments actually recur in the text
fn pattern_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c', b'?']), 0..12)
}

fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 0..200)
}

proptest! {
    #[test]
    fn matches_naive(pattern in pattern_strategy(), text in text_strategy()) {
        let automaton = AutomatonBuilder::new().build(&pattern).unwrap();
        prop_assert_eq!(automaton.match_all(&text), naive(&pattern, &text));
    }

    #[test]
    fn sparse_matches_naive(pattern in pattern_strategy(), text in text_strategy()) {
        let automaton = AutomatonBuilder::new()
            .table(TableKind::Sparse)
            .build(&pattern)
            .unwrap();
        prop_assert_eq!(automaton.match_all(&text), naive(&pattern, &text));
    }

    #[test]
    fn streaming_equals_batch(
        pattern in pattern_strategy(),
        text in text_strategy(),
        cuts in prop::collection::vec(0usize..200, 0..8),
    ) {
        let automaton = AutomatonBuilder::new().build(&pattern).unwrap();
        let batch = automaton.match_all(&text);

        let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c.min(text.len())).collect();
        cuts.sort_unstable();
        let mut matcher = automaton.matcher();
        let mut streamed = Vec::new();
        let mut start = 0;
        for cut in cuts.into_iter().chain(std::iter::once(text.len())) {
            matcher.feed_slice(&text[start..cut], &mut streamed);
            start = cut;
        }
        prop_assert_eq!(batch, streamed);
    }

    #[test]
    fn window_bounded_by_segment_count(pattern in pattern_strategy(), text in text_strategy()) {
        let automaton = AutomatonBuilder::new().build(&pattern).unwrap();
        let required = automaton.segment_count() as u32;
        let mut matcher = automaton.matcher();
        for &b in &text {
            matcher.feed(b);
            prop_assert!(matcher.window_counts().all(|c| c <= required));
        }
    }

    #[test]
    fn offsets_strictly_increasing(pattern in pattern_strategy(), text in text_strategy()) {
        let automaton = AutomatonBuilder::new().build(&pattern).unwrap();
        let offsets = automaton.match_all(&text);
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn arbitrary_bytes(pattern in prop::collection::vec(any::<u8>(), 1..6),
                       text in prop::collection::vec(any::<u8>(), 0..64)) {
        let automaton = AutomatonBuilder::new().build(&pattern).unwrap();
        prop_assert_eq!(automaton.match_all(&text), naive(&pattern, &text));
    }
}
