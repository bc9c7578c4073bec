#![no_main]
use libfuzzer_sys::fuzz_target;
use wildscan::{AutomatonBuilder, TableKind};

fn naive(pattern: &[u8], text: &[u8]) -> Vec<u64> {
    if pattern.is_empty() {
        return (0..text.len() as u64).collect();
    }
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&s| pattern.iter().zip(&text[s..]).all(|(&p, &t)| p == b'?' || p == t))
        .map(|s| s as u64)
        .collect()
}

fuzz_target!(|data: &[u8]| {
    // First byte picks the split between pattern and text
    if data.is_empty() {
        return;
    }
    let split = (data[0] as usize % 64).min(data.len() - 1);
    let pattern = &data[1..1 + split];
    let text = &data[1 + split..];

    let expected = naive(pattern, text);
    for table in [TableKind::Dense, TableKind::Sparse] {
        let automaton = AutomatonBuilder::new()
            .table(table)
            .build(pattern)
            .expect("patterns under the length limit always compile");
        assert_eq!(automaton.match_all(text), expected);
    }
});
