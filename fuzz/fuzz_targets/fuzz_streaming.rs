#![no_main]
use libfuzzer_sys::fuzz_target;
use wildscan::Automaton;

fuzz_target!(|data: &[u8]| {
    // Layout: [pattern_len, chunk_len, pattern..., text...]
    if data.len() < 2 {
        return;
    }
    let pattern_len = (data[0] as usize % 32).min(data.len() - 2);
    let chunk_len = (data[1] as usize).max(1);
    let pattern = &data[2..2 + pattern_len];
    let text = &data[2 + pattern_len..];

    let automaton = match Automaton::build(pattern, b'?') {
        Ok(a) => a,
        Err(_) => return,
    };
    let batch = automaton.match_all(text);

    let mut matcher = automaton.matcher();
    let mut streamed = Vec::new();
    for chunk in text.chunks(chunk_len) {
        matcher.feed_slice(chunk, &mut streamed);
    }
    assert_eq!(batch, streamed);

    let required = automaton.segment_count() as u32;
    assert!(matcher.window_counts().all(|c| c <= required));
});
