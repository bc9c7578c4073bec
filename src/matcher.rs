//! Sliding-window stream matcher
//!
//! The matcher drives the automaton one text byte at a time. Each segment hit
//! votes for the pattern start it implies; a window of `m` counters (one per
//! candidate start still in flight) collects the votes, and a candidate whose
//! counter reaches the segment count when it leaves the window is a match.
//!
//! Every byte does one table lookup, one vote per confirmed segment, and at
//! most one eviction, so a stream of `n` bytes costs `O(n + Z)`.
//!
//! # Streaming
//!
//! The matcher can be fed any prefix, paused, and resumed later; results are
//! the same as feeding the whole text at once.
//!
//! ```
//! use wildscan::Automaton;
//!
//! let automaton = Automaton::build(b"ab??aba", b'?')?;
//! let mut matcher = automaton.matcher();
//! let mut found = Vec::new();
//! matcher.feed_slice(b"ababa", &mut found);
//! assert!(found.is_empty());
//! matcher.feed_slice(b"caba", &mut found);
//! assert_eq!(found, vec![2]);
//! # Ok::<(), wildscan::WildscanError>(())
//! ```

use crate::automaton::Automaton;
use crate::config::EmptyPatternPolicy;
use crate::transition::StateId;

/// Streaming matcher over a borrowed [`Automaton`]
#[derive(Debug, Clone)]
pub struct StreamMatcher<'a> {
    automaton: &'a Automaton,
    state: StateId,
    /// Bytes consumed so far
    pos: u64,
    /// Circular buffer of `pattern_len` vote counters
    window: Vec<u32>,
    /// Slot holding the counter for `window_start`
    head: usize,
    /// Absolute text offset of the oldest candidate start
    window_start: u64,
    /// Votes needed for a match
    required: u32,
}

impl<'a> StreamMatcher<'a> {
    /// Matcher at the start of a stream
    pub fn new(automaton: &'a Automaton) -> Self {
        let window_len = if automaton.segment_count() == 0 {
            0
        } else {
            automaton.pattern_len()
        };
        Self {
            automaton,
            state: StateId::ROOT,
            pos: 0,
            window: vec![0; window_len],
            head: 0,
            window_start: 0,
            required: automaton.segment_count() as u32,
        }
    }

    /// Consume one byte; returns the start offset of the match it completes
    ///
    /// A byte can complete at most one candidate, so a call emits zero or one
    /// offset, and emitted offsets are strictly increasing across calls.
    #[inline]
    pub fn feed(&mut self, byte: u8) -> Option<u64> {
        self.pos += 1;
        let m = self.automaton.pattern_len() as u64;

        if self.required == 0 {
            return self.feed_without_segments(m);
        }

        self.state = self.automaton.step(self.state, byte);
        for &id in self.automaton.outputs(self.state) {
            let shift = self.automaton.segment(id).end_offset() as u64 + 1;
            // Hits that imply a start before the window are dropped
            if let Some(rel) = self.pos.checked_sub(shift + self.window_start) {
                self.vote(rel as usize);
            }
        }

        if self.pos < m {
            return None;
        }

        let complete = self.window[self.head] == self.required;
        self.window[self.head] = 0;
        self.head += 1;
        if self.head == self.window.len() {
            self.head = 0;
        }
        self.window_start += 1;

        complete.then(|| self.pos - m)
    }

    /// All-wildcard and empty patterns: every long-enough prefix ends a match
    fn feed_without_segments(&self, m: u64) -> Option<u64> {
        if m == 0 {
            return match self.automaton.config().empty_pattern {
                EmptyPatternPolicy::EveryPosition => Some(self.pos - 1),
                EmptyPatternPolicy::Never => None,
            };
        }
        (self.pos >= m).then(|| self.pos - m)
    }

    #[inline]
    fn vote(&mut self, rel: usize) {
        let len = self.window.len();
        assert!(
            rel < len,
            "segment hit outside window: rel={} window={} pos={}",
            rel,
            len,
            self.pos
        );
        let mut slot = self.head + rel;
        if slot >= len {
            slot -= len;
        }
        self.window[slot] += 1;
        debug_assert!(self.window[slot] <= self.required);
    }

    /// Feed a chunk, appending completed match offsets to `out`
    pub fn feed_slice(&mut self, bytes: &[u8], out: &mut Vec<u64>) {
        for &byte in bytes {
            if let Some(offset) = self.feed(byte) {
                out.push(offset);
            }
        }
    }

    /// Pull iterator of match offsets over a byte source
    ///
    /// ```
    /// use wildscan::Automaton;
    ///
    /// let automaton = Automaton::build(b"a", b'?')?;
    /// let mut matcher = automaton.matcher();
    /// let offsets: Vec<u64> = matcher.find_iter(b"aaa".iter().copied()).collect();
    /// assert_eq!(offsets, vec![0, 1, 2]);
    /// # Ok::<(), wildscan::WildscanError>(())
    /// ```
    pub fn find_iter<I>(&mut self, bytes: I) -> FindIter<'_, 'a, I::IntoIter>
    where
        I: IntoIterator<Item = u8>,
    {
        FindIter {
            matcher: self,
            bytes: bytes.into_iter(),
        }
    }

    /// Rewind to the start of a new stream, keeping the automaton and buffers
    pub fn reset(&mut self) {
        self.state = StateId::ROOT;
        self.pos = 0;
        self.window.fill(0);
        self.head = 0;
        self.window_start = 0;
    }

    /// Bytes consumed since creation or the last reset
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Current automaton state
    pub fn state(&self) -> StateId {
        self.state
    }

    /// Absolute offset of the oldest candidate start in the window
    pub fn window_start(&self) -> u64 {
        self.window_start
    }

    /// Vote counters in candidate order, oldest first
    pub fn window_counts(&self) -> impl Iterator<Item = u32> + '_ {
        let (tail, front) = self.window.split_at(self.head);
        front.iter().chain(tail.iter()).copied()
    }

    /// The automaton this matcher drives
    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }
}

/// Iterator returned by [`StreamMatcher::find_iter`]
#[derive(Debug)]
pub struct FindIter<'m, 'a, I> {
    matcher: &'m mut StreamMatcher<'a>,
    bytes: I,
}

impl<I: Iterator<Item = u8>> Iterator for FindIter<'_, '_, I> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        for byte in self.bytes.by_ref() {
            if let Some(offset) = self.matcher.feed(byte) {
                return Some(offset);
            }
        }
        None
    }
}
