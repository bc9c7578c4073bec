//! The completed wildcard automaton
//!
//! An [`Automaton`] is immutable once built: it holds the total transition
//! function, the frozen output index, and the segment list the window
//! arithmetic needs. Matching state lives in [`StreamMatcher`], so one
//! automaton can serve any number of streams, including from several threads.

use crate::ac_builder::AutomatonBuilder;
use crate::config::{MatcherConfig, TableKind};
use crate::error::Result;
use crate::matcher::StreamMatcher;
use crate::output::OutputIndex;
use crate::segment::Segment;
use crate::transition::{StateId, TransitionTable, Transitions};
use serde::Serialize;

/// Completed Aho-Corasick automaton over a wildcard pattern's segments
#[derive(Debug, Clone)]
pub struct Automaton {
    table: TransitionTable,
    outputs: OutputIndex,
    segments: Vec<Segment>,
    pattern_len: usize,
    config: MatcherConfig,
}

/// Size and shape summary of an automaton
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutomatonStats {
    /// Pattern length in bytes
    pub pattern_len: usize,
    /// Number of literal segments
    pub segment_count: usize,
    /// Number of states, root included
    pub state_count: usize,
    /// States with a non-empty output set
    pub terminal_states: usize,
    /// Total (state, segment) output entries
    pub output_entries: usize,
    /// Transition table representation
    pub table: TableKind,
    /// Heap bytes used by the transition table
    pub table_bytes: usize,
    /// Heap bytes used by the output index
    pub output_bytes: usize,
}

impl Automaton {
    /// Build with default settings and the given wildcard byte
    ///
    /// ```
    /// use wildscan::Automaton;
    ///
    /// let automaton = Automaton::build(b"ab??aba", b'?')?;
    /// assert_eq!(automaton.segment_count(), 2);
    /// assert_eq!(automaton.match_all(b"ababacaba"), vec![2]);
    /// # Ok::<(), wildscan::WildscanError>(())
    /// ```
    pub fn build(pattern: &[u8], wildcard: u8) -> Result<Self> {
        AutomatonBuilder::new().wildcard(wildcard).build(pattern)
    }

    /// Build with a full configuration
    pub fn with_config(pattern: &[u8], config: &MatcherConfig) -> Result<Self> {
        AutomatonBuilder::with_config(config.clone()).build(pattern)
    }

    pub(crate) fn from_parts(
        table: TransitionTable,
        outputs: OutputIndex,
        segments: Vec<Segment>,
        pattern_len: usize,
        config: MatcherConfig,
    ) -> Self {
        Self {
            table,
            outputs,
            segments,
            pattern_len,
            config,
        }
    }

    /// Successor of `state` on `byte`; total over all states and bytes
    #[inline]
    pub fn step(&self, state: StateId, byte: u8) -> StateId {
        self.table.step(state, byte)
    }

    /// Segment ids confirmed on reaching `state`
    #[inline]
    pub fn outputs(&self, state: StateId) -> &[u32] {
        self.outputs.get(state.as_usize())
    }

    /// True if reaching `state` confirms at least one segment
    pub fn is_terminal(&self, state: StateId) -> bool {
        !self.outputs(state).is_empty()
    }

    /// Segment by id
    #[inline]
    pub fn segment(&self, id: u32) -> &Segment {
        &self.segments[id as usize]
    }

    /// All segments in pattern order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of literal segments; zero for all-wildcard patterns
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Pattern length in bytes
    pub fn pattern_len(&self) -> usize {
        self.pattern_len
    }

    /// Number of states, root included
    pub fn state_count(&self) -> usize {
        self.table.state_count()
    }

    /// Configuration the automaton was built with
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// The underlying transition table
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Fresh matcher positioned at the start of a stream
    pub fn matcher(&self) -> StreamMatcher<'_> {
        StreamMatcher::new(self)
    }

    /// Every match start offset in `text`, ascending
    pub fn match_all(&self, text: &[u8]) -> Vec<u64> {
        let mut matches = Vec::new();
        self.matcher().feed_slice(text, &mut matches);
        matches
    }

    /// Size and shape summary
    pub fn stats(&self) -> AutomatonStats {
        AutomatonStats {
            pattern_len: self.pattern_len,
            segment_count: self.segments.len(),
            state_count: self.table.state_count(),
            terminal_states: self.outputs.terminal_count(),
            output_entries: self.outputs.entry_count(),
            table: self.table.kind(),
            table_bytes: self.table.heap_bytes(),
            output_bytes: self.outputs.heap_bytes(),
        }
    }
}
