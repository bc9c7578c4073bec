//! Aho-Corasick construction over pattern segments
//!
//! Construction runs in three steps over an arena of temporary states:
//!
//! 1. Trie insertion of every segment (shared prefixes share states).
//! 2. Breadth-first failure links, folding each failure target's output set
//!    into the state's own so suffix hits never need a chain walk.
//! 3. Goto completion, a second pass over the same breadth-first order that
//!    gives every state a successor for all 256 bytes.
//!
//! Only the completed table and the frozen output index leave this module.

use crate::automaton::Automaton;
use crate::config::{EmptyPatternPolicy, MatchMode, MatcherConfig, TableKind};
use crate::error::{Result, WildscanError};
use crate::output::{OutputIndex, OutputSet};
use crate::segment::{split_segments, Segment};
use crate::transition::{DenseTable, SparseTable, StateId, TransitionTable, ALPHABET_SIZE};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Builder for a configured [`Automaton`]
///
/// ```
/// use wildscan::{AutomatonBuilder, TableKind};
///
/// let automaton = AutomatonBuilder::new()
///     .wildcard(b'.')
///     .table(TableKind::Sparse)
///     .build(b"ab..aba")?;
/// assert_eq!(automaton.match_all(b"ababacaba"), vec![2]);
/// # Ok::<(), wildscan::WildscanError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    config: MatcherConfig,
}

impl AutomatonBuilder {
    /// Builder with default configuration (`?` wildcard, dense table)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder starting from an existing configuration
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Set the wildcard byte
    pub fn wildcard(mut self, wildcard: u8) -> Self {
        self.config.wildcard = wildcard;
        self
    }

    /// Set case handling
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.config.match_mode = mode;
        self
    }

    /// Set the transition table representation
    pub fn table(mut self, kind: TableKind) -> Self {
        self.config.table = kind;
        self
    }

    /// Set the empty-pattern behavior
    pub fn empty_pattern(mut self, policy: EmptyPatternPolicy) -> Self {
        self.config.empty_pattern = policy;
        self
    }

    /// Set the maximum accepted pattern length
    pub fn max_pattern_len(mut self, len: usize) -> Self {
        self.config.max_pattern_len = len;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Compile `pattern` into a completed automaton
    pub fn build(&self, pattern: &[u8]) -> Result<Automaton> {
        self.config.validate()?;

        if pattern.len() > self.config.max_pattern_len {
            return Err(WildscanError::ResourceLimitExceeded(format!(
                "pattern is {} bytes, limit is {}",
                pattern.len(),
                self.config.max_pattern_len
            )));
        }
        // States are bounded by pattern length + 1 and ids are u32
        if pattern.len() >= u32::MAX as usize {
            return Err(WildscanError::ResourceLimitExceeded(format!(
                "pattern is {} bytes, state ids are limited to 32 bits",
                pattern.len()
            )));
        }

        let segments = split_segments(pattern, self.config.wildcard, self.config.match_mode);

        let mut trie = TrieBuilder::new(segments.len());
        for (id, segment) in segments.iter().enumerate() {
            trie.add_segment(segment, id as u32);
        }
        let order = trie.build_failure_links();
        let table = match self.config.table {
            TableKind::Dense => {
                TransitionTable::Dense(trie.complete_dense(&order, self.config.match_mode))
            }
            TableKind::Sparse => {
                TransitionTable::Sparse(trie.complete_sparse(&order, self.config.match_mode))
            }
        };
        let outputs = OutputIndex::freeze(trie.states.iter().map(|s| s.outputs.as_ref()));

        log::debug!(
            "built automaton: pattern_len={} segments={} states={} table={:?}",
            pattern.len(),
            segments.len(),
            trie.states.len(),
            self.config.table
        );

        Ok(Automaton::from_parts(
            table,
            outputs,
            segments,
            pattern.len(),
            self.config.clone(),
        ))
    }
}

/// Temporary state used during construction
#[derive(Debug, Clone)]
struct BuilderState {
    /// Direct trie edges only
    transitions: FxHashMap<u8, StateId>,
    failure: StateId,
    /// Allocated on first insert; most states never get one
    outputs: Option<OutputSet>,
    depth: u32,
}

impl BuilderState {
    fn new(depth: u32) -> Self {
        Self {
            transitions: FxHashMap::default(),
            failure: StateId::ROOT,
            outputs: None,
            depth,
        }
    }

    fn is_final(&self) -> bool {
        self.outputs.as_ref().is_some_and(|o| !o.is_empty())
    }

    /// Trie edges sorted by byte, so traversal order is reproducible
    fn sorted_edges(&self) -> Vec<(u8, StateId)> {
        let mut edges: Vec<(u8, StateId)> =
            self.transitions.iter().map(|(&b, &t)| (b, t)).collect();
        edges.sort_unstable_by_key(|&(b, _)| b);
        edges
    }
}

/// Arena of builder states; index 0 is the root
struct TrieBuilder {
    states: Vec<BuilderState>,
    segment_count: usize,
}

impl TrieBuilder {
    fn new(segment_count: usize) -> Self {
        Self {
            states: vec![BuilderState::new(0)],
            segment_count,
        }
    }

    fn state(&self, id: StateId) -> &BuilderState {
        &self.states[id.as_usize()]
    }

    fn state_mut(&mut self, id: StateId) -> &mut BuilderState {
        &mut self.states[id.as_usize()]
    }

    fn add_segment(&mut self, segment: &Segment, segment_id: u32) {
        let mut current = StateId::ROOT;

        for &byte in segment.bytes() {
            if let Some(&next) = self.state(current).transitions.get(&byte) {
                current = next;
            } else {
                let depth = self.state(current).depth + 1;
                let new_id = StateId::new(self.states.len());
                self.states.push(BuilderState::new(depth));
                self.state_mut(current).transitions.insert(byte, new_id);
                current = new_id;
            }
        }

        let capacity = self.segment_count;
        self.state_mut(current)
            .outputs
            .get_or_insert_with(|| OutputSet::with_capacity(capacity))
            .insert(segment_id);
    }

    /// Compute failure links and inherited outputs.
    ///
    /// Returns every state in breadth-first order, root first; completion
    /// replays this order so a state's failure target is always finished
    /// before the state itself.
    fn build_failure_links(&mut self) -> Vec<StateId> {
        let mut order = Vec::with_capacity(self.states.len());
        let mut queue = VecDeque::new();
        order.push(StateId::ROOT);

        // Depth-1 states fail to root
        for (_, child) in self.state(StateId::ROOT).sorted_edges() {
            self.state_mut(child).failure = StateId::ROOT;
            queue.push_back(child);
        }

        while let Some(state_id) = queue.pop_front() {
            order.push(state_id);

            for (byte, next_state) in self.state(state_id).sorted_edges() {
                queue.push_back(next_state);

                // Deepest proper suffix with an edge on `byte`; root answers itself
                let mut fail = self.state(state_id).failure;
                let target = loop {
                    if let Some(&target) = self.state(fail).transitions.get(&byte) {
                        break target;
                    }
                    if fail == StateId::ROOT {
                        break StateId::ROOT;
                    }
                    fail = self.state(fail).failure;
                };
                self.state_mut(next_state).failure = target;

                // The target is shallower, so its outputs already include its own suffixes
                if let Some(inherited) = self.state(target).outputs.clone() {
                    let capacity = self.segment_count;
                    self.state_mut(next_state)
                        .outputs
                        .get_or_insert_with(|| OutputSet::with_capacity(capacity))
                        .union_with(&inherited);
                }
            }
        }

        log::trace!(
            "failure links: {} states, {} terminal",
            order.len(),
            self.states.iter().filter(|s| s.is_final()).count()
        );
        order
    }

    /// Fill in a completed row: inherited from the failure target, then trie
    /// edges on top, then uppercase mirrors of lowercase columns when folding.
    fn complete_row(&self, state: StateId, row: &mut [StateId], mode: MatchMode) {
        for (&byte, &target) in &self.state(state).transitions {
            row[byte as usize] = target;
        }
        if mode == MatchMode::CaseInsensitive {
            for lower in b'a'..=b'z' {
                row[lower.to_ascii_uppercase() as usize] = row[lower as usize];
            }
        }
    }

    fn complete_dense(&self, order: &[StateId], mode: MatchMode) -> DenseTable {
        let mut table = vec![StateId::ROOT; self.states.len() * ALPHABET_SIZE];

        for &state in order {
            let base = state.as_usize() * ALPHABET_SIZE;
            if state != StateId::ROOT {
                let fail_base = self.state(state).failure.as_usize() * ALPHABET_SIZE;
                table.copy_within(fail_base..fail_base + ALPHABET_SIZE, base);
            }
            self.complete_row(state, &mut table[base..base + ALPHABET_SIZE], mode);
        }

        DenseTable::from_raw(table)
    }

    fn complete_sparse(&self, order: &[StateId], mode: MatchMode) -> SparseTable {
        let mut rows: Vec<Vec<(u8, StateId)>> = vec![Vec::new(); self.states.len()];
        let mut scratch = [StateId::ROOT; ALPHABET_SIZE];

        for &state in order {
            scratch.fill(StateId::ROOT);
            if state != StateId::ROOT {
                for &(byte, target) in &rows[self.state(state).failure.as_usize()] {
                    scratch[byte as usize] = target;
                }
            }
            self.complete_row(state, &mut scratch, mode);
            rows[state.as_usize()] = scratch
                .iter()
                .enumerate()
                .filter(|(_, &target)| target != StateId::ROOT)
                .map(|(byte, &target)| (byte as u8, target))
                .collect();
        }

        SparseTable::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::Transitions;

    fn trie_for(pattern: &[u8]) -> (TrieBuilder, Vec<StateId>) {
        let segments = split_segments(pattern, b'?', MatchMode::CaseSensitive);
        let mut trie = TrieBuilder::new(segments.len());
        for (id, s) in segments.iter().enumerate() {
            trie.add_segment(s, id as u32);
        }
        let order = trie.build_failure_links();
        (trie, order)
    }

    fn walk(trie: &TrieBuilder, path: &[u8]) -> StateId {
        let mut s = StateId::ROOT;
        for b in path {
            s = trie.state(s).transitions[b];
        }
        s
    }

    #[test]
    fn test_prefix_sharing() {
        // "ab", "abc", "abd" share the "ab" path
        let (trie, _) = trie_for(b"ab?abc?abd");
        // root + a + ab + abc + abd
        assert_eq!(trie.states.len(), 5);
        let ab = walk(&trie, b"ab");
        assert!(trie.state(ab).is_final());
        assert_eq!(trie.state(ab).depth, 2);
    }

    #[test]
    fn test_same_content_distinct_ids() {
        let (trie, _) = trie_for(b"ab?ab");
        let ab = walk(&trie, b"ab");
        let outputs = trie.state(ab).outputs.as_ref().unwrap();
        assert_eq!(outputs.iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_failure_links_classic() {
        // he, she, his, hers
        let (trie, order) = trie_for(b"he?she?his?hers");
        let she = walk(&trie, b"she");
        let he = walk(&trie, b"he");
        let hers = walk(&trie, b"hers");
        let s = walk(&trie, b"s");

        assert_eq!(trie.state(she).failure, he);
        assert_eq!(trie.state(hers).failure, s);
        assert_eq!(trie.state(he).failure, StateId::ROOT);

        // "she" inherits "he"
        let outputs = trie.state(she).outputs.as_ref().unwrap();
        assert_eq!(outputs.iter().collect::<Vec<_>>(), vec![0, 1]);

        // breadth-first: depths never decrease
        let depths: Vec<u32> = order.iter().map(|&s| trie.state(s).depth).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(order.len(), trie.states.len());
    }

    #[test]
    fn test_completion_is_total_and_consistent() {
        let (trie, order) = trie_for(b"aab?ab");
        let dense = trie.complete_dense(&order, MatchMode::CaseSensitive);
        let sparse = trie.complete_sparse(&order, MatchMode::CaseSensitive);

        let aa = walk(&trie, b"aa");
        let a = walk(&trie, b"a");
        // "aa" + 'a' falls back to "aa" via the failure of "aa" ("a")
        assert_eq!(dense.step(aa, b'a'), aa);
        assert_eq!(dense.step(a, b'x'), StateId::ROOT);

        for s in 0..trie.states.len() {
            for b in 0..=255u8 {
                let state = StateId::new(s);
                assert_eq!(dense.step(state, b), sparse.step(state, b));
            }
        }
    }

    #[test]
    fn test_case_insensitive_mirrors() {
        let automaton = AutomatonBuilder::new()
            .match_mode(MatchMode::CaseInsensitive)
            .build(b"Ab")
            .unwrap();
        assert_eq!(automaton.match_all(b"xaBAB"), vec![1, 3]);
    }

    #[test]
    fn test_limits() {
        let err = AutomatonBuilder::new()
            .max_pattern_len(3)
            .build(b"abcd")
            .unwrap_err();
        assert!(matches!(err, WildscanError::ResourceLimitExceeded(_)));

        let err = AutomatonBuilder::new()
            .wildcard(b'x')
            .match_mode(MatchMode::CaseInsensitive)
            .build(b"axb")
            .unwrap_err();
        assert!(matches!(err, WildscanError::InvalidConfig(_)));
    }
}
