//! Completed transition functions.
//!
//! After goto completion every `(state, byte)` pair has a successor, so the
//! matcher never follows a failure link. Two representations are provided:
//!
//! - [`DenseTable`]: one flat array indexed by `state * 256 + byte`. One load
//!   per text byte, `states * 1 KiB` of memory.
//! - [`SparseTable`]: per-state edge arrays sorted by byte, with every edge
//!   that leads back to the root left out. A step is a binary search over at
//!   most 256 entries.
//!
//! Both implement [`Transitions`] and are interchangeable behind
//! [`TransitionTable`].

use crate::config::TableKind;
use std::fmt;

/// Size of the byte alphabet
pub const ALPHABET_SIZE: usize = 256;

/// Index of a state in the automaton's state arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StateId(u32);

impl StateId {
    /// The start state
    pub const ROOT: StateId = StateId(0);

    pub(crate) fn new(id: usize) -> Self {
        debug_assert!(id <= u32::MAX as usize);
        StateId(id as u32)
    }

    /// Arena index
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// A total transition function over the byte alphabet
pub trait Transitions {
    /// Successor of `state` on `byte`
    fn step(&self, state: StateId, byte: u8) -> StateId;

    /// Number of states covered by the table
    fn state_count(&self) -> usize;

    /// Heap memory held by the table
    fn heap_bytes(&self) -> usize;
}

/// Flat `states x 256` transition array
#[derive(Clone)]
pub struct DenseTable {
    table: Vec<StateId>,
}

impl DenseTable {
    /// Wrap a completed flat table of `states * 256` successors
    pub(crate) fn from_raw(table: Vec<StateId>) -> Self {
        debug_assert_eq!(table.len() % ALPHABET_SIZE, 0);
        Self { table }
    }

    /// The full row of successors for `state`
    pub fn row(&self, state: StateId) -> &[StateId] {
        let base = state.as_usize() * ALPHABET_SIZE;
        &self.table[base..base + ALPHABET_SIZE]
    }
}

impl Transitions for DenseTable {
    #[inline]
    fn step(&self, state: StateId, byte: u8) -> StateId {
        self.table[state.as_usize() * ALPHABET_SIZE + byte as usize]
    }

    fn state_count(&self) -> usize {
        self.table.len() / ALPHABET_SIZE
    }

    fn heap_bytes(&self) -> usize {
        self.table.capacity() * std::mem::size_of::<StateId>()
    }
}

impl fmt::Debug for DenseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseTable")
            .field("states", &self.state_count())
            .finish()
    }
}

/// Edge stored by [`SparseTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    byte: u8,
    target: StateId,
}

/// Per-state sorted edge arrays; a missing byte leads to the root
#[derive(Clone)]
pub struct SparseTable {
    /// `offsets[s]..offsets[s + 1]` is the edge range of state `s`
    offsets: Vec<u32>,
    edges: Vec<Edge>,
}

impl SparseTable {
    /// Flatten per-state `(byte, target)` lists, each sorted by byte and
    /// holding no root targets
    pub(crate) fn from_rows(rows: Vec<Vec<(u8, StateId)>>) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut edges = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        offsets.push(0u32);
        for row in rows {
            debug_assert!(row.windows(2).all(|w| w[0].0 < w[1].0));
            edges.extend(row.into_iter().map(|(byte, target)| Edge { byte, target }));
            offsets.push(edges.len() as u32);
        }
        Self { offsets, edges }
    }

    /// Number of stored (non-root) edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Transitions for SparseTable {
    #[inline]
    fn step(&self, state: StateId, byte: u8) -> StateId {
        let s = state.as_usize();
        let edges = &self.edges[self.offsets[s] as usize..self.offsets[s + 1] as usize];
        match edges.binary_search_by_key(&byte, |e| e.byte) {
            Ok(i) => edges[i].target,
            Err(_) => StateId::ROOT,
        }
    }

    fn state_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn heap_bytes(&self) -> usize {
        self.offsets.capacity() * std::mem::size_of::<u32>()
            + self.edges.capacity() * std::mem::size_of::<Edge>()
    }
}

impl fmt::Debug for SparseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseTable")
            .field("states", &self.state_count())
            .field("edges", &self.edges.len())
            .finish()
    }
}

/// Transition function selected by [`TableKind`]
#[derive(Debug, Clone)]
pub enum TransitionTable {
    /// Flat array
    Dense(DenseTable),
    /// Sorted edge lists
    Sparse(SparseTable),
}

impl TransitionTable {
    /// Which representation backs this table
    pub fn kind(&self) -> TableKind {
        match self {
            TransitionTable::Dense(_) => TableKind::Dense,
            TransitionTable::Sparse(_) => TableKind::Sparse,
        }
    }
}

impl Transitions for TransitionTable {
    #[inline]
    fn step(&self, state: StateId, byte: u8) -> StateId {
        match self {
            TransitionTable::Dense(t) => t.step(state, byte),
            TransitionTable::Sparse(t) => t.step(state, byte),
        }
    }

    fn state_count(&self) -> usize {
        match self {
            TransitionTable::Dense(t) => t.state_count(),
            TransitionTable::Sparse(t) => t.state_count(),
        }
    }

    fn heap_bytes(&self) -> usize {
        match self {
            TransitionTable::Dense(t) => t.heap_bytes(),
            TransitionTable::Sparse(t) => t.heap_bytes(),
        }
    }
}
