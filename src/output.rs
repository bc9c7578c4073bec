//! Per-state output sets.
//!
//! During construction every terminal state carries a bitset of segment ids
//! ([`OutputSet`]) so that inheriting outputs along failure links is a word-wise
//! OR. Once the automaton is complete the sets are frozen into an
//! [`OutputIndex`]: one contiguous id array plus per-state ranges, so the
//! matcher walks a plain slice for every state it visits.

/// Fixed-capacity bitset over segment ids `0..capacity`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputSet {
    words: Box<[u64]>,
}

impl OutputSet {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0u64; capacity.div_ceil(64)].into_boxed_slice(),
        }
    }

    pub(crate) fn insert(&mut self, id: u32) {
        let id = id as usize;
        self.words[id / 64] |= 1u64 << (id % 64);
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, id: u32) -> bool {
        let id = id as usize;
        self.words
            .get(id / 64)
            .is_some_and(|w| w & (1u64 << (id % 64)) != 0)
    }

    pub(crate) fn union_with(&mut self, other: &OutputSet) {
        for (dst, src) in self.words.iter_mut().zip(other.words.iter()) {
            *dst |= *src;
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Ids in ascending order
    pub(crate) fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let tz = bits.trailing_zeros();
                bits &= bits - 1;
                Some((i * 64) as u32 + tz)
            })
        })
    }
}

/// Frozen output sets, indexed by state id
#[derive(Debug, Clone)]
pub struct OutputIndex {
    /// `offsets[s]..offsets[s + 1]` is the id range of state `s`
    offsets: Vec<u32>,
    ids: Vec<u32>,
}

impl OutputIndex {
    /// Freeze per-state sets; `None` means the state has no output.
    pub(crate) fn freeze<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a OutputSet>>,
    {
        let mut offsets = vec![0u32];
        let mut ids = Vec::new();
        for set in sets {
            if let Some(set) = set {
                ids.extend(set.iter());
            }
            offsets.push(ids.len() as u32);
        }
        Self { offsets, ids }
    }

    /// Segment ids confirmed on reaching `state`, ascending
    #[inline]
    pub fn get(&self, state: usize) -> &[u32] {
        let start = self.offsets[state] as usize;
        let end = self.offsets[state + 1] as usize;
        &self.ids[start..end]
    }

    /// Number of states covered
    pub fn state_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of (state, segment) pairs
    pub fn entry_count(&self) -> usize {
        self.ids.len()
    }

    /// States whose output is non-empty
    pub fn terminal_count(&self) -> usize {
        self.offsets.windows(2).filter(|w| w[0] != w[1]).count()
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        (self.offsets.capacity() + self.ids.capacity()) * std::mem::size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitset_basic() {
        let mut set = OutputSet::with_capacity(130);
        assert!(set.is_empty());
        set.insert(0);
        set.insert(64);
        set.insert(129);
        assert!(set.contains(64));
        assert!(!set.contains(63));
        assert!(!set.contains(500));
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 64, 129]);
    }

    #[test]
    fn test_union_dedups() {
        let mut a = OutputSet::with_capacity(10);
        let mut b = OutputSet::with_capacity(10);
        a.insert(1);
        a.insert(3);
        b.insert(3);
        b.insert(7);
        a.union_with(&b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![1, 3, 7]);
    }

    #[test]
    fn test_freeze() {
        let mut s1 = OutputSet::with_capacity(4);
        s1.insert(2);
        s1.insert(0);
        let mut s3 = OutputSet::with_capacity(4);
        s3.insert(3);

        let index = OutputIndex::freeze(vec![None, Some(&s1), None, Some(&s3)]);
        assert_eq!(index.state_count(), 4);
        assert!(index.get(0).is_empty());
        assert_eq!(index.get(1), &[0, 2]);
        assert!(index.get(2).is_empty());
        assert_eq!(index.get(3), &[3]);
        assert_eq!(index.entry_count(), 3);
        assert_eq!(index.terminal_count(), 2);
    }
}
