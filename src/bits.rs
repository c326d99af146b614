/// Set of cell indexes already toggled along one search path.
///
/// Values are `Copy`; every frontier branch carries its own set, so
/// marking a move never affects a sibling branch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveSet {
    bits: u64,
}

impl MoveSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn contains(&self, index: u8) -> bool {
        assert!(index < 64, "index out of bounds");
        (self.bits & (1u64 << index)) != 0
    }

    /// Returns a copy of this set with `index` marked.
    #[must_use]
    pub fn with_move(&self, index: u8) -> MoveSet {
        assert!(index < 64, "index out of bounds");
        MoveSet {
            bits: self.bits | (1u64 << index),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn iter(&self) -> MoveSetIter {
        MoveSetIter { bits: self.bits }
    }
}

pub struct MoveSetIter {
    bits: u64,
}

impl Iterator for MoveSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let index = self.bits.trailing_zeros() as u8;
            self.bits &= self.bits - 1; // Clear the lowest set bit
            Some(index)
        }
    }
}

impl FromIterator<u8> for MoveSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MoveSet::new(), |set, index| set.with_move(index))
    }
}
