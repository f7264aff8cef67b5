use crate::SyntaxKind;

const SLOTS: usize = 2;

/// Bit set over [`SyntaxKind`], usable in `const` position for recovery sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: [u64; SLOTS],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SLOTS] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn slot_and_mask(kind: SyntaxKind) -> (usize, u64) {
        let kind = kind as u16;
        let slot = (kind / Self::BITS_PER_SLOT) as usize;
        debug_assert!(slot < SLOTS, "SyntaxKind does not fit, grow `SLOTS`");
        (slot, 1 << (kind % Self::BITS_PER_SLOT))
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < N {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    pub const fn with(mut self, kind: SyntaxKind) -> Self {
        let (slot, mask) = Self::slot_and_mask(kind);
        self.bits[slot] |= mask;
        self
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;
        while i < SLOTS {
            self.bits[i] |= other.bits[i];
            i += 1;
        }
        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot, mask) = Self::slot_and_mask(kind);
        self.bits[slot] & mask != 0
    }
}
