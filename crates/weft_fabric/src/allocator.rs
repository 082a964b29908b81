//! The configuration-bit allocator: the global ledger of bits consumed.
//!
//! Every configuration bit in the device gets its address from this single
//! sequential counter, so correctness depends on all synthesis phases
//! running in one fixed order. The allocator is an explicit value threaded
//! through the block synthesizer and the deduplication coordinator — never
//! ambient global state — and supports snapshot/restore so the template
//! pass can lay out unique modules without advancing global addresses.

use serde::{Deserialize, Serialize};
use weft_rrg::MemoryOrganization;

/// A contiguous range of configuration-bit addresses.
///
/// The range covers `width` bits starting at `lsb`; a zero-width range is
/// valid and marks a block that consumes no configuration bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BitRange {
    lsb: u32,
    width: u32,
}

impl BitRange {
    /// Creates a range of `width` bits starting at `lsb`.
    pub fn new(lsb: u32, width: u32) -> Self {
        Self { lsb, width }
    }

    /// Returns the lowest bit address in the range.
    pub fn lsb(self) -> u32 {
        self.lsb
    }

    /// Returns the number of bits in the range.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the highest bit address in the range, or `None` if empty.
    pub fn msb(self) -> Option<u32> {
        if self.width == 0 {
            None
        } else {
            Some(self.lsb + self.width - 1)
        }
    }

    /// Returns `true` if the range covers no bits.
    pub fn is_empty(self) -> bool {
        self.width == 0
    }

    /// Returns the address one past the end of the range.
    pub fn end(self) -> u32 {
        self.lsb + self.width
    }

    /// Returns `true` if the given bit address falls inside the range.
    pub fn contains(self, bit: u32) -> bool {
        bit >= self.lsb && bit < self.end()
    }
}

/// A saved copy of the allocator's counters.
///
/// Opaque outside this module: a snapshot can only be fed back into
/// [`ConfigAllocator::restore`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AllocatorSnapshot {
    bit_count: u32,
    bit_lines: u32,
    word_lines: u32,
}

/// The process-wide configuration-bit ledger.
///
/// Under [`MemoryOrganization::MemoryBank`], every allocated bit also
/// consumes one bit-line and one word-line of the programming bank; under
/// [`MemoryOrganization::ScanChain`] only the flat bit counter advances.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigAllocator {
    organization: MemoryOrganization,
    bit_count: u32,
    bit_lines: u32,
    word_lines: u32,
}

impl ConfigAllocator {
    /// Creates an allocator with all counters at zero.
    pub fn new(organization: MemoryOrganization) -> Self {
        Self {
            organization,
            bit_count: 0,
            bit_lines: 0,
            word_lines: 0,
        }
    }

    /// Returns the configuration-memory organization of this allocator.
    pub fn organization(&self) -> MemoryOrganization {
        self.organization
    }

    /// Returns the number of bits consumed so far.
    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Returns the number of bit-lines consumed so far (memory bank only).
    pub fn bit_lines(&self) -> u32 {
        self.bit_lines
    }

    /// Returns the number of word-lines consumed so far (memory bank only).
    pub fn word_lines(&self) -> u32 {
        self.word_lines
    }

    /// Consumes `width` more bits and returns their contiguous range.
    ///
    /// A zero-width request is valid and returns an empty range anchored at
    /// the current counter without advancing it.
    pub fn allocate(&mut self, width: u32) -> BitRange {
        let range = BitRange::new(self.bit_count, width);
        self.bit_count += width;
        if self.organization == MemoryOrganization::MemoryBank {
            self.bit_lines += width;
            self.word_lines += width;
        }
        range
    }

    /// Saves the current counter state.
    pub fn snapshot(&self) -> AllocatorSnapshot {
        AllocatorSnapshot {
            bit_count: self.bit_count,
            bit_lines: self.bit_lines,
            word_lines: self.word_lines,
        }
    }

    /// Restores the counter state from a snapshot as one atomic assignment.
    pub fn restore(&mut self, snapshot: &AllocatorSnapshot) {
        self.bit_count = snapshot.bit_count;
        self.bit_lines = snapshot.bit_lines;
        self.word_lines = snapshot.word_lines;
    }
}
