//! Single-cycle sine lookup table shared by the tone synthesizers.

use std::ops::Index;

use crate::consts;
use crate::error::{AfskError, Result};

/// One full sine cycle quantized to `i16`, with entry `i` equal to
/// `round(32767 * sin(2πi / N))`.
///
/// The table is built once and never modified, so one instance can back any number of
/// synthesizers, on any number of threads, through an `Arc`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SineTable {
    entries: Box<[i16]>,
}

impl SineTable {
    /// Compute a table with the given number of entries.
    pub fn new(size: usize) -> Result<SineTable> {
        if size == 0 || size > consts::MAX_TABLE_SIZE {
            return Err(AfskError::InvalidTableSize(size));
        }

        let entries = (0..size).map(|i| {
            let phase = 2.0 * std::f64::consts::PI * i as f64 / size as f64;
            (phase.sin() * consts::AMPLITUDE).round() as i16
        }).collect::<Vec<_>>();

        Ok(SineTable { entries: entries.into_boxed_slice() })
    }

    /// Number of entries in one cycle.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Always false, since construction rejects empty tables.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Get the entry at the given index, wrapping around the cycle.
    pub fn at(&self, idx: usize) -> i16 { self.entries[idx % self.entries.len()] }

    pub fn entries(&self) -> &[i16] { &self.entries }
}

impl Default for SineTable {
    fn default() -> SineTable {
        // The reference size is always in range.
        match SineTable::new(consts::TABLE_SIZE) {
            Ok(t) => t,
            Err(_) => unreachable!(),
        }
    }
}

impl Index<usize> for SineTable {
    type Output = i16;

    fn index(&self, idx: usize) -> &i16 { &self.entries[idx] }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_size() {
        let t = SineTable::default();
        assert_eq!(t.len(), 256);
        assert_eq!(SineTable::new(64).unwrap().len(), 64);
        assert!(SineTable::new(0).is_err());
        assert!(SineTable::new(consts::MAX_TABLE_SIZE + 1).is_err());
    }

    #[test]
    fn test_quadrants() {
        let t = SineTable::default();

        assert_eq!(t[0], 0);
        assert_eq!(t[32], 23170);
        assert_eq!(t[64], 32767);
        assert_eq!(t[128], 0);
        assert_eq!(t[192], -32767);
        assert_eq!(t.at(256 + 64), 32767);
    }

    #[test]
    fn test_symmetry() {
        let t = SineTable::default();

        for i in 1..128 {
            assert_eq!(t[i], -t[256 - i]);
            assert!(t[i] > 0);
        }

        assert_eq!(*t.entries().iter().max().unwrap(), i16::MAX);
        assert_eq!(*t.entries().iter().min().unwrap(), -i16::MAX);
    }
}
