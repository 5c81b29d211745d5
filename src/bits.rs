//! Bit-level transforms between frame bytes and the line: LSB-first expansion,
//! HDLC bit stuffing, and NRZI line coding, along with their inverses.

use crate::consts;

/// A single bit.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Bit(u8);

impl Bit {
    /// Construct a new `Bit` from the given value, which must be 0 or 1.
    pub fn new(bit: u8) -> Bit {
        assert!(bit >> 1 == 0);
        Bit(bit)
    }

    pub fn zero() -> Bit { Bit(0) }
    pub fn one() -> Bit { Bit(1) }

    /// Get the wrapped bit, which is guaranteed to be 0 or 1.
    pub fn bit(&self) -> u8 { self.0 }

    pub fn is_one(&self) -> bool { self.0 == 1 }

    /// Get the opposite bit.
    pub fn flip(&self) -> Bit { Bit(self.0 ^ 1) }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Bit { Bit(b as u8) }
}

/// Iterates over the bits of a byte source, LSB to MSB.
pub struct LsbBits<T: Iterator<Item = u8>> {
    /// Source of bytes.
    src: T,
    /// Current byte, shifted down as bits are taken.
    byte: u8,
    /// Number of bits left in `byte`.
    left: usize,
}

impl<T: Iterator<Item = u8>> LsbBits<T> {
    /// Construct a new `LsbBits<T>` over the given byte source.
    pub fn new(src: T) -> LsbBits<T> {
        LsbBits {
            src,
            byte: 0,
            left: 0,
        }
    }
}

impl<T: Iterator<Item = u8>> Iterator for LsbBits<T> {
    type Item = Bit;

    fn next(&mut self) -> Option<Self::Item> {
        if self.left == 0 {
            self.byte = self.src.next()?;
            self.left = 8;
        }

        let bit = Bit(self.byte & 1);

        self.byte >>= 1;
        self.left -= 1;

        Some(bit)
    }
}

/// Inserts a 0 after every run of five consecutive 1s, so the stream can never
/// contain a flag.
pub struct Stuffer<T: Iterator<Item = Bit>> {
    /// Source of unstuffed bits.
    src: T,
    /// Number of consecutive 1s passed through.
    run: usize,
    /// Whether a stuffed 0 is due before the next source bit.
    stuff: bool,
}

impl<T: Iterator<Item = Bit>> Stuffer<T> {
    /// Construct a new `Stuffer<T>` over the given bit source.
    pub fn new(src: T) -> Stuffer<T> {
        Stuffer {
            src,
            run: 0,
            stuff: false,
        }
    }
}

impl<T: Iterator<Item = Bit>> Iterator for Stuffer<T> {
    type Item = Bit;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stuff {
            self.stuff = false;
            return Some(Bit::zero());
        }

        let bit = self.src.next()?;

        if bit.is_one() {
            self.run += 1;

            if self.run == consts::STUFF_RUN {
                self.run = 0;
                self.stuff = true;
            }
        } else {
            self.run = 0;
        }

        Some(bit)
    }
}

/// Removes the 0 following every run of five consecutive 1s, undoing `Stuffer`.
pub struct Destuffer<T: Iterator<Item = Bit>> {
    /// Source of stuffed bits.
    src: T,
    /// Number of consecutive 1s passed through.
    run: usize,
}

impl<T: Iterator<Item = Bit>> Destuffer<T> {
    /// Construct a new `Destuffer<T>` over the given bit source.
    pub fn new(src: T) -> Destuffer<T> {
        Destuffer {
            src,
            run: 0,
        }
    }
}

impl<T: Iterator<Item = Bit>> Iterator for Destuffer<T> {
    type Item = Bit;

    fn next(&mut self) -> Option<Self::Item> {
        if self.run == consts::STUFF_RUN {
            self.run = 0;

            // Drop the stuffed bit. A stuffing source always follows the run with a
            // 0, so anything else is passed through untouched.
            let bit = self.src.next()?;

            if bit.is_one() {
                self.run = 1;
                return Some(bit);
            }
        }

        let bit = self.src.next()?;

        if bit.is_one() {
            self.run += 1;
        } else {
            self.run = 0;
        }

        Some(bit)
    }
}

/// NRZI line coder: a 0 toggles the line state and a 1 holds it.
pub struct NrziEncoder<T: Iterator<Item = Bit>> {
    /// Source of data bits.
    src: T,
    /// Current line state.
    state: Bit,
}

impl<T: Iterator<Item = Bit>> NrziEncoder<T> {
    /// Construct a new `NrziEncoder<T>` with the line starting in the given state.
    pub fn new(src: T, initial: Bit) -> NrziEncoder<T> {
        NrziEncoder {
            src,
            state: initial,
        }
    }
}

impl<T: Iterator<Item = Bit>> Iterator for NrziEncoder<T> {
    type Item = Bit;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.src.next()?.is_one() {
            self.state = self.state.flip();
        }

        Some(self.state)
    }
}

/// Recovers data bits from NRZI line states: a transition is a 0 and no transition
/// is a 1.
pub struct NrziDecoder<T: Iterator<Item = Bit>> {
    /// Source of line states.
    src: T,
    /// Previous line state.
    prev: Bit,
}

impl<T: Iterator<Item = Bit>> NrziDecoder<T> {
    /// Construct a new `NrziDecoder<T>` assuming the line started in the given state.
    pub fn new(src: T, initial: Bit) -> NrziDecoder<T> {
        NrziDecoder {
            src,
            prev: initial,
        }
    }
}

impl<T: Iterator<Item = Bit>> Iterator for NrziDecoder<T> {
    type Item = Bit;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.src.next()?;
        let bit = Bit::from(state == self.prev);

        self.prev = state;

        Some(bit)
    }
}

/// Expand the given bytes into bits, LSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<Bit> {
    LsbBits::new(bytes.iter().cloned()).collect()
}

/// Pack the given bits, LSB first, into bytes. Returns `None` if the bits don't fill
/// a whole number of bytes.
pub fn bits_to_bytes(bits: &[Bit]) -> Option<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return None;
    }

    Some(bits.chunks(8).map(|byte| {
        byte.iter().rev().fold(0, |accum, b| accum << 1 | b.bit())
    }).collect())
}

/// Bit-stuff the given bits.
pub fn stuff(bits: &[Bit]) -> Vec<Bit> {
    Stuffer::new(bits.iter().cloned()).collect()
}

/// Remove stuffed bits from the given bits.
pub fn destuff(bits: &[Bit]) -> Vec<Bit> {
    Destuffer::new(bits.iter().cloned()).collect()
}

/// NRZI-encode the given bits, starting from the given line state.
pub fn nrzi_encode(bits: &[Bit], initial: Bit) -> Vec<Bit> {
    NrziEncoder::new(bits.iter().cloned(), initial).collect()
}

/// Undo NRZI coding of the given line states, starting from the given line state.
pub fn nrzi_decode(bits: &[Bit], initial: Bit) -> Vec<Bit> {
    NrziDecoder::new(bits.iter().cloned(), initial).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn bits(b: &[u8]) -> Vec<Bit> {
        b.iter().map(|&b| Bit::new(b)).collect()
    }

    #[test]
    fn test_lsb_bits() {
        let b = bytes_to_bits(&[0b1000_0001, 0x7E, 0b0000_0010]);

        assert_eq!(b, bits(&[
            1, 0, 0, 0, 0, 0, 0, 1,
            0, 1, 1, 1, 1, 1, 1, 0,
            0, 1, 0, 0, 0, 0, 0, 0,
        ]));

        assert!(bytes_to_bits(&[]).is_empty());
        assert_eq!(bits_to_bytes(&b).unwrap(), vec![0b1000_0001, 0x7E, 0b0000_0010]);
        assert_eq!(bits_to_bytes(&b[..7]), None);
    }

    #[test]
    fn test_stuff() {
        assert_eq!(stuff(&bits(&[1, 1, 1, 1, 1, 0, 1])),
                   bits(&[1, 1, 1, 1, 1, 0, 0, 1]));

        // No run of five: unchanged.
        let b = bits(&[1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1]);
        assert_eq!(stuff(&b), b);

        // A run of ten gets two stuffed bits, the count restarting after each.
        assert_eq!(stuff(&bits(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1])),
                   bits(&[1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0]));

        // A run ending the stream still gets its stuffed bit.
        assert_eq!(stuff(&bits(&[0, 1, 1, 1, 1, 1])), bits(&[0, 1, 1, 1, 1, 1, 0]));

        assert!(stuff(&[]).is_empty());
    }

    #[test]
    fn test_flag_never_appears() {
        let s = stuff(&bytes_to_bits(&[0xFF, 0x7E, 0xFE, 0x3F, 0xFF]));

        for w in s.windows(6) {
            assert!(w.iter().any(|b| !b.is_one()));
        }
    }

    #[test]
    fn test_destuff() {
        assert_eq!(destuff(&bits(&[1, 1, 1, 1, 1, 0, 0, 1])),
                   bits(&[1, 1, 1, 1, 1, 0, 1]));
        assert_eq!(destuff(&bits(&[1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 0])),
                   bits(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));

        for &byte in &[0x00, 0x1F, 0x3E, 0x7E, 0xFF] {
            let b = bytes_to_bits(&[byte, byte, byte]);
            assert_eq!(destuff(&stuff(&b)), b);
        }
    }

    #[test]
    fn test_nrzi() {
        assert_eq!(nrzi_encode(&bits(&[0, 0, 1, 1, 0]), Bit::zero()),
                   bits(&[1, 0, 0, 0, 1]));
        assert_eq!(nrzi_encode(&bits(&[0, 0, 1, 1, 0]), Bit::one()),
                   bits(&[0, 1, 1, 1, 0]));
        assert!(nrzi_encode(&[], Bit::zero()).is_empty());

        assert_eq!(nrzi_decode(&bits(&[1, 0, 0, 0, 1]), Bit::zero()),
                   bits(&[0, 0, 1, 1, 0]));

        let b = bytes_to_bits(b"N0CALL");
        assert_eq!(nrzi_decode(&nrzi_encode(&b, Bit::one()), Bit::one()), b);
    }

    #[test]
    fn test_bit() {
        assert_eq!(Bit::from(true), Bit::one());
        assert_eq!(Bit::from(false), Bit::zero());
        assert_eq!(Bit::one().flip(), Bit::zero());
        assert_eq!(Bit::new(1).bit(), 1);
    }

    #[test]
    #[should_panic]
    fn test_bit_range() {
        Bit::new(2);
    }
}
