//! HDLC framing of frame bytes into NRZI line bits.
//!
//! The line carries, in order: an idle preamble of zero bytes, a run of flags, the
//! bit-stuffed frame, and a closing run of flags. The preamble and flags are never
//! stuffed. The whole line, preamble included, is then NRZI coded.

use crate::bits::{self, Bit};
use crate::config::AfskConfig;
use crate::consts;
use crate::error::{AfskError, Result};

/// Builds line bitstreams from frame bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Framer {
    /// Total bytes before the frame, flags included.
    prepend: usize,
    /// Flags on each side of the frame.
    postpend: usize,
    /// Line state before the first bit.
    initial: Bit,
}

impl Framer {
    /// Construct a new `Framer` with `prepend` bytes of lead-in, the last `postpend` of
    /// which are flags, and `postpend` closing flags.
    pub fn new(prepend: usize, postpend: usize, initial: Bit) -> Result<Framer> {
        if prepend < postpend {
            return Err(AfskError::InvalidFraming { prepend, postpend });
        }

        Ok(Framer {
            prepend,
            postpend,
            initial,
        })
    }

    /// Construct a new `Framer` from the framing parameters of the given config.
    pub fn from_config(config: &AfskConfig) -> Result<Framer> {
        Framer::new(config.prepend, config.postpend, config.initial_state())
    }

    /// Number of idle zero bytes in the preamble.
    pub fn idle(&self) -> usize { self.prepend - self.postpend }

    /// Number of flags on each side of the frame.
    pub fn flags(&self) -> usize { self.postpend }

    /// Line state before the first bit.
    pub fn initial(&self) -> Bit { self.initial }

    /// Number of line bits wrapped around every frame.
    pub fn overhead(&self) -> usize { (self.idle() + 2 * self.flags()) * 8 }

    /// Frame the given bytes, keeping every intermediate stage.
    pub fn encode(&self, frame: &[u8]) -> Bitstream {
        let raw = bits::bytes_to_bits(frame);
        let stuffed = bits::stuff(&raw);

        let mut line = Vec::with_capacity(stuffed.len() + self.overhead());
        line.extend(std::iter::repeat(Bit::zero()).take(self.idle() * 8));
        self.push_flags(&mut line);
        line.extend_from_slice(&stuffed);
        self.push_flags(&mut line);

        let encoded = bits::nrzi_encode(&line, self.initial);

        debug!(bytes = frame.len(), raw = raw.len(), stuffed = stuffed.len(),
               line = line.len(), "framed");

        Bitstream {
            raw,
            stuffed,
            line,
            encoded,
        }
    }

    /// Recover the frame bytes from a line bitstream built with the same framing.
    ///
    /// Returns `None` if the bitstream is too short to hold the preamble and flags or
    /// the recovered payload isn't a whole number of bytes.
    pub fn recover(&self, encoded: &[Bit]) -> Option<Vec<u8>> {
        let line = bits::nrzi_decode(encoded, self.initial);
        let head = (self.idle() + self.flags()) * 8;
        let tail = self.flags() * 8;

        if line.len() < head + tail {
            return None;
        }

        bits::bits_to_bytes(&bits::destuff(&line[head..line.len() - tail]))
    }

    fn push_flags(&self, line: &mut Vec<Bit>) {
        for _ in 0..self.postpend {
            line.extend(bits::LsbBits::new(std::iter::once(consts::FLAG)));
        }
    }
}

impl Default for Framer {
    fn default() -> Framer {
        Framer {
            prepend: consts::PREPEND,
            postpend: consts::POSTPEND,
            initial: Bit::zero(),
        }
    }
}

/// Each stage of turning frame bytes into line bits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bitstream {
    raw: Vec<Bit>,
    stuffed: Vec<Bit>,
    line: Vec<Bit>,
    encoded: Vec<Bit>,
}

impl Bitstream {
    /// Frame bytes expanded LSB first.
    pub fn raw(&self) -> &[Bit] { &self.raw }
    /// Raw bits after bit stuffing.
    pub fn stuffed(&self) -> &[Bit] { &self.stuffed }
    /// Preamble, flags, stuffed bits, and flags, before line coding.
    pub fn line(&self) -> &[Bit] { &self.line }
    /// NRZI-coded line bits, ready for the modulator.
    pub fn encoded(&self) -> &[Bit] { &self.encoded }

    /// Take the NRZI-coded line bits.
    pub fn into_encoded(self) -> Vec<Bit> { self.encoded }
}
