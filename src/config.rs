//! Modem configuration.

use num::Integer;

use crate::afsk::Synthesis;
use crate::bits::Bit;
use crate::consts;
use crate::error::{AfskError, Result};

/// Parameters for turning frame bytes into audio.
///
/// The default is the Bell 202 reference modem: 8000 Hz samples, 1200 baud, 1200/2200
/// Hz tones, a 256-entry sine table, 500 ms of preamble and 3 flags each side.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct AfskConfig {
    /// Output samples per second.
    pub sample_rate: u32,
    /// Line bits per second.
    pub bit_rate: u32,
    /// Tone for a 1 line bit, in Hz.
    pub mark: u32,
    /// Tone for a 0 line bit, in Hz.
    pub space: u32,
    /// Entries in the single-cycle sine table.
    pub table_size: usize,
    /// Bytes of preamble before the frame, counting the leading flags.
    pub prepend: usize,
    /// Flags on each side of the frame.
    pub postpend: usize,
    /// NRZI line state before the first bit.
    pub nrzi_initial: bool,
    /// Which tone synthesizer renders the line bits.
    pub synthesis: Synthesis,
}

impl AfskConfig {
    /// Number of preamble bytes covering `millis` of key-up time at the given bit rate.
    pub fn warmup_bytes(bit_rate: u32, millis: u32) -> usize {
        (bit_rate as u64 * millis as u64 / 8000) as usize
    }

    /// Replace the bit rate, resizing the preamble to keep the default warm-up time.
    pub fn with_bit_rate(self, bit_rate: u32) -> AfskConfig {
        AfskConfig {
            bit_rate,
            prepend: AfskConfig::warmup_bytes(bit_rate, consts::WARMUP_MS),
            ..self
        }
    }

    pub fn with_synthesis(self, synthesis: Synthesis) -> AfskConfig {
        AfskConfig { synthesis, ..self }
    }

    /// NRZI line state before the first bit.
    pub fn initial_state(&self) -> Bit { Bit::from(self.nrzi_initial) }

    /// Whole samples in each bit period, rounding down.
    pub fn samples_per_bit(&self) -> u32 {
        Integer::div_floor(&self.sample_rate, &self.bit_rate)
    }

    /// Verify the parameters describe a usable modem.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 || self.bit_rate == 0 {
            return Err(AfskError::ZeroRate);
        }

        if self.samples_per_bit() == 0 {
            return Err(AfskError::ZeroSamplesPerBit {
                sample_rate: self.sample_rate,
                bit_rate: self.bit_rate,
            });
        }

        for &freq in &[self.mark, self.space] {
            if freq == 0 || freq >= self.sample_rate / 2 {
                return Err(AfskError::ToneOutOfRange {
                    freq,
                    sample_rate: self.sample_rate,
                });
            }
        }

        if self.table_size == 0 || self.table_size > consts::MAX_TABLE_SIZE {
            return Err(AfskError::InvalidTableSize(self.table_size));
        }

        if self.prepend < self.postpend {
            return Err(AfskError::InvalidFraming {
                prepend: self.prepend,
                postpend: self.postpend,
            });
        }

        Ok(())
    }
}

impl Default for AfskConfig {
    fn default() -> AfskConfig {
        AfskConfig {
            sample_rate: consts::SAMPLE_RATE,
            bit_rate: consts::BIT_RATE,
            mark: consts::MARK_FREQ,
            space: consts::SPACE_FREQ,
            table_size: consts::TABLE_SIZE,
            prepend: consts::PREPEND,
            postpend: consts::POSTPEND,
            nrzi_initial: false,
            synthesis: Synthesis::Exact,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default() {
        let c = AfskConfig::default();

        assert!(c.validate().is_ok());
        assert_eq!(c.prepend, 75);
        assert_eq!(c.samples_per_bit(), 6);
        assert_eq!(c.initial_state(), Bit::zero());
        assert_eq!(c.synthesis, Synthesis::Exact);
    }

    #[test]
    fn test_warmup() {
        assert_eq!(AfskConfig::warmup_bytes(1200, 500), 75);
        assert_eq!(AfskConfig::warmup_bytes(300, 500), 18);
        assert_eq!(AfskConfig::default().with_bit_rate(9600).prepend, 600);
    }

    #[test]
    fn test_invalid() {
        let c = AfskConfig::default();

        match (AfskConfig { bit_rate: 0, ..c }).validate() {
            Err(AfskError::ZeroRate) => {},
            _ => panic!(),
        }

        match (AfskConfig { sample_rate: 1000, ..c }).validate() {
            Err(AfskError::ZeroSamplesPerBit { sample_rate: 1000, bit_rate: 1200 }) => {},
            _ => panic!(),
        }

        match (AfskConfig { space: 4000, ..c }).validate() {
            Err(AfskError::ToneOutOfRange { freq: 4000, .. }) => {},
            _ => panic!(),
        }

        match (AfskConfig { mark: 0, ..c }).validate() {
            Err(AfskError::ToneOutOfRange { freq: 0, .. }) => {},
            _ => panic!(),
        }

        match (AfskConfig { table_size: 0, ..c }).validate() {
            Err(AfskError::InvalidTableSize(0)) => {},
            _ => panic!(),
        }

        match (AfskConfig { prepend: 2, ..c }).validate() {
            Err(AfskError::InvalidFraming { prepend: 2, postpend: 3 }) => {},
            _ => panic!(),
        }
    }
}
