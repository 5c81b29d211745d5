//! Bell 202 AFSK tone synthesis.
//!
//! Line bits are rendered as one of two tones from a shared sine table, indexed by a
//! 16.16 phase accumulator. The phase is never reset, so the waveform stays continuous
//! across tone changes.
//!
//! Two synthesizers are provided. `ExactSynthesizer` clocks bits with a second 16.16
//! accumulator, so a bit period of 6⅔ samples (8000 Hz at 1200 baud) is honored on
//! average. `NaiveSynthesizer` gives every bit a whole number of samples, rounding the
//! period down, so the bit rate drifts high; it's kept as a reference to compare
//! against.

use std::sync::Arc;

use crate::bits::Bit;
use crate::config::AfskConfig;
use crate::error::{AfskError, Result};
use crate::fixed::Q16;
use crate::lut::SineTable;

/// Selects a tone synthesizer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub enum Synthesis {
    /// Fractional bit clock; average bit period is exact.
    Exact,
    /// Whole samples per bit; bit period is rounded down.
    Naive,
}

/// Renders NRZI line bits as audio samples.
pub trait Synthesizer: Send + Sync {
    /// Render the given line bits, mark for a 1 and space for a 0.
    fn synthesize(&self, bits: &[Bit]) -> Vec<i16>;

    /// Number of samples rendered for the given number of bits.
    fn output_len(&self, bits: usize) -> usize;
}

/// Construct the synthesizer selected by the given config, reading tones from the
/// given table.
pub fn synthesizer(config: &AfskConfig, table: Arc<SineTable>)
    -> Result<Box<dyn Synthesizer>>
{
    Ok(match config.synthesis {
        Synthesis::Exact => Box::new(ExactSynthesizer::new(config, table)?),
        Synthesis::Naive => Box::new(NaiveSynthesizer::new(config, table)?),
    })
}

/// Per-sample phase steps for the mark and space tones.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ToneSteps {
    mark: Q16,
    space: Q16,
    /// Phase of one full cycle: the table size as a `Q16`.
    cycle: Q16,
}

impl ToneSteps {
    /// Compute steps of `freq * size * 2^16 / sample_rate` for the configured tones.
    pub fn new(config: &AfskConfig) -> Result<ToneSteps> {
        config.validate()?;

        let step = |freq: u32| {
            Q16::ratio(freq as u64 * config.table_size as u64, config.sample_rate as u64)
                .ok_or(AfskError::StepOverflow)
                .and_then(nonzero)
        };

        Ok(ToneSteps {
            mark: step(config.mark)?,
            space: step(config.space)?,
            cycle: Q16::from_bits((config.table_size as u32) << 16),
        })
    }

    pub fn mark(&self) -> Q16 { self.mark }
    pub fn space(&self) -> Q16 { self.space }

    /// Get the step for the tone of the given line bit.
    pub fn step(&self, bit: Bit) -> Q16 {
        if bit.is_one() { self.mark } else { self.space }
    }
}

/// Tone phase accumulator, kept within one table cycle.
#[derive(Copy, Clone, Debug)]
struct TonePhase {
    phase: Q16,
    cycle: Q16,
}

impl TonePhase {
    fn new(cycle: Q16) -> TonePhase {
        TonePhase {
            phase: Q16::default(),
            cycle,
        }
    }

    /// Current table index.
    fn index(&self) -> usize { self.phase.whole() as usize }

    fn advance(&mut self, step: Q16) {
        self.phase = self.phase.add_mod(step, self.cycle);
    }
}

/// Bit timing accumulator, counting fractions of a bit period per sample.
#[derive(Copy, Clone, Debug)]
struct BitClock {
    phase: Q16,
    step: Q16,
}

impl BitClock {
    fn new(step: Q16) -> BitClock {
        BitClock {
            phase: Q16::default(),
            step,
        }
    }

    /// Advance by one sample, returning true if a bit period elapsed.
    fn tick(&mut self) -> bool {
        // Step is at most 1.0 and phase stays below 1.0, so this can't overflow.
        self.phase = Q16::from_bits(self.phase.bits() + self.step.bits());

        match self.phase.checked_sub(Q16::one()) {
            Some(rest) => {
                self.phase = rest;
                true
            },
            None => false,
        }
    }
}

/// Synthesizer with a fractional bit clock.
pub struct ExactSynthesizer {
    table: Arc<SineTable>,
    steps: ToneSteps,
    /// Fraction of a bit period per sample: `bit_rate * 2^16 / sample_rate`.
    bit_step: Q16,
    sample_rate: u32,
    bit_rate: u32,
}

impl ExactSynthesizer {
    pub fn new(config: &AfskConfig, table: Arc<SineTable>) -> Result<ExactSynthesizer> {
        let steps = ToneSteps::new(config)?;
        check_table(config, &table)?;

        let bit_step = Q16::ratio(config.bit_rate as u64, config.sample_rate as u64)
            .ok_or(AfskError::StepOverflow)
            .and_then(nonzero)?;

        debug!(mark = steps.mark.bits(), space = steps.space.bits(),
               bit = bit_step.bits(), "exact synthesizer");

        Ok(ExactSynthesizer {
            table,
            steps,
            bit_step,
            sample_rate: config.sample_rate,
            bit_rate: config.bit_rate,
        })
    }

    /// Iterate over the samples for the given line bits.
    pub fn tones<'a>(&'a self, bits: &'a [Bit]) -> ExactTones<'a> {
        ExactTones {
            table: &self.table,
            bits,
            steps: self.steps,
            phase: TonePhase::new(self.steps.cycle),
            clock: BitClock::new(self.bit_step),
            pos: 0,
            remain: self.output_len(bits.len()),
        }
    }
}

impl Synthesizer for ExactSynthesizer {
    fn synthesize(&self, bits: &[Bit]) -> Vec<i16> {
        let mut samples = Vec::with_capacity(self.output_len(bits.len()));
        samples.extend(self.tones(bits));
        samples
    }

    fn output_len(&self, bits: usize) -> usize {
        (bits as u64 * self.sample_rate as u64 / self.bit_rate as u64) as usize
    }
}

/// Yields the samples of `ExactSynthesizer` for a run of line bits.
pub struct ExactTones<'a> {
    table: &'a SineTable,
    bits: &'a [Bit],
    steps: ToneSteps,
    phase: TonePhase,
    clock: BitClock,
    /// Index of the current bit.
    pos: usize,
    /// Samples left to yield.
    remain: usize,
}

impl<'a> ExactTones<'a> {
    /// Number of bit periods completed so far.
    pub fn bits_sent(&self) -> usize { self.pos }
}

impl<'a> Iterator for ExactTones<'a> {
    type Item = i16;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remain == 0 {
            return None;
        }

        let bit = *self.bits.get(self.pos)?;
        let sample = self.table[self.phase.index()];

        self.phase.advance(self.steps.step(bit));
        self.remain -= 1;

        if self.clock.tick() {
            self.pos += 1;
        }

        Some(sample)
    }
}

/// Synthesizer giving every bit `floor(sample_rate / bit_rate)` samples.
pub struct NaiveSynthesizer {
    table: Arc<SineTable>,
    steps: ToneSteps,
    samples_per_bit: usize,
}

impl NaiveSynthesizer {
    pub fn new(config: &AfskConfig, table: Arc<SineTable>) -> Result<NaiveSynthesizer> {
        let steps = ToneSteps::new(config)?;
        check_table(config, &table)?;

        if config.sample_rate % config.bit_rate != 0 {
            warn!(sample_rate = config.sample_rate, bit_rate = config.bit_rate,
                  "naive synthesis truncates the bit period and will drift");
        }

        Ok(NaiveSynthesizer {
            table,
            steps,
            samples_per_bit: config.samples_per_bit() as usize,
        })
    }

    /// Iterate over the samples for the given line bits.
    pub fn tones<'a>(&'a self, bits: &'a [Bit]) -> NaiveTones<'a> {
        NaiveTones {
            table: &self.table,
            bits,
            steps: self.steps,
            phase: TonePhase::new(self.steps.cycle),
            samples_per_bit: self.samples_per_bit,
            pos: 0,
            sample: 0,
        }
    }
}

impl Synthesizer for NaiveSynthesizer {
    fn synthesize(&self, bits: &[Bit]) -> Vec<i16> {
        let mut samples = Vec::with_capacity(self.output_len(bits.len()));
        samples.extend(self.tones(bits));
        samples
    }

    fn output_len(&self, bits: usize) -> usize { bits * self.samples_per_bit }
}

/// Yields the samples of `NaiveSynthesizer` for a run of line bits.
pub struct NaiveTones<'a> {
    table: &'a SineTable,
    bits: &'a [Bit],
    steps: ToneSteps,
    phase: TonePhase,
    samples_per_bit: usize,
    /// Index of the current bit.
    pos: usize,
    /// Index of the next sample within the current bit.
    sample: usize,
}

impl<'a> NaiveTones<'a> {
    /// Number of bit periods completed so far.
    pub fn bits_sent(&self) -> usize { self.pos }
}

impl<'a> Iterator for NaiveTones<'a> {
    type Item = i16;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = *self.bits.get(self.pos)?;
        let sample = self.table[self.phase.index()];

        self.phase.advance(self.steps.step(bit));
        self.sample += 1;

        if self.sample == self.samples_per_bit {
            self.sample = 0;
            self.pos += 1;
        }

        Some(sample)
    }
}

/// Reject a step too small for the accumulator to ever advance.
fn nonzero(step: Q16) -> Result<Q16> {
    if step.bits() == 0 {
        Err(AfskError::StepUnderflow)
    } else {
        Ok(step)
    }
}

/// Verify the given table has the configured size.
fn check_table(config: &AfskConfig, table: &SineTable) -> Result<()> {
    if table.len() == config.table_size {
        Ok(())
    } else {
        Err(AfskError::InvalidTableSize(table.len()))
    }
}
