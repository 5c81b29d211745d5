//! Complete transmit path: addresses and payload in, audio samples out.

use std::sync::Arc;

use crate::afsk::{self, Synthesizer};
use crate::aprs::PositionReport;
use crate::ax25::{Address, UiFrame};
use crate::config::AfskConfig;
use crate::error::Result;
use crate::hdlc::{Bitstream, Framer};
use crate::lut::SineTable;

/// The reference payload: a bicycle at 49°03.50'N 72°01.75'W, 1 W into a 2 dBi omni.
pub const REFERENCE_INFO: &str = "!4903.50N/07201.75WbPHG0020Test 001234";

/// Addressing for frames sent by one station.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct Station {
    /// Destination, which for APRS identifies the sending software.
    pub dest: Address,
    pub source: Address,
    /// Digipeater path.
    pub path: Vec<Address>,
}

impl Station {
    /// Construct a new `Station` from `CALL-SSID` text.
    pub fn parse(dest: &str, source: &str, path: &[&str]) -> Result<Station> {
        Ok(Station {
            dest: dest.parse()?,
            source: source.parse()?,
            path: path.iter().map(|p| p.parse()).collect::<Result<Vec<_>>>()?,
        })
    }

    /// The reference station: `N0CALL-7` to `APZ` via `WIDE1-1`.
    pub fn reference() -> Result<Station> {
        Station::parse("APZ", "N0CALL-7", &["WIDE1-1"])
    }

    /// Build a UI frame carrying the given information field.
    pub fn frame(&self, info: &[u8]) -> Result<UiFrame> {
        UiFrame::new(self.dest.clone(), self.source.clone(), self.path.clone(),
                     info.to_vec())
    }

    /// Build a UI frame carrying the given position report.
    pub fn position_frame(&self, report: &PositionReport) -> Result<UiFrame> {
        self.frame(report.encode()?.as_bytes())
    }
}

/// Every artifact produced while transmitting one frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transmission {
    frame: Vec<u8>,
    bits: Bitstream,
    samples: Vec<i16>,
    sample_rate: u32,
}

impl Transmission {
    /// Frame bytes, FCS included.
    pub fn frame(&self) -> &[u8] { &self.frame }
    /// Bit-level stages of the frame.
    pub fn bits(&self) -> &Bitstream { &self.bits }
    /// Mono PCM samples.
    pub fn samples(&self) -> &[i16] { &self.samples }
    pub fn sample_rate(&self) -> u32 { self.sample_rate }

    /// Time on air, in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn into_samples(self) -> Vec<i16> { self.samples }
}

/// Frames, line-codes, and synthesizes audio for UI frames.
pub struct Beacon {
    config: AfskConfig,
    framer: Framer,
    synth: Box<dyn Synthesizer>,
}

impl Beacon {
    /// Construct a new `Beacon`, computing a sine table for the given config.
    pub fn new(config: AfskConfig) -> Result<Beacon> {
        config.validate()?;
        Beacon::with_table(config, Arc::new(SineTable::new(config.table_size)?))
    }

    /// Construct a new `Beacon` reading tones from the given table.
    pub fn with_table(config: AfskConfig, table: Arc<SineTable>) -> Result<Beacon> {
        Ok(Beacon {
            framer: Framer::from_config(&config)?,
            synth: afsk::synthesizer(&config, table)?,
            config,
        })
    }

    pub fn config(&self) -> &AfskConfig { &self.config }

    /// Encode and render the given frame.
    pub fn transmit(&self, frame: &UiFrame) -> Transmission {
        self.modulate(frame.encode())
    }

    /// Render already encoded frame bytes.
    pub fn modulate(&self, frame: Vec<u8>) -> Transmission {
        let bits = self.framer.encode(&frame);
        let samples = self.synth.synthesize(bits.encoded());

        info!(bytes = frame.len(), bits = bits.encoded().len(), samples = samples.len(),
              synthesis = ?self.config.synthesis, "modulated frame");

        Transmission {
            frame,
            bits,
            samples,
            sample_rate: self.config.sample_rate,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::afsk::Synthesis;

    #[test]
    fn test_reference() {
        let frame = Station::reference().unwrap().frame(REFERENCE_INFO.as_bytes()).unwrap();
        let t = Beacon::new(AfskConfig::default()).unwrap().transmit(&frame);

        assert_eq!(t.frame().len(), 63);
        assert_eq!(t.bits().raw().len(), 504);
        assert_eq!(t.bits().stuffed().len(), 506);
        assert_eq!(t.bits().encoded().len(), 1130);
        assert_eq!(t.samples().len(), 7533);
        assert!((t.duration() - 0.941625).abs() < 1e-9);
    }

    #[test]
    fn test_naive() {
        let c = AfskConfig::default().with_synthesis(Synthesis::Naive);
        let frame = Station::reference().unwrap().frame(b"").unwrap();
        let t = Beacon::new(c).unwrap().transmit(&frame);

        assert_eq!(t.samples().len(), t.bits().encoded().len() * 6);
    }

    #[test]
    fn test_station() {
        let s = Station::parse("APZ", "n0call-7", &[]).unwrap();
        assert_eq!(s.source.to_string(), "N0CALL-7");
        assert!(s.path.is_empty());
        assert!(Station::parse("APZ", "TOOLONGCALL", &[]).is_err());
    }
}
