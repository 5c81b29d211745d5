//! AX.25/APRS frame encoding and Bell 202 AFSK audio synthesis.
//!
//! Frames are built from station addresses and an information field, protected with
//! the CRC-16/X-25 frame check sequence, serialized LSB first, bit-stuffed, wrapped in
//! flags, NRZI coded, and finally rendered as 1200/2200 Hz tones from a sine table.

extern crate collect_slice;
extern crate hound;
extern crate num;
extern crate thiserror;

#[cfg(feature = "ser")]
extern crate serde;

#[cfg(feature = "ser")]
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate tracing;

pub mod afsk;
pub mod aprs;
pub mod ax25;
pub mod beacon;
pub mod bits;
pub mod config;
pub mod consts;
pub mod error;
pub mod fixed;
pub mod hdlc;
pub mod lut;
pub mod wav;

pub use afsk::{synthesizer, ExactSynthesizer, NaiveSynthesizer, Synthesis, Synthesizer};
pub use ax25::{build_ui_frame, fcs, Address, UiFrame};
pub use beacon::{Beacon, Station, Transmission};
pub use bits::Bit;
pub use config::AfskConfig;
pub use error::{AfskError, Result};
pub use lut::SineTable;
