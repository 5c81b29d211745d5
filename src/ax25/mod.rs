//! AX.25 link layer: addresses, frame check sequence, and UI frames.

pub mod address;
pub mod crc;
pub mod frame;

pub use self::address::Address;
pub use self::crc::fcs;
pub use self::frame::{build_ui_frame, UiFrame};
