/// Baseband samples per second.
pub const SAMPLE_RATE: u32 = 8000;
/// Bits per second on the line (Bell 202).
pub const BIT_RATE: u32 = 1200;
/// Tone used for a line-level 1 bit.
pub const MARK_FREQ: u32 = 1200;
/// Tone used for a line-level 0 bit.
pub const SPACE_FREQ: u32 = 2200;
/// Number of entries in the single-cycle sine table.
pub const TABLE_SIZE: usize = 256;
/// Largest supported sine table, so a full cycle of phase fits in a `Q16`.
pub const MAX_TABLE_SIZE: usize = 1 << 15;
/// Peak amplitude of the sine table.
pub const AMPLITUDE: f64 = i16::MAX as f64;

/// Key-up warm-up period covered by the preamble, in milliseconds.
pub const WARMUP_MS: u32 = 500;
/// Bytes of line idle plus leading flags before the frame.
pub const PREPEND: usize = (BIT_RATE * WARMUP_MS / 8000) as usize;
/// Number of flags bracketing the frame on each side.
pub const POSTPEND: usize = 3;
/// HDLC frame delimiter.
pub const FLAG: u8 = 0x7E;
/// Run of 1 bits after which a 0 is stuffed.
pub const STUFF_RUN: usize = 5;

/// Bytes in an encoded address field.
pub const ADDRESS_BYTES: usize = 7;
/// Characters in the callsign part of an address.
pub const CALLSIGN_LEN: usize = 6;
/// Largest representable SSID.
pub const MAX_SSID: u8 = 15;
/// Maximum number of digipeaters in the address path.
pub const MAX_DIGIPEATERS: usize = 8;
/// Maximum number of bytes in the information field.
pub const MAX_INFO_LEN: usize = 256;
/// Control field for an unnumbered information (UI) frame.
pub const CONTROL_UI: u8 = 0x03;
/// Protocol ID indicating no layer 3 protocol.
pub const PID_NO_LAYER3: u8 = 0xF0;
/// Bytes in the frame check sequence.
pub const FCS_BYTES: usize = 2;
/// Largest possible unstuffed frame.
pub const MAX_FRAME_LEN: usize = ADDRESS_BYTES * (2 + MAX_DIGIPEATERS) + 2 + MAX_INFO_LEN +
    FCS_BYTES;

/// Maximum number of characters in an APRS position comment.
pub const MAX_COMMENT_LEN: usize = 43;
