//! Errors that may occur when building frames or configuring the modem.

use thiserror::Error;

/// Frame encoding and modem configuration errors.
///
/// All of these are raised while validating input, before any bits or samples are
/// produced.
#[derive(Error, Debug)]
pub enum AfskError {
    /// The callsign has no characters.
    #[error("callsign is empty")]
    EmptyCallsign,
    /// The callsign doesn't fit in the six character address field.
    #[error("callsign `{0}` is longer than six characters")]
    CallsignTooLong(String),
    /// The callsign contains a character that can't be carried in an address.
    #[error("callsign contains invalid character {0:?}")]
    InvalidCallsignChar(char),
    /// The SSID doesn't fit in four bits.
    #[error("SSID {0} is outside 0-15")]
    SsidOutOfRange(u8),
    /// Address text isn't of the form `CALL` or `CALL-SSID`.
    #[error("malformed address `{0}`")]
    MalformedAddress(String),
    /// The address path has more digipeaters than AX.25 allows.
    #[error("{0} digipeaters given, at most 8 allowed")]
    TooManyDigipeaters(usize),
    /// The information field is longer than AX.25 allows.
    #[error("information field is {0} bytes, at most 256 allowed")]
    InfoTooLong(usize),

    /// A sample or bit rate of zero.
    #[error("sample rate and bit rate must be nonzero")]
    ZeroRate,
    /// The sample rate is too low to give each bit at least one sample.
    #[error("sample rate {sample_rate} Hz gives no samples per bit at {bit_rate} baud")]
    ZeroSamplesPerBit { sample_rate: u32, bit_rate: u32 },
    /// A tone that is zero or at/above the Nyquist frequency.
    #[error("tone {freq} Hz is not representable at sample rate {sample_rate} Hz")]
    ToneOutOfRange { freq: u32, sample_rate: u32 },
    /// A sine table that is empty or too large for the phase accumulator.
    #[error("sine table size {0} is not in 1-32768")]
    InvalidTableSize(usize),
    /// Fewer preamble bytes than leading flags.
    #[error("prepend of {prepend} bytes can't hold {postpend} flags")]
    InvalidFraming { prepend: usize, postpend: usize },
    /// A phase step doesn't fit in the fixed-point accumulator.
    #[error("fixed-point phase step overflowed")]
    StepOverflow,
    /// A phase step is below the fixed-point resolution, so the accumulator would
    /// never advance.
    #[error("fixed-point phase step rounds to zero")]
    StepUnderflow,

    /// An APRS comment longer than a position report allows.
    #[error("comment is {0} characters, at most 43 allowed")]
    CommentTooLong(usize),
    /// A latitude or longitude, in degrees, that is not finite or is outside the
    /// valid range.
    #[error("coordinate {0} degrees is out of range")]
    CoordinateOutOfRange(f64),
    /// A timestamp field outside its valid range.
    #[error("invalid timestamp")]
    InvalidTimestamp,

    /// The audio sink failed.
    #[error("failed to write audio: {0}")]
    Wav(#[from] hound::Error),
}

/// Standard result using `AfskError`.
pub type Result<T> = std::result::Result<T, AfskError>;
