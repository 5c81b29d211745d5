//! Implements the 16-bit frame check sequence defined by AX.25.
//!
//! The FCS is the "X.25" CRC: the CCITT polynomial x^16 + x^12 + x^5 + 1 processed in
//! reflected (LSB first) form, so the register shifts right and is reduced by the
//! bit-reversed polynomial 0x8408.

/// AX.25 frame check sequence calculator.
pub type Fcs = Crc<X25Params>;

pub trait CrcParams {
    /// Reflected generator polynomial, with the LSB being the coefficient of highest
    /// degree (below the implied x^16 term).
    fn poly() -> u16;

    /// Initial register contents.
    fn init() -> u16;

    /// Mask XORed into the register to produce the final CRC.
    fn inv() -> u16;
}

/// Params for the X.25 CRC used as the AX.25 FCS.
pub struct X25Params;

impl CrcParams for X25Params {
    fn poly() -> u16 { 0x8408 }
    fn init() -> u16 { 0xFFFF }
    fn inv() -> u16 { 0xFFFF }
}

/// Reflected 16-bit CRC calculator.
pub struct Crc<P: CrcParams> {
    params: std::marker::PhantomData<P>,
    /// Current register.
    word: u16,
}

impl<P: CrcParams> Crc<P> {
    /// Construct a new `Crc` with the initial register.
    pub fn new() -> Crc<P> {
        Crc {
            params: std::marker::PhantomData,
            word: P::init(),
        }
    }

    /// Feed in the given byte, LSB first.
    pub fn feed(&mut self, byte: u8) -> &mut Self {
        self.word ^= byte as u16;

        for _ in 0..8 {
            self.word = if self.word & 1 == 1 {
                self.word >> 1 ^ P::poly()
            } else {
                self.word >> 1
            };
        }

        self
    }

    /// Feed in the given byte stream.
    pub fn feed_bytes<T: IntoIterator<Item = u8>>(&mut self, bytes: T) -> &mut Self {
        for byte in bytes {
            self.feed(byte);
        }

        self
    }

    /// Finish the CRC calculation and return the resulting CRC.
    pub fn finish(&self) -> u16 {
        self.word ^ P::inv()
    }
}

impl<P: CrcParams> Default for Crc<P> {
    fn default() -> Crc<P> { Crc::new() }
}

/// Compute the AX.25 FCS over the given bytes.
pub fn fcs(bytes: &[u8]) -> u16 {
    Fcs::new().feed_bytes(bytes.iter().cloned()).finish()
}
