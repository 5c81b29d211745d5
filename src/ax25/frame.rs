//! Unnumbered information (UI) frame assembly.
//!
//! A frame is laid out as
//!
//! ```text
//! | Dest (7) | Source (7) | Path (0-56) | Control (1) | PID (1) | Info (0-256) | FCS (2) |
//! ```
//!
//! with the FCS computed over every preceding byte and appended LSB first.

use crate::ax25::address::Address;
use crate::ax25::crc;
use crate::consts;
use crate::error::{AfskError, Result};

/// A UI frame carrying an information field with no layer 3 protocol.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct UiFrame {
    dest: Address,
    source: Address,
    path: Vec<Address>,
    info: Vec<u8>,
}

impl UiFrame {
    /// Construct a new `UiFrame`, validating the path and information lengths.
    pub fn new(dest: Address, source: Address, path: Vec<Address>, info: Vec<u8>)
        -> Result<UiFrame>
    {
        if path.len() > consts::MAX_DIGIPEATERS {
            return Err(AfskError::TooManyDigipeaters(path.len()));
        }

        if info.len() > consts::MAX_INFO_LEN {
            return Err(AfskError::InfoTooLong(info.len()));
        }

        Ok(UiFrame {
            dest,
            source,
            path,
            info,
        })
    }

    pub fn dest(&self) -> &Address { &self.dest }
    pub fn source(&self) -> &Address { &self.source }
    pub fn path(&self) -> &[Address] { &self.path }
    pub fn info(&self) -> &[u8] { &self.info }

    /// Number of bytes before the information field.
    pub fn header_len(&self) -> usize {
        consts::ADDRESS_BYTES * (2 + self.path.len()) + 2
    }

    /// Number of bytes in the encoded frame, FCS included.
    pub fn len(&self) -> usize {
        self.header_len() + self.info.len() + consts::FCS_BYTES
    }

    /// Always false, since the header is never empty.
    pub fn is_empty(&self) -> bool { false }

    /// Encode into frame bytes with a trailing FCS.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len());

        buf.extend_from_slice(&self.dest.encode(false));
        buf.extend_from_slice(&self.source.encode(self.path.is_empty()));

        for (i, digi) in self.path.iter().enumerate() {
            buf.extend_from_slice(&digi.encode(i + 1 == self.path.len()));
        }

        buf.push(consts::CONTROL_UI);
        buf.push(consts::PID_NO_LAYER3);
        buf.extend_from_slice(&self.info);

        let fcs = crc::fcs(&buf);
        buf.push(fcs as u8);
        buf.push((fcs >> 8) as u8);

        debug!(dest = %self.dest, source = %self.source, digis = self.path.len(),
               len = buf.len(), fcs, "built UI frame");

        buf
    }
}

/// Build and encode a UI frame from the given addresses and information field.
pub fn build_ui_frame(dest: Address, source: Address, path: &[Address], info: &[u8])
    -> Result<Vec<u8>>
{
    Ok(UiFrame::new(dest, source, path.to_vec(), info.to_vec())?.encode())
}

#[cfg(test)]
mod test {
    use super::*;

    fn addr(s: &str) -> Address { s.parse().unwrap() }

    #[test]
    fn test_reference() {
        let f = UiFrame::new(addr("APZ"), addr("N0CALL-7"), vec![addr("WIDE1-1")],
                             b"!4903.50N/07201.75WbPHG0020Test 001234".to_vec()).unwrap();
        let b = f.encode();

        assert_eq!(b.len(), 63);
        assert_eq!(f.len(), 63);
        assert_eq!(&b[..7], &[0x82, 0xA0, 0xB4, 0x40, 0x40, 0x40, 0x60]);
        assert_eq!(&b[7..14], &[0x9C, 0x60, 0x86, 0x82, 0x98, 0x98, 0x6E]);
        assert_eq!(&b[14..21], &[0xAE, 0x92, 0x88, 0x8A, 0x62, 0x40, 0x63]);
        assert_eq!(&b[21..23], &[0x03, 0xF0]);
        assert_eq!(&b[23..61], &b"!4903.50N/07201.75WbPHG0020Test 001234"[..]);
        assert_eq!(&b[61..], &[0xBE, 0xB3]);
        assert_eq!(crc::fcs(&b[..61]), 0xB3BE);
    }

    #[test]
    fn test_empty_info() {
        let b = build_ui_frame(addr("APZ"), addr("N0CALL-7"), &[], &[]).unwrap();

        assert_eq!(b.len(), 7 + 7 + 2 + 2);
        // Source is last without a path.
        assert_eq!(b[13], 0x6F);
        assert_eq!(b[6] & 1, 0);
        assert_eq!(&b[14..16], &[0x03, 0xF0]);
        assert_eq!(&b[16..], &[0xD2, 0x69]);
    }

    #[test]
    fn test_path_last() {
        let path = vec![addr("WIDE1-1"), addr("WIDE2-2"), addr("RELAY")];
        let b = build_ui_frame(addr("APZ"), addr("N0CALL"), &path, b"x").unwrap();

        for i in 0..4 {
            assert_eq!(b[7 * i + 6] & 1, 0);
        }

        assert_eq!(b[7 * 4 + 6] & 1, 1);
    }

    #[test]
    fn test_limits() {
        let path = vec![addr("WIDE1-1"); 9];

        match UiFrame::new(addr("APZ"), addr("N0CALL"), path, vec![]) {
            Err(AfskError::TooManyDigipeaters(9)) => {},
            _ => panic!(),
        }

        match UiFrame::new(addr("APZ"), addr("N0CALL"), vec![], vec![b'x'; 257]) {
            Err(AfskError::InfoTooLong(257)) => {},
            _ => panic!(),
        }

        let f = UiFrame::new(addr("APZ"), addr("N0CALL"), vec![addr("WIDE1-1"); 8],
                             vec![b'x'; 256]).unwrap();
        assert_eq!(f.encode().len(), consts::MAX_FRAME_LEN);
    }
}
