//! AX.25 station addresses.
//!
//! An address field is 7 bytes: six callsign characters, space padded and each shifted
//! left one bit, then an SSID byte laid out as `0b011SSSSE`, where `SSSS` is the SSID
//! and `E` marks the last address in the header.

use std::fmt;
use std::str::FromStr;

use collect_slice::CollectSlice;

use crate::consts;
use crate::error::{AfskError, Result};

/// Reserved SSID byte bits, always set.
const SSID_RESERVED: u8 = 0b0110_0000;
/// Address extension bit, set on the last address.
const SSID_LAST: u8 = 0b0000_0001;

/// A station callsign and SSID.
///
/// Callsigns are upper-cased on construction. Over-length callsigns and SSIDs above 15
/// are rejected rather than truncated or masked.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct Address {
    callsign: String,
    ssid: u8,
}

impl Address {
    /// Construct a new `Address`, validating the callsign and SSID.
    pub fn new(callsign: &str, ssid: u8) -> Result<Address> {
        let callsign = callsign.trim();

        if callsign.is_empty() {
            return Err(AfskError::EmptyCallsign);
        }

        if let Some(c) = callsign.chars().find(|&c| !c.is_ascii_graphic() || c == '-') {
            return Err(AfskError::InvalidCallsignChar(c));
        }

        if callsign.len() > consts::CALLSIGN_LEN {
            return Err(AfskError::CallsignTooLong(callsign.to_string()));
        }

        if ssid > consts::MAX_SSID {
            return Err(AfskError::SsidOutOfRange(ssid));
        }

        Ok(Address {
            callsign: callsign.to_ascii_uppercase(),
            ssid,
        })
    }

    pub fn callsign(&self) -> &str { &self.callsign }
    pub fn ssid(&self) -> u8 { self.ssid }

    /// Encode into an address field, setting the extension bit if `last`.
    pub fn encode(&self, last: bool) -> [u8; consts::ADDRESS_BYTES] {
        let mut buf = [b' ' << 1; consts::ADDRESS_BYTES];

        self.callsign.bytes()
            .map(|b| b << 1)
            .collect_slice(&mut buf[..consts::CALLSIGN_LEN]);

        buf[consts::CALLSIGN_LEN] = SSID_RESERVED | self.ssid << 1 |
            (if last { SSID_LAST } else { 0 });

        trace!(address = %self, last, "encoded address");

        buf
    }
}

impl FromStr for Address {
    type Err = AfskError;

    /// Parse `CALL` or `CALL-SSID`, taking SSID 0 if none is given.
    fn from_str(s: &str) -> Result<Address> {
        match s.split_once('-') {
            Some((call, ssid)) => {
                let ssid = ssid.trim().parse::<u8>()
                    .map_err(|_| AfskError::MalformedAddress(s.to_string()))?;

                Address::new(call, ssid)
            },
            None => Address::new(s, 0),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.ssid == 0 {
            write!(f, "{}", self.callsign)
        } else {
            write!(f, "{}-{}", self.callsign, self.ssid)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(Address::new("APZ", 0).unwrap().encode(false), [
            b'A' << 1, b'P' << 1, b'Z' << 1, b' ' << 1, b' ' << 1, b' ' << 1,
            0b0110_0000,
        ]);

        assert_eq!(Address::new("N0CALL", 7).unwrap().encode(false),
                   [0x9C, 0x60, 0x86, 0x82, 0x98, 0x98, 0x6E]);

        assert_eq!(Address::new("WIDE1", 1).unwrap().encode(true),
                   [0xAE, 0x92, 0x88, 0x8A, 0x62, 0x40, 0x63]);

        assert_eq!(Address::new("n0call", 15).unwrap().encode(true)[6], 0b0111_1111);
    }

    #[test]
    fn test_validate() {
        assert_eq!(Address::new(" ab1cd ", 3).unwrap().callsign(), "AB1CD");

        match Address::new("N0CALLX", 0) {
            Err(AfskError::CallsignTooLong(ref c)) if c == "N0CALLX" => {},
            _ => panic!(),
        }

        match Address::new("N0CALL", 16) {
            Err(AfskError::SsidOutOfRange(16)) => {},
            _ => panic!(),
        }

        match Address::new("", 0) {
            Err(AfskError::EmptyCallsign) => {},
            _ => panic!(),
        }

        match Address::new("N0 CL", 0) {
            Err(AfskError::InvalidCallsignChar(' ')) => {},
            _ => panic!(),
        }

        match Address::new("NÖCALL", 0) {
            Err(AfskError::InvalidCallsignChar('Ö')) => {},
            _ => panic!(),
        }
    }

    #[test]
    fn test_parse() {
        let a: Address = "N0CALL-7".parse().unwrap();
        assert_eq!(a, Address::new("N0CALL", 7).unwrap());
        assert_eq!(a.to_string(), "N0CALL-7");

        let a: Address = "apz".parse().unwrap();
        assert_eq!(a.ssid(), 0);
        assert_eq!(a.to_string(), "APZ");

        match "N0CALL-X".parse::<Address>() {
            Err(AfskError::MalformedAddress(_)) => {},
            _ => panic!(),
        }

        match "N0CALL-1-2".parse::<Address>() {
            Err(AfskError::MalformedAddress(_)) => {},
            _ => panic!(),
        }

        match "N0CALL-99".parse::<Address>() {
            Err(AfskError::SsidOutOfRange(99)) => {},
            _ => panic!(),
        }
    }
}
