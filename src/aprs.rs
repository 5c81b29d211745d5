//! APRS position report information fields.
//!
//! A report is laid out as a data type identifier, an optional timestamp, the
//! latitude, the symbol table, the longitude, the symbol code, and a free-form
//! comment:
//!
//! ```text
//! !4903.50N/07201.75WbPHG0020Test 001234
//! ```

use crate::consts;
use crate::error::{AfskError, Result};

/// Microdegrees per degree.
const MICRO: i64 = 1_000_000;

/// Report timestamp.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub enum Timestamp {
    /// Day of month, hour, and minute, in UTC: `DDHHMMz`.
    Dhm { day: u8, hour: u8, minute: u8 },
    /// Hour, minute, and second, in UTC: `HHMMSSh`.
    Hms { hour: u8, minute: u8, second: u8 },
    /// Day of month, hour, and minute, in local time: `DDHHMM/`.
    Local { day: u8, hour: u8, minute: u8 },
}

impl Timestamp {
    /// Verify each field is in range.
    pub fn validate(&self) -> Result<()> {
        let ok = match *self {
            Timestamp::Dhm { day, hour, minute } |
            Timestamp::Local { day, hour, minute } =>
                (1..=31).contains(&day) && hour < 24 && minute < 60,
            Timestamp::Hms { hour, minute, second } =>
                hour < 24 && minute < 60 && second < 60,
        };

        if ok { Ok(()) } else { Err(AfskError::InvalidTimestamp) }
    }

    fn text(&self) -> String {
        match *self {
            Timestamp::Dhm { day, hour, minute } =>
                format!("{:02}{:02}{:02}z", day, hour, minute),
            Timestamp::Hms { hour, minute, second } =>
                format!("{:02}{:02}{:02}h", hour, minute, second),
            Timestamp::Local { day, hour, minute } =>
                format!("{:02}{:02}{:02}/", day, hour, minute),
        }
    }
}

/// A latitude or longitude.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct Coordinate {
    microdegrees: i64,
}

impl Coordinate {
    pub fn from_microdegrees(microdegrees: i64) -> Coordinate {
        Coordinate { microdegrees }
    }

    /// Construct from decimal degrees, rounding to the nearest microdegree.
    ///
    /// Degrees must be finite and within ±180.
    pub fn from_degrees(degrees: f64) -> Result<Coordinate> {
        if !degrees.is_finite() || degrees.abs() > 180.0 {
            return Err(AfskError::CoordinateOutOfRange(degrees));
        }

        Ok(Coordinate::from_microdegrees((degrees * MICRO as f64).round() as i64))
    }

    pub fn microdegrees(&self) -> i64 { self.microdegrees }

    /// Verify the coordinate is within `limit` degrees of zero.
    fn validate(&self, limit: u64) -> Result<()> {
        if self.microdegrees.unsigned_abs() <= limit * MICRO as u64 {
            Ok(())
        } else {
            Err(AfskError::CoordinateOutOfRange(self.microdegrees as f64 / MICRO as f64))
        }
    }

    /// Format as degrees and minutes to hundredths, `DDMM.mmN` for a latitude or
    /// `DDDMM.mmE` for a longitude.
    ///
    /// Must only be called on a validated coordinate.
    fn text(&self, lat: bool) -> String {
        let micro = MICRO as u64;
        // Hundredths of a minute, rounded to nearest.
        let total = (self.microdegrees.unsigned_abs() * 6000 + micro / 2) / micro;
        let deg = total / 6000;
        let min = total % 6000;

        let hemi = match (lat, self.microdegrees >= 0) {
            (true, true) => 'N',
            (true, false) => 'S',
            (false, true) => 'E',
            (false, false) => 'W',
        };

        if lat {
            format!("{:02}{:02}.{:02}{}", deg, min / 100, min % 100, hemi)
        } else {
            format!("{:03}{:02}.{:02}{}", deg, min / 100, min % 100, hemi)
        }
    }
}

/// An APRS position report.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
pub struct PositionReport {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    /// Symbol table identifier, `/` for the primary table.
    pub symbol_table: char,
    /// Symbol within the table.
    pub symbol_code: char,
    pub comment: Option<String>,
    pub timestamp: Option<Timestamp>,
    /// Whether the station can receive APRS messages.
    pub messaging: bool,
}

impl PositionReport {
    /// Construct a new `PositionReport` at the given position with no timestamp or
    /// comment.
    pub fn new(latitude: Coordinate, longitude: Coordinate, symbol_table: char,
               symbol_code: char)
        -> PositionReport
    {
        PositionReport {
            latitude,
            longitude,
            symbol_table,
            symbol_code,
            comment: None,
            timestamp: None,
            messaging: false,
        }
    }

    pub fn with_comment<S: Into<String>>(self, comment: S) -> PositionReport {
        PositionReport { comment: Some(comment.into()), ..self }
    }

    /// Data type identifier for the report.
    pub fn identifier(&self) -> char {
        match (self.timestamp.is_some(), self.messaging) {
            (true, true) => '@',
            (true, false) => '/',
            (false, true) => '=',
            (false, false) => '!',
        }
    }

    /// Encode into information field text.
    pub fn encode(&self) -> Result<String> {
        self.latitude.validate(90)?;
        self.longitude.validate(180)?;

        if let Some(ts) = self.timestamp {
            ts.validate()?;
        }

        if let Some(ref c) = self.comment {
            let len = c.chars().count();

            if len > consts::MAX_COMMENT_LEN {
                return Err(AfskError::CommentTooLong(len));
            }
        }

        let mut buf = String::new();

        buf.push(self.identifier());

        if let Some(ts) = self.timestamp {
            buf.push_str(&ts.text());
        }

        buf.push_str(&self.latitude.text(true));
        buf.push(self.symbol_table);
        buf.push_str(&self.longitude.text(false));
        buf.push(self.symbol_code);

        if let Some(ref c) = self.comment {
            buf.push_str(c);
        }

        Ok(buf)
    }
}
