//! Unit conversion utilities.
//!
//! All geometry is carried in EMUs (English Metric Units), the fixed-point length
//! unit of Office Open XML. Everything else (inches, centimetres, points, slide
//! percentages, pixel estimates) is converted at the edges with the helpers here.

use crate::common::error::{ProbeError, Result};
use std::fmt;
use std::str::FromStr;

/// A length in EMUs.
pub type Emu = i64;

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_MM: i64 = 36_000;
pub const EMUS_PER_PT: i64 = 12_700;

/// Pixel estimates assume a 96 DPI display.
pub const DEFAULT_DPI: u32 = 96;

#[inline]
pub fn inches_to_emu(inches: f64) -> Emu {
    (inches * EMUS_PER_INCH as f64).round() as Emu
}

#[inline]
pub fn emu_to_inches(emu: Emu) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

#[inline]
pub fn cm_to_emu(cm: f64) -> Emu {
    (cm * EMUS_PER_CM as f64).round() as Emu
}

#[inline]
pub fn emu_to_cm(emu: Emu) -> f64 {
    emu as f64 / EMUS_PER_CM as f64
}

#[inline]
pub fn pt_to_emu(pt: f64) -> Emu {
    (pt * EMUS_PER_PT as f64).round() as Emu
}

#[inline]
pub fn emu_to_pt(emu: Emu) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

#[inline]
pub fn px_to_emu(px: f64, dpi: u32) -> Emu {
    (px * EMUS_PER_INCH as f64 / dpi as f64).round() as Emu
}

#[inline]
pub fn emu_to_px(emu: Emu, dpi: u32) -> i64 {
    (emu as f64 * dpi as f64 / EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn emu_to_px_96(emu: Emu) -> i64 {
    emu_to_px(emu, DEFAULT_DPI)
}

/// Absolute length for `pct` percent of `dimension`.
///
/// 0% and 100% map exactly onto the slide edges: `100 * d` and the division by
/// 100 are both exact in `f64` for any slide size an OOXML file can declare.
#[inline]
pub fn percent_to_emu(pct: f64, dimension: Emu) -> Emu {
    (pct * dimension as f64 / 100.0).round() as Emu
}

/// Percentage of `dimension` covered by `emu`, rounded to one decimal place.
///
/// A zero dimension yields 0.0 rather than NaN.
#[inline]
pub fn emu_to_percent(emu: Emu, dimension: Emu) -> f64 {
    if dimension == 0 {
        return 0.0;
    }
    round1(emu as f64 / dimension as f64 * 100.0)
}

/// Round to one decimal place.
#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Supported length units for textual lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// English Metric Unit (native)
    Emu,
    /// Inch
    Inch,
    /// Centimeter
    Centimeter,
    /// Millimeter
    Millimeter,
    /// Point (1/72 inch)
    Point,
    /// Pixel at 96 DPI
    Pixel,
}

impl LengthUnit {
    /// Get the unit abbreviation
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emu => "emu",
            Self::Inch => "in",
            Self::Centimeter => "cm",
            Self::Millimeter => "mm",
            Self::Point => "pt",
            Self::Pixel => "px",
        }
    }

    fn from_str_internal(s: &str) -> Option<Self> {
        match s {
            "" | "emu" => Some(Self::Emu),
            "in" | "inch" | "\"" => Some(Self::Inch),
            "cm" => Some(Self::Centimeter),
            "mm" => Some(Self::Millimeter),
            "pt" => Some(Self::Point),
            "px" => Some(Self::Pixel),
            _ => None,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Length value with unit, as written by a caller.
///
/// # Examples
///
/// ```
/// use pptx_probe::common::unit::{Length, LengthUnit};
///
/// let length = "1.5in".parse::<Length>().unwrap();
/// assert_eq!(length.unit(), LengthUnit::Inch);
/// assert_eq!(length.to_emu(), 1_371_600);
///
/// // A bare number is already in EMUs
/// let length = "914400".parse::<Length>().unwrap();
/// assert_eq!(length.to_emu(), 914_400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    /// Create a new length measurement
    #[inline]
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Get the numeric value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the unit
    #[inline]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Convert to EMUs, rounding to the nearest whole unit.
    pub fn to_emu(&self) -> Emu {
        match self.unit {
            LengthUnit::Emu => self.value.round() as Emu,
            LengthUnit::Inch => inches_to_emu(self.value),
            LengthUnit::Centimeter => cm_to_emu(self.value),
            LengthUnit::Millimeter => (self.value * EMUS_PER_MM as f64).round() as Emu,
            LengthUnit::Point => pt_to_emu(self.value),
            LengthUnit::Pixel => px_to_emu(self.value, DEFAULT_DPI),
        }
    }
}

impl FromStr for Length {
    type Err = ProbeError;

    /// Parse a length such as `"2.5cm"`, `"-1in"`, `"36pt"` or `"914400"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (digits, suffix) = s.split_at(split);

        if digits.is_empty() || digits == "-" || digits == "+" {
            return Err(ProbeError::InvalidCoordinateSpec(format!(
                "no numeric value found in length '{}'",
                s
            )));
        }

        let value: f64 = digits.parse().map_err(|_| {
            ProbeError::InvalidCoordinateSpec(format!("failed to parse length '{}'", s))
        })?;
        if !value.is_finite() {
            return Err(ProbeError::InvalidCoordinateSpec(format!(
                "length '{}' is not finite",
                s
            )));
        }

        let unit = LengthUnit::from_str_internal(&suffix.trim().to_ascii_lowercase())
            .ok_or_else(|| {
                ProbeError::InvalidCoordinateSpec(format!("unknown length unit in '{}'", s))
            })?;

        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        let length = "2.5cm".parse::<Length>().unwrap();
        assert_eq!(length.value(), 2.5);
        assert_eq!(length.unit(), LengthUnit::Centimeter);
        assert_eq!(length.to_emu(), 900_000);

        let length = "36pt".parse::<Length>().unwrap();
        assert_eq!(length.to_emu(), 457_200);

        let length = "-1in".parse::<Length>().unwrap();
        assert_eq!(length.to_emu(), -914_400);

        let length = "96px".parse::<Length>().unwrap();
        assert_eq!(length.to_emu(), EMUS_PER_INCH);

        let length = "12700".parse::<Length>().unwrap();
        assert_eq!(length.unit(), LengthUnit::Emu);
        assert_eq!(length.to_emu(), 12_700);
    }

    #[test]
    fn test_parse_length_rejects_garbage() {
        assert!("".parse::<Length>().is_err());
        assert!("cm".parse::<Length>().is_err());
        assert!("3furlongs".parse::<Length>().is_err());
        assert!("-".parse::<Length>().is_err());
    }

    #[test]
    fn test_percent_edges_are_exact() {
        let width = 9_144_000;
        assert_eq!(percent_to_emu(0.0, width), 0);
        assert_eq!(percent_to_emu(100.0, width), width);
        assert_eq!(percent_to_emu(50.0, width), 4_572_000);
    }

    #[test]
    fn test_emu_to_percent() {
        assert_eq!(emu_to_percent(4_572_000, 9_144_000), 50.0);
        assert_eq!(emu_to_percent(1_000_000, 9_144_000), 10.9);
        assert_eq!(emu_to_percent(5, 0), 0.0);
    }

    #[test]
    fn test_pixel_estimates() {
        assert_eq!(emu_to_px_96(EMUS_PER_INCH), 96);
        assert_eq!(emu_to_px(EMUS_PER_INCH, 72), 72);
        assert_eq!(px_to_emu(48.0, 96), EMUS_PER_INCH / 2);
    }

    #[test]
    fn test_round_trips_through_inches() {
        assert_eq!(inches_to_emu(emu_to_inches(6_858_000)), 6_858_000);
        assert_eq!(emu_to_pt(pt_to_emu(18.0)), 18.0);
        assert!((emu_to_cm(cm_to_emu(2.54)) - 2.54).abs() < 1e-9);
    }
}
