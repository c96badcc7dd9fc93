//! Slide dimensions and their aspect-ratio label.
use crate::common::unit::{EMUS_PER_INCH, Emu, emu_to_inches};

/// Known aspect ratios, tried in this order when matching.
const KNOWN_RATIOS: [(&str, f64); 9] = [
    ("16:9", 16.0 / 9.0),
    ("16:10", 16.0 / 10.0),
    ("4:3", 4.0 / 3.0),
    ("3:2", 3.0 / 2.0),
    ("5:4", 5.0 / 4.0),
    ("1:1", 1.0),
    ("21:9", 21.0 / 9.0),
    ("9:16", 9.0 / 16.0),
    ("3:4", 3.0 / 4.0),
];

/// Relative tolerance for matching a known ratio.
const RATIO_TOLERANCE: f64 = 0.01;

/// Width and height of a slide in EMUs.
///
/// # Examples
///
/// ```
/// use pptx_probe::coords::SlideGeometry;
///
/// let geometry = SlideGeometry::new(9_144_000, 6_858_000);
/// assert_eq!(geometry.aspect_ratio_label(), "4:3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideGeometry {
    pub width: Emu,
    pub height: Emu,
}

impl SlideGeometry {
    /// The format's default slide size, 10in x 7.5in.
    pub const DEFAULT: SlideGeometry = SlideGeometry {
        width: 10 * EMUS_PER_INCH,
        height: 7 * EMUS_PER_INCH + EMUS_PER_INCH / 2,
    };

    #[inline]
    pub const fn new(width: Emu, height: Emu) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width_inches(&self) -> f64 {
        emu_to_inches(self.width)
    }

    #[inline]
    pub fn height_inches(&self) -> f64 {
        emu_to_inches(self.height)
    }

    /// Width divided by height; 0.0 for a zero height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    /// The nearest known ratio within 1%, else the reduced `w:h` fraction.
    pub fn aspect_ratio_label(&self) -> String {
        if self.width <= 0 || self.height <= 0 {
            return format!("{}:{}", self.width, self.height);
        }

        let ratio = self.aspect_ratio();
        let nearest = KNOWN_RATIOS
            .iter()
            .map(|&(label, known)| (label, ((ratio - known) / known).abs()))
            .fold(None, |best: Option<(&str, f64)>, candidate| match best {
                Some(b) if b.1 <= candidate.1 => Some(b),
                _ => Some(candidate),
            });

        match nearest {
            Some((label, diff)) if diff <= RATIO_TOLERANCE => label.to_string(),
            _ => {
                let divisor = gcd(self.width, self.height);
                format!("{}:{}", self.width / divisor, self.height / divisor)
            },
        }
    }
}

impl Default for SlideGeometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs().max(1)
}
