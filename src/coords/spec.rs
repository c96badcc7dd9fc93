//! Coordinate specifications: the five ways a caller can say where an element
//! goes, and the ways it can say how big it is.
//!
//! Every type here can be parsed from text:
//!
//! | Text                  | Meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `10%,25%`             | [`Position::Percentage`]                  |
//! | `center`              | [`Position::Anchor`] without offset       |
//! | `center+0.5in,-1in`   | [`Position::Anchor`] with offsets         |
//! | `grid:2,3`            | [`Position::Grid`], row 2, column 3       |
//! | `grid:2,3,24`         | [`Position::Grid`] on a 24x24 grid        |
//! | `C4`                  | [`Position::CellLabel`]                   |
//! | `1in,2cm`             | [`Position::Absolute`]                    |
//!
//! and for a single dimension `25%`, `grid:3`, `grid:3,24`, `2in`, `auto`.
use crate::common::error::{ProbeError, Result};
use crate::common::unit::{Emu, Length};
use crate::coords::cell::{looks_like_cell_label, parse_cell_label};
use phf::phf_map;
use std::fmt;
use std::str::FromStr;

/// Grid size used when none is given.
pub const DEFAULT_GRID_SIZE: u32 = 12;

/// Alignment of an anchor along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisAlign {
    Start,
    Middle,
    End,
}

/// Nine named anchor points on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorPoint {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

static ANCHOR_NAMES: phf::Map<&'static str, AnchorPoint> = phf_map! {
    "top_left" => AnchorPoint::TopLeft,
    "top_center" => AnchorPoint::TopCenter,
    "top_right" => AnchorPoint::TopRight,
    "middle_left" => AnchorPoint::MiddleLeft,
    "center" => AnchorPoint::Center,
    "middle_right" => AnchorPoint::MiddleRight,
    "bottom_left" => AnchorPoint::BottomLeft,
    "bottom_center" => AnchorPoint::BottomCenter,
    "bottom_right" => AnchorPoint::BottomRight,
};

impl AnchorPoint {
    pub const ALL: [AnchorPoint; 9] = [
        AnchorPoint::TopLeft,
        AnchorPoint::TopCenter,
        AnchorPoint::TopRight,
        AnchorPoint::MiddleLeft,
        AnchorPoint::Center,
        AnchorPoint::MiddleRight,
        AnchorPoint::BottomLeft,
        AnchorPoint::BottomCenter,
        AnchorPoint::BottomRight,
    ];

    /// Look up an anchor by name; case-insensitive, `-` accepted for `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        ANCHOR_NAMES.get(normalized.as_str()).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnchorPoint::TopLeft => "top_left",
            AnchorPoint::TopCenter => "top_center",
            AnchorPoint::TopRight => "top_right",
            AnchorPoint::MiddleLeft => "middle_left",
            AnchorPoint::Center => "center",
            AnchorPoint::MiddleRight => "middle_right",
            AnchorPoint::BottomLeft => "bottom_left",
            AnchorPoint::BottomCenter => "bottom_center",
            AnchorPoint::BottomRight => "bottom_right",
        }
    }

    /// Horizontal and vertical alignment.
    pub fn alignment(&self) -> (AxisAlign, AxisAlign) {
        use AxisAlign::*;
        match self {
            AnchorPoint::TopLeft => (Start, Start),
            AnchorPoint::TopCenter => (Middle, Start),
            AnchorPoint::TopRight => (End, Start),
            AnchorPoint::MiddleLeft => (Start, Middle),
            AnchorPoint::Center => (Middle, Middle),
            AnchorPoint::MiddleRight => (End, Middle),
            AnchorPoint::BottomLeft => (Start, End),
            AnchorPoint::BottomCenter => (Middle, End),
            AnchorPoint::BottomRight => (End, End),
        }
    }
}

impl fmt::Display for AnchorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnchorPoint {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| ProbeError::InvalidCoordinateSpec(format!("unknown anchor '{}'", s)))
    }
}

/// Where the top-left corner of an element goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    /// Percentages of slide width and height, each in `[0, 100]`
    Percentage { left: f64, top: f64 },
    /// A named point, adjusted for the element size, plus offsets that may be
    /// negative
    Anchor {
        point: AnchorPoint,
        offset_x: Emu,
        offset_y: Emu,
    },
    /// 1-based cell of an N x N grid
    Grid { row: u32, col: u32, grid_size: u32 },
    /// Column letters and 1-based row; uses the resolver's grid size
    CellLabel { column: String, row: u32 },
    Absolute { left: Emu, top: Emu },
}

impl Position {
    /// Row and column on the default 12x12 grid.
    pub fn grid(row: u32, col: u32) -> Self {
        Position::Grid {
            row,
            col,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }

    pub fn anchor(point: AnchorPoint) -> Self {
        Position::Anchor {
            point,
            offset_x: 0,
            offset_y: 0,
        }
    }

    /// Parse a label such as `"C4"`.
    pub fn cell(label: &str) -> Result<Self> {
        let (column, row) = parse_cell_label(label)?;
        Ok(Position::CellLabel { column, row })
    }
}

impl FromStr for Position {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid("empty position", s));
        }

        if let Some(rest) = strip_prefix_ignore_case(s, "grid:") {
            let numbers = parse_u32_list(rest, s)?;
            return match numbers.as_slice() {
                [row, col] => Ok(Position::grid(*row, *col)),
                [row, col, grid_size] => Ok(Position::Grid {
                    row: *row,
                    col: *col,
                    grid_size: *grid_size,
                }),
                _ => Err(invalid("expected grid:ROW,COL[,SIZE]", s)),
            };
        }

        let (head, offsets) = match s.split_once('+') {
            Some((head, offsets)) => (head, Some(offsets)),
            None => (s, None),
        };
        if let Some(point) = AnchorPoint::from_name(head) {
            let (offset_x, offset_y) = match offsets {
                Some(offsets) => parse_length_pair(offsets, s)?,
                None => (0, 0),
            };
            return Ok(Position::Anchor {
                point,
                offset_x,
                offset_y,
            });
        }

        if looks_like_cell_label(s) {
            return Position::cell(s);
        }

        let (left, top) = s
            .split_once(',')
            .ok_or_else(|| invalid("expected two comma-separated values", s))?;
        if left.trim_end().ends_with('%') && top.trim_end().ends_with('%') {
            return Ok(Position::Percentage {
                left: parse_percent(left, s)?,
                top: parse_percent(top, s)?,
            });
        }

        let (left, top) = parse_length_pair(s, s)?;
        Ok(Position::Absolute { left, top })
    }
}

/// One size dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    /// Percentage of the matching slide dimension
    Percentage(f64),
    /// Span of `cells` grid cells
    Grid { cells: u32, grid_size: u32 },
    Absolute(Emu),
    /// Derived from the other dimension and the source aspect ratio
    Auto,
}

impl FromStr for Dimension {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Dimension::Auto);
        }
        if s.ends_with('%') {
            return Ok(Dimension::Percentage(parse_percent(s, s)?));
        }
        if let Some(rest) = strip_prefix_ignore_case(s, "grid:") {
            return match parse_u32_list(rest, s)?.as_slice() {
                [cells] => Ok(Dimension::Grid {
                    cells: *cells,
                    grid_size: DEFAULT_GRID_SIZE,
                }),
                [cells, grid_size] => Ok(Dimension::Grid {
                    cells: *cells,
                    grid_size: *grid_size,
                }),
                _ => Err(invalid("expected grid:CELLS[,SIZE]", s)),
            };
        }
        Ok(Dimension::Absolute(s.parse::<Length>()?.to_emu()))
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSpec {
    pub width: Dimension,
    pub height: Dimension,
}

impl SizeSpec {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    pub fn absolute(width: Emu, height: Emu) -> Self {
        Self::new(Dimension::Absolute(width), Dimension::Absolute(height))
    }

    /// Parse width and height given separately, e.g. `("50%", "auto")`.
    pub fn parse(width: &str, height: &str) -> Result<Self> {
        Ok(Self::new(width.parse()?, height.parse()?))
    }
}

/// A position together with a size.
///
/// # Examples
///
/// ```
/// use pptx_probe::coords::{CoordinateSpec, SizeSpec};
///
/// let spec = CoordinateSpec::new("center+0in,-1in".parse()?, SizeSpec::parse("4in", "1in")?);
/// # Ok::<(), pptx_probe::ProbeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSpec {
    pub position: Position,
    pub size: SizeSpec,
}

impl CoordinateSpec {
    pub fn new(position: Position, size: SizeSpec) -> Self {
        Self { position, size }
    }
}

fn invalid(reason: &str, input: &str) -> ProbeError {
    ProbeError::InvalidCoordinateSpec(format!("{} in '{}'", reason, input))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &s[prefix.len()..])
}

fn parse_u32_list(list: &str, input: &str) -> Result<Vec<u32>> {
    list.split(',')
        .map(|part| {
            atoi_simd::parse::<u32, false, false>(part.trim().as_bytes())
                .map_err(|_| invalid("expected a non-negative integer", input))
        })
        .collect()
}

fn parse_percent(value: &str, input: &str) -> Result<f64> {
    let number = value.trim().trim_end_matches('%').trim();
    let pct: f64 = number
        .parse()
        .map_err(|_| invalid("invalid percentage", input))?;
    if !pct.is_finite() {
        return Err(invalid("percentage is not finite", input));
    }
    Ok(pct)
}

fn parse_length_pair(pair: &str, input: &str) -> Result<(Emu, Emu)> {
    let (x, y) = pair
        .split_once(',')
        .ok_or_else(|| invalid("expected two comma-separated lengths", input))?;
    Ok((x.parse::<Length>()?.to_emu(), y.parse::<Length>()?.to_emu()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positions() {
        assert_eq!(
            "10%, 25.5%".parse::<Position>().unwrap(),
            Position::Percentage { left: 10.0, top: 25.5 }
        );
        assert_eq!("grid:2,3".parse::<Position>().unwrap(), Position::grid(2, 3));
        assert_eq!(
            "GRID:2,3,24".parse::<Position>().unwrap(),
            Position::Grid { row: 2, col: 3, grid_size: 24 }
        );
        assert_eq!(
            "c4".parse::<Position>().unwrap(),
            Position::CellLabel { column: "C".to_string(), row: 4 }
        );
        assert_eq!(
            "1in,2in".parse::<Position>().unwrap(),
            Position::Absolute { left: 914_400, top: 1_828_800 }
        );
    }

    #[test]
    fn test_parse_anchor() {
        assert_eq!(
            "center".parse::<Position>().unwrap(),
            Position::anchor(AnchorPoint::Center)
        );
        assert_eq!(
            "bottom-right+0.5in,-1in".parse::<Position>().unwrap(),
            Position::Anchor {
                point: AnchorPoint::BottomRight,
                offset_x: 457_200,
                offset_y: -914_400,
            }
        );
        for point in AnchorPoint::ALL {
            assert_eq!(point.name().parse::<AnchorPoint>().unwrap(), point);
        }
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!("auto".parse::<Dimension>().unwrap(), Dimension::Auto);
        assert_eq!("50%".parse::<Dimension>().unwrap(), Dimension::Percentage(50.0));
        assert_eq!(
            "grid:3".parse::<Dimension>().unwrap(),
            Dimension::Grid { cells: 3, grid_size: 12 }
        );
        assert_eq!("2cm".parse::<Dimension>().unwrap(), Dimension::Absolute(720_000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Position>().is_err());
        assert!("middle".parse::<Position>().is_err());
        assert!("grid:1".parse::<Position>().is_err());
        assert!("grid:a,b".parse::<Position>().is_err());
        assert!("center+1in".parse::<Position>().is_err());
        assert!("10%".parse::<Position>().is_err());
        assert!("grid:".parse::<Dimension>().is_err());
        assert!("wide".parse::<Dimension>().is_err());
    }
}
