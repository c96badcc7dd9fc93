//! Resolution of coordinate specifications into absolute EMU boxes, and the
//! inverse view as slide percentages.
use crate::common::error::{ProbeError, Result};
use crate::common::unit::{Emu, emu_to_percent, percent_to_emu};
use crate::coords::cell::column_index;
use crate::coords::geometry::SlideGeometry;
use crate::coords::spec::{AxisAlign, CoordinateSpec, DEFAULT_GRID_SIZE, Dimension, Position};
use serde::Serialize;

/// An absolute box in EMUs. All fields are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResolvedBox {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl ResolvedBox {
    #[inline]
    pub fn right(&self) -> Emu {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> Emu {
        self.top + self.height
    }
}

/// A box as percentages of the slide, one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PercentBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Express `bbox` as percentages of `geometry`, rounded to one decimal place.
pub fn to_percentages(bbox: &ResolvedBox, geometry: &SlideGeometry) -> PercentBox {
    PercentBox {
        left: emu_to_percent(bbox.left, geometry.width),
        top: emu_to_percent(bbox.top, geometry.height),
        width: emu_to_percent(bbox.width, geometry.width),
        height: emu_to_percent(bbox.height, geometry.height),
    }
}

/// Resolve with the default 12x12 grid.
///
/// # Examples
///
/// ```
/// use pptx_probe::coords::{CoordinateSpec, Position, SizeSpec, SlideGeometry, resolve};
///
/// let geometry = SlideGeometry::new(9_144_000, 6_858_000);
/// let spec = CoordinateSpec::new(Position::grid(1, 1), SizeSpec::parse("grid:6", "50%")?);
/// let bbox = resolve(&spec, &geometry, None)?;
/// assert_eq!((bbox.left, bbox.top, bbox.width, bbox.height), (0, 0, 4_572_000, 3_429_000));
/// # Ok::<(), pptx_probe::ProbeError>(())
/// ```
pub fn resolve(
    spec: &CoordinateSpec,
    geometry: &SlideGeometry,
    source_aspect_ratio: Option<f64>,
) -> Result<ResolvedBox> {
    Resolver::default().resolve(spec, geometry, source_aspect_ratio)
}

/// Resolves coordinate specifications against a slide.
///
/// The grid size only applies to cell labels; grid positions and spans carry
/// their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    grid_size: u32,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an N x N grid for cell labels.
    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    #[inline]
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Resolve `spec` into an absolute box on `geometry`.
    ///
    /// `source_aspect_ratio` (source width / height) is needed only when a
    /// dimension is [`Dimension::Auto`]. Any value that would come out negative
    /// is an error, never clamped.
    pub fn resolve(
        &self,
        spec: &CoordinateSpec,
        geometry: &SlideGeometry,
        source_aspect_ratio: Option<f64>,
    ) -> Result<ResolvedBox> {
        if geometry.width <= 0 || geometry.height <= 0 {
            return Err(ProbeError::InvalidCoordinateSpec(format!(
                "slide geometry {}x{} is not positive",
                geometry.width, geometry.height
            )));
        }

        let (width, height) = self.resolve_size(spec, geometry, source_aspect_ratio)?;
        let (left, top) = self.resolve_position(&spec.position, geometry, width, height)?;

        if left < 0 || top < 0 {
            return Err(ProbeError::InvalidCoordinateSpec(format!(
                "position resolves to ({}, {}), outside the slide",
                left, top
            )));
        }

        Ok(ResolvedBox {
            left,
            top,
            width,
            height,
        })
    }

    fn resolve_size(
        &self,
        spec: &CoordinateSpec,
        geometry: &SlideGeometry,
        source_aspect_ratio: Option<f64>,
    ) -> Result<(Emu, Emu)> {
        let width = resolve_dimension(&spec.size.width, geometry.width, "width")?;
        let height = resolve_dimension(&spec.size.height, geometry.height, "height")?;

        let ratio = || -> Result<f64> {
            match source_aspect_ratio {
                Some(r) if r.is_finite() && r > 0.0 => Ok(r),
                Some(r) => Err(ProbeError::InvalidCoordinateSpec(format!(
                    "source aspect ratio {} is not positive",
                    r
                ))),
                None => Err(ProbeError::InvalidCoordinateSpec(
                    "auto size needs a source aspect ratio".to_string(),
                )),
            }
        };

        match (width, height) {
            (Some(w), Some(h)) => Ok((w, h)),
            (None, Some(h)) => Ok(((h as f64 * ratio()?).round() as Emu, h)),
            (Some(w), None) => Ok((w, (w as f64 / ratio()?).round() as Emu)),
            (None, None) => Err(ProbeError::InvalidCoordinateSpec(
                "width and height cannot both be auto".to_string(),
            )),
        }
    }

    fn resolve_position(
        &self,
        position: &Position,
        geometry: &SlideGeometry,
        width: Emu,
        height: Emu,
    ) -> Result<(Emu, Emu)> {
        match position {
            Position::Percentage { left, top } => Ok((
                percentage_of(*left, geometry.width, "left")?,
                percentage_of(*top, geometry.height, "top")?,
            )),
            Position::Anchor {
                point,
                offset_x,
                offset_y,
            } => {
                let (h_align, v_align) = point.alignment();
                Ok((
                    anchor_base(h_align, geometry.width, width) + offset_x,
                    anchor_base(v_align, geometry.height, height) + offset_y,
                ))
            },
            Position::Grid {
                row,
                col,
                grid_size,
            } => grid_origin(*row, *col, *grid_size, geometry),
            Position::CellLabel { column, row } => {
                let col = column_index(column)?.checked_add(1).ok_or_else(|| {
                    ProbeError::InvalidCoordinateSpec(format!("column '{}' too large", column))
                })?;
                grid_origin(*row, col, self.grid_size, geometry)
            },
            Position::Absolute { left, top } => {
                if *left < 0 || *top < 0 {
                    return Err(ProbeError::InvalidCoordinateSpec(format!(
                        "absolute position ({}, {}) is negative",
                        left, top
                    )));
                }
                Ok((*left, *top))
            },
        }
    }
}

/// `None` for an auto dimension.
fn resolve_dimension(dimension: &Dimension, extent: Emu, axis: &str) -> Result<Option<Emu>> {
    match dimension {
        Dimension::Percentage(pct) => percentage_of(*pct, extent, axis).map(Some),
        Dimension::Grid { cells, grid_size } => {
            check_grid_size(*grid_size)?;
            if *cells == 0 || cells > grid_size {
                return Err(ProbeError::InvalidCoordinateSpec(format!(
                    "{} span of {} cells outside 1..={}",
                    axis, cells, grid_size
                )));
            }
            Ok(Some(grid_offset(*cells, extent, *grid_size)))
        },
        Dimension::Absolute(emu) => {
            if *emu < 0 {
                return Err(ProbeError::InvalidCoordinateSpec(format!(
                    "{} {} is negative",
                    axis, emu
                )));
            }
            Ok(Some(*emu))
        },
        Dimension::Auto => Ok(None),
    }
}

fn percentage_of(pct: f64, extent: Emu, axis: &str) -> Result<Emu> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ProbeError::InvalidCoordinateSpec(format!(
            "{} percentage {} outside 0..=100",
            axis, pct
        )));
    }
    Ok(percent_to_emu(pct, extent))
}

/// Base coordinate of an anchor along one axis. Centering uses floor division.
fn anchor_base(align: AxisAlign, extent: Emu, size: Emu) -> Emu {
    match align {
        AxisAlign::Start => 0,
        AxisAlign::Middle => (extent - size).div_euclid(2),
        AxisAlign::End => extent - size,
    }
}

fn check_grid_size(grid_size: u32) -> Result<()> {
    if grid_size == 0 {
        return Err(ProbeError::InvalidCoordinateSpec(
            "grid size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// `cells` whole cells of an `extent` split into `grid_size` parts.
#[inline]
fn grid_offset(cells: u32, extent: Emu, grid_size: u32) -> Emu {
    (cells as i64 * extent) / grid_size as i64
}

fn grid_origin(row: u32, col: u32, grid_size: u32, geometry: &SlideGeometry) -> Result<(Emu, Emu)> {
    check_grid_size(grid_size)?;
    for (name, value) in [("row", row), ("column", col)] {
        if value == 0 || value > grid_size {
            return Err(ProbeError::InvalidCoordinateSpec(format!(
                "grid {} {} outside 1..={}",
                name, value, grid_size
            )));
        }
    }
    Ok((
        grid_offset(col - 1, geometry.width, grid_size),
        grid_offset(row - 1, geometry.height, grid_size),
    ))
}
