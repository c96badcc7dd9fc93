//! Layout analysis.
//!
//! Shallow analysis lists the placeholder types each layout declares. Deep
//! analysis creates a transient slide from every layout and reports the
//! geometry the placeholders actually end up with, falling back to the layout's
//! declared geometry wherever measuring is not possible.
use crate::common::error::ProbeError;
use crate::common::unit::Emu;
use crate::coords::{PercentBox, ResolvedBox, SlideGeometry, to_percentages};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::slide::inherit_geometry;
use crate::ooxml::pptx::{Package, PlaceholderShape, PlaceholderType, Presentation, Xfrm, with_transient_slide};
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};

/// How a placeholder's geometry was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSource {
    /// Declared by the layout (or inherited from its master); an all-zero box
    /// when neither declares one
    Template,
    /// Measured on a slide created from the layout
    Instantiated,
    /// The layout could not be measured and declares no box; all zero
    Error,
}

/// Placeholder geometry in EMUs, with the same box as slide percentages.
///
/// Offsets are reported as declared and may be negative for placeholders that
/// stick out of the slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaceholderBox {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
    pub percent: PercentBox,
}

impl PlaceholderBox {
    fn new(xfrm: Option<Xfrm>, geometry: &SlideGeometry) -> Self {
        let Xfrm { x, y, cx, cy } = xfrm.unwrap_or_default();
        let bbox = ResolvedBox {
            left: x,
            top: y,
            width: cx,
            height: cy,
        };
        Self {
            left: x,
            top: y,
            width: cx,
            height: cy,
            percent: to_percentages(&bbox, geometry),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderDescriptor {
    /// Upper-case type name such as `TITLE` or `SLIDE_NUMBER`
    #[serde(rename = "type")]
    pub ph_type: String,
    pub type_code: u32,
    pub index: u32,
    pub name: String,
    pub position_source: PositionSource,
    #[serde(rename = "box")]
    pub bbox: PlaceholderBox,
}

impl PlaceholderDescriptor {
    fn new(
        shape: &PlaceholderShape,
        xfrm: Option<Xfrm>,
        source: PositionSource,
        geometry: &SlideGeometry,
    ) -> Self {
        Self {
            ph_type: shape.ph_type.name().to_string(),
            type_code: shape.ph_type.code(),
            index: shape.idx,
            name: shape.name.clone(),
            position_source: source,
            bbox: PlaceholderBox::new(xfrm, geometry),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDescriptor {
    /// Position across all masters' layouts
    pub index: usize,
    /// Position within its master's layout list
    pub original_index: usize,
    pub name: String,
    pub placeholder_count: usize,
    pub master_index: usize,
    pub placeholders: Vec<PlaceholderDescriptor>,
    /// Deduplicated type names; shallow analysis only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_types_summary: Option<Vec<String>>,
    pub instantiation_complete: bool,
}

impl LayoutDescriptor {
    /// Whether the layout declares a placeholder of `ph_type`.
    pub fn has_placeholder_type(&self, ph_type: PlaceholderType) -> bool {
        let name = ph_type.name();
        match &self.placeholder_types_summary {
            Some(types) => types.iter().any(|t| t == name),
            None => self.placeholders.iter().any(|p| p.ph_type == name),
        }
    }
}

/// Everything needed to analyze one layout, read up front so the package can
/// be borrowed mutably during deep analysis.
#[derive(Debug, Clone)]
pub(crate) struct LayoutInfo {
    pub index: usize,
    pub original_index: usize,
    /// `None` when the master's reference to the layout does not resolve
    pub partname: Option<PackURI>,
    /// The master's relationship id for this layout
    pub r_id: String,
    pub name: String,
    pub master_index: usize,
    /// Declared placeholders, or why they could not be read
    pub placeholders: std::result::Result<Vec<PlaceholderShape>, String>,
    pub master_placeholders: Vec<PlaceholderShape>,
}

impl LayoutInfo {
    fn label(&self) -> String {
        match &self.partname {
            _ if !self.name.is_empty() => self.name.clone(),
            Some(partname) => partname.to_string(),
            None => format!("{} of master {}", self.r_id, self.master_index),
        }
    }
}

/// Read every layout of every master, in master order. The master index of
/// each layout is recorded in the same pass.
///
/// A layout reference that does not resolve still yields an entry, with the
/// lookup failure as its placeholder error.
pub(crate) fn collect_layouts(pres: &Presentation<'_>) -> crate::common::error::Result<Vec<LayoutInfo>> {
    let mut infos = Vec::new();

    for (master_index, master) in pres.slide_masters()?.iter().enumerate() {
        let master_placeholders = master.placeholders().unwrap_or_else(|e| {
            tracing::debug!(master = %master.partname(), error = %e, "master placeholders unreadable");
            Vec::new()
        });

        for (original_index, (r_id, layout)) in master.slide_layout_refs()?.into_iter().enumerate() {
            let (partname, name, placeholders) = match layout {
                Ok(layout) => (
                    Some(layout.partname().clone()),
                    layout.name().unwrap_or_default(),
                    layout.placeholders().map_err(|e| e.to_string()),
                ),
                Err(e) => {
                    tracing::debug!(master = %master.partname(), r_id = %r_id, error = %e, "layout reference unresolved");
                    (None, String::new(), Err(e.to_string()))
                },
            };

            infos.push(LayoutInfo {
                index: infos.len(),
                original_index,
                partname,
                r_id,
                name,
                master_index,
                placeholders,
                master_placeholders: master_placeholders.clone(),
            });
        }
    }

    Ok(infos)
}

/// Outcome of the layout loop.
#[derive(Debug, Default)]
pub(crate) struct LayoutAnalysis {
    pub layouts: Vec<LayoutDescriptor>,
    pub analysis_complete: bool,
    pub warnings: Vec<String>,
}

/// Analyze `infos` in order, stopping before a layout once `timeout` has
/// elapsed since `started`.
pub(crate) fn analyze_layouts(
    package: &mut Package,
    infos: &[LayoutInfo],
    geometry: &SlideGeometry,
    deep: bool,
    started: Instant,
    timeout: Duration,
) -> LayoutAnalysis {
    let mut analysis = LayoutAnalysis {
        analysis_complete: true,
        ..LayoutAnalysis::default()
    };

    for info in infos {
        if started.elapsed() >= timeout {
            analysis.analysis_complete = false;
            analysis.warnings.push(format!(
                "timeout of {:.1}s reached; analyzed {} of {} layouts",
                timeout.as_secs_f64(),
                analysis.layouts.len(),
                infos.len()
            ));
            tracing::warn!(analyzed = analysis.layouts.len(), total = infos.len(), "layout analysis timed out");
            break;
        }

        let descriptor = if deep {
            analyze_deep(package, info, geometry, &mut analysis.warnings)
        } else {
            analyze_shallow(info, &mut analysis.warnings)
        };
        tracing::debug!(
            layout = %info.label(),
            placeholders = descriptor.placeholder_count,
            complete = descriptor.instantiation_complete,
            "analyzed layout"
        );
        analysis.layouts.push(descriptor);
    }

    analysis.warnings.extend(package.take_diagnostics());
    analysis
}

fn base_descriptor(info: &LayoutInfo, placeholder_count: usize) -> LayoutDescriptor {
    LayoutDescriptor {
        index: info.index,
        original_index: info.original_index,
        name: info.name.clone(),
        placeholder_count,
        master_index: info.master_index,
        placeholders: Vec::new(),
        placeholder_types_summary: None,
        instantiation_complete: true,
    }
}

fn unreadable(info: &LayoutInfo, reason: &str, warnings: &mut Vec<String>) {
    warnings.push(format!("layout '{}' could not be read: {}", info.label(), reason));
}

fn analyze_shallow(info: &LayoutInfo, warnings: &mut Vec<String>) -> LayoutDescriptor {
    let placeholders = match &info.placeholders {
        Ok(placeholders) => placeholders.as_slice(),
        Err(reason) => {
            unreadable(info, reason, warnings);
            &[]
        },
    };

    let mut types: Vec<String> = Vec::new();
    for ph in placeholders {
        let name = ph.ph_type.name();
        if !types.iter().any(|t| t == name) {
            types.push(name.to_string());
        }
    }

    LayoutDescriptor {
        placeholder_types_summary: Some(types),
        ..base_descriptor(info, placeholders.len())
    }
}

fn analyze_deep(
    package: &mut Package,
    info: &LayoutInfo,
    geometry: &SlideGeometry,
    warnings: &mut Vec<String>,
) -> LayoutDescriptor {
    let (declared, partname) = match (&info.placeholders, &info.partname) {
        (Ok(placeholders), Some(partname)) => (placeholders, partname),
        (placeholders, _) => {
            let reason = placeholders.as_ref().err().map_or("layout part missing", String::as_str);
            unreadable(info, reason, warnings);
            return LayoutDescriptor {
                instantiation_complete: false,
                ..base_descriptor(info, 0)
            };
        },
    };

    let measured = with_transient_slide(package, partname, |slide| slide.placeholders())
        .and_then(|inner| inner);
    let instantiated: Option<HashMap<(u32, PlaceholderType), Xfrm>> = match measured {
        Ok(shapes) => {
            let mut by_key = HashMap::with_capacity(shapes.len());
            for ph in shapes {
                let Some(xfrm) = ph.xfrm else { continue };
                match by_key.entry((ph.idx, ph.ph_type.base_type())) {
                    Entry::Vacant(slot) => {
                        slot.insert(xfrm);
                    },
                    Entry::Occupied(_) => {
                        tracing::debug!(layout = %info.label(), idx = ph.idx, "duplicate placeholder key, keeping the first");
                    },
                }
            }
            Some(by_key)
        },
        Err(e) => {
            let err = ProbeError::InstantiationFailed {
                layout: info.label(),
                reason: e.to_string(),
            };
            tracing::warn!(error = %err, "falling back to template geometry");
            warnings.push(err.to_string());
            None
        },
    };

    let template = inherit_geometry(declared.clone(), &[], &info.master_placeholders);
    let placeholders = declared
        .iter()
        .zip(&template)
        .map(|(shape, inherited)| {
            let key = (shape.idx, shape.ph_type.base_type());
            match (instantiated.as_ref(), inherited.xfrm) {
                (Some(measured), _) if measured.contains_key(&key) => PlaceholderDescriptor::new(
                    shape,
                    measured.get(&key).copied(),
                    PositionSource::Instantiated,
                    geometry,
                ),
                (_, Some(xfrm)) => {
                    PlaceholderDescriptor::new(shape, Some(xfrm), PositionSource::Template, geometry)
                },
                // Measured, but no level declares a box: the layout's own zero box
                (Some(_), None) => PlaceholderDescriptor::new(shape, None, PositionSource::Template, geometry),
                // Not measurable and nothing declared
                (None, None) => PlaceholderDescriptor::new(shape, None, PositionSource::Error, geometry),
            }
        })
        .collect();

    LayoutDescriptor {
        placeholders,
        instantiation_complete: instantiated.is_some(),
        ..base_descriptor(info, declared.len())
    }
}
