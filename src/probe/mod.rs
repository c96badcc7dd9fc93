//! Template capability probing.
//!
//! [`probe`] opens a presentation or template read-only and reports its slide
//! geometry, every layout's placeholders, the masters' themes and whether
//! footer, slide-number and date placeholders are available. The file is read
//! once; everything else happens on the in-memory package, and with
//! `verify_integrity` on the file's digest is compared before and after.
//!
//! # Example
//!
//! ```no_run
//! use pptx_probe::{ProbeOptions, probe};
//!
//! # fn main() -> Result<(), pptx_probe::ProbeError> {
//! let report = probe("brand.potx", &ProbeOptions::default())?;
//! for layout in &report.layouts {
//!     println!("{}: {} placeholder(s)", layout.name, layout.placeholder_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod capabilities;
pub mod integrity;
pub mod layouts;
pub mod options;
pub mod report;
pub mod summary;
pub mod theme;

pub use capabilities::{CapabilitySummary, LayoutRef, MasterCapabilities};
pub use integrity::{Checksum, assert_unchanged, checksum, checksum_bytes};
pub use layouts::{LayoutDescriptor, PlaceholderBox, PlaceholderDescriptor, PositionSource};
pub use options::ProbeOptions;
pub use report::{
    CapabilityReport, GeometryDescriptor, MasterDescriptor, ReportMetadata, ReportStatus,
};
pub use summary::render_text;
pub use theme::{FontSource, ThemeColorValue, ThemeDescriptor, ThemeFonts};

use crate::common::error::{ProbeError, Result};
use crate::coords::SlideGeometry;
use crate::ooxml::pptx::Package;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;

/// Probe the template at `path`.
///
/// Problems confined to one layout or to the theme become warnings in the
/// report. The call fails only when the file cannot be read as a presentation
/// or when it changed while being probed.
pub fn probe<P: AsRef<Path>>(path: P, options: &ProbeOptions) -> Result<CapabilityReport> {
    let path = path.as_ref();
    let started = Instant::now();
    let probed_at = Utc::now();
    tracing::info!(path = %path.display(), deep = options.deep, "probing template");

    let metadata = std::fs::metadata(path).map_err(|e| ProbeError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(ProbeError::NotAFile(path.display().to_string()));
    }
    let bytes = std::fs::read(path).map_err(|e| ProbeError::from_io(path, e))?;
    let checksum_before = options.verify_integrity.then(|| checksum_bytes(&bytes));

    let mut package =
        Package::from_bytes(&bytes).map_err(|e| ProbeError::from_package_error(path, e))?;
    drop(bytes);

    let mut warnings = Vec::new();
    let mut notes = Vec::new();

    let (geometry, masters, template_theme, mut infos) = {
        let pres = package.presentation()?;

        let geometry = match pres.slide_size()? {
            Some((cx, cy)) if cx > 0 && cy > 0 => SlideGeometry::new(cx, cy),
            Some((cx, cy)) => {
                warnings.push(format!(
                    "slide size {} x {} is not positive; using the default 10in x 7.5in",
                    cx, cy
                ));
                SlideGeometry::DEFAULT
            },
            None => {
                warnings.push("presentation declares no slide size; using the default 10in x 7.5in".to_string());
                SlideGeometry::DEFAULT
            },
        };

        let infos = layouts::collect_layouts(&pres)?;

        let mut masters = Vec::new();
        let mut template_theme = None;
        for (index, master) in pres.slide_masters()?.iter().enumerate() {
            let (descriptor, theme_warnings) = theme::extract_theme(master);
            if template_theme.is_none() {
                warnings.extend(theme_warnings);
                template_theme = Some(descriptor.clone());
            }
            masters.push(MasterDescriptor {
                index,
                name: master.name().unwrap_or_default(),
                layout_count: infos.iter().filter(|l| l.master_index == index).count(),
                theme: descriptor,
            });
        }

        let template_theme = template_theme.unwrap_or_else(|| {
            warnings.push("template has no slide master; theme defaults applied".to_string());
            ThemeDescriptor::default()
        });

        (geometry, masters, template_theme, infos)
    };

    let layout_count_total = infos.len();
    if let Some(max) = options.max_layouts {
        if max < layout_count_total {
            infos.truncate(max);
            notes.push(format!(
                "layout analysis limited to {} of {} layouts by max_layouts",
                max, layout_count_total
            ));
        }
    }

    let analysis = layouts::analyze_layouts(
        &mut package,
        &infos,
        &geometry,
        options.deep,
        started,
        options.timeout,
    );
    warnings.extend(analysis.warnings);

    let master_names: Vec<String> = masters.iter().map(|m| m.name.clone()).collect();
    let capabilities = capabilities::synthesize(&analysis.layouts, &master_names);

    let checksum_after = match &checksum_before {
        Some(before) => Some(verify_unchanged(path, before)?),
        None => None,
    };

    let report = CapabilityReport {
        metadata: ReportMetadata {
            status: ReportStatus::Success,
            template_path: path.display().to_string(),
            probed_at,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            integrity_verified: checksum_after.is_some(),
            checksum_before,
            checksum_after,
            deep: options.deep,
            analysis_complete: analysis.analysis_complete,
            master_count: masters.len(),
            layout_count_total,
            layouts_analyzed: analysis.layouts.len(),
            warnings,
            notes,
            error: None,
        },
        slide_geometry: GeometryDescriptor::from(&geometry),
        layouts: analysis.layouts,
        theme: template_theme,
        masters,
        capabilities,
    };

    let report = match report.validate() {
        Ok(()) => report,
        Err(e) => {
            tracing::warn!(error = %e, "report failed validation");
            report.into_error(&e)
        },
    };

    tracing::info!(
        path = %path.display(),
        layouts = report.metadata.layouts_analyzed,
        warnings = report.metadata.warnings.len(),
        duration_ms = report.metadata.duration_ms,
        "probe finished"
    );
    Ok(report)
}

/// Re-digest the file and compare with `before`.
fn verify_unchanged(path: &Path, before: &Checksum) -> Result<Checksum> {
    let after = checksum(path)?;
    assert_unchanged(before, &after)?;
    Ok(after)
}
