//! Plain-text rendering of a [`CapabilityReport`] for people.
use crate::probe::layouts::{LayoutDescriptor, PositionSource};
use crate::probe::report::{CapabilityReport, ReportStatus};
use std::fmt::Write;

/// Render `report` as a short multi-line summary.
pub fn render_text(report: &CapabilityReport) -> String {
    let mut out = String::with_capacity(1024);
    let meta = &report.metadata;
    let geometry = &report.slide_geometry;

    let _ = writeln!(out, "Template: {}", meta.template_path);
    let status = match meta.status {
        ReportStatus::Success => "success",
        ReportStatus::Error => "error",
    };
    let _ = writeln!(out, "Status:   {} ({} ms)", status, meta.duration_ms);
    if let Some(error) = &meta.error {
        let _ = writeln!(out, "Error:    [{}] {}", error.kind, error.message);
    }
    let _ = writeln!(
        out,
        "Slide:    {:.2}in x {:.2}in ({})",
        geometry.width_inches, geometry.height_inches, geometry.aspect_ratio_label
    );
    let _ = writeln!(
        out,
        "Layouts:  {} of {} analyzed across {} master(s){}",
        meta.layouts_analyzed,
        meta.layout_count_total,
        meta.master_count,
        if meta.analysis_complete { "" } else { " (incomplete)" }
    );
    let fonts = &report.theme.fonts;
    let _ = writeln!(out, "Fonts:    {} / {}", fonts.heading, fonts.body);

    if !report.layouts.is_empty() {
        out.push('\n');
        for layout in &report.layouts {
            write_layout(&mut out, layout);
        }
    }

    let capabilities = &report.capabilities;
    out.push('\n');
    let _ = writeln!(
        out,
        "Footer: {}  Slide number: {}  Date: {}",
        yes_no(capabilities.has_footer_placeholders),
        yes_no(capabilities.has_slide_number_placeholders),
        yes_no(capabilities.has_date_placeholders)
    );
    for recommendation in &capabilities.recommendations {
        let _ = writeln!(out, "  - {}", recommendation);
    }

    write_list(&mut out, "Warnings", &meta.warnings);
    write_list(&mut out, "Notes", &meta.notes);
    out
}

fn write_layout(out: &mut String, layout: &LayoutDescriptor) {
    let _ = writeln!(
        out,
        "[{}] {} (master {}, {} placeholder(s))",
        layout.index, layout.name, layout.master_index, layout.placeholder_count
    );
    if let Some(types) = &layout.placeholder_types_summary {
        let _ = writeln!(out, "    types: {}", types.join(", "));
    }
    for ph in &layout.placeholders {
        let source = match ph.position_source {
            PositionSource::Template => "template",
            PositionSource::Instantiated => "instantiated",
            PositionSource::Error => "unknown",
        };
        let p = &ph.bbox.percent;
        let _ = writeln!(
            out,
            "    {:<14} idx {:<3} {:>5.1}% {:>5.1}% {:>5.1}% x {:>5.1}% ({})",
            ph.ph_type, ph.index, p.left, p.top, p.width, p.height, source
        );
    }
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}:", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

#[inline]
fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
