//! The capability report and its JSON form.
use crate::common::error::{ErrorPayload, ProbeError, Result};
use crate::coords::SlideGeometry;
use crate::probe::capabilities::CapabilitySummary;
use crate::probe::integrity::Checksum;
use crate::probe::layouts::LayoutDescriptor;
use crate::probe::theme::ThemeDescriptor;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Success,
    Error,
}

/// How the probe ran and what it noticed along the way.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub status: ReportStatus,
    pub template_path: String,
    pub probed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub checksum_before: Option<Checksum>,
    pub checksum_after: Option<Checksum>,
    /// True when both checksums were taken and matched
    pub integrity_verified: bool,
    pub deep: bool,
    /// False when the timeout cut layout analysis short
    pub analysis_complete: bool,
    pub master_count: usize,
    /// Layouts in the template, before any `max_layouts` truncation
    pub layout_count_total: usize,
    pub layouts_analyzed: usize,
    /// Degradations worth a caller's attention
    pub warnings: Vec<String>,
    /// Informational remarks, such as deliberate truncation
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryDescriptor {
    pub width_emu: i64,
    pub height_emu: i64,
    pub width_inches: f64,
    pub height_inches: f64,
    pub aspect_ratio_label: String,
}

impl From<&SlideGeometry> for GeometryDescriptor {
    fn from(geometry: &SlideGeometry) -> Self {
        Self {
            width_emu: geometry.width,
            height_emu: geometry.height,
            width_inches: geometry.width_inches(),
            height_inches: geometry.height_inches(),
            aspect_ratio_label: geometry.aspect_ratio_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasterDescriptor {
    pub index: usize,
    pub name: String,
    pub layout_count: usize,
    pub theme: ThemeDescriptor,
}

/// Everything the probe learned about one template.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityReport {
    pub metadata: ReportMetadata,
    pub slide_geometry: GeometryDescriptor,
    pub layouts: Vec<LayoutDescriptor>,
    /// Theme of the first master
    pub theme: ThemeDescriptor,
    pub masters: Vec<MasterDescriptor>,
    pub capabilities: CapabilitySummary,
}

impl CapabilityReport {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.metadata.status == ReportStatus::Success
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Check that the report is internally consistent.
    ///
    /// Fails with [`ProbeError::SchemaIncomplete`] naming the first problem.
    pub fn validate(&self) -> Result<()> {
        let incomplete = |what: String| Err(ProbeError::SchemaIncomplete(what));
        let meta = &self.metadata;

        if meta.template_path.is_empty() {
            return incomplete("metadata.template_path is empty".to_string());
        }
        if self.slide_geometry.width_emu <= 0 || self.slide_geometry.height_emu <= 0 {
            return incomplete(format!(
                "slide_geometry is not positive ({} x {})",
                self.slide_geometry.width_emu, self.slide_geometry.height_emu
            ));
        }
        if meta.layouts_analyzed != self.layouts.len() {
            return incomplete(format!(
                "metadata.layouts_analyzed is {} but {} layouts are present",
                meta.layouts_analyzed,
                self.layouts.len()
            ));
        }
        if meta.layouts_analyzed > meta.layout_count_total {
            return incomplete(format!(
                "{} layouts analyzed out of {} in the template",
                meta.layouts_analyzed, meta.layout_count_total
            ));
        }
        if meta.master_count != self.masters.len() {
            return incomplete(format!(
                "metadata.master_count is {} but {} masters are present",
                meta.master_count,
                self.masters.len()
            ));
        }
        if let Some(layout) = self.layouts.iter().find(|l| l.master_index >= meta.master_count) {
            return incomplete(format!(
                "layout {} refers to master {} of {}",
                layout.index, layout.master_index, meta.master_count
            ));
        }
        if meta.integrity_verified
            && (meta.checksum_before.is_none() || meta.checksum_after.is_none())
        {
            return incomplete("integrity verified without both checksums".to_string());
        }

        Ok(())
    }

    /// Mark the report as failed with `err`, keeping whatever was collected.
    pub fn into_error(mut self, err: &ProbeError) -> Self {
        self.metadata.status = ReportStatus::Error;
        self.metadata.error = Some(err.to_payload());
        self
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::probe::capabilities::synthesize;
    use crate::probe::integrity::checksum_bytes;

    pub(crate) fn sample_report() -> CapabilityReport {
        let geometry = SlideGeometry::new(9_144_000, 6_858_000);
        let checksum = checksum_bytes(b"template");
        CapabilityReport {
            metadata: ReportMetadata {
                status: ReportStatus::Success,
                template_path: "deck.pptx".to_string(),
                probed_at: Utc::now(),
                duration_ms: 12,
                checksum_before: Some(checksum.clone()),
                checksum_after: Some(checksum),
                integrity_verified: true,
                deep: true,
                analysis_complete: true,
                master_count: 1,
                layout_count_total: 0,
                layouts_analyzed: 0,
                warnings: vec!["1 theme colour(s) are symbolic".to_string()],
                notes: Vec::new(),
                error: None,
            },
            slide_geometry: GeometryDescriptor::from(&geometry),
            layouts: Vec::new(),
            theme: ThemeDescriptor::default(),
            masters: vec![MasterDescriptor {
                index: 0,
                name: "Office Theme".to_string(),
                layout_count: 0,
                theme: ThemeDescriptor::default(),
            }],
            capabilities: synthesize(&[], &["Office Theme".to_string()]),
        }
    }

    #[test]
    fn test_json_shape() {
        let report = sample_report();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["metadata"]["status"], "success");
        assert_eq!(json["slide_geometry"]["aspect_ratio_label"], "4:3");
        assert_eq!(json["slide_geometry"]["width_inches"], 10.0);
        assert_eq!(json["theme"]["fonts"]["source"], "fallback");
        assert_eq!(json["capabilities"]["has_footer_placeholders"], false);
        assert!(json["metadata"].get("error").is_none());
        assert_eq!(
            json["metadata"]["checksum_before"],
            json["metadata"]["checksum_after"]
        );
    }

    #[test]
    fn test_validate() {
        assert!(sample_report().validate().is_ok());

        let mut report = sample_report();
        report.metadata.layouts_analyzed = 3;
        assert!(matches!(report.validate(), Err(ProbeError::SchemaIncomplete(_))));

        let mut report = sample_report();
        report.masters.clear();
        assert!(matches!(report.validate(), Err(ProbeError::SchemaIncomplete(_))));

        let mut report = sample_report();
        report.metadata.checksum_after = None;
        assert!(matches!(report.validate(), Err(ProbeError::SchemaIncomplete(_))));
    }

    #[test]
    fn test_into_error() {
        let err = ProbeError::SchemaIncomplete("missing".to_string());
        let report = sample_report().into_error(&err);

        assert!(!report.is_success());
        let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["metadata"]["status"], "error");
        assert_eq!(json["metadata"]["error"]["kind"], "schema_incomplete");
    }
}
