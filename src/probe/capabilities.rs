//! Whole-template answers derived from the analyzed layouts.
//!
//! Three placeholder categories matter to callers placing recurring content:
//! footer, slide number and date. For each, the summary says whether any layout
//! has one, which layouts do, and how the masters compare. Recommendations are
//! fixed sentences filled in from those facts.
use crate::ooxml::pptx::PlaceholderType;
use crate::probe::layouts::LayoutDescriptor;
use serde::Serialize;

/// A layout by global index and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutRef {
    pub index: usize,
    pub name: String,
}

impl From<&LayoutDescriptor> for LayoutRef {
    fn from(layout: &LayoutDescriptor) -> Self {
        Self {
            index: layout.index,
            name: layout.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasterCapabilities {
    pub master_index: usize,
    pub name: String,
    /// Analyzed layouts belonging to this master
    pub layout_count: usize,
    pub has_footer_placeholders: bool,
    pub has_slide_number_placeholders: bool,
    pub has_date_placeholders: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySummary {
    pub has_footer_placeholders: bool,
    pub has_slide_number_placeholders: bool,
    pub has_date_placeholders: bool,
    pub layouts_with_footer: Vec<LayoutRef>,
    pub layouts_with_slide_number: Vec<LayoutRef>,
    pub layouts_with_date: Vec<LayoutRef>,
    pub per_master: Vec<MasterCapabilities>,
    pub recommendations: Vec<String>,
}

/// The three categories, with the wording used in recommendations.
const CATEGORIES: [(PlaceholderType, &str); 3] = [
    (PlaceholderType::Footer, "footer"),
    (PlaceholderType::SlideNumber, "slide-number"),
    (PlaceholderType::Date, "date"),
];

fn layouts_with(layouts: &[LayoutDescriptor], ph_type: PlaceholderType) -> Vec<LayoutRef> {
    layouts
        .iter()
        .filter(|layout| layout.has_placeholder_type(ph_type))
        .map(LayoutRef::from)
        .collect()
}

/// Summarize `layouts`; `master_names` lists every master in order, including
/// masters none of whose layouts were analyzed.
pub fn synthesize(layouts: &[LayoutDescriptor], master_names: &[String]) -> CapabilitySummary {
    let with_footer = layouts_with(layouts, PlaceholderType::Footer);
    let with_slide_number = layouts_with(layouts, PlaceholderType::SlideNumber);
    let with_date = layouts_with(layouts, PlaceholderType::Date);

    let per_master: Vec<MasterCapabilities> = master_names
        .iter()
        .enumerate()
        .map(|(master_index, name)| {
            let own: Vec<&LayoutDescriptor> = layouts
                .iter()
                .filter(|layout| layout.master_index == master_index)
                .collect();
            let any = |ph_type| own.iter().any(|layout| layout.has_placeholder_type(ph_type));
            MasterCapabilities {
                master_index,
                name: name.clone(),
                layout_count: own.len(),
                has_footer_placeholders: any(PlaceholderType::Footer),
                has_slide_number_placeholders: any(PlaceholderType::SlideNumber),
                has_date_placeholders: any(PlaceholderType::Date),
            }
        })
        .collect();

    let mut recommendations = Vec::new();
    for (ph_type, category) in CATEGORIES {
        let refs = match ph_type {
            PlaceholderType::Footer => &with_footer,
            PlaceholderType::SlideNumber => &with_slide_number,
            _ => &with_date,
        };
        let supporting_masters = per_master
            .iter()
            .filter(|m| match ph_type {
                PlaceholderType::Footer => m.has_footer_placeholders,
                PlaceholderType::SlideNumber => m.has_slide_number_placeholders,
                _ => m.has_date_placeholders,
            })
            .count();
        recommendations.extend(recommend(category, refs, supporting_masters, per_master.len()));
    }

    CapabilitySummary {
        has_footer_placeholders: !with_footer.is_empty(),
        has_slide_number_placeholders: !with_slide_number.is_empty(),
        has_date_placeholders: !with_date.is_empty(),
        layouts_with_footer: with_footer,
        layouts_with_slide_number: with_slide_number,
        layouts_with_date: with_date,
        per_master,
        recommendations,
    }
}

/// Recommendation sentences for one category.
pub fn recommend(
    category: &str,
    layouts: &[LayoutRef],
    supporting_masters: usize,
    master_count: usize,
) -> Vec<String> {
    let mut out = Vec::with_capacity(2);

    match layouts.first() {
        None => out.push(format!(
            "no {} placeholder found on any layout; callers must fall back to an overlay text element",
            category
        )),
        Some(first) => out.push(format!(
            "{} placeholders available on {} layout(s); first: layout {} (\"{}\")",
            category,
            layouts.len(),
            first.index,
            first.name
        )),
    }

    if supporting_masters > 0 && supporting_masters < master_count {
        out.push(format!(
            "{} placeholders are only available on {} of {} masters",
            category, supporting_masters, master_count
        ));
    }

    out
}
