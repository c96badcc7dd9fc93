//! Slide-related objects: Slide, SlideLayout and SlideMaster.
//!
//! These wrap the raw parts together with the package so relationships (slide to
//! layout, layout to master, master to theme) can be followed.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::relationship_type as RT;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::parts::{SlideLayoutPart, SlideMasterPart, SlidePart, ThemePart};
use crate::ooxml::pptx::shapes::placeholder::{PlaceholderShape, Xfrm};

/// Part targeted by the single relationship of `reltype` from `part`.
fn related_part<'a>(
    package: &'a OpcPackage,
    part: &'a dyn Part,
    reltype: &str,
) -> Result<&'a dyn Part> {
    let partname = part
        .rels()
        .part_with_reltype(reltype)
        .and_then(|rel| rel.target_partname())?;
    Ok(package.get_part(&partname)?)
}

/// A slide in a presentation.
pub struct Slide<'a> {
    part: SlidePart<'a>,
    package: &'a OpcPackage,
}

impl<'a> Slide<'a> {
    pub(crate) fn new(part: SlidePart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.part().partname()
    }

    /// The layout this slide was created from.
    pub fn slide_layout(&self) -> Result<SlideLayout<'a>> {
        let part = related_part(self.package, self.part.part(), RT::SLIDE_LAYOUT)?;
        Ok(SlideLayout::new(SlideLayoutPart::from_part(part)?, self.package))
    }

    /// Placeholders on the slide with geometry resolved through the layout and
    /// master.
    ///
    /// A placeholder whose geometry cannot be resolved anywhere keeps
    /// `xfrm == None`.
    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        let own = self.part.placeholders()?;
        let layout = self.slide_layout()?;
        let layout_placeholders = layout.placeholders()?;
        let master_placeholders = layout.slide_master()?.placeholders()?;
        Ok(inherit_geometry(own, &layout_placeholders, &master_placeholders))
    }
}

/// Fill in inherited geometry: own `xfrm`, else the layout placeholder with the
/// same `idx` (preferring one of the same base type when several share the
/// `idx`), else the master placeholder of that layout placeholder's base type.
pub fn inherit_geometry(
    placeholders: Vec<PlaceholderShape>,
    layout: &[PlaceholderShape],
    master: &[PlaceholderShape],
) -> Vec<PlaceholderShape> {
    let master_xfrm = |ph: &PlaceholderShape| -> Option<Xfrm> {
        let base = ph.ph_type.base_type();
        master
            .iter()
            .find(|m| m.ph_type == base)
            .and_then(|m| m.xfrm)
    };

    placeholders
        .into_iter()
        .map(|mut ph| {
            if ph.xfrm.is_none() {
                let base = ph.ph_type.base_type();
                let counterpart = layout
                    .iter()
                    .find(|l| l.idx == ph.idx && l.ph_type.base_type() == base)
                    .or_else(|| layout.iter().find(|l| l.idx == ph.idx));
                ph.xfrm = match counterpart {
                    Some(layout_ph) => layout_ph.xfrm.or_else(|| master_xfrm(layout_ph)),
                    None => master_xfrm(&ph),
                };
            }
            ph
        })
        .collect()
}

/// A slide layout.
pub struct SlideLayout<'a> {
    part: SlideLayoutPart<'a>,
    package: &'a OpcPackage,
}

impl<'a> SlideLayout<'a> {
    pub(crate) fn new(part: SlideLayoutPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.part().partname()
    }

    pub fn name(&self) -> Result<String> {
        self.part.name()
    }

    /// Placeholders declared by the layout with only their own geometry.
    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        self.part.placeholders()
    }

    /// The master this layout belongs to.
    pub fn slide_master(&self) -> Result<SlideMaster<'a>> {
        let part = related_part(self.package, self.part.part(), RT::SLIDE_MASTER)?;
        Ok(SlideMaster::new(SlideMasterPart::from_part(part)?, self.package))
    }
}

/// A slide master.
pub struct SlideMaster<'a> {
    part: SlideMasterPart<'a>,
    package: &'a OpcPackage,
}

impl<'a> SlideMaster<'a> {
    pub(crate) fn new(part: SlideMasterPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.part().partname()
    }

    pub fn name(&self) -> Result<String> {
        self.part.name()
    }

    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        self.part.placeholders()
    }

    /// Raw master XML.
    #[inline]
    pub fn xml(&self) -> &'a [u8] {
        self.part.part().blob()
    }

    /// Layouts in `<p:sldLayoutIdLst>` order. Fails if any entry is dangling.
    pub fn slide_layouts(&self) -> Result<Vec<SlideLayout<'a>>> {
        self.slide_layout_refs()?
            .into_iter()
            .map(|(_, layout)| layout)
            .collect()
    }

    /// Every `<p:sldLayoutId>` rId paired with its own lookup result, so a
    /// missing relationship or part only fails that entry.
    pub fn slide_layout_refs(&self) -> Result<Vec<(String, Result<SlideLayout<'a>>)>> {
        let master_part = self.part.part();
        let resolve = |r_id: &str| -> Result<SlideLayout<'a>> {
            let partname = master_part.related_partname(r_id)?;
            let part = self.package.get_part(&partname)?;
            Ok(SlideLayout::new(SlideLayoutPart::from_part(part)?, self.package))
        };

        Ok(self
            .part
            .slide_layout_rids()?
            .into_iter()
            .map(|r_id| {
                let layout = resolve(&r_id);
                (r_id, layout)
            })
            .collect())
    }

    /// The master's theme, `None` when it has no theme relationship or the
    /// target is missing from the package.
    pub fn theme(&self) -> Result<Option<ThemePart<'a>>> {
        match related_part(self.package, self.part.part(), RT::THEME) {
            Ok(part) => Ok(Some(ThemePart::from_part(part)?)),
            Err(OoxmlError::Opc(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::placeholder::PlaceholderType;

    fn ph(ph_type: PlaceholderType, idx: u32, xfrm: Option<Xfrm>) -> PlaceholderShape {
        PlaceholderShape {
            name: format!("{} {}", ph_type, idx),
            ph_type,
            idx,
            xfrm,
        }
    }

    fn xfrm(x: i64) -> Option<Xfrm> {
        Some(Xfrm { x, y: x, cx: 100, cy: 50 })
    }

    #[test]
    fn test_inherit_geometry_chain() {
        let master = vec![
            ph(PlaceholderType::Title, 0, xfrm(1)),
            ph(PlaceholderType::Body, 1, xfrm(2)),
            ph(PlaceholderType::Footer, 11, xfrm(3)),
        ];
        let layout = vec![
            ph(PlaceholderType::CenterTitle, 0, None),
            ph(PlaceholderType::Subtitle, 1, xfrm(20)),
            ph(PlaceholderType::Object, 2, None),
        ];
        let slide = vec![
            ph(PlaceholderType::CenterTitle, 0, None),
            ph(PlaceholderType::Subtitle, 1, None),
            ph(PlaceholderType::Object, 2, xfrm(30)),
            ph(PlaceholderType::Footer, 11, None),
            ph(PlaceholderType::Picture, 9, None),
        ];

        let resolved = inherit_geometry(slide, &layout, &master);
        // ctrTitle falls through the layout to the master title
        assert_eq!(resolved[0].xfrm, xfrm(1));
        // layout geometry wins over the master
        assert_eq!(resolved[1].xfrm, xfrm(20));
        // own geometry wins over everything
        assert_eq!(resolved[2].xfrm, xfrm(30));
        // no layout counterpart: master by base type
        assert_eq!(resolved[3].xfrm, xfrm(3));
        // picture has base type body
        assert_eq!(resolved[4].xfrm, xfrm(2));
    }

    #[test]
    fn test_dangling_layout_fails_only_its_entry() {
        use crate::ooxml::pptx::Package;
        use crate::ooxml::pptx::fixtures::{LayoutSpec, TemplateBuilder};

        let bytes = TemplateBuilder::new()
            .layout(LayoutSpec::new("Second"))
            .without_member("ppt/slideLayouts/slideLayout2.xml")
            .build();
        let pkg = Package::from_bytes(&bytes).unwrap();
        let masters = pkg.presentation().unwrap().slide_masters().unwrap();

        let refs = masters[0].slide_layout_refs().unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].1.as_ref().unwrap().name().unwrap(), "Title and Content");
        assert_eq!(refs[1].0, "rId2");
        assert!(refs[1].1.is_err());
        assert!(masters[0].slide_layouts().is_err());
    }

    #[test]
    fn test_shared_idx_matches_by_type() {
        let layout = vec![
            ph(PlaceholderType::Title, 0, xfrm(1)),
            ph(PlaceholderType::Picture, 0, xfrm(5)),
        ];
        let slide = vec![
            ph(PlaceholderType::Picture, 0, None),
            ph(PlaceholderType::Title, 0, None),
            ph(PlaceholderType::Table, 0, None),
        ];

        let resolved = inherit_geometry(slide, &layout, &[]);
        assert_eq!(resolved[0].xfrm, xfrm(5));
        assert_eq!(resolved[1].xfrm, xfrm(1));
        // same base type as the picture
        assert_eq!(resolved[2].xfrm, xfrm(5));
    }

    #[test]
    fn test_unresolvable_stays_empty() {
        let slide = vec![ph(PlaceholderType::Date, 10, None)];
        let resolved = inherit_geometry(slide, &[], &[ph(PlaceholderType::Title, 0, xfrm(1))]);
        assert_eq!(resolved[0].xfrm, None);
    }
}
