//! In-memory PPTX archives for tests.
//!
//! [`TemplateBuilder`] writes a minimal but well-formed package with
//! `zip::ZipWriter`: presentation part, masters with their themes, layouts and
//! optionally some pre-existing slides. Each knob exists because some test needs
//! a template that is broken or unusual in exactly that way.
use crate::ooxml::opc::constants::{content_type as CT, namespace, relationship_type as RT};
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const WIDE_SLIDE: (i64, i64) = (12_192_000, 6_858_000);
pub const STANDARD_SLIDE: (i64, i64) = (9_144_000, 6_858_000);

/// A placeholder shape: `type` token, `idx`, name and optional own geometry.
#[derive(Debug, Clone)]
pub struct PlaceholderSpec {
    pub ph_type: Option<&'static str>,
    pub idx: Option<u32>,
    pub name: String,
    pub xfrm: Option<(i64, i64, i64, i64)>,
}

impl PlaceholderSpec {
    pub fn new(ph_type: &'static str) -> Self {
        Self {
            ph_type: Some(ph_type),
            idx: None,
            name: format!("{} Placeholder", ph_type),
            xfrm: None,
        }
    }

    /// A placeholder without a `type` attribute (an object placeholder).
    pub fn object(idx: u32) -> Self {
        Self {
            ph_type: None,
            idx: Some(idx),
            name: format!("Content Placeholder {}", idx),
            xfrm: None,
        }
    }

    pub fn idx(mut self, idx: u32) -> Self {
        self.idx = Some(idx);
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn at(mut self, x: i64, y: i64, cx: i64, cy: i64) -> Self {
        self.xfrm = Some((x, y, cx, cy));
        self
    }

    fn write_xml(&self, xml: &mut String, shape_id: usize) {
        let _ = write!(
            xml,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr/><p:nvPr><p:ph"#,
            shape_id, self.name
        );
        if let Some(ph_type) = self.ph_type {
            let _ = write!(xml, r#" type="{}""#, ph_type);
        }
        if let Some(idx) = self.idx {
            let _ = write!(xml, r#" idx="{}""#, idx);
        }
        xml.push_str("/></p:nvPr></p:nvSpPr>");
        match self.xfrm {
            Some((x, y, cx, cy)) => {
                let _ = write!(
                    xml,
                    r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr>"#,
                    x, y, cx, cy
                );
            },
            None => xml.push_str("<p:spPr/>"),
        }
        xml.push_str("</p:sp>");
    }
}

/// A slide layout.
#[derive(Debug, Clone)]
pub struct LayoutSpec {
    pub name: String,
    pub placeholders: Vec<PlaceholderSpec>,
    pub master_rel: bool,
    pub raw_xml: Option<String>,
}

impl LayoutSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            placeholders: Vec::new(),
            master_rel: true,
            raw_xml: None,
        }
    }

    /// Title plus one content placeholder, neither with own geometry.
    pub fn title_and_content(name: &str) -> Self {
        Self::new(name)
            .placeholder(PlaceholderSpec::new("title").named("Title 1"))
            .placeholder(PlaceholderSpec::object(1).named("Content Placeholder 2"))
    }

    pub fn placeholder(mut self, placeholder: PlaceholderSpec) -> Self {
        self.placeholders.push(placeholder);
        self
    }

    /// Omit the layout's relationship to its master.
    pub fn without_master_rel(mut self) -> Self {
        self.master_rel = false;
        self
    }

    /// Use `xml` verbatim as the layout part.
    pub fn raw_xml(mut self, xml: &str) -> Self {
        self.raw_xml = Some(xml.to_string());
        self
    }

    fn to_xml(&self) -> String {
        if let Some(raw) = &self.raw_xml {
            return raw.clone();
        }
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:cSld name="{}"><p:spTree>"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN,
            self.name
        );
        for (i, ph) in self.placeholders.iter().enumerate() {
            ph.write_xml(&mut xml, i + 2);
        }
        xml.push_str("</p:spTree></p:cSld></p:sldLayout>");
        xml
    }
}

/// A theme part.
#[derive(Debug, Clone)]
pub struct ThemeSpec {
    pub name: String,
    /// Slot name and the colour element inside it; `None` drops `<a:clrScheme>`
    pub colors: Option<Vec<(&'static str, String)>>,
    /// Major and minor latin typefaces; `None` drops `<a:fontScheme>`
    pub fonts: Option<(String, String)>,
    pub raw_xml: Option<String>,
}

impl ThemeSpec {
    /// All twelve slots concrete, Calibri Light / Calibri fonts.
    pub fn office() -> Self {
        let srgb = |hex: &str| format!(r#"<a:srgbClr val="{}"/>"#, hex);
        Self {
            name: "Office Theme".to_string(),
            colors: Some(vec![
                ("dk1", r#"<a:sysClr val="windowText" lastClr="000000"/>"#.to_string()),
                ("lt1", r#"<a:sysClr val="window" lastClr="FFFFFF"/>"#.to_string()),
                ("dk2", srgb("44546A")),
                ("lt2", srgb("E7E6E6")),
                ("accent1", srgb("4472C4")),
                ("accent2", srgb("ED7D31")),
                ("accent3", srgb("A5A5A5")),
                ("accent4", srgb("FFC000")),
                ("accent5", srgb("5B9BD5")),
                ("accent6", srgb("70AD47")),
                ("hlink", srgb("0563C1")),
                ("folHlink", srgb("954F72")),
            ]),
            fonts: Some(("Calibri Light".to_string(), "Calibri".to_string())),
            raw_xml: None,
        }
    }

    /// Replace the colour element of `slot`.
    pub fn color(mut self, slot: &'static str, element: &str) -> Self {
        if let Some(colors) = self.colors.as_mut() {
            colors.retain(|(s, _)| *s != slot);
            colors.push((slot, element.to_string()));
        }
        self
    }

    /// Make `slot` a reference to another scheme colour.
    pub fn symbolic(self, slot: &'static str, reference: &str) -> Self {
        self.color(slot, &format!(r#"<a:schemeClr val="{}"/>"#, reference))
    }

    pub fn without_colors(mut self) -> Self {
        self.colors = None;
        self
    }

    pub fn without_fonts(mut self) -> Self {
        self.fonts = None;
        self
    }

    pub fn raw_xml(xml: &str) -> Self {
        Self {
            raw_xml: Some(xml.to_string()),
            ..Self::office()
        }
    }

    fn to_xml(&self) -> String {
        if let Some(raw) = &self.raw_xml {
            return raw.clone();
        }
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme xmlns:a="{}" name="{}"><a:themeElements>"#,
            namespace::DML_MAIN,
            self.name
        );
        if let Some(colors) = &self.colors {
            xml.push_str(r#"<a:clrScheme name="Office">"#);
            for (slot, element) in colors {
                let _ = write!(xml, "<a:{slot}>{element}</a:{slot}>");
            }
            xml.push_str("</a:clrScheme>");
        }
        if let Some((major, minor)) = &self.fonts {
            let _ = write!(
                xml,
                r#"<a:fontScheme name="Office"><a:majorFont><a:latin typeface="{}"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="{}"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>"#,
                major, minor
            );
        }
        xml.push_str("</a:themeElements></a:theme>");
        xml
    }
}

/// A slide master with its layouts and theme.
#[derive(Debug, Clone)]
pub struct MasterSpec {
    pub name: String,
    pub placeholders: Vec<PlaceholderSpec>,
    pub layouts: Vec<LayoutSpec>,
    pub theme: Option<ThemeSpec>,
    /// Typeface of a text run in the master's own shapes
    pub text_typeface: Option<String>,
}

impl MasterSpec {
    /// A master with positioned title, body, date, footer and slide-number
    /// placeholders laid out for `slide_size`, no layouts and the office theme.
    pub fn new(name: &str, slide_size: (i64, i64)) -> Self {
        let (w, h) = slide_size;
        Self {
            name: name.to_string(),
            placeholders: vec![
                PlaceholderSpec::new("title").at(w / 12, h / 24, w * 10 / 12, h / 6),
                PlaceholderSpec::new("body").idx(1).at(w / 12, h / 4, w * 10 / 12, h / 2),
                PlaceholderSpec::new("dt").idx(2).at(w / 12, h * 11 / 12, w / 4, h / 24),
                PlaceholderSpec::new("ftr").idx(3).at(w * 4 / 12, h * 11 / 12, w / 3, h / 24),
                PlaceholderSpec::new("sldNum").idx(4).at(w * 9 / 12, h * 11 / 12, w / 6, h / 24),
            ],
            layouts: Vec::new(),
            theme: Some(ThemeSpec::office()),
            text_typeface: None,
        }
    }

    pub fn layout(mut self, layout: LayoutSpec) -> Self {
        self.layouts.push(layout);
        self
    }

    pub fn theme(mut self, theme: Option<ThemeSpec>) -> Self {
        self.theme = theme;
        self
    }

    pub fn text_typeface(mut self, typeface: &str) -> Self {
        self.text_typeface = Some(typeface.to_string());
        self
    }

    fn to_xml(&self, layout_count: usize) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:cSld name="{}"><p:spTree>"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN,
            self.name
        );
        for (i, ph) in self.placeholders.iter().enumerate() {
            ph.write_xml(&mut xml, i + 2);
        }
        if let Some(typeface) = &self.text_typeface {
            let _ = write!(
                xml,
                r#"<p:sp><p:nvSpPr><p:cNvPr id="99" name="Brand"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:rPr><a:latin typeface="+mj-lt"/><a:latin typeface="{}"/></a:rPr><a:t>Brand</a:t></a:r></a:p></p:txBody></p:sp>"#,
                typeface
            );
        }
        xml.push_str("</p:spTree></p:cSld><p:sldLayoutIdLst>");
        for i in 0..layout_count {
            let _ = write!(
                xml,
                r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
                2_147_483_649u64 + i as u64,
                i + 1
            );
        }
        xml.push_str("</p:sldLayoutIdLst></p:sldMaster>");
        xml
    }
}

/// Builds a complete presentation package.
///
/// # Example
///
/// ```rust,ignore
/// let bytes = TemplateBuilder::new()
///     .slide_size(Some(STANDARD_SLIDE))
///     .layout(LayoutSpec::new("Blank"))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    slide_size: Option<(i64, i64)>,
    masters: Vec<MasterSpec>,
    template: bool,
    main_content_type: Option<String>,
    /// 1-based global layout numbers of pre-existing slides
    existing_slides: Vec<usize>,
    /// Archive members left out even though they are still referenced
    omitted: Vec<String>,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateBuilder {
    /// One 16:9 master with a single "Title and Content" layout.
    pub fn new() -> Self {
        Self {
            slide_size: Some(WIDE_SLIDE),
            masters: vec![
                MasterSpec::new("Office Theme", WIDE_SLIDE)
                    .layout(LayoutSpec::title_and_content("Title and Content")),
            ],
            template: false,
            main_content_type: None,
            existing_slides: Vec::new(),
            omitted: Vec::new(),
        }
    }

    /// `None` omits `<p:sldSz>`.
    pub fn slide_size(mut self, size: Option<(i64, i64)>) -> Self {
        self.slide_size = size;
        self
    }

    /// Append a layout to the last master.
    pub fn layout(mut self, layout: LayoutSpec) -> Self {
        if let Some(master) = self.masters.last_mut() {
            master.layouts.push(layout);
        }
        self
    }

    /// Replace all masters.
    pub fn masters(mut self, masters: Vec<MasterSpec>) -> Self {
        self.masters = masters;
        self
    }

    /// Write a `.potx` main part content type.
    pub fn template(mut self, template: bool) -> Self {
        self.template = template;
        self
    }

    pub fn main_content_type(mut self, content_type: &str) -> Self {
        self.main_content_type = Some(content_type.to_string());
        self
    }

    /// Add a slide based on the `layout`-th layout (1-based, across masters).
    pub fn existing_slide(mut self, layout: usize) -> Self {
        self.existing_slides.push(layout);
        self
    }

    /// Leave the archive member `name` (e.g. `ppt/slideLayouts/slideLayout2.xml`)
    /// out while keeping every relationship that points at it.
    pub fn without_member(mut self, name: &str) -> Self {
        self.omitted.push(name.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        let omitted = &self.omitted;
        let mut add = |name: &str, content: &str| {
            if omitted.iter().any(|o| o == name) {
                return;
            }
            writer.start_file(name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        };

        let main_content_type = self.main_content_type.clone().unwrap_or_else(|| {
            if self.template {
                CT::PML_TEMPLATE_MAIN.to_string()
            } else {
                CT::PML_PRESENTATION_MAIN.to_string()
            }
        });

        let mut overrides = vec![("/ppt/presentation.xml".to_string(), main_content_type)];
        let mut pres_rels = Vec::new();
        let mut master_ids = String::new();
        let mut layout_number = 0;

        for (m, master) in self.masters.iter().enumerate() {
            let master_number = m + 1;
            let master_name = format!("slideMaster{}.xml", master_number);
            overrides.push((format!("/ppt/slideMasters/{}", master_name), CT::PML_SLIDE_MASTER.to_string()));
            pres_rels.push((RT::SLIDE_MASTER, format!("slideMasters/{}", master_name)));
            let _ = write!(
                master_ids,
                r#"<p:sldMasterId id="{}" r:id="rId{}"/>"#,
                2_147_483_648u64 + m as u64 * 12,
                pres_rels.len()
            );

            let mut master_rels = Vec::new();
            for layout in &master.layouts {
                layout_number += 1;
                let layout_name = format!("slideLayout{}.xml", layout_number);
                overrides.push((format!("/ppt/slideLayouts/{}", layout_name), CT::PML_SLIDE_LAYOUT.to_string()));
                master_rels.push((RT::SLIDE_LAYOUT, format!("../slideLayouts/{}", layout_name)));

                add(&format!("ppt/slideLayouts/{}", layout_name), &layout.to_xml());
                let layout_rels = if layout.master_rel {
                    vec![(RT::SLIDE_MASTER, format!("../slideMasters/{}", master_name))]
                } else {
                    Vec::new()
                };
                add(&format!("ppt/slideLayouts/_rels/{}.rels", layout_name), &rels_xml(&layout_rels));
            }

            if let Some(theme) = &master.theme {
                let theme_name = format!("theme{}.xml", master_number);
                overrides.push((format!("/ppt/theme/{}", theme_name), CT::OFC_THEME.to_string()));
                master_rels.push((RT::THEME, format!("../theme/{}", theme_name)));
                add(&format!("ppt/theme/{}", theme_name), &theme.to_xml());
            }

            add(&format!("ppt/slideMasters/{}", master_name), &master.to_xml(master.layouts.len()));
            add(&format!("ppt/slideMasters/_rels/{}.rels", master_name), &rels_xml(&master_rels));
        }

        let mut slide_ids = String::new();
        for (s, layout) in self.existing_slides.iter().enumerate() {
            let slide_name = format!("slide{}.xml", s + 1);
            overrides.push((format!("/ppt/slides/{}", slide_name), CT::PML_SLIDE.to_string()));
            pres_rels.push((RT::SLIDE, format!("slides/{}", slide_name)));
            let _ = write!(slide_ids, r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + s, pres_rels.len());

            add(
                &format!("ppt/slides/{}", slide_name),
                &format!(
                    r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:cSld><p:spTree/></p:cSld></p:sld>"#,
                    namespace::DML_MAIN,
                    namespace::OFC_RELATIONSHIPS,
                    namespace::PML_MAIN
                ),
            );
            add(
                &format!("ppt/slides/_rels/{}.rels", slide_name),
                &rels_xml(&[(RT::SLIDE_LAYOUT, format!("../slideLayouts/slideLayout{}.xml", layout))]),
            );
        }

        let mut presentation = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:sldMasterIdLst>{}</p:sldMasterIdLst>"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN,
            master_ids
        );
        if !slide_ids.is_empty() {
            let _ = write!(presentation, "<p:sldIdLst>{}</p:sldIdLst>", slide_ids);
        }
        if let Some((cx, cy)) = self.slide_size {
            let _ = write!(presentation, r#"<p:sldSz cx="{}" cy="{}"/>"#, cx, cy);
        }
        presentation.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#);
        add("ppt/presentation.xml", &presentation);
        add("ppt/_rels/presentation.xml.rels", &rels_xml(&pres_rels));
        add(
            "_rels/.rels",
            &rels_xml(&[(RT::OFFICE_DOCUMENT, "ppt/presentation.xml".to_string())]),
        );

        let mut content_types = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="{}"/><Default Extension="xml" ContentType="{}"/>"#,
            CT::OPC_RELATIONSHIPS,
            CT::XML
        );
        for (partname, content_type) in &overrides {
            let _ = write!(
                content_types,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                partname, content_type
            );
        }
        content_types.push_str("</Types>");
        add("[Content_Types].xml", &content_types);

        writer.finish().unwrap().into_inner()
    }

    /// Write the package to a temporary `.pptx` (or `.potx`) file.
    pub fn write_temp(&self) -> tempfile::NamedTempFile {
        let suffix = if self.template { ".potx" } else { ".pptx" };
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(&self.build()).unwrap();
        file.flush().unwrap();
        file
    }
}

fn rels_xml(rels: &[(&str, String)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, (reltype, target)) in rels.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}" Target="{}"/>"#,
            i + 1,
            reltype,
            target
        );
    }
    xml.push_str("</Relationships>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::Package;

    #[test]
    fn test_default_template_opens() {
        let pkg = Package::from_bytes(&TemplateBuilder::new().existing_slide(1).build()).unwrap();
        let pres = pkg.presentation().unwrap();
        assert_eq!(pres.slide_size().unwrap(), Some(WIDE_SLIDE));
        assert_eq!(pres.slide_masters().unwrap().len(), 1);
        assert_eq!(pres.slide_layouts().unwrap().len(), 1);
        assert_eq!(pres.slide_count(), 1);

        let master = &pres.slide_masters().unwrap()[0];
        let theme = master.theme().unwrap().unwrap().theme().unwrap();
        assert_eq!(theme.colors.unwrap().len(), 12);
    }
}
