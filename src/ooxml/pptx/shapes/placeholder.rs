//! Placeholder shapes on slides, layouts and masters.
//!
//! Only the parts of a shape that matter for placement are read: its name, the
//! `<p:ph>` type and index, and the `<a:xfrm>` offset and extent when the shape
//! declares its own geometry.

use crate::common::unit::Emu;
use crate::common::xml::{attr_i64, attr_value};
use crate::ooxml::error::{OoxmlError, Result};
use phf::phf_map;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt;

/// Placeholder kinds, numbered like the presentation object model's placeholder
/// enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderType {
    Title,
    Body,
    CenterTitle,
    Subtitle,
    Object,
    Chart,
    ClipArt,
    Media,
    Diagram,
    Table,
    SlideNumber,
    Header,
    Footer,
    Date,
    Picture,
    SlideImage,
}

static PLACEHOLDER_TOKENS: phf::Map<&'static str, PlaceholderType> = phf_map! {
    "title" => PlaceholderType::Title,
    "body" => PlaceholderType::Body,
    "ctrTitle" => PlaceholderType::CenterTitle,
    "subTitle" => PlaceholderType::Subtitle,
    "obj" => PlaceholderType::Object,
    "chart" => PlaceholderType::Chart,
    "clipArt" => PlaceholderType::ClipArt,
    "media" => PlaceholderType::Media,
    "dgm" => PlaceholderType::Diagram,
    "tbl" => PlaceholderType::Table,
    "sldNum" => PlaceholderType::SlideNumber,
    "hdr" => PlaceholderType::Header,
    "ftr" => PlaceholderType::Footer,
    "dt" => PlaceholderType::Date,
    "pic" => PlaceholderType::Picture,
    "sldImg" => PlaceholderType::SlideImage,
};

impl PlaceholderType {
    /// Parse the `type` attribute of `<p:ph>`.
    pub fn from_token(token: &str) -> Option<Self> {
        PLACEHOLDER_TOKENS.get(token).copied()
    }

    /// Attribute token as written in XML.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::CenterTitle => "ctrTitle",
            Self::Subtitle => "subTitle",
            Self::Object => "obj",
            Self::Chart => "chart",
            Self::ClipArt => "clipArt",
            Self::Media => "media",
            Self::Diagram => "dgm",
            Self::Table => "tbl",
            Self::SlideNumber => "sldNum",
            Self::Header => "hdr",
            Self::Footer => "ftr",
            Self::Date => "dt",
            Self::Picture => "pic",
            Self::SlideImage => "sldImg",
        }
    }

    /// Upper-case display name, e.g. `SLIDE_NUMBER`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Body => "BODY",
            Self::CenterTitle => "CENTER_TITLE",
            Self::Subtitle => "SUBTITLE",
            Self::Object => "OBJECT",
            Self::Chart => "CHART",
            Self::ClipArt => "BITMAP",
            Self::Media => "MEDIA_CLIP",
            Self::Diagram => "ORG_CHART",
            Self::Table => "TABLE",
            Self::SlideNumber => "SLIDE_NUMBER",
            Self::Header => "HEADER",
            Self::Footer => "FOOTER",
            Self::Date => "DATE",
            Self::Picture => "PICTURE",
            Self::SlideImage => "SLIDE_IMAGE",
        }
    }

    /// Numeric code of the placeholder kind.
    pub fn code(&self) -> u32 {
        match self {
            Self::Title => 1,
            Self::Body => 2,
            Self::CenterTitle => 3,
            Self::Subtitle => 4,
            Self::Object => 7,
            Self::Chart => 8,
            Self::ClipArt => 9,
            Self::Media => 10,
            Self::Diagram => 11,
            Self::Table => 12,
            Self::SlideNumber => 13,
            Self::Header => 14,
            Self::Footer => 15,
            Self::Date => 16,
            Self::Picture => 18,
            Self::SlideImage => 101,
        }
    }

    /// Type of the master placeholder a layout placeholder of this type
    /// inherits from.
    pub fn base_type(&self) -> Self {
        match self {
            Self::Title | Self::CenterTitle => Self::Title,
            Self::Date => Self::Date,
            Self::Footer => Self::Footer,
            Self::SlideNumber => Self::SlideNumber,
            _ => Self::Body,
        }
    }

    /// Whether a new slide gets its own copy of this placeholder.
    ///
    /// Date, footer and slide number stay on the layout until a caller turns them on.
    pub fn is_cloned_on_new_slide(&self) -> bool {
        !matches!(self, Self::Date | Self::Footer | Self::SlideNumber)
    }
}

impl fmt::Display for PlaceholderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Offset and extent from an `<a:xfrm>` element, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Xfrm {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

/// A placeholder shape as declared in one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderShape {
    /// Shape name from `<p:cNvPr>`
    pub name: String,
    pub ph_type: PlaceholderType,
    /// `<p:ph idx>`, 0 when absent
    pub idx: u32,
    /// Own geometry; `None` means the shape inherits it
    pub xfrm: Option<Xfrm>,
}

/// Shape elements that can carry a `<p:ph>`.
fn is_shape_element(local_name: &[u8]) -> bool {
    matches!(local_name, b"sp" | b"pic" | b"graphicFrame" | b"cxnSp")
}

#[derive(Default)]
struct ShapeBuilder {
    name: String,
    ph: Option<(PlaceholderType, u32)>,
    xfrm: Option<Xfrm>,
    in_xfrm: bool,
    xfrm_done: bool,
}

impl ShapeBuilder {
    fn on_element(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"cNvPr" if self.name.is_empty() => {
                self.name = attr_value(e, b"name").unwrap_or_default();
            },
            b"ph" if self.ph.is_none() => {
                let ph_type = attr_value(e, b"type")
                    .and_then(|token| PlaceholderType::from_token(&token))
                    .unwrap_or(PlaceholderType::Object);
                let idx = attr_i64(e, b"idx")
                    .and_then(|idx| u32::try_from(idx).ok())
                    .unwrap_or(0);
                self.ph = Some((ph_type, idx));
            },
            b"xfrm" if !self.xfrm_done => {
                self.in_xfrm = true;
                self.xfrm.get_or_insert_with(Xfrm::default);
            },
            b"off" if self.in_xfrm => {
                if let Some(xfrm) = self.xfrm.as_mut() {
                    xfrm.x = attr_i64(e, b"x").unwrap_or(0);
                    xfrm.y = attr_i64(e, b"y").unwrap_or(0);
                }
            },
            b"ext" if self.in_xfrm => {
                if let Some(xfrm) = self.xfrm.as_mut() {
                    xfrm.cx = attr_i64(e, b"cx").unwrap_or(0);
                    xfrm.cy = attr_i64(e, b"cy").unwrap_or(0);
                }
            },
            _ => {},
        }
    }

    fn finish(self) -> Option<PlaceholderShape> {
        let (ph_type, idx) = self.ph?;
        Some(PlaceholderShape {
            name: self.name,
            ph_type,
            idx,
            xfrm: self.xfrm,
        })
    }
}

/// Parse every placeholder declared in a slide, layout or master part, in
/// document order.
///
/// A `<p:ph>` without a `type` attribute is an object placeholder.
pub fn parse_placeholders(xml: &[u8]) -> Result<Vec<PlaceholderShape>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut placeholders = Vec::new();
    // Shapes can nest inside group shapes; only the innermost one collects.
    let mut stack: Vec<ShapeBuilder> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if is_shape_element(e.local_name().as_ref()) {
                    stack.push(ShapeBuilder::default());
                } else if let Some(shape) = stack.last_mut() {
                    shape.on_element(&e);
                }
            },
            Ok(Event::Empty(e)) => {
                if let Some(shape) = stack.last_mut() {
                    shape.on_element(&e);
                    if e.local_name().as_ref() == b"xfrm" {
                        shape.in_xfrm = false;
                        shape.xfrm_done = true;
                    }
                }
            },
            Ok(Event::End(e)) => {
                let local_name = e.local_name();
                if is_shape_element(local_name.as_ref()) {
                    if let Some(placeholder) = stack.pop().and_then(ShapeBuilder::finish) {
                        placeholders.push(placeholder);
                    }
                } else if local_name.as_ref() == b"xfrm"
                    && let Some(shape) = stack.last_mut()
                {
                    shape.in_xfrm = false;
                    shape.xfrm_done = true;
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(OoxmlError::Xml("unterminated shape element".to_string()));
    }

    Ok(placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = r#"<p:sldLayout xmlns:a="a" xmlns:p="p"><p:cSld name="Title Slide"><p:spTree>
        <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
        <p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/></a:xfrm></p:grpSpPr>
        <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr>
            <p:spPr><a:xfrm><a:off x="685800" y="2130425"/><a:ext cx="7772400" cy="1470025"/></a:xfrm></p:spPr></p:sp>
        <p:sp><p:nvSpPr><p:cNvPr id="3" name="Content 2"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
        <p:sp><p:nvSpPr><p:cNvPr id="4" name="Footer 3"/><p:cNvSpPr/><p:nvPr><p:ph type="ftr" sz="quarter" idx="11"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
        <p:sp><p:nvSpPr><p:cNvPr id="5" name="TextBox 4"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
            <p:spPr><a:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm></p:spPr></p:sp>
    </p:spTree></p:cSld></p:sldLayout>"#;

    #[test]
    fn test_parse_placeholders() {
        let placeholders = parse_placeholders(LAYOUT.as_bytes()).unwrap();
        assert_eq!(placeholders.len(), 3);

        assert_eq!(placeholders[0].name, "Title 1");
        assert_eq!(placeholders[0].ph_type, PlaceholderType::CenterTitle);
        assert_eq!(placeholders[0].idx, 0);
        assert_eq!(
            placeholders[0].xfrm,
            Some(Xfrm {
                x: 685_800,
                y: 2_130_425,
                cx: 7_772_400,
                cy: 1_470_025
            })
        );

        // Missing type means object; empty spPr means inherited geometry
        assert_eq!(placeholders[1].ph_type, PlaceholderType::Object);
        assert_eq!(placeholders[1].idx, 1);
        assert_eq!(placeholders[1].xfrm, None);

        assert_eq!(placeholders[2].ph_type, PlaceholderType::Footer);
        assert_eq!(placeholders[2].idx, 11);
    }

    #[test]
    fn test_group_xfrm_is_not_attributed_to_children() {
        let xml = r#"<p:spTree><p:grpSp><p:grpSpPr><a:xfrm><a:off x="9" y="9"/><a:ext cx="9" cy="9"/></a:xfrm></p:grpSpPr>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="Date"/><p:nvPr><p:ph type="dt" idx="10"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
        </p:grpSp></p:spTree>"#;
        let placeholders = parse_placeholders(xml.as_bytes()).unwrap();
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].ph_type, PlaceholderType::Date);
        assert_eq!(placeholders[0].xfrm, None);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let xml = b"<p:spTree><p:sp><p:nvSpPr></p:sp></p:spTree>";
        assert!(parse_placeholders(xml).is_err());
    }

    #[test]
    fn test_type_table() {
        for token in ["title", "ctrTitle", "ftr", "sldNum", "dt", "pic", "sldImg"] {
            let ph_type = PlaceholderType::from_token(token).unwrap();
            assert_eq!(ph_type.token(), token);
        }
        assert_eq!(PlaceholderType::from_token("bogus"), None);

        assert_eq!(PlaceholderType::Footer.code(), 15);
        assert_eq!(PlaceholderType::SlideNumber.code(), 13);
        assert_eq!(PlaceholderType::Date.code(), 16);
        assert_eq!(PlaceholderType::SlideImage.code(), 101);
        assert_eq!(PlaceholderType::ClipArt.name(), "BITMAP");
    }

    #[test]
    fn test_base_type() {
        assert_eq!(PlaceholderType::CenterTitle.base_type(), PlaceholderType::Title);
        assert_eq!(PlaceholderType::Subtitle.base_type(), PlaceholderType::Body);
        assert_eq!(PlaceholderType::Header.base_type(), PlaceholderType::Body);
        assert_eq!(PlaceholderType::Footer.base_type(), PlaceholderType::Footer);
        assert!(!PlaceholderType::SlideNumber.is_cloned_on_new_slide());
        assert!(PlaceholderType::Picture.is_cloned_on_new_slide());
    }
}
