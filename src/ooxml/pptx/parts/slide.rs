//! Slide parts: slides, slide layouts and slide masters.
//!
//! The three part kinds share the `<p:cSld>` common-slide-data structure, so name
//! and placeholder access is implemented once and exposed on each wrapper.
use crate::common::xml::{attr_value, rel_id_attr};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::shapes::placeholder::{PlaceholderShape, parse_placeholders};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Name attribute of the first `<p:cSld>`; empty when absent.
fn common_slide_name(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"cSld" {
                    return Ok(attr_value(&e, b"name").unwrap_or_default());
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(String::new())
}

/// A slide part (`/ppt/slides/slideN.xml`).
pub struct SlidePart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlidePart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    pub fn name(&self) -> Result<String> {
        common_slide_name(self.part.blob())
    }

    /// Placeholders placed on the slide itself.
    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        parse_placeholders(self.part.blob())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// A slide layout part (`/ppt/slideLayouts/slideLayoutN.xml`).
pub struct SlideLayoutPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideLayoutPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    pub fn name(&self) -> Result<String> {
        common_slide_name(self.part.blob())
    }

    /// Placeholders declared by the layout, in document order.
    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        parse_placeholders(self.part.blob())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// A slide master part (`/ppt/slideMasters/slideMasterN.xml`).
pub struct SlideMasterPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideMasterPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    pub fn name(&self) -> Result<String> {
        common_slide_name(self.part.blob())
    }

    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        parse_placeholders(self.part.blob())
    }

    /// Relationship ids of `<p:sldLayoutIdLst>` entries in order.
    pub fn slide_layout_rids(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.part.blob());
        reader.config_mut().trim_text(true);
        let mut rids = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"sldLayoutId" {
                        rids.extend(rel_id_attr(&e));
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(rids)
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}
