//! Presentation part - the main part in a .pptx or .potx package.
//!
//! Corresponds to `/ppt/presentation.xml` in the package.
use crate::common::xml::{attr_i64, rel_id_attr};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use quick_xml::Reader;
use quick_xml::events::Event;

/// An entry of `<p:sldIdLst>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideId {
    /// Presentation-unique slide id (256 and up)
    pub id: u32,
    /// Relationship from the presentation part to the slide part
    pub r_id: String,
}

/// The main presentation part.
///
/// # Example
///
/// ```rust,ignore
/// let pres_part = PresentationPart::from_part(opc_part)?;
/// let (cx, cy) = pres_part.slide_size()?.unwrap_or((9_144_000, 6_858_000));
/// ```
pub struct PresentationPart<'a> {
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Slide size from `<p:sldSz cx cy>` in EMUs, `None` when the element or
    /// either attribute is missing.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"sldSz" {
                        return Ok(attr_i64(&e, b"cx").zip(attr_i64(&e, b"cy")));
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(None)
    }

    /// Entries of `<p:sldIdLst>` in presentation order.
    pub fn slide_ids(&self) -> Result<Vec<SlideId>> {
        let mut ids = Vec::new();
        self.for_each_element(b"sldId", |e| {
            let id = attr_i64(e, b"id").and_then(|id| u32::try_from(id).ok());
            if let (Some(id), Some(r_id)) = (id, rel_id_attr(e)) {
                ids.push(SlideId { id, r_id });
            }
        })?;
        Ok(ids)
    }

    /// Relationship ids of `<p:sldMasterIdLst>` entries in order.
    pub fn slide_master_rids(&self) -> Result<Vec<String>> {
        let mut rids = Vec::new();
        self.for_each_element(b"sldMasterId", |e| rids.extend(rel_id_attr(e)))?;
        Ok(rids)
    }

    fn for_each_element<F>(&self, local_name: &[u8], mut f: F) -> Result<()>
    where
        F: FnMut(&quick_xml::events::BytesStart<'_>),
    {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == local_name {
                        f(&e);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}
