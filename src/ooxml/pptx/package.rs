//! Package implementation for PowerPoint presentations and templates.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::constants::relationship_type as RT;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::{Part, XmlPart};
use crate::ooxml::pptx::parts::{PresentationPart, SlideId, SlideLayoutPart, SlidePart};
use crate::ooxml::pptx::presentation::Presentation;
use crate::ooxml::pptx::slide::Slide;
use crate::ooxml::pptx::slide_xml::new_slide_xml;
use std::io::{Read, Seek};
use std::path::Path;

/// Main-part content types accepted as a presentation.
const PRESENTATION_CONTENT_TYPES: [&str; 4] = [
    ct::PML_PRESENTATION_MAIN,
    ct::PML_PRES_MACRO_MAIN,
    ct::PML_TEMPLATE_MAIN,
    ct::PML_TEMPLATE_MACRO_MAIN,
];

/// Smallest slide id PowerPoint hands out.
const MIN_SLIDE_ID: u32 = 256;

/// Where a slide added with [`Package::add_slide`] lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideHandle {
    pub partname: PackURI,
    /// Relationship id from the presentation part to the slide
    pub r_id: String,
    pub slide_id: u32,
}

/// A PowerPoint (.pptx/.potx) package held in memory.
///
/// Slides can be added and removed; the changes never reach the file the package
/// was opened from.
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_probe::ooxml::pptx::Package;
///
/// let pkg = Package::open("corporate.potx")?;
/// let pres = pkg.presentation()?;
/// println!("Template has {} slides", pres.slide_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    opc: OpcPackage,
    pres_partname: PackURI,
    /// `<p:sldIdLst>`, kept here so added slides show up without rewriting XML
    slide_ids: Vec<SlideId>,
    /// Problems noticed while the package was being worked on
    diagnostics: Vec<String>,
}

impl Package {
    /// Open a package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Open a package from bytes already in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    /// Open a package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        let content_type = main_part.content_type();
        if !PRESENTATION_CONTENT_TYPES.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: PRESENTATION_CONTENT_TYPES.join(" or "),
                got: content_type.to_string(),
            });
        }

        let pres_partname = main_part.partname().clone();
        let slide_ids = PresentationPart::from_part(main_part)?.slide_ids()?;

        Ok(Self {
            opc,
            pres_partname,
            slide_ids,
            diagnostics: Vec::new(),
        })
    }

    /// The main presentation object.
    pub fn presentation(&self) -> Result<Presentation<'_>> {
        let part = self.opc.get_part(&self.pres_partname)?;
        Ok(Presentation::new(
            PresentationPart::from_part(part)?,
            &self.opc,
            &self.slide_ids,
        ))
    }

    #[inline]
    pub fn slide_ids(&self) -> &[SlideId] {
        &self.slide_ids
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_ids.len()
    }

    #[inline]
    pub fn opc(&self) -> &OpcPackage {
        &self.opc
    }

    /// Record a problem that did not stop the current operation.
    pub fn push_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics.push(message.into());
    }

    /// Drain the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Add a slide based on the layout at `layout_partname` and append it to the
    /// slide list.
    ///
    /// The new slide clones the layout's placeholders (see
    /// [`new_slide_xml`]) and is related to the layout. Nothing is written to disk.
    pub fn add_slide(&mut self, layout_partname: &PackURI) -> Result<SlideHandle> {
        let layout_part = self
            .opc
            .get_part(layout_partname)
            .map_err(|_| OoxmlError::PartNotFound(layout_partname.to_string()))?;

        layout_part
            .rels()
            .part_with_reltype(RT::SLIDE_MASTER)
            .map_err(|e| {
                OoxmlError::InvalidRelationship(format!(
                    "layout {} has no slide master: {}",
                    layout_partname, e
                ))
            })?;

        let layout_placeholders = SlideLayoutPart::from_part(layout_part)?.placeholders()?;
        let xml = new_slide_xml(&layout_placeholders);

        let partname = self.opc.next_partname("/ppt/slides/slide%d.xml")?;
        let mut slide_part = XmlPart::new(partname.clone(), ct::PML_SLIDE.to_string(), xml.into_bytes());
        slide_part.relate_to(&layout_partname.relative_ref(partname.base_uri()), RT::SLIDE_LAYOUT);

        // Relate first: once the presentation part is found nothing below can fail.
        let pres_base = self.pres_partname.base_uri().to_string();
        let r_id = self
            .opc
            .get_part_mut(&self.pres_partname)?
            .relate_to(&partname.relative_ref(&pres_base), RT::SLIDE);
        self.opc.add_part(Box::new(slide_part));

        let slide_id = self
            .slide_ids
            .iter()
            .map(|s| s.id)
            .max()
            .unwrap_or(MIN_SLIDE_ID - 1)
            .max(MIN_SLIDE_ID - 1)
            + 1;
        self.slide_ids.push(SlideId {
            id: slide_id,
            r_id: r_id.clone(),
        });

        tracing::debug!(slide = %partname, layout = %layout_partname, "added slide");

        Ok(SlideHandle {
            partname,
            r_id,
            slide_id,
        })
    }

    /// Undo [`add_slide`](Self::add_slide): drop the slide part, the presentation's
    /// relationship to it and its slide-list entry.
    ///
    /// Every step is attempted even when an earlier one fails; the failures are
    /// reported together.
    pub fn remove_slide(&mut self, handle: &SlideHandle) -> Result<()> {
        let mut failures = Vec::new();

        if let Err(e) = self.opc.remove_part(&handle.partname) {
            failures.push(format!("slide part {}: {}", handle.partname, e));
        }

        match self.opc.get_part_mut(&self.pres_partname) {
            Ok(pres_part) => {
                if pres_part.rels_mut().remove(&handle.r_id).is_none() {
                    failures.push(format!("relationship {} not found", handle.r_id));
                }
            },
            Err(e) => failures.push(format!("presentation part: {}", e)),
        }

        let before = self.slide_ids.len();
        self.slide_ids
            .retain(|s| !(s.id == handle.slide_id && s.r_id == handle.r_id));
        if self.slide_ids.len() == before {
            failures.push(format!("slide id {} not in slide list", handle.slide_id));
        }

        if failures.is_empty() {
            tracing::debug!(slide = %handle.partname, "removed slide");
            Ok(())
        } else {
            Err(OoxmlError::SlideRemoval(failures.join("; ")))
        }
    }

    /// The slide behind `handle`.
    pub fn slide(&self, handle: &SlideHandle) -> Result<Slide<'_>> {
        let part = self.opc.get_part(&handle.partname)?;
        Ok(Slide::new(SlidePart::from_part(part)?, &self.opc))
    }
}
