//! Main presentation object: slide size, masters, layouts and slides.
use crate::ooxml::error::Result;
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::pptx::parts::{PresentationPart, SlideId, SlideMasterPart};
use crate::ooxml::pptx::slide::{SlideLayout, SlideMaster};

/// A presentation or template.
///
/// Not constructed directly; use [`Package::presentation`](super::Package::presentation).
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_probe::ooxml::pptx::Package;
///
/// let pkg = Package::open("corporate.potx")?;
/// let pres = pkg.presentation()?;
///
/// for (i, master) in pres.slide_masters()?.iter().enumerate() {
///     println!("Master {}: {}", i, master.name()?);
///     for layout in master.slide_layouts()? {
///         println!("  {}", layout.name()?);
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Presentation<'a> {
    part: PresentationPart<'a>,
    package: &'a OpcPackage,
    slide_ids: &'a [SlideId],
}

impl<'a> Presentation<'a> {
    #[inline]
    pub(crate) fn new(
        part: PresentationPart<'a>,
        package: &'a OpcPackage,
        slide_ids: &'a [SlideId],
    ) -> Self {
        Self {
            part,
            package,
            slide_ids,
        }
    }

    /// Declared slide size `(width, height)` in EMUs.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        self.part.slide_size()
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_ids.len()
    }

    /// Slide masters in `<p:sldMasterIdLst>` order.
    pub fn slide_masters(&self) -> Result<Vec<SlideMaster<'a>>> {
        let pres_part = self.part.part();
        self.part
            .slide_master_rids()?
            .iter()
            .map(|r_id| -> Result<SlideMaster<'a>> {
                let partname = pres_part.related_partname(r_id)?;
                let part = self.package.get_part(&partname)?;
                Ok(SlideMaster::new(SlideMasterPart::from_part(part)?, self.package))
            })
            .collect()
    }

    /// Every layout of every master, masters in order and each master's layouts
    /// in order, paired with the owning master's index.
    pub fn slide_layouts(&self) -> Result<Vec<(usize, SlideLayout<'a>)>> {
        let mut layouts = Vec::new();
        for (master_index, master) in self.slide_masters()?.iter().enumerate() {
            layouts.extend(
                master
                    .slide_layouts()?
                    .into_iter()
                    .map(|layout| (master_index, layout)),
            );
        }
        Ok(layouts)
    }
}
