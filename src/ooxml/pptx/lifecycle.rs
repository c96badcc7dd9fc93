//! Throwaway slides for measuring layouts.
//!
//! Placeholder geometry of a layout is often only complete once a slide has been
//! created from it and inheritance has been applied. [`with_transient_slide`]
//! creates such a slide in the in-memory package, hands it to a closure and
//! removes it again on every exit path.
//!
//! Removal is best effort. If it fails, the failure is logged and recorded as a
//! package diagnostic instead of being returned, so it never masks the closure's
//! own outcome. The package is never written back, which is why an extra slide
//! left behind is an accepted risk rather than corruption.
use crate::ooxml::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::package::{Package, SlideHandle};
use crate::ooxml::pptx::slide::Slide;

/// Run `f` against a slide freshly created from `layout`, then remove the slide.
///
/// Errors from creating the slide propagate and nothing is cleaned up, since
/// nothing was added. Once the slide exists it is removed whether `f` returns,
/// the slide cannot be loaded, or `f` panics.
///
/// # Examples
///
/// ```rust,no_run
/// use pptx_probe::ooxml::pptx::{Package, with_transient_slide};
///
/// let mut pkg = Package::open("corporate.potx")?;
/// let layout = pkg.presentation()?.slide_layouts()?[0].1.partname().clone();
/// let count = with_transient_slide(&mut pkg, &layout, |slide| {
///     slide.placeholders().map(|phs| phs.len())
/// })??;
/// println!("{} placeholders", count);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn with_transient_slide<T, F>(package: &mut Package, layout: &PackURI, f: F) -> Result<T>
where
    F: FnOnce(&Slide<'_>) -> T,
{
    let handle = package.add_slide(layout)?;
    let guard = TransientSlide::new(package, handle);
    let slide = guard.slide()?;
    Ok(f(&slide))
}

/// Drop guard owning a slide added to the package.
pub(crate) struct TransientSlide<'a> {
    package: &'a mut Package,
    handle: Option<SlideHandle>,
}

impl<'a> TransientSlide<'a> {
    pub(crate) fn new(package: &'a mut Package, handle: SlideHandle) -> Self {
        Self {
            package,
            handle: Some(handle),
        }
    }

    fn slide(&self) -> Result<Slide<'_>> {
        match &self.handle {
            Some(handle) => self.package.slide(handle),
            None => Err(crate::ooxml::error::OoxmlError::PartNotFound(
                "transient slide already released".to_string(),
            )),
        }
    }
}

impl Drop for TransientSlide<'_> {
    fn drop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        if let Err(e) = self.package.remove_slide(&handle) {
            tracing::warn!(
                slide = %handle.partname,
                error = %e,
                "transient slide was not fully removed"
            );
            self.package.push_diagnostic(format!(
                "transient slide {} was not fully removed: {}",
                handle.partname, e
            ));
        }
    }
}
