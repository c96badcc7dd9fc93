//! Error conversion implementations.
//!
//! This module contains From trait implementations and helpers that convert
//! internal error types to the unified [`ProbeError`].

use super::types::ProbeError;
use std::io::ErrorKind;
use std::path::Path;

impl From<crate::ooxml::opc::error::OpcError> for ProbeError {
    fn from(err: crate::ooxml::opc::error::OpcError) -> Self {
        ProbeError::Ooxml(crate::ooxml::error::OoxmlError::Opc(err))
    }
}

impl From<quick_xml::Error> for ProbeError {
    fn from(err: quick_xml::Error) -> Self {
        ProbeError::Ooxml(crate::ooxml::error::OoxmlError::Xml(err.to_string()))
    }
}

impl ProbeError {
    /// Classify an IO error raised while accessing `path`.
    ///
    /// Not-found and permission failures get their own variants so callers can
    /// tell a typo from an access problem.
    pub(crate) fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => ProbeError::FileNotFound(path.display().to_string()),
            ErrorKind::PermissionDenied => {
                ProbeError::PermissionDenied(path.display().to_string())
            },
            _ => ProbeError::Io(err),
        }
    }

    /// Map a package-opening failure onto the template taxonomy.
    pub(crate) fn from_package_error(
        path: &Path,
        err: crate::ooxml::error::OoxmlError,
    ) -> Self {
        use crate::ooxml::error::OoxmlError;
        use crate::ooxml::opc::error::OpcError;

        match err {
            OoxmlError::Opc(OpcError::IoError(e)) => Self::from_io(path, e),
            OoxmlError::Opc(OpcError::PackageNotFound(p)) => ProbeError::FileNotFound(p),
            other => ProbeError::InvalidTemplate(format!("{}: {}", path.display(), other)),
        }
    }
}
