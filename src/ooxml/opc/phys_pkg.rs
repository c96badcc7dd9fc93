//! Physical package access: the ZIP container behind an OPC package.
//!
//! A template is small enough to inflate completely up front, so the reader
//! decompresses every member once and hands out an in-memory map keyed by member
//! name. Nothing here ever writes back to the archive.

use crate::ooxml::opc::error::{OpcError, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Decompressed members of a ZIP-based OPC package.
pub struct PhysPkgReader {
    members: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Read and inflate the package at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Inflate a package held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut members = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut zip_file = archive.by_index(i)?;
            if zip_file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(zip_file.size() as usize);
            zip_file.read_to_end(&mut data)?;
            members.insert(zip_file.name().to_string(), data);
        }

        Ok(Self { members })
    }

    /// Number of file members in the package.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Hand the decompressed members over to the caller.
    pub fn into_members(self) -> HashMap<String, Vec<u8>> {
        self.members
    }
}
