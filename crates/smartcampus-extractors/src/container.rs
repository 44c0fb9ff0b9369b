//! OOXML container unpacking.
//!
//! DOCX and PPTX files are zip archives of XML parts. This module reads every
//! entry of such an archive into memory, keeping the archive's central
//! directory order.

use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{ExtractError, ExtractResult};

/// A single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEntry {
    /// Internal path, e.g. `word/document.xml`.
    pub path: String,
    /// Decompressed bytes.
    pub bytes: Vec<u8>,
}

/// Unpacked container: entries in enumeration order, unique by path.
#[derive(Debug, Clone, Default)]
pub struct Container {
    entries: Vec<ContainerEntry>,
}

impl Container {
    /// All entries in the order they were enumerated.
    pub fn entries(&self) -> &[ContainerEntry] {
        &self.entries
    }

    /// Look up an entry by exact path.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.bytes.as_slice())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the container has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unpack a zip-format container.
///
/// Fails with [`ExtractError::ContainerFormat`] when the archive is corrupt,
/// truncated, or uses an unsupported compression method.
pub fn unpack(bytes: &[u8]) -> ExtractResult<Container> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries: Vec<ContainerEntry> = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let path = file.name().to_string();

        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data).map_err(|e| {
            ExtractError::ContainerFormat(format!("Failed to read entry {}: {}", path, e))
        })?;

        // Duplicate names: last copy wins, first position kept.
        match entries.iter_mut().find(|e| e.path == path) {
            Some(existing) => {
                debug!(path = %path, "Replacing duplicate container entry");
                existing.bytes = data;
            }
            None => entries.push(ContainerEntry { path, bytes: data }),
        }
    }

    debug!(entries = entries.len(), "Unpacked container");

    Ok(Container { entries })
}
