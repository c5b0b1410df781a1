use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::directory::ContactDirectory;
use super::text_format::{self, ContactRecord};
use crate::error::ContactResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The file already held exactly this content; nothing was written.
    Unchanged,
    Written,
}

/// Writes every contact to `path`, unless the file already holds identical
/// content. The new content goes to a temp file beside the target which is
/// then moved into place, so an interrupted save never truncates the file.
/// An existing file keeps its permissions; a new one gets the temp file's
/// owner-only mode.
pub fn save_to_file(dir: &ContactDirectory, path: &Path) -> ContactResult<SaveOutcome> {
    let serialized = text_format::serialize_directory(dir);

    match fs::read(path) {
        Ok(existing) if existing == serialized.as_bytes() => {
            tracing::debug!(path = %path.display(), "contact file unchanged");
            return Ok(SaveOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    let existing_permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(serialized.as_bytes())?;
    temp_file.flush()?;
    if let Some(permissions) = existing_permissions {
        temp_file.as_file().set_permissions(permissions)?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), contacts = dir.len(), "contacts saved");
    Ok(SaveOutcome::Written)
}

/// Reads the contact file into records. The caller decides how each record
/// joins the directory (see `contact_ops::add_contact`).
pub fn load_from_file(path: &Path) -> ContactResult<Vec<ContactRecord>> {
    let text = fs::read_to_string(path)?;
    let records = text_format::parse_records(&text);
    tracing::info!(path = %path.display(), records = records.len(), "contact file read");
    Ok(records)
}
