use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::{file_store, ContactDirectory};
use crate::error::{ContactError, ContactResult};
use crate::model::{Contact, Id, PhoneGroup};
use crate::ops::contact_ops::{self, Resolution};
use crate::validation;

/// JSON shape of an exported contact book.
#[derive(Debug, Serialize, Deserialize)]
struct ContactBookJson {
    contacts: Vec<ContactJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContactJson {
    /// Informational only; imports always assign fresh ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Id<Contact>>,
    name: String,
    #[serde(default)]
    phone_numbers: Vec<PhoneGroup>,
}

impl From<&Contact> for ContactJson {
    fn from(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id),
            name: contact.name.clone(),
            phone_numbers: contact.phone_numbers.groups().to_vec(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrateStats {
    pub contacts: usize,
    pub phone_numbers: usize,
}

/// Writes every contact in `dir` to `json_path` as pretty-printed JSON.
pub fn export_json(dir: &ContactDirectory, json_path: &Path) -> ContactResult<MigrateStats> {
    let book = ContactBookJson {
        contacts: dir.contacts().map(ContactJson::from).collect(),
    };
    fs::write(json_path, serde_json::to_string_pretty(&book)?)?;

    let stats = MigrateStats {
        contacts: dir.len(),
        phone_numbers: dir.contacts().map(|c| c.phone_numbers.len()).sum(),
    };
    tracing::info!(path = %json_path.display(), contacts = stats.contacts, "contacts exported");
    Ok(stats)
}

/// Reads a JSON export and adds each contact to `dir`. Name clashes are
/// always added as new contacts; nothing is merged. Every record is checked
/// before any is added, so a malformed record leaves `dir` untouched.
pub fn import_json(dir: &mut ContactDirectory, json_path: &Path) -> ContactResult<MigrateStats> {
    let json_str = fs::read_to_string(json_path)?;
    let book: ContactBookJson = serde_json::from_str(&json_str)?;

    let mut checked = Vec::with_capacity(book.contacts.len());
    for (idx, entry) in book.contacts.into_iter().enumerate() {
        let name = check_entry(&entry).map_err(|e| ContactError::Malformed {
            line: idx + 1,
            reason: e.to_string(),
        })?;
        checked.push((name, entry.phone_numbers));
    }

    let mut stats = MigrateStats::default();
    for (name, groups) in checked {
        let mut contact = dir.create_contact(name);
        for group in &groups {
            for number in &group.numbers {
                if contact.add_phone_number(&group.label, number) {
                    stats.phone_numbers += 1;
                }
            }
        }
        contact_ops::add_contact(dir, contact, Some(Resolution::AddNew))?;
        stats.contacts += 1;
    }

    tracing::info!(path = %json_path.display(), contacts = stats.contacts, "contacts imported");
    Ok(stats)
}

/// Returns the trimmed name once every field is storable in the contact file.
fn check_entry(entry: &ContactJson) -> ContactResult<String> {
    let name = validation::non_blank(&entry.name, "name")?;
    validation::single_line(&name, "name")?;
    for group in &entry.phone_numbers {
        validation::non_blank(&group.label, "phone number type")?;
        for number in &group.numbers {
            contact_ops::check_contact_fields(&name, &group.label, number)?;
        }
    }
    Ok(name)
}

/// Loads the contact file (if any), appends the JSON contacts and saves.
pub fn import_into_file(json_path: &Path, contacts_path: &Path) -> ContactResult<MigrateStats> {
    let mut dir = read_contact_file(contacts_path, true)?;
    let stats = import_json(&mut dir, json_path)?;
    file_store::save_to_file(&dir, contacts_path)?;
    Ok(stats)
}

/// Exports the contact file at `contacts_path` to `json_path`.
pub fn export_file(contacts_path: &Path, json_path: &Path) -> ContactResult<MigrateStats> {
    let dir = read_contact_file(contacts_path, false)?;
    export_json(&dir, json_path)
}

fn read_contact_file(path: &Path, allow_missing: bool) -> ContactResult<ContactDirectory> {
    let mut dir = ContactDirectory::new();
    if allow_missing && !path.exists() {
        return Ok(dir);
    }
    contact_ops::load_contacts(&mut dir, path, |_, _| Some(Resolution::AddNew))?;
    Ok(dir)
}
