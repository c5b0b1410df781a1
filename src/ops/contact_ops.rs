use std::path::Path;

use crate::db::{file_store, ContactDirectory};
use crate::error::{ContactError, ContactResult};
use crate::model::{Contact, Id};
use crate::validation;

/// A stored contact that shares the name an operation was asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: Id<Contact>,
    pub name: String,
}

impl Candidate {
    fn of(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
        }
    }
}

/// How to add a contact whose name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Fold the new contact's phone types into this existing contact.
    Merge(Id<Contact>),
    /// Store it as a separate contact under a new key.
    AddNew,
}

#[derive(Debug)]
pub enum AddOutcome {
    Added { id: Id<Contact>, key: String },
    Merged { into: Id<Contact> },
    /// The name is taken and no resolution was given. The contact is handed
    /// back so the caller can retry with one.
    NeedsResolution {
        contact: Contact,
        candidates: Vec<Candidate>,
    },
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted(Contact),
    Ambiguous(Vec<Candidate>),
}

#[derive(Debug)]
pub enum RenameOutcome {
    Renamed { id: Id<Contact>, key: String },
    Ambiguous(Vec<Candidate>),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub added: usize,
    pub merged: usize,
    pub skipped: usize,
}

/// Builds a new contact with one phone number, trimming and rejecting blank
/// input.
pub fn new_contact(
    dir: &mut ContactDirectory,
    name: &str,
    label: &str,
    number: &str,
) -> ContactResult<Contact> {
    let valid_name = validation::non_blank(name, "name")?;
    let valid_label = validation::non_blank(label, "phone number type")?;
    let valid_number = validation::non_blank(number, "phone number")?;
    check_contact_fields(&valid_name, &valid_label, &valid_number)?;

    let mut contact = dir.create_contact(valid_name);
    contact.add_phone_number(&valid_label, &valid_number);
    Ok(contact)
}

/// Checks that a name, type and number can be written to the contact file
/// and read back unchanged.
pub fn check_contact_fields(name: &str, label: &str, number: &str) -> ContactResult<()> {
    validation::single_line(name, "name")?;
    validation::no_separator(label, "phone number type")?;
    validation::single_line(number, "phone number")
}

/// Adds a contact, resolving a name clash with `resolution`.
///
/// Without a clash the contact is inserted and `resolution` is ignored.
/// With a clash and no resolution, nothing changes and the candidates are
/// returned. Merging only brings over phone types the target lacks.
pub fn add_contact(
    dir: &mut ContactDirectory,
    contact: Contact,
    resolution: Option<Resolution>,
) -> ContactResult<AddOutcome> {
    let candidates: Vec<Candidate> = dir
        .contacts_named(&contact.name)
        .into_iter()
        .map(Candidate::of)
        .collect();

    if candidates.is_empty() {
        return Ok(insert(dir, contact));
    }

    match resolution {
        None => Ok(AddOutcome::NeedsResolution {
            contact,
            candidates,
        }),
        Some(Resolution::AddNew) => Ok(insert(dir, contact)),
        Some(Resolution::Merge(target_id)) => {
            if !candidates.iter().any(|c| c.id == target_id) {
                return Err(ContactError::InvalidSelection {
                    id: target_id.value,
                });
            }
            let target = dir
                .find_by_id_mut(target_id)
                .ok_or_else(|| ContactError::not_found("Contact", target_id))?;
            for group in contact.phone_numbers.into_groups() {
                target.phone_numbers.insert_group(group);
            }
            tracing::info!(into = %target_id, name = %target.name, "contact merged");
            Ok(AddOutcome::Merged { into: target_id })
        }
    }
}

fn insert(dir: &mut ContactDirectory, contact: Contact) -> AddOutcome {
    let id = contact.id;
    let name = contact.name.clone();
    let key = dir.insert(contact);
    tracing::info!(%id, %name, %key, "contact added");
    AddOutcome::Added { id, key }
}

/// Deletes the contact called `name`. When several share the name,
/// `target` picks one; without it the candidates are returned.
pub fn delete_contact(
    dir: &mut ContactDirectory,
    name: &str,
    target: Option<Id<Contact>>,
) -> ContactResult<DeleteOutcome> {
    let id = match select(dir, name, target)? {
        Selected::One(id) => id,
        Selected::Ambiguous(candidates) => return Ok(DeleteOutcome::Ambiguous(candidates)),
    };

    let removed = dir
        .remove(id)
        .ok_or_else(|| ContactError::not_found("Contact", id))?;
    tracing::info!(%id, name = %removed.name, "contact deleted");
    Ok(DeleteOutcome::Deleted(removed))
}

/// Renames the contact called `old_name`, moving it to a key derived from
/// `new_name`. Disambiguation works as in [`delete_contact`].
pub fn rename_contact(
    dir: &mut ContactDirectory,
    old_name: &str,
    new_name: &str,
    target: Option<Id<Contact>>,
) -> ContactResult<RenameOutcome> {
    let valid_name = validation::non_blank(new_name, "new name")?;
    validation::single_line(&valid_name, "new name")?;

    let id = match select(dir, old_name, target)? {
        Selected::One(id) => id,
        Selected::Ambiguous(candidates) => return Ok(RenameOutcome::Ambiguous(candidates)),
    };

    let key = dir
        .rename(id, &valid_name)
        .ok_or_else(|| ContactError::not_found("Contact", id))?;
    tracing::info!(%id, from = old_name, to = %valid_name, "contact renamed");
    Ok(RenameOutcome::Renamed { id, key })
}

/// Adds a number to an existing contact. Returns false when the number was
/// already filed under that type.
pub fn add_phone_number(
    dir: &mut ContactDirectory,
    id: Id<Contact>,
    label: &str,
    number: &str,
) -> ContactResult<bool> {
    let valid_label = validation::non_blank(label, "phone number type")?;
    let valid_number = validation::non_blank(number, "phone number")?;
    validation::no_separator(&valid_label, "phone number type")?;
    validation::single_line(&valid_number, "phone number")?;
    let contact = dir
        .find_by_id_mut(id)
        .ok_or_else(|| ContactError::not_found("Contact", id))?;
    Ok(contact.add_phone_number(&valid_label, &valid_number))
}

/// Removes the first occurrence of `number` from the contact, scanning its
/// phone types in order. Returns the type the number was filed under.
pub fn delete_phone_number(
    dir: &mut ContactDirectory,
    id: Id<Contact>,
    number: &str,
) -> ContactResult<String> {
    let contact = dir
        .find_by_id_mut(id)
        .ok_or_else(|| ContactError::not_found("Contact", id))?;
    let label = contact
        .phone_numbers
        .remove_first(number)
        .ok_or_else(|| ContactError::not_found("Phone number", number))?;
    tracing::info!(%id, %label, "phone number removed");
    Ok(label)
}

/// Reads `path` and feeds every record through [`add_contact`]. Name clashes
/// are settled by `resolve`; returning `None` skips that record, as does a
/// resolution naming a contact that is not a candidate.
pub fn load_contacts<F>(
    dir: &mut ContactDirectory,
    path: &Path,
    mut resolve: F,
) -> ContactResult<LoadSummary>
where
    F: FnMut(&Contact, &[Candidate]) -> Option<Resolution>,
{
    let records = file_store::load_from_file(path)?;
    let mut summary = LoadSummary::default();

    for record in records {
        let contact = record.into_contact(dir);
        let outcome = match add_contact(dir, contact, None)? {
            AddOutcome::NeedsResolution {
                contact,
                candidates,
            } => match resolve(&contact, candidates.as_slice()) {
                Some(resolution) => match add_contact(dir, contact, Some(resolution)) {
                    Ok(outcome) => outcome,
                    Err(ContactError::InvalidSelection { id }) => {
                        tracing::warn!(id, "invalid merge target, record skipped");
                        summary.skipped += 1;
                        continue;
                    }
                    Err(e) => return Err(e),
                },
                None => {
                    summary.skipped += 1;
                    continue;
                }
            },
            outcome => outcome,
        };

        match outcome {
            AddOutcome::Added { .. } => summary.added += 1,
            AddOutcome::Merged { .. } => summary.merged += 1,
            AddOutcome::NeedsResolution { .. } => summary.skipped += 1,
        }
    }

    Ok(summary)
}

enum Selected {
    One(Id<Contact>),
    Ambiguous(Vec<Candidate>),
}

fn select(
    dir: &ContactDirectory,
    name: &str,
    target: Option<Id<Contact>>,
) -> ContactResult<Selected> {
    let candidates: Vec<Candidate> = dir
        .contacts_named(name)
        .into_iter()
        .map(Candidate::of)
        .collect();

    if candidates.is_empty() {
        return Err(ContactError::not_found("Contact", name));
    }

    match target {
        None if candidates.len() == 1 => Ok(Selected::One(candidates[0].id)),
        None => Ok(Selected::Ambiguous(candidates)),
        Some(id) if candidates.iter().any(|c| c.id == id) => Ok(Selected::One(id)),
        Some(id) => Err(ContactError::InvalidSelection { id: id.value }),
    }
}
