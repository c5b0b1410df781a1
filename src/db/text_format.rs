//! Plain-text contact file format.
//!
//! ```text
//! <name>
//! <type>,<number>
//! ...
//! <blank line>
//! ```

use super::directory::ContactDirectory;
use crate::model::{Contact, PhoneNumbers};

/// A contact as read from the file, before it has been given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub name: String,
    pub phone_numbers: PhoneNumbers,
}

impl ContactRecord {
    pub fn into_contact(self, dir: &mut ContactDirectory) -> Contact {
        let mut contact = dir.create_contact(self.name);
        contact.phone_numbers = self.phone_numbers;
        contact
    }
}

/// Concatenated text blocks of every contact, in directory order.
pub fn serialize_directory(dir: &ContactDirectory) -> String {
    dir.contacts().map(Contact::serialize).collect()
}

/// Splits file contents into records. A blank line ends a record; a final
/// record without a trailing blank line is kept too.
pub fn parse_records(text: &str) -> Vec<ContactRecord> {
    let mut records = Vec::new();
    let mut current: Option<ContactRecord> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        let line_no = idx + 1;

        if line.is_empty() {
            if let Some(record) = current.take() {
                push_record(&mut records, record);
            }
            continue;
        }

        match current.as_mut() {
            None => {
                current = Some(ContactRecord {
                    name: line.to_string(),
                    phone_numbers: PhoneNumbers::new(),
                });
            }
            Some(record) => match line.split_once(',') {
                Some((label, number)) => {
                    if !record.phone_numbers.add(label, number) {
                        tracing::debug!(line = line_no, "duplicate phone number collapsed");
                    }
                }
                None => {
                    tracing::warn!(line = line_no, content = line, "skipping phone line without a comma");
                }
            },
        }
    }

    if let Some(record) = current {
        push_record(&mut records, record);
    }
    records
}

fn push_record(records: &mut Vec<ContactRecord>, record: ContactRecord) {
    if record.name.trim().is_empty() {
        tracing::warn!("skipping contact record with a blank name");
        return;
    }
    records.push(record);
}
