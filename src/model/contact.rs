use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::Id;

/// All numbers filed under one phone type (e.g. "mobile").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneGroup {
    #[serde(rename = "type")]
    pub label: String,
    pub numbers: Vec<String>,
}

/// Phone numbers grouped by type.
///
/// Types iterate in the order they were first added and numbers within a
/// type in insertion order. A number is stored at most once per type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumbers {
    groups: Vec<PhoneGroup>,
}

impl PhoneNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `number` under `label`. Returns false if that exact number is
    /// already filed under that type.
    pub fn add(&mut self, label: &str, number: &str) -> bool {
        match self.groups.iter_mut().find(|g| g.label == label) {
            Some(group) => {
                if group.numbers.iter().any(|n| n == number) {
                    return false;
                }
                group.numbers.push(number.to_string());
            }
            None => self.groups.push(PhoneGroup {
                label: label.to_string(),
                numbers: vec![number.to_string()],
            }),
        }
        true
    }

    /// Inserts a whole group unless the type is already present.
    /// Existing lists are never overwritten or extended.
    pub fn insert_group(&mut self, group: PhoneGroup) -> bool {
        if self.contains_type(&group.label) {
            return false;
        }
        self.groups.push(group);
        true
    }

    /// Removes the first occurrence of `number`, scanning types in order.
    /// Returns the type it was removed from. A type left empty is dropped.
    pub fn remove_first(&mut self, number: &str) -> Option<String> {
        let (gi, pos) = self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.numbers.iter().position(|n| n == number).map(|pos| (gi, pos))
        })?;

        let group = &mut self.groups[gi];
        group.numbers.remove(pos);
        let label = group.label.clone();
        if group.numbers.is_empty() {
            self.groups.remove(gi);
        }
        Some(label)
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.numbers.as_slice())
    }

    pub fn contains_type(&self, label: &str) -> bool {
        self.groups.iter().any(|g| g.label == label)
    }

    pub fn groups(&self) -> &[PhoneGroup] {
        &self.groups
    }

    /// Every `(type, number)` pair in iteration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups.iter().flat_map(|g| {
            g.numbers
                .iter()
                .map(move |n| (g.label.as_str(), n.as_str()))
        })
    }

    /// Number of stored `(type, number)` pairs.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.numbers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_groups(self) -> Vec<PhoneGroup> {
        self.groups
    }
}

/// A person in the contact book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: Id<Contact>,
    pub name: String,
    pub phone_numbers: PhoneNumbers,
}

impl Contact {
    pub fn new(id: Id<Contact>, name: String) -> Self {
        Self {
            id,
            name,
            phone_numbers: PhoneNumbers::new(),
        }
    }

    /// Returns false (and stores nothing) when the number is already filed
    /// under `label`.
    pub fn add_phone_number(&mut self, label: &str, number: &str) -> bool {
        self.phone_numbers.add(label, number)
    }

    /// Text block used by the contact file: the name, one `type,number` line
    /// per pair, then a blank line.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 1 + self.phone_numbers.len() * 16);
        out.push_str(&self.name);
        out.push('\n');
        for (label, number) in self.phone_numbers.pairs() {
            out.push_str(label);
            out.push(',');
            out.push_str(number);
            out.push('\n');
        }
        out.push('\n');
        out
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        for group in self.phone_numbers.groups() {
            writeln!(f, "{} Numbers:", group.label)?;
            for number in &group.numbers {
                writeln!(f, "- {}", number)?;
            }
        }
        Ok(())
    }
}
