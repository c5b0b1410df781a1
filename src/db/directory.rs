use crate::model::{Contact, Id};

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    contact: Contact,
}

/// In-memory contact table.
///
/// Every contact lives under a unique internal key derived from its name.
/// Entries iterate in insertion order, so "first match" rules elsewhere in
/// the crate are deterministic. The directory also owns the id counter.
#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next contact id. Ids are never reused, even when the
    /// contact that received one is merged away or deleted.
    pub fn allocate_id(&mut self) -> Id<Contact> {
        let id = Id::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Builds a fresh contact with a newly allocated id. The contact is not
    /// stored until it goes through `insert` (or `contact_ops::add_contact`).
    pub fn create_contact(&mut self, name: impl Into<String>) -> Contact {
        let id = self.allocate_id();
        Contact::new(id, name.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Lowercased name, or the name with `_1`, `_2`, ... appended when the
    /// lowercased form is taken. Never returns a key already in use.
    pub fn generate_unique_key(&self, name: &str) -> String {
        self.generate_key_ignoring(name, None)
    }

    fn generate_key_ignoring(&self, name: &str, skip: Option<usize>) -> String {
        let taken = |key: &str| {
            self.entries
                .iter()
                .enumerate()
                .any(|(i, e)| Some(i) != skip && e.key == key)
        };

        let mut key = name.to_lowercase();
        let mut suffix = 1;
        while taken(&key) {
            key = format!("{}_{}", name, suffix);
            suffix += 1;
        }
        tracing::debug!(name, key = %key, "generated contact key");
        key
    }

    /// Stores the contact under a freshly generated key and returns that key.
    pub fn insert(&mut self, contact: Contact) -> String {
        let key = self.generate_unique_key(&contact.name);
        self.entries.push(Entry {
            key: key.clone(),
            contact,
        });
        key
    }

    pub fn get(&self, key: &str) -> Option<&Contact> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.contact)
    }

    /// `(key, contact)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Contact)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.contact))
    }

    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.entries.iter().map(|e| &e.contact)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn find_by_id(&self, id: Id<Contact>) -> Option<&Contact> {
        self.contacts().find(|c| c.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: Id<Contact>) -> Option<&mut Contact> {
        self.entries
            .iter_mut()
            .map(|e| &mut e.contact)
            .find(|c| c.id == id)
    }

    pub fn key_of(&self, id: Id<Contact>) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.contact.id == id)
            .map(|e| e.key.as_str())
    }

    /// Contacts whose name matches exactly (case-sensitive).
    pub fn contacts_named(&self, name: &str) -> Vec<&Contact> {
        self.contacts().filter(|c| c.name == name).collect()
    }

    pub fn remove(&mut self, id: Id<Contact>) -> Option<Contact> {
        let pos = self.entries.iter().position(|e| e.contact.id == id)?;
        Some(self.entries.remove(pos).contact)
    }

    /// Renames the contact in place and moves it to a key derived from the
    /// new name. The contact's own current key is released first, and the
    /// entry keeps its position. Returns the new key.
    pub fn rename(&mut self, id: Id<Contact>, new_name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|e| e.contact.id == id)?;
        let key = self.generate_key_ignoring(new_name, Some(pos));
        let entry = &mut self.entries[pos];
        entry.contact.name = new_name.to_string();
        entry.key = key.clone();
        Some(key)
    }
}
