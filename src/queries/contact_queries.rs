use crate::db::ContactDirectory;
use crate::error::ContactResult;
use crate::model::Contact;

use super::pagination::{paginate, Page};

/// Contacts whose name contains `query`, ignoring case.
pub fn matching_name<'a>(dir: &'a ContactDirectory, query: &str) -> Vec<&'a Contact> {
    let lower = query.to_lowercase();
    dir.contacts()
        .filter(|c| c.name.to_lowercase().contains(&lower))
        .collect()
}

/// Contacts whose internal key contains `query` or that have a number
/// starting with `query`. Each contact appears at most once.
pub fn matching_number<'a>(dir: &'a ContactDirectory, query: &str) -> Vec<&'a Contact> {
    dir.iter()
        .filter(|(key, c)| {
            key.contains(query) || c.phone_numbers.pairs().any(|(_, n)| n.starts_with(query))
        })
        .map(|(_, c)| c)
        .collect()
}

pub fn search_by_name<'a>(
    dir: &'a ContactDirectory,
    query: &str,
    page: usize,
    page_size: usize,
) -> ContactResult<Page<&'a Contact>> {
    paginate(matching_name(dir, query), page, page_size)
}

pub fn search_by_number<'a>(
    dir: &'a ContactDirectory,
    query: &str,
    page: usize,
    page_size: usize,
) -> ContactResult<Page<&'a Contact>> {
    paginate(matching_number(dir, query), page, page_size)
}

/// Every contact, in directory order (not sorted by name).
pub fn all_contacts(
    dir: &ContactDirectory,
    page: usize,
    page_size: usize,
) -> ContactResult<Page<&Contact>> {
    paginate(dir.contacts().collect(), page, page_size)
}
