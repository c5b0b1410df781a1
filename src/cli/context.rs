use std::io::{self, Write};
use std::path::PathBuf;

use crate::db::ContactDirectory;
use crate::error::{ContactError, ContactResult};
use crate::model::{Contact, Id};
use crate::ops::contact_ops::Candidate;
use crate::queries::{contact_queries, Page};
use crate::validation::trim_optional;

pub struct CLIContext {
    pub dir: ContactDirectory,
    /// File used by "Save and Exit"; updated whenever a save or load names
    /// another file.
    pub file: PathBuf,
    pub page_size: usize,
}

impl CLIContext {
    pub fn new(dir: ContactDirectory, file: PathBuf, page_size: usize) -> Self {
        Self {
            dir,
            file,
            page_size,
        }
    }

    /// Print an error.
    pub fn print_error(&self, e: &ContactError) {
        println!("Error: {}", e);
    }

    /// Asks for a file name, falling back to the current file on empty input.
    pub fn prompt_file(&self, label: &str) -> Option<PathBuf> {
        let answer = read_line(&format!("{} [{}]: ", label, self.file.display()))?;
        let path = trim_optional(Some(answer.as_str()))
            .map(PathBuf::from)
            .unwrap_or_else(|| self.file.clone());
        Some(path)
    }

    /// Shows a listing page by page, reading `n`/`p`/`q` between pages.
    pub fn browse(&self, listing: &Listing) {
        let mut page = 1;
        loop {
            let current = match listing.fetch(&self.dir, page, self.page_size) {
                Ok(p) => p,
                Err(ContactError::PageOutOfRange { total_pages: 0, .. }) => {
                    println!("{}", listing.empty_message());
                    return;
                }
                Err(e) => {
                    self.print_error(&e);
                    return;
                }
            };

            for contact in &current.items {
                println!("{}", contact);
            }
            println!("Page {}/{}", current.number, current.total_pages);

            if !current.has_next() && !current.has_previous() {
                return;
            }

            match prompt("Commands: [n] Next Page, [p] Previous Page, [q] Quit: ").as_deref() {
                Some("n") if current.has_next() => page += 1,
                Some("p") if current.has_previous() => page -= 1,
                Some("q") | None => return,
                _ => println!("Invalid command."),
            }
        }
    }
}

/// What to page through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    All,
    ByName(String),
    ByNumber(String),
}

impl Listing {
    fn fetch<'a>(
        &self,
        dir: &'a ContactDirectory,
        page: usize,
        page_size: usize,
    ) -> ContactResult<Page<&'a Contact>> {
        match self {
            Listing::All => contact_queries::all_contacts(dir, page, page_size),
            Listing::ByName(query) => contact_queries::search_by_name(dir, query, page, page_size),
            Listing::ByNumber(query) => {
                contact_queries::search_by_number(dir, query, page, page_size)
            }
        }
    }

    fn empty_message(&self) -> &'static str {
        match self {
            Listing::All => "No contacts to display.",
            _ => "No matching contacts found.",
        }
    }
}

/// Prompt and read a line from stdin. Returns None on EOF.
pub fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) => None,
        Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
        Err(_) => None,
    }
}

/// Read a line, trimmed.
pub fn prompt(prompt: &str) -> Option<String> {
    read_line(prompt).map(|s| s.trim().to_string())
}

/// Reads a contact id. Prints a message and returns None on bad input.
pub fn prompt_id(label: &str) -> Option<Id<Contact>> {
    let answer = prompt(label)?;
    match Id::parse(&answer) {
        Ok(id) => Some(id),
        Err(_) => {
            println!("'{}' is not a valid ID.", answer);
            None
        }
    }
}

pub fn list_candidates(candidates: &[Candidate]) {
    for (i, c) in candidates.iter().enumerate() {
        println!("{}. ID: {}, Name: {}", i + 1, c.id, c.name);
    }
}
