use crate::cli::context::{self, prompt, prompt_id, CLIContext, Listing};
use crate::db::{file_store, SaveOutcome};
use crate::error::ContactError;
use crate::model::Contact;
use crate::ops::contact_ops::{self, AddOutcome, Candidate, DeleteOutcome, RenameOutcome, Resolution};

pub fn add(ctx: &mut CLIContext) {
    let Some(name) = prompt("Enter contact name: ") else { return };
    let Some(label) = prompt("Enter phone number type: ") else { return };
    let Some(number) = prompt("Enter phone number: ") else { return };

    let contact = match contact_ops::new_contact(&mut ctx.dir, &name, &label, &number) {
        Ok(c) => c,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    let outcome = match contact_ops::add_contact(&mut ctx.dir, contact, None) {
        Ok(AddOutcome::NeedsResolution { contact, candidates }) => {
            let Some(resolution) = resolve_duplicate(&contact, &candidates) else { return };
            contact_ops::add_contact(&mut ctx.dir, contact, Some(resolution))
        }
        other => other,
    };

    match outcome {
        Ok(AddOutcome::Added { .. }) => println!("Contact added successfully."),
        Ok(AddOutcome::Merged { .. }) => println!("Contact merged successfully."),
        Ok(AddOutcome::NeedsResolution { .. }) => println!("Contact not added."),
        Err(ContactError::InvalidSelection { .. }) => {
            println!("Invalid contact ID. Contact not merged.")
        }
        Err(e) => ctx.print_error(&e),
    }
}

/// Asks whether a contact with a taken name should be merged or added as a
/// new contact. Returns None (after saying why) when the answer is invalid.
pub fn resolve_duplicate(contact: &Contact, candidates: &[Candidate]) -> Option<Resolution> {
    println!("Duplicate contact name found: '{}'. Choose an option:", contact.name);
    println!("1. Merge with existing contact");
    println!("2. Add as a new contact");

    match prompt("Enter your choice: ").as_deref() {
        Some("1") => {
            println!("Select the contact ID to merge with:");
            context::list_candidates(candidates);
            let id = prompt_id("ID: ")?;
            if candidates.iter().any(|c| c.id == id) {
                Some(Resolution::Merge(id))
            } else {
                println!("Invalid contact ID. Contact not merged.");
                None
            }
        }
        Some("2") => Some(Resolution::AddNew),
        _ => {
            println!("Invalid choice. Contact not added.");
            None
        }
    }
}

pub fn delete(ctx: &mut CLIContext) {
    let Some(name) = prompt("Enter contact name to delete: ") else { return };

    let outcome = match contact_ops::delete_contact(&mut ctx.dir, &name, None) {
        Ok(DeleteOutcome::Ambiguous(candidates)) => {
            println!("Multiple contacts found with name '{}'. Please choose an ID:", name);
            context::list_candidates(&candidates);
            let Some(id) = prompt_id("Enter the ID of the contact you want to delete: ") else {
                println!("No contact deleted.");
                return;
            };
            contact_ops::delete_contact(&mut ctx.dir, &name, Some(id))
        }
        other => other,
    };

    match outcome {
        Ok(DeleteOutcome::Deleted(_)) => println!("Contact deleted successfully."),
        Ok(DeleteOutcome::Ambiguous(_)) => println!("No contact deleted."),
        Err(ContactError::InvalidSelection { .. }) => println!("Invalid ID. No contact deleted."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn remove_phone(ctx: &mut CLIContext) {
    println!("The contact ID is needed (see Search or Display All).");
    let Some(id) = prompt_id("Enter the ID: ") else { return };
    let Some(number) = prompt("Enter the phone number: ") else { return };

    match contact_ops::delete_phone_number(&mut ctx.dir, id, &number) {
        Ok(label) => {
            let name = ctx.dir.find_by_id(id).map(|c| c.name.as_str()).unwrap_or_default();
            println!("Phone number '{}' ({}) deleted from contact '{}'.", number, label, name);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn search(ctx: &mut CLIContext) {
    println!("1. Search by Name");
    println!("2. Search by Number");
    println!("3. Back");

    let listing = match prompt("Choice: ").as_deref() {
        Some("1") => match prompt("Enter contact name to search: ") {
            Some(q) => Listing::ByName(q),
            None => return,
        },
        Some("2") => match prompt("Enter search query: ") {
            Some(q) => Listing::ByNumber(q),
            None => return,
        },
        _ => return,
    };

    ctx.browse(&listing);
}

pub fn rename(ctx: &mut CLIContext) {
    let Some(old_name) = prompt("Enter old contact name: ") else { return };
    let Some(new_name) = prompt("Enter new contact name: ") else { return };

    let outcome = match contact_ops::rename_contact(&mut ctx.dir, &old_name, &new_name, None) {
        Ok(RenameOutcome::Ambiguous(candidates)) => {
            println!("Multiple contacts found with name '{}'. Please choose an ID:", old_name);
            context::list_candidates(&candidates);
            let Some(id) = prompt_id("Enter the ID of the contact you want to rename: ") else {
                println!("No contact renamed.");
                return;
            };
            contact_ops::rename_contact(&mut ctx.dir, &old_name, &new_name, Some(id))
        }
        other => other,
    };

    match outcome {
        Ok(RenameOutcome::Renamed { .. }) => println!("Contact renamed successfully."),
        Ok(RenameOutcome::Ambiguous(_)) => println!("No contact renamed."),
        Err(ContactError::InvalidSelection { .. }) => println!("Invalid ID. No contact renamed."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn display_all(ctx: &mut CLIContext) {
    ctx.browse(&Listing::All);
}

pub fn save(ctx: &mut CLIContext) {
    let Some(path) = ctx.prompt_file("Enter filename to save contacts") else { return };
    ctx.file = path;
    save_current(ctx);
}

/// Saves to the current contact file.
pub fn save_current(ctx: &CLIContext) {
    match file_store::save_to_file(&ctx.dir, &ctx.file) {
        Ok(SaveOutcome::Unchanged) => println!("File contents unchanged. No need to save."),
        Ok(SaveOutcome::Written) => println!("Contacts saved to file."),
        Err(e) => eprintln!("Error saving {}: {}", ctx.file.display(), e),
    }
}

pub fn load(ctx: &mut CLIContext) {
    let Some(path) = ctx.prompt_file("Enter filename to load contacts") else { return };
    ctx.file = path;
    load_current(ctx);
}

/// Loads the current contact file, prompting on duplicate names.
pub fn load_current(ctx: &mut CLIContext) {
    match contact_ops::load_contacts(&mut ctx.dir, &ctx.file, resolve_duplicate) {
        Ok(summary) => println!(
            "Loaded {} contact(s) from {} ({} merged, {} skipped).",
            summary.added,
            ctx.file.display(),
            summary.merged,
            summary.skipped
        ),
        Err(e) => eprintln!("Error opening {}: {}", ctx.file.display(), e),
    }
}
