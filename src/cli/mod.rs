pub mod context;
pub mod contact_commands;

use std::path::PathBuf;

use crate::db::ContactDirectory;
use context::CLIContext;

/// Startup settings for the interactive session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub file: PathBuf,
    pub page_size: usize,
}

/// Run the interactive menu.
pub fn run(settings: &Settings) {
    println!("Contact Book");
    println!();

    let mut ctx = CLIContext::new(ContactDirectory::new(), settings.file.clone(), settings.page_size);

    if ctx.file.exists() {
        contact_commands::load_current(&mut ctx);
    } else {
        println!("No contact file at {}, starting empty.", ctx.file.display());
    }

    menu_loop(&mut ctx);
}

fn menu_loop(ctx: &mut CLIContext) {
    loop {
        println!();
        print_menu();
        let choice = match context::prompt("Enter your choice: ") {
            Some(s) => s,
            None => break,
        };

        match choice.as_str() {
            "1" => contact_commands::add(ctx),
            "2" => contact_commands::delete(ctx),
            "3" => contact_commands::remove_phone(ctx),
            "4" => contact_commands::search(ctx),
            "5" => contact_commands::rename(ctx),
            "6" => contact_commands::display_all(ctx),
            "7" => contact_commands::save(ctx),
            "8" => contact_commands::load(ctx),
            "9" => {
                println!("Exiting...");
                break;
            }
            "10" => {
                contact_commands::save_current(ctx);
                println!("Saving and Exiting...");
                break;
            }
            "" => {}
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn print_menu() {
    println!("Menu Options:");
    println!("1. Add Contact");
    println!("2. Delete Contact");
    println!("3. Remove Phone Number");
    println!("4. Search Contact");
    println!("5. Rename Contact");
    println!("6. Display All Contacts");
    println!("7. Save Contacts to File");
    println!("8. Load Contacts from File");
    println!("9. Exit");
    println!("10. Save and Exit");
}
