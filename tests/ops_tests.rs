use std::fs;

use contact_book::db::*;
use contact_book::error::ContactError;
use contact_book::model::*;
use contact_book::ops::contact_ops::*;

fn add(dir: &mut ContactDirectory, name: &str, label: &str, number: &str) -> Id<Contact> {
    let contact = new_contact(dir, name, label, number).unwrap();
    match add_contact(dir, contact, Some(Resolution::AddNew)).unwrap() {
        AddOutcome::Added { id, .. } => id,
        other => panic!("expected Added, got {:?}", other),
    }
}

fn setup() -> ContactDirectory {
    let mut dir = ContactDirectory::new();
    add(&mut dir, "Alice", "mobile", "555-1111");
    add(&mut dir, "Bob", "home", "555-2222");
    dir
}

// ==========================================================================
// ADD CONTACT TESTS
// ==========================================================================

#[test]
fn new_contact_trims_input() {
    let mut dir = ContactDirectory::new();
    let c = new_contact(&mut dir, "  Alice ", " mobile ", " 555 ").unwrap();
    assert_eq!(c.name, "Alice");
    assert_eq!(c.phone_numbers.get("mobile").unwrap(), ["555"]);
}

#[test]
fn new_contact_rejects_blank_fields() {
    let mut dir = ContactDirectory::new();
    assert!(matches!(
        new_contact(&mut dir, "   ", "mobile", "1"),
        Err(ContactError::BlankField { .. })
    ));
    assert!(new_contact(&mut dir, "Alice", "", "1").is_err());
    assert!(new_contact(&mut dir, "Alice", "mobile", " ").is_err());
}

#[test]
fn add_unique_name_inserts_without_resolution() {
    let mut dir = setup();
    let carol = dir.create_contact("Carol");
    let outcome = add_contact(&mut dir, carol, None).unwrap();
    assert!(matches!(outcome, AddOutcome::Added { ref key, .. } if key == "carol"));
    assert_eq!(dir.len(), 3);
}

#[test]
fn add_duplicate_name_without_resolution_changes_nothing() {
    let mut dir = setup();
    let bob = dir.create_contact("Bob");
    let bob_id = bob.id;
    match add_contact(&mut dir, bob, None).unwrap() {
        AddOutcome::NeedsResolution { contact, candidates } => {
            assert_eq!(contact.id, bob_id);
            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].name, "Bob");
        }
        other => panic!("expected NeedsResolution, got {:?}", other),
    }
    assert_eq!(dir.len(), 2);
}

#[test]
fn two_bobs_added_as_new_are_distinct() {
    let mut dir = ContactDirectory::new();
    let first = add(&mut dir, "Bob", "home", "1");
    let second = add(&mut dir, "Bob", "home", "2");

    assert_eq!(dir.len(), 2);
    assert_ne!(first, second);
    let first_key = dir.key_of(first).unwrap().to_string();
    let second_key = dir.key_of(second).unwrap().to_string();
    assert_ne!(first_key, second_key);
    assert_eq!(dir.find_by_id(first).unwrap().name, dir.find_by_id(second).unwrap().name);
}

#[test]
fn merge_adds_only_new_phone_types() {
    let mut dir = setup();
    let bob_id = dir.contacts_named("Bob")[0].id;

    let mut incoming = dir.create_contact("Bob");
    incoming.add_phone_number("home", "555-9999");
    incoming.add_phone_number("work", "555-3333");

    let outcome = add_contact(&mut dir, incoming, Some(Resolution::Merge(bob_id))).unwrap();
    assert!(matches!(outcome, AddOutcome::Merged { into } if into == bob_id));

    let bob = dir.find_by_id(bob_id).unwrap();
    assert_eq!(bob.phone_numbers.get("home").unwrap(), ["555-2222"]);
    assert_eq!(bob.phone_numbers.get("work").unwrap(), ["555-3333"]);
    assert_eq!(dir.len(), 2);
}

#[test]
fn merge_into_non_candidate_is_rejected() {
    let mut dir = setup();
    let alice_id = dir.contacts_named("Alice")[0].id;
    let incoming = dir.create_contact("Bob");

    let result = add_contact(&mut dir, incoming, Some(Resolution::Merge(alice_id)));
    assert!(matches!(result, Err(ContactError::InvalidSelection { .. })));
    assert_eq!(dir.len(), 2);
    assert_eq!(dir.find_by_id(alice_id).unwrap().phone_numbers.len(), 1);
}

// ==========================================================================
// DELETE CONTACT TESTS
// ==========================================================================

#[test]
fn delete_only_match_removes_it() {
    let mut dir = setup();
    let before = dir.len();
    match delete_contact(&mut dir, "Alice", None).unwrap() {
        DeleteOutcome::Deleted(c) => assert_eq!(c.name, "Alice"),
        other => panic!("expected Deleted, got {:?}", other),
    }
    assert_eq!(dir.len(), before - 1);
    assert!(dir.contacts_named("Alice").is_empty());
    assert!(dir.contacts().all(|c| c.phone_numbers.get("mobile").is_none()));
}

#[test]
fn delete_unknown_name_is_not_found() {
    let mut dir = setup();
    assert!(matches!(
        delete_contact(&mut dir, "Zed", None),
        Err(ContactError::NotFound { .. })
    ));
    assert_eq!(dir.len(), 2);
}

#[test]
fn delete_with_duplicates_asks_then_removes_one() {
    let mut dir = setup();
    let second = add(&mut dir, "Bob", "work", "555-4444");

    let candidates = match delete_contact(&mut dir, "Bob", None).unwrap() {
        DeleteOutcome::Ambiguous(c) => c,
        other => panic!("expected Ambiguous, got {:?}", other),
    };
    assert_eq!(candidates.len(), 2);
    assert_eq!(dir.len(), 3);

    delete_contact(&mut dir, "Bob", Some(second)).unwrap();
    assert_eq!(dir.len(), 2);
    assert_eq!(dir.contacts_named("Bob").len(), 1);
    assert!(dir.find_by_id(second).is_none());
}

#[test]
fn delete_with_invalid_id_changes_nothing() {
    let mut dir = setup();
    add(&mut dir, "Bob", "work", "555-4444");
    let alice = dir.contacts_named("Alice")[0].id;

    let result = delete_contact(&mut dir, "Bob", Some(alice));
    assert!(matches!(result, Err(ContactError::InvalidSelection { .. })));
    assert_eq!(dir.len(), 3);
}

// ==========================================================================
// RENAME CONTACT TESTS
// ==========================================================================

#[test]
fn rename_single_contact_rekeys_it() {
    let mut dir = setup();
    let alice = dir.contacts_named("Alice")[0].id;
    match rename_contact(&mut dir, "Alice", "Alicia", None).unwrap() {
        RenameOutcome::Renamed { id, key } => {
            assert_eq!(id, alice);
            assert_eq!(key, "alicia");
        }
        other => panic!("expected Renamed, got {:?}", other),
    }
    assert!(!dir.contains_key("alice"));
    assert_eq!(dir.get("alicia").unwrap().phone_numbers.len(), 1);
    assert_eq!(dir.len(), 2);
}

#[test]
fn rename_chosen_duplicate_leaves_the_other_alone() {
    let mut dir = setup();
    let first = dir.contacts_named("Bob")[0].id;
    let second = add(&mut dir, "Bob", "work", "555-4444");

    assert!(matches!(
        rename_contact(&mut dir, "Bob", "Robert", None).unwrap(),
        RenameOutcome::Ambiguous(_)
    ));
    rename_contact(&mut dir, "Bob", "Robert", Some(second)).unwrap();

    assert_eq!(dir.find_by_id(first).unwrap().name, "Bob");
    assert_eq!(dir.key_of(first), Some("bob"));
    assert_eq!(dir.find_by_id(second).unwrap().name, "Robert");
    assert_eq!(dir.key_of(second), Some("robert"));
    assert_eq!(dir.len(), 3);
}

#[test]
fn rename_to_blank_is_rejected() {
    let mut dir = setup();
    assert!(rename_contact(&mut dir, "Alice", "  ", None).is_err());
    assert_eq!(dir.contacts_named("Alice").len(), 1);
}

#[test]
fn rename_unknown_is_not_found() {
    let mut dir = setup();
    assert!(matches!(
        rename_contact(&mut dir, "Zed", "Zack", None),
        Err(ContactError::NotFound { .. })
    ));
}

// ==========================================================================
// PHONE NUMBER TESTS
// ==========================================================================

#[test]
fn add_phone_number_reports_duplicates() {
    let mut dir = setup();
    let alice = dir.contacts_named("Alice")[0].id;
    assert!(add_phone_number(&mut dir, alice, "home", "555-0000").unwrap());
    assert!(!add_phone_number(&mut dir, alice, "home", "555-0000").unwrap());
    assert_eq!(dir.find_by_id(alice).unwrap().phone_numbers.len(), 2);
}

#[test]
fn delete_phone_number_removes_first_match() {
    let mut dir = setup();
    let alice = dir.contacts_named("Alice")[0].id;
    add_phone_number(&mut dir, alice, "work", "555-1111").unwrap();

    let label = delete_phone_number(&mut dir, alice, "555-1111").unwrap();
    assert_eq!(label, "mobile");
    let contact = dir.find_by_id(alice).unwrap();
    assert!(contact.phone_numbers.get("mobile").is_none());
    assert_eq!(contact.phone_numbers.get("work").unwrap(), ["555-1111"]);
}

#[test]
fn delete_phone_number_not_found_cases() {
    let mut dir = setup();
    let alice = dir.contacts_named("Alice")[0].id;
    assert!(matches!(
        delete_phone_number(&mut dir, alice, "000"),
        Err(ContactError::NotFound { ref entity_type, .. }) if entity_type == "Phone number"
    ));
    assert!(matches!(
        delete_phone_number(&mut dir, Id::new(999), "555-1111"),
        Err(ContactError::NotFound { ref entity_type, .. }) if entity_type == "Contact"
    ));
}

// ==========================================================================
// LOAD TESTS
// ==========================================================================

#[test]
fn load_routes_clashes_through_resolver() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.txt");
    fs::write(&path, "Bob\nhome,555-2222\n\nBob\nwork,555-3333\n\nAmy\n\n").unwrap();

    let mut dir = ContactDirectory::new();
    let mut asked = Vec::new();
    let summary = load_contacts(&mut dir, &path, |contact, candidates| {
        asked.push(contact.name.clone());
        Some(Resolution::Merge(candidates[0].id))
    })
    .unwrap();

    assert_eq!(asked, vec!["Bob"]);
    assert_eq!(summary, LoadSummary { added: 2, merged: 1, skipped: 0 });
    let bob = dir.contacts_named("Bob")[0];
    assert_eq!(bob.phone_numbers.len(), 2);
}

#[test]
fn load_skips_when_resolver_declines() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.txt");
    fs::write(&path, "Bob\n\nBob\n\n").unwrap();

    let mut dir = ContactDirectory::new();
    let summary = load_contacts(&mut dir, &path, |_, _| None).unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(dir.len(), 1);
}

#[test]
fn load_skips_invalid_merge_target() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.txt");
    fs::write(&path, "Bob\n\nBob\n\n").unwrap();

    let mut dir = ContactDirectory::new();
    let summary = load_contacts(&mut dir, &path, |_, _| Some(Resolution::Merge(Id::new(999)))).unwrap();
    assert_eq!(summary, LoadSummary { added: 1, merged: 0, skipped: 1 });
}

#[test]
fn load_missing_file_leaves_directory_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let mut dir = setup();
    let result = load_contacts(&mut dir, &tmp.path().join("missing.txt"), |_, _| None);
    assert!(result.is_err());
    assert_eq!(dir.len(), 2);
}

#[test]
fn loaded_contacts_get_fresh_ids() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.txt");
    fs::write(&path, "Carol\n\n").unwrap();

    let mut dir = setup();
    let highest = dir.contacts().map(|c| c.id).max().unwrap();
    load_contacts(&mut dir, &path, |_, _| None).unwrap();
    let carol = dir.contacts_named("Carol")[0];
    assert!(carol.id > highest);
}

// ==========================================================================
// FILE-SAFE INPUT TESTS
// ==========================================================================

#[test]
fn new_contact_rejects_comma_in_type() {
    let mut dir = ContactDirectory::new();
    assert!(matches!(
        new_contact(&mut dir, "Alice", "work,cell", "555-1111"),
        Err(ContactError::ForbiddenCharacter { found: ',', .. })
    ));
}

#[test]
fn new_contact_rejects_line_breaks() {
    let mut dir = ContactDirectory::new();
    assert!(new_contact(&mut dir, "Ann\nSmith", "mobile", "1").is_err());
    assert!(new_contact(&mut dir, "Ann", "mob\nile", "1").is_err());
    assert!(new_contact(&mut dir, "Ann", "mobile", "555\r1111").is_err());
}

#[test]
fn number_with_comma_survives_save_and_load() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("contacts.txt");

    let mut dir = ContactDirectory::new();
    let contact = new_contact(&mut dir, "Alice", "work", "555-1111,ext 2").unwrap();
    add_contact(&mut dir, contact, None).unwrap();
    file_store::save_to_file(&dir, &path).unwrap();

    let mut loaded = ContactDirectory::new();
    load_contacts(&mut loaded, &path, |_, _| None).unwrap();
    let pairs: Vec<_> = loaded.contacts().next().unwrap().phone_numbers.pairs().collect();
    assert_eq!(pairs, vec![("work", "555-1111,ext 2")]);
}

#[test]
fn add_phone_number_rejects_unstorable_input() {
    let mut dir = setup();
    let alice = dir.contacts_named("Alice")[0].id;
    assert!(matches!(
        add_phone_number(&mut dir, alice, "work,cell", "555-0000"),
        Err(ContactError::ForbiddenCharacter { .. })
    ));
    assert!(add_phone_number(&mut dir, alice, "work", "555\n0000").is_err());
    assert_eq!(dir.find_by_id(alice).unwrap().phone_numbers.len(), 1);
}

#[test]
fn rename_rejects_line_break() {
    let mut dir = setup();
    assert!(rename_contact(&mut dir, "Alice", "Ali\nce", None).is_err());
    assert_eq!(dir.contacts_named("Alice").len(), 1);
}
