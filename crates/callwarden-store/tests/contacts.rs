use callwarden_core::platform::ContactDirectory;
use callwarden_store::error::{StoreError, StoreErrorKind};
use callwarden_store::repo::ContactNew;
use callwarden_store::Store;

#[test]
fn contact_add_list_remove_roundtrip() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let contact = store
        .contacts()
        .add(
            now,
            ContactNew {
                name: Some("Ada".to_string()),
                number: "+55 (11) 91234-5678".to_string(),
            },
        )
        .expect("add contact");
    assert_eq!(contact.number, "+55 (11) 91234-5678");

    let listed = store.contacts().list().expect("list contacts");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name.as_deref(), Some("Ada"));
    assert_eq!(store.contacts().count().expect("count"), 1);

    store
        .contacts()
        .remove("+55 (11) 91234-5678")
        .expect("remove contact");
    assert_eq!(store.contacts().count().expect("count"), 0);
}

#[test]
fn duplicate_numbers_are_rejected() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let input = ContactNew {
        name: None,
        number: "11912345678".to_string(),
    };
    store.contacts().add(now, input.clone()).expect("add contact");
    let err = store.contacts().add(now, input).expect_err("duplicate");
    assert_eq!(err.kind(), StoreErrorKind::DuplicateNumber);
}

#[test]
fn numbers_without_digits_are_rejected() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let err = store
        .contacts()
        .add(
            1_700_000_000,
            ContactNew {
                name: None,
                number: "   ".to_string(),
            },
        )
        .expect_err("blank number");
    assert!(matches!(err, StoreError::InvalidNumber(_)));
}

#[test]
fn removing_unknown_number_is_not_found() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let err = store.contacts().remove("11912345678").expect_err("missing");
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn repo_serves_the_contact_directory_port() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    store
        .contacts()
        .add(
            1_700_000_000,
            ContactNew {
                name: None,
                number: "11912345678".to_string(),
            },
        )
        .expect("add contact");

    let repo = store.contacts();
    let directory: &dyn ContactDirectory = &repo;
    let numbers = directory.contact_numbers().expect("numbers");
    assert_eq!(numbers, vec!["11912345678".to_string()]);
}
