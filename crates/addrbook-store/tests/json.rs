use addrbook_core::domain::{Birthday, ContactRecord, Name};
use addrbook_core::AddressBook;
use addrbook_store::error::StoreErrorKind;
use addrbook_store::{BookStore, JsonStore};
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;

fn sample_book() -> AddressBook {
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    let mut ada = ContactRecord::new(Name::new("Ada").unwrap());
    ada.add_phone("0501234567").unwrap();
    ada.add_phone("0670000000").unwrap();
    ada.set_birthday(Birthday::parse_on("29.02.2000", today).unwrap());

    let grace = ContactRecord::new(Name::new("Grace").unwrap());
    [ada, grace].into_iter().collect()
}

#[test]
fn json_missing_file_loads_empty() {
    let temp = TempDir::new().expect("temp dir");
    let store = JsonStore::new(temp.path().join("addressbook.json"));
    assert!(store.load().expect("load").is_empty());
}

#[test]
fn json_roundtrip() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("nested").join("addressbook.json");
    let store = JsonStore::new(&path);

    let book = sample_book();
    store.save(&book).expect("save");
    assert!(path.exists());

    let loaded = store.load().expect("load");
    assert_eq!(loaded, book);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(raw["version"], 1);
    assert_eq!(raw["contacts"][0]["name"], "Ada");
    assert_eq!(raw["contacts"][0]["phones"][1], "0670000000");
    assert_eq!(raw["contacts"][0]["birthday"], "29.02.2000");
    assert!(raw["contacts"][1]["birthday"].is_null());
}

#[test]
fn json_rejects_unknown_version() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("addressbook.json");
    fs::write(&path, r#"{"version": 7, "contacts": []}"#).expect("write");

    let err = JsonStore::new(&path).load().unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::UnsupportedVersion);
}

#[test]
fn json_rejects_invalid_phone() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("addressbook.json");
    fs::write(
        &path,
        r#"{"version": 1, "contacts": [{"name": "Ada", "phones": ["12"], "birthday": null}]}"#,
    )
    .expect("write");

    let err = JsonStore::new(&path).load().unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Json);
}
