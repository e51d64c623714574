use carlead_core::rules::{ContactInput, InteractionEntry};
use carlead_core::{InteractionKind, Status};
use carlead_store::{ImportOutcome, RecordStore, SqliteSlot};
use chrono::{Duration, TimeZone, Utc};

fn seeded_store(slot: &SqliteSlot) -> RecordStore<&SqliteSlot> {
    let mut store = RecordStore::load(slot, "ac_contacts");
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    let eva = store.create(
        now,
        ContactInput {
            name: Some("Eva Lind".to_string()),
            phone: Some("070-111 22 33".to_string()),
            car_brand: Some("BMW".to_string()),
            car_model: Some("3-serie".to_string()),
            car_trim: Some("M Sport".to_string()),
            source: Some("walk-in".to_string()),
            next_date: Some(now + Duration::days(1)),
            notes: Some("Trade-in: 2016 Golf".to_string()),
            ..Default::default()
        },
    );
    store.log_interaction(
        now + Duration::minutes(30),
        &eva.id,
        InteractionEntry {
            kind: Some(InteractionKind::Email),
            note: Some("Sent offer".to_string()),
            outcome: Some("offer".to_string()),
            status: Some(Status::Waiting),
            ..Default::default()
        },
    );
    store.create(
        now,
        ContactInput {
            name: Some("Nils".to_string()),
            car: Some("Something electric under 400k".to_string()),
            ..Default::default()
        },
    );
    store
}

#[test]
fn export_then_import_round_trips() {
    let slot = SqliteSlot::open_in_memory().expect("open");
    slot.migrate().expect("migrate");
    let store = seeded_store(&slot);
    let exported = store.export_json().expect("export");

    let other = SqliteSlot::open_in_memory().expect("open");
    other.migrate().expect("migrate");
    let mut fresh = RecordStore::load(&other, "ac_contacts");
    assert_eq!(fresh.import_json(&exported), ImportOutcome::Replaced(2));
    assert_eq!(fresh.contacts(), store.contacts());

    let reloaded = RecordStore::load(&other, "ac_contacts");
    assert_eq!(reloaded.contacts(), store.contacts());
}

#[test]
fn export_uses_stored_field_names() {
    let slot = SqliteSlot::open_in_memory().expect("open");
    slot.migrate().expect("migrate");
    let store = seeded_store(&slot);
    let value: serde_json::Value =
        serde_json::from_str(&store.export_json().expect("export")).expect("json");

    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 2);
    let eva = &items[1];
    assert_eq!(eva["carBrand"], "BMW");
    assert_eq!(eva["car"], "BMW 3-serie M Sport");
    assert_eq!(eva["brands"][0], "BMW");
    assert_eq!(eva["status"], "waiting");
    assert!(eva["nextDate"].is_string());
    assert!(eva["createdAt"].is_i64());
    assert_eq!(eva["interactions"][0]["type"], "email");
    assert_eq!(eva["interactions"][0]["outcome"], "offer");
}

#[test]
fn import_ignores_non_arrays() {
    let slot = SqliteSlot::open_in_memory().expect("open");
    slot.migrate().expect("migrate");
    let mut store = seeded_store(&slot);
    let before = store.contacts().to_vec();

    assert_eq!(store.import_json(r#"{"not":"array"}"#), ImportOutcome::Ignored);
    assert_eq!(store.import_json("not json at all"), ImportOutcome::Ignored);
    assert_eq!(store.contacts(), before.as_slice());
}

#[test]
fn import_accepts_legacy_records() {
    let slot = SqliteSlot::open_in_memory().expect("open");
    slot.migrate().expect("migrate");
    let mut store = seeded_store(&slot);

    let legacy = r#"[
        {"id": "lq2x9a1b", "name": "Eva", "brands": ["Volvo"], "car": "XC60 or V60",
         "status": "hot", "nextDate": "2024-02-01T09:00:00.000Z", "notes": "",
         "interactions": [], "createdAt": 1706000000000, "updatedAt": 1706000000000},
        {"name": "No id"}
    ]"#;
    assert_eq!(store.import_json(legacy), ImportOutcome::Replaced(2));
    let contacts = store.contacts();
    assert_eq!(contacts[0].id.as_str(), "lq2x9a1b");
    assert_eq!(contacts[0].status, Status::Hot);
    assert_eq!(contacts[0].vehicle_label().as_deref(), Some("Volvo"));
    assert!(contacts[0].next_date.is_some());
    assert_eq!(contacts[1].status, Status::ToCall);
    assert!(!contacts[1].id.as_str().is_empty());

    assert_eq!(store.import_json("[]"), ImportOutcome::Replaced(0));
    assert!(store.contacts().is_empty());
}

#[test]
fn import_skips_entries_that_are_not_contacts() {
    let slot = SqliteSlot::open_in_memory().expect("open");
    slot.migrate().expect("migrate");
    let mut store = seeded_store(&slot);

    let mixed = r#"[{"id": "x", "name": "Kept"}, null, 7, "text"]"#;
    assert_eq!(store.import_json(mixed), ImportOutcome::Replaced(1));
    assert_eq!(store.contacts().len(), 1);
    assert_eq!(store.contacts()[0].id.as_str(), "x");
}

#[test]
fn import_keeps_valid_history_next_to_junk() {
    let slot = SqliteSlot::open_in_memory().expect("open");
    slot.migrate().expect("migrate");
    let mut store = RecordStore::load(&slot, "ac_contacts");

    let raw = r#"[{
        "id": "a",
        "name": "Eva",
        "brands": ["Volvo", 3],
        "interactions": [
            {"id": "i1", "note": "kept", "type": "call", "date": "2024-01-01T10:00:00Z"},
            5
        ]
    }]"#;
    assert_eq!(store.import_json(raw), ImportOutcome::Replaced(1));
    let eva = &store.contacts()[0];
    assert_eq!(eva.brands, vec!["Volvo"]);
    assert_eq!(eva.interactions.len(), 1);
    assert_eq!(eva.interactions[0].note, "kept");
    assert_eq!(eva.interactions[0].kind, InteractionKind::Call);

    let reloaded = RecordStore::load(&slot, "ac_contacts");
    assert_eq!(reloaded.contacts()[0].interactions.len(), 1);
    assert_eq!(reloaded.contacts()[0].brands, vec!["Volvo"]);
}
