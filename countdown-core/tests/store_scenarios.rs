use chrono::{DateTime, TimeZone, Utc};
use countdown_core::{
    ByteStore, Event, EventDraft, EventFormMode, EventStore, FileByteStore, MemoryByteStore,
    Rgba, StoreConfig, TextColor, DEFAULT_STORE_KEY,
};

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn titles(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.title.as_str()).collect()
}

#[test]
fn birthday_and_meeting_come_back_in_date_order() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = EventStore::new(FileByteStore::new(dir.path()), DEFAULT_STORE_KEY);
    store.add(Event::new("Birthday", at(2025, 12, 25), Rgba::RED.into(), None));
    store.add(Event::new("Meeting", at(2025, 6, 1), TextColor::Default, None));

    let mut reopened = EventStore::new(FileByteStore::new(dir.path()), DEFAULT_STORE_KEY);
    let events = reopened.load_all();

    assert_eq!(titles(events), vec!["Meeting", "Birthday"]);
    assert_eq!(events[0].text_color, TextColor::Default);
    assert_eq!(events[1].text_color, TextColor::Rgba(Rgba::RED));
}

#[test]
fn same_instant_keeps_insertion_order_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let day = at(2025, 3, 14);

    let mut store = EventStore::new(FileByteStore::new(dir.path()), DEFAULT_STORE_KEY);
    let a = Event::new("A", day, TextColor::Default, None);
    let b = Event::new("B", day, TextColor::Default, None);
    let (a_id, b_id) = (a.id(), b.id());
    store.add(a);
    store.add(b);

    let mut reopened = EventStore::new(FileByteStore::new(dir.path()), DEFAULT_STORE_KEY);
    let ids: Vec<_> = reopened.load_all().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![a_id, b_id]);
}

#[test]
fn delete_by_id_is_idempotent() {
    let mut store = EventStore::new(MemoryByteStore::new(), DEFAULT_STORE_KEY);
    let a = Event::new("A", at(2025, 1, 1), TextColor::Default, None);
    let a_id = a.id();
    store.add(a);
    store.add(Event::new("B", at(2025, 1, 2), TextColor::Default, None));

    assert_eq!(titles(store.delete_by_id(a_id)), vec!["B"]);
    assert_eq!(titles(store.delete_by_id(a_id)), vec!["B"]);
}

#[test]
fn corrupt_file_loads_as_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = FileByteStore::new(dir.path());
    bytes.set(DEFAULT_STORE_KEY, b"\x00\x01garbage").unwrap();

    let mut store = EventStore::new(bytes, DEFAULT_STORE_KEY);
    assert!(store.load_all().is_empty());

    store.add(Event::new("Fresh", at(2026, 1, 1), TextColor::Default, None));

    let mut reopened = EventStore::new(FileByteStore::new(dir.path()), DEFAULT_STORE_KEY);
    assert_eq!(titles(reopened.load_all()), vec!["Fresh"]);
}

#[test]
fn edit_form_roundtrip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        data_dir: dir.path().to_path_buf(),
        ..StoreConfig::default()
    };
    let mut store = config.open_store();

    let mut draft = EventDraft::for_mode(&EventFormMode::Add);
    draft.title = "Exam".into();
    draft.date = at(2025, 9, 1);
    draft.image_data = Some(vec![0x47, 0x49, 0x46]);
    let created = draft.build(&EventFormMode::Add).unwrap();
    let id = created.id();
    store.save(&EventFormMode::Add, created);

    let mode = EventFormMode::Edit(store.get(id).unwrap().clone());
    let mut draft = EventDraft::for_mode(&mode);
    draft.title = "Final exam".into();
    draft.text_color = Rgba::new(10, 20, 30, 40).into();
    let edited = draft.build(&mode).unwrap();
    store.save(&mode, edited);

    let mut reopened = config.open_store();
    let events = reopened.load_all();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id(), id);
    assert_eq!(events[0].title, "Final exam");
    assert_eq!(events[0].text_color, TextColor::Rgba(Rgba::new(10, 20, 30, 40)));
    assert_eq!(events[0].image_data, Some(vec![0x47, 0x49, 0x46]));
}
