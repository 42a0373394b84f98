//! The JSON store driven through the executor, as the CLI does it.

use chrono::NaiveDate;
use regdesk::app::{AppState, Event, LoadState, ViewMode};
use regdesk::runtime::Executor;
use regdesk::storage::{JsonStore, RegistrationSource, SessionContext};
use regdesk::ui::render;
use regdesk::{Field, Theme};
use std::path::PathBuf;
use tempfile::TempDir;

const STORE: &str = r#"[
  {"id":"r1","childName":"נועה","school":"אלון","class":"ג2","parentPhone":"0501111111","cycleId":"c1","needsPickup":true},
  {"id":"r2","childName":"Dana","school":"Ort","class":"ד1","parentPhone":"0502222222","cycleId":"c1"},
  {"id":"r3","childName":"Ido","school":"Ort","class":"ד1","parentPhone":"0502222222","cycleId":"c2"}
]"#;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
}

fn write_store(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("registrations.json");
    std::fs::write(&path, STORE).unwrap();
    path
}

fn open(path: PathBuf) -> (Executor<JsonStore>, AppState) {
    let store = JsonStore::new(path).unwrap();
    let mut executor = Executor::new(store, SessionContext::new("office"));
    let mut state = AppState::new(Theme::monochrome());
    executor.dispatch(&mut state, Event::Refresh).unwrap();
    (executor, state)
}

fn enter_arrivals(executor: &mut Executor<JsonStore>, state: &mut AppState) {
    for event in [
        Event::SelectCohort(Some("c1".into())),
        Event::SelectDate(Some(day())),
        Event::SetViewMode(ViewMode::Arrivals),
    ] {
        executor.dispatch(state, event).unwrap();
    }
}

#[test]
fn refresh_loads_bare_upstream_array() {
    let dir = TempDir::new().unwrap();
    let (_, state) = open(write_store(&dir));

    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.output().total_records, 3);
    assert_eq!(state.catalog().values(Field::School), ["Ort", "אלון"]);
}

#[test]
fn blank_user_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(write_store(&dir)).unwrap();
    let mut executor = Executor::new(store, SessionContext::new("  "));
    let mut state = AppState::new(Theme::monochrome());

    executor.dispatch(&mut state, Event::Refresh).unwrap();
    assert!(matches!(state.load, LoadState::Failed(_)));
}

#[test]
fn arrival_marks_persist_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = write_store(&dir);

    {
        let (mut executor, mut state) = open(path.clone());
        enter_arrivals(&mut executor, &mut state);
        assert_eq!(state.output().total_records, 2);

        executor
            .dispatch(&mut state, Event::ToggleArrival { record_id: "r2".into() })
            .unwrap();
        assert!(executor.failures().is_empty());
        assert_eq!(executor.location(), Some("cycle=c1&date=2025-01-05&view=arrivals"));
    }

    let (mut executor, mut state) = open(path);
    enter_arrivals(&mut executor, &mut state);
    assert!(state.is_present("r2"));
    assert!(!state.is_present("r1"));

    let sheet = executor
        .source()
        .fetch_attendance(&SessionContext::new("office"), "c1", day())
        .unwrap();
    assert_eq!(sheet.present.len(), 1);
}

#[test]
fn arrivals_page_renders_marks() {
    let dir = TempDir::new().unwrap();
    let (mut executor, mut state) = open(write_store(&dir));
    enter_arrivals(&mut executor, &mut state);
    executor
        .dispatch(&mut state, Event::ToggleArrival { record_id: "r1".into() })
        .unwrap();

    let screen = render(&state, 100);
    assert!(screen.contains("Arrivals · c1 · 2025-01-05"));
    assert!(screen.contains("✓ נועה"));
    assert!(screen.contains("· Dana"));
    assert!(!screen.contains("Ido"));
}

#[test]
fn bulk_message_goes_to_outbox() {
    let dir = TempDir::new().unwrap();
    let (mut executor, mut state) = open(write_store(&dir));
    executor.dispatch(&mut state, Event::SetSearch("ort".into())).unwrap();

    executor
        .dispatch(
            &mut state,
            Event::ComposeBulkMessage {
                text: "Class starts at 16:00".into(),
            },
        )
        .unwrap();

    let sent = executor.outbox();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipients, ["0502222222"]);
}
