use super::*;
use crate::kernel::clock::{ManualClock, Timestamp};
use crate::kernel::editor::{EditorStatePatch, SerializedState};
use crate::kernel::state::SessionState;
use crate::kernel::tabs::{TabDescriptor, TabKind};
use std::cell::RefCell;
use std::rc::Rc;

fn new_store(capacity: usize) -> (Store, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(0));
    let store = Store::with_parts(
        SessionConfig::with_capacity(capacity),
        Box::new(Rc::clone(&clock)),
        Box::new(NullPersistenceAdapter),
    );
    (store, clock)
}

fn open(store: &mut Store, clock: &ManualClock, workspace: &str, node: &str) -> DispatchResult {
    clock.advance(1);
    store.dispatch(Action::OpenTab(TabDescriptor::new(
        workspace,
        node,
        node,
        TabKind::File,
    )))
}

fn update(store: &mut Store, clock: &ManualClock, node: &str, patch: EditorStatePatch) {
    clock.advance(1);
    store.dispatch(Action::UpdateEditorState {
        tab_id: id(node),
        patch,
    });
}

fn id(raw: &str) -> TabId {
    TabId::new(raw)
}

fn tab_ids(store: &Store) -> Vec<&str> {
    store.tabs().iter().map(|t| t.id.as_str()).collect()
}

fn cached_ids(store: &Store) -> Vec<String> {
    let mut ids: Vec<String> = store
        .state()
        .editor_states()
        .iter()
        .map(|(id, _)| id.as_str().to_string())
        .collect();
    ids.sort();
    ids
}

#[test]
fn new_store_starts_empty() {
    let (store, _clock) = new_store(10);
    assert!(store.tabs().is_empty());
    assert!(store.active_tab().is_none());
    assert!(store.state().editor_states().is_empty());
    assert_eq!(store.state().capacity(), 10);
}

#[test]
fn open_tab_creates_state_and_activates() {
    let (mut store, clock) = new_store(10);
    let result = open(&mut store, &clock, "w1", "a");
    assert!(result.state_changed);
    assert_eq!(
        result.events,
        vec![
            SessionEvent::TabOpened { tab_id: id("a") },
            SessionEvent::ActiveTabChanged {
                previous: None,
                current: Some(id("a")),
            },
        ]
    );
    assert_eq!(store.active_tab().unwrap().id, id("a"));
    assert_eq!(
        store.editor_state(&id("a")).unwrap().last_modified,
        Timestamp::from_millis(1)
    );
}

#[test]
fn open_tab_twice_focuses_and_bumps_recency() {
    let (mut store, clock) = new_store(10);
    open(&mut store, &clock, "w1", "a");
    open(&mut store, &clock, "w1", "b");

    let result = open(&mut store, &clock, "w1", "a");
    assert!(result.state_changed);
    assert_eq!(tab_ids(&store), vec!["a", "b"]);
    assert_eq!(store.state().active_tab_id(), Some(&id("a")));
    assert_eq!(
        store.editor_state(&id("a")).unwrap().last_modified,
        Timestamp::from_millis(3)
    );
    assert_eq!(result.events[0], SessionEvent::TabFocused { tab_id: id("a") });
}

#[test]
fn open_tab_reuses_prewarmed_state() {
    let (mut store, clock) = new_store(10);
    update(
        &mut store,
        &clock,
        "a",
        EditorStatePatch {
            serialized_state: Some(SerializedState::new("prefetched")),
            scroll_top: Some(300.0),
            ..EditorStatePatch::default()
        },
    );
    assert!(store.tabs().is_empty());

    open(&mut store, &clock, "w1", "a");
    let state = store.editor_state(&id("a")).unwrap();
    assert_eq!(state.serialized_state.as_ref().unwrap().as_str(), "prefetched");
    assert_eq!(state.scroll_top, 300.0);
}

#[test]
fn close_tab_releases_state_and_reassigns_active() {
    let (mut store, clock) = new_store(10);
    for node in ["a", "b", "c"] {
        open(&mut store, &clock, "w1", node);
    }
    store.dispatch(Action::SetActiveTab { tab_id: id("b") });
    update(&mut store, &clock, "b", EditorStatePatch::dirty(true));

    let result = store.dispatch(Action::CloseTab { tab_id: id("b") });
    assert!(result.state_changed);
    assert_eq!(tab_ids(&store), vec!["a", "c"]);
    assert_eq!(store.state().active_tab_id(), Some(&id("c")));
    assert!(store.editor_state(&id("b")).is_none());
    assert!(result.events.contains(&SessionEvent::EditorStatesReleased {
        tab_ids: vec![id("b")],
    }));

    store.dispatch(Action::CloseTab { tab_id: id("c") });
    assert_eq!(store.state().active_tab_id(), Some(&id("a")));
    store.dispatch(Action::CloseTab { tab_id: id("a") });
    assert_eq!(store.state().active_tab_id(), None);
}

#[test]
fn unknown_ids_are_noops() {
    let (mut store, clock) = new_store(10);
    open(&mut store, &clock, "w1", "a");
    let before = store.snapshot();

    for action in [
        Action::CloseTab { tab_id: id("x") },
        Action::CloseOtherTabs { tab_id: id("x") },
        Action::SetActiveTab { tab_id: id("x") },
        Action::UpdateTabTitle {
            tab_id: id("x"),
            title: "t".to_string(),
        },
        Action::SetTabDirty {
            tab_id: id("x"),
            is_dirty: true,
        },
        Action::CloseTabsByWorkspace {
            workspace_id: WorkspaceId::new("nope"),
        },
    ] {
        let result = store.dispatch(action);
        assert!(!result.state_changed);
        assert!(result.events.is_empty());
    }
    assert_eq!(store.snapshot(), before);
}

#[test]
fn close_other_tabs_keeps_one_tab_and_its_state() {
    let (mut store, clock) = new_store(10);
    for node in ["a", "b", "c"] {
        open(&mut store, &clock, "w1", node);
    }
    update(&mut store, &clock, "prewarmed", EditorStatePatch::default());

    store.dispatch(Action::CloseOtherTabs { tab_id: id("a") });
    assert_eq!(tab_ids(&store), vec!["a"]);
    assert_eq!(store.state().active_tab_id(), Some(&id("a")));
    assert_eq!(cached_ids(&store), vec!["a"]);
}

#[test]
fn close_all_tabs_clears_everything() {
    let (mut store, clock) = new_store(10);
    open(&mut store, &clock, "w1", "a");
    open(&mut store, &clock, "w2", "b");
    update(&mut store, &clock, "prewarmed", EditorStatePatch::default());

    let result = store.dispatch(Action::CloseAllTabs);
    assert!(result.state_changed);
    assert!(store.tabs().is_empty());
    assert!(store.active_tab().is_none());
    assert!(store.state().editor_states().is_empty());

    assert!(!store.dispatch(Action::CloseAllTabs).state_changed);
}

#[test]
fn set_active_tab_bumps_recency_but_get_does_not() {
    let (mut store, clock) = new_store(10);
    open(&mut store, &clock, "w1", "a");
    open(&mut store, &clock, "w1", "b");

    let before = store.editor_state(&id("a")).unwrap().last_modified;
    clock.advance(10);
    let _ = store.editor_state(&id("a"));
    assert_eq!(store.editor_state(&id("a")).unwrap().last_modified, before);

    store.dispatch(Action::SetActiveTab { tab_id: id("a") });
    assert_eq!(
        store.editor_state(&id("a")).unwrap().last_modified,
        Timestamp::from_millis(12)
    );
}

#[test]
fn title_and_dirty_updates_emit_events() {
    let (mut store, clock) = new_store(10);
    open(&mut store, &clock, "w1", "a");

    let result = store.dispatch(Action::UpdateTabTitle {
        tab_id: id("a"),
        title: "Prologue".to_string(),
    });
    assert_eq!(
        result.events,
        vec![SessionEvent::TabTitleChanged {
            tab_id: id("a"),
            title: "Prologue".to_string(),
        }]
    );

    store.dispatch(Action::SetTabDirty {
        tab_id: id("a"),
        is_dirty: true,
    });
    assert!(store.state().is_tab_dirty(&id("a")));
    assert_eq!(store.active_tab().unwrap().title, "Prologue");
}

#[test]
fn reorder_out_of_range_is_rejected_without_change() {
    let (mut store, clock) = new_store(10);
    for node in ["a", "b", "c"] {
        open(&mut store, &clock, "w1", node);
    }

    let result = store.dispatch(Action::ReorderTabs { from: 5, to: 0 });
    assert!(!result.state_changed);
    assert_eq!(tab_ids(&store), vec!["a", "b", "c"]);

    let result = store.dispatch(Action::ReorderTabs { from: 0, to: 2 });
    assert!(result.state_changed);
    assert_eq!(result.events, vec![SessionEvent::TabsReordered { from: 0, to: 2 }]);
    assert_eq!(tab_ids(&store), vec!["b", "c", "a"]);
}

#[test]
fn close_tabs_by_workspace_isolates_other_workspaces() {
    let (mut store, clock) = new_store(10);
    open(&mut store, &clock, "w1", "a");
    open(&mut store, &clock, "w2", "x");
    open(&mut store, &clock, "w1", "b");
    update(&mut store, &clock, "x", EditorStatePatch::scroll(42.0, 0.0));

    store.dispatch(Action::SetActiveTab { tab_id: id("b") });
    store.dispatch(Action::CloseTabsByWorkspace {
        workspace_id: WorkspaceId::new("w1"),
    });

    assert_eq!(tab_ids(&store), vec!["x"]);
    assert_eq!(store.state().active_tab_id(), Some(&id("x")));
    assert_eq!(cached_ids(&store), vec!["x"]);
    assert_eq!(store.editor_state(&id("x")).unwrap().scroll_top, 42.0);
    assert!(store.tabs_by_workspace(&WorkspaceId::new("w1")).is_empty());
    assert_eq!(store.tabs_by_workspace(&WorkspaceId::new("w2")).len(), 1);
}

#[test]
fn open_tabs_overflow_capacity_softly() {
    let (mut store, clock) = new_store(3);
    for node in ["a", "b", "c"] {
        open(&mut store, &clock, "w1", node);
    }
    store.dispatch(Action::SetActiveTab { tab_id: id("b") });
    store.dispatch(Action::SetActiveTab { tab_id: id("a") });

    let result = open(&mut store, &clock, "w1", "d");
    assert_eq!(store.state().active_tab_id(), Some(&id("d")));
    assert_eq!(cached_ids(&store), vec!["a", "b", "c", "d"]);
    assert!(!result
        .events
        .iter()
        .any(|e| matches!(e, SessionEvent::EditorStatesEvicted { .. })));
}

#[test]
fn prewarmed_states_are_evicted_oldest_first() {
    let (mut store, clock) = new_store(3);
    open(&mut store, &clock, "w1", "a");
    update(&mut store, &clock, "p1", EditorStatePatch::default());
    update(&mut store, &clock, "p2", EditorStatePatch::default());
    update(&mut store, &clock, "p3", EditorStatePatch::default());

    assert_eq!(cached_ids(&store), vec!["a", "p2", "p3"]);

    update(&mut store, &clock, "p2", EditorStatePatch::scroll(1.0, 0.0));
    clock.advance(1);
    let result = store.dispatch(Action::UpdateEditorState {
        tab_id: id("p4"),
        patch: EditorStatePatch::default(),
    });
    assert!(result.events.contains(&SessionEvent::EditorStatesEvicted {
        tab_ids: vec![id("p3")],
    }));
    assert_eq!(cached_ids(&store), vec!["a", "p2", "p4"]);
}

#[test]
fn dirty_prewarmed_states_survive_eviction() {
    let (mut store, clock) = new_store(1);
    update(&mut store, &clock, "draft", EditorStatePatch::dirty(true));
    update(&mut store, &clock, "clean", EditorStatePatch::default());
    assert_eq!(cached_ids(&store), vec!["draft"]);

    // Even the entry just written goes when it is the only candidate.
    update(&mut store, &clock, "newer", EditorStatePatch::default());
    assert_eq!(cached_ids(&store), vec!["draft"]);
    assert!(store.editor_state(&id("draft")).unwrap().is_dirty);
}

#[test]
fn subscribers_receive_events_in_order() {
    let (mut store, clock) = new_store(10);
    let mut rx = store.subscribe();

    open(&mut store, &clock, "w1", "a");
    store.dispatch(Action::CloseTab { tab_id: id("a") });

    assert_eq!(
        rx.drain(),
        vec![
            SessionEvent::TabOpened { tab_id: id("a") },
            SessionEvent::ActiveTabChanged {
                previous: None,
                current: Some(id("a")),
            },
            SessionEvent::TabsClosed {
                tab_ids: vec![id("a")],
            },
            SessionEvent::EditorStatesReleased {
                tab_ids: vec![id("a")],
            },
            SessionEvent::ActiveTabChanged {
                previous: Some(id("a")),
                current: None,
            },
        ]
    );
}

#[test]
fn dropped_subscribers_are_pruned() {
    let (mut store, clock) = new_store(10);
    let rx = store.subscribe();
    drop(rx);
    let mut live = store.subscribe();

    open(&mut store, &clock, "w1", "a");
    assert_eq!(store.subscribers.len(), 1);
    assert_eq!(live.drain().len(), 2);
}

struct RecordingPersistence {
    persisted: Rc<RefCell<usize>>,
}

impl SessionPersistence for RecordingPersistence {
    fn restore(&self) -> Option<SessionState> {
        None
    }

    fn persist(&mut self, _state: &SessionState) {
        *self.persisted.borrow_mut() += 1;
    }
}

#[test]
fn persistence_is_called_only_on_change() {
    let persisted = Rc::new(RefCell::new(0));
    let clock = Rc::new(ManualClock::new(0));
    let mut store = Store::with_parts(
        SessionConfig::default(),
        Box::new(Rc::clone(&clock)),
        Box::new(RecordingPersistence {
            persisted: Rc::clone(&persisted),
        }),
    );

    open(&mut store, &clock, "w1", "a");
    store.dispatch(Action::CloseTab { tab_id: id("missing") });
    assert_eq!(*persisted.borrow(), 1);
}

#[test]
fn null_persistence_always_starts_empty() {
    let (mut store, clock) = new_store(10);
    open(&mut store, &clock, "w1", "a");
    drop(store);

    let (store, _clock) = new_store(10);
    assert!(store.tabs().is_empty());
    assert!(store.state().editor_states().is_empty());
    assert!(NullPersistenceAdapter.restore().is_none());
}
