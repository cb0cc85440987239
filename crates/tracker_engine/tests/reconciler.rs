use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use pretty_assertions::assert_eq;
use tracker_core::{
    Entity, OperationKind, OutcomeStatus, Patch, RecordId, ReconcileState,
};
use tracker_engine::{
    CollectionSink, MissingTarget, Options, ReconcileError, Reconciler, RemoteError,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tracker_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Item {
    id: RecordId,
    title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemDraft {
    title: String,
}

impl Entity for Item {
    type Draft = ItemDraft;

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: &ItemDraft) -> Self {
        Item {
            id,
            title: draft.title.clone(),
        }
    }
}

struct Retitle(&'static str);

impl Patch<Item> for Retitle {
    fn apply_to(&self, target: &mut Item) {
        target.title = self.0.to_string();
    }
}

#[derive(Default)]
struct RecordingSink {
    published: Arc<Mutex<Vec<ReconcileState<Item>>>>,
}

impl RecordingSink {
    fn take(&self) -> Vec<ReconcileState<Item>> {
        self.published.lock().unwrap().drain(..).collect()
    }
}

impl CollectionSink<Item> for RecordingSink {
    fn publish(&self, state: ReconcileState<Item>) {
        self.published.lock().unwrap().push(state);
    }
}

fn item(id: &str, title: &str) -> Item {
    Item {
        id: RecordId::server(id),
        title: title.to_string(),
    }
}

fn draft(title: &str) -> ItemDraft {
    ItemDraft {
        title: title.to_string(),
    }
}

fn by_id(item: &Item) -> &RecordId {
    &item.id
}

fn id(value: &str) -> RecordId {
    RecordId::server(value)
}

#[tokio::test]
async fn update_success_returns_remote_collection() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A")];
    let remote = |_optimistic: Vec<Item>| async { Ok::<_, RemoteError>(vec![item("1", "B")]) };

    let outcome = reconciler
        .update(&items, &remote, &Retitle("B"), by_id, &id("1"), Options::new())
        .await
        .unwrap();

    assert_eq!(outcome.kind, OperationKind::Update);
    assert_eq!(outcome.status, OutcomeStatus::Reconciled);
    assert_eq!(outcome.collection, vec![item("1", "B")]);
}

#[tokio::test]
async fn update_hands_optimistic_collection_to_remote_and_publishes_it() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A"), item("2", "B")];
    let seen = Mutex::new(Vec::new());
    let remote = |optimistic: Vec<Item>| {
        *seen.lock().unwrap() = optimistic.clone();
        async move { Ok::<_, RemoteError>(optimistic) }
    };

    reconciler
        .update(&items, &remote, &Retitle("Z"), by_id, &id("2"), Options::new())
        .await
        .unwrap();

    let expected = vec![item("1", "A"), item("2", "Z")];
    assert_eq!(*seen.lock().unwrap(), expected);
    assert_eq!(
        reconciler.sink().take(),
        vec![
            ReconcileState {
                collection: expected.clone(),
                is_updating: true,
            },
            ReconcileState::idle(expected),
        ]
    );
}

#[tokio::test]
async fn update_failure_rolls_back_to_original() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A")];
    let remote = |_optimistic: Vec<Item>| async { Err::<Vec<Item>, _>(RemoteError::new("boom")) };
    let errors = AtomicUsize::new(0);

    let outcome = reconciler
        .update(
            &items,
            &remote,
            &Retitle("B"),
            by_id,
            &id("1"),
            Options::new().on_error(|err| {
                assert_eq!(err.message(), "boom");
                errors.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .await
        .unwrap();

    assert!(outcome.is_rolled_back());
    assert_eq!(outcome.collection, vec![item("1", "A")]);
    assert_eq!(errors.load(Ordering::SeqCst), 1);
    let published = reconciler.sink().take();
    assert_eq!(published.last(), Some(&ReconcileState::idle(items)));
}

#[tokio::test]
async fn update_failure_is_reraised_without_rollback() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A")];
    let remote = |_optimistic: Vec<Item>| async {
        Err::<Vec<Item>, _>(RemoteError::with_status(409, "conflict"))
    };
    let error_callback_ran = AtomicBool::new(false);

    let err = reconciler
        .update(
            &items,
            &remote,
            &Retitle("B"),
            by_id,
            &id("1"),
            Options::new()
                .rollback_on_error(false)
                .on_error(|_| error_callback_ran.store(true, Ordering::SeqCst)),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ReconcileError::Remote(RemoteError::with_status(409, "conflict"))
    );
    assert!(!error_callback_ran.load(Ordering::SeqCst));
    assert!(!reconciler.is_updating());
    // The rendering layer is left on the pre-mutation collection.
    assert_eq!(
        reconciler.sink().take().last(),
        Some(&ReconcileState::idle(items))
    );
}

#[tokio::test]
async fn update_without_match_proceeds_on_unchanged_collection() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A"), item("2", "B")];
    let calls = AtomicUsize::new(0);
    let remote = |optimistic: Vec<Item>| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, RemoteError>(optimistic) }
    };

    let outcome = reconciler
        .update(&items, &remote, &Retitle("Z"), by_id, &id("9"), Options::new())
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.collection, items);
    assert_eq!(reconciler.sink().take()[0].collection, items);
}

#[tokio::test]
async fn update_without_match_can_be_rejected() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A")];
    let calls = AtomicUsize::new(0);
    let remote = |optimistic: Vec<Item>| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, RemoteError>(optimistic) }
    };

    let err = reconciler
        .update(
            &items,
            &remote,
            &Retitle("Z"),
            by_id,
            &id("9"),
            Options::new().missing_target(MissingTarget::Reject),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "no entity matches 9");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(reconciler.sink().take().is_empty());
}

#[tokio::test]
async fn create_replaces_placeholder_with_server_entity() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let remote = |draft: ItemDraft| async move {
        Ok::<_, RemoteError>(Item {
            id: RecordId::server("42"),
            title: draft.title,
        })
    };
    let reconciled = Mutex::new(Vec::new());

    let outcome = reconciler
        .create(
            &Vec::<Item>::new(),
            &remote,
            draft("New"),
            Options::new().on_success(|items: &[Item]| *reconciled.lock().unwrap() = items.to_vec()),
        )
        .await
        .unwrap();

    assert_eq!(outcome.kind, OperationKind::Create);
    assert_eq!(outcome.collection, vec![item("42", "New")]);
    assert_eq!(*reconciled.lock().unwrap(), vec![item("42", "New")]);

    let published = reconciler.sink().take();
    assert_eq!(published.len(), 2);
    let placeholder = &published[0].collection[0];
    assert!(placeholder.id.is_temp());
    assert_eq!(placeholder.title, "New");
    assert!(published[0].is_updating);
    assert!(published[1].collection.iter().all(|item| !item.id.is_temp()));
}

#[tokio::test]
async fn create_appends_at_end_of_existing_collection() {
    init_logging();
    let reconciler = Reconciler::new(());
    let items = vec![item("1", "A"), item("2", "B")];
    let remote = |draft: ItemDraft| async move {
        Ok::<_, RemoteError>(Item {
            id: RecordId::server("3"),
            title: draft.title,
        })
    };

    let outcome = reconciler
        .create(&items, &remote, draft("C"), Options::new())
        .await
        .unwrap();

    assert_eq!(
        outcome.collection,
        vec![item("1", "A"), item("2", "B"), item("3", "C")]
    );
}

#[tokio::test]
async fn create_failure_discards_placeholder() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A")];
    let remote = |_draft: ItemDraft| async { Err::<Item, _>(RemoteError::new("offline")) };

    let outcome = reconciler
        .create(&items, &remote, draft("New"), Options::new())
        .await
        .unwrap();

    assert_eq!(
        outcome.status,
        OutcomeStatus::RolledBack {
            reason: "offline".to_string()
        }
    );
    assert_eq!(outcome.collection, items);
    let published = reconciler.sink().take();
    assert_eq!(published[0].collection.len(), 2);
    assert_eq!(published[1], ReconcileState::idle(items));
}

#[tokio::test]
async fn create_without_rollback_reraises_and_drops_placeholder() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A")];
    let remote = |_draft: ItemDraft| async { Err::<Item, _>(RemoteError::with_status(500, "db down")) };

    let err = reconciler
        .create(
            &items,
            &remote,
            draft("New"),
            Options::new().rollback_on_error(false),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ReconcileError::Remote(RemoteError::with_status(500, "db down"))
    );
    assert!(!reconciler.is_updating());
    let published = reconciler.sink().take();
    assert_eq!(published.len(), 2);
    assert!(published[0].is_updating);
    assert_eq!(published[0].collection.len(), 2);
    assert_eq!(published.last(), Some(&ReconcileState::idle(items)));
}

#[tokio::test]
async fn on_success_runs_after_terminal_publish() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A")];
    let remote = |optimistic: Vec<Item>| async move { Ok::<_, RemoteError>(optimistic) };
    let observed = Mutex::new(None);

    reconciler
        .update(
            &items,
            &remote,
            &Retitle("B"),
            by_id,
            &id("1"),
            Options::new().on_success(|_| {
                let last = reconciler.sink().published.lock().unwrap().last().cloned();
                *observed.lock().unwrap() = Some((reconciler.is_updating(), last));
            }),
        )
        .await
        .unwrap();

    assert_eq!(
        observed.into_inner().unwrap(),
        Some((false, Some(ReconcileState::idle(vec![item("1", "B")]))))
    );
}

#[tokio::test]
async fn each_create_gets_a_distinct_temp_id() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let remote = |_draft: ItemDraft| async { Err::<Item, _>(RemoteError::new("offline")) };

    for _ in 0..2 {
        reconciler
            .create(&Vec::<Item>::new(), &remote, draft("New"), Options::new())
            .await
            .unwrap();
    }

    let temp_ids: Vec<RecordId> = reconciler
        .sink()
        .take()
        .into_iter()
        .filter(|state| state.is_updating)
        .map(|state| state.collection[0].id.clone())
        .collect();
    assert_eq!(temp_ids.len(), 2);
    assert_ne!(temp_ids[0], temp_ids[1]);
}

#[tokio::test]
async fn delete_success_removes_entity() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A"), item("2", "B")];
    let deleted = Mutex::new(None);
    let remote = |key: RecordId| {
        *deleted.lock().unwrap() = Some(key);
        async { Ok::<_, RemoteError>(()) }
    };

    let outcome = reconciler
        .delete(&items, &remote, by_id, &id("2"), Options::new())
        .await
        .unwrap();

    assert_eq!(outcome.collection, vec![item("1", "A")]);
    assert_eq!(*deleted.lock().unwrap(), Some(id("2")));
    assert!(outcome.collection.iter().all(|item| item.id != id("2")));
}

#[tokio::test]
async fn delete_failure_restores_entity() {
    init_logging();
    let reconciler = Reconciler::new(RecordingSink::default());
    let items = vec![item("1", "A")];
    let remote = |_key: RecordId| async { Err::<(), _>(RemoteError::new("nope")) };

    let outcome = reconciler
        .delete(&items, &remote, by_id, &id("1"), Options::new())
        .await
        .unwrap();

    assert!(outcome.is_rolled_back());
    assert_eq!(outcome.collection, vec![item("1", "A")]);
    let published = reconciler.sink().take();
    assert!(published[0].collection.is_empty());
    assert_eq!(published[1].collection, vec![item("1", "A")]);
}

#[tokio::test]
async fn flag_is_set_during_remote_and_cleared_on_every_path() {
    init_logging();
    let reconciler = Reconciler::new(());
    let items = vec![item("1", "A")];
    let during = AtomicBool::new(false);

    let ok_update = |optimistic: Vec<Item>| {
        during.store(reconciler.is_updating(), Ordering::SeqCst);
        async move { Ok::<_, RemoteError>(optimistic) }
    };
    reconciler
        .update(&items, &ok_update, &Retitle("B"), by_id, &id("1"), Options::new())
        .await
        .unwrap();
    assert!(during.load(Ordering::SeqCst));
    assert!(!reconciler.is_updating());

    let failing_create = |_draft: ItemDraft| async { Err::<Item, _>(RemoteError::new("x")) };
    reconciler
        .create(&items, &failing_create, draft("C"), Options::new())
        .await
        .unwrap();
    assert!(!reconciler.is_updating());

    let failing_delete = |_key: RecordId| async { Err::<(), _>(RemoteError::new("x")) };
    reconciler
        .delete(
            &items,
            &failing_delete,
            by_id,
            &id("1"),
            Options::new().rollback_on_error(false),
        )
        .await
        .unwrap_err();
    assert!(!reconciler.is_updating());
}
