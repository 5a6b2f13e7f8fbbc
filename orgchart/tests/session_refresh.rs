//! Integration tests for session refresh and expansion lifecycle

use async_trait::async_trait;
use orgchart::{
    EmployeeId, EmployeeRecord, Forest, ForestSource, HierarchyDataSource, HierarchyNode,
    HierarchySession, InMemorySource, JsonFileSource, OrgChartError, RefreshOutcome, Snapshot,
    SupervisorRef,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn staff() -> Vec<EmployeeRecord> {
    vec![
        EmployeeRecord::new("alice", "Alice").with_role("Regional Manager"),
        EmployeeRecord::new("bob", "Bob")
            .with_role("Area Manager")
            .with_supervisor(SupervisorRef::new("alice").with_name("Alice")),
        EmployeeRecord::new("carol", "Carol")
            .with_role("Sales Officer")
            .with_supervisor(SupervisorRef::new("alice").with_name("Alice"))
            .with_supervisor(SupervisorRef::new("bob").with_name("Bob")),
        EmployeeRecord::new("dan", "Dan")
            .with_role("Sales Officer")
            .with_supervisor(SupervisorRef::new("carol").with_name("Carol"))
            .with_supervisor(SupervisorRef::new("ex-employee").with_name("Eve")),
    ]
}

/// Source that can be switched into a failing mode and counts fetches
struct FlakySource {
    inner: InMemorySource,
    failing: AtomicBool,
    fetches: AtomicUsize,
}

/// Shared handle so the test can flip the source after handing it to a session
struct Handle(Arc<FlakySource>);

#[async_trait]
impl HierarchyDataSource for Handle {
    async fn fetch(&self) -> orgchart::Result<Snapshot> {
        let source = &self.0;
        source.fetches.fetch_add(1, Ordering::SeqCst);
        if source.failing.load(Ordering::SeqCst) {
            return Err(OrgChartError::source_error("HTTP 503 Service Unavailable"));
        }
        source.inner.fetch().await
    }
}

#[tokio::test]
async fn test_unchanged_snapshot_keeps_user_expansion() {
    let session = HierarchySession::new(Box::new(InMemorySource::new(Snapshot::new(staff()))));
    session.refresh().await.unwrap();

    assert!(session.toggle("dan").await);
    assert!(!session.toggle("alice").await);

    let outcome = session.refresh().await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Unchanged);
    assert!(session.is_expanded("dan").await);
    assert!(!session.is_expanded("alice").await);
}

#[tokio::test]
async fn test_new_snapshot_reseeds_expansion() {
    let source = Arc::new(FlakySource {
        inner: InMemorySource::new(Snapshot::new(staff())),
        failing: AtomicBool::new(false),
        fetches: AtomicUsize::new(0),
    });
    let session = HierarchySession::new(Box::new(Handle(Arc::clone(&source))));
    session.refresh().await.unwrap();
    session.expand_all().await;
    assert!(session.is_expanded("dan").await);

    let mut changed = staff();
    changed.push(EmployeeRecord::new("erin", "Erin").reports_to("dan"));
    source.inner.replace(Snapshot::new(changed)).unwrap();

    let outcome = session.refresh().await.unwrap();
    assert_eq!(
        outcome,
        RefreshOutcome::Replaced {
            source: ForestSource::Built
        }
    );
    assert!(!session.is_expanded("dan").await);
    assert_eq!(
        session.expanded_ids().await,
        vec![
            EmployeeId::from("alice"),
            EmployeeId::from("bob"),
            EmployeeId::from("carol")
        ]
    );
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fetch_failure_propagates_and_keeps_view() {
    let source = Arc::new(FlakySource {
        inner: InMemorySource::new(Snapshot::new(staff())),
        failing: AtomicBool::new(false),
        fetches: AtomicUsize::new(0),
    });
    let session = HierarchySession::new(Box::new(Handle(Arc::clone(&source))));
    session.refresh().await.unwrap();
    let before = session.fingerprint().await;
    session.toggle("dan").await;

    source.failing.store(true, Ordering::SeqCst);
    let err = session.refresh().await.unwrap_err();
    assert!(matches!(err, OrgChartError::Source(_)));

    assert_eq!(session.fingerprint().await, before);
    assert!(session.is_expanded("dan").await);
    assert_eq!(session.forest().await.len(), 1);
}

#[tokio::test]
async fn test_supplied_hierarchy_is_authoritative() {
    let supplied = Forest::from(vec![HierarchyNode::new("hq", "Head Office")
        .with_subordinate(HierarchyNode::new("alice", "Alice"))]);
    let snapshot = Snapshot::new(staff()).with_hierarchy(supplied.clone());
    let session = HierarchySession::new(Box::new(InMemorySource::new(snapshot)));

    let outcome = session.refresh().await.unwrap();
    assert_eq!(
        outcome,
        RefreshOutcome::Replaced {
            source: ForestSource::Supplied
        }
    );
    assert_eq!(*session.forest().await, supplied);

    // The index still reflects the declared supervisors
    let supervisors = session.supervisors().await;
    assert_eq!(supervisors.reports_to_label("dan"), "Carol, Eve");
}

#[tokio::test]
async fn test_visible_rows_follow_expansion() {
    let session = HierarchySession::new(Box::new(InMemorySource::new(Snapshot::new(staff()))));
    session.refresh().await.unwrap();

    // carol is a direct child of the root, so both of her copies start open
    let rows = session.visible_rows().await;
    let shown: Vec<(&str, usize)> = rows.iter().map(|r| (r.id.as_str(), r.depth)).collect();
    assert_eq!(
        shown,
        vec![
            ("alice", 0),
            ("bob", 1),
            ("carol", 2),
            ("dan", 3),
            ("carol", 1),
            ("dan", 2)
        ]
    );
    assert!(rows.iter().filter(|r| r.id.as_str() == "dan").all(|r| !r.has_children));

    session.collapse_all().await;
    assert_eq!(session.visible_rows().await.len(), 1);

    assert!(session.reveal("dan").await);
    let rows = session.visible_rows().await;
    assert_eq!(rows.iter().filter(|r| r.id.as_str() == "dan").count(), 2);
    assert!(!session.reveal("nobody").await);
}

#[tokio::test]
async fn test_session_over_json_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("snapshot.json");
    let snapshot = Snapshot::new(staff());
    std::fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

    let session = HierarchySession::new(Box::new(JsonFileSource::new(&path)));
    session.refresh().await.unwrap();
    assert_eq!(session.fingerprint().await, Some(snapshot.fingerprint()));
    assert_eq!(
        session.refresh().await.unwrap(),
        RefreshOutcome::Unchanged
    );

    std::fs::remove_file(&path).unwrap();
    let err = session.refresh().await.unwrap_err();
    assert!(matches!(err, OrgChartError::SnapshotNotFound { .. }));
}

/// Serves its snapshots in call order; the first fetch answers slowly
struct SlowFirstSource {
    snapshots: Vec<Snapshot>,
    calls: AtomicUsize,
}

#[async_trait]
impl HierarchyDataSource for SlowFirstSource {
    async fn fetch(&self) -> orgchart::Result<Snapshot> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        let idx = call.min(self.snapshots.len() - 1);
        Ok(self.snapshots[idx].clone())
    }
}

#[tokio::test]
async fn test_concurrent_refreshes_apply_in_call_order() {
    let older = Snapshot::new(vec![EmployeeRecord::new("old-ceo", "Old CEO")]);
    let newer = Snapshot::new(staff());
    let newer_fingerprint = newer.fingerprint();
    let session = HierarchySession::new(Box::new(SlowFirstSource {
        snapshots: vec![older, newer],
        calls: AtomicUsize::new(0),
    }));

    let (first, second) = tokio::join!(session.refresh(), async {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        session.refresh().await
    });
    assert!(matches!(first.unwrap(), RefreshOutcome::Replaced { .. }));
    assert!(matches!(second.unwrap(), RefreshOutcome::Replaced { .. }));

    assert_eq!(session.fingerprint().await, Some(newer_fingerprint));
    let forest = session.forest().await;
    assert!(forest.contains("alice"));
    assert!(!forest.contains("old-ceo"));

    // A later refresh of the same data leaves the viewer's choices alone
    assert!(session.toggle("dan").await);
    assert_eq!(session.refresh().await.unwrap(), RefreshOutcome::Unchanged);
    assert!(session.is_expanded("dan").await);
}
