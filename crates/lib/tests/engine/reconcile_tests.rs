//! Reconciliation against the scripted store.

use nixstate_lib::engine::{Change, Refresh};
use nixstate_lib::{ArtifactPath, ArtifactRecord, NixError};

use super::common::{DRV, FakeStore, HELLO, OUT};

#[tokio::test]
async fn ensure_builds_once_then_reuses() {
  let store = FakeStore::new();
  let engine = store.engine();

  let first = engine.ensure(HELLO).await.unwrap();
  assert!(first.built);
  assert_eq!(first.path, ArtifactPath::new(DRV, OUT));

  let second = engine.ensure(HELLO).await.unwrap();
  assert!(!second.built);
  assert_eq!(second.path, first.path);

  assert_eq!(store.count("build"), 1);
  assert_eq!(store.calls()[1], format!("build --no-link --json {HELLO}"));
}

#[tokio::test]
async fn converge_recreates_deleted_output() {
  let store = FakeStore::new();
  let engine = store.engine();

  let created = engine.converge(HELLO, None).await.unwrap();
  assert_eq!(created.change, Change::Created);
  assert_eq!(created.record.system, "x86_64-linux");

  let unchanged = engine.converge(HELLO, Some(&created.record)).await.unwrap();
  assert_eq!(unchanged.change, Change::Unchanged);
  assert!(!unchanged.changed());

  let removal = engine.remove(&created.record).await.unwrap();
  assert_eq!(removal.deleted.as_deref(), Some(OUT));
  assert!(!store.is_realized());

  let rebuilt = engine.converge(HELLO, Some(&created.record)).await.unwrap();
  assert_eq!(rebuilt.change, Change::Rebuilt);
  assert_eq!(rebuilt.record, created.record);
  assert!(store.is_realized());
}

#[tokio::test]
async fn refresh_reports_missing_output() {
  let store = FakeStore::new();
  let record = ArtifactRecord::new(HELLO, ArtifactPath::new(DRV, OUT), "x86_64-linux");

  match store.engine().refresh(&record).await.unwrap() {
    Refresh::RebuildRequired { reason } => assert!(reason.contains(OUT)),
    other => panic!("expected rebuild, got {other:?}"),
  }
  assert_eq!(store.count("build"), 0);
}

#[tokio::test]
async fn inspect_describes_unrealized_installable() {
  let store = FakeStore::new();

  let inspection = store.engine().inspect(HELLO).await.unwrap();

  assert!(!inspection.valid);
  assert_eq!(inspection.path, ArtifactPath::new(DRV, OUT));
  assert_eq!(store.count("build"), 0);
  assert_eq!(store.count("derivation show"), 1);
}

#[tokio::test]
async fn inspect_reads_realized_installable() {
  let store = FakeStore::new().realized();

  let inspection = store.engine().inspect(HELLO).await.unwrap();

  assert!(inspection.valid);
  assert_eq!(inspection.path.output_path, OUT);
  assert_eq!(store.count("derivation show"), 0);
}

#[tokio::test]
async fn failing_script_keeps_exit_code_and_stderr() {
  let store = FakeStore::new();

  let err = store.engine().evaluate("nixpkgs#lib.version", None).await.unwrap_err();

  match err {
    NixError::Execution { code, stderr, .. } => {
      assert_eq!(code, Some(2));
      assert!(stderr.starts_with("unexpected: eval"));
    }
    other => panic!("unexpected error: {other:?}"),
  }
}
