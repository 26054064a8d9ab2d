//! Copies and remote probes against the scripted store.

use nixstate_lib::{CopyRequest, NixError, TransportOptions};

use super::common::{FakeStore, OUT};

const REMOTE: &str = "ssh://deploy@10.1.2.3";

#[tokio::test]
async fn copy_passes_flags_and_ssh_options() {
  let store = FakeStore::new().with_copy(r#"echo "$NIX_SSHOPTS" >> "$(dirname "$0")/ssh.log""#);
  let request = CopyRequest {
    to: Some(REMOTE.to_string()),
    check_sigs: Some(false),
    transport: TransportOptions::ssh(["-o StrictHostKeyChecking=no"]),
    ..CopyRequest::new(OUT)
  };

  store.engine().replicate(&request).await.unwrap();

  assert_eq!(store.calls(), vec![format!("copy {OUT} --to {REMOTE} --no-check-sigs")]);
  let ssh = std::fs::read_to_string(store.temp.path().join("ssh.log")).unwrap();
  assert_eq!(ssh.trim(), "-o StrictHostKeyChecking=no");
}

#[tokio::test]
async fn remote_probe_true_on_success() {
  let store = FakeStore::new();

  let exists = store
    .engine()
    .remote_store_path_exists(OUT, REMOTE, &TransportOptions::default())
    .await
    .unwrap();

  assert!(exists);
  assert_eq!(store.calls(), vec![format!("copy --offline --from {REMOTE} --to {REMOTE} {OUT}")]);
}

#[tokio::test]
async fn remote_probe_false_when_missing() {
  let store = FakeStore::new().with_copy(
    r#"echo "error: path '$9' is required, but there is no substituter that can build it" >&2; exit 1"#,
  );

  let exists = store
    .engine()
    .remote_store_path_exists(OUT, REMOTE, &TransportOptions::default())
    .await
    .unwrap();

  assert!(!exists);
}

#[tokio::test]
async fn remote_probe_surfaces_other_failures() {
  let store = FakeStore::new().with_copy(r#"echo "error: cannot connect to 'deploy@10.1.2.3'" >&2; exit 1"#);

  let err = store
    .engine()
    .refresh_copy(&CopyRequest {
      to: Some(REMOTE.to_string()),
      ..CopyRequest::new(OUT)
    })
    .await
    .unwrap_err();

  match err {
    NixError::RemoteProbe { installable, store: remote, stderr } => {
      assert_eq!(installable, OUT);
      assert_eq!(remote, REMOTE);
      assert_eq!(stderr, "error: cannot connect to 'deploy@10.1.2.3'");
    }
    other => panic!("unexpected error: {other:?}"),
  }
}
