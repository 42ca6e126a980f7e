//! Bundles every discovered action concurrently.
//!
//! One blocking task per action; the orchestrator waits for all of them to
//! settle and reports every failure, not just the first.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;

use crate::bundle::Bundler;
use crate::discover::ActionSource;
use crate::error::BuildError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltArtifact {
    pub action: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFailure {
    pub action: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub artifacts: Vec<BuiltArtifact>,
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Bundle all `sources` at once and wait for every bundle to finish.
pub async fn build_all<B>(bundler: Arc<B>, sources: Vec<ActionSource>) -> BuildReport
where
    B: Bundler + 'static,
{
    let mut tasks = JoinSet::new();
    for source in sources {
        let bundler = Arc::clone(&bundler);
        tasks.spawn(async move {
            let name = source.name.clone();
            tracing::info!(action = %name, entry = %source.entry.display(), "bundling");
            let result = tokio::task::spawn_blocking(move || bundler.bundle(&source))
                .await
                .unwrap_or_else(|e| {
                    Err(BuildError::BundleFailed {
                        action: name.clone(),
                        reason: format!("bundle task did not complete: {e}"),
                    })
                });
            (name, result)
        });
    }

    let mut report = BuildReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((action, Ok(path))) => {
                tracing::info!(action = %action, artifact = %path.display(), "bundled");
                report.artifacts.push(BuiltArtifact { action, path });
            }
            Ok((action, Err(e))) => {
                tracing::error!(action = %action, error = %e, "bundle failed");
                report.failures.push(BuildFailure {
                    action,
                    error: e.to_string(),
                });
            }
            // The outer tasks only await; this is a runtime shutdown.
            Err(e) => {
                tracing::error!(error = %e, "bundle task lost");
                report.failures.push(BuildFailure {
                    action: "unknown".to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    report.artifacts.sort_by(|a, b| a.action.cmp(&b.action));
    report.failures.sort_by(|a, b| a.action.cmp(&b.action));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Barrier, Mutex};
    use tempfile::TempDir;

    /// Writes a placeholder artifact, or fails for the named actions.
    struct FakeBundler {
        fail: HashSet<String>,
        calls: AtomicUsize,
    }

    impl FakeBundler {
        fn new(fail: &[&str]) -> Self {
            Self {
                fail: fail.iter().map(|s| s.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Bundler for FakeBundler {
        fn bundle(&self, source: &ActionSource) -> Result<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.contains(&source.name) {
                return Err(BuildError::BundleFailed {
                    action: source.name.clone(),
                    reason: "rejected".to_string(),
                });
            }
            std::fs::create_dir_all(source.artifact.parent().unwrap())?;
            std::fs::write(&source.artifact, source.name.as_bytes())?;
            Ok(source.artifact.clone())
        }
    }

    fn sources(actions: &Path, names: &[&str]) -> Vec<ActionSource> {
        names
            .iter()
            .map(|n| ActionSource::new(actions, n, ""))
            .collect()
    }

    #[tokio::test]
    async fn two_actions_produce_two_artifacts() {
        let dir = TempDir::new().unwrap();
        let actions = dir.path().join("actions");
        let bundler = Arc::new(FakeBundler::new(&[]));

        let report = build_all(
            Arc::clone(&bundler),
            sources(&actions, &["hello-world", "goodbye-world"]),
        )
        .await;

        assert!(report.is_success());
        assert_eq!(report.artifacts.len(), 2);
        assert_eq!(report.artifacts[0].action, "goodbye-world");
        assert_eq!(
            report.artifacts[1].path,
            actions.join("hello-world/dist/hello-world")
        );
        assert!(actions.join("goodbye-world/dist/goodbye-world").is_file());
        assert!(actions.join("hello-world/dist/hello-world").is_file());
        assert_eq!(bundler.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn one_failure_fails_the_build_but_others_still_run() {
        let dir = TempDir::new().unwrap();
        let actions = dir.path().join("actions");
        let bundler = Arc::new(FakeBundler::new(&["goodbye-world"]));

        let report = build_all(
            Arc::clone(&bundler),
            sources(&actions, &["hello-world", "goodbye-world"]),
        )
        .await;

        assert!(!report.is_success());
        assert_eq!(
            report.failures,
            vec![BuildFailure {
                action: "goodbye-world".into(),
                error: "bundling goodbye-world failed: rejected".into(),
            }]
        );
        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(bundler.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn no_sources_is_an_empty_success() {
        let report = build_all(Arc::new(FakeBundler::new(&[])), Vec::new()).await;
        assert!(report.is_success());
        assert!(report.artifacts.is_empty());
    }

    /// Every bundle must be in flight at once: each waits on a barrier that
    /// only opens when all of them have arrived.
    struct RendezvousBundler {
        barrier: Barrier,
        seen: Mutex<Vec<String>>,
    }

    impl Bundler for RendezvousBundler {
        fn bundle(&self, source: &ActionSource) -> Result<PathBuf> {
            self.barrier.wait();
            self.seen.lock().unwrap().push(source.name.clone());
            Ok(source.artifact.clone())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn bundles_run_concurrently() {
        let names = ["a", "b", "c", "d"];
        let bundler = Arc::new(RendezvousBundler {
            barrier: Barrier::new(names.len()),
            seen: Mutex::new(Vec::new()),
        });

        let report = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            build_all(Arc::clone(&bundler), sources(Path::new("actions"), &names)),
        )
        .await
        .expect("bundles did not run concurrently");

        assert!(report.is_success());
        assert_eq!(bundler.seen.lock().unwrap().len(), names.len());
    }

    struct PanickingBundler;

    impl Bundler for PanickingBundler {
        fn bundle(&self, _source: &ActionSource) -> Result<PathBuf> {
            panic!("bundler blew up");
        }
    }

    #[tokio::test]
    async fn panicking_bundler_is_reported_as_failure() {
        let report = build_all(
            Arc::new(PanickingBundler),
            sources(Path::new("actions"), &["hello-world"]),
        )
        .await;
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].action, "hello-world");
        assert!(report.failures[0].error.contains("did not complete"));
    }
}
