//! Ingest pipeline.
//!
//! One walker thread discovers files and classifies them; a fixed-size
//! worker pool consumes them off a bounded queue, each building a private
//! local `Graph`; a single-threaded collector merges the results and runs
//! the Python transitive-inheritance post-pass.

use crate::config::IngestConfig;
use crate::parsing::{classify, FileKind};
use crate::shared::{CodegraphError, Graph};
use crate::translators::{
    resolve_transitive_inheritance, translate_compose, translate_dockerfile, translate_go,
    translate_java, translate_python,
};
use crossbeam_channel::bounded;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tracing::warn;
use walkdir::WalkDir;

pub type StartCallback = Arc<dyn Fn(usize) + Send + Sync>;
pub type ProgressCallback = Arc<dyn Fn() + Send + Sync>;

struct Job {
    path: PathBuf,
    kind: FileKind,
}

/// Walks `root`, classifies every file, and spins up the worker pool. Never
/// returns an error: a root-walk failure is logged and yields an empty
/// graph.
pub fn initialize(
    root: &Path,
    config: &IngestConfig,
    on_start: Option<StartCallback>,
    on_progress: Option<ProgressCallback>,
) -> Graph {
    let jobs = match discover_jobs(root, config) {
        Ok(jobs) => jobs,
        Err(err) => {
            warn!(error = %err, "root walk failed, returning empty graph");
            return Graph::new();
        }
    };

    if let Some(cb) = &on_start {
        cb(jobs.len());
    }

    let worker_count = config.resolved_worker_count();
    let (sender, receiver) = bounded::<Job>(config.queue_capacity.max(1));

    let worker_handles: Vec<_> = (0..worker_count)
        .map(|_| {
            let receiver = receiver.clone();
            let on_progress = on_progress.clone();
            thread::spawn(move || {
                let mut local_graph = Graph::new();
                while let Ok(job) = receiver.recv() {
                    process_job(&job, &mut local_graph);
                    if let Some(cb) = &on_progress {
                        cb();
                    }
                }
                local_graph
            })
        })
        .collect();
    drop(receiver);

    let producer = thread::spawn(move || {
        for job in jobs {
            if sender.send(job).is_err() {
                break;
            }
        }
    });

    let mut graph = Graph::new();
    for handle in worker_handles {
        if let Ok(local_graph) = handle.join() {
            graph.merge(local_graph);
        }
    }
    let _ = producer.join();

    resolve_transitive_inheritance(&mut graph);
    graph
}

/// Root-level walk errors propagate (`depth() == 0`); interior errors are
/// logged and skipped.
fn discover_jobs(root: &Path, config: &IngestConfig) -> Result<Vec<Job>, CodegraphError> {
    let mut jobs = Vec::new();
    for entry in WalkDir::new(root).follow_links(config.follow_symlinks) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == 0 {
                    return Err(CodegraphError::WalkRoot {
                        path: root.to_path_buf(),
                        source: err,
                    });
                }
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(kind) = classify(entry.path()) {
            jobs.push(Job {
                path: entry.path().to_path_buf(),
                kind,
            });
        }
    }
    Ok(jobs)
}

fn process_job(job: &Job, graph: &mut Graph) {
    let content = match std::fs::read_to_string(&job.path) {
        Ok(content) => content,
        Err(err) => {
            warn!(path = %job.path.display(), error = %err, "failed to read file, skipping");
            return;
        }
    };

    let sub_graph = match job.kind {
        FileKind::Java => translate_java(&content, &job.path),
        FileKind::Python => translate_python(&content, &job.path),
        FileKind::Go => translate_go(&content, &job.path),
        FileKind::Dockerfile => translate_dockerfile(&content, &job.path),
        FileKind::Compose => translate_compose(&content, &job.path),
    };
    graph.merge(sub_graph);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::NodeKind;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[test]
    fn s1_java_repo_yields_class_method_and_invocation() {
        let dir = tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("InvocationClass.java")).unwrap();
        writeln!(
            file,
            "public class InvocationClass {{ public void caller() {{ callee(); }} private void callee() {{}} }}"
        )
        .unwrap();

        let graph = initialize(dir.path(), &IngestConfig::default(), None, None);
        assert_eq!(graph.find_by_kind(NodeKind::ClassDeclaration).len(), 1);
        assert_eq!(graph.find_by_kind(NodeKind::MethodDeclaration).len(), 2);
        assert_eq!(graph.find_by_kind(NodeKind::MethodInvocation).len(), 1);
    }

    #[test]
    fn callbacks_fire_exactly_once_per_file() {
        let dir = tempdir().unwrap();
        for i in 0..3 {
            let mut file =
                std::fs::File::create(dir.path().join(format!("F{}.java", i))).unwrap();
            writeln!(file, "public class F{} {{}}", i).unwrap();
        }

        let start_total = Arc::new(Mutex::new(0usize));
        let start_total_clone = start_total.clone();
        let progress_count = Arc::new(AtomicUsize::new(0));
        let progress_count_clone = progress_count.clone();

        let on_start: StartCallback = Arc::new(move |total| {
            *start_total_clone.lock().unwrap() = total;
        });
        let on_progress: ProgressCallback = Arc::new(move || {
            progress_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        initialize(
            dir.path(),
            &IngestConfig::default(),
            Some(on_start),
            Some(on_progress),
        );

        assert_eq!(*start_total.lock().unwrap(), 3);
        assert_eq!(progress_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unreadable_file_does_not_abort_the_run() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.java"), b"not valid java {{{").unwrap();
        std::fs::write(dir.path().join("Good.java"), b"public class Good {}").unwrap();

        let graph = initialize(dir.path(), &IngestConfig::default(), None, None);
        assert!(graph.find_by_kind(NodeKind::ClassDeclaration).len() >= 1);
    }

    #[test]
    fn nonexistent_root_yields_empty_graph() {
        let graph = initialize(
            Path::new("/does/not/exist/at/all"),
            &IngestConfig::default(),
            None,
            None,
        );
        assert_eq!(graph.node_count(), 0);
    }
}
