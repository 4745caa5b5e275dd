//! Fixed-size worker pool for the files of one bundle.
//!
//! A producer feeds indices into a bounded job channel shared by all
//! workers. Every job sends back a tagged [`JobResult`], so the caller sees
//! each file's outcome instead of whichever worker happened to finish last.

use std::path::PathBuf;
use std::sync::{Mutex, mpsc};
use std::thread;

use crate::error::{Error, Result};

/// Outcome of one file: where it ended up, or why it failed.
#[derive(Debug)]
pub struct JobResult {
    pub index: usize,
    pub outcome: Result<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkQueue {
    workers: usize,
}

impl WorkQueue {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `worker` once for every index and return the results sorted by
    /// index. Failures are logged as they happen and returned as well.
    pub fn run<F>(&self, indices: &[usize], worker: F) -> Vec<JobResult>
    where
        F: Fn(usize) -> Result<PathBuf> + Sync,
    {
        if indices.is_empty() {
            return Vec::new();
        }

        let workers = self.workers.min(indices.len());
        let (job_tx, job_rx) = mpsc::sync_channel::<usize>(workers);
        let job_rx = Mutex::new(job_rx);
        let (result_tx, result_rx) = mpsc::channel::<JobResult>();

        thread::scope(|s| {
            s.spawn(move || {
                for &index in indices {
                    if job_tx.send(index).is_err() {
                        break;
                    }
                }
            });

            let job_rx = &job_rx;
            let worker = &worker;
            for id in 0..workers {
                let result_tx = result_tx.clone();
                s.spawn(move || {
                    loop {
                        // Guard is released before the job runs.
                        let next = job_rx
                            .lock()
                            .unwrap_or_else(|poisoned| poisoned.into_inner())
                            .recv();
                        let Ok(index) = next else { break };

                        let outcome = worker(index);
                        if let Err(err) = &outcome {
                            tracing::warn!(worker = id, index, error = %err, "file failed");
                        }
                        if result_tx.send(JobResult { index, outcome }).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut results: Vec<JobResult> = result_rx.into_iter().collect();
        results.sort_by_key(|r| r.index);
        results
    }
}

/// Results of one bundle, split into successes and failures.
#[derive(Debug, Default)]
pub struct BundleReport {
    pub dir: PathBuf,
    pub destinations: Vec<(usize, PathBuf)>,
    pub failures: Vec<(usize, Error)>,
}

impl BundleReport {
    pub fn new(dir: impl Into<PathBuf>, results: Vec<JobResult>) -> Self {
        let mut report = Self {
            dir: dir.into(),
            ..Self::default()
        };
        for JobResult { index, outcome } in results {
            match outcome {
                Ok(path) => report.destinations.push((index, path)),
                Err(err) => report.failures.push((index, err)),
            }
        }
        report
    }

    /// The one folder every successful file resolved to, or `None` when no
    /// file succeeded.
    pub fn destination_dir(&self) -> Result<Option<PathBuf>> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for (_, path) in &self.destinations {
            let dir = path.parent().map(PathBuf::from).unwrap_or_default();
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }

        match dirs.len() {
            0 => Ok(None),
            1 => Ok(dirs.pop()),
            _ => Err(Error::BundleInconsistency {
                dir: self.dir.clone(),
                destinations: dirs,
            }),
        }
    }
}
