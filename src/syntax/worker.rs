//! Background highlighting thread
//!
//! One long-lived thread receives jobs over a channel and sends outcomes
//! back. Jobs carry their own text and rule snapshots, so the thread never
//! touches anything the owning thread can mutate.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

use super::highlighter::{highlight_all, highlight_region};
use super::rule_set::RuleSnapshot;
use super::span_index::SpanIndex;
use super::style::Span;
use crate::error::{HighlightError, Result};

/// Which part of the text a job covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassTarget {
    Full,
    Region { start: usize, end: usize },
}

/// A unit of work for the highlight thread
#[derive(Debug, Clone)]
pub struct HighlightJob {
    /// Monotonic pass number assigned by the scheduler
    pub pass: u64,
    pub text: Arc<str>,
    pub rules: RuleSnapshot,
    pub target: PassTarget,
    /// Colors already on the surface; region passes resolve conflicts
    /// against the ones outside the region
    pub seed: Arc<[Span]>,
}

/// Spans computed for `[start, end)` of the snapshot a job was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOutcome {
    pub pass: u64,
    /// Start of the range whose old colors are replaced
    pub start: usize,
    /// End of the range whose old colors are replaced
    pub end: usize,
    pub spans: Vec<Span>,
}

impl HighlightJob {
    /// Run the pass on the calling thread
    pub fn run(&self) -> HighlightOutcome {
        let text: &str = &self.text;
        match self.target {
            PassTarget::Full => HighlightOutcome {
                pass: self.pass,
                start: 0,
                end: text.len(),
                spans: highlight_all(text, &self.rules),
            },
            PassTarget::Region { start, end } => {
                let mut index: SpanIndex = self.seed.iter().copied().collect();
                match highlight_region(text, &self.rules, &mut index, start, end) {
                    Some(region) => HighlightOutcome {
                        pass: self.pass,
                        start: region.start,
                        end: region.end,
                        spans: region.spans,
                    },
                    None => self.empty_outcome(),
                }
            }
        }
    }

    fn empty_outcome(&self) -> HighlightOutcome {
        HighlightOutcome {
            pass: self.pass,
            start: 0,
            end: 0,
            spans: Vec::new(),
        }
    }
}

/// Handle to the highlight thread
#[derive(Debug)]
pub struct HighlightWorker {
    jobs: Option<Sender<HighlightJob>>,
    results: Receiver<HighlightOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl HighlightWorker {
    /// Start the thread
    pub fn spawn() -> Result<Self> {
        let (job_tx, job_rx) = unbounded::<HighlightJob>();
        let (result_tx, result_rx) = unbounded::<HighlightOutcome>();

        let handle = thread::Builder::new()
            .name("cglyph-highlight".to_string())
            .spawn(move || Self::run_loop(job_rx, result_tx))?;

        Ok(Self {
            jobs: Some(job_tx),
            results: result_rx,
            handle: Some(handle),
        })
    }

    fn run_loop(jobs: Receiver<HighlightJob>, results: Sender<HighlightOutcome>) {
        tracing::debug!("highlight worker started");
        for job in jobs.iter() {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| job.run())) {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::error!(pass = job.pass, "highlight pass panicked, discarding");
                    job.empty_outcome()
                }
            };
            if results.send(outcome).is_err() {
                break;
            }
        }
        tracing::debug!("highlight worker stopped");
    }

    /// Queue a job
    pub fn submit(&self, job: HighlightJob) -> Result<()> {
        let jobs = self.jobs.as_ref().ok_or(HighlightError::WorkerUnavailable)?;
        jobs.send(job).map_err(|_| HighlightError::WorkerUnavailable)
    }

    /// Take a finished outcome if one is waiting
    pub fn try_recv(&self) -> Option<HighlightOutcome> {
        match self.results.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for a finished outcome
    pub fn recv_timeout(&self, timeout: Duration) -> Option<HighlightOutcome> {
        match self.results.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop accepting jobs and let the thread finish
    ///
    /// Does not wait for a running pass; its outcome is dropped.
    pub fn shutdown(&mut self) {
        self.jobs = None;
        // Detach: the thread exits once the job channel is drained
        self.handle.take();
    }

    pub fn is_running(&self) -> bool {
        self.jobs.is_some()
    }
}

impl Drop for HighlightWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
