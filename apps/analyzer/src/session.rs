#![allow(dead_code)]

//! Session state machine for one analysis surface.
//!
//! `ModeSession` owns the mutable state the rendering surface reads; the
//! validator, builder, transport, and normalizer never touch it directly.
//! Overlapping submissions are resolved with an attempt generation: each
//! attempt captures the generation it started under, and an attempt whose
//! generation is no longer current discards its outcome instead of
//! clobbering newer state. There is no transport-level cancellation.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::analysis::normalize::normalize;
use crate::analysis::request::build;
use crate::analysis::validate::{validate, ValidationRules};
use crate::client::AnalysisTransport;
use crate::errors::AnalysisError;
use crate::models::document::{Document, Mode};
use crate::models::report::AnalysisReport;

/// Lifecycle of one analysis attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Snapshot of the session, as consumed by the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub mode: Mode,
    pub phase: Phase,
    pub last_error: Option<AnalysisError>,
    pub result: Option<AnalysisReport>,
}

/// How one `start_analysis` call ended, from the caller's point of view.
/// `Superseded` means a newer attempt (or a mode toggle) took over while
/// this one was in flight; its outcome was discarded, whatever it was.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Completed(AnalysisReport),
    Superseded,
}

struct Inner {
    mode: Mode,
    phase: Phase,
    last_error: Option<AnalysisError>,
    result: Option<AnalysisReport>,
    generation: u64,
}

/// The session handle. Cheap to clone; all clones share one state.
#[derive(Clone)]
pub struct ModeSession {
    inner: Arc<Mutex<Inner>>,
    transport: Arc<dyn AnalysisTransport>,
    rules: ValidationRules,
}

impl ModeSession {
    pub fn new(mode: Mode, transport: Arc<dyn AnalysisTransport>, rules: ValidationRules) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                mode,
                phase: Phase::Idle,
                last_error: None,
                result: None,
                generation: 0,
            })),
            transport,
            rules,
        }
    }

    pub fn state(&self) -> SessionState {
        let inner = self.inner.lock().unwrap();
        SessionState {
            mode: inner.mode,
            phase: inner.phase,
            last_error: inner.last_error.clone(),
            result: inner.result.clone(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.inner.lock().unwrap().mode
    }

    /// Switches mode and resets to `Idle`, clearing result and error.
    /// Permitted from any phase; an in-flight attempt keeps running at the
    /// transport level but its outcome is discarded on arrival.
    pub fn toggle_mode(&self) -> Mode {
        let mut inner = self.inner.lock().unwrap();
        inner.mode = inner.mode.toggled();
        inner.phase = Phase::Idle;
        inner.last_error = None;
        inner.result = None;
        inner.generation += 1;
        debug!("mode toggled to {}, session reset", inner.mode);
        inner.mode
    }

    /// Runs one full attempt: validate → build → submit → normalize.
    /// Does not block earlier attempts; it supersedes them.
    pub async fn start_analysis(
        &self,
        role: &str,
        documents: Vec<Document>,
        job_description: Option<Document>,
    ) -> Result<AttemptOutcome, AnalysisError> {
        let (mode, generation) = {
            let mut inner = self.inner.lock().unwrap();
            inner.generation += 1;
            inner.phase = Phase::Validating;
            inner.last_error = None;
            inner.result = None;
            (inner.mode, inner.generation)
        };
        debug!("attempt {generation} started ({mode} mode)");

        let validated = match validate(mode, role, documents, job_description, &self.rules) {
            Ok(validated) => validated,
            Err(e) => return self.fail(generation, e.into()),
        };

        if !self.advance_if_current(generation, Phase::Submitting) {
            return Ok(AttemptOutcome::Superseded);
        }

        let raw = match self.transport.submit(build(validated)).await {
            Ok(raw) => raw,
            Err(e) => return self.fail(generation, e.into()),
        };

        let report = match normalize(mode, &raw) {
            Ok(report) => report,
            Err(e) => return self.fail(generation, e.into()),
        };

        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            debug!("attempt {generation} superseded, result discarded");
            return Ok(AttemptOutcome::Superseded);
        }
        inner.phase = Phase::Succeeded;
        inner.result = Some(report.clone());
        info!("attempt {generation} succeeded");
        Ok(AttemptOutcome::Completed(report))
    }

    fn advance_if_current(&self, generation: u64, phase: Phase) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            return false;
        }
        inner.phase = phase;
        true
    }

    /// Records a failure if the attempt is still current; a superseded
    /// attempt's error is discarded like any other stale outcome.
    fn fail(
        &self,
        generation: u64,
        error: AnalysisError,
    ) -> Result<AttemptOutcome, AnalysisError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            debug!("attempt {generation} superseded, error discarded");
            return Ok(AttemptOutcome::Superseded);
        }
        warn!("attempt {generation} failed: {error}");
        inner.phase = Phase::Failed;
        inner.last_error = Some(error.clone());
        Err(error)
    }
}
