//! Interactive session layer over `portrait_core`.
//!
//! The engine computes; this crate decides when. It owns the tunable
//! settings, the selection state shared between the UI event path and the
//! auto-sweep worker, and the recompute pipeline that turns a selected
//! (trace, determinant) point into a renderable snapshot. Rendering, mouse
//! handling, and window lifecycle stay with external collaborators, which
//! consume the serde-serializable snapshot and readout types exposed here.

pub mod diagram;
pub mod portrait;
pub mod selection;
pub mod settings;
pub mod sweep;

pub use portrait::{PhasePortrait, PortraitSnapshot, TrajectoryPath};
pub use selection::{Selection, SelectionReadout, SessionState, SharedSession};
pub use settings::PortraitSettings;
pub use sweep::AutoSweep;

use anyhow::{anyhow, Result};
use std::sync::Arc;

/// Top-level handle tying the shared session to its sweep worker.
///
/// Mirrors the two ways the selection changes: a manual pick (which first
/// cancels any active sweep, then applies) and the sweep's own ticks. Both
/// funnel into the same mutex-guarded entry point, so no update can observe
/// a half-written selection.
pub struct PortraitApp {
    session: SharedSession,
    sweep: AutoSweep,
}

impl PortraitApp {
    pub fn new(settings: PortraitSettings) -> Result<Self> {
        let session = selection::shared(settings)?;
        let sweep = AutoSweep::new(Arc::clone(&session), settings.sweep_tick);
        Ok(Self { session, sweep })
    }

    /// Manual selection: stops an active sweep, then applies the point.
    pub fn select(&mut self, trace: f64, det: f64) -> Result<()> {
        self.sweep.stop();
        self.session
            .lock()
            .map_err(|_| anyhow!("Session state poisoned."))?
            .apply_selection(trace, det)
    }

    /// Starts or stops the automatic ellipse sweep.
    pub fn toggle_sweep(&mut self) {
        self.sweep.toggle();
    }

    pub fn sweep_running(&self) -> bool {
        self.sweep.is_running()
    }

    /// Runs `read` against the locked session state; collaborators use this
    /// to pull the snapshot or readout without holding the lock afterwards.
    pub fn with_state<R>(&self, read: impl FnOnce(&SessionState) -> R) -> Result<R> {
        let state = self
            .session
            .lock()
            .map_err(|_| anyhow!("Session state poisoned."))?;
        Ok(read(&state))
    }

    /// The shared handle, for collaborators that keep their own reference.
    pub fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }
}
