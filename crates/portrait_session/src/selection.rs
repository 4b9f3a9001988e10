use anyhow::Result;
use nalgebra::Matrix2;
use num_complex::Complex;
use portrait_core::linear::{self, PlanarLinearSystem};
use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::portrait::{PhasePortrait, PortraitSnapshot};
use crate::settings::PortraitSettings;

/// The selected classification point and its derived matrix, at full
/// precision. Rounding happens only in [`SelectionReadout`].
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub trace: f64,
    pub det: f64,
    pub matrix: Matrix2<f64>,
    pub eigenvalues: [Complex<f64>; 2],
}

/// Info-panel readout: the selection formatted at the display precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionReadout {
    /// Matrix entries by row.
    pub matrix: [[String; 2]; 2],
    pub trace: String,
    pub det: String,
}

/// Interactive session state: the portrait plus the current selection.
///
/// Every selection change, whether from a click or the sweep worker, goes
/// through [`SessionState::apply_selection`]; wrap the state in a
/// [`SharedSession`] so both writers serialize on one mutex.
pub struct SessionState {
    portrait: PhasePortrait,
    selection: Selection,
    precision: usize,
}

impl SessionState {
    /// Builds the portrait and computes the initial zero-field snapshot for
    /// the default selection (trace 0, det 0).
    pub fn new(settings: PortraitSettings) -> Result<Self> {
        let precision = settings.display_precision;
        let mut portrait = PhasePortrait::new(settings)?;
        let system = PlanarLinearSystem::zero();
        portrait.set_system(&system)?;
        let selection = Selection {
            trace: 0.0,
            det: 0.0,
            matrix: *system.matrix(),
            eigenvalues: linear::eigenvalues(0.0, 0.0),
        };
        Ok(Self {
            portrait,
            selection,
            precision,
        })
    }

    /// Classifies (trace, det) and recomputes the whole portrait.
    ///
    /// Selection and snapshot commit together, only on success; a rejected
    /// update leaves the previously displayed state fully intact.
    pub fn apply_selection(&mut self, trace: f64, det: f64) -> Result<()> {
        let system = PlanarLinearSystem::from_classification(trace, det)?;
        self.portrait.set_system(&system)?;
        self.selection = Selection {
            trace,
            det,
            matrix: *system.matrix(),
            eigenvalues: linear::eigenvalues(trace, det),
        };
        Ok(())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn snapshot(&self) -> Option<&PortraitSnapshot> {
        self.portrait.snapshot()
    }

    pub fn generation(&self) -> u64 {
        self.portrait.generation()
    }

    pub fn portrait(&self) -> &PhasePortrait {
        &self.portrait
    }

    /// Formats the current selection for the info panel. Underlying values
    /// stay full precision; only the strings are rounded.
    pub fn readout(&self) -> SelectionReadout {
        let p = self.precision;
        let m = &self.selection.matrix;
        SelectionReadout {
            matrix: [
                [format!("{:.p$}", m[(0, 0)]), format!("{:.p$}", m[(0, 1)])],
                [format!("{:.p$}", m[(1, 0)]), format!("{:.p$}", m[(1, 1)])],
            ],
            trace: format!("\u{03c4} = {:.p$}", self.selection.trace),
            det: format!("\u{0394} = {:.p$}", self.selection.det),
        }
    }
}

/// Handle shared between the UI event path and the sweep worker.
pub type SharedSession = Arc<Mutex<SessionState>>;

pub fn shared(settings: PortraitSettings) -> Result<SharedSession> {
    Ok(Arc::new(Mutex::new(SessionState::new(settings)?)))
}
