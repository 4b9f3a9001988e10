use portrait_core::sampling::{Domain, SamplingStrategy};
use portrait_core::trajectory::TrajectorySettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for an interactive portrait session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortraitSettings {
    pub trajectory: TrajectorySettings,
    /// Initial-condition points per axis.
    pub sampling_density: usize,
    pub sampling_strategy: SamplingStrategy,
    /// Display-lattice samples per axis for quiver rendering.
    pub field_density: usize,
    /// Visible region of the phase plane.
    pub domain: Domain,
    /// Auto-sweep tick interval (soft throttle, not a deadline).
    pub sweep_tick: Duration,
    /// Decimal digits shown by the info-panel readout.
    pub display_precision: usize,
}

impl Default for PortraitSettings {
    fn default() -> Self {
        Self {
            trajectory: TrajectorySettings::default(),
            sampling_density: 5,
            sampling_strategy: SamplingStrategy::Cartesian,
            field_density: 15,
            domain: Domain {
                xmin: -10.0,
                xmax: 10.0,
                ymin: -10.0,
                ymax: 10.0,
            },
            sweep_tick: Duration::from_millis(100),
            display_precision: 2,
        }
    }
}
