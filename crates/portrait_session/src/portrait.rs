use anyhow::{Context, Result};
use portrait_core::field::{evaluate_field_grid, FieldGrid};
use portrait_core::linear::PlanarLinearSystem;
use portrait_core::sampling::{sample_initial_points, Domain, SamplingStrategy};
use portrait_core::trajectory::Trajectory;
use serde::Serialize;

use crate::settings::PortraitSettings;

/// One trajectory's renderable path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPath {
    pub index: usize,
    pub start: [f64; 2],
    /// Points per branch; the backward branch occupies the first half of
    /// `points`, the forward branch the second, neither reversed.
    pub branch_len: usize,
    /// Flat (x, y) pairs.
    pub points: Vec<f64>,
}

/// Everything a renderer needs from one completed recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortraitSnapshot {
    /// Monotone recompute counter; a renderer holding generation g can skip
    /// redrawing until it changes.
    pub generation: u64,
    pub trajectories: Vec<TrajectoryPath>,
    pub field: FieldGrid,
}

/// Owns the sampled initial conditions and their trajectories, and turns a
/// selected linear system into a renderable snapshot.
pub struct PhasePortrait {
    settings: PortraitSettings,
    trajectories: Vec<Trajectory>,
    snapshot: Option<PortraitSnapshot>,
    generation: u64,
}

impl PhasePortrait {
    /// Samples the initial conditions once; they are reused across every
    /// field change until [`PhasePortrait::resample`].
    pub fn new(settings: PortraitSettings) -> Result<Self> {
        let trajectories = build_trajectories(
            settings.sampling_strategy,
            settings.domain,
            settings.sampling_density,
        )?;
        Ok(Self {
            settings,
            trajectories,
            snapshot: None,
            generation: 0,
        })
    }

    pub fn settings(&self) -> &PortraitSettings {
        &self.settings
    }

    /// The last successfully computed snapshot, if any.
    pub fn snapshot(&self) -> Option<&PortraitSnapshot> {
        self.snapshot.as_ref()
    }

    /// Number of completed recomputes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Full cold recompute of every trajectory and then the field grid.
    ///
    /// All results land in fresh buffers first; the stored snapshot swaps
    /// only once the entire recompute has succeeded, so a rejected update
    /// never leaves a partial portrait behind.
    pub fn set_system(&mut self, system: &PlanarLinearSystem) -> Result<()> {
        let mut trajectories = self.trajectories.clone();
        let mut paths = Vec::with_capacity(trajectories.len());
        for trajectory in &mut trajectories {
            let [x, y] = trajectory.start();
            trajectory
                .recompute(system, self.settings.trajectory)
                .with_context(|| format!("Trajectory from ({x}, {y}) failed."))?;
            paths.push(TrajectoryPath {
                index: trajectory.index(),
                start: trajectory.start(),
                branch_len: trajectory.branch_len(),
                points: trajectory.path().to_vec(),
            });
        }
        let field = evaluate_field_grid(system, self.settings.domain, self.settings.field_density)?;

        self.trajectories = trajectories;
        self.generation += 1;
        self.snapshot = Some(PortraitSnapshot {
            generation: self.generation,
            trajectories: paths,
            field,
        });
        Ok(())
    }

    /// Regenerates the initial-condition set. Used when the domain, density,
    /// or strategy changes; ordinary field updates never resample.
    ///
    /// The old snapshot is dropped since it belongs to the old sampling; the
    /// next [`PhasePortrait::set_system`] produces a fresh one.
    pub fn resample(
        &mut self,
        strategy: SamplingStrategy,
        domain: Domain,
        density: usize,
    ) -> Result<()> {
        let trajectories = build_trajectories(strategy, domain, density)?;
        self.settings.sampling_strategy = strategy;
        self.settings.domain = domain;
        self.settings.sampling_density = density;
        self.trajectories = trajectories;
        self.snapshot = None;
        Ok(())
    }
}

fn build_trajectories(
    strategy: SamplingStrategy,
    domain: Domain,
    density: usize,
) -> Result<Vec<Trajectory>> {
    let points = sample_initial_points(strategy, domain, density)?;
    Ok(points
        .into_iter()
        .enumerate()
        .map(|(index, x0)| Trajectory::new(index, x0))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::PhasePortrait;
    use crate::settings::PortraitSettings;
    use nalgebra::Matrix2;
    use portrait_core::linear::PlanarLinearSystem;
    use portrait_core::sampling::{Domain, SamplingStrategy};

    #[test]
    fn default_portrait_has_25_trajectories_per_snapshot() {
        let mut portrait = PhasePortrait::new(PortraitSettings::default()).expect("portrait");
        assert!(portrait.snapshot().is_none());

        portrait
            .set_system(&PlanarLinearSystem::zero())
            .expect("zero system recompute");
        let snapshot = portrait.snapshot().expect("snapshot after recompute");
        assert_eq!(snapshot.generation, 1);
        assert_eq!(snapshot.trajectories.len(), 25);
        for path in &snapshot.trajectories {
            assert_eq!(path.branch_len, 50);
            assert_eq!(path.points.len(), 2 * 2 * 50);
        }
        assert_eq!(snapshot.field.u.len(), 15 * 15);
    }

    #[test]
    fn generation_counts_successful_recomputes() {
        let mut portrait = PhasePortrait::new(PortraitSettings::default()).expect("portrait");
        let rotation = PlanarLinearSystem::new(Matrix2::new(0.0, -1.0, 1.0, 0.0));
        portrait.set_system(&rotation).expect("first");
        portrait.set_system(&rotation).expect("second");
        assert_eq!(portrait.generation(), 2);
        assert_eq!(portrait.snapshot().expect("snapshot").generation, 2);
    }

    #[test]
    fn failed_recompute_preserves_the_previous_snapshot() {
        let mut portrait = PhasePortrait::new(PortraitSettings::default()).expect("portrait");
        let rotation = PlanarLinearSystem::new(Matrix2::new(0.0, -1.0, 1.0, 0.0));
        portrait.set_system(&rotation).expect("valid recompute");
        let before = portrait.snapshot().expect("snapshot").clone();

        let explosive = PlanarLinearSystem::new(Matrix2::new(2000.0, 0.0, 0.0, 2000.0));
        assert!(portrait.set_system(&explosive).is_err());
        assert_eq!(portrait.generation(), 1);
        assert_eq!(portrait.snapshot().expect("snapshot"), &before);
    }

    #[test]
    fn resample_rebuilds_initial_conditions_and_drops_the_snapshot() {
        let mut portrait = PhasePortrait::new(PortraitSettings::default()).expect("portrait");
        portrait
            .set_system(&PlanarLinearSystem::zero())
            .expect("recompute");

        let tight = Domain {
            xmin: -1.0,
            xmax: 1.0,
            ymin: -1.0,
            ymax: 1.0,
        };
        portrait
            .resample(SamplingStrategy::Polar, tight, 3)
            .expect("resample");
        assert!(portrait.snapshot().is_none());
        assert_eq!(portrait.settings().sampling_density, 3);

        portrait
            .set_system(&PlanarLinearSystem::zero())
            .expect("recompute after resample");
        let snapshot = portrait.snapshot().expect("snapshot");
        assert_eq!(snapshot.trajectories.len(), 9);
    }
}
