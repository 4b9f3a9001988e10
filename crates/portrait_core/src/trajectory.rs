use crate::orbit::sample_orbit;
use crate::solvers::SolverKind;
use crate::traits::{Negated, VectorField};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Step count, step size, and method used for each trajectory branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySettings {
    /// States per branch, initial condition included.
    pub steps: usize,
    pub dt: f64,
    pub solver: SolverKind,
}

impl Default for TrajectorySettings {
    fn default() -> Self {
        Self {
            steps: 50,
            dt: 0.1,
            solver: SolverKind::Rk4,
        }
    }
}

/// One trajectory of a portrait: an initial condition together with its
/// sampled backward and forward time evolution.
///
/// `index` is the sequence number handed out by the portrait when the
/// initial conditions are sampled; renderers use it for stable color
/// assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    index: usize,
    x0: [f64; 2],
    branch_len: usize,
    path: Vec<f64>,
}

impl Trajectory {
    pub fn new(index: usize, x0: [f64; 2]) -> Self {
        Self {
            index,
            x0,
            branch_len: 0,
            path: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start(&self) -> [f64; 2] {
        self.x0
    }

    /// Points per branch; the combined path holds twice as many.
    pub fn branch_len(&self) -> usize {
        self.branch_len
    }

    /// Flat (x, y) path: the backward branch followed by the forward
    /// branch. Both branches begin at the initial condition and neither is
    /// reversed, so the path reads as two rays leaving the start point.
    pub fn path(&self) -> &[f64] {
        &self.path
    }

    pub fn point_count(&self) -> usize {
        self.path.len() / 2
    }

    pub fn point(&self, k: usize) -> [f64; 2] {
        [self.path[2 * k], self.path[2 * k + 1]]
    }

    /// Recomputes both branches from scratch under `field`.
    ///
    /// The backward branch integrates the negated field forward, which for
    /// an autonomous system is the backward-time flow. On failure the
    /// previous path is kept; the caller abandons the whole portrait
    /// recompute anyway.
    pub fn recompute(
        &mut self,
        field: &impl VectorField<f64>,
        settings: TrajectorySettings,
    ) -> Result<()> {
        let backward = sample_orbit(
            settings.solver,
            settings.steps,
            &self.x0,
            &Negated(field),
            settings.dt,
            0.0,
        )?;
        let forward = sample_orbit(
            settings.solver,
            settings.steps,
            &self.x0,
            field,
            settings.dt,
            0.0,
        )?;

        self.path.clear();
        self.path.extend_from_slice(&backward.states);
        self.path.extend_from_slice(&forward.states);
        self.branch_len = settings.steps;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Trajectory, TrajectorySettings};
    use crate::linear::PlanarLinearSystem;
    use crate::solvers::SolverKind;
    use nalgebra::Matrix2;

    fn rotation() -> PlanarLinearSystem {
        PlanarLinearSystem::new(Matrix2::new(0.0, -1.0, 1.0, 0.0))
    }

    #[test]
    fn default_settings_match_the_portrait_configuration() {
        let settings = TrajectorySettings::default();
        assert_eq!(settings.steps, 50);
        assert_eq!(settings.dt, 0.1);
        assert_eq!(settings.solver, SolverKind::Rk4);
    }

    #[test]
    fn combined_path_holds_both_branches_from_the_start_point() {
        let mut trajectory = Trajectory::new(0, [2.0, 0.0]);
        let settings = TrajectorySettings::default();
        trajectory
            .recompute(&rotation(), settings)
            .expect("rotation should integrate");

        assert_eq!(trajectory.point_count(), 2 * settings.steps);
        assert_eq!(trajectory.branch_len(), settings.steps);
        // Both branches start at x0: positions 0 and steps.
        assert_eq!(trajectory.point(0), [2.0, 0.0]);
        assert_eq!(trajectory.point(settings.steps), [2.0, 0.0]);
    }

    #[test]
    fn rotation_keeps_points_near_the_starting_radius() {
        let mut trajectory = Trajectory::new(0, [1.0, 0.0]);
        trajectory
            .recompute(&rotation(), TrajectorySettings::default())
            .expect("rotation should integrate");
        for k in 0..trajectory.point_count() {
            let [x, y] = trajectory.point(k);
            let radius = (x * x + y * y).sqrt();
            assert!((radius - 1.0).abs() < 1e-4, "radius drifted to {radius}");
        }
    }

    #[test]
    fn recompute_replaces_the_previous_path() {
        let mut trajectory = Trajectory::new(3, [1.0, 1.0]);
        let settings = TrajectorySettings::default();
        trajectory
            .recompute(&rotation(), settings)
            .expect("first recompute");
        let first = trajectory.path().to_vec();

        let saddle = PlanarLinearSystem::new(Matrix2::new(1.0, 0.0, 0.0, -1.0));
        trajectory
            .recompute(&saddle, settings)
            .expect("second recompute");
        assert_eq!(trajectory.point_count(), 2 * settings.steps);
        assert_ne!(trajectory.path(), first.as_slice());
        assert_eq!(trajectory.index(), 3);
    }

    #[test]
    fn failed_recompute_keeps_the_previous_path() {
        let mut trajectory = Trajectory::new(0, [5.0, 5.0]);
        let settings = TrajectorySettings::default();
        trajectory
            .recompute(&rotation(), settings)
            .expect("first recompute");
        let before = trajectory.path().to_vec();

        // Eigenvalue 2000 amplifies each RK4 step of size 0.1 by roughly
        // 7e7, overflowing f64 well before 50 steps.
        let explosive = PlanarLinearSystem::new(Matrix2::new(2000.0, 0.0, 0.0, 2000.0));
        assert!(trajectory.recompute(&explosive, settings).is_err());
        assert_eq!(trajectory.path(), before.as_slice());
    }
}
