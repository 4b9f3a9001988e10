use crate::error::PortraitError;
use crate::solvers::SolverKind;
use crate::traits::VectorField;
use anyhow::{bail, Result};
use serde::Serialize;

/// A fixed-step sampled solution of x' = f(t, x).
///
/// States are stored flat in step order: state k occupies
/// `states[k * dim..(k + 1) * dim]` and was reached at `times[k]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Orbit {
    pub dim: usize,
    pub states: Vec<f64>,
    pub times: Vec<f64>,
}

impl Orbit {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn state(&self, k: usize) -> &[f64] {
        &self.states[k * self.dim..(k + 1) * self.dim]
    }
}

/// Samples `steps` states of the flow starting from `x0`; the first state is
/// `x0` itself, followed by `steps - 1` integration steps.
///
/// `dt` may be negative to run backward in time. A fresh stepper is built per
/// call, so equal inputs always reproduce the same orbit bit for bit.
pub fn sample_orbit(
    solver: SolverKind,
    steps: usize,
    x0: &[f64],
    field: &impl VectorField<f64>,
    dt: f64,
    t0: f64,
) -> Result<Orbit> {
    if steps == 0 {
        bail!("Orbit sampling requires at least one state.");
    }
    if x0.is_empty() {
        bail!("Initial state must have positive dimension.");
    }
    if x0.len() != field.dimension() {
        bail!(
            "Initial state dimension mismatch. Expected {}, got {}.",
            field.dimension(),
            x0.len()
        );
    }
    if !dt.is_finite() || dt == 0.0 {
        bail!("Step size dt must be finite and nonzero.");
    }
    if !t0.is_finite() {
        bail!("Initial time must be finite.");
    }

    let dim = x0.len();
    let mut stepper = solver.build(dim);
    let mut state = x0.to_vec();
    let mut t = t0;

    let mut states = Vec::with_capacity(steps * dim);
    let mut times = Vec::with_capacity(steps);
    states.extend_from_slice(&state);
    times.push(t);

    for step in 1..steps {
        stepper.step(field, &mut t, &mut state, dt);
        if state.iter().any(|v| !v.is_finite()) {
            return Err(PortraitError::IntegrationDomain { step, time: t }.into());
        }
        states.extend_from_slice(&state);
        times.push(t);
    }

    Ok(Orbit { dim, states, times })
}
