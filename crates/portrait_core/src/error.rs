use thiserror::Error;

/// Failure kinds surfaced by the portrait engine.
///
/// These travel inside `anyhow::Error`, so call sites that need to branch on
/// the kind can downcast; everything else just propagates the message.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PortraitError {
    /// The rotational-form construction would take the square root of a
    /// negative radicand; no real matrix of that form has this trace and
    /// determinant.
    #[error("no real rotational-form matrix for trace {trace}, determinant {det}")]
    InvalidClassification { trace: f64, det: f64 },

    /// The vector field drove the state out of the finite range during
    /// integration. The whole recompute for that initial condition is
    /// abandoned.
    #[error("integration left the finite domain at step {step} (t = {time})")]
    IntegrationDomain { step: usize, time: f64 },
}
