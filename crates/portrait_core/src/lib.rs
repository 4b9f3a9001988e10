//! Numerical engine for phase portraits of planar linear systems x' = Ax.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric abstraction), `VectorField` (the flow's
//!   right-hand side), `Steppable` (fixed-step advancement), `Negated`
//!   (backward-time wrapper).
//! - **Solvers**: fixed-step integrators (Euler, averaged Euler, RK4)
//!   selected by [`solvers::SolverKind`].
//! - **Orbit**: the sampling driver that turns a stepper into a sequence of
//!   states, failing fast when the state leaves the finite range.
//! - **Sampling**: Cartesian and polar initial-condition grids over a
//!   rectangular domain.
//! - **Linear**: trace/determinant classification into a canonical matrix,
//!   and the planar system it drives.
//! - **Trajectory / Field**: the per-initial-condition paths and the
//!   quiver grid a renderer consumes.

pub mod error;
pub mod field;
pub mod linear;
pub mod orbit;
pub mod sampling;
pub mod solvers;
pub mod traits;
pub mod trajectory;
