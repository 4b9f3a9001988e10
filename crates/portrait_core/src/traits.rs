use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types usable as state components. Must support floating-point
/// arithmetic, debug printing, and conversion from f64 for method
/// coefficients.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A vector field driving a flow x' = f(t, x).
///
/// Autonomous fields simply ignore `t`; the steppers keep the time
/// bookkeeping t_{k+1} = t_k + dt either way.
pub trait VectorField<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the derivative at (t, x).
    /// out: buffer to write dx/dt into
    fn eval(&self, t: T, x: &[T], out: &mut [T]);
}

/// A trait for steppers that advance a state by one fixed step.
pub trait Steppable<T: Scalar> {
    /// Performs one step of size dt.
    /// t: current time (updated after step)
    /// state: current state (updated after step)
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T);
}

/// Borrowing wrapper that flips the sign of a field.
///
/// For an autonomous system, integrating forward under `Negated(f)` is the
/// backward-time flow of `f`.
pub struct Negated<'a, F>(pub &'a F);

impl<T: Scalar, F: VectorField<T>> VectorField<T> for Negated<'_, F> {
    fn dimension(&self) -> usize {
        self.0.dimension()
    }

    fn eval(&self, t: T, x: &[T], out: &mut [T]) {
        self.0.eval(t, x, out);
        for value in out.iter_mut() {
            *value = -*value;
        }
    }
}
