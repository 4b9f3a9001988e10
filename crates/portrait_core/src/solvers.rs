use crate::traits::{Scalar, Steppable, VectorField};
use serde::{Deserialize, Serialize};

/// Forward Euler stepper: x_{k+1} = x_k + dt * f(t_k, x_k).
/// First-order accurate.
pub struct Euler<T: Scalar> {
    deriv: Vec<T>,
}

impl<T: Scalar> Euler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            deriv: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Euler<T> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T) {
        let t0 = *t;

        field.eval(t0, state, &mut self.deriv);
        for i in 0..state.len() {
            state[i] = state[i] + dt * self.deriv[i];
        }

        *t = t0 + dt;
    }
}

/// Averaged Euler stepper:
/// x_{k+1} = x_k + dt * (f(t_k, x_k) + f(t_k + dt, x_k + dt * x_k)) / 2.
///
/// The second stage is evaluated at the scaled state x + dt * x, NOT at the
/// Euler-predicted state x + dt * f(t, x). Textbook Heun uses the latter;
/// this stepper keeps the former on purpose, and a test pins the argument.
pub struct AveragedEuler<T: Scalar> {
    first: Vec<T>,
    second: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> AveragedEuler<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::zero();
        Self {
            first: vec![z; dim],
            second: vec![z; dim],
            tmp: vec![z; dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for AveragedEuler<T> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T) {
        let half = T::from_f64(0.5).unwrap();
        let t0 = *t;

        field.eval(t0, state, &mut self.first);

        // Second stage at the scaled state, one dt later.
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * state[i];
        }
        field.eval(t0 + dt, &self.tmp, &mut self.second);

        for i in 0..state.len() {
            state[i] = state[i] + dt * half * (self.first[i] + self.second[i]);
        }

        *t = t0 + dt;
    }
}

/// Classic Runge-Kutta 4th order stepper. Fourth-order accurate.
pub struct Rk4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> Rk4<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::zero();
        Self {
            k1: vec![z; dim],
            k2: vec![z; dim],
            k3: vec![z; dim],
            k4: vec![z; dim],
            tmp: vec![z; dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Rk4<T> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T) {
        let half = T::from_f64(0.5).unwrap();
        let sixth = T::from_f64(1.0 / 6.0).unwrap();
        let two = T::from_f64(2.0).unwrap();

        let t0 = *t;

        // k1 = f(t, y)
        field.eval(t0, state, &mut self.k1);

        // k2 = f(t + dt/2, y + dt*k1/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k1[i] * half;
        }
        field.eval(t0 + dt * half, &self.tmp, &mut self.k2);

        // k3 = f(t + dt/2, y + dt*k2/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k2[i] * half;
        }
        field.eval(t0 + dt * half, &self.tmp, &mut self.k3);

        // k4 = f(t + dt, y + dt*k3)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k3[i];
        }
        field.eval(t0 + dt, &self.tmp, &mut self.k4);

        // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
        for i in 0..state.len() {
            state[i] = state[i]
                + dt * sixth * (self.k1[i] + two * self.k2[i] + two * self.k3[i] + self.k4[i]);
        }

        *t = t0 + dt;
    }
}

/// Stepping-method selector, chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    Euler,
    AveragedEuler,
    Rk4,
}

impl SolverKind {
    pub(crate) fn build<T: Scalar>(self, dim: usize) -> Stepper<T> {
        match self {
            SolverKind::Euler => Stepper::Euler(Euler::new(dim)),
            SolverKind::AveragedEuler => Stepper::AveragedEuler(AveragedEuler::new(dim)),
            SolverKind::Rk4 => Stepper::Rk4(Rk4::new(dim)),
        }
    }
}

pub(crate) enum Stepper<T: Scalar> {
    Euler(Euler<T>),
    AveragedEuler(AveragedEuler<T>),
    Rk4(Rk4<T>),
}

impl<T: Scalar> Stepper<T> {
    pub(crate) fn step(
        &mut self,
        field: &impl VectorField<T>,
        t: &mut T,
        state: &mut [T],
        dt: T,
    ) {
        match self {
            Stepper::Euler(s) => s.step(field, t, state, dt),
            Stepper::AveragedEuler(s) => s.step(field, t, state, dt),
            Stepper::Rk4(s) => s.step(field, t, state, dt),
        }
    }
}
