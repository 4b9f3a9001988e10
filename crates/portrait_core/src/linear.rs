use crate::error::PortraitError;
use crate::traits::VectorField;
use anyhow::Result;
use nalgebra::{Matrix2, Vector2};
use num_complex::Complex;

/// The planar linear flow x' = Ax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarLinearSystem {
    matrix: Matrix2<f64>,
}

impl PlanarLinearSystem {
    pub fn new(matrix: Matrix2<f64>) -> Self {
        Self { matrix }
    }

    /// The canonical representative of the (trace, determinant) class.
    pub fn from_classification(trace: f64, det: f64) -> Result<Self> {
        Ok(Self::new(canonical_matrix(trace, det)?))
    }

    /// The zero field; every point is an equilibrium.
    pub fn zero() -> Self {
        Self::new(Matrix2::zeros())
    }

    pub fn matrix(&self) -> &Matrix2<f64> {
        &self.matrix
    }

    pub fn trace(&self) -> f64 {
        self.matrix.trace()
    }

    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }
}

impl VectorField<f64> for PlanarLinearSystem {
    fn dimension(&self) -> usize {
        2
    }

    fn eval(&self, _t: f64, x: &[f64], out: &mut [f64]) {
        let v = self.matrix * Vector2::new(x[0], x[1]);
        out[0] = v.x;
        out[1] = v.y;
    }
}

/// The canonical 2x2 matrix for a (trace, determinant) pair.
///
/// Strictly positive discriminant (distinct real eigenvalues) takes the
/// diagonal form; everything else, including the repeated-eigenvalue
/// boundary, takes the rotational form.
pub fn canonical_matrix(trace: f64, det: f64) -> Result<Matrix2<f64>> {
    let disc = trace * trace - 4.0 * det;
    if disc > 0.0 {
        Ok(diagonal_matrix(trace, det))
    } else {
        rotational_matrix(trace, det)
    }
}

/// diag(ev1, ev2): the axes are the eigendirections.
///
/// Only meaningful for trace^2 - 4 det >= 0; callers on the other branch
/// want [`rotational_matrix`].
pub fn diagonal_matrix(trace: f64, det: f64) -> Matrix2<f64> {
    let radical = (trace * trace - 4.0 * det).sqrt();
    let ev1 = (trace + radical) / 2.0;
    let ev2 = (trace - radical) / 2.0;
    Matrix2::new(ev1, 0.0, 0.0, ev2)
}

/// [[a, -b], [b, a]] with a = trace/2, b = sqrt(det - a^2): the unique
/// matrix of that trace and determinant with 90-degree rotational symmetry.
///
/// Fails with [`PortraitError::InvalidClassification`] when the radicand is
/// negative instead of letting NaN reach the integration pipeline.
pub fn rotational_matrix(trace: f64, det: f64) -> Result<Matrix2<f64>> {
    let a = trace / 2.0;
    let radicand = det - a * a;
    if radicand < 0.0 {
        return Err(PortraitError::InvalidClassification { trace, det }.into());
    }
    let b = radicand.sqrt();
    Ok(Matrix2::new(a, -b, b, a))
}

/// The eigenvalue pair (trace ± sqrt(disc)) / 2; complex below the
/// discriminant parabola.
pub fn eigenvalues(trace: f64, det: f64) -> [Complex<f64>; 2] {
    let disc = trace * trace - 4.0 * det;
    let half_trace = trace / 2.0;
    if disc >= 0.0 {
        let r = disc.sqrt() / 2.0;
        [
            Complex::new(half_trace + r, 0.0),
            Complex::new(half_trace - r, 0.0),
        ]
    } else {
        let i = (-disc).sqrt() / 2.0;
        [
            Complex::new(half_trace, i),
            Complex::new(half_trace, -i),
        ]
    }
}
