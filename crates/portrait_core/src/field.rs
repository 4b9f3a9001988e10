use crate::sampling::Domain;
use crate::traits::VectorField;
use anyhow::{bail, Result};
use serde::Serialize;

/// Vector-field components sampled on a regular display lattice, for
/// quiver-style rendering.
///
/// `u` and `v` are flat and row-major: the derivative at (xs[j], ys[i]) is
/// (u[i * nx + j], v[i * nx + j]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGrid {
    pub nx: usize,
    pub ny: usize,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

/// Evaluates `field` at every point of a density x density grid spanning
/// the domain, boundary included.
///
/// The all-zero field is a normal result; nothing special happens for it.
pub fn evaluate_field_grid(
    field: &impl VectorField<f64>,
    domain: Domain,
    density: usize,
) -> Result<FieldGrid> {
    domain.validate()?;
    if density < 2 {
        bail!("Field grid needs at least 2 samples per axis.");
    }
    if field.dimension() != 2 {
        bail!(
            "Field grid evaluation requires a planar field, got dimension {}.",
            field.dimension()
        );
    }

    let xs = axis(domain.xmin, domain.xmax, density);
    let ys = axis(domain.ymin, domain.ymax, density);

    let mut u = Vec::with_capacity(density * density);
    let mut v = Vec::with_capacity(density * density);
    let mut out = [0.0; 2];
    for &y in &ys {
        for &x in &xs {
            field.eval(0.0, &[x, y], &mut out);
            u.push(out[0]);
            v.push(out[1]);
        }
    }

    Ok(FieldGrid {
        nx: density,
        ny: density,
        xs,
        ys,
        u,
        v,
    })
}

/// Evenly spaced samples of [min, max] with the endpoint landing exactly on
/// max.
fn axis(min: f64, max: f64, count: usize) -> Vec<f64> {
    let step = (max - min) / (count - 1) as f64;
    (0..count)
        .map(|k| {
            if k == count - 1 {
                max
            } else {
                min + step * k as f64
            }
        })
        .collect()
}
