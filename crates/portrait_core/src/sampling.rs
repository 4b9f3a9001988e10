use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Rectangular region of the phase plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Domain {
    pub fn validate(&self) -> Result<()> {
        for bound in [self.xmin, self.xmax, self.ymin, self.ymax] {
            if !bound.is_finite() {
                bail!("Domain bounds must be finite.");
            }
        }
        if self.xmax <= self.xmin || self.ymax <= self.ymin {
            bail!("Domain requires max > min on each axis.");
        }
        Ok(())
    }

    /// Largest radius the polar strategy may reach: the smallest absolute
    /// bound, so every ring stays inside the box whenever the box contains
    /// the origin.
    fn limiting_radius(&self) -> f64 {
        [self.xmin, self.xmax, self.ymin, self.ymax]
            .into_iter()
            .map(f64::abs)
            .fold(f64::INFINITY, f64::min)
    }
}

/// How initial-condition points are distributed over a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Evenly spaced interior grid, boundary excluded.
    Cartesian,
    /// Concentric rings: denser near the center, sparse at the rim.
    Polar,
}

/// Produces the n x n initial-condition points for a strategy over a domain.
pub fn sample_initial_points(
    strategy: SamplingStrategy,
    domain: Domain,
    n: usize,
) -> Result<Vec<[f64; 2]>> {
    domain.validate()?;
    if n == 0 {
        bail!("Sampling requires at least one point per axis.");
    }
    Ok(match strategy {
        SamplingStrategy::Cartesian => cartesian_points(domain, n),
        SamplingStrategy::Polar => polar_points(domain, n),
    })
}

/// n + 2 subdivisions per axis with the two boundary rows trimmed: the
/// strictly interior n x n grid. Outer loop over y, inner over x.
fn cartesian_points(domain: Domain, n: usize) -> Vec<[f64; 2]> {
    let xs = interior_axis(domain.xmin, domain.xmax, n);
    let ys = interior_axis(domain.ymin, domain.ymax, n);
    let mut points = Vec::with_capacity(n * n);
    for &y in &ys {
        for &x in &xs {
            points.push([x, y]);
        }
    }
    points
}

fn interior_axis(min: f64, max: f64, n: usize) -> Vec<f64> {
    let step = (max - min) / (n + 1) as f64;
    (1..=n).map(|k| min + step * k as f64).collect()
}

/// n radii from zero up to (and excluding) the limiting radius, times n
/// angles from 0 up to (and excluding) 2π. The zero radius is kept, so the
/// origin appears once per angle.
fn polar_points(domain: Domain, n: usize) -> Vec<[f64; 2]> {
    let dr = domain.limiting_radius() / n as f64;
    let dtheta = TAU / n as f64;
    let mut points = Vec::with_capacity(n * n);
    for i in 0..n {
        let r = dr * i as f64;
        for j in 0..n {
            let theta = dtheta * j as f64;
            points.push([r * theta.cos(), r * theta.sin()]);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::{sample_initial_points, Domain, SamplingStrategy};

    fn symmetric_box() -> Domain {
        Domain {
            xmin: -10.0,
            xmax: 10.0,
            ymin: -10.0,
            ymax: 10.0,
        }
    }

    #[test]
    fn cartesian_five_per_axis_yields_25_interior_points() {
        let points = sample_initial_points(SamplingStrategy::Cartesian, symmetric_box(), 5)
            .expect("sampling should succeed");
        assert_eq!(points.len(), 25);
        for [x, y] in &points {
            assert!(x.abs() < 10.0, "x = {x} touches the boundary");
            assert!(y.abs() < 10.0, "y = {y} touches the boundary");
        }
    }

    #[test]
    fn cartesian_grid_is_evenly_spaced_and_y_major() {
        let points = sample_initial_points(SamplingStrategy::Cartesian, symmetric_box(), 2)
            .expect("sampling should succeed");
        // 4 subdivisions of [-10, 10] leave interior values at ±10/3.
        let lo = -10.0 + 20.0 / 3.0;
        let hi = 10.0 - 20.0 / 3.0;
        let expected = [[lo, lo], [hi, lo], [lo, hi], [hi, hi]];
        assert_eq!(points.len(), 4);
        for (point, want) in points.iter().zip(expected.iter()) {
            assert!((point[0] - want[0]).abs() < 1e-12);
            assert!((point[1] - want[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn polar_rings_stay_inside_the_limiting_radius() {
        let domain = Domain {
            xmin: -4.0,
            xmax: 10.0,
            ymin: -10.0,
            ymax: 10.0,
        };
        let n = 5;
        let points = sample_initial_points(SamplingStrategy::Polar, domain, n)
            .expect("sampling should succeed");
        assert_eq!(points.len(), n * n);
        // Limiting radius is 4; the outermost ring sits at 4 * (n-1)/n.
        let outer = 4.0 * (n - 1) as f64 / n as f64;
        for [x, y] in &points {
            assert!((x * x + y * y).sqrt() <= outer + 1e-12);
        }
        // The zero radius contributes one origin point per angle.
        for point in &points[..n] {
            assert_eq!(*point, [0.0, 0.0]);
        }
    }

    #[test]
    fn rejects_degenerate_domains_and_counts() {
        let flipped = Domain {
            xmin: 1.0,
            xmax: -1.0,
            ymin: -1.0,
            ymax: 1.0,
        };
        assert!(sample_initial_points(SamplingStrategy::Cartesian, flipped, 5).is_err());

        let infinite = Domain {
            xmin: f64::NEG_INFINITY,
            xmax: 1.0,
            ymin: -1.0,
            ymax: 1.0,
        };
        assert!(sample_initial_points(SamplingStrategy::Cartesian, infinite, 5).is_err());

        assert!(sample_initial_points(SamplingStrategy::Polar, symmetric_box(), 0).is_err());
    }
}
