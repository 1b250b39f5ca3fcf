//! Cuboctahedron vertex generation.
//!
//! Vertices are laid out on a close-packed lattice spanned by
//!
//! ```text
//! v1 = (1,   0,     0   )
//! v2 = (1/2, √3/2,  0   )
//! v3 = (1/2, -√3/6, √6/3)
//! ```
//!
//! The upper half (layers `z = 0..=n`) is emitted first, then layers
//! `z = 1..=n` again under the mirror `(x, y, z) -> (x, -y, -z)` so the
//! equatorial layer is produced exactly once. Emission order is part of the
//! contract: cell indices are positions in this sequence.

use crate::error::{ensure_positive, Result, SimError};
use cubolife_data::Point3;

/// Lattice basis, computed with the same operation order on every call so
/// coordinates are reproducible bit for bit.
#[derive(Debug, Clone, Copy)]
struct Basis {
    v1: [f64; 3],
    v2: [f64; 3],
    v3: [f64; 3],
}

impl Basis {
    fn close_packed() -> Self {
        let sqrt3 = 3f64.sqrt();
        let sqrt6 = 6f64.sqrt();
        Self {
            v1: [1.0, 0.0, 0.0],
            v2: [0.5, sqrt3 / 2.0, 0.0],
            v3: [0.5, -sqrt3 / 6.0, sqrt6 / 3.0],
        }
    }

    /// `spacing * ((x*v1 + y*v2 + z*v3) - n*e_x)`.
    #[inline]
    fn point(&self, x: i64, y: i64, z: i64, shells: i64, spacing: f64) -> Point3 {
        let (xf, yf, zf) = (x as f64, y as f64, z as f64);
        let component = |axis: usize| xf * self.v1[axis] + yf * self.v2[axis] + zf * self.v3[axis];
        Point3::new(
            spacing * (component(0) - shells as f64),
            spacing * component(1),
            spacing * component(2),
        )
    }
}

/// Largest shell count `generate` accepts (about 56 million vertices).
pub const MAX_SHELLS: u32 = 256;

/// Number of vertices `generate(shells, _)` produces: 1, 13, 55, 147, 309, ...
///
/// Saturates at `usize::MAX` for counts that do not fit.
#[must_use]
pub fn expected_vertex_count(shells: u32) -> usize {
    let n = u128::from(shells);
    let count = (10 * n * n * n + 15 * n * n + 11 * n + 3) / 3;
    usize::try_from(count).unwrap_or(usize::MAX)
}

/// Rejects shell counts above [`MAX_SHELLS`].
pub(crate) fn ensure_shells(shells: u32) -> Result<u32> {
    if shells > MAX_SHELLS {
        return Err(SimError::invalid(
            "shells",
            format!("must be at most {MAX_SHELLS}, got {shells}"),
        ));
    }
    Ok(shells)
}

/// Generates the ordered vertex sequence of a cuboctahedron with `shells`
/// shells around a central vertex.
///
/// # Errors
/// `InvalidParameter` when `spacing` is not a finite positive number or
/// `shells` exceeds [`MAX_SHELLS`].
pub fn generate(shells: u32, spacing: f64) -> Result<Vec<Point3>> {
    ensure_positive("spacing", spacing)?;
    ensure_shells(shells)?;
    let basis = Basis::close_packed();
    let mut points = Vec::with_capacity(expected_vertex_count(shells));

    for z in 0..=shells {
        emit_layer(&basis, z, shells, spacing, &mut points, |p| p);
    }
    for z in 1..=shells {
        emit_layer(&basis, z, shells, spacing, &mut points, |p| p.mirrored());
    }

    debug_assert_eq!(points.len(), expected_vertex_count(shells));
    Ok(points)
}

/// Generates a single upper-half layer, unmirrored.
///
/// # Errors
/// `InvalidParameter` when `spacing` is invalid, `shells` exceeds
/// [`MAX_SHELLS`] or `z > shells`.
pub fn generate_layer(z: u32, shells: u32, spacing: f64) -> Result<Vec<Point3>> {
    ensure_positive("spacing", spacing)?;
    ensure_shells(shells)?;
    if z > shells {
        return Err(SimError::invalid(
            "z",
            format!("layer {z} exceeds shell count {shells}"),
        ));
    }
    let mut points = Vec::new();
    emit_layer(&Basis::close_packed(), z, shells, spacing, &mut points, |p| p);
    Ok(points)
}

fn emit_layer<F>(
    basis: &Basis,
    z: u32,
    shells: u32,
    spacing: f64,
    out: &mut Vec<Point3>,
    map: F,
) where
    F: Fn(Point3) -> Point3,
{
    let n = i64::from(shells);
    let z = i64::from(z);

    for y in -(n - z)..=n {
        let (start, end) = if y > 0 {
            (0, 2 * n + 1 - z - y)
        } else {
            (-y, 2 * n + 1 - z)
        };
        for x in start..end {
            out.push(map(basis.point(x, y, z, n, spacing)));
        }
    }
}
