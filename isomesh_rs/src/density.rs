//! Boundary to the external density (noise) function.

/// A deterministic scalar function over 3D space, roughly in `[0, 1]`.
///
/// Small coordinate deltas should produce small value deltas so that linear
/// edge interpolation is meaningful. Implementations are evaluated from many
/// threads at once.
///
/// Any `Fn(f32, f32, f32) -> f32 + Sync` closure is a density:
///
/// ```
/// use isomesh_rs::DensityFn;
///
/// let plane = |_x: f32, y: f32, _z: f32| y * 0.1;
/// assert_eq!(plane.density(0.0, 5.0, 0.0), 0.5);
/// ```
pub trait DensityFn: Sync {
    /// Evaluate the field at a world-space point.
    fn density(&self, x: f32, y: f32, z: f32) -> f32;
}

impl<F> DensityFn for F
where
    F: Fn(f32, f32, f32) -> f32 + Sync,
{
    #[inline]
    fn density(&self, x: f32, y: f32, z: f32) -> f32 {
        self(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f32);

    impl DensityFn for Constant {
        fn density(&self, _x: f32, _y: f32, _z: f32) -> f32 {
            self.0
        }
    }

    fn evaluate(density: &dyn DensityFn) -> f32 {
        density.density(1.0, 2.0, 3.0)
    }

    #[test]
    fn test_closure_density() {
        let sum = |x: f32, y: f32, z: f32| x + y + z;
        assert_eq!(evaluate(&sum), 6.0);
    }

    #[test]
    fn test_struct_density() {
        assert_eq!(evaluate(&Constant(0.25)), 0.25);
    }
}
