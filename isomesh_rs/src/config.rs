//! Mesh generation configuration.

use isomesh_core::{lattice_len, vertex_slot_count, MAX_RESOLUTION};

use crate::error::{IsoMeshError, Result};
use crate::field::SamplingParams;

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Create a new color.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise linear interpolation, `t` clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Height gradient used to color vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorGradient {
    /// Color at `y = 0`.
    pub low: Rgba,
    /// Color at `y = grid_size`.
    pub high: Rgba,
}

impl ColorGradient {
    /// Create a gradient between two colors.
    #[inline]
    pub const fn new(low: Rgba, high: Rgba) -> Self {
        Self { low, high }
    }

    /// Color for a vertex at height `y` in a grid of `grid_size` cells.
    #[inline]
    pub fn at_height(&self, y: f32, grid_size: u32) -> Rgba {
        self.low.lerp(self.high, y / grid_size as f32)
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self {
            low: Rgba::new(0.20, 0.35, 0.15, 1.0),
            high: Rgba::new(0.95, 0.95, 0.95, 1.0),
        }
    }
}

/// Parameters of one mesh regeneration (immutable once handed to `generate`).
///
/// # Example
///
/// ```
/// use isomesh_rs::MeshConfig;
///
/// let config = MeshConfig::new(48)
///     .with_surface_level(0.45)
///     .with_noise_scale(0.08)
///     .with_scroll(2.0)
///     .at_time(1.5);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.effective_scroll_offset(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshConfig {
    /// Cells per axis (`N`). The field holds `(N + 1)^3` samples.
    pub grid_size: u32,
    /// Surface threshold in `[0, 1]`; samples below it are inside.
    pub surface_level: f32,
    /// Sampling frequency in `[0, 1]`: world step per lattice step.
    pub noise_scale: f32,
    /// Whether the sampling window scrolls over time.
    pub scroll_enabled: bool,
    /// Scroll distance per second, `>= 0`.
    pub scroll_speed: f32,
    /// Accumulated scroll distance; ignored when scrolling is disabled.
    pub scroll_offset: f32,
    /// Vertex color gradient over height.
    pub colors: ColorGradient,
    /// Worker threads for both phases; 0 uses rayon's global pool.
    pub threads: usize,
}

impl MeshConfig {
    /// Create a configuration with default parameters for `grid_size` cells per axis.
    pub fn new(grid_size: u32) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Set the surface threshold.
    pub fn with_surface_level(mut self, surface_level: f32) -> Self {
        self.surface_level = surface_level;
        self
    }

    /// Set the sampling frequency.
    pub fn with_noise_scale(mut self, noise_scale: f32) -> Self {
        self.noise_scale = noise_scale;
        self
    }

    /// Enable scrolling at `speed` units per second.
    pub fn with_scroll(mut self, speed: f32) -> Self {
        self.scroll_enabled = true;
        self.scroll_speed = speed;
        self
    }

    /// Set the accumulated scroll offset directly.
    pub fn with_scroll_offset(mut self, offset: f32) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Set the vertex color gradient.
    pub fn with_colors(mut self, colors: ColorGradient) -> Self {
        self.colors = colors;
        self
    }

    /// Run both phases on a dedicated pool of `threads` workers (0 = global pool).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Derive the scroll offset from the elapsed time in seconds.
    ///
    /// With scrolling disabled the offset is reset to zero.
    pub fn at_time(mut self, elapsed_secs: f32) -> Self {
        self.scroll_offset = if self.scroll_enabled {
            self.scroll_speed * elapsed_secs
        } else {
            0.0
        };
        self
    }

    /// Scroll offset actually applied to sampling.
    #[inline]
    pub fn effective_scroll_offset(&self) -> f32 {
        if self.scroll_enabled {
            self.scroll_offset
        } else {
            0.0
        }
    }

    /// Sampling parameters for the scalar field.
    #[inline]
    pub fn sampling(&self) -> SamplingParams {
        let offset = self.effective_scroll_offset();
        SamplingParams {
            scale: self.noise_scale,
            offset_x: offset,
            offset_z: offset,
        }
    }

    /// Number of cells (`N^3`).
    #[inline]
    pub const fn cell_count(&self) -> usize {
        lattice_len(self.grid_size)
    }

    /// Number of reserved vertex slots (`N^3 * 12`).
    #[inline]
    pub const fn vertex_slots(&self) -> usize {
        vertex_slot_count(self.grid_size)
    }

    /// Check every parameter against its accepted range.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 1 {
            return Err(IsoMeshError::invalid("grid_size", "must be at least 1"));
        }
        if self.grid_size > MAX_RESOLUTION {
            return Err(IsoMeshError::invalid(
                "grid_size",
                format!(
                    "must not exceed {} (got {}); vertex slots are u32-indexed",
                    MAX_RESOLUTION, self.grid_size
                ),
            ));
        }
        check_unit("surface_level", self.surface_level)?;
        check_unit("noise_scale", self.noise_scale)?;
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            return Err(IsoMeshError::invalid(
                "scroll_speed",
                format!("must be finite and >= 0 (got {})", self.scroll_speed),
            ));
        }
        if !self.scroll_offset.is_finite() {
            return Err(IsoMeshError::invalid("scroll_offset", "must be finite"));
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(IsoMeshError::invalid(
            field,
            format!("must be within [0, 1] (got {})", value),
        ))
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            grid_size: 32,
            surface_level: 0.5,
            noise_scale: 0.1,
            scroll_enabled: false,
            scroll_speed: 1.0,
            scroll_offset: 0.0,
            colors: ColorGradient::default(),
            threads: 0,
        }
    }
}
