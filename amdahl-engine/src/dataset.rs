// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! The predefined GPU workload: four subsystems of a GPU, the share of frame
//! rendering time each accounts for and how much faster each could be made.

use std::sync::Arc;

use crate::component::Component;

pub const CUDA_CORES: &str = "CUDA cores";
pub const VRAM: &str = "VRAM";
pub const TEXTURE_UNITS: &str = "Texture units";
pub const NVLINK: &str = "NVLink interconnect";

pub const CUDA_CORES_FRACTION: f64 = 0.35;
pub const CUDA_CORES_FACTOR: f64 = 5.0;

pub const VRAM_FRACTION: f64 = 0.20;
pub const VRAM_FACTOR: f64 = 3.0;

pub const TEXTURE_UNITS_FRACTION: f64 = 0.25;
pub const TEXTURE_UNITS_FACTOR: f64 = 7.0;

pub const NVLINK_FRACTION: f64 = 0.20;
pub const NVLINK_FACTOR: f64 = 10.0;

/// Frame rendering time before any optimization, in milliseconds.
pub const ORIGINAL_RENDER_TIME_MS: f64 = 50.0;

/// A 30% overall speedup.
pub const TARGET_SPEEDUP: f64 = 1.30;

/// The predefined components by role.
#[derive(Clone, Debug, PartialEq)]
pub struct GpuComponents {
    pub cuda_cores: Arc<Component>,
    pub vram: Arc<Component>,
    pub texture_units: Arc<Component>,
    pub nvlink: Arc<Component>,
}

impl GpuComponents {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cuda_cores: literal(CUDA_CORES, CUDA_CORES_FRACTION, CUDA_CORES_FACTOR),
            vram: literal(VRAM, VRAM_FRACTION, VRAM_FACTOR),
            texture_units: literal(
                TEXTURE_UNITS,
                TEXTURE_UNITS_FRACTION,
                TEXTURE_UNITS_FACTOR,
            ),
            nvlink: literal(NVLINK, NVLINK_FRACTION, NVLINK_FACTOR),
        }
    }

    /// All four, in dataset order.
    #[must_use]
    pub fn all(&self) -> Vec<Arc<Component>> {
        vec![
            self.cuda_cores.clone(),
            self.vram.clone(),
            self.texture_units.clone(),
            self.nvlink.clone(),
        ]
    }
}

impl Default for GpuComponents {
    fn default() -> Self {
        Self::new()
    }
}

fn literal(name: &str, fraction: f64, factor: f64) -> Arc<Component> {
    Arc::new(Component::from_literal(name, fraction, factor))
}

/// The four predefined components, always in the same order.
#[must_use]
pub fn predefined_components() -> Vec<Arc<Component>> {
    GpuComponents::new().all()
}
