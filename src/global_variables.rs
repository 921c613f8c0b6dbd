pub const CASE_NAME: &'static str = "Darcy Case";

pub type Float = f64;

pub const D: usize = 3;

pub const CELL_SIZE_MULTIPLIER: Float = 1.0;

pub const DEFAULT_CONDUCTIVITY: Float = 1.5;

pub const DEFAULT_STORATIVITY: Float = 7.5e-3;

pub const DEFAULT_RECHARGE: Float = 0.0;

pub const RELAXATION: Float = 0.0;

pub const UNDER_RELAXATION: Float = 1.0;

pub const TOLERANCE_PRESSURE: Float = 1e-3;

pub const MAX_ITER: usize = 10_000;

pub const RESIDUAL_CHECK_INTERVAL: usize = 10;

pub const CONV_LOG_INTERVAL: usize = 10;

pub const DEM_STEPS_PER_FLUID_STEP: usize = 1;

pub const SAMPLED_POROSITY_PRECISION: usize = 10;
