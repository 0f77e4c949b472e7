//! Compiled default values for every config section.

pub const DEFAULT_DISCOVERY_THREADS: usize = 0;

pub const DEFAULT_PC_ALPHA: f64 = 0.01;
pub const DEFAULT_PC_MAX_CONDITION_SET: usize = 3;

pub const DEFAULT_HILL_CLIMB_MAX_PARENTS: usize = 4;
pub const DEFAULT_HILL_CLIMB_MAX_ITERATIONS: usize = 500;

pub const DEFAULT_NOTEARS_LAMBDA: f64 = 0.05;
pub const DEFAULT_NOTEARS_W_THRESHOLD: f64 = 0.3;
pub const DEFAULT_NOTEARS_MAX_OUTER_ITERATIONS: usize = 20;
pub const DEFAULT_NOTEARS_INNER_ITERATIONS: usize = 300;
pub const DEFAULT_NOTEARS_H_TOLERANCE: f64 = 1e-8;
pub const DEFAULT_NOTEARS_RHO_MAX: f64 = 1e16;

pub const DEFAULT_LOG_LEVEL: &str = "info";
