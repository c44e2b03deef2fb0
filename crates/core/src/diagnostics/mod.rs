//! Diagnostic fields derived from velocity and stream function

pub mod checks;
pub mod okubo_weiss;
pub mod vorticity;

pub use checks::{divergence, CheckSummary, NumericalChecks, DEFAULT_TOLERANCE};
pub use okubo_weiss::{
    okubo_weiss, partition_regimes, second_partials, FlowRegime, RegimePartition, SecondPartials,
};
pub use vorticity::vorticity;
