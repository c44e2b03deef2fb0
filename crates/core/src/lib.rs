//! Stream Field Core Library
//!
//! Synthesizes random periodic 2D stream functions and derives spectral
//! diagnostics from them: a divergence-free velocity field, its vorticity,
//! and the Okubo–Weiss invariant.
//!
//! ## Grid convention
//!
//! Fields are N×N, row-major, unit-spaced and periodic along both axes.
//! Rows index y and columns index x.
//!
//! ## Differentiation paths
//!
//! - Row/column-wise 1D transforms: [`spectral::ddx`], [`spectral::ddy`]
//! - Single 2D transform: [`diagnostics::second_partials`]
//!
//! Both share one wavenumber convention ([`spectral::wavenumber`]) and agree
//! to rounding error.
//!
//! ## Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use stream_field_core::{generate_stream_function, FlowDiagnostics};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let psi = generate_stream_function(32, 1.0, &mut rng).unwrap();
//! let flow = FlowDiagnostics::compute(psi).unwrap();
//! assert!(flow.report().checks.max_continuity < 1e-10);
//! ```

pub mod diagnostics;
pub mod error;
pub mod field;
pub mod flow;
pub mod spectral;
pub mod stream_function;

pub use diagnostics::{okubo_weiss, second_partials, vorticity, NumericalChecks, SecondPartials};
pub use error::FieldError;
pub use field::{FieldData, VectorField};
pub use flow::{speed, velocity_from_stream_function, FlowDiagnostics, FlowReport};
pub use spectral::{ddx, ddy, spectral_derivative};
pub use stream_function::{
    generate_stream_function, StreamFunctionConfig, StreamFunctionGenerator,
};
