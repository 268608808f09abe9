//! Models the geometry and lamp colours of a Precision Approach Path Indicator (PAPI).
//!
//! The [`glide_slope`] module holds the stateless model. The [`panel`] owns the
//! inputs the way a host user interface would, and the [`simulation`] module
//! connects both to a host through named variables.
mod approach;
pub use approach::ApproachScene;

mod error;
pub use error::{PapiError, Result};

pub mod glide_slope;
pub mod panel;
pub mod papi;
pub mod shared;
pub mod simulation;
