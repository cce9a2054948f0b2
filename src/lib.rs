//! WCAG 2.0 contrast checking with a lightness sweep.
//!
//! [`evaluate`] scores a foreground/background pair, then walks every lightness of
//! the foreground's hue and saturation and groups the results into compliance bands.

pub mod api;
pub mod color;
pub mod config;
pub mod contrast;
pub mod error;
pub mod sweep;
pub mod templates;
pub mod tier;

pub use color::{Hsl, Rgb};
pub use contrast::contrast_ratio;
pub use error::{ContrastError, Result};
pub use sweep::{evaluate, Band, SweepResult, SweepSample};
pub use tier::{classify, ComplianceTier};
