//! # Config Crate
//!
//! Centralized configuration constants for the marker mesh pipeline.
//! Tessellation defaults, tolerances and safety limits live here so the
//! geometry crates never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_SPHERE_LATITUDES, default_longitudes};
//!
//! let latitudes = DEFAULT_SPHERE_LATITUDES;
//! let longitudes = default_longitudes(latitudes);
//! assert_eq!(longitudes, latitudes * 2);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure values and helpers
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
