//! Pirate treasure-map generation library
//!
//! Re-exports modules for use by the binary and tests.

pub mod ascii;
pub mod connectivity;
pub mod corners;
pub mod generate;
pub mod phrases;
pub mod render;
pub mod route;
pub mod tilemap;
