//! SI quantity newtypes shared by the dust generator crates.
//!
//! Every quantity is stored in its SI base unit and serializes as a bare
//! number, so configuration files and exports stay plain JSON/CSV.

pub mod density;
pub mod length;
pub mod mass;
pub mod velocity;

#[cfg(test)]
mod length_test;

pub use density::Density;
pub use length::Length;
pub use mass::{EARTH_MASS_KG, Mass};
pub use velocity::{Velocity, escape_velocity};
