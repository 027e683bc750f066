//! Source population tables for interplanetary and interstellar dust.
//!
//! Describes where sampled grains come from: the three source families with
//! their heliocentric speed ranges, material mixes, directional spreads and
//! population weights, plus the bulk density of each material.
//!
//! Every table is validated when a [`PopulationModel`] is built, whether in
//! code or by deserializing a configuration file, so downstream sampling can
//! treat the model as a pure lookup.

pub mod error;
pub mod material;
pub mod model;
pub mod profile;
pub mod source_family;


pub use error::PopulationError;
pub use material::Material;
pub use model::{PopulationModel, PopulationTables};
pub use profile::{AngularSpread, SourceFamilyProfile, VelocityRange, VelocityShape};
pub use source_family::SourceFamily;
