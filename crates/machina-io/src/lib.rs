//! TOML loaders for material catalogs, blueprint catalogs, and world snapshots.
#![forbid(unsafe_code)]

pub mod blueprints;
pub mod world;

use std::fmt;

use machina_geom::BlockLocation;

pub use blueprints::{BlueprintsConfig, load_blueprints, load_blueprints_str};
pub use world::{WorldConfig, load_world, load_world_str};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoError {
    UnknownMaterial { context: String, name: String },
    NoInventory { at: BlockLocation, material: String },
    BadSlot { at: BlockLocation, slot: usize, capacity: usize },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::UnknownMaterial { context, name } => {
                write!(f, "{}: unknown material '{}'", context, name)
            }
            IoError::NoInventory { at, material } => {
                write!(f, "block {} ({}) has no inventory for items", at, material)
            }
            IoError::BadSlot { at, slot, capacity } => write!(
                f,
                "block {}: slot {} out of range for inventory of {}",
                at, slot, capacity
            ),
        }
    }
}

impl std::error::Error for IoError {}
