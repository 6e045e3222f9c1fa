//! Block materials, world block state, and inventory payloads.
#![forbid(unsafe_code)]

pub mod inventory;
pub mod material;
pub mod types;

pub use inventory::{Contents, Inventory, InventoryError};
pub use material::{CatalogError, MaterialCatalog};
pub use types::{ItemStack, MaterialId, WorldBlock};
