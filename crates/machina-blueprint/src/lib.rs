//! Blueprint shapes for multi-block machinas: rotation tables, detection, and
//! rotation-consistent extraction of per-block state.
//!
//! Every per-block array in this crate is indexed by the same *block index*: the position
//! of a [`BlueprintBlock`] in its module's reference-frame list. The four rotated vector
//! tables of a module, the data bytes and inventories read from a world, and the unified
//! arrays of a [`MovableBlueprint`] all keep that order.
#![forbid(unsafe_code)]

pub mod block;
pub mod catalog;
pub mod factory;
pub mod module;
pub mod movable;

pub use block::{BlockRole, BlueprintBlock};
pub use catalog::BlueprintCatalog;
pub use factory::{BlueprintError, BlueprintFactory};
pub use module::BlueprintModule;
pub use movable::MovableBlueprint;

/// Position of a block inside a module's block list.
pub type BlockIndex = usize;

/// Position of a module inside a [`MovableBlueprint`].
pub type ModuleIndex = usize;
