#![allow(dead_code)]

use std::sync::Arc;

use machina_blocks::{MaterialCatalog, MaterialId};
use machina_world::MemoryWorld;

pub const FRAME: MaterialId = MaterialId(1);
pub const GOLD: MaterialId = MaterialId(41);
pub const FURNACE: MaterialId = MaterialId(61);
pub const CHEST: MaterialId = MaterialId(54);
pub const DIRT: MaterialId = MaterialId(3);

pub fn make_materials() -> Arc<MaterialCatalog> {
    let mut materials = MaterialCatalog::new();
    materials.insert("frame", FRAME, None).unwrap();
    materials.insert("dirt", DIRT, None).unwrap();
    materials.insert("gold_block", GOLD, None).unwrap();
    materials.insert("furnace", FURNACE, Some(3)).unwrap();
    materials.insert("chest", CHEST, Some(27)).unwrap();
    Arc::new(materials)
}

pub fn make_world() -> MemoryWorld {
    MemoryWorld::with_height(make_materials(), -64, 320)
}
