use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use machina_blocks::{InventoryError, ItemStack, MaterialCatalog, MaterialId, WorldBlock};
use machina_geom::BlockLocation;
use machina_world::memory::{DEFAULT_MAX_Y, DEFAULT_MIN_Y};
use machina_world::{BlockAccess, MemoryWorld};
use serde::Deserialize;

use crate::IoError;

#[derive(Deserialize, Debug, Default)]
pub struct WorldConfig {
    pub min_y: Option<i32>,
    pub max_y: Option<i32>,
    #[serde(default)]
    pub blocks: Vec<PlacedBlockDef>,
}

#[derive(Deserialize, Debug)]
pub struct PlacedBlockDef {
    pub at: [i32; 3],
    pub material: String,
    #[serde(default)]
    pub data: u8,
    #[serde(default)]
    pub items: Vec<ItemDef>,
}

#[derive(Deserialize, Debug)]
pub struct ItemDef {
    pub slot: usize,
    pub material: String,
    #[serde(default = "default_amount")]
    pub amount: u8,
    #[serde(default)]
    pub durability: u16,
}

fn default_amount() -> u8 {
    1
}

fn resolve(materials: &MaterialCatalog, name: &str, at: BlockLocation) -> Result<MaterialId, IoError> {
    materials
        .get_id(name)
        .ok_or_else(|| IoError::UnknownMaterial {
            context: format!("block {}", at),
            name: name.to_string(),
        })
}

impl WorldConfig {
    pub fn into_world(self, materials: Arc<MaterialCatalog>) -> Result<MemoryWorld, Box<dyn Error>> {
        let mut world = MemoryWorld::with_height(
            materials.clone(),
            self.min_y.unwrap_or(DEFAULT_MIN_Y),
            self.max_y.unwrap_or(DEFAULT_MAX_Y),
        );
        for def in self.blocks {
            let at = BlockLocation::from(def.at);
            let material = resolve(&materials, &def.material, at)?;
            world.set_block(at, WorldBlock::new(material, def.data))?;
            if def.items.is_empty() {
                continue;
            }
            let Some(inv) = world.inventory_mut(at)? else {
                return Err(IoError::NoInventory {
                    at,
                    material: def.material,
                }
                .into());
            };
            for item in def.items {
                let stack = ItemStack {
                    material: resolve(&materials, &item.material, at)?,
                    amount: item.amount,
                    durability: item.durability,
                };
                inv.set(item.slot, Some(stack)).map_err(|e| match e {
                    InventoryError::SlotOutOfRange { slot, capacity } => {
                        IoError::BadSlot { at, slot, capacity }
                    }
                })?;
            }
        }
        Ok(world)
    }
}

pub fn load_world_str(
    toml_str: &str,
    materials: Arc<MaterialCatalog>,
) -> Result<MemoryWorld, Box<dyn Error>> {
    let cfg: WorldConfig = toml::from_str(toml_str)?;
    cfg.into_world(materials)
}

pub fn load_world(
    path: impl AsRef<Path>,
    materials: Arc<MaterialCatalog>,
) -> Result<MemoryWorld, Box<dyn Error>> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)?;
    let world = load_world_str(&s, materials)?;
    let stats = world.stats();
    log::info!(
        "loaded world {}: {} blocks, {} inventories in {} chunks",
        path.display(),
        stats.blocks,
        stats.inventories,
        stats.chunk_entries
    );
    Ok(world)
}
