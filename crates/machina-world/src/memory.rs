use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use machina_blocks::{Inventory, MaterialCatalog, WorldBlock};
use machina_geom::BlockLocation;

use crate::access::BlockAccess;

pub const CHUNK_SIZE: i32 = 16;
pub const DEFAULT_MIN_Y: i32 = -64;
pub const DEFAULT_MAX_Y: i32 = 320;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStats {
    pub chunk_entries: usize,
    pub blocks: usize,
    pub inventories: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// Position outside the world's vertical build range.
    OutOfBounds { at: BlockLocation, min_y: i32, max_y: i32 },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::OutOfBounds { at, min_y, max_y } => write!(
                f,
                "block {} is outside the build range y={}..{}",
                at, min_y, max_y
            ),
        }
    }
}

impl std::error::Error for WorldError {}

#[derive(Default, Debug)]
struct Column {
    blocks: HashMap<(i32, i32, i32), WorldBlock>,
    inventories: HashMap<(i32, i32, i32), Inventory>,
}

/// Sparse chunk-keyed world. Anything never written reads as air.
#[derive(Debug)]
pub struct MemoryWorld {
    materials: Arc<MaterialCatalog>,
    min_y: i32,
    max_y: i32,
    // key=(cx,cz) -> blocks and inventories in that column
    inner: HashMap<(i32, i32), Column>,
}

impl MemoryWorld {
    pub fn new(materials: Arc<MaterialCatalog>) -> Self {
        Self::with_height(materials, DEFAULT_MIN_Y, DEFAULT_MAX_Y)
    }

    /// World whose valid heights are `min_y..max_y`.
    pub fn with_height(materials: Arc<MaterialCatalog>, min_y: i32, max_y: i32) -> Self {
        assert!(min_y < max_y, "empty build range {}..{}", min_y, max_y);
        Self {
            materials,
            min_y,
            max_y,
            inner: HashMap::new(),
        }
    }

    pub fn materials(&self) -> &MaterialCatalog {
        &self.materials
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            chunk_entries: self.inner.len(),
            blocks: self.inner.values().map(|c| c.blocks.len()).sum(),
            inventories: self.inner.values().map(|c| c.inventories.len()).sum(),
        }
    }

    #[inline]
    fn chunk_key(at: BlockLocation) -> (i32, i32) {
        (at.x.div_euclid(CHUNK_SIZE), at.z.div_euclid(CHUNK_SIZE))
    }

    #[inline]
    fn check(&self, at: BlockLocation) -> Result<(), WorldError> {
        if at.y < self.min_y || at.y >= self.max_y {
            return Err(WorldError::OutOfBounds {
                at,
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        Ok(())
    }

    /// Inventory at `at` without mutable access.
    pub fn inventory(&self, at: BlockLocation) -> Option<&Inventory> {
        self.inner
            .get(&Self::chunk_key(at))
            .and_then(|c| c.inventories.get(&(at.x, at.y, at.z)))
    }

    /// Snapshot of every non-air block, sorted by position.
    pub fn snapshot(&self) -> Vec<(BlockLocation, WorldBlock)> {
        let mut out: Vec<(BlockLocation, WorldBlock)> = self
            .inner
            .values()
            .flat_map(|c| {
                c.blocks
                    .iter()
                    .map(|(&(x, y, z), b)| (BlockLocation::new(x, y, z), *b))
            })
            .collect();
        out.sort_by_key(|(at, _)| (at.y, at.z, at.x));
        out
    }
}

impl BlockAccess for MemoryWorld {
    type Error = WorldError;

    fn block_at(&self, at: BlockLocation) -> Result<WorldBlock, WorldError> {
        self.check(at)?;
        Ok(self
            .inner
            .get(&Self::chunk_key(at))
            .and_then(|c| c.blocks.get(&(at.x, at.y, at.z)).copied())
            .unwrap_or(WorldBlock::AIR))
    }

    fn set_block(&mut self, at: BlockLocation, block: WorldBlock) -> Result<(), WorldError> {
        self.check(at)?;
        let slots = self.materials.inventory_slots(block.material);
        let key = (at.x, at.y, at.z);
        let column = self.inner.entry(Self::chunk_key(at)).or_default();
        let previous = if block.material.is_air() {
            column.blocks.remove(&key)
        } else {
            column.blocks.insert(key, block)
        };
        let same_material = previous.map(|p| p.material) == Some(block.material);
        if !same_material {
            if column.inventories.remove(&key).is_some() {
                log::trace!(target: "world", "dropped inventory at {}", at);
            }
            if let Some(n) = slots {
                column.inventories.insert(key, Inventory::new(n));
            }
        }
        if column.blocks.is_empty() && column.inventories.is_empty() {
            self.inner.remove(&Self::chunk_key(at));
        }
        Ok(())
    }

    fn set_data(&mut self, at: BlockLocation, data: u8) -> Result<(), WorldError> {
        let current = self.block_at(at)?;
        if current.material.is_air() {
            log::trace!(target: "world", "ignored data {} for air at {}", data, at);
            return Ok(());
        }
        if let Some(column) = self.inner.get_mut(&Self::chunk_key(at)) {
            column
                .blocks
                .insert((at.x, at.y, at.z), WorldBlock::new(current.material, data));
        }
        Ok(())
    }

    fn inventory_mut(&mut self, at: BlockLocation) -> Result<Option<&mut Inventory>, WorldError> {
        self.check(at)?;
        Ok(self
            .inner
            .get_mut(&Self::chunk_key(at))
            .and_then(|c| c.inventories.get_mut(&(at.x, at.y, at.z))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use machina_blocks::MaterialId;

    fn make_world() -> MemoryWorld {
        let mut materials = MaterialCatalog::new();
        materials.insert("stone", MaterialId(1), None).unwrap();
        materials.insert("chest", MaterialId(54), Some(27)).unwrap();
        MemoryWorld::with_height(Arc::new(materials), 0, 256)
    }

    #[test]
    fn negative_coordinates_share_column_keys() {
        assert_eq!(MemoryWorld::chunk_key(BlockLocation::new(-1, 0, -16)), (-1, -1));
        assert_eq!(MemoryWorld::chunk_key(BlockLocation::new(-17, 0, 15)), (-2, 0));
        assert_eq!(MemoryWorld::chunk_key(BlockLocation::new(16, 0, 0)), (1, 0));
    }

    #[test]
    fn placing_and_removing_keeps_stats_tidy() {
        let mut world = make_world();
        let at = BlockLocation::new(-3, 10, 40);
        world.set_block(at, WorldBlock::new(MaterialId(54), 2)).unwrap();
        assert_eq!(
            world.stats(),
            WorldStats {
                chunk_entries: 1,
                blocks: 1,
                inventories: 1
            }
        );
        world.set_block(at, WorldBlock::AIR).unwrap();
        assert_eq!(world.stats(), WorldStats::default());
    }

    #[test]
    fn rewriting_same_material_keeps_inventory() {
        let mut world = make_world();
        let at = BlockLocation::new(0, 1, 0);
        let chest = MaterialId(54);
        world.set_block(at, WorldBlock::new(chest, 0)).unwrap();
        let stack = machina_blocks::ItemStack::new(MaterialId(1), 5);
        world
            .inventory_mut(at)
            .unwrap()
            .unwrap()
            .set(0, Some(stack))
            .unwrap();
        world.set_block(at, WorldBlock::new(chest, 3)).unwrap();
        assert_eq!(world.inventory(at).unwrap().get(0), Some(stack));
        world.set_block(at, WorldBlock::new(MaterialId(1), 0)).unwrap();
        assert!(world.inventory(at).is_none());
    }
}
