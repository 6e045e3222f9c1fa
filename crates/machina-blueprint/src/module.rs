use machina_blocks::{Contents, MaterialId};
use machina_geom::{BlockLocation, BlockRotation, BlockVector};
use machina_world::BlockAccess;

use crate::BlockIndex;
use crate::block::{BlockRole, BlueprintBlock};
use crate::factory::{BlueprintError, BlueprintFactory};

/// An independently composable sub-shape with its rotation tables precomputed.
///
/// `vectors[r][i]` is `blueprint[i].vector` rotated by `BlockRotation::from_index(r)`.
#[derive(Clone, Debug)]
pub struct BlueprintModule {
    name: String,
    blueprint: Vec<BlueprintBlock>,
    vectors: [Vec<BlockVector>; 4],
}

impl BlueprintModule {
    pub fn new(factory: BlueprintFactory) -> Result<Self, BlueprintError> {
        factory.validate()?;
        let BlueprintFactory { name, blocks } = factory;
        let vectors: [Vec<BlockVector>; 4] =
            BlockRotation::ALL.map(|r| blocks.iter().map(|b| b.vector.rotated(r)).collect());
        Ok(Self {
            name,
            blueprint: blocks,
            vectors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of blocks; the length of every per-block array for this module.
    #[inline]
    pub fn size(&self) -> usize {
        self.blueprint.len()
    }

    /// Reference-frame blocks in block index order.
    #[inline]
    pub fn blueprint(&self) -> &[BlueprintBlock] {
        &self.blueprint
    }

    /// Precomputed rotated offsets in block index order.
    #[inline]
    pub fn vectors(&self, rotation: BlockRotation) -> &[BlockVector] {
        &self.vectors[rotation.index()]
    }

    /// Rotated offset of block `index`.
    ///
    /// Panics if `index >= size()`.
    #[inline]
    pub fn by_index(&self, index: BlockIndex, rotation: BlockRotation) -> BlockVector {
        assert!(
            index < self.size(),
            "block index {} out of range for module '{}' of size {}",
            index,
            self.name,
            self.size()
        );
        self.vectors[rotation.index()][index]
    }

    /// True if every key block is present at `anchor` for `rotation`.
    pub fn detect_key<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        rotation: BlockRotation,
    ) -> bool {
        self.detect_role(world, anchor, rotation, BlockRole::Key)
    }

    /// True if every non-key block is present at `anchor` for `rotation`.
    /// Stops at the first mismatch.
    pub fn detect_other<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        rotation: BlockRotation,
    ) -> bool {
        self.detect_role(world, anchor, rotation, BlockRole::Other)
    }

    fn detect_role<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        rotation: BlockRotation,
        role: BlockRole,
    ) -> bool {
        self.blueprint
            .iter()
            .zip(self.vectors(rotation))
            .filter(|(b, _)| b.role == role)
            .all(|(b, v)| match anchor.checked_relative(*v) {
                Some(at) => material_matches(world, at, b.material),
                None => {
                    log::trace!(target: "detect", "offset {} from {} leaves the i32 range", v, anchor);
                    false
                }
            })
    }

    /// State byte of every block, in block index order.
    pub fn block_data<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        rotation: BlockRotation,
    ) -> Result<Vec<u8>, W::Error> {
        self.vectors(rotation)
            .iter()
            .map(|v| world.block_at(anchor + *v).map(|b| b.data))
            .collect()
    }

    /// Writes bytes produced by [`Self::block_data`] back, in block index order.
    ///
    /// Panics if `data.len() != size()`.
    pub fn set_block_data<W: BlockAccess + ?Sized>(
        &self,
        world: &mut W,
        anchor: BlockLocation,
        data: &[u8],
        rotation: BlockRotation,
    ) -> Result<(), W::Error> {
        assert_eq!(
            data.len(),
            self.size(),
            "module '{}' has {} blocks but {} data bytes were given",
            self.name,
            self.size(),
            data.len()
        );
        for (v, &d) in self.vectors(rotation).iter().zip(data) {
            world.set_data(anchor + *v, d)?;
        }
        Ok(())
    }

    /// Moves the contents of every block inventory out of the world, in block index order.
    /// Blocks without an inventory yield `None`. The source inventories are left empty.
    pub fn take_block_inventories<W: BlockAccess + ?Sized>(
        &self,
        world: &mut W,
        anchor: BlockLocation,
        rotation: BlockRotation,
    ) -> Result<Vec<Option<Contents>>, W::Error> {
        let mut out = Vec::with_capacity(self.size());
        for v in self.vectors(rotation) {
            out.push(world.inventory_mut(anchor + *v)?.map(|inv| inv.take_contents()));
        }
        Ok(out)
    }

    /// Inverse of [`Self::take_block_inventories`].
    ///
    /// Contents whose target no longer hosts a matching inventory are dropped with a warning.
    /// Panics if `inventories.len() != size()`.
    pub fn restore_block_inventories<W: BlockAccess + ?Sized>(
        &self,
        world: &mut W,
        anchor: BlockLocation,
        inventories: Vec<Option<Contents>>,
        rotation: BlockRotation,
    ) -> Result<(), W::Error> {
        assert_eq!(
            inventories.len(),
            self.size(),
            "module '{}' has {} blocks but {} inventories were given",
            self.name,
            self.size(),
            inventories.len()
        );
        for (v, contents) in self.vectors(rotation).iter().zip(inventories) {
            let Some(contents) = contents else { continue };
            let at = anchor + *v;
            match world.inventory_mut(at)? {
                Some(inv) if inv.capacity() == contents.len() => inv.restore(contents),
                Some(inv) => log::warn!(
                    "module '{}': inventory at {} has {} slots, saved contents have {}; dropped",
                    self.name,
                    at,
                    inv.capacity(),
                    contents.len()
                ),
                None => log::warn!(
                    "module '{}': no inventory at {} to restore into; dropped",
                    self.name,
                    at
                ),
            }
        }
        Ok(())
    }
}

#[inline]
fn material_matches<W: BlockAccess + ?Sized>(
    world: &W,
    at: BlockLocation,
    expected: MaterialId,
) -> bool {
    match world.block_at(at) {
        Ok(found) => found.material == expected,
        Err(e) => {
            log::trace!(target: "detect", "unreadable block at {} counts as mismatch: {}", at, e);
            false
        }
    }
}
