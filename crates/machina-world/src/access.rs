use machina_blocks::{Inventory, WorldBlock};
use machina_geom::BlockLocation;

/// Everything the blueprint engine needs from a world.
///
/// Implementations report their own failures (unloaded chunks, positions outside the
/// build range, ...) through `Error`; callers of the engine receive them unchanged.
pub trait BlockAccess {
    type Error: std::error::Error;

    /// Material and state byte at `at`. Empty positions report [`WorldBlock::AIR`].
    fn block_at(&self, at: BlockLocation) -> Result<WorldBlock, Self::Error>;

    /// Replaces the block at `at`, including its material.
    fn set_block(&mut self, at: BlockLocation, block: WorldBlock) -> Result<(), Self::Error>;

    /// Overwrites only the state byte at `at`.
    fn set_data(&mut self, at: BlockLocation, data: u8) -> Result<(), Self::Error>;

    /// Inventory hosted by the block at `at`, if that block has one.
    fn inventory_mut(&mut self, at: BlockLocation) -> Result<Option<&mut Inventory>, Self::Error>;
}

impl<W: BlockAccess + ?Sized> BlockAccess for &mut W {
    type Error = W::Error;

    #[inline]
    fn block_at(&self, at: BlockLocation) -> Result<WorldBlock, Self::Error> {
        (**self).block_at(at)
    }

    #[inline]
    fn set_block(&mut self, at: BlockLocation, block: WorldBlock) -> Result<(), Self::Error> {
        (**self).set_block(at, block)
    }

    #[inline]
    fn set_data(&mut self, at: BlockLocation, data: u8) -> Result<(), Self::Error> {
        (**self).set_data(at, data)
    }

    #[inline]
    fn inventory_mut(&mut self, at: BlockLocation) -> Result<Option<&mut Inventory>, Self::Error> {
        (**self).inventory_mut(at)
    }
}
