use machina_blocks::{Contents, WorldBlock};
use machina_geom::{BlockLocation, BlockRotation, BlockVector};
use machina_world::BlockAccess;

use crate::block::BlueprintBlock;
use crate::factory::{BlueprintError, BlueprintFactory};
use crate::module::BlueprintModule;
use crate::{BlockIndex, ModuleIndex};

/// Full shape of a movable machina, composed of modules addressed by [`ModuleIndex`].
///
/// Built once from static shape definitions and shared read-only afterwards.
/// Module indices must be below [`Self::module_count`]; anything else panics.
#[derive(Clone, Debug)]
pub struct MovableBlueprint {
    name: String,
    modules: Vec<BlueprintModule>,
}

impl MovableBlueprint {
    pub fn new(
        name: impl Into<String>,
        factories: Vec<BlueprintFactory>,
    ) -> Result<Self, BlueprintError> {
        let modules = factories
            .into_iter()
            .map(BlueprintModule::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_modules(name, modules)
    }

    pub fn from_modules(
        name: impl Into<String>,
        modules: Vec<BlueprintModule>,
    ) -> Result<Self, BlueprintError> {
        let name = name.into();
        if modules.is_empty() {
            return Err(BlueprintError::NoModules { blueprint: name });
        }
        Ok(Self { name, modules })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn module(&self, module: ModuleIndex) -> &BlueprintModule {
        assert!(
            module < self.modules.len(),
            "module index {} out of range for blueprint '{}' with {} modules",
            module,
            self.name,
            self.modules.len()
        );
        &self.modules[module]
    }

    pub fn modules(&self) -> &[BlueprintModule] {
        &self.modules
    }

    /// Index of the module called `name`.
    pub fn module_index(&self, name: &str) -> Option<ModuleIndex> {
        self.modules.iter().position(|m| m.name() == name)
    }

    /// All module indices, in order.
    pub fn all_modules(&self) -> Vec<ModuleIndex> {
        (0..self.modules.len()).collect()
    }

    pub fn detect_other<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        rotation: BlockRotation,
        module: ModuleIndex,
    ) -> bool {
        self.module(module).detect_other(world, anchor, rotation)
    }

    pub fn detect_key<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        rotation: BlockRotation,
        module: ModuleIndex,
    ) -> bool {
        self.module(module).detect_key(world, anchor, rotation)
    }

    /// Whole-shape check for the listed modules: every key block first, then the rest.
    pub fn detect<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        rotation: BlockRotation,
        modules: &[ModuleIndex],
    ) -> bool {
        modules
            .iter()
            .all(|&m| self.detect_key(world, anchor, rotation, m))
            && modules
                .iter()
                .all(|&m| self.detect_other(world, anchor, rotation, m))
    }

    /// First rotation, in [`BlockRotation::ALL`] order, at which the listed modules match.
    pub fn find_rotation<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        modules: &[ModuleIndex],
    ) -> Option<BlockRotation> {
        let found = BlockRotation::ALL
            .into_iter()
            .find(|&r| self.detect(world, anchor, r, modules));
        match found {
            Some(r) => log::debug!(target: "detect", "'{}' matched at {} facing {}", self.name, anchor, r),
            None => log::trace!(target: "detect", "'{}' not found at {}", self.name, anchor),
        }
        found
    }

    pub fn by_index(
        &self,
        index: BlockIndex,
        rotation: BlockRotation,
        module: ModuleIndex,
    ) -> BlockVector {
        self.module(module).by_index(index, rotation)
    }

    pub fn block_data<W: BlockAccess + ?Sized>(
        &self,
        world: &W,
        anchor: BlockLocation,
        rotation: BlockRotation,
        module: ModuleIndex,
    ) -> Result<Vec<u8>, W::Error> {
        self.module(module).block_data(world, anchor, rotation)
    }

    pub fn set_block_data<W: BlockAccess + ?Sized>(
        &self,
        world: &mut W,
        anchor: BlockLocation,
        data: &[u8],
        rotation: BlockRotation,
        module: ModuleIndex,
    ) -> Result<(), W::Error> {
        self.module(module)
            .set_block_data(world, anchor, data, rotation)
    }

    /// Moves inventory contents out of the module's blocks; see
    /// [`BlueprintModule::take_block_inventories`].
    pub fn take_block_inventories<W: BlockAccess + ?Sized>(
        &self,
        world: &mut W,
        anchor: BlockLocation,
        rotation: BlockRotation,
        module: ModuleIndex,
    ) -> Result<Vec<Option<Contents>>, W::Error> {
        self.module(module)
            .take_block_inventories(world, anchor, rotation)
    }

    pub fn restore_block_inventories<W: BlockAccess + ?Sized>(
        &self,
        world: &mut W,
        anchor: BlockLocation,
        inventories: Vec<Option<Contents>>,
        rotation: BlockRotation,
        module: ModuleIndex,
    ) -> Result<(), W::Error> {
        self.module(module)
            .restore_block_inventories(world, anchor, inventories, rotation)
    }

    /// Total block count of the listed modules.
    pub fn unified_size(&self, module_indices: &[ModuleIndex]) -> usize {
        module_indices.iter().map(|&m| self.module(m).size()).sum()
    }

    /// Concatenates the reference-frame blocks of the listed modules, in the order given.
    pub fn unify_blueprint(&self, module_indices: &[ModuleIndex]) -> Vec<BlueprintBlock> {
        let mut result = Vec::with_capacity(self.unified_size(module_indices));
        for &m in module_indices {
            result.extend_from_slice(self.module(m).blueprint());
        }
        result
    }

    /// Writes the rotated offsets of the listed modules into `vectors`, index-aligned with
    /// [`Self::unify_blueprint`] for the same `module_indices`.
    ///
    /// Panics if `vectors.len()` differs from [`Self::unified_size`].
    pub fn unify_vectors(
        &self,
        module_indices: &[ModuleIndex],
        rotation: BlockRotation,
        vectors: &mut [BlockVector],
    ) {
        let size = self.unified_size(module_indices);
        assert_eq!(
            vectors.len(),
            size,
            "output holds {} vectors, modules {:?} of '{}' have {} blocks",
            vectors.len(),
            module_indices,
            self.name,
            size
        );
        let mut i = 0;
        for &m in module_indices {
            let src = self.module(m).vectors(rotation);
            vectors[i..i + src.len()].copy_from_slice(src);
            i += src.len();
        }
    }

    pub fn unified_vectors(
        &self,
        module_indices: &[ModuleIndex],
        rotation: BlockRotation,
    ) -> Vec<BlockVector> {
        let mut vectors = vec![BlockVector::ZERO; self.unified_size(module_indices)];
        self.unify_vectors(module_indices, rotation, &mut vectors);
        vectors
    }

    /// Writes the listed modules into the world with state byte 0.
    pub fn place<W: BlockAccess + ?Sized>(
        &self,
        world: &mut W,
        anchor: BlockLocation,
        rotation: BlockRotation,
        module_indices: &[ModuleIndex],
    ) -> Result<(), W::Error> {
        let blocks = self.unify_blueprint(module_indices);
        let vectors = self.unified_vectors(module_indices, rotation);
        for (b, v) in blocks.iter().zip(&vectors) {
            world.set_block(anchor + *v, WorldBlock::new(b.material, 0))?;
        }
        Ok(())
    }

    /// Replaces every block of the listed modules with air.
    pub fn clear<W: BlockAccess + ?Sized>(
        &self,
        world: &mut W,
        anchor: BlockLocation,
        rotation: BlockRotation,
        module_indices: &[ModuleIndex],
    ) -> Result<(), W::Error> {
        for v in self.unified_vectors(module_indices, rotation) {
            world.set_block(anchor + v, WorldBlock::AIR)?;
        }
        Ok(())
    }
}
