use std::fmt;

use hashbrown::HashSet;
use machina_blocks::MaterialId;
use machina_geom::BlockVector;

use crate::block::{BlockRole, BlueprintBlock};
use crate::module::BlueprintModule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    EmptyModule { module: String },
    DuplicateOffset { module: String, vector: BlockVector },
    NoModules { blueprint: String },
    DuplicateBlueprint { blueprint: String },
}

impl fmt::Display for BlueprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlueprintError::EmptyModule { module } => {
                write!(f, "module '{}' has no blocks", module)
            }
            BlueprintError::DuplicateOffset { module, vector } => {
                write!(f, "module '{}' lists offset {} twice", module, vector)
            }
            BlueprintError::NoModules { blueprint } => {
                write!(f, "blueprint '{}' has no modules", blueprint)
            }
            BlueprintError::DuplicateBlueprint { blueprint } => {
                write!(f, "blueprint '{}' registered twice", blueprint)
            }
        }
    }
}

impl std::error::Error for BlueprintError {}

/// Reference-frame description of one module, consumed by [`BlueprintModule::new`].
///
/// Block order is preserved and becomes the module's block index order.
#[derive(Clone, Debug, Default)]
pub struct BlueprintFactory {
    pub name: String,
    pub blocks: Vec<BlueprintBlock>,
}

impl BlueprintFactory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    pub fn block(mut self, block: BlueprintBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn key(self, dx: i32, dy: i32, dz: i32, material: MaterialId) -> Self {
        self.block(BlueprintBlock::new(
            BlockVector::new(dx, dy, dz),
            material,
            BlockRole::Key,
        ))
    }

    pub fn other(self, dx: i32, dy: i32, dz: i32, material: MaterialId) -> Self {
        self.block(BlueprintBlock::new(
            BlockVector::new(dx, dy, dz),
            material,
            BlockRole::Other,
        ))
    }

    pub fn push(&mut self, block: BlueprintBlock) {
        self.blocks.push(block);
    }

    pub fn validate(&self) -> Result<(), BlueprintError> {
        if self.blocks.is_empty() {
            return Err(BlueprintError::EmptyModule {
                module: self.name.clone(),
            });
        }
        let mut seen = HashSet::with_capacity(self.blocks.len());
        for b in &self.blocks {
            if !seen.insert(b.vector) {
                return Err(BlueprintError::DuplicateOffset {
                    module: self.name.clone(),
                    vector: b.vector,
                });
            }
        }
        Ok(())
    }

    pub fn build(self) -> Result<BlueprintModule, BlueprintError> {
        BlueprintModule::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_module() {
        let err = BlueprintFactory::new("hull").build().unwrap_err();
        assert_eq!(
            err,
            BlueprintError::EmptyModule {
                module: "hull".into()
            }
        );
    }

    #[test]
    fn rejects_repeated_offsets() {
        let stone = MaterialId(1);
        let err = BlueprintFactory::new("hull")
            .key(0, 0, 0, stone)
            .other(1, 0, 0, stone)
            .other(1, 0, 0, stone)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "module 'hull' lists offset (1, 0, 0) twice"
        );
    }

    #[test]
    fn keeps_declaration_order() {
        let m = BlueprintFactory::new("hull")
            .other(0, 1, 0, MaterialId(2))
            .key(0, 0, 0, MaterialId(1));
        assert_eq!(m.blocks[0].role, BlockRole::Other);
        assert!(m.blocks[1].is_key());
    }
}
