use std::error::Error;
use std::fs;
use std::path::Path;

use machina_blocks::MaterialCatalog;
use machina_blueprint::{
    BlockRole, BlueprintBlock, BlueprintCatalog, BlueprintFactory, MovableBlueprint,
};
use machina_geom::BlockVector;
use serde::Deserialize;

use crate::IoError;

#[derive(Deserialize, Debug)]
pub struct BlueprintsConfig {
    #[serde(default)]
    pub blueprints: Vec<BlueprintDef>,
}

#[derive(Deserialize, Debug)]
pub struct BlueprintDef {
    pub name: String,
    pub modules: Vec<ModuleDef>,
}

#[derive(Deserialize, Debug)]
pub struct ModuleDef {
    pub name: String,
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug)]
pub struct BlockDef {
    pub offset: [i32; 3],
    pub material: String,
    #[serde(default = "default_role")]
    pub role: BlockRole,
}

fn default_role() -> BlockRole {
    BlockRole::Other
}

impl BlueprintsConfig {
    /// Resolves material names and builds every blueprint, keeping declaration order.
    pub fn into_catalog(self, materials: &MaterialCatalog) -> Result<BlueprintCatalog, Box<dyn Error>> {
        let mut catalog = BlueprintCatalog::new();
        for bp in self.blueprints {
            let mut factories = Vec::with_capacity(bp.modules.len());
            for module in bp.modules {
                let mut factory = BlueprintFactory::new(module.name);
                for block in module.blocks {
                    let material = materials.get_id(&block.material).ok_or_else(|| {
                        IoError::UnknownMaterial {
                            context: format!("blueprint '{}' module '{}'", bp.name, factory.name),
                            name: block.material.clone(),
                        }
                    })?;
                    factory.push(BlueprintBlock::new(
                        BlockVector::from(block.offset),
                        material,
                        block.role,
                    ));
                }
                factories.push(factory);
            }
            let blueprint = MovableBlueprint::new(bp.name, factories)?;
            log::debug!(
                "blueprint '{}': {} modules, {} blocks",
                blueprint.name(),
                blueprint.module_count(),
                blueprint.unified_size(&blueprint.all_modules())
            );
            catalog.insert(blueprint)?;
        }
        Ok(catalog)
    }
}

pub fn load_blueprints_str(
    toml_str: &str,
    materials: &MaterialCatalog,
) -> Result<BlueprintCatalog, Box<dyn Error>> {
    let cfg: BlueprintsConfig = toml::from_str(toml_str)?;
    cfg.into_catalog(materials)
}

pub fn load_blueprints(
    path: impl AsRef<Path>,
    materials: &MaterialCatalog,
) -> Result<BlueprintCatalog, Box<dyn Error>> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)?;
    let catalog = load_blueprints_str(&s, materials)?;
    log::info!("loaded {} blueprints from {}", catalog.len(), path.display());
    Ok(catalog)
}
