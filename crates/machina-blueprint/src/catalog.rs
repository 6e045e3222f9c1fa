use hashbrown::HashMap;

use crate::factory::BlueprintError;
use crate::movable::MovableBlueprint;

/// Read-only registry of every machina shape, keyed by blueprint name.
#[derive(Clone, Debug, Default)]
pub struct BlueprintCatalog {
    blueprints: Vec<MovableBlueprint>,
    by_name: HashMap<String, usize>,
}

impl BlueprintCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, blueprint: MovableBlueprint) -> Result<(), BlueprintError> {
        if self.by_name.contains_key(blueprint.name()) {
            return Err(BlueprintError::DuplicateBlueprint {
                blueprint: blueprint.name().to_string(),
            });
        }
        self.by_name
            .insert(blueprint.name().to_string(), self.blueprints.len());
        self.blueprints.push(blueprint);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MovableBlueprint> {
        self.by_name.get(name).map(|&i| &self.blueprints[i])
    }

    /// Blueprints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MovableBlueprint> {
        self.blueprints.iter()
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}
