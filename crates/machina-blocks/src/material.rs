use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::MaterialId;

#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    /// Slot count of the inventory a block of this material hosts, if any.
    pub inventory: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
    by_id: HashMap<MaterialId, usize>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialCatalog {
    /// Catalog holding only `air` at id 0.
    pub fn new() -> Self {
        let mut catalog = Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
            by_id: HashMap::new(),
        };
        catalog.push("air".to_string(), MaterialId::AIR, None);
        catalog
    }

    fn push(&mut self, key: String, id: MaterialId, inventory: Option<usize>) {
        self.by_key.insert(key.clone(), id);
        self.by_id.insert(id, self.materials.len());
        self.materials.push(Material { id, key, inventory });
    }

    /// Registers a material. Re-registering `air` at id 0 is accepted and ignored.
    pub fn insert(
        &mut self,
        key: &str,
        id: MaterialId,
        inventory: Option<usize>,
    ) -> Result<(), CatalogError> {
        if key == "air" {
            if id.is_air() {
                return Ok(());
            }
            return Err(CatalogError::AirRedefined(id));
        }
        if self.by_key.contains_key(key) {
            return Err(CatalogError::DuplicateKey(key.to_string()));
        }
        if let Some(&i) = self.by_id.get(&id) {
            return Err(CatalogError::DuplicateId {
                id,
                existing: self.materials[i].key.clone(),
                key: key.to_string(),
            });
        }
        self.push(key.to_string(), id, inventory);
        Ok(())
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.by_id.get(&id).map(|&i| &self.materials[i])
    }

    /// Name for display; unknown ids render as `#<id>`.
    pub fn name(&self, id: MaterialId) -> String {
        match self.get(id) {
            Some(m) => m.key.clone(),
            None => format!("#{}", id.0),
        }
    }

    pub fn inventory_slots(&self, id: MaterialId) -> Option<usize> {
        self.get(id).and_then(|m| m.inventory)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort by id so error reports are stable.
        entries.sort_by_key(|(key, entry)| (entry.id(), key.clone()));
        for (key, entry) in entries {
            let (id, inventory) = match entry {
                MaterialEntry::Id(id) => (id, None),
                MaterialEntry::Detail { id, inventory } => (id, inventory),
            };
            catalog.insert(&key, MaterialId(id), inventory)?;
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    AirRedefined(MaterialId),
    DuplicateKey(String),
    DuplicateId {
        id: MaterialId,
        existing: String,
        key: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::AirRedefined(id) => {
                write!(f, "air must keep id 0, found {}", id.0)
            }
            CatalogError::DuplicateKey(key) => write!(f, "material '{}' defined twice", key),
            CatalogError::DuplicateId { id, existing, key } => write!(
                f,
                "material '{}' reuses id {} already taken by '{}'",
                key, id.0, existing
            ),
        }
    }
}

impl Error for CatalogError {}

// --- Config ---

#[derive(Deserialize)]
pub struct MaterialsConfig {
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: stone = 1
    Id(u16),
    // Detailed: chest = { id = 54, inventory = 27 }
    Detail { id: u16, inventory: Option<usize> },
}

impl MaterialEntry {
    fn id(&self) -> u16 {
        match self {
            MaterialEntry::Id(id) => *id,
            MaterialEntry::Detail { id, .. } => *id,
        }
    }
}
