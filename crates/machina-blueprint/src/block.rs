use machina_blocks::MaterialId;
use machina_geom::BlockVector;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockRole {
    /// Checked before an orientation is known; establishes a candidate anchor.
    Key,
    /// Checked only once a rotation has been hypothesized.
    Other,
}

/// One block of a shape in the unrotated reference frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlueprintBlock {
    pub vector: BlockVector,
    pub material: MaterialId,
    pub role: BlockRole,
}

impl BlueprintBlock {
    #[inline]
    pub const fn new(vector: BlockVector, material: MaterialId, role: BlockRole) -> Self {
        Self {
            vector,
            material,
            role,
        }
    }

    #[inline]
    pub const fn key(vector: BlockVector, material: MaterialId) -> Self {
        Self::new(vector, material, BlockRole::Key)
    }

    #[inline]
    pub const fn other(vector: BlockVector, material: MaterialId) -> Self {
        Self::new(vector, material, BlockRole::Other)
    }

    #[inline]
    pub fn is_key(&self) -> bool {
        self.role == BlockRole::Key
    }
}
