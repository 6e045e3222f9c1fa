use serde::{Deserialize, Serialize};

/// Numeric block/item classification. Id 0 is always air.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u16);

impl MaterialId {
    pub const AIR: MaterialId = MaterialId(0);

    #[inline]
    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

/// What a world reports for a single position: its material and the persisted state byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldBlock {
    pub material: MaterialId,
    pub data: u8,
}

impl WorldBlock {
    pub const AIR: WorldBlock = WorldBlock {
        material: MaterialId::AIR,
        data: 0,
    };

    #[inline]
    pub const fn new(material: MaterialId, data: u8) -> Self {
        Self { material, data }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: MaterialId,
    pub amount: u8,
    #[serde(default)]
    pub durability: u16,
}

impl ItemStack {
    #[inline]
    pub const fn new(material: MaterialId, amount: u8) -> Self {
        Self {
            material,
            amount,
            durability: 0,
        }
    }
}
