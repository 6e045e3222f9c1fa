use std::sync::Arc;

use machina_blocks::{ItemStack, MaterialCatalog, MaterialId, WorldBlock};
use machina_blueprint::BlockRole;
use machina_geom::{BlockLocation, BlockRotation};
use machina_io::{IoError, load_blueprints_str, load_world_str};
use machina_world::BlockAccess;

const MATERIALS: &str = r#"
[materials]
stone = 1
coal = 263
gold_block = 41
furnace = { id = 61, inventory = 3 }
"#;

const BLUEPRINTS: &str = r#"
[[blueprints]]
name = "smelter"

[[blueprints.modules]]
name = "core"
blocks = [
    { offset = [0, 0, 0], material = "gold_block", role = "key" },
    { offset = [1, 0, 0], material = "furnace" },
    { offset = [0, 1, 0], material = "stone", role = "other" },
]
"#;

fn materials() -> Arc<MaterialCatalog> {
    Arc::new(MaterialCatalog::from_toml_str(MATERIALS).unwrap())
}

#[test]
fn blueprints_resolve_materials_and_roles() {
    let materials = materials();
    let catalog = load_blueprints_str(BLUEPRINTS, &materials).unwrap();
    let bp = catalog.get("smelter").unwrap();
    assert_eq!(bp.module_count(), 1);
    let blocks = bp.module(0).blueprint();
    assert_eq!(blocks[0].role, BlockRole::Key);
    assert_eq!(blocks[1].role, BlockRole::Other);
    assert_eq!(blocks[1].material, MaterialId(61));
    assert_eq!(bp.module_index("core"), Some(0));
}

#[test]
fn unknown_material_in_blueprint_is_reported() {
    let materials = materials();
    let err = load_blueprints_str(
        r#"
        [[blueprints]]
        name = "x"
        [[blueprints.modules]]
        name = "m"
        blocks = [{ offset = [0, 0, 0], material = "obsidian" }]
        "#,
        &materials,
    )
    .unwrap_err();
    let err = err.downcast::<IoError>().unwrap();
    assert_eq!(
        err.to_string(),
        "blueprint 'x' module 'm': unknown material 'obsidian'"
    );
}

#[test]
fn world_snapshot_loads_blocks_and_items() {
    let materials = materials();
    let world = load_world_str(
        r#"
        min_y = 0
        max_y = 128

        [[blocks]]
        at = [0, 64, 0]
        material = "gold_block"

        [[blocks]]
        at = [1, 64, 0]
        material = "furnace"
        data = 4
        items = [{ slot = 1, material = "coal", amount = 8 }]
        "#,
        materials.clone(),
    )
    .unwrap();
    assert_eq!(
        world.block_at(BlockLocation::new(1, 64, 0)).unwrap(),
        WorldBlock::new(MaterialId(61), 4)
    );
    assert_eq!(
        world.inventory(BlockLocation::new(1, 64, 0)).unwrap().get(1),
        Some(ItemStack::new(MaterialId(263), 8))
    );
    assert!(world.block_at(BlockLocation::new(0, 128, 0)).is_err());

    let catalog = load_blueprints_str(BLUEPRINTS, &materials).unwrap();
    let bp = catalog.get("smelter").unwrap();
    let anchor = BlockLocation::new(0, 64, 0);
    assert!(bp.detect_key(&world, anchor, BlockRotation::North, 0));
    assert!(!bp.detect_other(&world, anchor, BlockRotation::North, 0));
}

#[test]
fn items_on_plain_block_are_rejected() {
    let err = load_world_str(
        r#"
        [[blocks]]
        at = [0, 0, 0]
        material = "stone"
        items = [{ slot = 0, material = "coal" }]
        "#,
        materials(),
    )
    .unwrap_err();
    assert!(matches!(
        *err.downcast::<IoError>().unwrap(),
        IoError::NoInventory { .. }
    ));
}

#[test]
fn item_slot_must_fit() {
    let err = load_world_str(
        r#"
        [[blocks]]
        at = [0, 0, 0]
        material = "furnace"
        items = [{ slot = 3, material = "coal" }]
        "#,
        materials(),
    )
    .unwrap_err();
    assert_eq!(
        *err.downcast::<IoError>().unwrap(),
        IoError::BadSlot {
            at: BlockLocation::new(0, 0, 0),
            slot: 3,
            capacity: 3
        }
    );
}
