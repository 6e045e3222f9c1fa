use machina_blocks::material::MaterialCatalog;
use machina_blocks::{CatalogError, MaterialId};

#[test]
fn air_is_always_reserved() {
    let materials = MaterialCatalog::new();
    assert_eq!(materials.get_id("air"), Some(MaterialId::AIR));
    assert_eq!(materials.name(MaterialId::AIR), "air");
    assert_eq!(materials.inventory_slots(MaterialId::AIR), None);
}

#[test]
fn parses_simple_and_detailed_entries() {
    let materials = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        stone = 1
        gold_block = 41
        chest = { id = 54, inventory = 27 }
        furnace = { id = 61, inventory = 3 }
    "#,
    )
    .unwrap();
    assert_eq!(materials.get_id("stone"), Some(MaterialId(1)));
    assert_eq!(materials.get_id("gold_block"), Some(MaterialId(41)));
    assert_eq!(materials.inventory_slots(MaterialId(54)), Some(27));
    assert_eq!(materials.inventory_slots(MaterialId(61)), Some(3));
    assert_eq!(materials.inventory_slots(MaterialId(1)), None);
    assert_eq!(materials.name(MaterialId(61)), "furnace");
    assert_eq!(materials.name(MaterialId(999)), "#999");
}

#[test]
fn explicit_air_at_zero_is_accepted() {
    let materials = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        air = 0
        dirt = 3
    "#,
    )
    .unwrap();
    assert_eq!(materials.materials.len(), 2);
}

#[test]
fn rejects_air_with_nonzero_id() {
    let err = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        air = 7
    "#,
    )
    .unwrap_err();
    let err = err.downcast::<CatalogError>().unwrap();
    assert_eq!(*err, CatalogError::AirRedefined(MaterialId(7)));
}

#[test]
fn rejects_duplicate_ids() {
    let err = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        stone = 1
        granite = 1
    "#,
    )
    .unwrap_err();
    let err = err.downcast::<CatalogError>().unwrap();
    assert!(matches!(*err, CatalogError::DuplicateId { id: MaterialId(1), .. }));
}

#[test]
fn insert_rejects_duplicate_key() {
    let mut materials = MaterialCatalog::new();
    materials.insert("stone", MaterialId(1), None).unwrap();
    assert_eq!(
        materials.insert("stone", MaterialId(2), None),
        Err(CatalogError::DuplicateKey("stone".into()))
    );
}
