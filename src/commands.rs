use std::error::Error;
use std::sync::Arc;

use machina_blocks::{Contents, MaterialCatalog};
use machina_blueprint::{BlockRole, MovableBlueprint};
use machina_geom::BlockRotation;
use machina_io::{load_blueprints, load_world};

use crate::{CatalogArgs, PlacementArgs};

fn load_blueprint(
    args: &CatalogArgs,
) -> Result<(Arc<MaterialCatalog>, MovableBlueprint, Vec<usize>), Box<dyn Error>> {
    let materials = Arc::new(MaterialCatalog::from_path(&args.materials)?);
    let catalog = load_blueprints(&args.blueprints, &materials)?;
    let Some(blueprint) = catalog.get(&args.name).cloned() else {
        let known: Vec<&str> = catalog.iter().map(|b| b.name()).collect();
        return Err(format!(
            "no blueprint named '{}' (known: {})",
            args.name,
            known.join(", ")
        )
        .into());
    };
    let modules = if args.modules.is_empty() {
        blueprint.all_modules()
    } else {
        args.modules.clone()
    };
    if let Some(bad) = modules.iter().find(|&&m| m >= blueprint.module_count()) {
        return Err(format!(
            "module {} out of range; '{}' has {} modules",
            bad,
            blueprint.name(),
            blueprint.module_count()
        )
        .into());
    }
    log::debug!("using modules {:?} of '{}'", modules, blueprint.name());
    Ok((materials, blueprint, modules))
}

fn rotations(only: Option<BlockRotation>) -> Vec<BlockRotation> {
    match only {
        Some(r) => vec![r],
        None => BlockRotation::ALL.to_vec(),
    }
}

pub fn inspect(args: &CatalogArgs, rotation: Option<BlockRotation>) -> Result<(), Box<dyn Error>> {
    let (materials, blueprint, modules) = load_blueprint(args)?;
    let blocks = blueprint.unify_blueprint(&modules);
    for r in rotations(rotation) {
        let vectors = blueprint.unified_vectors(&modules, r);
        println!("{} facing {} ({} blocks)", blueprint.name(), r, blocks.len());
        for (i, (b, v)) in blocks.iter().zip(&vectors).enumerate() {
            let role = match b.role {
                BlockRole::Key => "key",
                BlockRole::Other => "other",
            };
            println!(
                "  {:>3} {:<5} {:<16} {} -> {}",
                i,
                role,
                materials.name(b.material),
                b.vector,
                v
            );
        }
    }
    Ok(())
}

pub fn detect(args: &CatalogArgs, placement: &PlacementArgs) -> Result<(), Box<dyn Error>> {
    let (materials, blueprint, modules) = load_blueprint(args)?;
    let world = load_world(&placement.world, materials)?;
    let found = rotations(placement.rotation)
        .into_iter()
        .find(|&r| blueprint.detect(&world, placement.at, r, &modules));
    match found {
        Some(r) => println!("{} found at {} facing {}", blueprint.name(), placement.at, r),
        None => println!("no match for {} at {}", blueprint.name(), placement.at),
    }
    Ok(())
}

pub fn extract(args: &CatalogArgs, placement: &PlacementArgs) -> Result<(), Box<dyn Error>> {
    let (materials, blueprint, modules) = load_blueprint(args)?;
    let mut world = load_world(&placement.world, materials.clone())?;
    let anchor = placement.at;
    let Some(rotation) = rotations(placement.rotation)
        .into_iter()
        .find(|&r| blueprint.detect(&world, anchor, r, &modules))
    else {
        return Err(format!("no match for {} at {}", blueprint.name(), anchor).into());
    };
    println!("{} at {} facing {}", blueprint.name(), anchor, rotation);
    for &m in &modules {
        let module = blueprint.module(m);
        let data = blueprint.block_data(&world, anchor, rotation, m)?;
        // Operates on the in-memory copy only; the snapshot file is never written.
        let inventories = blueprint.take_block_inventories(&mut world, anchor, rotation, m)?;
        println!("  module {} '{}'", m, module.name());
        for (i, (d, inv)) in data.iter().zip(&inventories).enumerate() {
            let at = anchor + blueprint.by_index(i, rotation, m);
            println!("    {:>3} {} data={}{}", i, at, d, describe(&materials, inv.as_ref()));
        }
        blueprint.restore_block_inventories(&mut world, anchor, inventories, rotation, m)?;
    }
    Ok(())
}

fn describe(materials: &MaterialCatalog, contents: Option<&Contents>) -> String {
    let Some(contents) = contents else {
        return String::new();
    };
    let stacks: Vec<String> = contents
        .iter()
        .enumerate()
        .filter_map(|(slot, s)| {
            s.map(|s| format!("{}:{}x{}", slot, materials.name(s.material), s.amount))
        })
        .collect();
    format!(" items=[{}]", stacks.join(", "))
}
