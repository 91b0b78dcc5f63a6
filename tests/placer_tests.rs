use holodeck::{
    Anchor, BoundingBox, Direction, MemoryWorld, Script, StructureAnalyzer, StructurePlacer,
};

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// 3x3x1 wall of stone, y 64..66.
fn sample_script() -> Script {
    let mut lines = Vec::new();
    for y in 64..=66 {
        for x in 0..=2 {
            lines.push(format!("/setblock {} {} 0 minecraft:stone", x, y));
        }
    }
    Script::from_lines(lines)
}

/// 5x4x5 cabin: floor, two wall levels, roof.
fn cabin_script() -> Script {
    let mut lines = Vec::new();
    for x in 0..5 {
        for z in 0..5 {
            lines.push(format!("/setblock {} 64 {} minecraft:oak_planks", x, z));
        }
    }
    for y in [65, 66] {
        for x in 0..5 {
            lines.push(format!("/setblock {} {} 0 minecraft:oak_planks", x, y));
            lines.push(format!("/setblock {} {} 4 minecraft:oak_planks", x, y));
        }
        for z in 1..4 {
            lines.push(format!("/setblock 0 {} {} minecraft:oak_planks", y, z));
            lines.push(format!("/setblock 4 {} {} minecraft:oak_planks", y, z));
        }
    }
    for x in 0..5 {
        for z in 0..5 {
            lines.push(format!("/setblock {} 67 {} minecraft:oak_planks", x, z));
        }
    }
    Script::from_lines(lines)
}

fn two_block_script() -> Script {
    Script::from_lines([
        "/setblock 0 64 0 minecraft:stone",
        "/setblock 1 64 0 minecraft:stone",
    ])
}

// ── Analyzer ─────────────────────────────────────────────────────────────────

#[test]
fn test_cabin_bounding_box() {
    let analyzer = StructureAnalyzer::new();
    let bbox = analyzer.bounding_box(&cabin_script());
    assert_eq!(bbox, BoundingBox::new(0, 64, 0, 4, 67, 4));
    assert_eq!(bbox.width(), 5);
    assert_eq!(bbox.height(), 4);
    assert_eq!(bbox.depth(), 5);
}

#[test]
fn test_cabin_footprint_and_slices() {
    let analyzer = StructureAnalyzer::new();
    let script = cabin_script();

    let footprint = analyzer.base_footprint(&script);
    assert_eq!(footprint.y_level, 64);
    assert_eq!(footprint.block_count, 25);

    // Wall level is a 16-block perimeter with full extent.
    let wall = analyzer.slice_at_y(&script, 65);
    assert_eq!(wall.width(), 5);
    assert_eq!(wall.depth(), 5);
    assert_eq!(wall.block_count, 16);

    assert_eq!(analyzer.slice_at_y(&script, 100).block_count, 0);
    assert_eq!(analyzer.width_at_y(&script, 64), 5);
    assert_eq!(analyzer.depth_at_y(&script, 64), 5);
    assert_eq!(analyzer.height(&script), 4);
}

#[test]
fn test_fill_script_bounding_box() {
    let analyzer = StructureAnalyzer::new();
    let script = Script::from_lines([
        "/fill 0 64 0 10 64 10 minecraft:stone",
        "/fill 0 65 0 10 70 10 minecraft:air hollow",
    ]);
    let bbox = analyzer.bounding_box(&script);
    assert_eq!(bbox, BoundingBox::new(0, 64, 0, 10, 70, 10));
}

// ── place_at ─────────────────────────────────────────────────────────────────

#[test]
fn test_place_at_corner_is_identity() {
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_at(&sample_script(), (100, 64, 100), Anchor::Corner);
    assert_eq!(result.origin_used, (100, 64, 100));
    assert_eq!(result.blocks_placed, 9);
}

#[test]
fn test_place_at_rebases_absolute_scripts() {
    let script = two_block_script();
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_at(&script, (10, 70, 10), Anchor::Corner);

    assert_eq!(result.blocks_placed, 2);
    let world = placer.into_backend();
    // The script was authored at (0, 64, 0); its corner lands on the target.
    assert_eq!(world.get(10, 70, 10).full_id(), "minecraft:stone");
    assert_eq!(world.get(11, 70, 10).full_id(), "minecraft:stone");
    assert_eq!(world.block_count(), 2);
}

#[test]
fn test_place_at_relative_script_lands_at_origin() {
    let script = Script::from_lines([
        "/setblock ~ ~ ~ minecraft:stone",
        "/setblock ~+1 ~ ~ minecraft:stone",
    ]);
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_at(&script, (10, 70, 10), Anchor::Corner);

    assert_eq!(result.blocks_placed, 2);
    assert_eq!(result.origin_used, (10, 70, 10));
    let world = placer.into_backend();
    assert_eq!(world.get(10, 70, 10).full_id(), "minecraft:stone");
    assert_eq!(world.get(11, 70, 10).full_id(), "minecraft:stone");
    assert_eq!(world.block_count(), 2);
}

#[test]
fn test_place_at_center_anchor() {
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    // Cabin is 5x4x5: center offsets (2, 2, 2).
    let result = placer.place_at(&cabin_script(), (100, 64, 100), Anchor::Center);
    assert_eq!(result.origin_used, (98, 62, 98));
}

#[test]
fn test_place_at_base_center_keeps_y() {
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_at(&cabin_script(), (100, 64, 100), Anchor::BaseCenter);
    assert_eq!(result.origin_used, (98, 64, 98));
}

#[test]
fn test_center_anchor_recovers_center_for_odd_dimensions() {
    // 3x3x1 structure with odd width/height: corner-reconstructed center
    // matches the requested position on the odd axes.
    let script = sample_script();
    let analyzer = StructureAnalyzer::new();
    let bbox = analyzer.bounding_box(&script);
    assert_eq!(bbox.width() % 2, 1);
    assert_eq!(bbox.height() % 2, 1);

    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let target = (50, 90, 50);
    let result = placer.place_at(&script, target, Anchor::Center);
    let center = (
        result.origin_used.0 + bbox.width() / 2,
        result.origin_used.1 + bbox.height() / 2,
        result.origin_used.2 + bbox.depth() / 2,
    );
    assert_eq!(center, target);
}

// ── place_adjacent ───────────────────────────────────────────────────────────

#[test]
fn test_place_adjacent_east_with_reference() {
    let cabin = cabin_script();
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_adjacent(&cabin, (0, 64, 0), Direction::East, 10, Some(&cabin));
    // cabin width 5: 0 + 5 + 10
    assert_eq!(result.origin_used, (15, 64, 0));
}

#[test]
fn test_place_adjacent_without_reference_is_point() {
    let cabin = cabin_script();
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_adjacent(&cabin, (0, 64, 0), Direction::East, 3, None);
    // Zero-size reference: extent 1 (inclusive box), then the gap.
    assert_eq!(result.origin_used.0, 4);
}

#[test]
fn test_place_adjacent_negative_directions() {
    let cabin = cabin_script();
    let mut placer = StructurePlacer::new(MemoryWorld::new());

    let west = placer.place_adjacent(&cabin, (50, 64, 0), Direction::West, 5, Some(&cabin));
    assert_eq!(west.origin_used, (40, 64, 0));

    let north = placer.place_adjacent(&cabin, (0, 64, 50), Direction::North, 5, Some(&cabin));
    assert_eq!(north.origin_used, (0, 64, 40));

    let down = placer.place_adjacent(&cabin, (0, 64, 0), Direction::Down, 2, Some(&cabin));
    assert_eq!(down.origin_used, (0, 58, 0));
}

#[test]
fn test_place_adjacent_up_uses_reference_height() {
    let cabin = cabin_script();
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_adjacent(&cabin, (0, 64, 0), Direction::Up, 2, Some(&cabin));
    // cabin height 4: 64 + 4 + 2
    assert_eq!(result.origin_used, (0, 70, 0));
}

#[test]
fn test_adjacency_gap_additivity() {
    // B east of A, then C east of B with the same gap: the offsets chain.
    let a = cabin_script(); // width 5
    let b = sample_script(); // width 3
    let gap = 7;

    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let a_origin = (0, 64, 0);
    let b_result = placer.place_adjacent(&b, a_origin, Direction::East, gap, Some(&a));
    let c_result = placer.place_adjacent(
        &b,
        b_result.origin_used,
        Direction::East,
        gap,
        Some(&b),
    );

    let a_width = 5;
    let b_width = 3;
    assert_eq!(
        c_result.origin_used.0 - a_origin.0,
        a_width + gap + b_width + gap
    );
}

// ── place_grid ───────────────────────────────────────────────────────────────

#[test]
fn test_place_grid_row_major_origins() {
    // 3x3 footprint so the spacing math is visible in both axes.
    let script = Script::from_lines(["/fill 0 64 0 2 64 2 minecraft:stone"]);
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let results = placer.place_grid(&script, (0, 64, 0), (2, 2), (1, 1), Anchor::Corner);

    let origins: Vec<_> = results.iter().map(|r| r.origin_used).collect();
    assert_eq!(
        origins,
        vec![(0, 64, 0), (4, 64, 0), (0, 64, 4), (4, 64, 4)]
    );
}

#[test]
fn test_place_grid_places_every_cell() {
    let script = Script::from_lines([
        "/setblock ~ ~ ~ minecraft:stone",
        "/setblock ~+1 ~ ~ minecraft:stone",
    ]);
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let results = placer.place_grid(&script, (0, 64, 0), (3, 2), (2, 2), Anchor::Corner);

    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|r| r.blocks_placed == 2));
    assert_eq!(placer.backend().block_count(), 12);
}

// ── Best-effort replay ───────────────────────────────────────────────────────

#[test]
fn test_replay_skips_bad_lines() {
    let script = Script::from_lines([
        "# comment",
        "",
        "/setblock ~ ~ ~ minecraft:stone",
        "this line is garbage",
        "/setblock ~+1 ~ ~ minecraft:stone",
    ]);
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_at(&script, (0, 64, 0), Anchor::Corner);
    assert_eq!(result.blocks_placed, 2);
}

#[test]
fn test_empty_script_places_nothing() {
    let script = Script::from_lines(["# Just a comment", ""]);
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_at(&script, (0, 64, 0), Anchor::Corner);
    assert_eq!(result.blocks_placed, 0);
    assert!(result.bounding_box.is_empty());
}

// ── Results serialize ────────────────────────────────────────────────────────

#[test]
fn test_placement_result_serializes() {
    let mut placer = StructurePlacer::new(MemoryWorld::new());
    let result = placer.place_at(&two_block_script(), (0, 64, 0), Anchor::Corner);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["blocks_placed"], 2);
    assert_eq!(json["bounding_box"]["min_y"], 64);
}
