//! End-to-end checks: terrain mesh to collider, and grass over real terrain.

use glam::{Vec2, Vec3};

use glade::collider::{ColliderHeightfield, WallHeight, build_collider};
use glade::grass::{GrassConfig, GrassSystem};
use glade::mask::MaskTable;
use glade::math::Rect;
use glade::terrain::{GridMeshParams, HeightGrid, HeightSource, generate_grid_mesh};
use glade::terrain::mesh::{read_vertex_buffer, write_vertex_buffer};
use glade::wind::{NoiseTable, WindField, WindParams};
use glade::GladeConfig;

fn scene_grid() -> HeightGrid {
    glade::core::logging::try_init();
    let params = GridMeshParams { rows: 33, ..Default::default() };
    HeightGrid::build(&generate_grid_mesh(&params)).unwrap()
}

/// 16x16 mask with a north-south river in pixel columns 6..=9.
fn write_river_mask(path: &std::path::Path) {
    let img = image::RgbaImage::from_fn(16, 16, |x, _| {
        if (6..=9).contains(&x) {
            image::Rgba([0, 0, 200, 255])
        } else {
            image::Rgba([0, 0, 0, 255])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn test_mesh_file_round_trip_builds_same_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("terrain.bin");
    let params = GridMeshParams { rows: 17, ..Default::default() };
    let vertices = generate_grid_mesh(&params);
    write_vertex_buffer(&path, &vertices).unwrap();

    let from_file = HeightGrid::build(&read_vertex_buffer(&path).unwrap()).unwrap();
    let direct = HeightGrid::build(&vertices).unwrap();
    assert_eq!(from_file.rows(), 17);
    assert_eq!(from_file.heights(), direct.heights());
}

#[test]
fn test_river_with_bridge() {
    let dir = tempfile::tempdir().unwrap();
    let mask_path = dir.path().join("water.png");
    write_river_mask(&mask_path);

    let grid = scene_grid();
    let water = MaskTable::open(&mask_path).unwrap();
    let fog = MaskTable::uniform(MaskTable::NEUTRAL_FOG);
    let bridge = Rect::new(-40.0, 40.0, -4.0, 4.0);

    let config = GladeConfig::default();
    let collider = build_collider(&grid, &water, &fog, &[bridge], &config.uv, &config.collider);

    assert_eq!(collider.rows(), 33);
    assert!(collider.wall_height() > grid.max_height());

    // River cells (x in -32..=32) are walled off, widened by one cell
    for i in 11..=21 {
        assert!(collider.is_blocked(i, 8), "cell ({}, 8) should be blocked", i);
        assert_eq!(collider.height(i, 8), collider.wall_height());
    }
    // The bridge row stays walkable at terrain height
    for i in 11..=21 {
        assert!(!collider.is_blocked(i, 16), "bridge cell ({}, 16) blocked", i);
        assert_eq!(collider.height(i, 16), grid.height(i, 16));
    }
    // Far bank untouched
    assert!(!collider.is_blocked(0, 0));
    assert_eq!(collider.height(0, 0), grid.height(0, 0));
    assert!(!collider.is_blocked(32, 32));
}

#[test]
fn test_collider_json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let grid = scene_grid();
    let water = MaskTable::uniform(MaskTable::NEUTRAL_WATER);
    let fog = MaskTable::uniform(MaskTable::NEUTRAL_FOG);

    let mut config = GladeConfig::default();
    config.collider.wall_height = WallHeight::Fixed(75.0);
    config.save(dir.path().join("glade.json")).unwrap();
    let config = GladeConfig::load(dir.path().join("glade.json")).unwrap();

    let collider = build_collider(&grid, &water, &fog, &[], &config.uv, &config.collider);
    assert_eq!(collider.blocked_count(), 0);
    assert_eq!(collider.wall_height(), 75.0);

    let out = dir.path().join("collider.json");
    std::fs::write(&out, collider.to_json().unwrap()).unwrap();
    let back = ColliderHeightfield::from_json(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(back.heights(), collider.heights());
    assert_eq!(back.scale(), Vec3::new(256.0, 1.0, 256.0));
}

/// 2x2 mask with water only in the top-left pixel.
fn corner_pond() -> MaskTable {
    let mut data = Vec::new();
    for y in 0..2 {
        for x in 0..2 {
            let blue = if x == 0 && y == 0 { 200 } else { 0 };
            data.extend_from_slice(&[0, 0, blue, 255]);
        }
    }
    MaskTable::from_rgba8(2, 2, &data).unwrap()
}

#[test]
fn test_collider_and_grass_agree_on_water() {
    let mut config = GladeConfig::default();
    config.collider.dilate = false;
    config.wind.strength = 0.0;
    config.grass = GrassConfig { grid_offset_z: 0.0, ..sweep_config() };

    let grid = HeightGrid::flat(33, Rect::new(-128.0, 128.0, -128.0, 128.0), 0.0);
    let fog = MaskTable::uniform(MaskTable::NEUTRAL_FOG);
    let collider = build_collider(&grid, &corner_pond(), &fog, &[], &config.uv, &config.collider);
    let mut grass = GrassSystem::from_config(&config, grid.clone()).with_water(corner_pond());

    let mut out = Vec::new();
    // One point inside each quadrant of the plane
    for (i, j) in [(8, 24), (24, 24), (24, 8), (8, 8)] {
        let (x, z) = grid.cell_position(i, j);
        let blocked = collider.is_blocked(i, j);
        assert_eq!(grass.is_submerged(x, z), blocked, "disagree at ({}, {})", x, z);

        grass.update(Vec2::new(x, z), 0.0);
        grass.evaluate(Vec3::new(x, 3.0, z + 5.0), &mut out);
        let hidden = out.iter().all(|p| p.y == config.water.hide_height);
        let grounded = out.chunks_exact(3).all(|b| b[0].y == 0.0 && b[1].y == 0.0);
        assert_eq!(hidden, blocked);
        assert_eq!(grounded, !blocked);
    }
    // Exactly one quadrant is water
    let blocked_quadrants = [(8, 24), (24, 24), (24, 8), (8, 8)]
        .iter()
        .filter(|&&(i, j)| collider.is_blocked(i, j))
        .count();
    assert_eq!(blocked_quadrants, 1);
}

fn sweep_config() -> GrassConfig {
    GrassConfig {
        grid_size: 20,
        scale_x: 1.0,
        scale_z: 1.0,
        spacing: 0.25,
        grid_offset_z: -2.0,
        ..Default::default()
    }
}

#[test]
fn test_grass_follows_player_over_terrain() {
    let grid = scene_grid();
    let (lo, hi) = (grid.min_height(), grid.max_height());
    let config = sweep_config();
    let max_tip = config.blade_height + config.max_height_variation;
    let reach = config.blade_half_width + 1e-3;

    let mut grass = GrassSystem::new(config, grid)
        .with_wind(WindParams { strength: 0.0, ..Default::default() }, WindField::procedural());
    let half = grass.wrap_field().field_size() * 0.5;

    let mut out = Vec::new();
    for frame in 0..120 {
        let t = frame as f32 / 60.0;
        let player = Vec2::new(t * 7.0, t * -3.0);
        grass.update(player, 1.0 / 60.0);
        grass.evaluate(Vec3::new(player.x, 3.0, player.y + 5.0), &mut out);

        let anchor = grass.wrap_field().anchor();
        assert_eq!(anchor, player + Vec2::new(0.0, -2.0));
        for p in &out {
            assert!((p.x - anchor.x).abs() <= half.x + reach);
            assert!((p.z - anchor.y).abs() <= half.y + reach);
            assert!(p.y >= lo - 1e-3 && p.y <= hi + max_tip + 1e-3);
        }
    }
}

#[test]
fn test_grass_on_heightmap_image() {
    let heightmap = GladeConfig::default().heightmap(MaskTable::uniform([128, 0, 0, 255]));
    let ground = heightmap.height_at(0.0, 0.0);

    let mut grass = GrassSystem::new(sweep_config(), heightmap)
        .with_wind(WindParams { strength: 0.0, ..Default::default() }, WindField::procedural());
    grass.update(Vec2::new(12.0, 40.0), 0.1);
    let mut out = Vec::new();
    grass.evaluate(Vec3::new(12.0, 30.0, 60.0), &mut out);

    for blade in out.chunks_exact(3) {
        assert_eq!(blade[0].y, ground);
        assert_eq!(blade[1].y, ground);
    }
}

#[test]
fn test_wind_is_reproducible_across_systems() {
    let table = NoiseTable::generate(32, 7, 1.5);
    let make = || {
        GrassSystem::new(sweep_config(), scene_grid())
            .with_wind(WindParams::default(), WindField::new(Some(table.clone())))
    };
    let (mut a, mut b) = (make(), make());
    let (mut out_a, mut out_b) = (Vec::new(), Vec::new());
    for frame in 0..10 {
        let player = Vec2::new(frame as f32, 0.0);
        a.update(player, 0.05);
        b.update(player, 0.05);
        a.evaluate(Vec3::new(0.0, 5.0, 0.0), &mut out_a);
        b.evaluate(Vec3::new(0.0, 5.0, 0.0), &mut out_b);
        assert_eq!(out_a, out_b);
    }
    assert!((a.wind().time - 0.5).abs() < 1e-5);
}
