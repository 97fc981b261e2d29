//! # Level Quality Tests
//!
//! Verifies that generated levels are playable: on the grid, jumpable, with a
//! quiet start and a clean finish, and with enemies only where they can patrol.

use hermit_procedural::{
    BuildStatus, BuildWarning, EnemyKind, GenerationConfig, LevelBuild, LevelGenerator, LevelSeed,
    MainPath, PlacementKind, PlacementRequest, RecordingFactory, SeedSettings, TickOutcome,
};

const EPS: f32 = 1e-3;

/// Busy tuning so every placement rule fires often.
fn busy_config() -> GenerationConfig {
    GenerationConfig {
        level_width: 200.0,
        gap_insertion_chance: 0.3,
        base_obstacle_chance: 0.3,
        base_enemy_chance: 0.4,
        floating_platform_chance: 0.3,
        collectible_chance: 0.3,
        consecutive_floor_probability: 0.4,
        ..GenerationConfig::default()
    }
}

fn build(config: GenerationConfig, seed: u64) -> (MainPath, Vec<PlacementRequest>) {
    let mut factory = RecordingFactory::new();
    let mut build = LevelBuild::start(config, LevelSeed::new(seed), &mut factory).unwrap();
    assert_eq!(build.run_to_completion(&mut factory), BuildStatus::Complete);
    (build.path().clone(), factory.requests().to_vec())
}

fn on_grid(value: f32, cell: f32) -> bool {
    let cells = value / cell;
    (cells - cells.round()).abs() * cell <= EPS
}

fn is_placed_thing(kind: PlacementKind) -> bool {
    kind.is_hazard_or_encounter() || matches!(kind, PlacementKind::Collectible(_))
}

/// Test: Every request except the lifted markers sits on the grid.
#[test]
fn test_everything_on_grid() {
    let config = busy_config();
    for seed in 0..30 {
        let (_, requests) = build(config.clone(), seed);
        for r in requests.iter().filter(|r| !r.kind.is_marker()) {
            assert!(
                on_grid(r.position.x, config.grid_size) && on_grid(r.position.y, config.grid_size),
                "seed {seed}: {} off grid at {:?}",
                r.kind,
                r.position
            );
        }
    }
}

/// Test: Nothing but floor in the safe zone.
#[test]
fn test_safe_zone_purity() {
    let config = busy_config();
    for seed in 0..30 {
        let (path, requests) = build(config.clone(), seed);
        let safe_end = path.get(config.safe_zone_blocks - 1).unwrap().x;

        let intruders = requests
            .iter()
            .filter(|r| is_placed_thing(r.kind) && r.position.x <= safe_end + EPS)
            .count();
        assert_eq!(intruders, 0, "seed {seed}");
    }
}

/// Test: The end runway is contiguous, flat and free of hazards.
#[test]
fn test_end_zone_purity_and_continuity() {
    let config = busy_config();
    let blocks = config.end_clear_zone_blocks;
    for seed in 0..30 {
        let (path, requests) = build(config.clone(), seed);
        let anchors = path.anchors();
        let runway = &anchors[anchors.len() - blocks..];

        assert_eq!(path.contiguous_run(anchors.len() - blocks, config.grid_size), blocks);
        assert!((runway[0].x - config.end_zone_start()).abs() <= EPS, "seed {seed}");

        let intruders = requests
            .iter()
            .filter(|r| is_placed_thing(r.kind) && r.position.x >= runway[0].x - EPS)
            .count();
        assert_eq!(intruders, 0, "seed {seed}");
    }
}

/// Test: Gaps and height steps stay within jump range.
#[test]
fn test_jump_feasibility() {
    let config = busy_config();
    let widest = (config.max_gap_tiles + 1) as f32 * config.grid_size;
    for seed in 0..100 {
        let (path, _) = build(config.clone(), seed);
        for pair in path.anchors().windows(2) {
            let dx = pair[1].x - pair[0].x;
            let dy = (pair[1].y - pair[0].y).abs();
            assert!(dx > 0.0 && dx <= widest + EPS, "seed {seed}: dx {dx}");
            assert!(dy <= config.max_jump_y + EPS, "seed {seed}: dy {dy}");
        }
    }
}

/// Test: Enemies only spawn above flat runs long enough to patrol.
#[test]
fn test_enemy_precondition() {
    let config = busy_config();
    let mut enemies = 0;
    for seed in 0..30 {
        let (path, requests) = build(config.clone(), seed);
        for enemy in requests.iter().filter(|r| matches!(r.kind, PlacementKind::Enemy(_))) {
            let index = path
                .anchors()
                .iter()
                .position(|a| (a.x - enemy.position.x).abs() <= EPS)
                .unwrap();
            let run = path.contiguous_run(index, config.grid_size);
            assert!(
                run as f32 * config.grid_size >= config.min_enemy_floor_length,
                "seed {seed}: enemy over a {run} tile run"
            );
            enemies += 1;
        }
    }
    assert!(enemies > 0, "busy config should produce enemies");
}

/// Test: Every gap is filled with hazard tiles down to the world floor.
#[test]
fn test_gaps_are_filled() {
    let config = busy_config();
    for seed in 0..30 {
        let (path, requests) = build(config.clone(), seed);
        for pair in path.anchors().windows(2) {
            let open = ((pair[1].x - pair[0].x) / config.grid_size).round() as i32 - 1;
            for step in 1..=open {
                let x = pair[0].x + step as f32 * config.grid_size;
                let surface = requests.iter().any(|r| {
                    r.kind == PlacementKind::HazardFill(hermit_procedural::HazardFill::Surface)
                        && (r.position.x - x).abs() <= EPS
                        && (r.position.y - pair[0].y).abs() <= EPS
                });
                let bottom = requests.iter().any(|r| {
                    r.kind == PlacementKind::HazardFill(hermit_procedural::HazardFill::Column)
                        && (r.position.x - x).abs() <= EPS
                        && (r.position.y + 15.0).abs() <= EPS
                });
                assert!(surface && bottom, "seed {seed}: open column at {x}");
            }
        }
    }
}

/// Test: Obstacles get denser towards the end of the level.
#[test]
fn test_difficulty_rises_with_progress() {
    let config = GenerationConfig {
        level_width: 400.0,
        ..busy_config()
    };
    let half = config.level_width / 2.0;
    let (mut early, mut late) = (0, 0);
    for seed in 0..40 {
        let (_, requests) = build(config.clone(), seed);
        for r in requests.iter().filter(|r| matches!(r.kind, PlacementKind::Obstacle(_))) {
            if r.position.x < half {
                early += 1;
            } else {
                late += 1;
            }
        }
    }
    assert!(late > early, "early {early}, late {late}");
}

/// Test: Unconfigured kinds are skipped and reported, the build still finishes.
#[test]
fn test_missing_enemy_assets() {
    let missing = [
        PlacementKind::Enemy(EnemyKind::ZombieA),
        PlacementKind::Enemy(EnemyKind::ZombieB),
        PlacementKind::Enemy(EnemyKind::Robot),
    ];
    let mut factory = RecordingFactory::with_missing(missing);
    let mut generator = LevelGenerator::new(busy_config(), SeedSettings::fixed(11));
    let level = generator.run_to_completion(&mut factory).unwrap();

    let dropped: usize = missing.iter().map(|&k| level.report.missing_count(k)).sum();
    assert!(dropped > 0);
    assert_eq!(level.report.skipped(), dropped);
    assert!(factory
        .created()
        .iter()
        .all(|r| !matches!(r.kind, PlacementKind::Enemy(_))));
    assert!(level
        .report
        .warnings
        .iter()
        .all(|w| matches!(w, BuildWarning::MissingAsset { kind: PlacementKind::Enemy(_), .. })));
    assert!(level.spawn_marker.is_some());
}

/// Test: A superseded build leaves no trace on the next one.
#[test]
fn test_superseded_build_is_independent() {
    let mut factory = RecordingFactory::new();
    let mut generator = LevelGenerator::new(busy_config(), SeedSettings::fixed(3));
    generator.generate_level(&mut factory).unwrap();
    for _ in 0..5 {
        generator.tick(&mut factory);
    }

    factory.clear();
    generator.set_seed_settings(SeedSettings::fixed(4));
    generator.generate_level(&mut factory).unwrap();
    while generator.tick(&mut factory) == TickOutcome::InProgress {}
    let level = generator.take_result().unwrap();

    let (_, fresh) = build(busy_config(), 4);
    assert_eq!(factory.requests(), fresh.as_slice());
    assert_eq!(level.seed, LevelSeed::new(4));
}

/// Test: A level too short for markers still builds, with a warning.
#[test]
fn test_short_level_without_markers() {
    let config = GenerationConfig {
        level_width: 7.5,
        safe_zone_blocks: 2,
        end_clear_zone_blocks: 1,
        ..GenerationConfig::default()
    };
    let mut factory = RecordingFactory::new();
    let level = LevelGenerator::new(config, SeedSettings::fixed(0))
        .run_to_completion(&mut factory)
        .unwrap();

    assert!(level.spawn_marker.is_none());
    assert!(level.victory_marker.is_none());
    assert!(matches!(
        level.report.warnings.as_slice(),
        [BuildWarning::MarkersSkipped { .. }]
    ));
    assert!(level.report.count(PlacementKind::Floor) > 0);
}
