//! End-to-end planning scenarios against literal design rules

use cutgen_layout::{plan, select_spacing, CutArrayGenerator, LayoutError, Region};
use cutgen_tech::{CutSpec, GridConfig, LayerId, SpacingRule, TechnologyRegistry};

fn grid() -> GridConfig {
    GridConfig::new(0.005, 0.001).unwrap()
}

fn cont() -> CutSpec {
    CutSpec {
        cut_size: 0.16,
        spacing: 0.18,
        overhang: 0.07,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_square_region_default_spacing() {
    let region = Region::sized(0.78, 0.78);
    let result = plan(&region, 0.16, 0.18, 0.07, &grid()).unwrap();

    assert_eq!(result.counts(), (2, 2));
    // Occupied span 0.64 leaves 0.07 on each side
    assert_close(result.bbox.x1, 0.14);
    assert_close(result.bbox.y1, 0.14);
    assert_close(result.bbox.x2, 0.64);
    assert_close(result.bbox.y2, 0.64);
    assert_close(result.bbox.x1 - region.origin.x, region.width - result.bbox.x2);
}

#[test]
fn test_density_switch_recomputes_once() {
    let layer = LayerId::new("Cont");
    let rule = SpacingRule::density_switch("Cont", 0.18, 0.30, 2, 2);
    let decision = select_spacing(&layer, 0.78, 0.78, &cont(), &rule, &grid());

    assert!(decision.relaxed);
    assert_eq!(decision.spacing, 0.30);
    assert_eq!((decision.rows, decision.columns), (2, 2));

    let result = plan(&Region::sized(0.78, 0.78), 0.16, decision.spacing, 0.07, &grid()).unwrap();
    assert_eq!(result.counts(), (2, 2));
    // span = 2 * 0.46 - 0.30 + 0.14 = 0.76, offset = 0.01
    assert_close(result.offset.x, 0.01);
    assert_close(result.bbox.x1, 0.08);
    assert_close(result.bbox.x2, 0.70);
}

#[test]
fn test_narrow_region_is_insufficient() {
    let err = plan(&Region::sized(0.20, 0.78), 0.16, 0.18, 0.07, &grid()).unwrap_err();
    assert!(err.is_insufficient_space());
    assert!(matches!(err, LayoutError::InsufficientSpace { .. }));
}

#[test]
fn test_non_square_counts_are_independent() {
    let result = plan(&Region::sized(1.0, 0.5), 0.16, 0.18, 0.07, &grid()).unwrap();
    assert_eq!(result.columns, 3);
    assert_eq!(result.rows, 1);
}

#[test]
fn test_builtin_technology_end_to_end() {
    let registry = TechnologyRegistry::builtin();
    let generator = CutArrayGenerator::from_registry(&registry, "sg13").unwrap();

    let via = generator
        .place(&LayerId::new("Via1"), &Region::sized(1.0, 1.0))
        .unwrap();
    assert!(!via.decision.relaxed);
    // floor((1.0 - 0.02 + 0.22 + 0.001) / 0.41) = 2
    assert_eq!(via.placement.counts(), (2, 2));

    let err = CutArrayGenerator::from_registry(&registry, "gf180").unwrap_err();
    assert!(err.is_unknown_technology());
}

#[test]
fn test_parallel_planning_shares_registry() {
    let registry = TechnologyRegistry::builtin();
    let layer = LayerId::new("Cont");

    let sequential: Vec<_> = (1..=16)
        .map(|i| {
            let size = 0.30 + 0.1 * i as f64;
            CutArrayGenerator::from_registry(&registry, "sg13")
                .and_then(|g| g.place(&layer, &Region::sized(size, size)))
                .unwrap()
        })
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=16)
            .map(|i| {
                let registry = &registry;
                let layer = &layer;
                scope.spawn(move || {
                    let size = 0.30 + 0.1 * i as f64;
                    CutArrayGenerator::from_registry(registry, "sg13")
                        .and_then(|g| g.place(layer, &Region::sized(size, size)))
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_demo_technology_file_matches_builtin() {
    let registry = cutgen_tech::from_str(include_str!("../demos/ihp_sg13.toml")).unwrap();
    let demo = registry.get("sg13_dev").unwrap();
    let builtin = cutgen_tech::builtin::sg13();

    assert_eq!(demo.grid, builtin.grid);
    assert_eq!(demo.layers, builtin.layers);
    assert_eq!(demo.antenna, builtin.antenna);
}
