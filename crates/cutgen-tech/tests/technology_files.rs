//! Loading technology files from disk

use cutgen_tech::{LayerId, SpacingRuleProfile, TechError, TechnologyRegistry};
use std::fs;
use tempfile::TempDir;

const TWO_TECHNOLOGIES: &str = r#"
[[technology]]
name = "sg13_dev"

[technology.grid]
pitch = 0.005
epsilon = 0.001

[[technology.layer]]
name = "Cont"
cut_size = 0.16
spacing = 0.18
overhang = 0.07
density = { threshold_rows = 4, threshold_cols = 4, relaxed_spacing = 0.20 }

[technology.antenna]
cut_layer = "Cont"
recognition_overage = 0.01
label = "dant"

[[technology]]
name = "sg13_flat"

[technology.grid]
pitch = 0.005

[[technology.layer]]
name = "Cont"
cut_size = 0.16
spacing = 0.18
overhang = 0.07

[technology.antenna]
cut_layer = "Cont"
"#;

#[test]
fn test_load_from_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tech.toml");
    fs::write(&path, TWO_TECHNOLOGIES).unwrap();

    let registry = cutgen_tech::from_path(&path).unwrap();
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec!["sg13_dev", "sg13_flat"]
    );

    let dev = registry.get("sg13_dev").unwrap();
    let cont = dev.layer(&LayerId::new("Cont")).unwrap();
    assert_eq!(cont.spacing.relaxed_spacing(), Some(0.20));

    let flat = registry.get("sg13_flat").unwrap();
    let cont = flat.layer(&LayerId::new("Cont")).unwrap();
    assert_eq!(cont.spacing.profile, SpacingRuleProfile::Flat { spacing: 0.18 });
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = TechnologyRegistry::from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, TechError::Io(_)));
}

#[test]
fn test_duplicate_names_rejected() {
    let text = TWO_TECHNOLOGIES.replace("sg13_flat", "sg13_dev");
    let err = cutgen_tech::from_str(&text).unwrap_err();
    assert_eq!(err, TechError::DuplicateTechnology("sg13_dev".to_string()));
}

#[test]
fn test_invalid_values_rejected_at_load() {
    let negative = TWO_TECHNOLOGIES.replace("cut_size = 0.16", "cut_size = -0.16");
    assert!(matches!(
        cutgen_tech::from_str(&negative),
        Err(TechError::InvalidParameter { .. })
    ));

    let bad_grid = TWO_TECHNOLOGIES.replace("pitch = 0.005", "pitch = 0.0");
    assert!(matches!(
        cutgen_tech::from_str(&bad_grid),
        Err(TechError::InvalidParameter { .. })
    ));

    let unknown_cut_layer = TWO_TECHNOLOGIES.replace("cut_layer = \"Cont\"", "cut_layer = \"Via9\"");
    assert!(matches!(
        cutgen_tech::from_str(&unknown_cut_layer),
        Err(TechError::UnknownLayer { .. })
    ));
}

#[test]
fn test_unknown_technology_lookup() {
    let registry = cutgen_tech::from_str(TWO_TECHNOLOGIES).unwrap();
    assert_eq!(
        registry.get("sg13g2").unwrap_err(),
        TechError::UnknownTechnology("sg13g2".to_string())
    );
}
