use super::*;
use crate::config::parser::{parse_config, parse_position, parse_size};

#[test]
fn test_defaults_match_allocator() {
    let config = parse_config("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.z_order().unwrap(), ZOrderAllocator::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_z_bounds_and_sizes() {
    let config_str = r#"
# stacking
z_base 10
z_max 500
overlay_z 600

min_size 200x150
container 1280x720
focus_new_windows no
"#;

    let config = parse_config(config_str).unwrap();
    assert_eq!(config.z_base, 10);
    assert_eq!(config.z_max, 500);
    assert_eq!(config.overlay_z, 600);
    assert_eq!(config.min_size, Size::new(200, 150));
    assert_eq!(config.container, Some(Size::new(1280, 720)));
    assert!(!config.focus_new_windows);
}

#[test]
fn test_variables_are_expanded() {
    let config_str = r#"
set $taskbar 5000
set $top $taskbar
overlay_z $top
"#;

    let config = parse_config(config_str).unwrap();
    assert_eq!(config.get_variable("top").as_deref(), Some("5000"));
    assert_eq!(config.overlay_z, 5000);
}

#[test]
fn test_bad_lines_are_skipped() {
    let config_str = r#"
z_base many
min_size 300by200
z_max 4000
unknown_directive 1
"#;

    let config = parse_config(config_str).unwrap();
    assert_eq!(config.z_base, ZOrderAllocator::DEFAULT_BASE_Z);
    assert_eq!(config.min_size, DEFAULT_MIN_SIZE);
    assert_eq!(config.z_max, 4000);
}

#[test]
fn test_validate_rejects_inverted_z_bounds() {
    let config = parse_config("z_base 5000\nz_max 4000").unwrap();
    assert!(matches!(config.validate(), Err(CasementError::Config(_))));

    let config = parse_config("overlay_z 10").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_overlay_at_integer_ceiling() {
    let config = parse_config("z_base 10\nz_max 50\noverlay_z 4294967295").unwrap();
    assert_eq!(config.overlay_z, u32::MAX);
    assert!(matches!(config.validate(), Err(CasementError::Config(_))));
}

#[test]
fn test_validate_rejects_non_positive_min_size() {
    let config = parse_config("min_size 0x200").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_size_and_position_helpers() {
    assert_eq!(parse_size("1920x1080").unwrap(), Size::new(1920, 1080));
    assert!(parse_size("1920").is_err());
    assert_eq!(
        parse_position("-50,20").unwrap(),
        crate::geometry::Position::new(-50, 20)
    );
    assert!(parse_position("a,b").is_err());
}
