//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use ascii4d::config::AppConfig;
use ascii4d_render::RotationPlane;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("A4D_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("A4D_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_numeric() {
    std::env::set_var("A4D_ANIMATION__FPS", "30");
    std::env::set_var("A4D_GLYPHS__EDGE_STRIDE", "3");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.animation.fps, 30);
    assert_eq!(config.glyphs.edge_stride, 3);
    std::env::remove_var("A4D_ANIMATION__FPS");
    std::env::remove_var("A4D_GLYPHS__EDGE_STRIDE");
}

#[test]
#[serial]
fn test_invalid_env_value_is_rejected() {
    std::env::set_var("A4D_ANIMATION__FPS", "0");
    let result = AppConfig::load();
    std::env::remove_var("A4D_ANIMATION__FPS");
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load_from(cwd.join("config")).unwrap();
    let defaults = AppConfig::default();
    if !cwd.join("config/user.toml").exists() {
        assert_eq!(config.window.title, defaults.window.title);
        assert_eq!(config.canvas_size(), (800, 800));
        assert_eq!(config.animation.fps, defaults.animation.fps);
        assert_eq!(
            config.projection.rotation_planes,
            vec![RotationPlane::XY, RotationPlane::ZW]
        );
        assert_eq!(config.to_glyph_style(), defaults.to_glyph_style());
        assert_eq!(config.to_projection_params(), defaults.to_projection_params());
    }
}
