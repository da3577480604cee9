//! Tests for the configuration system: validation, presets, environment
//! parsing, and file round trips.

use super::*;
use crate::error::ContainerError;
use crate::{DynArray, StringHashSet};
use std::env;
use std::fs;
use tempfile::tempdir;

/// Defaults validate and match the documented policy
#[test]
fn test_container_config_defaults() {
    let config = ContainerConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.array_initial_capacity, 4);
    assert_eq!(config.array_growth_factor, 2);
    assert_eq!(config.set_initial_capacity, 8);
    assert_eq!(config.set_max_load_factor, 0.7);
}

/// Every preset is valid
#[test]
fn test_all_presets_valid() {
    assert!(ContainerConfig::performance_preset().validate().is_ok());
    assert!(ContainerConfig::memory_preset().validate().is_ok());
    assert!(ContainerConfig::realtime_preset().validate().is_ok());
    assert!(ContainerConfig::balanced_preset().validate().is_ok());
    assert_eq!(ContainerConfig::balanced_preset(), ContainerConfig::default());
}

#[test]
fn test_preset_characteristics() {
    let perf = ContainerConfig::performance_preset();
    let mem = ContainerConfig::memory_preset();
    let rt = ContainerConfig::realtime_preset();

    assert!(perf.set_initial_capacity > mem.set_initial_capacity);
    assert!(perf.set_max_load_factor < mem.set_max_load_factor);
    assert!(mem.array_initial_capacity <= perf.array_initial_capacity);
    assert!(rt.array_growth_factor > perf.array_growth_factor);
}

/// Each rule rejects its field with a configuration error naming it
#[test]
fn test_validation_failures() {
    let cases = [
        (
            ContainerConfig { array_initial_capacity: 0, ..Default::default() },
            "array_initial_capacity",
        ),
        (
            ContainerConfig { array_growth_factor: 1, ..Default::default() },
            "array_growth_factor",
        ),
        (
            ContainerConfig { set_initial_capacity: 0, ..Default::default() },
            "set_initial_capacity",
        ),
        (
            ContainerConfig { set_max_load_factor: 0.0, ..Default::default() },
            "set_max_load_factor",
        ),
        (
            ContainerConfig { set_max_load_factor: 1.0, ..Default::default() },
            "set_max_load_factor",
        ),
        (
            ContainerConfig { set_max_load_factor: f64::NAN, ..Default::default() },
            "set_max_load_factor",
        ),
    ];

    for (config, field) in cases {
        match config.validate() {
            Err(ContainerError::Configuration { message }) => {
                assert!(message.contains(field), "{} missing from '{}'", field, message);
            }
            other => panic!("expected configuration error for {}, got {:?}", field, other),
        }
    }
}

#[test]
fn test_validation_error_display() {
    let err = ValidationError::new("set_max_load_factor", "1.5", "too high")
        .with_suggestion("0.5");
    let text = err.to_string();
    assert!(text.contains("set_max_load_factor"));
    assert!(text.contains("1.5"));
    assert!(text.contains("Suggested values: 0.5"));

    let converted: ContainerError = err.into();
    assert_eq!(converted.category(), "config");
}

/// Variables are read under the given prefix
#[test]
fn test_environment_variable_parsing() {
    env::set_var("SDKIT_TEST_ENV_ARRAY_INITIAL_CAPACITY", "16");
    env::set_var("SDKIT_TEST_ENV_ARRAY_GROWTH_FACTOR", "3");
    env::set_var("SDKIT_TEST_ENV_SET_INITIAL_CAPACITY", "32");
    env::set_var("SDKIT_TEST_ENV_SET_MAX_LOAD_FACTOR", "0.5");

    let config = ContainerConfig::from_env_with_prefix("SDKIT_TEST_ENV_")
        .expect("Failed to parse ContainerConfig from environment");
    assert_eq!(config.array_initial_capacity, 16);
    assert_eq!(config.array_growth_factor, 3);
    assert_eq!(config.set_initial_capacity, 32);
    assert_eq!(config.set_max_load_factor, 0.5);

    env::remove_var("SDKIT_TEST_ENV_ARRAY_INITIAL_CAPACITY");
    env::remove_var("SDKIT_TEST_ENV_ARRAY_GROWTH_FACTOR");
    env::remove_var("SDKIT_TEST_ENV_SET_INITIAL_CAPACITY");
    env::remove_var("SDKIT_TEST_ENV_SET_MAX_LOAD_FACTOR");
}

/// Unparsable values fall back to defaults; parsable but invalid ones fail
#[test]
fn test_environment_invalid_values() {
    env::set_var("SDKIT_TEST_BAD_ARRAY_INITIAL_CAPACITY", "lots");
    let config = ContainerConfig::from_env_with_prefix("SDKIT_TEST_BAD_").unwrap();
    assert_eq!(config.array_initial_capacity, 4);
    env::remove_var("SDKIT_TEST_BAD_ARRAY_INITIAL_CAPACITY");

    env::set_var("SDKIT_TEST_BAD_SET_MAX_LOAD_FACTOR", "1.5");
    let result = ContainerConfig::from_env_with_prefix("SDKIT_TEST_BAD_");
    assert!(matches!(result, Err(ContainerError::Configuration { .. })));
    env::remove_var("SDKIT_TEST_BAD_SET_MAX_LOAD_FACTOR");
}

#[test]
fn test_environment_unset_gives_defaults() {
    let config = ContainerConfig::from_env_with_prefix("SDKIT_TEST_UNSET_").unwrap();
    assert_eq!(config, ContainerConfig::default());
}

#[test]
fn test_environment_boolean_parsing() {
    let test_cases = [
        ("true", true),
        ("TRUE", true),
        ("1", true),
        ("yes", true),
        ("on", true),
        (" On ", true),
        ("false", false),
        ("0", false),
        ("no", false),
        ("off", false),
        ("invalid", false),
        ("", false),
    ];

    for (value, expected) in test_cases.iter() {
        env::set_var("SDKIT_TEST_BOOL_VALUE", value);
        let result = parse_env_bool("SDKIT_TEST_BOOL_VALUE", !expected);
        assert_eq!(result, *expected, "Failed for value: '{}'", value);
    }
    env::remove_var("SDKIT_TEST_BOOL_VALUE");

    assert!(parse_env_bool("SDKIT_TEST_BOOL_MISSING", true));
    assert!(!parse_env_bool("SDKIT_TEST_BOOL_MISSING", false));
}

#[test]
fn test_file_serialization() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("container_config.json");

    let config = ContainerConfig::realtime_preset();
    config.save_to_file(&path).unwrap();

    let loaded = ContainerConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

/// Missing fields take their defaults
#[test]
fn test_partial_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("partial.json");
    fs::write(&path, r#"{ "set_initial_capacity": 64 }"#).unwrap();

    let loaded = ContainerConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.set_initial_capacity, 64);
    assert_eq!(loaded.array_growth_factor, 2);
}

#[test]
fn test_file_errors() {
    let temp_dir = tempdir().unwrap();

    let missing = ContainerConfig::load_from_file(temp_dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ContainerError::Configuration { .. })));

    let garbage = temp_dir.path().join("garbage.json");
    fs::write(&garbage, "not json").unwrap();
    assert!(matches!(
        ContainerConfig::load_from_file(&garbage),
        Err(ContainerError::Configuration { .. })
    ));

    let invalid = temp_dir.path().join("invalid.json");
    fs::write(&invalid, r#"{ "array_growth_factor": 1 }"#).unwrap();
    assert!(matches!(
        ContainerConfig::load_from_file(&invalid),
        Err(ContainerError::Configuration { .. })
    ));
}

/// Configured policy reaches the containers
#[test]
fn test_config_drives_containers() {
    let config = ContainerConfig {
        array_initial_capacity: 3,
        array_growth_factor: 3,
        set_initial_capacity: 32,
        set_max_load_factor: 0.5,
    };

    let mut arr = DynArray::with_config(&config);
    arr.push_back("a");
    assert_eq!(arr.capacity(), 3);
    for s in ["b", "c", "d"] {
        arr.push_back(s);
    }
    assert_eq!(arr.capacity(), 9);

    let mut set = StringHashSet::with_config(&config);
    assert_eq!(set.capacity(), 32);
    for i in 0..17 {
        set.add(i.to_string());
    }
    assert_eq!(set.capacity(), 64);
}
