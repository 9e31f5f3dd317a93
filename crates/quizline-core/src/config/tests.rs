use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_quizline_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("QUIZLINE_PORT");
        env::remove_var("QUIZLINE_BIND_ADDR");
        env::remove_var("QUIZLINE_DATABASE_URL");
        env::remove_var("QUIZLINE_MODEL_PATH");
        env::remove_var("QUIZLINE_EMBEDDING_URL");
        env::remove_var("QUIZLINE_EMBEDDING_MODEL");
        env::remove_var("QUIZLINE_EMBEDDING_API_KEY");
        env::remove_var("QUIZLINE_SIMILARITY_THRESHOLD");
        env::remove_var("QUIZLINE_KEYWORD_FALLBACK");
        env::remove_var("QUIZLINE_STRIP_PUNCTUATION");
        env::remove_var("QUIZLINE_ALLOWED_ORIGIN");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 5000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.database_url, "sqlite://quizline.db?mode=rwc");
    assert!(config.model_path.is_none());
    assert!(config.embedding_url.is_none());
    assert!((config.similarity_threshold - 0.70).abs() < f32::EPSILON);
    assert!(!config.keyword_fallback);
    assert!(config.strip_punctuation);
    assert_eq!(config.allowed_origin, "http://localhost:3000");
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:5000");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_quizline_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 5000);
    assert_eq!(config.embedding_model, DEFAULT_EMBEDDING_MODEL);
    assert!(config.embedding_api_key.is_none());
}

#[test]
#[serial]
fn test_from_env_custom_port_and_addr() {
    clear_quizline_env();

    with_env_vars(
        &[("QUIZLINE_PORT", "8081"), ("QUIZLINE_BIND_ADDR", "::1")],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.port, 8081);
            assert_eq!(
                config.bind_addr,
                IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
            );
        },
    );
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_quizline_env();

    with_env_vars(&[("QUIZLINE_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_quizline_env();

    with_env_vars(&[("QUIZLINE_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_quizline_env();

    with_env_vars(&[("QUIZLINE_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_threshold() {
    clear_quizline_env();

    with_env_vars(&[("QUIZLINE_SIMILARITY_THRESHOLD", "0.65")], || {
        let config = Config::from_env().expect("should parse");
        assert!((config.similarity_threshold - 0.65).abs() < f32::EPSILON);
    });
}

#[test]
#[serial]
fn test_threshold_out_of_range() {
    clear_quizline_env();

    with_env_vars(&[("QUIZLINE_SIMILARITY_THRESHOLD", "1.5")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold { .. }));
    });
}

#[test]
#[serial]
fn test_threshold_not_a_number() {
    clear_quizline_env();

    with_env_vars(&[("QUIZLINE_SIMILARITY_THRESHOLD", "high")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdParseError { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_boolean_flags() {
    clear_quizline_env();

    with_env_vars(
        &[
            ("QUIZLINE_KEYWORD_FALLBACK", "TRUE"),
            ("QUIZLINE_STRIP_PUNCTUATION", "off"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert!(config.keyword_fallback);
            assert!(!config.strip_punctuation);
        },
    );
}

#[test]
#[serial]
fn test_invalid_boolean_flag() {
    clear_quizline_env();

    with_env_vars(&[("QUIZLINE_KEYWORD_FALLBACK", "maybe")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBool {
                name: "QUIZLINE_KEYWORD_FALLBACK",
                ..
            }
        ));
    });
}

#[test]
#[serial]
fn test_from_env_embedding_settings() {
    clear_quizline_env();

    with_env_vars(
        &[
            ("QUIZLINE_MODEL_PATH", "/models/minilm"),
            ("QUIZLINE_EMBEDDING_URL", "http://embeddings.local/v1"),
            ("QUIZLINE_EMBEDDING_MODEL", "nomic-embed-text"),
            ("QUIZLINE_EMBEDDING_API_KEY", "  secret  "),
            ("QUIZLINE_DATABASE_URL", "sqlite::memory:"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.model_path, Some(PathBuf::from("/models/minilm")));
            assert_eq!(
                config.embedding_url.as_deref(),
                Some("http://embeddings.local/v1")
            );
            assert_eq!(config.embedding_model, "nomic-embed-text");
            assert_eq!(config.embedding_api_key.as_deref(), Some("secret"));
            assert_eq!(config.database_url, "sqlite::memory:");
        },
    );
}

#[test]
#[serial]
fn test_blank_optional_values_are_ignored() {
    clear_quizline_env();

    with_env_vars(
        &[("QUIZLINE_MODEL_PATH", "   "), ("QUIZLINE_EMBEDDING_URL", "")],
        || {
            let config = Config::from_env().expect("should parse");
            assert!(config.model_path.is_none());
            assert!(config.embedding_url.is_none());
        },
    );
}

#[test]
fn test_validate_success_with_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_nonexistent_model_path() {
    let config = Config {
        model_path: Some(PathBuf::from("/nonexistent/path/to/model")),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
}

#[test]
fn test_validate_model_path_is_file() {
    let config = Config {
        model_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotADirectory { .. }));
}

#[test]
fn test_validate_model_path_directory_ok() {
    let config = Config {
        model_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src")),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_out_of_range_threshold() {
    let config = Config {
        similarity_threshold: -0.1,
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidThreshold { .. }));
}

#[test]
fn test_validate_rejects_empty_database_url() {
    let config = Config {
        database_url: "  ".to_string(),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar { .. }));
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidPort {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("1 and 65535"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));

    let err = ConfigError::InvalidThreshold {
        value: "2".to_string(),
    };
    assert!(err.to_string().contains("between 0.0 and 1.0"));
}
