use std::collections::HashMap;

use envbind::{
    CandidateError, CoercionError, EnvBind, FALLBACK_KEY, LoadError, TypeConfigurationError,
    ValidationError,
};

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn captures_every_missing_field() {
    #[derive(EnvBind, Debug)]
    #[allow(unused)]
    pub struct Config {
        #[env(from)]
        first: String,
        #[env(from)]
        second: String,
        #[env(from)]
        third: String,
    }

    let expected = r#"failed to bind environment for type `Config`:
  field `first`:
    "FIRST": Missing environment variable
  field `second`:
    "SECOND": Missing environment variable
  field `third`:
    "THIRD": Missing environment variable
"#;
    let actual = Config::from_lookup(&env(&[])).unwrap_err().to_string();

    assert_eq!(expected, actual);
}

#[test]
fn missing_required_key_names_field_and_key() {
    #[derive(EnvBind, Debug)]
    #[allow(unused)]
    pub struct Config {
        #[env(from = "X")]
        value: String,
    }

    let err = Config::from_lookup(&env(&[])).unwrap_err();
    let LoadError::InvalidEnvironment(err) = &err else {
        panic!("expected an environment error");
    };
    let message = err.to_string();

    assert_eq!(err.type_name(), "Config");
    assert!(message.contains("field `value`"));
    assert!(message.contains("\"X\""));
}

#[test]
fn blank_value_fails_validation() {
    #[derive(EnvBind, Debug)]
    #[allow(unused)]
    pub struct Config {
        #[env(from = "Y")]
        value: String,
    }

    let err = Config::from_lookup(&env(&[("Y", "")])).unwrap_err();
    let report = err.as_invalid_environment().unwrap().report();
    let resolution = report.get("value").unwrap();
    let failures: Vec<_> = resolution.failures().collect();

    assert_eq!(
        failures,
        [("Y", &CandidateError::Validation(ValidationError::Blank))]
    );
}

#[test]
fn boolean_rejects_numeric_literal() {
    #[derive(EnvBind, Debug)]
    #[allow(unused)]
    pub struct Config {
        #[env(from = "ENABLED")]
        enabled: bool,
    }

    let err = Config::from_lookup(&env(&[("ENABLED", "1")])).unwrap_err();
    let report = err.as_invalid_environment().unwrap().report();
    let (key, error) = report.get("enabled").unwrap().failures().next().unwrap();

    assert_eq!(key, "ENABLED");
    assert!(matches!(
        error,
        CandidateError::Coercion(CoercionError::InvalidBool { .. })
    ));
}

#[test]
fn invalid_fallback_is_reported_under_pseudo_key() {
    #[derive(EnvBind, Debug)]
    #[allow(unused)]
    pub struct Config {
        #[env(from = "PORT", fallback = "eighty")]
        port: u16,
    }

    let actual = Config::from_lookup(&env(&[])).unwrap_err().to_string();
    let expected = format!(
        r#"failed to bind environment for type `Config`:
  field `port`:
    "PORT": Missing environment variable
    "{FALLBACK_KEY}": Failed to coerce type to "u16": invalid numeric format
"#
    );

    assert_eq!(expected, actual);
}

#[test]
fn report_never_contains_values() {
    #[derive(EnvBind, Debug)]
    #[allow(unused)]
    pub struct Config {
        #[env(from = "API_TOKEN")]
        token: String,
        #[env(from = "API_PORT")]
        port: u16,
    }

    let lookup = env(&[("API_TOKEN", "s3cr3t"), ("API_PORT", "s3cr3t-port")]);
    let message = Config::from_lookup(&lookup).unwrap_err().to_string();

    assert!(!message.contains("s3cr3t"));
    assert!(!message.contains("field `token`"));
    assert!(message.contains("field `port`"));
}

#[test]
fn optional_fields_never_fail() {
    #[derive(EnvBind, Debug)]
    #[allow(unused)]
    pub struct Config {
        #[env(from = "MAYBE", required = false)]
        maybe: Option<i64>,
    }

    let config = Config::from_lookup(&env(&[("MAYBE", "nope")])).unwrap();

    assert_eq!(config.maybe, None);
}

#[test]
fn type_errors_are_not_environment_errors() {
    #[derive(EnvBind, Debug)]
    #[allow(unused)]
    pub struct Config {
        #[env(from = "HOST")]
        host: String,
        cache: Vec<String>,
    }

    let err = Config::from_lookup(&env(&[("HOST", "localhost")])).unwrap_err();

    assert!(err.as_invalid_environment().is_none());
    assert_eq!(
        err.as_type_configuration(),
        Some(&TypeConfigurationError::UnboundFields {
            type_name: "Config",
            bound: 1,
            total: 2,
        })
    );
}
