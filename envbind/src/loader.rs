
use tracing::debug;

use crate::{
    aggregate::aggregate,
    build::{build, select_strategy},
    describe::EnvBind,
    error::{InvalidEnvironmentError, LoadError},
    lookup::{Lookup, ProcessEnv},
};

/// Loads [`EnvBind`] types from a [`Lookup`] source.
///
/// Every call to [`Loader::load`] resolves from scratch; nothing is cached
/// between calls apart from each type's description.
#[derive(Debug, Clone, Default)]
pub struct Loader<L = ProcessEnv> {
    lookup: L,
}

impl Loader<ProcessEnv> {
    /// A loader reading the process environment.
    pub fn new() -> Self {
        Self { lookup: ProcessEnv }
    }
}

impl<L: Lookup> Loader<L> {
    pub fn with_lookup(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolves and builds a `T`. See [`load_from`].
    pub fn load<T: EnvBind>(&self) -> Result<T, LoadError> {
        load_from(&self.lookup)
    }

    /// Lists the keys each bound field of `T` reads, one field per line, as
    /// `KEY|ALTERNATIVE=fallback`.
    pub fn requirements<T: EnvBind>(&self) -> String {
        requirements::<T>()
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.lookup.lookup(key)
    }

    /// The value of `key` parsed as an `i32`, or `None` if it is missing or
    /// malformed.
    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.lookup.lookup(key)?.parse().ok()
    }

    /// The value of `key` parsed as an `i64`, or `None` if it is missing or
    /// malformed.
    pub fn get_long(&self, key: &str) -> Option<i64> {
        self.lookup.lookup(key)?.parse().ok()
    }
}

/// Loads a `T` from the process environment.
pub fn load<T: EnvBind>() -> Result<T, LoadError> {
    load_from(&ProcessEnv)
}

/// Resolves and builds a `T` from `lookup`.
///
/// Fails with [`LoadError::TypeConfiguration`] when `T` itself cannot be
/// bound, and with [`LoadError::InvalidEnvironment`] when any required field
/// has no valid candidate. The type is checked before any key is looked up.
pub fn load_from<T, L>(lookup: &L) -> Result<T, LoadError>
where
    T: EnvBind,
    L: Lookup + ?Sized,
{
    let description = T::description();
    let type_name = description.type_name;

    debug!(type_name, "inspecting");
    let specs = description.field_specs()?;
    let strategy = select_strategy(description, &specs)?;

    debug!(type_name, fields = specs.len(), ?strategy, "resolving");
    let values = match aggregate(&specs, lookup) {
        Ok(values) => values,
        Err(report) => {
            debug!(
                type_name,
                unsatisfied = report.unsatisfied().count(),
                "environment unsatisfied"
            );
            return Err(InvalidEnvironmentError::new(type_name, report).into());
        }
    };

    debug!(type_name, "building");
    let instance = build::<T>(&strategy, &specs, values)?;

    debug!(type_name, "loaded");
    Ok(instance)
}

/// See [`Loader::requirements`].
pub fn requirements<T: EnvBind>() -> String {
    let mut requirements = String::new();

    for field in &T::description().fields {
        let Some(rule) = &field.binding else {
            continue;
        };
        let fallback = rule.fallback.as_deref().unwrap_or_default();
        requirements.push_str(&format!("{}={fallback}\n", rule.keys.join("|")));
    }

    requirements
}

pub fn get_string(key: &str) -> Option<String> {
    Loader::new().get_string(key)
}

pub fn get_int(key: &str) -> Option<i32> {
    Loader::new().get_int(key)
}

pub fn get_long(key: &str) -> Option<i64> {
    Loader::new().get_long(key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn loader(pairs: &[(&str, &str)]) -> Loader<HashMap<String, String>> {
        Loader::with_lookup(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn scalar_accessors() {
        let loader = loader(&[("INT", "3"), ("BIG", "4294967296"), ("TEXT", "foo")]);

        assert_eq!(loader.get_string("TEXT").as_deref(), Some("foo"));
        assert_eq!(loader.get_string("NOPE"), None);
        assert_eq!(loader.get_int("INT"), Some(3));
        assert_eq!(loader.get_long("INT"), Some(3));
        assert_eq!(loader.get_int("BIG"), None);
        assert_eq!(loader.get_long("BIG"), Some(4_294_967_296));
        assert_eq!(loader.get_int("TEXT"), None);
        assert_eq!(loader.get_long("NOPE"), None);
    }

    #[test]
    fn process_scalar_accessors() {
        temp_env::with_vars(
            [
                ("ENVBIND_ACCESSOR_INT", Some("11")),
                ("ENVBIND_ACCESSOR_BAD", Some("eleven")),
            ],
            || {
                assert_eq!(get_int("ENVBIND_ACCESSOR_INT"), Some(11));
                assert_eq!(get_long("ENVBIND_ACCESSOR_INT"), Some(11));
                assert_eq!(get_int("ENVBIND_ACCESSOR_BAD"), None);
                assert_eq!(
                    get_string("ENVBIND_ACCESSOR_BAD").as_deref(),
                    Some("eleven")
                );
            },
        );
    }
}
