use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// A source of raw string values keyed by name.
///
/// Lookups must be free of side effects: a key is read once per candidate
/// and the same source may be shared between threads.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
///
/// Variables whose value is not valid Unicode are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        (self)(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_sources() {
        let hash = HashMap::from([("A".to_owned(), "1".to_owned())]);
        let btree = BTreeMap::from([("A".to_owned(), "1".to_owned())]);

        assert_eq!(hash.lookup("A").as_deref(), Some("1"));
        assert_eq!(btree.lookup("A").as_deref(), Some("1"));
        assert_eq!(hash.lookup("B"), None);
    }

    #[test]
    fn closure_source() {
        let source = |key: &str| (key == "PORT").then(|| "8080".to_owned());

        assert_eq!(source.lookup("PORT").as_deref(), Some("8080"));
        assert_eq!(source.lookup("HOST"), None);
    }

    #[test]
    fn process_env_source() {
        temp_env::with_var("ENVBIND_LOOKUP_TEST", Some("value"), || {
            assert_eq!(
                ProcessEnv.lookup("ENVBIND_LOOKUP_TEST").as_deref(),
                Some("value")
            );
        });
        temp_env::with_var_unset("ENVBIND_LOOKUP_TEST", || {
            assert_eq!(ProcessEnv.lookup("ENVBIND_LOOKUP_TEST"), None);
        });
    }
}
