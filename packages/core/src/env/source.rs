// ABOUTME: Property source abstraction over the host's key-value configuration
// ABOUTME: Implemented for in-memory maps and the process environment

use std::collections::{BTreeMap, HashMap};

/// A key-value lookup supplied by the hosting application's configuration
/// system. Resolution itself lives on [`crate::env::Property`].
pub trait PropertySource {
    /// Raw string value for `key`, or `None` when the key is not set.
    fn get_raw(&self, key: &str) -> Option<String>;
}

impl PropertySource for HashMap<String, String> {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl PropertySource for BTreeMap<String, String> {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<S: PropertySource + ?Sized> PropertySource for &S {
    fn get_raw(&self, key: &str) -> Option<String> {
        (**self).get_raw(key)
    }
}

/// Property source backed by the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvSource;

impl PropertySource for ProcessEnvSource {
    fn get_raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_map_source() {
        let mut source = HashMap::new();
        source.insert("app.port".to_string(), "8080".to_string());

        assert_eq!(source.get_raw("app.port"), Some("8080".to_string()));
        assert_eq!(source.get_raw("app.host"), None);
    }

    #[test]
    fn test_process_env_source() {
        std::env::set_var("JMPSL_SOURCE_TEST_KEY", "present");
        assert_eq!(
            ProcessEnvSource.get_raw("JMPSL_SOURCE_TEST_KEY"),
            Some("present".to_string())
        );
        assert_eq!(ProcessEnvSource.get_raw("JMPSL_SOURCE_TEST_MISSING"), None);
    }
}
