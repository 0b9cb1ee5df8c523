// ABOUTME: Registry of portal configurations looked up by name or article URL.
// ABOUTME: URL lookup picks the portal with the longest matching URL prefix.

use std::collections::HashMap;

use crate::config::PortalConfig;

/// Registry for looking up portals.
#[derive(Debug, Default, Clone)]
pub struct PortalRegistry {
    map: HashMap<String, PortalConfig>,
}

impl PortalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a portal under its name, replacing any previous one.
    pub fn register(&mut self, portal: PortalConfig) {
        self.map.insert(portal.name().to_string(), portal);
    }

    pub fn get(&self, name: &str) -> Option<&PortalConfig> {
        self.map.get(name)
    }

    /// The portal owning `url`; the longest URL prefix wins.
    pub fn for_url(&self, url: &str) -> Option<&PortalConfig> {
        self.map
            .values()
            .filter(|p| p.rules().owns_url(url))
            .max_by_key(|p| p.rules().url_prefix.len())
    }

    /// Registered portal names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
