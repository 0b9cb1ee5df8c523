// ABOUTME: Builtin news portal configurations for the TEI extraction engine.
// ABOUTME: Provides builtin_registry() with every shipped portal registered by name.

//! Portal configurations.
//!
//! Each portal module exposes `portal()`, returning a ready [`PortalConfig`]
//! built from rules embedded in `data/` and the portal's extractor function.

pub mod hvg;

use tei_engine::{PortalConfig, PortalRegistry, Result};

/// Every shipped portal.
pub fn builtin_portals() -> Result<Vec<PortalConfig>> {
    Ok(vec![hvg::portal()?])
}

/// Loads the builtin portal registry.
pub fn builtin_registry() -> Result<PortalRegistry> {
    let mut registry = PortalRegistry::new();
    for portal in builtin_portals()? {
        registry.register(portal);
    }
    tracing::debug!(portals = registry.len(), "loaded builtin portals");
    Ok(registry)
}
