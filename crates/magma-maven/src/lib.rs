//! Client for the Magma release repository.
//!
//! Resolves the published version catalog from the repository's
//! maven-metadata.xml index (with a directory-listing fallback), probes
//! individual releases for downloadable artifacts, and builds canonical
//! download URLs. Upstream unavailability is a normal condition: fetchers
//! degrade to empty or absent values instead of erroring.

pub mod repo;
pub mod utils;
