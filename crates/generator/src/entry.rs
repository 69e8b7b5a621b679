use citypack_core::{Error, Result, Site};
use std::collections::BTreeMap;

/// Site name to entry module path
pub type EntryMap = BTreeMap<String, String>;

/// Build the entry map, one entry point per site.
///
/// An empty site list would produce a build with nothing in it, so it is
/// reported instead of returned.
pub fn entry_map(sites: &[Site]) -> Result<EntryMap> {
    if sites.is_empty() {
        return Err(Error::Configuration(
            "No sites declared; at least one entry point is required".to_string(),
        ));
    }

    let mut entries = EntryMap::new();
    for site in sites {
        let previous = entries.insert(site.as_str().to_string(), site.entry_path());
        if previous.is_some() {
            return Err(Error::Configuration(format!(
                "Site '{}' is declared more than once",
                site
            )));
        }
    }

    log::debug!("entry map: {} entries", entries.len());
    Ok(entries)
}
