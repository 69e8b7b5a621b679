//! Output filename policy for scripts and stylesheets.

use citypack_core::BuildMode;
use serde::{Deserialize, Serialize};

/// Placeholder the engine replaces with the chunk (site) name
pub const CHUNK_PLACEHOLDER: &str = "[chunk]";

/// Filename pattern for an emitted asset kind (`js`, `css`, ...).
///
/// Production filenames embed a content hash for long-term caching;
/// development filenames never do.
pub fn filename_pattern(mode: BuildMode, kind: &str) -> String {
    match mode {
        BuildMode::Development => format!("[name].{}", kind),
        BuildMode::Production => format!("[name].[contenthash].{}", kind),
    }
}

/// Per-chunk filename rule: every chunk lands under its own site's `src/`
pub fn chunk_filename(mode: BuildMode, kind: &str) -> ChunkFilename {
    ChunkFilename {
        directory: format!("{}/src", CHUNK_PLACEHOLDER),
        pattern: filename_pattern(mode, kind),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkFilename {
    pub directory: String,
    pub pattern: String,
}

impl ChunkFilename {
    /// Resolve the rule for one chunk, e.g. `moscow/src/[name].js`
    pub fn resolve(&self, chunk: &str) -> String {
        let directory = self.directory.replace(CHUNK_PLACEHOLDER, chunk);
        format!("{}/{}", directory, self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_pattern_has_no_hash() {
        for kind in ["js", "css", "mjs"] {
            let pattern = filename_pattern(BuildMode::Development, kind);
            assert_eq!(pattern, format!("[name].{}", kind));
            assert!(!pattern.contains("[contenthash]"));
        }
    }

    #[test]
    fn test_production_pattern_has_hash() {
        for kind in ["js", "css", "mjs"] {
            let pattern = filename_pattern(BuildMode::Production, kind);
            assert_eq!(pattern, format!("[name].[contenthash].{}", kind));
        }
    }

    #[test]
    fn test_chunk_filename_resolves_per_site() {
        let rule = chunk_filename(BuildMode::Production, "js");
        assert_eq!(rule.resolve("moscow"), "moscow/src/[name].[contenthash].js");
        assert_eq!(rule.resolve("kazan"), "kazan/src/[name].[contenthash].js");

        let rule = chunk_filename(BuildMode::Development, "css");
        assert_eq!(rule.resolve("moscow"), "moscow/src/[name].css");
    }

    #[test]
    fn test_pattern_is_deterministic() {
        assert_eq!(
            chunk_filename(BuildMode::Production, "js"),
            chunk_filename(BuildMode::Production, "js")
        );
    }
}
