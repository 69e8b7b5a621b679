//! Chunk splitting and minification directives.
//!
//! These only describe what the engine should do; running the minifiers is
//! the engine's job.

use citypack_core::BuildMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// PNG optimization level passed to the raster minifier
pub const PNG_OPTIMIZATION_LEVEL: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationDirectives {
    pub split_chunks: SplitChunks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimizer: Option<Vec<Minimizer>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitChunks {
    pub chunks: ChunkSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSelection {
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum Minimizer {
    Script,
    Stylesheet,
    Image(ImageMinimizer),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMinimizer {
    pub plugins: Vec<ImagePlugin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum ImagePlugin {
    Gifsicle {
        interlaced: bool,
    },
    Jpegtran {
        progressive: bool,
    },
    Optipng {
        #[serde(rename = "optimizationLevel")]
        optimization_level: u8,
    },
    Svgo {
        /// Keep the `viewBox` attribute so icons still scale
        #[serde(rename = "removeViewBox")]
        remove_view_box: bool,
        #[serde(rename = "addAttributes")]
        add_attributes: BTreeMap<String, String>,
    },
}

impl OptimizationDirectives {
    pub fn has_minimizers(&self) -> bool {
        self.minimizer.as_ref().is_some_and(|m| !m.is_empty())
    }
}

/// Directives for the given mode.
///
/// Chunks are always split; production additionally minifies scripts,
/// stylesheets and images, in that order. Development gets no minimizer list.
pub fn optimization_directives(mode: BuildMode) -> OptimizationDirectives {
    let minimizer = match mode {
        BuildMode::Development => None,
        BuildMode::Production => Some(vec![
            Minimizer::Script,
            Minimizer::Stylesheet,
            Minimizer::Image(image_minimizer()),
        ]),
    };

    OptimizationDirectives {
        split_chunks: SplitChunks {
            chunks: ChunkSelection::All,
        },
        minimizer,
    }
}

fn image_minimizer() -> ImageMinimizer {
    let mut svg_attributes = BTreeMap::new();
    svg_attributes.insert("xmlns".to_string(), SVG_NAMESPACE.to_string());

    ImageMinimizer {
        plugins: vec![
            ImagePlugin::Gifsicle { interlaced: true },
            ImagePlugin::Jpegtran { progressive: true },
            ImagePlugin::Optipng {
                optimization_level: PNG_OPTIMIZATION_LEVEL,
            },
            ImagePlugin::Svgo {
                remove_view_box: false,
                add_attributes: svg_attributes,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_has_no_minimizers() {
        let directives = optimization_directives(BuildMode::Development);
        assert_eq!(directives.split_chunks.chunks, ChunkSelection::All);
        assert!(directives.minimizer.is_none());
        assert!(!directives.has_minimizers());
    }

    #[test]
    fn test_production_minimizer_order() {
        let directives = optimization_directives(BuildMode::Production);
        assert_eq!(directives.split_chunks.chunks, ChunkSelection::All);

        let minimizers = directives.minimizer.unwrap();
        assert_eq!(minimizers.len(), 3);
        assert_eq!(minimizers[0], Minimizer::Script);
        assert_eq!(minimizers[1], Minimizer::Stylesheet);
        assert!(matches!(minimizers[2], Minimizer::Image(_)));
    }

    #[test]
    fn test_image_sub_directives() {
        let image = image_minimizer();
        assert_eq!(image.plugins.len(), 4);
        assert_eq!(image.plugins[0], ImagePlugin::Gifsicle { interlaced: true });
        assert_eq!(image.plugins[1], ImagePlugin::Jpegtran { progressive: true });
        assert_eq!(
            image.plugins[2],
            ImagePlugin::Optipng {
                optimization_level: 5
            }
        );
        match &image.plugins[3] {
            ImagePlugin::Svgo {
                remove_view_box,
                add_attributes,
            } => {
                assert!(!remove_view_box);
                assert_eq!(add_attributes["xmlns"], SVG_NAMESPACE);
            }
            other => panic!("expected svgo, got {:?}", other),
        }
    }

    #[test]
    fn test_development_serialization_omits_minimizer() {
        let json = serde_json::to_value(optimization_directives(BuildMode::Development)).unwrap();
        assert_eq!(json, serde_json::json!({ "splitChunks": { "chunks": "all" } }));
    }

    #[test]
    fn test_production_serialization_shape() {
        let json = serde_json::to_value(optimization_directives(BuildMode::Production)).unwrap();
        assert_eq!(json["minimizer"][0]["name"], "script");
        assert_eq!(json["minimizer"][1]["name"], "stylesheet");
        assert_eq!(json["minimizer"][2]["name"], "image");
        assert_eq!(json["minimizer"][2]["plugins"][2]["optimizationLevel"], 5);
        assert_eq!(json["minimizer"][2]["plugins"][3]["removeViewBox"], false);
    }
}
