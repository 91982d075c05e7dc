//! Icon catalog records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One icon in the catalog.
///
/// Immutable once loaded; identity is `name`, unique within a catalog.
/// Loading the catalog from storage belongs to the host — this crate only
/// indexes whatever it is handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconEntry {
    /// Canonical icon name, e.g. `arrow-clockwise`.
    pub name: String,

    /// Raw vector source handed to the host importer on placement.
    pub svg_source: String,

    /// Free-form search tags, e.g. `refresh`, `rotate`.
    #[serde(default)]
    pub tags: SmallVec<[String; 4]>,

    /// Catalog categories, e.g. `arrows`.
    #[serde(default)]
    pub categories: SmallVec<[String; 4]>,
}

impl IconEntry {
    pub fn new(name: impl Into<String>, svg_source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            svg_source: svg_source.into(),
            tags: SmallVec::new(),
            categories: SmallVec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_host_catalog_shape() {
        let entry: IconEntry = serde_json::from_str(
            r#"{
                "name": "house",
                "svgSource": "<svg/>",
                "tags": ["home"],
                "categories": ["buildings"]
            }"#,
        )
        .unwrap();

        assert_eq!(entry.name, "house");
        assert_eq!(entry.tags.as_slice(), ["home".to_string()]);
    }

    #[test]
    fn tags_and_categories_default_to_empty() {
        let entry: IconEntry =
            serde_json::from_str(r#"{ "name": "dot", "svgSource": "<svg/>" }"#).unwrap();
        assert!(entry.tags.is_empty());
        assert!(entry.categories.is_empty());
    }
}
