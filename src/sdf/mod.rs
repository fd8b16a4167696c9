//! SDF document editing
//!
//! Thin wrapper around a mutable XML tree for the edits the task generator
//! performs on model descriptions: locating the model root, renaming it,
//! and stripping pedestrian/collision plugin elements before respawning.

mod element;
pub(crate) mod parser;
mod writer;

pub use element::{Element, XmlNode};

use std::fs;
use std::path::Path;

use crate::error::SdfResult;

/// Default tag of the model root element
pub const MODEL_TAG: &str = "model";

/// Tag of plugin elements
const PLUGIN_TAG: &str = "plugin";

/// SDF versions known to parse cleanly (unknown versions warn and continue)
const SUPPORTED_SDF_VERSIONS: &[&str] = &["1.4", "1.5", "1.6", "1.7", "1.8"];

/// Selector for plugin elements, keyed by their `filename` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginSelector {
    /// Social-force-model pedestrian plugin
    SfmPedestrian,
    /// Pedsim Gazebo actor plugin
    PedsimActor,
    /// Actor collisions plugin
    ActorCollisions,
}

impl PluginSelector {
    /// Plugin library filename this selector matches
    pub const fn filename(self) -> &'static str {
        match self {
            Self::SfmPedestrian => "libPedestrianSFMPlugin.so",
            Self::PedsimActor => "libPedsimGazeboActorPlugin.so",
            Self::ActorCollisions => "libActorCollisionsPlugin.so",
        }
    }
}

/// A mutable SDF document
///
/// Created per parse call, edited in place, serialized on demand. Each
/// operation is a stateless transformation of the owned tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SdfDocument {
    root: Element,
}

impl SdfDocument {
    /// Parse an SDF document from text
    pub fn parse(sdf: &str) -> SdfResult<Self> {
        let root = parser::parse_document(sdf)?;

        if root.tag == "sdf" {
            if let Some(version) = root.attribute("version") {
                if !SUPPORTED_SDF_VERSIONS.contains(&version) {
                    tracing::warn!(
                        "SDF version {} not officially supported (supported: {:?}), parsing anyway",
                        version,
                        SUPPORTED_SDF_VERSIONS
                    );
                }
            }
        }

        Ok(Self { root })
    }

    /// Load an SDF document from a file
    pub fn load_file(path: impl AsRef<Path>) -> SdfResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Serialize back to text, including an XML declaration
    pub fn serialize(&self) -> SdfResult<String> {
        writer::serialize_document(&self.root)
    }

    /// Serialize to a file
    pub fn save_file(&self, path: impl AsRef<Path>) -> SdfResult<()> {
        fs::write(path, self.serialize()?)?;
        Ok(())
    }

    /// Document root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable document root element
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// SDF format version, when the root is an `<sdf>` element carrying one
    pub fn version(&self) -> Option<&str> {
        if self.root.tag == "sdf" {
            self.root.attribute("version")
        } else {
            None
        }
    }

    /// Model root element (root itself if tagged `model`, else the first
    /// direct child with that tag)
    pub fn model_root(&self) -> Option<&Element> {
        self.model_root_with_tag(MODEL_TAG)
    }

    /// [`model_root`](Self::model_root) with a caller-supplied tag
    pub fn model_root_with_tag(&self, tag: &str) -> Option<&Element> {
        if self.root.tag == tag {
            Some(&self.root)
        } else {
            self.root.find_child(tag)
        }
    }

    /// Mutable variant of [`model_root`](Self::model_root)
    pub fn model_root_mut(&mut self) -> Option<&mut Element> {
        self.model_root_with_tag_mut(MODEL_TAG)
    }

    /// Mutable variant of [`model_root_with_tag`](Self::model_root_with_tag)
    pub fn model_root_with_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        if self.root.tag == tag {
            Some(&mut self.root)
        } else {
            self.root.find_child_mut(tag)
        }
    }

    /// Set the model root's `name` attribute
    ///
    /// Does nothing when no model root exists; callers cannot distinguish
    /// success from the no-op.
    // TODO reconsider whether a missing model root should be an error
    pub fn set_name(&mut self, name: &str) {
        self.set_name_with_tag(name, MODEL_TAG);
    }

    /// [`set_name`](Self::set_name) with a caller-supplied tag
    pub fn set_name_with_tag(&mut self, name: &str, tag: &str) {
        match self.model_root_with_tag_mut(tag) {
            Some(model) => model.set_attribute("name", name),
            None => tracing::warn!("no <{}> element found, name left unchanged", tag),
        }
    }

    /// Remove every plugin element matched by the selector, anywhere in the
    /// tree, and return the number removed
    pub fn delete_all(&mut self, selector: PluginSelector) -> usize {
        self.remove_plugins_with_filename(selector.filename())
    }

    /// Remove every `<plugin>` element whose `filename` attribute equals
    /// `filename`; extension point for plugin types beyond the fixed selectors
    pub fn remove_plugins_with_filename(&mut self, filename: &str) -> usize {
        let hits = remove_plugins(&mut self.root, filename);
        if hits > 0 {
            tracing::debug!("removed {} plugin element(s) matching {}", hits, filename);
        }
        hits
    }
}

/// Drop matching plugin children of `element`, then recurse into survivors
fn remove_plugins(element: &mut Element, filename: &str) -> usize {
    let before = element.children.len();
    element.children.retain(|child| {
        !matches!(child, XmlNode::Element(nested)
            if nested.tag == PLUGIN_TAG && nested.attribute("filename") == Some(filename))
    });
    let mut hits = before - element.children.len();

    for child in &mut element.children {
        if let XmlNode::Element(nested) = child {
            hits += remove_plugins(nested, filename);
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTOR_SDF: &str = r#"
    <sdf version="1.6">
        <model name="pedestrian">
            <plugin name="sfm" filename="libPedestrianSFMPlugin.so"/>
            <link name="body">
                <plugin name="sfm_inner" filename="libPedestrianSFMPlugin.so"/>
                <plugin name="pedsim" filename="libPedsimGazeboActorPlugin.so"/>
            </link>
        </model>
    </sdf>
    "#;

    #[test]
    fn test_model_root_when_root_is_model() {
        let doc = SdfDocument::parse(r#"<model name="box"/>"#).unwrap();
        let root = doc.model_root().unwrap();
        assert_eq!(root.attribute("name"), Some("box"));
    }

    #[test]
    fn test_model_root_when_wrapped_in_sdf() {
        let doc = SdfDocument::parse(ACTOR_SDF).unwrap();
        let root = doc.model_root().unwrap();
        assert_eq!(root.attribute("name"), Some("pedestrian"));
    }

    #[test]
    fn test_model_root_absent() {
        let doc = SdfDocument::parse(r#"<sdf version="1.6"><world name="w"/></sdf>"#).unwrap();
        assert!(doc.model_root().is_none());
    }

    #[test]
    fn test_model_root_with_custom_tag() {
        let doc = SdfDocument::parse(r#"<sdf><actor name="a"/></sdf>"#).unwrap();
        let root = doc.model_root_with_tag("actor").unwrap();
        assert_eq!(root.attribute("name"), Some("a"));
    }

    #[test]
    fn test_set_name() {
        let mut doc = SdfDocument::parse(ACTOR_SDF).unwrap();
        doc.set_name("pedestrian_0");
        assert_eq!(doc.model_root().unwrap().attribute("name"), Some("pedestrian_0"));
    }

    #[test]
    fn test_set_name_without_model_root_is_a_no_op() {
        let mut doc = SdfDocument::parse("<sdf><world/></sdf>").unwrap();
        let before = doc.clone();
        doc.set_name("ignored");
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_all_removes_only_matching_plugins() {
        let mut doc = SdfDocument::parse(ACTOR_SDF).unwrap();

        let hits = doc.delete_all(PluginSelector::SfmPedestrian);
        assert_eq!(hits, 2);

        let serialized = doc.serialize().unwrap();
        assert!(!serialized.contains("libPedestrianSFMPlugin.so"));
        assert!(serialized.contains("libPedsimGazeboActorPlugin.so"));
    }

    #[test]
    fn test_delete_all_with_no_match_returns_zero() {
        let mut doc = SdfDocument::parse(ACTOR_SDF).unwrap();
        assert_eq!(doc.delete_all(PluginSelector::ActorCollisions), 0);
    }

    #[test]
    fn test_delete_all_is_repeatable() {
        let mut doc = SdfDocument::parse(ACTOR_SDF).unwrap();
        assert_eq!(doc.delete_all(PluginSelector::PedsimActor), 1);
        assert_eq!(doc.delete_all(PluginSelector::PedsimActor), 0);
    }

    #[test]
    fn test_version_accessor() {
        let doc = SdfDocument::parse(ACTOR_SDF).unwrap();
        assert_eq!(doc.version(), Some("1.6"));

        let bare = SdfDocument::parse("<model name=\"m\"/>").unwrap();
        assert_eq!(bare.version(), None);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(SdfDocument::parse("<sdf><model></sdf>").is_err());
        assert!(SdfDocument::parse("not xml").is_err());
    }

    #[test]
    fn test_selector_filenames() {
        assert_eq!(
            PluginSelector::SfmPedestrian.filename(),
            "libPedestrianSFMPlugin.so"
        );
        assert_eq!(
            PluginSelector::PedsimActor.filename(),
            "libPedsimGazeboActorPlugin.so"
        );
        assert_eq!(
            PluginSelector::ActorCollisions.filename(),
            "libActorCollisionsPlugin.so"
        );
    }
}
