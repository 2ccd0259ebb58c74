//! # Frame Labels
//!
//! Collects the coordinate frames seen on the transform stream and turns
//! them into text markers, so every frame can be labelled in the scene.
//! Text rendering itself happens elsewhere; these markers produce no
//! geometry in [`crate::marker::marker_to_sub_meshes`].

use crate::marker::{MarkerSpec, MarkerType};
use config::constants::{DEFAULT_IGNORED_FRAME_PREFIX, FRAME_LABEL_HEIGHT};

/// Ordered set of known frame ids.
///
/// # Example
///
/// ```rust
/// use marker_mesh::labels::FrameCache;
///
/// let mut frames = FrameCache::new();
/// frames.observe_transform("world", "base_link");
/// frames.observe_transform("base_link", "camera");
/// frames.insert("viz_base_offset");
/// assert_eq!(frames.frames(), ["world", "base_link", "camera"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCache {
    frames: Vec<String>,
    ignored_prefix: String,
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCache {
    /// Creates an empty cache that ignores the viewer's own base frames.
    pub fn new() -> Self {
        Self::with_ignored_prefix(DEFAULT_IGNORED_FRAME_PREFIX)
    }

    /// Creates an empty cache ignoring frames that start with `prefix`.
    /// An empty prefix ignores nothing.
    pub fn with_ignored_prefix(prefix: impl Into<String>) -> Self {
        Self {
            frames: Vec::new(),
            ignored_prefix: prefix.into(),
        }
    }

    /// Adds a frame id. Returns true if it was not known before.
    ///
    /// Empty ids and ids with the ignored prefix are never stored.
    pub fn insert(&mut self, frame_id: &str) -> bool {
        if frame_id.is_empty() || self.is_ignored(frame_id) {
            return false;
        }
        if self.contains(frame_id) {
            return false;
        }
        log::debug!("New frame '{}'", frame_id);
        self.frames.push(frame_id.to_string());
        true
    }

    /// Records both ends of a parent/child transform.
    pub fn observe_transform(&mut self, parent: &str, child: &str) {
        self.insert(parent);
        self.insert(child);
    }

    /// Returns true if `frame_id` is known.
    pub fn contains(&self, frame_id: &str) -> bool {
        self.frames.iter().any(|f| f == frame_id)
    }

    fn is_ignored(&self, frame_id: &str) -> bool {
        !self.ignored_prefix.is_empty() && frame_id.starts_with(&self.ignored_prefix)
    }

    /// Known frames in first-seen order.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Iterates the known frames in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(String::as_str)
    }

    /// Number of known frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frame is known.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Builds one text marker per known frame, placed at the frame origin.
pub fn frame_labels(cache: &FrameCache) -> Vec<MarkerSpec> {
    cache
        .iter()
        .map(|frame_id| {
            let mut marker = MarkerSpec::new(MarkerType::Text);
            marker.frame_id = frame_id.to_string();
            marker.text = frame_id.to_string();
            marker.scale.z = FRAME_LABEL_HEIGHT;
            marker
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{marker_to_sub_meshes, GenerationConfig};
    use glam::{DQuat, DVec3};

    #[test]
    fn test_insert_deduplicates_in_order() {
        let mut cache = FrameCache::new();
        assert!(cache.insert("b"));
        assert!(cache.insert("a"));
        assert!(!cache.insert("b"));
        assert_eq!(cache.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_ignored_prefix_and_empty_ids() {
        let mut cache = FrameCache::new();
        assert!(!cache.insert("viz_base"));
        assert!(!cache.insert("viz_base_left"));
        assert!(!cache.insert(""));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_empty_prefix_ignores_nothing() {
        let mut cache = FrameCache::with_ignored_prefix("");
        assert!(cache.insert("viz_base"));
        assert!(cache.contains("viz_base"));
    }

    #[test]
    fn test_observe_transform_records_both_frames() {
        let mut cache = FrameCache::new();
        cache.observe_transform("map", "odom");
        cache.observe_transform("odom", "base_link");
        assert_eq!(cache.frames(), ["map", "odom", "base_link"]);
    }

    #[test]
    fn test_frame_labels() {
        let mut cache = FrameCache::new();
        cache.observe_transform("map", "odom");
        let labels = frame_labels(&cache);

        assert_eq!(labels.len(), 2);
        let label = &labels[1];
        assert_eq!(label.marker_type, MarkerType::Text);
        assert_eq!(label.frame_id, "odom");
        assert_eq!(label.text, "odom");
        assert_eq!(label.pose.position, DVec3::ZERO);
        assert_eq!(label.pose.orientation, DQuat::IDENTITY);
        assert_eq!(label.scale.z, FRAME_LABEL_HEIGHT);
    }

    #[test]
    fn test_frame_labels_have_no_geometry() {
        let mut cache = FrameCache::new();
        cache.insert("map");
        for label in frame_labels(&cache) {
            let meshes = marker_to_sub_meshes(&label, &GenerationConfig::default()).unwrap();
            assert!(meshes.is_empty());
        }
    }
}
