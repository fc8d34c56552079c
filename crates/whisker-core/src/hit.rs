//! Spatial query results.

use smallvec::SmallVec;

/// Tag set attached to a struck object.
///
/// Inline up to 4 tags; objects rarely carry more.
pub type ObjectTags = SmallVec<[String; 4]>;

/// A successful spatial query outcome.
///
/// Returned inside `Option` by [`SpatialQueryBackend`](crate::SpatialQueryBackend)
/// methods: `None` means the probe struck nothing within its range.
///
/// # Examples
///
/// ```
/// use whisker_core::ProbeHit;
///
/// let hit = ProbeHit::new(2.5, ["wall"]);
/// assert_eq!(hit.distance, 2.5);
/// assert!(hit.has_tag("wall"));
/// assert!(!hit.has_tag("agent"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeHit {
    /// Distance from the query origin to the struck object.
    pub distance: f32,
    /// Tags attached to the struck object.
    pub tags: ObjectTags,
}

impl ProbeHit {
    /// Construct a hit at `distance` carrying the given tags.
    pub fn new<I, S>(distance: f32, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            distance,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the struck object carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
