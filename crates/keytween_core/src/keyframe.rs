//! Keyframe inputs and transitions.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The three user-selected keyframe images of a run.
///
/// Keyframes are read-only inputs; they are copied into the output bundle,
/// never modified in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Keyframes {
    /// First frame of the animation
    start: PathBuf,
    /// Frame between the two transitions
    middle: PathBuf,
    /// Last frame of the animation
    end: PathBuf,
}

impl Keyframes {
    /// Bundles the three keyframe paths.
    pub fn new(
        start: impl Into<PathBuf>,
        middle: impl Into<PathBuf>,
        end: impl Into<PathBuf>,
    ) -> Self {
        Self {
            start: start.into(),
            middle: middle.into(),
            end: end.into(),
        }
    }

    /// The two transitions of a run, start→middle then middle→end.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytween_core::Keyframes;
    ///
    /// let keyframes = Keyframes::new("a.png", "b.png", "c.png");
    /// let [ab, bc] = keyframes.transitions(3);
    /// assert_eq!(ab.label(), "start->middle");
    /// assert_eq!(bc.from().to_str(), Some("b.png"));
    /// assert_eq!(*bc.count(), 3);
    /// ```
    pub fn transitions(&self, count: u32) -> [Transition; 2] {
        [
            Transition::new("start->middle", &self.start, &self.middle, count),
            Transition::new("middle->end", &self.middle, &self.end, count),
        ]
    }
}

/// An ordered pair of images plus the number of tweens requested between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Transition {
    /// Human-readable label used in progress messages
    label: String,
    /// Image the transition starts from
    from: PathBuf,
    /// Image the transition ends at
    to: PathBuf,
    /// Requested number of intermediate frames
    count: u32,
}

impl Transition {
    /// Creates a transition.
    pub fn new(label: impl Into<String>, from: &Path, to: &Path, count: u32) -> Self {
        Self {
            label: label.into(),
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            count,
        }
    }
}
