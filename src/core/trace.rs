//! Append-only pose history of one tracked agent.

use super::bounds::Bounds;
use super::pose::Pose;

/// Ordered sequence of estimated poses.
///
/// Grows over the lifetime of a running session. Poses are never removed
/// or reordered; readers see them in the order they were appended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    poses: Vec<Pose>,
}

impl Trace {
    /// Empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace starting at `pose`
    pub fn starting_at(pose: Pose) -> Self {
        Self { poses: vec![pose] }
    }

    /// Append a pose
    pub fn push(&mut self, pose: Pose) {
        self.poses.push(pose);
    }

    /// All poses, oldest first
    pub fn values(&self) -> &[Pose] {
        &self.poses
    }

    /// Most recent pose
    pub fn last(&self) -> Option<&Pose> {
        self.poses.last()
    }

    /// Number of poses
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// No poses yet
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Extent of all poses
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for pose in &self.poses {
            bounds.expand_to_include(pose.x, pose.y);
        }
        bounds
    }

    /// Total path length in meters
    pub fn path_length(&self) -> f64 {
        self.poses
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}

impl From<Vec<Pose>> for Trace {
    fn from(poses: Vec<Pose>) -> Self {
        Self { poses }
    }
}
