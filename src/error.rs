// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)

use thiserror::Error;

/// Failures reported by [`Tessellator::done`](crate::Tessellator::done).
///
/// Every variant is a broken contract. Degenerate geometry (short contours,
/// zero-length edges, collinear faces) is never an error; it is skipped and
/// counted in [`TessStats`](crate::TessStats).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TessError {
    /// An input point is NaN, infinite or larger than [`MAX_COORD`](crate::geom::MAX_COORD).
    #[error("point {index} is not finite or exceeds the coordinate limit")]
    InvalidCoordinate { index: usize },
    /// A point lies outside the bounding box supplied with the polygon.
    #[error("point {index} lies outside the supplied bounds")]
    OutsideBounds { index: usize },
    /// A contour passed as convex turns both ways or winds more than once.
    /// Only checked when [`TessConfig::validate_mesh`](crate::TessConfig) is set.
    #[error("contour {contour} is marked convex but is not")]
    NotConvex { contour: usize },
    /// The contour counts refer to more points than the polygon holds.
    #[error("contour counts need {needed} points but only {available} were given")]
    CountOverflow { needed: usize, available: usize },
    /// A mesh operation received a dead or foreign handle, or a mesh
    /// invariant no longer holds.
    #[error("mesh invariant violated: {0}")]
    Topology(&'static str),
    /// An earlier call failed with [`TessError::Topology`]; the instance must
    /// be reset before it is used again.
    #[error("tessellator is unusable after a failed call; reset it first")]
    Poisoned,
}

impl TessError {
    /// True for failures that leave the instance unusable until
    /// [`Tessellator::reset`](crate::Tessellator::reset).
    pub fn is_fatal(&self) -> bool {
        matches!(self, TessError::Topology(_) | TessError::Poisoned)
    }
}

pub type Result<T, E = TessError> = std::result::Result<T, E>;
