use thiserror::Error;

/// Errors raised when an operation's geometric preconditions do not hold.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("contour must be closed")]
    NotClosed,

    #[error("contour must be open")]
    AlreadyClosed,

    #[error("closed contour does not end at its start point")]
    OpenEnds,

    #[error("curve too complex: {roots} parallel tangents in [0, 1)")]
    CurveTooComplex { roots: usize },

    #[error("cyclic paint order between {remaining:?}")]
    CyclicDependency { remaining: Vec<usize> },

    #[error("empty contour")]
    EmptyContour,

    #[error("segment {index} does not start where the previous one ends")]
    Discontinuous { index: usize },

    #[error("drawing command issued before move_to")]
    MissingMoveTo,
}
