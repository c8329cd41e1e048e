use std::convert::Infallible;
use std::fmt;

use waypath_queue::Identity;

use crate::settlement::ShortestPaths;

/// Errors returned by the single-goal searches.
///
/// `E` is the error type of a fallible neighbor callback. The infallible
/// entry points use the default `Infallible`, leaving
/// [`Unreachable`](Self::Unreachable) as the only possible failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError<E = Infallible> {
    /// The frontier emptied before any node satisfied the goal.
    Unreachable,
    /// The neighbor callback failed.
    Neighbors(E),
}

impl<E> SearchError<E> {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

impl<E: fmt::Display> fmt::Display for SearchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "no path to the goal: frontier exhausted"),
            Self::Neighbors(e) => write!(f, "neighbor callback failed: {e}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for SearchError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreachable => None,
            Self::Neighbors(e) => Some(e),
        }
    }
}

/// A full-map search interrupted by a failing neighbor callback.
///
/// `paths` holds every settlement made before the failure.
pub struct PartialPaths<N, C, I: Identity<N>, E> {
    pub paths: ShortestPaths<N, C, I>,
    pub error: E,
}

impl<N, C, I: Identity<N>, E: fmt::Debug> fmt::Debug for PartialPaths<N, C, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialPaths")
            .field("settled", &self.paths.len())
            .field("error", &self.error)
            .finish()
    }
}

impl<N, C, I: Identity<N>, E: fmt::Display> fmt::Display for PartialPaths<N, C, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search interrupted after settling {} nodes: {}",
            self.paths.len(),
            self.error
        )
    }
}

impl<N, C, I, E> std::error::Error for PartialPaths<N, C, I, E>
where
    I: Identity<N>,
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
