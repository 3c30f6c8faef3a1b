use std::fmt;
use std::str::FromStr;

use maze_paths::Strategy;

/// A solver the controller can dispatch to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dijkstra,
    AStar,
    Genetic,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Genetic,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A*",
            Self::Genetic => "Genetic",
        }
    }

    /// The frontier search behind this algorithm, or `None` for the
    /// genetic solver.
    pub const fn strategy(self) -> Option<Strategy> {
        match self {
            Self::Bfs => Some(Strategy::Bfs),
            Self::Dijkstra => Some(Strategy::Dijkstra),
            Self::AStar => Some(Strategy::AStar),
            Self::Genetic => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name that matches no [`Algorithm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm {:?} (expected bfs, dijkstra, astar or genetic)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "a*" | "astar" | "a-star" => Ok(Self::AStar),
            "genetic" | "ga" => Ok(Self::Genetic),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
