//! Built-in sample mazes.

use clap::ValueEnum;
use maze_core::{Grid, GridError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Sample {
    /// Small maze with a few dead ends.
    Simple,
    /// Open field with expensive cells between entrance and exit.
    Weighted,
    /// A single winding corridor.
    Corridor,
    /// The exit is walled off.
    Enclosed,
}

const SIMPLE: &str = "\
S.#.......
.##.####.#
....#....#
.####.##.#
......#...
.####.#.#.
......#.#G";

const WEIGHTED: &str = "\
S...5.....
.##.5.##..
.#..9..#..
.#.999.#..
....5.....
.##.5.##..
....5....G";

const CORRIDOR: &str = "\
S.........
#########.
..........
.#########
..........
#########G";

const ENCLOSED: &str = "\
S....#....
.###.#.##.
.#...#..#.
.#.###..#.
...#....#G";

impl Sample {
    pub(crate) fn picture(self) -> &'static str {
        match self {
            Self::Simple => SIMPLE,
            Self::Weighted => WEIGHTED,
            Self::Corridor => CORRIDOR,
            Self::Enclosed => ENCLOSED,
        }
    }

    pub(crate) fn grid(self) -> Result<Grid, GridError> {
        self.picture().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_parse() {
        for s in Sample::value_variants() {
            let g = s.grid().unwrap();
            assert!(g.is_road(g.entrance()));
            assert!(g.is_road(g.exit()));
        }
    }
}
