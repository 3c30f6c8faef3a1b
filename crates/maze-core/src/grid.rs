//! The [`Grid`] type — an immutable obstacle/weight map with an entrance
//! and an exit.
//!
//! Grids are built once, either through [`GridBuilder`] or by parsing a
//! small picture with [`str::parse`], and are then only read. Every
//! constructor validates the invariants, so any `Grid` value handed to a
//! solver is non-empty and has both endpoints on Road cells.

use std::fmt;
use std::str::FromStr;

use crate::geom::Pos;

/// What occupies a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Road,
    Wall,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which endpoint an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Entrance,
    Exit,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entrance => f.write_str("entrance"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Reasons a grid is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Zero rows or zero columns.
    Empty,
    /// A position given to the builder lies outside the grid.
    OutOfBounds { pos: Pos, rows: usize, cols: usize },
    /// The entrance or exit sits on a Wall.
    OnWall { endpoint: Endpoint, pos: Pos },
    /// The entrance or exit was never set.
    MissingEndpoint(Endpoint),
    /// A picture row does not have the width of the first row.
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A picture contains a character with no meaning.
    InvalidChar { ch: char, pos: Pos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("grid: zero rows or columns"),
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "grid: position {pos} outside {rows}x{cols}")
            }
            Self::OnWall { endpoint, pos } => write!(f, "grid: {endpoint} {pos} is a wall"),
            Self::MissingEndpoint(e) => write!(f, "grid: no {e} given"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular maze of Road and Wall cells.
///
/// Road cells carry a per-step traversal weight of at least 1; walls have
/// no weight.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    kinds: Vec<CellKind>,
    weights: Vec<u32>,
    entrance: Pos,
    exit: Pos,
}

impl Grid {
    /// Start building a `rows` × `cols` grid of weight-1 Road cells.
    pub fn builder(rows: usize, cols: usize) -> GridBuilder {
        GridBuilder::new(rows, cols)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, `rows * cols`.
    #[inline]
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn entrance(&self) -> Pos {
        self.entrance
    }

    #[inline]
    pub fn exit(&self) -> Pos {
        self.exit
    }

    /// Whether `p` lies inside `[0, rows) × [0, cols)`.
    #[inline]
    pub fn in_bounds(&self, p: Pos) -> bool {
        self.index(p).is_some()
    }

    /// Flat row-major index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        index_in(self.rows, self.cols, p)
    }

    /// Kind of the cell at `p`, or `None` when out of bounds.
    #[inline]
    pub fn cell_kind(&self, p: Pos) -> Option<CellKind> {
        self.index(p).map(|i| self.kinds[i])
    }

    /// Whether `p` is an in-bounds Road cell.
    #[inline]
    pub fn is_road(&self, p: Pos) -> bool {
        self.cell_kind(p) == Some(CellKind::Road)
    }

    /// Traversal weight of the Road cell at `p`.
    ///
    /// Returns `None` for walls and for out-of-bounds positions, so the
    /// accessor is total. A `Some` value is always at least 1.
    #[inline]
    pub fn weight(&self, p: Pos) -> Option<u32> {
        let i = self.index(p)?;
        match self.kinds[i] {
            CellKind::Road => Some(self.weights[i]),
            CellKind::Wall => None,
        }
    }

    /// Number of Road cells.
    pub fn road_count(&self) -> usize {
        self.kinds.iter().filter(|k| **k == CellKind::Road).count()
    }
}

#[inline]
pub(crate) fn index_in(rows: usize, cols: usize, p: Pos) -> Option<usize> {
    if p.row >= 0 && p.col >= 0 && (p.row as usize) < rows && (p.col as usize) < cols {
        Some(p.row as usize * cols + p.col as usize)
    } else {
        None
    }
}

impl fmt::Display for Grid {
    /// Renders the grid in the same picture format [`FromStr`] accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                let p = Pos::new(r as i32, c as i32);
                let ch = if p == self.entrance {
                    'S'
                } else if p == self.exit {
                    'G'
                } else {
                    match self.weight(p) {
                        None => '#',
                        Some(1) => '.',
                        Some(w) if w <= 9 => char::from_digit(w, 10).unwrap_or('.'),
                        Some(_) => '9',
                    }
                };
                write!(f, "{ch}")?;
            }
            if r + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse a picture: one line per row, `#` wall, `.` or space a weight-1
    /// road, `1`–`9` a road with that weight, `S` the entrance and `G` the
    /// exit (both weight 1). Leading and trailing empty lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let all: Vec<&str> = s.lines().collect();
        let start = all.iter().position(|l| !l.is_empty()).unwrap_or(all.len());
        let end = all
            .iter()
            .rposition(|l| !l.is_empty())
            .map_or(start, |i| i + 1);
        let lines = &all[start..end];

        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut b = GridBuilder::new(rows, cols);

        for (r, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    row: r,
                    expected: cols,
                    found,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let p = Pos::new(r as i32, c as i32);
                b = match ch {
                    '#' => b.wall(p),
                    '.' | ' ' => b,
                    'S' => b.entrance(p),
                    'G' => b.exit(p),
                    d if d.is_ascii_digit() && d != '0' => {
                        b.weight(p, i64::from(d.to_digit(10).unwrap_or(1)))
                    }
                    _ => return Err(GridError::InvalidChar { ch, pos: p }),
                };
            }
        }
        b.build()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            rows: usize,
            cols: usize,
            kinds: Vec<CellKind>,
            weights: Vec<u32>,
            entrance: Pos,
            exit: Pos,
        }

        let raw = Raw::deserialize(deserializer)?;
        let area = raw.rows * raw.cols;
        if raw.kinds.len() != area || raw.weights.len() != area {
            return Err(serde::de::Error::custom(
                "grid: cell count does not match size",
            ));
        }
        let mut b = GridBuilder::new(raw.rows, raw.cols)
            .entrance(raw.entrance)
            .exit(raw.exit);
        for i in 0..area {
            let p = Pos::new((i / raw.cols) as i32, (i % raw.cols) as i32);
            b = match raw.kinds[i] {
                CellKind::Wall => b.wall(p),
                CellKind::Road => b.weight(p, i64::from(raw.weights[i])),
            };
        }
        b.build().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// GridBuilder
// ---------------------------------------------------------------------------

/// Incremental, validating constructor for [`Grid`].
///
/// Setters never fail; the first invalid position is remembered and
/// reported by [`build`](GridBuilder::build).
#[derive(Debug, Clone)]
pub struct GridBuilder {
    rows: usize,
    cols: usize,
    kinds: Vec<CellKind>,
    weights: Vec<u32>,
    entrance: Option<Pos>,
    exit: Option<Pos>,
    error: Option<GridError>,
}

impl GridBuilder {
    /// A `rows` × `cols` builder where every cell is a weight-1 Road.
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows * cols;
        Self {
            rows,
            cols,
            kinds: vec![CellKind::Road; len],
            weights: vec![1; len],
            entrance: None,
            exit: None,
            error: None,
        }
    }

    fn slot(&mut self, p: Pos) -> Option<usize> {
        let idx = index_in(self.rows, self.cols, p);
        if idx.is_none() && self.error.is_none() {
            self.error = Some(GridError::OutOfBounds {
                pos: p,
                rows: self.rows,
                cols: self.cols,
            });
        }
        idx
    }

    /// Turn the cell at `p` into a Wall.
    pub fn wall(mut self, p: Pos) -> Self {
        if let Some(i) = self.slot(p) {
            self.kinds[i] = CellKind::Wall;
        }
        self
    }

    /// Turn the cell at `p` into a Road with weight `w`. Weights below 1
    /// are stored as 1.
    pub fn weight(mut self, p: Pos, w: i64) -> Self {
        if let Some(i) = self.slot(p) {
            self.kinds[i] = CellKind::Road;
            self.weights[i] = w.clamp(1, i64::from(u32::MAX)) as u32;
        }
        self
    }

    pub fn entrance(mut self, p: Pos) -> Self {
        self.slot(p);
        self.entrance = Some(p);
        self
    }

    pub fn exit(mut self, p: Pos) -> Self {
        self.slot(p);
        self.exit = Some(p);
        self
    }

    /// Validate and produce the grid.
    pub fn build(self) -> Result<Grid, GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::Empty);
        }
        if let Some(err) = self.error {
            return Err(err);
        }
        let entrance = self
            .entrance
            .ok_or(GridError::MissingEndpoint(Endpoint::Entrance))?;
        let exit = self.exit.ok_or(GridError::MissingEndpoint(Endpoint::Exit))?;

        for (endpoint, pos) in [(Endpoint::Entrance, entrance), (Endpoint::Exit, exit)] {
            // Both are in bounds: out-of-bounds endpoints were recorded above.
            let i = pos.row as usize * self.cols + pos.col as usize;
            if self.kinds[i] == CellKind::Wall {
                return Err(GridError::OnWall { endpoint, pos });
            }
        }

        let mut weights = self.weights;
        for (w, k) in weights.iter_mut().zip(&self.kinds) {
            if *k == CellKind::Wall {
                *w = 0;
            }
        }

        Ok(Grid {
            rows: self.rows,
            cols: self.cols,
            kinds: self.kinds,
            weights,
            entrance,
            exit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
S.#
.#.
..G";

    #[test]
    fn parse_picture() {
        let g: Grid = SMALL.parse().unwrap();
        assert_eq!((g.rows(), g.cols()), (3, 3));
        assert_eq!(g.entrance(), Pos::new(0, 0));
        assert_eq!(g.exit(), Pos::new(2, 2));
        assert_eq!(g.cell_kind(Pos::new(1, 1)), Some(CellKind::Wall));
        assert_eq!(g.cell_kind(Pos::new(3, 0)), None);
        assert_eq!(g.road_count(), 7);
        assert_eq!(g.to_string(), SMALL);
    }

    #[test]
    fn weight_is_total() {
        let g: Grid = "S5\n#G".parse().unwrap();
        assert_eq!(g.weight(Pos::new(0, 1)), Some(5));
        assert_eq!(g.weight(Pos::new(1, 0)), None);
        assert_eq!(g.weight(Pos::new(-1, 0)), None);
        assert_eq!(g.weight(Pos::new(0, 9)), None);
    }

    #[test]
    fn non_positive_weight_normalized() {
        let g = Grid::builder(1, 3)
            .weight(Pos::new(0, 1), 0)
            .weight(Pos::new(0, 2), -7)
            .entrance(Pos::new(0, 0))
            .exit(Pos::new(0, 2))
            .build()
            .unwrap();
        assert_eq!(g.weight(Pos::new(0, 1)), Some(1));
        assert_eq!(g.weight(Pos::new(0, 2)), Some(1));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Grid::builder(0, 4).build(), Err(GridError::Empty));
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
    }

    #[test]
    fn rejects_endpoint_on_wall() {
        let err = Grid::builder(2, 2)
            .wall(Pos::new(1, 1))
            .entrance(Pos::new(0, 0))
            .exit(Pos::new(1, 1))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            GridError::OnWall {
                endpoint: Endpoint::Exit,
                pos: Pos::new(1, 1)
            }
        );
    }

    #[test]
    fn rejects_out_of_bounds_endpoint() {
        let err = Grid::builder(2, 2)
            .entrance(Pos::new(0, 0))
            .exit(Pos::new(2, 0))
            .build()
            .unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
    }

    #[test]
    fn rejects_missing_endpoint() {
        assert_eq!(
            "S..".parse::<Grid>(),
            Err(GridError::MissingEndpoint(Endpoint::Exit))
        );
    }

    #[test]
    fn rejects_bad_pictures() {
        assert!(matches!(
            "S..\n.G".parse::<Grid>(),
            Err(GridError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            "S.x\n..G".parse::<Grid>(),
            Err(GridError::InvalidChar { ch: 'x', .. })
        ));
    }
}
