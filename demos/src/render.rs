use std::fmt::Write;

use maze_core::{CellKind, Grid, Layer, Marks, Pos};

/// Draw `grid` with the marks of the last run on top.
///
/// `S`/`G` are the endpoints, `*` the final path, `o` the last animated
/// cells, `+` visited cells, `#` walls, and digits weights above 1.
pub(crate) fn overlay(grid: &Grid, marks: &Marks) -> String {
    let mut out = String::with_capacity((grid.cols() + 1) * grid.rows());
    for row in 0..grid.rows() as i32 {
        for col in 0..grid.cols() as i32 {
            let p = Pos::new(row, col);
            let ch = if p == grid.entrance() {
                'S'
            } else if p == grid.exit() {
                'G'
            } else if grid.cell_kind(p) == Some(CellKind::Wall) {
                '#'
            } else if marks.is(Layer::Result, p) {
                '*'
            } else if marks.is(Layer::Frontier, p) {
                'o'
            } else if marks.is(Layer::Visited, p) {
                '+'
            } else {
                match grid.weight(p) {
                    Some(w @ 2..=9) => char::from_digit(w, 10).unwrap_or('.'),
                    _ => '.',
                }
            };
            out.push(ch);
        }
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_drawn_over_weights() {
        let grid: Grid = "S3.\n#..\n..G".parse().unwrap();
        let mut marks = Marks::for_grid(&grid);
        marks.visit(Pos::new(1, 1));
        marks.set_result(Pos::new(0, 1));
        assert_eq!(overlay(&grid, &marks), "S*.\n#+.\n..G\n");
    }
}
