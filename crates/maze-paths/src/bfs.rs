use std::collections::VecDeque;

use maze_core::Pos;

use crate::search::FrontierSearch;
use crate::traits::Pather;

/// A position with its hop distance, returned from [`FrontierSearch::bfs_map`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Pos,
    pub cost: u32,
}

impl FrontierSearch {
    /// Compute an unweighted breadth-first distance map from `source`.
    ///
    /// Each step has cost 1 and weights are ignored. Returns every reached
    /// node in discovery order, `source` first. This does not touch any run
    /// marks; it is a planning query, not an animated strategy.
    pub fn bfs_map<P: Pather>(&mut self, pather: &P, source: Pos) -> &[PathNode] {
        // Reset.
        self.hops.fill(None);
        self.hop_results.clear();

        let Some(si) = self.idx(source) else {
            return &self.hop_results;
        };
        self.hops[si] = Some(0);
        self.hop_results.push(PathNode {
            pos: source,
            cost: 0,
        });

        let mut queue: VecDeque<(Pos, u32)> = VecDeque::new();
        queue.push_back((source, 0));
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some((cp, dist)) = queue.pop_front() {
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.hops[ni].is_some() {
                    continue;
                }
                let nd = dist + 1;
                self.hops[ni] = Some(nd);
                queue.push_back((np, nd));
                self.hop_results.push(PathNode { pos: np, cost: nd });
            }
        }

        self.nbuf = nbuf;
        &self.hop_results
    }

    /// Hop distance of `p` from the source of the last
    /// [`bfs_map`](Self::bfs_map) call, or `None` if it was not reached.
    pub fn hops_at(&self, p: Pos) -> Option<u32> {
        self.idx(p).and_then(|i| self.hops[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Grid;

    #[test]
    fn hop_distances_ignore_weights() {
        let g: Grid = "S9G\n.#.\n...".parse().unwrap();
        let mut fs = FrontierSearch::for_grid(&g);
        let reached = fs.bfs_map(&g, g.entrance()).len();
        assert_eq!(reached, 8);
        assert_eq!(fs.hops_at(g.exit()), Some(2));
        assert_eq!(fs.hops_at(Pos::new(2, 2)), Some(4));
        assert_eq!(fs.hops_at(Pos::new(1, 1)), None);
        assert_eq!(fs.hops_at(Pos::new(5, 5)), None);
    }

    #[test]
    fn enclosed_cells_stay_unreached() {
        let g: Grid = "S..\n.##\n.#G".parse().unwrap();
        let mut fs = FrontierSearch::for_grid(&g);
        let nodes = fs.bfs_map(&g, g.entrance());
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0], PathNode { pos: g.entrance(), cost: 0 });
        assert_eq!(fs.hops_at(g.exit()), None);
    }

    #[test]
    fn map_is_reset_between_calls() {
        let g: Grid = "S..\n...\n..G".parse().unwrap();
        let mut fs = FrontierSearch::for_grid(&g);
        fs.bfs_map(&g, g.entrance());
        fs.bfs_map(&g, g.exit());
        assert_eq!(fs.hops_at(g.exit()), Some(0));
        assert_eq!(fs.hops_at(g.entrance()), Some(4));
    }
}
