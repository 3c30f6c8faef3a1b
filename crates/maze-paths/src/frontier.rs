use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// How a [`Frontier`] orders its nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Order {
    /// First in, first out; keys are ignored.
    Fifo,
    /// Smallest key first, ties in insertion order.
    MinKey,
}

/// A heap entry. Field order gives the derived ordering: key, then
/// insertion sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    key: u64,
    seq: u64,
    node: usize,
}

/// The set of discovered-but-not-finalized arena nodes.
///
/// Both containers are kept so that switching strategies between runs
/// reuses their allocations.
#[derive(Debug)]
pub(crate) struct Frontier {
    order: Order,
    fifo: VecDeque<usize>,
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self {
            order: Order::Fifo,
            fifo: VecDeque::new(),
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Empty the frontier and switch to `order`.
    pub(crate) fn reset(&mut self, order: Order) {
        self.order = order;
        self.fifo.clear();
        self.heap.clear();
        self.seq = 0;
    }

    pub(crate) fn push(&mut self, node: usize, key: u64) {
        match self.order {
            Order::Fifo => self.fifo.push_back(node),
            Order::MinKey => {
                self.heap.push(Reverse(Entry {
                    key,
                    seq: self.seq,
                    node,
                }));
                self.seq += 1;
            }
        }
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        match self.order {
            Order::Fifo => self.fifo.pop_front(),
            Order::MinKey => self.heap.pop().map(|Reverse(e)| e.node),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.fifo.len() + self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_ignores_keys() {
        let mut f = Frontier::new();
        f.reset(Order::Fifo);
        f.push(1, 9);
        f.push(2, 0);
        assert_eq!(f.pop(), Some(1));
        assert_eq!(f.pop(), Some(2));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn min_key_breaks_ties_by_insertion() {
        let mut f = Frontier::new();
        f.reset(Order::MinKey);
        f.push(10, 5);
        f.push(11, 3);
        f.push(12, 5);
        f.push(13, 3);
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).collect();
        assert_eq!(order, vec![11, 13, 10, 12]);
    }

    #[test]
    fn reset_empties_both_containers() {
        let mut f = Frontier::new();
        f.reset(Order::MinKey);
        f.push(0, 1);
        f.reset(Order::Fifo);
        assert_eq!(f.len(), 0);
        assert_eq!(f.pop(), None);
    }
}
