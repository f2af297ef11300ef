//! Frontier lists for breadth-first expansion.

use crate::board::Loc;

/// An ordered list of frontier cells, reused across search rounds.
#[derive(Debug, Clone, Default)]
pub struct Perimeter {
    cells: Vec<Loc>,
}

impl Perimeter {
    pub fn with_capacity(capacity: usize) -> Self {
        Perimeter {
            cells: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Empties the list and seeds it with a single cell.
    pub fn reset_to(&mut self, loc: Loc) {
        self.cells.clear();
        self.cells.push(loc);
    }

    pub fn push(&mut self, loc: Loc) {
        self.cells.push(loc);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Loc> + '_ {
        self.cells.iter().copied()
    }

    pub fn as_slice(&self) -> &[Loc] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_only_seed() {
        let mut p = Perimeter::with_capacity(4);
        p.push(Loc::new(1));
        p.push(Loc::new(2));
        p.reset_to(Loc::new(9));
        assert_eq!(p.as_slice(), &[Loc::new(9)]);
        p.clear();
        assert!(p.is_empty());
    }
}
