//! Deduction chains used by chain-based techniques.
//!
//! A [`Chain`] is a sequence of `(cell, candidate)` nodes joined by strong
//! or weak links. A strong link means at least one of its ends holds; a weak
//! link means at most one does.

use std::fmt;

use hintgrid_core::{CellSet, ValueSet};

/// The kind of inference a link carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkType {
    /// At most one end is true.
    Weak,
    /// At least one end is true.
    Strong,
}

impl LinkType {
    /// Returns the other link type.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Weak => Self::Strong,
            Self::Strong => Self::Weak,
        }
    }

    /// Returns the symbol used when printing chains.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Weak => "->",
            Self::Strong => "=>",
        }
    }
}

/// A candidate in a cell, as visited by a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainNode {
    /// The cell index.
    pub cell: usize,
    /// The candidate value.
    pub candidate: usize,
}

/// Candidate states of one cell along a chain, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainCellState {
    /// The cell index.
    pub cell: usize,
    /// Candidates the chain assumes true in this cell.
    pub active: ValueSet,
    /// Candidates the chain assumes false in this cell.
    pub inactive: ValueSet,
}

/// A linked sequence of candidates starting at a root node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    grid_size: usize,
    nodes: Vec<ChainNode>,
    links: Vec<LinkType>,
    cells: CellSet,
}

impl Chain {
    /// Creates a chain holding only its root node.
    #[must_use]
    pub fn new(grid_size: usize, cell: usize, candidate: usize) -> Self {
        let mut cells = CellSet::new(grid_size * grid_size);
        cells.insert(cell);
        Self {
            grid_size,
            nodes: vec![ChainNode { cell, candidate }],
            links: Vec::new(),
            cells,
        }
    }

    /// Appends a node joined to the current last node by `link`.
    pub fn add_link(&mut self, link: LinkType, cell: usize, candidate: usize) {
        self.cells.insert(cell);
        self.nodes.push(ChainNode { cell, candidate });
        self.links.push(link);
    }

    /// Removes the last node.
    ///
    /// # Panics
    ///
    /// Panics if only the root node remains.
    #[track_caller]
    pub fn remove_last_link(&mut self) {
        assert!(
            self.nodes.len() > 1,
            "cannot remove the root node of a chain"
        );
        self.links.pop();
        if let Some(node) = self.nodes.pop()
            && !self.nodes.iter().any(|other| other.cell == node.cell)
        {
            self.cells.remove(node.cell);
        }
    }

    /// Returns the number of nodes, including the root.
    #[must_use]
    #[expect(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if any node lies in `cell`.
    #[must_use]
    pub fn contains(&self, cell: usize) -> bool {
        self.cells.contains(cell)
    }

    /// Returns the cells visited by the chain.
    #[must_use]
    pub fn cells(&self) -> CellSet {
        self.cells
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> ChainNode {
        self.nodes[0]
    }

    /// Returns the last node.
    #[must_use]
    pub fn last(&self) -> ChainNode {
        self.nodes[self.nodes.len() - 1]
    }

    /// Returns the type of the last link, or `None` for a lone root.
    #[must_use]
    pub fn last_link_type(&self) -> Option<LinkType> {
        self.links.last().copied()
    }

    /// Returns the nodes in chain order.
    #[must_use]
    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    /// Returns the links; link `i` joins node `i` and node `i + 1`.
    #[must_use]
    pub fn links(&self) -> &[LinkType] {
        &self.links
    }

    /// Groups consecutive nodes by cell and marks each candidate as assumed
    /// true (active) or false (inactive).
    ///
    /// The root is active when the chain starts with a weak link. Each link
    /// flips the state of the next candidate.
    #[must_use]
    pub fn cell_states(&self) -> Vec<ChainCellState> {
        let empty = ValueSet::new(self.grid_size);
        let mut states: Vec<ChainCellState> = Vec::new();
        let mut active = self.links.first() == Some(&LinkType::Weak);
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                active = !active;
            }
            if states.last().is_none_or(|state| state.cell != node.cell) {
                states.push(ChainCellState {
                    cell: node.cell,
                    active: empty,
                    inactive: empty,
                });
            }
            let last = states.len() - 1;
            let state = &mut states[last];
            if active {
                state.active.insert(node.candidate);
            } else {
                state.inactive.insert(node.candidate);
            }
        }
        states
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |node: &ChainNode| {
            format!(
                "r{}c{}={}",
                node.cell / self.grid_size + 1,
                node.cell % self.grid_size + 1,
                node.candidate
            )
        };
        f.write_str(&name(&self.nodes[0]))?;
        for (link, node) in self.links.iter().zip(&self.nodes[1..]) {
            write!(f, " {} {}", link.symbol(), name(node))?;
        }
        Ok(())
    }
}
