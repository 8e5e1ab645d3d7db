use std::fmt;

/// The kind of a [`House`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HouseKind {
    /// A horizontal line of cells.
    Row,
    /// A vertical line of cells.
    Column,
    /// A block of cells defined by the grid geometry.
    Block,
}

impl HouseKind {
    /// All kinds in row, column, block order.
    pub const ALL: [Self; 3] = [Self::Row, Self::Column, Self::Block];
}

/// A house (row, column, or block) of a grid.
///
/// Houses are plain identities; their cells and cached values are read
/// through the owning [`Grid`](crate::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum House {
    /// A row identified by its index.
    Row {
        /// Row index.
        index: usize,
    },
    /// A column identified by its index.
    Column {
        /// Column index.
        index: usize,
    },
    /// A block identified by its index.
    Block {
        /// Block index.
        index: usize,
    },
}

impl House {
    /// Creates a house of the given kind.
    #[must_use]
    pub const fn new(kind: HouseKind, index: usize) -> Self {
        match kind {
            HouseKind::Row => Self::Row { index },
            HouseKind::Column => Self::Column { index },
            HouseKind::Block => Self::Block { index },
        }
    }

    /// Returns the kind of this house.
    #[must_use]
    pub const fn kind(self) -> HouseKind {
        match self {
            Self::Row { .. } => HouseKind::Row,
            Self::Column { .. } => HouseKind::Column,
            Self::Block { .. } => HouseKind::Block,
        }
    }

    /// Returns the region index of this house within its kind.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Row { index } | Self::Column { index } | Self::Block { index } => index,
        }
    }

    /// Returns the index among all houses: rows first, then columns, then blocks.
    #[must_use]
    pub(crate) const fn flat_index(self, grid_size: usize) -> usize {
        match self {
            Self::Row { index } => index,
            Self::Column { index } => grid_size + index,
            Self::Block { index } => 2 * grid_size + index,
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind() {
            HouseKind::Row => 'r',
            HouseKind::Column => 'c',
            HouseKind::Block => 'b',
        };
        write!(f, "{prefix}{}", self.index() + 1)
    }
}
