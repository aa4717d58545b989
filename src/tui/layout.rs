//! Screen geometry for the slab table.
//!
//! The render model only knows logical columns; this table places them on
//! the terminal grid. Cells are painted left to right, so a value wider
//! than its column is overwritten by the next one. Rows without per-column
//! cells (header, aggregates) start at the `Slab` column and run across.

use crate::view::Column;

/// Column placement on the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub column: Column,
    /// X offset from the left edge.
    pub offset: u16,
}

pub const COLUMN_LAYOUT: [ColumnLayout; 9] = [
    ColumnLayout { column: Column::Slab, offset: 0 },
    ColumnLayout { column: Column::Size, offset: 10 },
    ColumnLayout { column: Column::Used, offset: 18 },
    ColumnLayout { column: Column::Pages, offset: 30 },
    ColumnLayout { column: Column::Wasted, offset: 40 },
    ColumnLayout { column: Column::EvictAge, offset: 54 },
    ColumnLayout { column: Column::Evicted, offset: 66 },
    ColumnLayout { column: Column::Set, offset: 78 },
    ColumnLayout { column: Column::Hit, offset: 92 },
];

/// X offset of `column`.
pub fn column_offset(column: Column) -> u16 {
    COLUMN_LAYOUT
        .iter()
        .find(|l| l.column == column)
        .map(|l| l.offset)
        .unwrap_or(0)
}
