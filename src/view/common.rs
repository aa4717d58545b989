//! UI-agnostic render model types.
//!
//! These types represent presentation data without any dependency on a
//! specific rendering framework or on screen geometry. The TUI maps columns
//! to x offsets and style classes to ratatui `Style`s.

/// Cell-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellStyle {
    #[default]
    Normal,
    /// Server header line.
    Header,
    /// Column labels.
    ColumnHeader,
    /// Warning level (TUI: bold yellow). E.g. young eviction age.
    Warning,
    /// Dimmed (TUI: dark gray). E.g. the "more slabs" marker.
    Dimmed,
}

/// Slab table columns, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Slab,
    Size,
    Used,
    Pages,
    Wasted,
    EvictAge,
    Evicted,
    Set,
    Hit,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Slab,
        Column::Size,
        Column::Used,
        Column::Pages,
        Column::Wasted,
        Column::EvictAge,
        Column::Evicted,
        Column::Set,
        Column::Hit,
    ];

    /// Header label; counter columns get a `/s` suffix in rate mode.
    pub fn label(self, show_rates: bool) -> &'static str {
        match (self, show_rates) {
            (Column::Slab, _) => "SLAB",
            (Column::Size, _) => "SIZE",
            (Column::Used, _) => "USED",
            (Column::Pages, _) => "PAGES",
            (Column::Wasted, _) => "WASTED",
            (Column::EvictAge, _) => "EVICT_AGE",
            (Column::Evicted, false) => "EVICTED",
            (Column::Evicted, true) => "EVICTED/s",
            (Column::Set, false) => "SET",
            (Column::Set, true) => "SET/s",
            (Column::Hit, false) => "HIT",
            (Column::Hit, true) => "HIT/s",
        }
    }
}

/// A single positioned piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u16,
    pub column: Column,
    pub text: String,
    pub style: CellStyle,
}

/// Flat list of cells for one draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderModel {
    pub cells: Vec<Cell>,
}

impl RenderModel {
    pub fn push(&mut self, row: u16, column: Column, text: String, style: CellStyle) {
        self.cells.push(Cell {
            row,
            column,
            text,
            style,
        });
    }

    /// Number of rows the model spans.
    #[cfg(test)]
    pub fn height(&self) -> u16 {
        self.cells.iter().map(|c| c.row + 1).max().unwrap_or(0)
    }

    /// Cell at `row`/`column`, if any.
    #[cfg(test)]
    pub fn cell(&self, row: u16, column: Column) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
    }

    /// Cells of one row in column order.
    #[cfg(test)]
    pub fn row(&self, row: u16) -> Vec<&Cell> {
        let mut cells: Vec<&Cell> = self.cells.iter().filter(|c| c.row == row).collect();
        cells.sort_by_key(|c| Column::ALL.iter().position(|col| *col == c.column));
        cells
    }
}
