//! Raw rows as produced by a row source.

/// One raw row, before any field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRow {
    /// Cells of a delimited record.
    Cells(Vec<String>),
    /// A whole fixed-width line, without its terminator.
    Line(String),
    /// A record the source could not read. Every field extraction fails
    /// with the reader's message.
    Unreadable(String),
}

impl RawRow {
    /// Returns the cell at a 0-based index.
    ///
    /// A line counts as a single cell.
    pub fn cell(&self, index: usize) -> Option<&str> {
        match self {
            RawRow::Cells(cells) => cells.get(index).map(String::as_str),
            RawRow::Line(line) => (index == 0).then_some(line.as_str()),
            RawRow::Unreadable(_) => None,
        }
    }

    /// Number of cells (1 for a line).
    pub fn width(&self) -> usize {
        match self {
            RawRow::Cells(cells) => cells.len(),
            RawRow::Line(_) => 1,
            RawRow::Unreadable(_) => 0,
        }
    }

    /// The line of a fixed-width row.
    pub fn line(&self) -> Option<&str> {
        match self {
            RawRow::Line(line) => Some(line),
            RawRow::Cells(_) | RawRow::Unreadable(_) => None,
        }
    }

    /// The reader's message for an unreadable record.
    pub fn unreadable(&self) -> Option<&str> {
        match self {
            RawRow::Unreadable(message) => Some(message),
            RawRow::Cells(_) | RawRow::Line(_) => None,
        }
    }
}
