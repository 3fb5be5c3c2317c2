//! The crossword grid: a rectangular cell matrix plus its derived spans.
//!
//! A *span* is a maximal horizontal or vertical run of non-block cells.
//! Spans are computed once, from the block pattern alone, when the grid is
//! constructed; only the letters inside them change afterwards. The search
//! engine reads spans out as pattern strings (a *slot*) and writes candidate
//! words back in.

use crate::errors::GridError;
use std::fmt;
use std::fmt::{Display, Formatter};

pub(crate) const BLOCK_CH: char = '#';
pub(crate) const BLANK_CH: char = '.';
const COMMENT_CH: char = '/';

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// `#`: no letter can ever go here; separates spans.
    Block,
    /// `.`: a letter cell not yet filled.
    Blank,
    /// An upper-case letter, pre-filled or committed by the search.
    Letter(char),
}

impl Cell {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            BLOCK_CH => Some(Cell::Block),
            BLANK_CH => Some(Cell::Blank),
            'A'..='Z' => Some(Cell::Letter(ch)),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Cell::Block => BLOCK_CH,
            Cell::Blank => BLANK_CH,
            Cell::Letter(ch) => ch,
        }
    }

    #[must_use]
    pub fn is_block(self) -> bool {
        matches!(self, Cell::Block)
    }
}

/// Zero-based (row, col) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A maximal run of non-block cells. The cell before `start` and the cell
/// after the end (in the span's direction) are out of bounds or blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Point,
    pub len: usize,
    pub vertical: bool,
}

impl Span {
    /// Coordinate of the i-th cell along the span.
    #[must_use]
    pub fn point_at(&self, i: usize) -> Point {
        assert!(i < self.len, "index {i} out of span of length {}", self.len);
        if self.vertical {
            Point::new(self.start.row + i, self.start.col)
        } else {
            Point::new(self.start.row, self.start.col + i)
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{} len={} vert={}]", self.start, self.len, self.vertical)
    }
}

/// Blank/letter content of a span snapshot. Blocks cannot appear in a span,
/// so a (non-degenerate) span is always exactly one of empty, partial, full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attribute {
    pub has_letters: bool,
    pub has_blanks: bool,
}

impl Attribute {
    /// All cells blank.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.has_blanks && !self.has_letters
    }

    /// Some cells blank, some lettered.
    #[must_use]
    pub fn is_partial(self) -> bool {
        self.has_blanks && self.has_letters
    }

    /// All cells lettered.
    #[must_use]
    pub fn is_full(self) -> bool {
        !self.has_blanks && self.has_letters
    }
}

/// A span paired with its current pattern string. Ephemeral; the engine
/// snapshots slots once per search node and discards them on return.
#[derive(Debug, Clone)]
pub struct Slot {
    pub span: Span,
    pub pattern: String,
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}'", self.span, self.pattern)
    }
}

/// Every slot of a grid snapshot, classified by content.
#[derive(Debug, Default)]
pub struct SlotClasses {
    pub empty: Vec<Slot>,
    pub partial: Vec<Slot>,
    pub full: Vec<Slot>,
}

/// The mutable search state: cells in row-major order plus the span list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    spans: Vec<Span>,
}

impl Grid {
    /// Parse a grid from text.
    ///
    /// Blank lines and lines starting with `/` are ignored; a trailing `\r`
    /// per line is tolerated. All remaining lines must share one length and
    /// use only `#`, `.`, and `A`-`Z`. Spans shorter than `min_span_len` are
    /// dropped from the derived span list; pass 1 to keep everything,
    /// including the single-cell spans a word list usually cannot fill.
    pub fn parse_from_str(contents: &str, min_span_len: usize) -> Result<Grid, GridError> {
        let lines: Vec<&str> = contents
            .lines()
            .map(|raw_line| raw_line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_CH))
            .collect();

        if lines.is_empty() {
            return Err(GridError::EmptyGrid);
        }

        let rows = lines.len();
        let cols = lines[0].chars().count();
        let mut cells = Vec::with_capacity(rows * cols);

        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != cols {
                return Err(GridError::RaggedRow { row, len, expected: cols });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(GridError::InvalidCell { ch, row, col })?;
                cells.push(cell);
            }
        }

        let mut grid = Grid { rows, cols, cells, spans: Vec::new() };
        grid.fill_spans(min_span_len);
        Ok(grid)
    }

    /// Read a grid from a file. See [`Grid::parse_from_str`].
    pub fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
        min_span_len: usize,
    ) -> Result<Grid, GridError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| GridError::Io {
            path: path_ref.display().to_string(),
            source: e,
        })?;
        Self::parse_from_str(&data, min_span_len)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The larger grid dimension; no word longer than this can fit.
    #[must_use]
    pub fn max_dim(&self) -> usize {
        self.rows.max(self.cols)
    }

    #[must_use]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.row < self.rows && p.col < self.cols
    }

    fn index(&self, p: Point) -> usize {
        assert!(
            self.in_bounds(p),
            "point {p} outside {}x{} grid",
            self.rows,
            self.cols
        );
        p.row * self.cols + p.col
    }

    #[must_use]
    pub fn cell(&self, p: Point) -> Cell {
        self.cells[self.index(p)]
    }

    pub fn set_cell(&mut self, p: Point, cell: Cell) {
        let i = self.index(p);
        self.cells[i] = cell;
    }

    /// Spans in derivation order: horizontals in row-major start order, then
    /// verticals in column-major start order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Copy the span's cells into a pattern string, noting along the way
    /// whether any cell is blank and whether any is a letter.
    #[must_use]
    pub fn read_span(&self, span: &Span) -> (String, Attribute) {
        let mut pattern = String::with_capacity(span.len);
        let mut attr = Attribute::default();
        for i in 0..span.len {
            let cell = self.cell(span.point_at(i));
            match cell {
                Cell::Blank => attr.has_blanks = true,
                Cell::Letter(_) => attr.has_letters = true,
                Cell::Block => unreachable!("block inside span {span}"),
            }
            pattern.push(cell.to_char());
        }
        (pattern, attr)
    }

    /// Overwrite the span's cells with `word`. Blanks in `word` un-commit
    /// cells, which is how the engine restores a pre-commit pattern.
    ///
    /// # Panics
    ///
    /// Panics if `word` and the span differ in length or if `word` contains
    /// anything other than `A`-`Z` and `.`; both are caller bugs.
    pub fn write_span(&mut self, span: &Span, word: &str) {
        assert_eq!(
            word.chars().count(),
            span.len,
            "word '{word}' does not fit span {span}"
        );
        for (i, ch) in word.chars().enumerate() {
            let cell = match ch {
                BLANK_CH => Cell::Blank,
                'A'..='Z' => Cell::Letter(ch),
                _ => panic!("invalid character '{ch}' written to span {span}"),
            };
            self.set_cell(span.point_at(i), cell);
        }
    }

    /// Snapshot every span with its current pattern, classified as
    /// empty / partial / full.
    #[must_use]
    pub fn classify_slots(&self) -> SlotClasses {
        let mut classes = SlotClasses::default();
        for span in &self.spans {
            let (pattern, attr) = self.read_span(span);
            let slot = Slot { span: *span, pattern };
            if attr.is_empty() {
                classes.empty.push(slot);
            } else if attr.is_partial() {
                classes.partial.push(slot);
            } else {
                classes.full.push(slot);
            }
        }
        classes
    }

    // Span derivation: one walk along each row for horizontal spans, then
    // one along each column for vertical spans. Depends only on the block
    // pattern, never on letters.
    fn fill_spans(&mut self, min_span_len: usize) {
        debug_assert!(self.spans.is_empty());
        self.fill_spans_along(false, min_span_len);
        self.fill_spans_along(true, min_span_len);
    }

    fn fill_spans_along(&mut self, vertical: bool, min_span_len: usize) {
        let (lines, cells_per_line) = if vertical {
            (self.cols, self.rows)
        } else {
            (self.rows, self.cols)
        };

        for line in 0..lines {
            let mut i = 0;
            while i < cells_per_line {
                while i < cells_per_line && self.cell(line_point(line, i, vertical)).is_block() {
                    i += 1;
                }
                if i >= cells_per_line {
                    break;
                }
                let start = line_point(line, i, vertical);
                let mut len = 0;
                while i < cells_per_line && !self.cell(line_point(line, i, vertical)).is_block() {
                    i += 1;
                    len += 1;
                }
                if len >= min_span_len {
                    self.spans.push(Span { start, len, vertical });
                }
            }
        }
    }
}

fn line_point(line: usize, offset: usize, vertical: bool) -> Point {
    if vertical {
        Point::new(offset, line)
    } else {
        Point::new(line, offset)
    }
}

impl Display for Grid {
    /// Renders the grid row by row with the input character set.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                write!(f, "{}", self.cell(Point::new(row, col)).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
