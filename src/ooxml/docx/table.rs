/// Table, Row, and Cell structures for Word documents.
use crate::common::xml::{Namespace, XmlElement, XmlError};
use crate::ooxml::docx::paragraph::{Paragraph, is_on};
use crate::ooxml::opc::constants::namespace::WML_MAIN;
use serde::Serialize;
use smallvec::SmallVec;

/// Vertical merge state for table cells.
///
/// In OOXML, vertical merging uses the `<w:vMerge>` element:
/// - `restart`: Starts a new vertical merge (first cell in the merge)
/// - `continue`: Continues a vertical merge from the cell above (no `val` attribute or `val="continue"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VMergeState {
    /// Starts a vertical merge (`<w:vMerge w:val="restart"/>`)
    Restart,
    /// Continues a vertical merge from above (`<w:vMerge/>` or `<w:vMerge w:val="continue"/>`)
    Continue,
}

/// A table in a Word document.
///
/// Represents a `<w:tbl>` element. Tables contain rows, which contain cells,
/// which contain paragraphs.
///
/// # Example
///
/// ```rust,ignore
/// for table in document.tables() {
///     for (row_idx, row) in table.rows().iter().enumerate() {
///         for (col_idx, cell) in row.cells().iter().enumerate() {
///             println!("Cell [{},{}]: {}", row_idx, col_idx, cell.text());
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    element: &'a XmlElement,
}

impl<'a> Table<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Rows (`w:tr`) that are direct children of the table.
    pub fn rows(&self) -> SmallVec<[Row<'a>; 16]> {
        self.element
            .children_named(WML_MAIN, "tr")
            .map(Row::new)
            .collect()
    }

    /// Get the number of rows in this table.
    pub fn row_count(&self) -> usize {
        self.element.children_named(WML_MAIN, "tr").count()
    }
}

/// A row in a table (`<w:tr>`).
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    element: &'a XmlElement,
}

impl<'a> Row<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Cells (`w:tc`) that are direct children of the row.
    pub fn cells(&self) -> SmallVec<[Cell<'a>; 16]> {
        self.element
            .children_named(WML_MAIN, "tc")
            .map(Cell::new)
            .collect()
    }

    /// Whether the row is marked to repeat as a header row on every page.
    pub fn is_header(&self) -> bool {
        self.element
            .child(WML_MAIN, "trPr")
            .and_then(|pr| pr.child(WML_MAIN, "tblHeader"))
            .is_some_and(is_on)
    }
}

/// A cell in a table row (`<w:tc>`).
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    element: &'a XmlElement,
}

impl<'a> Cell<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    fn property(&self, local: &str) -> Option<&'a XmlElement> {
        self.element.child(WML_MAIN, "tcPr")?.child(WML_MAIN, local)
    }

    /// Number of grid columns the cell spans, when `w:gridSpan` is present
    /// with a numeric value.
    pub fn grid_span(&self) -> Option<u32> {
        let value = self.property("gridSpan")?.attribute_ns(WML_MAIN, "val")?;
        atoi_simd::parse_pos::<u32, true>(value.trim().as_bytes()).ok()
    }

    /// Vertical merge state.
    ///
    /// Returns `Some(VMergeState)` if this cell participates in vertical merging,
    /// or `None` if it doesn't.
    pub fn v_merge(&self) -> Option<VMergeState> {
        let v_merge = self.property("vMerge")?;
        match v_merge.attribute_ns(WML_MAIN, "val").as_deref() {
            Some("restart") => Some(VMergeState::Restart),
            _ => Some(VMergeState::Continue),
        }
    }

    /// Concatenated `w:t` text of the cell, nested tables included.
    pub fn text(&self) -> String {
        self.element
            .descendants()
            .filter(|e| e.is(WML_MAIN, "t"))
            .map(XmlElement::text_content)
            .collect()
    }

    /// Paragraphs that are direct children of the cell.
    pub fn paragraphs(&self) -> SmallVec<[Paragraph<'a>; 8]> {
        self.element
            .children_named(WML_MAIN, "p")
            .map(Paragraph::new)
            .collect()
    }
}

/// Outcome of [`TableMut::repeat_header_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRowOutcome {
    /// The first row was newly marked as a repeating header
    Marked,
    /// The first row already repeats as a header
    AlreadyMarked,
    /// The table has no rows
    NoRows,
}

/// Mutable view of a `<w:tbl>` element.
pub struct TableMut<'a> {
    element: &'a mut XmlElement,
    w: Namespace,
}

impl<'a> TableMut<'a> {
    /// `w` must be the WordprocessingML binding in scope for the document.
    pub fn new(element: &'a mut XmlElement, w: Namespace) -> Self {
        Self { element, w }
    }

    /// Mark the first row to repeat as a header row on every page.
    ///
    /// Adds `w:trPr` (after any `w:tblPrEx`) when the row has none. A
    /// `w:tblHeader` that is present but switched off is switched on.
    pub fn repeat_header_row(&mut self) -> Result<HeaderRowOutcome, XmlError> {
        let w = &self.w;
        let Some(first_row) = self.element.child_mut(&w.uri, "tr") else {
            return Ok(HeaderRowOutcome::NoRows);
        };

        let tr_pr_index = first_row
            .child_position(&w.uri, "tblPrEx")
            .map_or(0, |i| i + 1);
        let tr_pr = first_row.get_or_insert_child(w, "trPr", tr_pr_index)?;

        if let Some(header) = tr_pr.child_mut(&w.uri, "tblHeader") {
            if is_on(header) {
                return Ok(HeaderRowOutcome::AlreadyMarked);
            }
            header.set_attribute_ns(w, "val", "1");
            return Ok(HeaderRowOutcome::Marked);
        }

        let mut header = XmlElement::new(w, "tblHeader");
        header.set_attribute_ns(w, "val", "1");
        tr_pr.push_child(header);
        Ok(HeaderRowOutcome::Marked)
    }
}
