/// Word (.docx) document model.
///
/// This module provides typed, borrowed views over the parsed XML of a
/// WordprocessingML document, plus the few mutations remediation needs.
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `Document`: The main document part and its body
/// - `Paragraph`: A paragraph with runs, hyperlinks and drawings
/// - `Run`: A text run with formatting
/// - `Table`: A table with rows and cells (`TableMut` to mark header rows)
/// - `StyleNames`: Style id to style name lookup
///
/// # Example
///
/// ```rust,no_run
/// use docx_remediate::ooxml::docx::Document;
///
/// # fn run(xml: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
/// let doc = Document::parse(xml)?;
///
/// // Access paragraphs and runs
/// for para in doc.paragraphs() {
///     println!("Paragraph: {}", para.text());
///     for run in para.runs() {
///         println!("  Run: {} (bold: {:?})", run.text(), run.bold());
///     }
/// }
///
/// // Access tables
/// for table in doc.tables() {
///     for row in table.rows() {
///         for cell in row.cells() {
///             println!("Cell: {}", cell.text());
///         }
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub mod document;
pub mod drawing;
pub mod header_footer;
pub mod paragraph;
pub mod styles;
pub mod table;

pub use document::Document;
pub use drawing::Drawing;
pub use paragraph::{Hyperlink, Paragraph, Run};
pub use styles::StyleNames;
pub use table::{Cell, HeaderRowOutcome, Row, Table, TableMut, VMergeState};
