//! Table cell integrity: spans, vertical merges and empty cells.
use super::{DetectionContext, Detector};
use crate::accessibility::report::{CellIssue, PartFailure, Report};

pub struct TableCellIntegrity;

impl Detector for TableCellIntegrity {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let document = context.document()?;

        let mut issues = Vec::new();
        for (table_index, table) in document.all_tables().iter().enumerate() {
            for (row, table_row) in table.rows().iter().enumerate() {
                for (col, cell) in table_row.cells().iter().enumerate() {
                    let grid_span = cell.grid_span().filter(|&span| span > 1);
                    let v_merge = cell.v_merge();
                    let is_empty = cell.text().trim().is_empty();

                    if grid_span.is_some() || v_merge.is_some() || is_empty {
                        issues.push(CellIssue {
                            table_index,
                            row,
                            col,
                            grid_span,
                            v_merge,
                            is_empty,
                        });
                    }
                }
            }
        }

        report.summary.flag(issues.len());
        report.details.merged_split_empty_cells = Some(issues);
        Ok(())
    }
}
