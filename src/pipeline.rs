use anyhow::Result;

use crate::generate::Generator;
use crate::logger::{info, warn};
use crate::record::RecordSet;
use crate::report::{Reporter, RunSummary, TableReport};
use crate::table::TableKind;

/// Build every table of `tables` in order and hand the selected ones to `sink`.
///
/// Tables outside `only` are still generated so their keys are available to
/// the tables that reference them. A table that fails to build or to be
/// written is reported and the run moves on.
pub fn run<S>(
    generator: &mut Generator,
    tables: &[TableKind],
    only: &[TableKind],
    reporter: &mut dyn Reporter,
    mut sink: S,
) -> RunSummary
where
    S: FnMut(&RecordSet, &mut dyn Reporter) -> TableReport,
{
    let mut summary = RunSummary::default();
    for &kind in tables {
        let selected = only.is_empty() || only.contains(&kind);
        match generator.build(kind) {
            Ok(set) if selected => {
                info(&format!("{}: generated {} rows", kind, set.len()));
                let report = sink(&set, reporter);
                summary.reports.push(report);
            }
            Ok(set) => info(&format!("{}: generated {} rows for key draws only", kind, set.len())),
            Err(err) => {
                warn(&format!("{}: generation failed: {:#}", kind, err));
                if selected {
                    let report = TableReport::failed(kind.to_string(), err);
                    reporter.table_finished(&report);
                    summary.reports.push(report);
                }
            }
        }
    }
    summary
}

/// Wrap a single-shot export (CSV file, script section) as a table report.
pub fn export_table<F>(set: &RecordSet, reporter: &mut dyn Reporter, write: F) -> TableReport
where
    F: FnOnce(&RecordSet) -> Result<usize>,
{
    let table = set.table.to_string();
    let mut report = TableReport::new(table.clone(), set.len());
    reporter.table_started(&table, set.len());
    match write(set) {
        Ok(rows) => {
            report.processed = rows;
            report.chunks = 1;
            reporter.rows_processed(rows);
        }
        Err(err) => report.failure = Some(err),
    }
    reporter.table_finished(&report);
    report
}
