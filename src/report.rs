use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};

/// Outcome of pushing one table to a destination or export.
#[derive(Debug)]
pub struct TableReport {
    pub table: String,
    pub total: usize,
    pub processed: usize,
    pub chunks: usize,
    pub failure: Option<anyhow::Error>,
}

impl TableReport {
    pub fn new(table: String, total: usize) -> Self {
        Self {
            table,
            total,
            processed: 0,
            chunks: 0,
            failure: None,
        }
    }

    pub fn failed(table: String, err: anyhow::Error) -> Self {
        Self {
            failure: Some(err),
            ..Self::new(table, 0)
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn summary(&self) -> String {
        match &self.failure {
            None => format!("{}: {} rows processed", self.table, self.processed),
            Some(err) => format!(
                "{}: failed after {}/{} rows: {:#}",
                self.table, self.processed, self.total, err
            ),
        }
    }
}

/// Console feedback while tables are processed.
pub trait Reporter {
    fn table_started(&mut self, table: &str, total: usize);
    fn rows_processed(&mut self, rows: usize);
    fn table_finished(&mut self, report: &TableReport);
}

/// Progress bar per table on stderr plus a status line per table on stdout.
pub struct ConsoleReporter {
    bar: Option<ProgressBar>,
    style: ProgressStyle,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::with_template(
            "{msg:>28} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({per_sec})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
        Self { bar: None, style }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn table_started(&mut self, table: &str, total: usize) {
        println!("{} {} ({} rows)", "Loading:".bold(), table, total);
        let bar = ProgressBar::new(total as u64);
        bar.set_style(self.style.clone());
        bar.set_message(table.to_string());
        self.bar = Some(bar);
    }

    fn rows_processed(&mut self, rows: usize) {
        if let Some(bar) = &self.bar {
            bar.inc(rows as u64);
        }
    }

    fn table_finished(&mut self, report: &TableReport) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        if report.succeeded() {
            println!("{} {}", "Success:".green(), report.summary());
        } else {
            println!("{} {}", "Error:".red(), report.summary());
        }
    }
}

/// Aggregate of every table report in a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<TableReport>,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| !r.succeeded()).count()
    }

    pub fn rows(&self) -> usize {
        self.reports.iter().map(|r| r.processed).sum()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn print(&self) {
        let line = format!(
            "{} tables, {} rows, {} failed",
            self.reports.len(),
            self.rows(),
            self.failed()
        );
        if self.all_succeeded() {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Reporter that remembers every callback.
    #[derive(Default)]
    pub struct Recorder {
        pub started: Vec<(String, usize)>,
        pub progress: Vec<usize>,
        pub finished: Vec<String>,
    }

    impl Reporter for Recorder {
        fn table_started(&mut self, table: &str, total: usize) {
            self.started.push((table.to_string(), total));
        }

        fn rows_processed(&mut self, rows: usize) {
            self.progress.push(rows);
        }

        fn table_finished(&mut self, report: &TableReport) {
            self.finished.push(report.summary());
        }
    }

    #[test]
    fn summaries_name_table_and_error() {
        let ok = TableReport {
            processed: 5,
            ..TableReport::new("Finance.BillingCycle".into(), 5)
        };
        assert_eq!(ok.summary(), "Finance.BillingCycle: 5 rows processed");

        let bad = TableReport::failed("Finance.Tax".into(), anyhow::anyhow!("duplicate key"));
        assert!(!bad.succeeded());
        assert!(bad.summary().starts_with("Finance.Tax: failed"));
        assert!(bad.summary().contains("duplicate key"));
    }

    #[test]
    fn run_summary_counts_failures() {
        let summary = RunSummary {
            reports: vec![
                TableReport {
                    processed: 30,
                    ..TableReport::new("Common.Country".into(), 30)
                },
                TableReport::failed("Finance.Customer".into(), anyhow::anyhow!("boom")),
            ],
        };
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.rows(), 30);
        assert!(!summary.all_succeeded());
    }
}
