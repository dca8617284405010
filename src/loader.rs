use crate::db::Destination;
use crate::logger::{debug, error};
use crate::record::RecordSet;
use crate::report::{Reporter, TableReport};

/// `INSERT INTO <table> (<columns>) VALUES (<placeholders>)` for one row.
pub fn insert_statement(dest: &dyn Destination, set: &RecordSet) -> String {
    let columns = set.columns.join(", ");
    let placeholders = (1..=set.columns.len())
        .map(|i| dest.placeholder(i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        dest.qualify(&set.table),
        columns,
        placeholders
    )
}

/// Persist `set` in contiguous chunks of at most `chunk_size` rows, one
/// transaction per chunk. The first failing chunk is rolled back and the rest
/// of the table is skipped; earlier chunks stay committed.
pub fn load_table(
    dest: &mut dyn Destination,
    set: &RecordSet,
    chunk_size: usize,
    reporter: &mut dyn Reporter,
) -> TableReport {
    let table = set.table.to_string();
    let mut report = TableReport::new(table.clone(), set.len());
    reporter.table_started(&table, set.len());

    let sql = insert_statement(dest, set);
    debug(&format!("{}: {}", table, sql));

    for (index, chunk) in set.rows.chunks(chunk_size.max(1)).enumerate() {
        let outcome = dest
            .execute_batch(&sql, chunk)
            .and_then(|()| dest.commit());
        if let Err(err) = outcome {
            error(&format!("{}: chunk {} failed: {:#}", table, index, err));
            let err = match dest.rollback() {
                Ok(()) => err,
                Err(rb) => err.context(format!("rollback also failed: {:#}", rb)),
            };
            report.failure = Some(err);
            break;
        }
        report.processed += chunk.len();
        report.chunks += 1;
        reporter.rows_processed(chunk.len());
        debug(&format!(
            "{}: committed chunk {} ({}/{})",
            table, index, report.processed, report.total
        ));
    }

    reporter.table_finished(&report);
    report
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::Sqlite;
    use crate::record::{Row, SqlValue, TableName};
    use crate::report::tests::Recorder;
    use anyhow::Result;

    /// In-memory destination that records every call and can fail a given chunk.
    #[derive(Default)]
    pub struct RecordingDestination {
        pub batches: Vec<Vec<Row>>,
        pub pending: Vec<Row>,
        pub committed: Vec<Row>,
        pub commits: usize,
        pub rollbacks: usize,
        pub fail_on_batch: Option<usize>,
    }

    impl Destination for RecordingDestination {
        fn execute_batch(&mut self, _sql: &str, rows: &[Row]) -> Result<()> {
            let n = self.batches.len();
            self.batches.push(rows.to_vec());
            if self.fail_on_batch == Some(n) {
                anyhow::bail!("constraint violated in batch {}", n);
            }
            self.pending.extend_from_slice(rows);
            Ok(())
        }

        fn commit(&mut self) -> Result<()> {
            self.commits += 1;
            self.committed.append(&mut self.pending);
            Ok(())
        }

        fn rollback(&mut self) -> Result<()> {
            self.rollbacks += 1;
            self.pending.clear();
            Ok(())
        }

        fn server_time(&mut self) -> Result<String> {
            Ok("now".into())
        }
    }

    fn numbered(table: &str, n: usize) -> RecordSet {
        let mut set = RecordSet::new(TableName::parse(table), vec!["ID", "Name"]);
        for i in 1..=n {
            set.push(vec![SqlValue::Int(i as i64), SqlValue::Text(format!("row {}", i))]);
        }
        set
    }

    #[test]
    fn builds_insert_statement() {
        let dest = RecordingDestination::default();
        let set = numbered("Finance.Tax", 0);
        assert_eq!(
            insert_statement(&dest, &set),
            "INSERT INTO Finance.Tax (ID, Name) VALUES (?, ?)"
        );
    }

    #[test]
    fn small_table_is_one_chunk() {
        let mut dest = RecordingDestination::default();
        let mut rec = Recorder::default();
        let report = load_table(&mut dest, &numbered("Finance.BillingCycle", 5), 1000, &mut rec);
        assert_eq!(dest.batches.len(), 1);
        assert_eq!(dest.commits, 1);
        assert_eq!(report.processed, 5);
        assert!(report.failure.is_none());
    }

    #[test]
    fn ten_thousand_rows_in_ten_chunks() {
        let mut dest = RecordingDestination::default();
        let mut rec = Recorder::default();
        let set = numbered("Finance.Invoice", 10_000);
        let report = load_table(&mut dest, &set, 1000, &mut rec);
        assert_eq!(dest.batches.len(), 10);
        assert_eq!(dest.commits, 10);
        assert_eq!(report.chunks, 10);
        assert_eq!(report.summary(), "Finance.Invoice: 10000 rows processed");
        assert_eq!(rec.progress, vec![1000; 10]);
    }

    #[test]
    fn chunking_preserves_order_and_content() {
        let mut dest = RecordingDestination::default();
        let mut rec = Recorder::default();
        let set = numbered("T", 1234);
        load_table(&mut dest, &set, 100, &mut rec);
        assert_eq!(dest.batches.len(), 13);
        assert!(dest.batches.iter().all(|b| b.len() <= 100));
        assert_eq!(dest.batches.last().map(Vec::len), Some(34));
        let joined: Vec<Row> = dest.batches.concat();
        assert_eq!(joined, set.rows);
        assert_eq!(dest.committed, set.rows);
    }

    #[test]
    fn empty_set_is_a_no_op() {
        let mut dest = RecordingDestination::default();
        let mut rec = Recorder::default();
        let report = load_table(&mut dest, &numbered("T", 0), 1000, &mut rec);
        assert!(dest.batches.is_empty());
        assert_eq!(dest.commits, 0);
        assert_eq!(report.summary(), "T: 0 rows processed");
        assert_eq!(rec.finished.len(), 1);
    }

    #[test]
    fn failing_chunk_keeps_earlier_chunks() {
        let mut dest = RecordingDestination {
            fail_on_batch: Some(2),
            ..Default::default()
        };
        let mut rec = Recorder::default();
        let report = load_table(&mut dest, &numbered("T", 500), 100, &mut rec);
        assert_eq!(dest.batches.len(), 3, "chunks after the failure are skipped");
        assert_eq!(dest.commits, 2);
        assert_eq!(dest.rollbacks, 1);
        assert_eq!(dest.committed.len(), 200);
        assert_eq!(report.processed, 200);
        let err = report.failure.as_ref().unwrap();
        assert!(err.to_string().contains("constraint violated"));
    }

    #[test]
    fn zero_chunk_size_is_treated_as_one() {
        let mut dest = RecordingDestination::default();
        let mut rec = Recorder::default();
        load_table(&mut dest, &numbered("T", 3), 0, &mut rec);
        assert_eq!(dest.batches.len(), 3);
    }

    #[test]
    fn sqlite_constraint_violation_rolls_back_only_that_chunk() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE \"Payment\" (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL);")
            .unwrap();
        let mut db = Sqlite::from_connection(conn);

        let mut set = numbered("Finance.Payment", 25);
        // duplicate key in the third chunk
        set.rows[23][0] = SqlValue::Int(3);

        let mut rec = Recorder::default();
        let report = load_table(&mut db, &set, 10, &mut rec);
        assert_eq!(report.processed, 20);
        assert!(report.failure.is_some());

        let count: i64 = db
            .raw()
            .query_row("SELECT COUNT(*) FROM \"Payment\"", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 20);
        assert!(db.raw().is_autocommit());
    }

    #[test]
    fn sqlite_null_fields_become_sql_null() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE \"Notes\" (ID INTEGER PRIMARY KEY, Name TEXT);")
            .unwrap();
        let mut db = Sqlite::from_connection(conn);
        let mut set = RecordSet::new(TableName::parse("HR.Notes"), vec!["ID", "Name"]);
        set.push(vec![SqlValue::Int(1), SqlValue::Null]);

        let mut rec = Recorder::default();
        let report = load_table(&mut db, &set, 10, &mut rec);
        assert!(report.failure.is_none());
        let nulls: i64 = db
            .raw()
            .query_row("SELECT COUNT(*) FROM \"Notes\" WHERE Name IS NULL", [], |r| r.get(0))
            .unwrap();
        assert_eq!(nulls, 1);
    }
}
