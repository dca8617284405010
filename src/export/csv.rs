use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::record::RecordSet;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `set` to `<dir>/<table_snake>.csv[.gz]`: BOM, header row, one line per row.
pub fn write_table_csv(dir: &Path, set: &RecordSet, gzip: bool) -> Result<PathBuf> {
    let stem = set.table.snake_case();
    let path = if gzip {
        dir.join(format!("{}.csv.gz", stem))
    } else {
        dir.join(format!("{}.csv", stem))
    };
    let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let out = BufWriter::new(file);

    if gzip {
        let encoder = write_records(GzEncoder::new(out, Compression::default()), set)?;
        encoder.finish()?.flush()?;
    } else {
        write_records(out, set)?.flush()?;
    }
    Ok(path)
}

fn write_records<W: Write>(mut out: W, set: &RecordSet) -> Result<W> {
    out.write_all(UTF8_BOM)?;
    let mut wtr = ::csv::Writer::from_writer(out);
    wtr.write_record(&set.columns)?;
    for row in &set.rows {
        wtr.write_record(row.iter().map(|v| v.to_field()))?;
    }
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush csv for {}: {}", set.table, e.error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{SqlValue, TableName};
    use chrono::NaiveDate;
    use std::io::Read;

    fn sample() -> RecordSet {
        let mut set = RecordSet::new(
            TableName::parse("HR.SalaryPayment"),
            vec!["SalaryPaymentID", "PaymentDate", "Notes", "Bonus"],
        );
        let d = NaiveDate::from_ymd_opt(2024, 3, 28).unwrap();
        set.push(vec![SqlValue::Int(1), d.into(), "late, but paid".into(), SqlValue::Float(250.5)]);
        set.push(vec![SqlValue::Int(2), d.into(), SqlValue::Null, SqlValue::Float(300.0)]);
        set
    }

    #[test]
    fn writes_bom_header_and_quoted_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table_csv(dir.path(), &sample(), false).unwrap();
        assert_eq!(path.file_name().unwrap(), "salary_payment.csv");

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "SalaryPaymentID,PaymentDate,Notes,Bonus");
        assert_eq!(lines[1], "1,2024-03-28,\"late, but paid\",250.5");
        assert_eq!(lines[2], "2,2024-03-28,,300");
    }

    #[test]
    fn gzip_output_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table_csv(dir.path(), &sample(), true).unwrap();
        assert_eq!(path.file_name().unwrap(), "salary_payment.csv.gz");

        let mut decoded = Vec::new();
        flate2::read::GzDecoder::new(File::open(&path).unwrap())
            .read_to_end(&mut decoded)
            .unwrap();
        assert!(decoded.starts_with(UTF8_BOM));
        assert_eq!(String::from_utf8_lossy(&decoded).lines().count(), 3);
    }
}
