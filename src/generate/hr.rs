use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rand::Rng;

use super::{round2, words, Generator};
use crate::record::{RecordSet, SqlValue};
use crate::table::TableKind;

const POSITIONS: &[&str] = &[
    "Crane Operator",
    "Forklift Driver",
    "Dock Supervisor",
    "Logistics Clerk",
    "Port Manager",
    "Maintenance Technician",
    "Security Officer",
    "Cargo Inspector",
];

const ACTIVE_STATUSES: &[&str] = &["Active", "OnLeave"];

/// Pick from `(value, weight)` pairs, weights in percent.
fn weighted<R: Rng + ?Sized>(rng: &mut R, choices: &[(&'static str, u32)]) -> &'static str {
    let total: u32 = choices.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total.max(1));
    for &(value, weight) in choices {
        if roll < weight {
            return value;
        }
        roll -= weight;
    }
    choices.last().map_or("", |&(v, _)| v)
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Ten-digit national id, unique within the run.
fn national_id(g: &mut Generator) -> String {
    loop {
        let nid = g.rng.gen_range(1_000_000_000u64..=9_999_999_999);
        if g.national_ids.insert(nid) {
            return nid.to_string();
        }
    }
}

pub fn employees(g: &mut Generator, rows: usize) -> RecordSet {
    let kind = TableKind::Employee;
    let mut set = RecordSet::with_capacity(kind.table_name(), kind.columns(), rows);
    let today = g.settings.base_date;
    for i in 0..rows {
        let hire = g.date_between(ymd(2015, 1, 1), today);
        let birth = g.date_between(ymd(1965, 1, 1), ymd(2007, 12, 31));
        set.push(vec![
            g.id(i).into(),
            words::person_name(&mut g.rng).into(),
            g.pick(POSITIONS).into(),
            national_id(g).into(),
            hire.into(),
            birth.into(),
            weighted(&mut g.rng, &[("Male", 70), ("Female", 30)]).into(),
            weighted(&mut g.rng, &[("Married", 60), ("Single", 40)]).into(),
            words::address(&mut g.rng).into(),
            format!("+989{}", g.rng.gen_range(100_000_000..=999_999_999)).into(),
            words::email(&mut g.rng).into(),
            weighted(&mut g.rng, &[("Active", 80), ("OnLeave", 15), ("Terminated", 5)]).into(),
        ]);
    }
    set
}

/// Employee ids eligible for attendance and salary rows.
pub fn active_employee_ids(set: &RecordSet) -> Vec<i64> {
    let (Some(id_idx), Some(status_idx)) =
        (set.column_index("EmployeeID"), set.column_index("EmploymentStatus"))
    else {
        return Vec::new();
    };
    set.rows
        .iter()
        .filter(|r| {
            r[status_idx]
                .as_text()
                .is_some_and(|s| ACTIVE_STATUSES.contains(&s))
        })
        .filter_map(|r| r[id_idx].as_int())
        .collect()
}

/// Monday to Saturday always; Sunday one time in ten.
fn attendance_date(g: &mut Generator) -> NaiveDate {
    let start = ymd(2020, 1, 1);
    let end = g.settings.base_date;
    loop {
        let date = g.date_between(start, end);
        if date.weekday() != Weekday::Sun || g.rng.gen_bool(0.1) {
            return date;
        }
    }
}

pub fn attendance(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let kind = TableKind::Attendance;
    let mut set = RecordSet::with_capacity(kind.table_name(), kind.columns(), rows);
    let midnight = NaiveTime::MIN;
    for i in 0..rows {
        let employee = g.draw_key(TableKind::Employee)?;
        let date = attendance_date(g);
        let status = weighted(&mut g.rng, &[("Present", 85), ("Late", 10), ("Absent", 5)]);

        let (check_in, check_out, hours) = if status == "Absent" {
            (midnight, midnight, 0.0)
        } else {
            let hour = if status == "Present" {
                g.rng.gen_range(7..=8)
            } else {
                g.rng.gen_range(8..=9)
            };
            let minute = g.rng.gen_range(0..60);
            let check_in = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(midnight);
            let worked: f64 = g.rng.gen_range(6.0..10.0);
            let check_out = check_in + Duration::seconds((worked * 3600.0) as i64);
            (check_in, check_out, round2(worked))
        };

        set.push(vec![
            g.id(i).into(),
            employee.into(),
            date.into(),
            status.into(),
            check_in.into(),
            check_out.into(),
            SqlValue::Float(hours),
            words::sentence(&mut g.rng).into(),
        ]);
    }
    Ok(set)
}

pub fn salary_payments(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let kind = TableKind::SalaryPayment;
    let mut set = RecordSet::with_capacity(kind.table_name(), kind.columns(), rows);
    let start = ymd(2020, 1, 1);
    let end = g.settings.base_date;
    for i in 0..rows {
        let employee = g.draw_key(TableKind::Employee)?;
        let drawn = g.date_between(start, end);
        // payroll runs on the 28th
        let paid = drawn.with_day(28).unwrap_or(drawn);
        let amount = g.money(2000.0, 6000.0);
        let bonus = g.money(200.0, 1000.0);
        let deductions = g.money(100.0, 500.0);
        set.push(vec![
            g.id(i).into(),
            employee.into(),
            paid.into(),
            amount.into(),
            bonus.into(),
            deductions.into(),
            round2(amount + bonus - deductions).into(),
            weighted(&mut g.rng, &[("BankTransfer", 90), ("Cash", 10)]).into(),
            format!("REF{}", g.rng.gen_range(100_000..=999_999)).into(),
        ]);
    }
    Ok(set)
}
