use anyhow::Result;
use rand::Rng;

use super::{words, Generator};
use crate::record::{truncate, RecordSet, SqlValue};
use crate::table::TableKind;

const BILLING_CYCLES: &[(&str, i64)] = &[
    ("Monthly", 30),
    ("Quarterly", 90),
    ("Annually", 365),
    ("Bi-Weekly", 14),
    ("Weekly", 7),
];

fn empty(kind: TableKind, rows: usize) -> RecordSet {
    RecordSet::with_capacity(kind.table_name(), kind.columns(), rows)
}

pub fn countries(g: &mut Generator, rows: usize) -> RecordSet {
    let mut set = empty(TableKind::Country, rows);
    for i in 0..rows {
        let (name, code) = words::country(&mut g.rng);
        set.push(vec![
            g.id(i).into(),
            truncate(name.to_string(), 100).into(),
            truncate(code.to_string(), 10).into(),
        ]);
    }
    set
}

pub fn customers(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let mut set = empty(TableKind::Customer, rows);
    for i in 0..rows {
        let code = format!("CUST{:04}", i + 1);
        set.push(vec![
            g.id(i).into(),
            truncate(code, 19).into(),
            truncate(words::company(&mut g.rng), 99).into(),
            g.pick(&["Individual", "Company", "Foreign"]).into(),
            truncate(words::bothify(&mut g.rng, "??####??"), 19).into(),
            truncate(words::bothify(&mut g.rng, "VAT###??"), 19).into(),
            truncate(words::phone_number(&mut g.rng), 19).into(),
            truncate(words::company_email(&mut g.rng), 99).into(),
            truncate(words::address(&mut g.rng), 199).into(),
            g.draw_key(TableKind::Country)?.into(),
        ]);
    }
    Ok(set)
}

/// Fixed cycle list; extra rows cycle through it again.
pub fn billing_cycles(g: &mut Generator, rows: usize) -> RecordSet {
    let mut set = empty(TableKind::BillingCycle, rows);
    for i in 0..rows {
        let (name, days) = BILLING_CYCLES[i % BILLING_CYCLES.len()];
        set.push(vec![g.id(i).into(), name.into(), days.into()]);
    }
    set
}

pub fn service_types(g: &mut Generator, rows: usize) -> RecordSet {
    let mut set = empty(TableKind::ServiceType, rows);
    for i in 0..rows {
        let name = words::title_case(&words::bs(&mut g.rng));
        set.push(vec![
            g.id(i).into(),
            truncate(name, 99).into(),
            g.pick(&["Unloading", "Storage", "Transport"]).into(),
            g.money(50.0, 499.0).into(),
            g.pick(&["TEU", "Hour", "Ton"]).into(),
            SqlValue::Int(g.rng.gen_range(0..=1)),
            SqlValue::Int(1),
        ]);
    }
    set
}

pub fn taxes(g: &mut Generator, rows: usize) -> RecordSet {
    let mut set = empty(TableKind::Tax, rows);
    for i in 0..rows {
        set.push(vec![
            g.id(i).into(),
            truncate(format!("Tax{:03}", i + 1), 49).into(),
            g.money(0.01, 0.25).into(),
            g.pick(&["National", "Service"]).into(),
            g.finance_date().into(),
            g.finance_date().into(),
        ]);
    }
    set
}

pub fn tariffs(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let mut set = empty(TableKind::Tariff, rows);
    for i in 0..rows {
        set.push(vec![
            g.id(i).into(),
            g.draw_key(TableKind::ServiceType)?.into(),
            g.finance_date().into(),
            g.finance_date().into(),
            g.money(100.0, 999.0).into(),
        ]);
    }
    Ok(set)
}

pub fn contracts(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let mut set = empty(TableKind::Contract, rows);
    for i in 0..rows {
        set.push(vec![
            g.id(i).into(),
            g.draw_key(TableKind::Customer)?.into(),
            truncate(format!("CON{:06}", i + 1), 49).into(),
            g.finance_date().into(),
            g.finance_date().into(),
            g.draw_key(TableKind::BillingCycle)?.into(),
            g.pick(&["Net 30", "Net 60", "Prepaid"]).into(),
            g.pick(&["Active", "Expired"]).into(),
            g.finance_date().into(),
        ]);
    }
    Ok(set)
}

pub fn invoices(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let mut set = empty(TableKind::Invoice, rows);
    for i in 0..rows {
        set.push(vec![
            g.id(i).into(),
            g.draw_key(TableKind::Contract)?.into(),
            truncate(format!("INV{:07}", i + 1), 49).into(),
            g.finance_date().into(),
            g.finance_date().into(),
            g.pick(&["Paid", "Overdue", "Cancelled"]).into(),
            g.money(500.0, 19999.0).into(),
            g.money(50.0, 1999.0).into(),
            truncate(words::user_name(&mut g.rng), 99).into(),
            g.finance_date().into(),
        ]);
    }
    Ok(set)
}

pub fn payments(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let mut set = empty(TableKind::Payment, rows);
    for i in 0..rows {
        set.push(vec![
            g.id(i).into(),
            g.draw_key(TableKind::Invoice)?.into(),
            g.finance_date().into(),
            g.money(50.0, 9999.0).into(),
            g.pick(&["Cash", "Card", "Transfer"]).into(),
            truncate(words::user_name(&mut g.rng), 100).into(),
            truncate(format!("REF{}", g.rng.gen_range(10000..=99998)), 49).into(),
            truncate(words::sentence(&mut g.rng), 499).into(),
        ]);
    }
    Ok(set)
}

pub fn recognitions(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let mut set = empty(TableKind::RevenueRecognition, rows);
    for i in 0..rows {
        set.push(vec![
            g.id(i).into(),
            g.draw_key(TableKind::Invoice)?.into(),
            g.finance_date().into(),
            g.money(20.0, 7999.0).into(),
            truncate(words::bs(&mut g.rng), 499).into(),
        ]);
    }
    Ok(set)
}

pub fn invoice_lines(g: &mut Generator, rows: usize) -> Result<RecordSet> {
    let mut set = empty(TableKind::InvoiceLine, rows);
    for i in 0..rows {
        set.push(vec![
            g.id(i).into(),
            g.draw_key(TableKind::Invoice)?.into(),
            g.draw_key(TableKind::ServiceType)?.into(),
            g.draw_key(TableKind::Tax)?.into(),
            SqlValue::Int(g.rng.gen_range(1..49)),
            g.money(20.0, 499.0).into(),
            g.money(0.0, 0.3).into(),
            g.money(5.0, 299.0).into(),
            g.money(20.0, 499.0).into(),
        ]);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tests::small_settings;

    fn column<'a>(set: &'a RecordSet, name: &str) -> impl Iterator<Item = &'a SqlValue> {
        let idx = set.column_index(name).unwrap();
        set.rows.iter().map(move |r| &r[idx])
    }

    fn floats(set: &RecordSet, name: &str) -> Vec<f64> {
        column(set, name)
            .map(|v| match v {
                SqlValue::Float(f) => *f,
                other => panic!("{} is not a float: {:?}", name, other),
            })
            .collect()
    }

    #[test]
    fn billing_cycles_are_fixed() {
        let mut g = Generator::new(small_settings());
        let set = g.build(TableKind::BillingCycle).unwrap();
        let names: Vec<&str> = column(&set, "CycleName").filter_map(SqlValue::as_text).collect();
        assert_eq!(names, ["Monthly", "Quarterly", "Annually", "Bi-Weekly", "Weekly"]);
        assert_eq!(set.int_column("CycleLengthInDays"), vec![30, 90, 365, 14, 7]);
    }

    #[test]
    fn customers_use_sequential_codes_and_bounded_text() {
        let mut g = Generator::new(small_settings());
        g.build(TableKind::Country).unwrap();
        let set = g.build(TableKind::Customer).unwrap();
        let codes: Vec<&str> = column(&set, "CustomerCode").filter_map(SqlValue::as_text).collect();
        assert_eq!(codes[0], "CUST0001");
        assert_eq!(codes[19], "CUST0020");
        for v in column(&set, "Address") {
            let text = v.as_text().unwrap();
            assert!(text.chars().count() <= 199);
            assert!(!text.contains('\n'));
        }
        for v in column(&set, "CustomerType") {
            assert!(["Individual", "Company", "Foreign"].contains(&v.as_text().unwrap()));
        }
    }

    #[test]
    fn amounts_stay_in_range() {
        let mut g = Generator::new(small_settings());
        for kind in &TableKind::FINANCE[..8] {
            g.build(*kind).unwrap();
        }
        let invoices = g.build(TableKind::Invoice).unwrap();
        assert!(floats(&invoices, "TotalAmount").iter().all(|v| (500.0..=19999.0).contains(v)));
        assert!(floats(&invoices, "TaxAmount").iter().all(|v| (50.0..=1999.0).contains(v)));
        let numbers: Vec<&str> = column(&invoices, "InvoiceNumber")
            .filter_map(SqlValue::as_text)
            .collect();
        assert_eq!(numbers[0], "INV0000001");

        let lines = g.build(TableKind::InvoiceLine).unwrap();
        assert!(lines.int_column("Quantity").iter().all(|q| (1..49).contains(q)));
        assert!(floats(&lines, "DiscountPercent").iter().all(|d| (0.0..=0.3).contains(d)));
    }

    #[test]
    fn payment_references_are_five_digits() {
        let mut g = Generator::new(small_settings());
        for kind in &TableKind::FINANCE[..8] {
            g.build(*kind).unwrap();
        }
        let payments = g.build(TableKind::Payment).unwrap();
        for v in column(&payments, "ReferenceNumber") {
            let r = v.as_text().unwrap();
            let n: u32 = r.strip_prefix("REF").unwrap().parse().unwrap();
            assert!((10000..=99998).contains(&n));
        }
    }
}
