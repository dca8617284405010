//! Table builders. Every table is generated from one seeded RNG so a run can be
//! reproduced from its seed; foreign keys are drawn from the key sets of tables
//! built earlier in the same run.

mod finance;
mod hr;
mod words;

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::GenerationSettings;
use crate::logger::debug;
use crate::record::RecordSet;
use crate::table::TableKind;

/// Primary keys of tables built so far, used for foreign-key draws.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    keys: HashMap<TableKind, Vec<i64>>,
}

impl KeyRegistry {
    pub fn record(&mut self, kind: TableKind, keys: Vec<i64>) {
        self.keys.insert(kind, keys);
    }

    pub fn keys(&self, kind: TableKind) -> &[i64] {
        self.keys.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Uniform pick with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, kind: TableKind) -> Result<i64> {
        self.keys(kind)
            .choose(rng)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no {} keys available to reference", kind))
    }
}

pub struct Generator {
    rng: ChaCha8Rng,
    seed: u64,
    settings: GenerationSettings,
    keys: KeyRegistry,
    national_ids: HashSet<u64>,
}

impl Generator {
    pub fn new(settings: GenerationSettings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        debug(&format!("generator seed: {}", seed));
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            settings,
            keys: KeyRegistry::default(),
            national_ids: HashSet::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn keys(&self) -> &KeyRegistry {
        &self.keys
    }

    /// Build one table and remember its keys for the tables that follow.
    pub fn build(&mut self, kind: TableKind) -> Result<RecordSet> {
        let rows = self.settings.rows_for(kind);
        let set = match kind {
            TableKind::Country => finance::countries(self, rows),
            TableKind::BillingCycle => finance::billing_cycles(self, rows),
            TableKind::ServiceType => finance::service_types(self, rows),
            TableKind::Tax => finance::taxes(self, rows),
            TableKind::Tariff => finance::tariffs(self, rows)?,
            TableKind::Customer => finance::customers(self, rows)?,
            TableKind::Contract => finance::contracts(self, rows)?,
            TableKind::Invoice => finance::invoices(self, rows)?,
            TableKind::Payment => finance::payments(self, rows)?,
            TableKind::RevenueRecognition => finance::recognitions(self, rows)?,
            TableKind::InvoiceLine => finance::invoice_lines(self, rows)?,
            TableKind::Employee => hr::employees(self, rows),
            TableKind::Attendance => hr::attendance(self, rows)?,
            TableKind::SalaryPayment => hr::salary_payments(self, rows)?,
        };

        let keys = match kind {
            // only staff still on the books get attendance and salary rows
            TableKind::Employee => hr::active_employee_ids(&set),
            _ => set.int_column(kind.key_column()),
        };
        self.keys.record(kind, keys);
        Ok(set)
    }

    fn id(&self, index: usize) -> i64 {
        self.settings.id_offset + index as i64 + 1
    }

    fn draw_key(&mut self, kind: TableKind) -> Result<i64> {
        self.keys.draw(&mut self.rng, kind)
    }

    /// Uniform value in `[low, high)` rounded to cents.
    fn money(&mut self, low: f64, high: f64) -> f64 {
        round2(self.rng.gen_range(low..high))
    }

    /// One of the finance date choices: the base date or a day in the window before it.
    fn finance_date(&mut self) -> NaiveDate {
        let back = self.rng.gen_range(0..=self.settings.date_window_days);
        self.settings
            .base_date
            .checked_sub_signed(Duration::days(i64::from(back)))
            .unwrap_or(NaiveDate::MIN)
    }

    fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days().max(0);
        start + Duration::days(self.rng.gen_range(0..=span))
    }

    fn pick(&mut self, items: &'static [&'static str]) -> &'static str {
        words::pick(&mut self.rng, items)
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
