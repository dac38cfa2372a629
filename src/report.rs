use crate::flight::FlightRecord;
use std::fmt;
use tabled::Table;
use tabled::settings::{Alignment, Style};

/// Delay versus schedule over a set of recorded flights.
pub struct DelayReport {
    rows: Vec<FlightRecord>,
}

impl DelayReport {
    /// Rows are re-sorted by scheduled time; ties keep record order.
    pub fn from_records(records: &[FlightRecord]) -> Self {
        let mut rows = records.to_vec();
        rows.sort_by_key(|r| r.scheduled_time);
        DelayReport { rows }
    }

    pub fn rows(&self) -> &[FlightRecord] {
        &self.rows
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn delayed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.delay > 0).count()
    }

    pub fn max_delay(&self) -> u32 {
        self.rows.iter().map(|r| r.delay).max().unwrap_or(0)
    }

    pub fn average_delay(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.rows.iter().map(|r| u64::from(r.delay)).sum();
        sum as f64 / self.rows.len() as f64
    }
}

impl fmt::Display for DelayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "No flights recorded.");
        }
        let mut table = Table::new(&self.rows);
        table.with(Style::rounded());
        table.with(Alignment::left());
        writeln!(f, "{}", table)?;
        write!(
            f,
            "Flights: {}  Delayed: {}  Average delay: {:.1} min  Max delay: {} min",
            self.total(),
            self.delayed_count(),
            self.average_delay(),
            self.max_delay()
        )
    }
}
