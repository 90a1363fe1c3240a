use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Date-keyed income ledger. Repeated writes for the same date accumulate
/// rather than replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketCounter {
    income_by_date: BTreeMap<NaiveDate, i64>,
}

impl TicketCounter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_income(&mut self, date: NaiveDate, amount: i64) {
        *self.income_by_date.entry(date).or_insert(0) += amount;
    }

    pub fn income_on(&self, date: NaiveDate) -> i64 {
        self.income_by_date.get(&date).copied().unwrap_or(0)
    }

    /// Ledger entries in ascending date order.
    pub fn entries(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.income_by_date.iter().map(|(&date, &amount)| (date, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn repeated_writes_for_the_same_date_accumulate() {
        let mut counter = TicketCounter::new();
        counter.add_income(date(2026, 3, 1), 35);
        counter.add_income(date(2026, 3, 1), 40);
        assert_eq!(counter.income_on(date(2026, 3, 1)), 75);
    }

    #[test]
    fn unknown_date_reports_zero() {
        let counter = TicketCounter::new();
        assert_eq!(counter.income_on(date(2026, 3, 1)), 0);
    }

    #[test]
    fn entries_iterate_in_date_order() {
        let mut counter = TicketCounter::new();
        counter.add_income(date(2026, 3, 2), 20);
        counter.add_income(date(2026, 3, 1), 10);
        counter.add_income(date(2026, 3, 3), 30);

        let entries: Vec<_> = counter.entries().collect();
        assert_eq!(
            entries,
            vec![
                (date(2026, 3, 1), 10),
                (date(2026, 3, 2), 20),
                (date(2026, 3, 3), 30),
            ]
        );
    }
}
