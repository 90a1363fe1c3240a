use chrono::{Months, NaiveDate, TimeDelta};
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;

use crate::metro::{LineId, StationId, ticket_counter::TicketCounter};

/// A node in a line's ordered sequence. Stations live in the [`Metro`]'s
/// arena; adjacency is expressed with [`StationId`] handles rather than
/// owning links.
///
/// [`Metro`]: crate::metro::Metro
#[derive(Debug, Clone)]
pub struct Station {
    pub name: String,
    pub previous: Option<StationId>,
    pub next: Option<StationId>,
    /// Travel time from the previous station; zero for a line's first
    /// station, which has none.
    pub transit_duration: TimeDelta,
    pub line: LineId,
    interchange_lines: Vec<String>,
    /// Per-station revenue, tracked separately from the network ledger.
    pub ticket_counter: TicketCounter,
    /// Ticket number -> expiry date.
    season_tickets: HashMap<String, NaiveDate>,
}

impl Station {
    pub fn new(
        name: String,
        previous: Option<StationId>,
        transit_duration: TimeDelta,
        line: LineId,
        interchange_lines: Vec<String>,
    ) -> Self {
        Self {
            name,
            previous,
            next: None,
            transit_duration,
            line,
            interchange_lines,
            ticket_counter: TicketCounter::new(),
            season_tickets: HashMap::new(),
        }
    }

    /// Tags are a set: adding a color that is already present is a no-op.
    #[allow(unused)]
    pub fn add_interchange_line(&mut self, color: &str) {
        if !self.interchange_lines.iter().any(|c| c == color) {
            self.interchange_lines.push(color.to_owned());
        }
    }

    pub fn has_interchange_to(&self, color: &str) -> bool {
        self.interchange_lines.iter().any(|c| c == color)
    }

    #[allow(unused)]
    pub fn interchange_lines(&self) -> &[String] {
        &self.interchange_lines
    }

    /// Registers a season ticket valid for one month from the sale date.
    pub fn sell_season_ticket(&mut self, ticket_number: String, sale_date: NaiveDate) {
        self.season_tickets.insert(ticket_number, next_month(sale_date));
    }

    /// Valid on the expiry date itself, invalid from the day after.
    pub fn is_season_ticket_valid(&self, ticket_number: &str, current_date: NaiveDate) -> bool {
        self.season_tickets
            .get(ticket_number)
            .is_some_and(|&expiry| current_date <= expiry)
    }

    /// Advances the ticket's expiry by one month if this station holds it.
    /// Returns whether it did.
    pub fn extend_season_ticket(&mut self, ticket_number: &str) -> bool {
        match self.season_tickets.get_mut(ticket_number) {
            Some(expiry) => {
                *expiry = next_month(*expiry);
                true
            }
            None => false,
        }
    }

}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.interchange_lines.is_empty() {
            write!(f, " [{}]", self.interchange_lines.iter().format(", "))?;
        }
        Ok(())
    }
}

/// Saturates at the calendar limit instead of overflowing.
fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn station() -> Station {
        Station::new(
            "Perm 1".to_owned(),
            None,
            TimeDelta::zero(),
            LineId::new(0),
            vec!["Blue".to_owned()],
        )
    }

    #[test]
    fn interchange_tags_are_a_set() {
        let mut s = station();
        s.add_interchange_line("Blue");
        s.add_interchange_line("Green");
        s.add_interchange_line("Green");
        assert_eq!(s.interchange_lines(), ["Blue", "Green"]);
    }

    #[test]
    fn season_ticket_valid_through_expiry_inclusive() {
        let mut s = station();
        s.sell_season_ticket("a0001".to_owned(), date(2026, 1, 15));

        assert!(s.is_season_ticket_valid("a0001", date(2026, 1, 15)));
        assert!(s.is_season_ticket_valid("a0001", date(2026, 2, 14)));
        assert!(s.is_season_ticket_valid("a0001", date(2026, 2, 15)));
        assert!(!s.is_season_ticket_valid("a0001", date(2026, 2, 16)));
        assert!(!s.is_season_ticket_valid("a9999", date(2026, 1, 15)));
    }

    #[test]
    fn extension_adds_one_month_to_expiry() {
        let mut s = station();
        s.sell_season_ticket("a0001".to_owned(), date(2026, 1, 15));

        assert!(s.extend_season_ticket("a0001"));
        assert!(s.is_season_ticket_valid("a0001", date(2026, 3, 15)));
        assert!(!s.is_season_ticket_valid("a0001", date(2026, 3, 16)));

        assert!(!s.extend_season_ticket("a9999"));
    }

    #[test]
    fn month_end_sale_clamps_expiry() {
        let mut s = station();
        s.sell_season_ticket("a0001".to_owned(), date(2026, 1, 31));
        assert!(s.is_season_ticket_valid("a0001", date(2026, 2, 28)));
        assert!(!s.is_season_ticket_valid("a0001", date(2026, 3, 1)));
    }
}
