use chrono::{NaiveDate, TimeDelta};
use itertools::Itertools;
use std::fmt;
use tracing::debug;

pub mod error;
pub mod line;
pub mod station;
pub mod ticket_counter;

use crate::metro::{
    error::MetroError, line::Line, station::Station, ticket_counter::TicketCounter,
};

/// Flat fee charged on every single ticket.
pub const BASE_FARE: i64 = 20;
/// Charged per station traveled on top of the base fare.
pub const FARE_PER_STATION: i64 = 5;
/// Credited to the network ledger on every season-ticket extension.
pub const SEASON_TICKET_EXTENSION_FEE: i64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineId(usize);

impl LineId {
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }
}

/// Handle into the network's station arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StationId(usize);

impl StationId {
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }
}

/// The network aggregate: owns every line and station, the network-wide
/// income ledger, and the season-ticket number sequence.
///
/// Stations live in one arena and link to their neighbours through
/// [`StationId`] handles; each [`Line`] keeps its handles in travel order.
pub struct Metro {
    city: String,
    lines: Vec<Line>,
    stations: Vec<Station>,
    ledger: TicketCounter,
    ticket_seq: u32,
}

impl Metro {
    pub fn new(city: String) -> Self {
        Self {
            city,
            lines: Vec::new(),
            stations: Vec::new(),
            ledger: TicketCounter::new(),
            ticket_seq: 0,
        }
    }

    #[allow(unused)]
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    #[allow(unused)]
    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    // ---- construction ----

    pub fn create_line(&mut self, color: &str) -> Result<LineId, MetroError> {
        if self.lines.iter().any(|line| line.color == color) {
            return Err(MetroError::DuplicateLine(color.to_owned()));
        }
        let id = LineId::new(self.lines.len());
        self.lines.push(Line::new(color.to_owned()));
        debug!(color, "created line");
        Ok(id)
    }

    pub fn create_first_station(
        &mut self,
        color: &str,
        name: &str,
        interchange_lines: &[&str],
    ) -> Result<StationId, MetroError> {
        let line_id = self.line_by_color(color)?;
        if self.stations.iter().any(|s| s.name == name) {
            return Err(MetroError::DuplicateStation(name.to_owned()));
        }
        if !self.lines[line_id.0].is_empty() {
            return Err(MetroError::LineNotEmpty(color.to_owned()));
        }

        let id = StationId::new(self.stations.len());
        self.stations.push(Station::new(
            name.to_owned(),
            None,
            TimeDelta::zero(),
            line_id,
            interchange_lines.iter().map(|&c| c.to_owned()).collect(),
        ));
        self.lines[line_id.0].add_station(id);
        debug!(color, name, "created first station");
        Ok(id)
    }

    /// Appends a station at the current end of a line, linking it to the
    /// previous terminus in both directions. Validation completes before
    /// anything is mutated.
    pub fn create_terminal_station(
        &mut self,
        color: &str,
        name: &str,
        transit_duration: TimeDelta,
        interchange_lines: &[&str],
    ) -> Result<StationId, MetroError> {
        let line_id = self.line_by_color(color)?;
        let previous = self.lines[line_id.0]
            .last_station()
            .ok_or_else(|| MetroError::NoPreviousStation(color.to_owned()))?;
        // Append-only construction never leaves a terminus with a successor,
        // but the check is kept as a guard on the linking invariant.
        if self.stations[previous.0].next.is_some() {
            return Err(MetroError::StationAlreadyHasNext(
                self.stations[previous.0].name.clone(),
            ));
        }
        if transit_duration <= TimeDelta::zero() {
            return Err(MetroError::InvalidDuration);
        }
        if self.stations.iter().any(|s| s.name == name) {
            return Err(MetroError::DuplicateStation(name.to_owned()));
        }

        let id = StationId::new(self.stations.len());
        self.stations.push(Station::new(
            name.to_owned(),
            Some(previous),
            transit_duration,
            line_id,
            interchange_lines.iter().map(|&c| c.to_owned()).collect(),
        ));
        self.stations[previous.0].next = Some(id);
        self.lines[line_id.0].add_station(id);
        debug!(color, name, "created terminal station");
        Ok(id)
    }

    // ---- lookups ----

    fn line_by_color(&self, color: &str) -> Result<LineId, MetroError> {
        self.lines
            .iter()
            .position(|line| line.color == color)
            .map(LineId)
            .ok_or_else(|| MetroError::LineNotFound(color.to_owned()))
    }

    /// Station names are unique network-wide (enforced on creation), so a
    /// global scan resolves unambiguously.
    pub fn find_station_by_name(&self, name: &str) -> Option<StationId> {
        self.lines
            .iter()
            .flat_map(|line| line.stations())
            .copied()
            .find(|&id| self.stations[id.0].name == name)
    }

    pub fn station_exists(&self, name: &str) -> bool {
        self.find_station_by_name(name).is_some()
    }

    fn find_station(&self, name: &str) -> Result<StationId, MetroError> {
        self.find_station_by_name(name)
            .ok_or_else(|| MetroError::StationNotFound(name.to_owned()))
    }

    /// First station of line `from_color`, in travel order, tagged as an
    /// interchange to `to_color`. Relies on the tags supplied at station
    /// creation; it does not discover adjacency.
    pub fn find_interchange_station(
        &self,
        from_color: &str,
        to_color: &str,
    ) -> Option<StationId> {
        self.lines
            .iter()
            .find(|line| line.color == from_color)
            .and_then(|line| {
                line.stations()
                    .iter()
                    .copied()
                    .find(|&id| self.stations[id.0].has_interchange_to(to_color))
            })
    }

    // ---- distance computation ----

    fn forward_hops(&self, start: StationId, end: StationId) -> Option<i64> {
        let mut current = start;
        let mut hops = 0;
        while current != end {
            current = self.stations[current.0].next?;
            hops += 1;
        }
        Some(hops)
    }

    fn reverse_hops(&self, start: StationId, end: StationId) -> Option<i64> {
        let mut current = start;
        let mut hops = 0;
        while current != end {
            current = self.stations[current.0].previous?;
            hops += 1;
        }
        Some(hops)
    }

    /// Hop count between two stations of the same line, whichever direction
    /// reaches the end.
    fn hops_on_line(&self, start: StationId, end: StationId) -> Option<i64> {
        self.forward_hops(start, end)
            .or_else(|| self.reverse_hops(start, end))
    }

    fn count_across_lines(
        &self,
        start: StationId,
        end: StationId,
    ) -> Result<i64, MetroError> {
        let from_color = &self.lines[self.stations[start.0].line.0].color;
        let to_color = &self.lines[self.stations[end.0].line.0].color;

        let no_interchange = || MetroError::NoInterchange {
            from: from_color.clone(),
            to: to_color.clone(),
        };
        // One anchor per line: where travel leaves the start line and where
        // it joins the end line.
        let exit = self
            .find_interchange_station(from_color, to_color)
            .ok_or_else(no_interchange)?;
        let entry = self
            .find_interchange_station(to_color, from_color)
            .ok_or_else(no_interchange)?;

        let to_exit = self
            .hops_on_line(start, exit)
            .ok_or_else(|| self.no_route(start, exit))?;
        let from_entry = self
            .hops_on_line(entry, end)
            .ok_or_else(|| self.no_route(entry, end))?;
        Ok(to_exit + from_entry)
    }

    fn no_route(&self, start: StationId, end: StationId) -> MetroError {
        MetroError::NoRoute {
            from: self.stations[start.0].name.clone(),
            to: self.stations[end.0].name.clone(),
        }
    }

    /// Number of stations traveled between two named stations: the hop
    /// count, not counting the start.
    pub fn count_stations(&self, start_name: &str, end_name: &str) -> Result<i64, MetroError> {
        let start = self.find_station(start_name)?;
        let end = self.find_station(end_name)?;
        if start == end {
            return Err(MetroError::SameStation(start_name.to_owned()));
        }

        if self.stations[start.0].line == self.stations[end.0].line {
            self.hops_on_line(start, end)
                .ok_or_else(|| self.no_route(start, end))
        } else {
            self.count_across_lines(start, end)
        }
    }

    // ---- fares & ledger ----

    /// Sells a single ticket and records the price against the sale date in
    /// the start station's own counter, not the network ledger. Returns the
    /// price.
    pub fn sell_ticket(
        &mut self,
        date: NaiveDate,
        start_name: &str,
        end_name: &str,
    ) -> Result<i64, MetroError> {
        let traveled = self.count_stations(start_name, end_name)?;
        let price = traveled * FARE_PER_STATION + BASE_FARE;

        let start = self.find_station(start_name)?;
        self.stations[start.0].ticket_counter.add_income(date, price);
        debug!(start_name, end_name, price, "sold ticket");
        Ok(price)
    }

    /// Merges `amount` into the network ledger's running total for `date`.
    pub fn add_income(&mut self, date: NaiveDate, amount: i64) {
        self.ledger.add_income(date, amount);
    }

    #[allow(unused)]
    pub fn income_on(&self, date: NaiveDate) -> i64 {
        self.ledger.income_on(date)
    }

    /// Network ledger entries in ascending date order.
    pub fn income_report(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.ledger.entries()
    }

    // ---- season tickets ----

    /// Issues a season ticket at the named station, valid for one month from
    /// the sale date. Ticket numbers come from a single monotonic sequence
    /// owned by the network, so they are unique for its lifetime.
    pub fn sell_season_ticket(
        &mut self,
        station_name: &str,
        sale_date: NaiveDate,
    ) -> Result<String, MetroError> {
        let id = self.find_station(station_name)?;
        self.ticket_seq += 1;
        let number = format!("a{:04}", self.ticket_seq);
        self.stations[id.0].sell_season_ticket(number.clone(), sale_date);
        debug!(station_name, %number, "sold season ticket");
        Ok(number)
    }

    /// True if any station in the network holds the ticket with an expiry on
    /// or after `current_date`.
    pub fn is_season_ticket_valid(&self, ticket_number: &str, current_date: NaiveDate) -> bool {
        self.stations
            .iter()
            .any(|s| s.is_season_ticket_valid(ticket_number, current_date))
    }

    /// Extends the ticket by one month at every station holding it, crediting
    /// the network ledger with the extension fee once per match. Numbers are
    /// unique in correct operation, so at most one station matches.
    pub fn extend_season_ticket(&mut self, ticket_number: &str, purchase_date: NaiveDate) {
        let matched = self
            .stations
            .iter_mut()
            .map(|station| station.extend_season_ticket(ticket_number))
            .filter(|&extended| extended)
            .count();
        for _ in 0..matched {
            self.add_income(purchase_date, SEASON_TICKET_EXTENSION_FEE);
        }
        if matched > 0 {
            debug!(ticket_number, matched, "extended season ticket");
        }
    }
}

impl fmt::Display for Metro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metro {}", self.city)?;
        for line in &self.lines {
            writeln!(
                f,
                "  {} line: {}",
                line.color,
                line.stations()
                    .iter()
                    .map(|&id| &self.stations[id.0])
                    .format(" - ")
            )?;
        }
        Ok(())
    }
}
