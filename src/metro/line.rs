use crate::metro::StationId;

/// One metro route: a color identity plus station handles in travel order.
#[derive(Debug, Clone)]
pub struct Line {
    pub color: String,
    stations: Vec<StationId>,
}

impl Line {
    pub fn new(color: String) -> Self {
        Self {
            color,
            stations: Vec::new(),
        }
    }

    pub fn add_station(&mut self, station: StationId) {
        self.stations.push(station);
    }

    pub fn last_station(&self) -> Option<StationId> {
        self.stations.last().copied()
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
