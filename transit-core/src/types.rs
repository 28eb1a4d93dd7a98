use std::collections::BTreeSet;

use geo::Point;

/// Индекс остановки в справочнике
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub(crate) usize);

/// Индекс маршрута в справочнике
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusId(pub(crate) usize);

impl StopId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl BusId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Географические координаты в градусах
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// geo хранит точки как (x = долгота, y = широта)
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Stop {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::new(lat, lng),
        }
    }
}

/// Маршрут. `stops` хранит полный обход, для маятникового маршрута
/// включая обратный путь.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub name: String,
    pub stops: Vec<StopId>,
    pub unique_stops: usize,
    pub route_length: u64,
    pub geographic_length: f64,
    pub is_roundtrip: bool,
}

impl Bus {
    /// Конечные остановки. У кольцевого маршрута она одна.
    pub fn terminals(&self) -> Vec<StopId> {
        let Some(&first) = self.stops.first() else {
            return Vec::new();
        };
        if self.is_roundtrip {
            return vec![first];
        }

        // середина развёрнутого обхода = последняя остановка прямого пути
        let last = self.stops[self.stops.len() / 2];
        if last == first {
            vec![first]
        } else {
            vec![first, last]
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusStat {
    pub name: String,
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: u64,
    pub curvature: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopStat {
    pub name: String,
    pub buses: BTreeSet<String>,
}

/// Разделитель, найденный при разборе команды
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `,` — список полей остановки
    List,
    /// `>` — кольцевой маршрут, обход уже замкнут
    CircularArrow,
    /// `-` — маятниковый маршрут, обратный путь достраивается
    Dash,
}
