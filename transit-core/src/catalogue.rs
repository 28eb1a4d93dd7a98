use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use geo::{Distance, Haversine};
use log::debug;

use crate::error::CatalogueError;
use crate::types::{Bus, BusId, Stop, StopId};

/// Справочник: единственный владелец остановок и маршрутов.
/// Маршруты ссылаются на остановки по [`StopId`].
#[derive(Debug, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_index: HashMap<String, BusId>,
    distances: HashMap<(StopId, StopId), u32>,
    buses_by_stop: Vec<BTreeSet<BusId>>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, stop: Stop) -> Result<StopId, CatalogueError> {
        let id = StopId(self.stops.len());
        match self.stop_index.entry(stop.name.clone()) {
            Entry::Vacant(e) => {
                e.insert(id);
            }
            Entry::Occupied(_) => return Err(CatalogueError::DuplicateStop(stop.name)),
        }

        debug!("stop added: {} ({}, {})", stop.name, stop.coordinates.lat, stop.coordinates.lng);
        self.stops.push(stop);
        self.buses_by_stop.push(BTreeSet::new());
        Ok(id)
    }

    pub fn add_bus(&mut self, bus: Bus) -> Result<BusId, CatalogueError> {
        if bus.stops.is_empty() {
            return Err(CatalogueError::EmptyRoute(bus.name));
        }
        // идентификаторы могли прийти из другого справочника
        if let Some(stranger) = bus.stops.iter().find(|s| s.0 >= self.stops.len()) {
            return Err(CatalogueError::UnknownStop(format!("#{}", stranger.0)));
        }

        let id = BusId(self.buses.len());
        match self.bus_index.entry(bus.name.clone()) {
            Entry::Vacant(e) => {
                e.insert(id);
            }
            Entry::Occupied(_) => return Err(CatalogueError::DuplicateBus(bus.name)),
        }

        for stop in &bus.stops {
            self.buses_by_stop[stop.0].insert(id);
        }
        debug!(
            "bus added: {} stops={} unique={} length={}",
            bus.name,
            bus.stops.len(),
            bus.unique_stops,
            bus.route_length
        );
        self.buses.push(bus);
        Ok(id)
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.0]
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| self.stop(id))
    }

    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_id(name).map(|id| self.bus(id))
    }

    /// Объявленное расстояние в одну сторону. Обратное направление
    /// задаётся отдельно.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), CatalogueError> {
        let from_id = self
            .stop_id(from)
            .ok_or_else(|| CatalogueError::UnknownStop(from.to_string()))?;
        let to_id = self
            .stop_id(to)
            .ok_or_else(|| CatalogueError::UnknownStop(to.to_string()))?;

        self.distances.insert((from_id, to_id), meters);
        Ok(())
    }

    pub fn actual_distance(&self, from: &str, to: &str) -> Option<u32> {
        self.actual_distance_between(self.stop_id(from)?, self.stop_id(to)?)
    }

    pub fn actual_distance_between(&self, from: StopId, to: StopId) -> Option<u32> {
        self.distances.get(&(from, to)).copied()
    }

    pub fn geographic_distance(&self, from: &str, to: &str) -> Option<f64> {
        Some(self.geographic_distance_between(self.stop_id(from)?, self.stop_id(to)?))
    }

    /// Расстояние по дуге большого круга, в метрах
    pub fn geographic_distance_between(&self, from: StopId, to: StopId) -> f64 {
        let from = self.stop(from).coordinates;
        let to = self.stop(to).coordinates;
        if from == to {
            return 0.0;
        }
        Haversine.distance(from.to_point(), to.to_point())
    }

    /// Все маршруты, по имени
    pub fn buses(&self) -> Vec<&Bus> {
        let mut buses: Vec<&Bus> = self.buses.iter().collect();
        buses.sort_by(|a, b| a.name.cmp(&b.name));
        buses
    }

    /// Все остановки, по имени
    pub fn stops(&self) -> Vec<&Stop> {
        let mut stops: Vec<&Stop> = self.stops.iter().collect();
        stops.sort_by(|a, b| a.name.cmp(&b.name));
        stops
    }

    pub fn buses_through_stop(&self, stop: StopId) -> impl Iterator<Item = &Bus> + '_ {
        self.buses_by_stop[stop.0].iter().map(|&id| self.bus(id))
    }
}
