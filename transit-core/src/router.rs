use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::{debug, info};
use ordered_float::OrderedFloat;
use pathfinding::prelude::dijkstra;
use serde::Serialize;

use crate::error::RouterError;

const METERS_PER_KM: f64 = 1000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Параметры маршрутизации
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingSettings {
    /// Ожидание автобуса на остановке, минуты
    pub bus_wait_time: f64,
    /// Скорость автобуса, км/ч
    pub bus_velocity: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait { stop_name: String, time: f64 },
    Bus { bus: String, span_count: usize, time: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInfo {
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unconfigured,
    Configured,
    VerticesRegistered,
    EdgesRegistered,
    GraphBuilt,
    Built,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Unconfigured => "unconfigured",
            Phase::Configured => "configured",
            Phase::VerticesRegistered => "vertices-registered",
            Phase::EdgesRegistered => "edges-registered",
            Phase::GraphBuilt => "graph-built",
            Phase::Built => "built",
        }
    }
}

#[derive(Debug, Clone)]
enum EdgeKind {
    Wait { stop: String },
    Bus { bus: String, span_count: usize },
}

#[derive(Debug, Clone)]
struct Edge {
    to: usize,
    weight: f64,
    kind: EdgeKind,
}

/// Маршрутизатор. У каждой остановки две вершины: прибытие (`2i`)
/// и посадка (`2i + 1`). Ожидание ведёт из прибытия в посадку,
/// поездка из посадки в прибытие другой остановки.
///
/// Порядок вызовов: `set_settings` -> `add_stop`* -> `add_*_edge`* ->
/// `build_graph` -> `build_router` -> `route_info`.
#[derive(Debug)]
pub struct TransportRouter {
    phase: Phase,
    settings: RoutingSettings,
    stops: HashMap<String, usize>,
    edges: Vec<Edge>,
    best_edges: HashMap<(usize, usize), usize>,
    adjacency: Vec<Vec<usize>>,
}

impl Default for TransportRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportRouter {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unconfigured,
            settings: RoutingSettings::default(),
            stops: HashMap::new(),
            edges: Vec::new(),
            best_edges: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    pub fn is_built(&self) -> bool {
        self.phase == Phase::Built
    }

    pub fn set_settings(&mut self, bus_wait_time: f64, bus_velocity: f64) -> Result<(), RouterError> {
        self.expect(&[Phase::Unconfigured, Phase::Configured], "unconfigured")?;
        if !(bus_velocity > 0.0) {
            return Err(RouterError::InvalidVelocity(bus_velocity));
        }
        // отрицательный вес ломает Дейкстру
        if !(bus_wait_time >= 0.0) {
            return Err(RouterError::InvalidWaitTime(bus_wait_time));
        }

        self.settings = RoutingSettings {
            bus_wait_time,
            bus_velocity,
        };
        self.phase = Phase::Configured;
        Ok(())
    }

    pub fn add_stop(&mut self, name: &str) -> Result<(), RouterError> {
        self.expect(&[Phase::Configured, Phase::VerticesRegistered], "configured")?;

        let next = self.stops.len();
        self.stops.entry(name.to_string()).or_insert(next);
        self.phase = Phase::VerticesRegistered;
        Ok(())
    }

    pub fn add_wait_edge(&mut self, stop: &str) -> Result<(), RouterError> {
        self.expect(
            &[Phase::VerticesRegistered, Phase::EdgesRegistered],
            "vertices-registered",
        )?;
        let index = self.vertex(stop)?;

        self.push_edge(
            arrival(index),
            Edge {
                to: boarding(index),
                weight: self.settings.bus_wait_time,
                kind: EdgeKind::Wait {
                    stop: stop.to_string(),
                },
            },
        );
        Ok(())
    }

    /// Поездка без пересадки через `span_count` перегонов длиной `distance` метров
    pub fn add_bus_edge(
        &mut self,
        from: &str,
        to: &str,
        bus: &str,
        span_count: usize,
        distance: u64,
    ) -> Result<(), RouterError> {
        self.expect(
            &[Phase::VerticesRegistered, Phase::EdgesRegistered],
            "vertices-registered",
        )?;
        let from = self.vertex(from)?;
        let to = self.vertex(to)?;

        let meters_per_minute = self.settings.bus_velocity * METERS_PER_KM / MINUTES_PER_HOUR;
        self.push_edge(
            boarding(from),
            Edge {
                to: arrival(to),
                weight: distance as f64 / meters_per_minute,
                kind: EdgeKind::Bus {
                    bus: bus.to_string(),
                    span_count,
                },
            },
        );
        Ok(())
    }

    /// Граф без вершин допустим: в пустой сети любой запрос маршрута
    /// даёт `Ok(None)`.
    pub fn build_graph(&mut self) -> Result<(), RouterError> {
        self.expect(
            &[
                Phase::Configured,
                Phase::VerticesRegistered,
                Phase::EdgesRegistered,
            ],
            "edges-registered",
        )?;

        // между парой вершин оставляем только самое быстрое ребро
        let mut adjacency = vec![Vec::new(); self.stops.len() * 2];
        for (&(from, _), &edge) in &self.best_edges {
            adjacency[from].push(edge);
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }
        self.adjacency = adjacency;

        debug!(
            "router graph: {} vertices, {} edges ({} kept)",
            self.adjacency.len(),
            self.edges.len(),
            self.best_edges.len()
        );
        self.phase = Phase::GraphBuilt;
        Ok(())
    }

    pub fn build_router(&mut self) -> Result<(), RouterError> {
        self.expect(&[Phase::GraphBuilt], "graph-built")?;
        info!(
            "router built: {} stops, wait={} min, velocity={} km/h",
            self.stops.len(),
            self.settings.bus_wait_time,
            self.settings.bus_velocity
        );
        self.phase = Phase::Built;
        Ok(())
    }

    /// Самый быстрый маршрут. `Ok(None)`, если пути нет или остановка
    /// неизвестна.
    pub fn route_info(&self, from: &str, to: &str) -> Result<Option<RouteInfo>, RouterError> {
        if self.phase != Phase::Built {
            return Err(RouterError::NotBuilt);
        }
        let (Some(&from), Some(&to)) = (self.stops.get(from), self.stops.get(to)) else {
            return Ok(None);
        };

        let target = arrival(to);
        let (edges, adjacency) = (&self.edges, &self.adjacency);
        let found = dijkstra(
            &arrival(from),
            |&v| {
                adjacency[v]
                    .iter()
                    .map(move |&e| (edges[e].to, OrderedFloat(edges[e].weight)))
            },
            |&v| v == target,
        );
        let Some((path, total)) = found else {
            return Ok(None);
        };

        let items = path
            .windows(2)
            .filter_map(|pair| self.best_edges.get(&(pair[0], pair[1])))
            .map(|&e| {
                let edge = &self.edges[e];
                match &edge.kind {
                    EdgeKind::Wait { stop } => RouteItem::Wait {
                        stop_name: stop.clone(),
                        time: edge.weight,
                    },
                    EdgeKind::Bus { bus, span_count } => RouteItem::Bus {
                        bus: bus.clone(),
                        span_count: *span_count,
                        time: edge.weight,
                    },
                }
            })
            .collect();

        Ok(Some(RouteInfo {
            total_time: total.into_inner(),
            items,
        }))
    }

    fn expect(&self, allowed: &[Phase], expected: &'static str) -> Result<(), RouterError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RouterError::WrongState {
                expected,
                actual: self.phase.name(),
            })
        }
    }

    fn vertex(&self, stop: &str) -> Result<usize, RouterError> {
        self.stops
            .get(stop)
            .copied()
            .ok_or_else(|| RouterError::UnknownVertex(stop.to_string()))
    }

    fn push_edge(&mut self, from: usize, edge: Edge) {
        let key = (from, edge.to);
        let id = self.edges.len();
        match self.best_edges.entry(key) {
            Entry::Vacant(e) => {
                e.insert(id);
            }
            Entry::Occupied(mut e) => {
                if edge.weight < self.edges[*e.get()].weight {
                    e.insert(id);
                }
            }
        }
        self.edges.push(edge);
        self.phase = Phase::EdgesRegistered;
    }
}

fn arrival(stop: usize) -> usize {
    stop * 2
}

fn boarding(stop: usize) -> usize {
    stop * 2 + 1
}
