use log::{debug, warn};

use crate::catalogue::TransportCatalogue;
use crate::distance::{self, RouteLengths};
use crate::error::{CatalogueError, RouterError, TransitError};
use crate::protocol::{self, BusDefinition, Request, StopDefinition};
use crate::renderer::{MapRenderer, RenderSettings, StopEntry};
use crate::route;
use crate::router::{RouteInfo, RoutingSettings, TransportRouter};
use crate::svg::Document;
use crate::types::{Bus, BusId, BusStat, Stop, StopId, StopStat};

/// Обработчик запросов: владеет справочником, отрисовщиком карты и
/// маршрутизатором и связывает их с разбором команд.
#[derive(Debug, Default)]
pub struct RequestHandler {
    catalogue: TransportCatalogue,
    renderer: MapRenderer,
    router: TransportRouter,
}

impl RequestHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_settings(settings: RenderSettings) -> Self {
        Self {
            renderer: MapRenderer::new(settings),
            ..Self::default()
        }
    }

    pub fn catalogue(&self) -> &TransportCatalogue {
        &self.catalogue
    }

    // --- определения ---

    /// "Stop A: 55.6, 37.2[, ...]". Расстояния из строки не регистрируются,
    /// для них есть [`Self::set_distances_from_query`].
    pub fn add_stop_from_query(&mut self, raw: &str) -> Result<StopId, TransitError> {
        let def = protocol::parse_stop_definition(raw)?;
        Ok(self.add_stop(Stop {
            name: def.name,
            coordinates: def.coordinates,
        })?)
    }

    pub fn add_stop(&mut self, stop: Stop) -> Result<StopId, CatalogueError> {
        self.catalogue.add_stop(stop)
    }

    /// "Bus X: A > B > A" или "Bus X: A - B"
    pub fn add_bus_from_query(&mut self, raw: &str) -> Result<BusId, TransitError> {
        let def = protocol::parse_bus_definition(raw)?;
        Ok(self.define_bus(&def)?)
    }

    pub fn add_bus(&mut self, bus: Bus) -> Result<BusId, CatalogueError> {
        self.catalogue.add_bus(bus)
    }

    /// Регистрирует "<N>m to <stop>" из определения остановки
    pub fn set_distances_from_query(&mut self, raw: &str) -> Result<(), TransitError> {
        let def = protocol::parse_stop_definition(raw)?;
        Ok(self.register_distances(&def)?)
    }

    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), CatalogueError> {
        self.catalogue.set_distance(from, to, meters)
    }

    /// Применяет определения из входного файла: сначала все остановки,
    /// затем расстояния, затем маршруты. Запросы пропускаются.
    pub fn apply_definitions(&mut self, requests: &[Request]) -> Result<(), TransitError> {
        let stops: Vec<&StopDefinition> = requests
            .iter()
            .filter_map(|r| match r {
                Request::DefineStop(def) => Some(def),
                _ => None,
            })
            .collect();

        for def in &stops {
            self.add_stop(Stop {
                name: def.name.clone(),
                coordinates: def.coordinates,
            })?;
        }
        for def in &stops {
            self.register_distances(def)?;
        }
        for request in requests {
            if let Request::DefineBus(def) = request {
                self.define_bus(def)?;
            }
        }

        debug!(
            "definitions applied: {} stops, {} buses",
            self.catalogue.stops().len(),
            self.catalogue.buses().len()
        );
        Ok(())
    }

    fn register_distances(&mut self, def: &StopDefinition) -> Result<(), CatalogueError> {
        for (to, meters) in &def.distances {
            self.catalogue.set_distance(&def.name, to, *meters)?;
        }
        Ok(())
    }

    fn define_bus(&mut self, def: &BusDefinition) -> Result<BusId, CatalogueError> {
        let plan = route::assemble(&def.stops, def.separator);
        let stops = route::resolve(&plan, &self.catalogue)?;
        let RouteLengths { geographic, actual } = distance::route_lengths(&stops, &self.catalogue);

        self.catalogue.add_bus(Bus {
            name: def.name.clone(),
            stops,
            unique_stops: plan.unique_stops,
            route_length: actual,
            geographic_length: geographic,
            is_roundtrip: def.is_roundtrip(),
        })
    }

    // --- поиск ---

    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.catalogue.find_bus(name)
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.catalogue.find_stop(name)
    }

    pub fn buses(&self) -> Vec<&Bus> {
        self.catalogue.buses()
    }

    pub fn stops(&self) -> Vec<&Stop> {
        self.catalogue.stops()
    }

    pub fn actual_distance(&self, from: &str, to: &str) -> Option<u32> {
        self.catalogue.actual_distance(from, to)
    }

    // --- статистика ---

    pub fn bus_stat(&self, name: &str) -> Option<BusStat> {
        let bus = self.catalogue.find_bus(name)?;
        Some(BusStat {
            name: bus.name.clone(),
            stop_count: bus.stops.len(),
            unique_stop_count: bus.unique_stops,
            route_length: bus.route_length,
            curvature: distance::curvature(bus.route_length, bus.geographic_length),
        })
    }

    pub fn stop_stat(&self, name: &str) -> Option<StopStat> {
        let id = self.catalogue.stop_id(name)?;
        Some(self.stop_stat_by_id(id))
    }

    fn stop_stat_by_id(&self, id: StopId) -> StopStat {
        StopStat {
            name: self.catalogue.stop(id).name.clone(),
            buses: self
                .catalogue
                .buses_through_stop(id)
                .map(|bus| bus.name.clone())
                .collect(),
        }
    }

    // --- карта ---

    pub fn set_render_settings(&mut self, settings: RenderSettings) {
        self.renderer.set_settings(settings);
    }

    pub fn render_map(&self) -> Document {
        let buses = self.catalogue.buses();
        let stops: Vec<StopEntry<'_>> = self
            .catalogue
            .stops()
            .into_iter()
            .filter_map(|stop| {
                let id = self.catalogue.stop_id(&stop.name)?;
                Some(StopEntry {
                    id,
                    stop,
                    stat: self.stop_stat_by_id(id),
                })
            })
            .collect();

        self.renderer.render(&buses, &stops)
    }

    // --- маршрутизация ---

    pub fn set_routing_settings(&mut self, bus_wait_time: f64, bus_velocity: f64) -> Result<(), RouterError> {
        self.router.set_settings(bus_wait_time, bus_velocity)
    }

    pub fn add_stop_to_router(&mut self, name: &str) -> Result<(), RouterError> {
        self.router.add_stop(name)
    }

    pub fn add_wait_edge_to_router(&mut self, stop: &str) -> Result<(), RouterError> {
        self.router.add_wait_edge(stop)
    }

    pub fn add_bus_edge_to_router(
        &mut self,
        from: &str,
        to: &str,
        bus: &str,
        span_count: usize,
        distance: u64,
    ) -> Result<(), RouterError> {
        self.router.add_bus_edge(from, to, bus, span_count, distance)
    }

    /// Строит граф и маршрутизатор из уже зарегистрированных вершин и рёбер
    pub fn build_router_graph(&mut self) -> Result<(), RouterError> {
        self.router.build_graph()?;
        self.router.build_router()
    }

    /// Полная сборка маршрутизатора по справочнику: каждая остановка,
    /// ожидание на каждой остановке и ребро для каждой пары остановок
    /// одного маршрута, идущих по ходу движения.
    pub fn build_router(&mut self, settings: RoutingSettings) -> Result<(), RouterError> {
        let mut router = TransportRouter::new();
        router.set_settings(settings.bus_wait_time, settings.bus_velocity)?;

        let stops = self.catalogue.stops();
        for stop in &stops {
            router.add_stop(&stop.name)?;
        }
        for stop in &stops {
            router.add_wait_edge(&stop.name)?;
        }

        for bus in self.catalogue.buses() {
            for i in 0..bus.stops.len() {
                let from = bus.stops[i];
                let mut meters: u64 = 0;
                for j in i + 1..bus.stops.len() {
                    let (prev, to) = (bus.stops[j - 1], bus.stops[j]);
                    match self.catalogue.actual_distance_between(prev, to) {
                        Some(d) => meters += u64::from(d),
                        None => warn!(
                            "bus {}: no distance {} -> {}, counted as 0",
                            bus.name,
                            self.catalogue.stop(prev).name,
                            self.catalogue.stop(to).name
                        ),
                    }
                    if from != to {
                        router.add_bus_edge(
                            &self.catalogue.stop(from).name,
                            &self.catalogue.stop(to).name,
                            &bus.name,
                            j - i,
                            meters,
                        )?;
                    }
                }
            }
        }

        router.build_graph()?;
        router.build_router()?;
        self.router = router;
        Ok(())
    }

    pub fn route_info(&self, from: &str, to: &str) -> Result<Option<RouteInfo>, RouterError> {
        self.router.route_info(from, to)
    }
}
