use std::collections::HashMap;

use serde::Deserialize;

use crate::svg::{Circle, Document, Object, Point, Polyline, Text};
use crate::types::{Bus, Coordinates, Stop, StopId, StopStat};

const EPSILON: f64 = 1e-6;

/// Настройки отрисовки карты
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: [f64; 2],
    pub stop_label_font_size: u32,
    pub stop_label_offset: [f64; 2],
    pub underlayer_color: String,
    pub underlayer_width: f64,
    pub color_palette: Vec<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1200.0,
            padding: 50.0,
            line_width: 14.0,
            stop_radius: 5.0,
            bus_label_font_size: 20,
            bus_label_offset: [7.0, 15.0],
            stop_label_font_size: 20,
            stop_label_offset: [7.0, -3.0],
            underlayer_color: "rgba(255,255,255,0.85)".to_string(),
            underlayer_width: 3.0,
            color_palette: vec![
                "green".to_string(),
                "rgb(255,160,0)".to_string(),
                "red".to_string(),
            ],
        }
    }
}

/// Остановка вместе со статистикой, как её отдаёт обработчик запросов
#[derive(Debug, Clone)]
pub struct StopEntry<'a> {
    pub id: StopId,
    pub stop: &'a Stop,
    pub stat: StopStat,
}

/// Проецирует координаты на холст, вписывая все точки с отступом
#[derive(Debug, Clone, Copy)]
struct SphereProjector {
    padding: f64,
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    fn new(points: &[Coordinates], width: f64, height: f64, padding: f64) -> Self {
        let mut projector = Self {
            padding,
            min_lng: 0.0,
            max_lat: 0.0,
            zoom: 0.0,
        };
        let Some(first) = points.first() else {
            return projector;
        };

        let (mut min_lng, mut max_lng) = (first.lng, first.lng);
        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        for p in points {
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
        }
        projector.min_lng = min_lng;
        projector.max_lat = max_lat;

        let width_zoom = (max_lng - min_lng > EPSILON).then(|| (width - 2.0 * padding) / (max_lng - min_lng));
        let height_zoom = (max_lat - min_lat > EPSILON).then(|| (height - 2.0 * padding) / (max_lat - min_lat));
        projector.zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None) => w,
            (None, Some(h)) => h,
            (None, None) => 0.0,
        };
        projector
    }

    fn project(&self, c: Coordinates) -> Point {
        Point::new(
            (c.lng - self.min_lng) * self.zoom + self.padding,
            (self.max_lat - c.lat) * self.zoom + self.padding,
        )
    }
}

#[derive(Debug, Default)]
pub struct MapRenderer {
    settings: RenderSettings,
}

impl MapRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Слои: линии маршрутов, названия маршрутов, точки остановок,
    /// названия остановок. Остановки без маршрутов не рисуются.
    pub fn render(&self, buses: &[&Bus], stops: &[StopEntry<'_>]) -> Document {
        let mut served: Vec<&StopEntry<'_>> = stops.iter().filter(|e| !e.stat.buses.is_empty()).collect();
        served.sort_by(|a, b| a.stop.name.cmp(&b.stop.name));

        let mut buses: Vec<&Bus> = buses.iter().copied().filter(|b| !b.stops.is_empty()).collect();
        buses.sort_by(|a, b| a.name.cmp(&b.name));

        let coordinates: HashMap<StopId, Coordinates> =
            stops.iter().map(|e| (e.id, e.stop.coordinates)).collect();
        let used: Vec<Coordinates> = served.iter().map(|e| e.stop.coordinates).collect();
        let s = &self.settings;
        let projector = SphereProjector::new(&used, s.width, s.height, s.padding);
        let project = |id: &StopId| coordinates.get(id).map(|&c| projector.project(c));

        let mut doc = Document::new();

        for (i, bus) in buses.iter().enumerate() {
            doc.add(Object::Polyline(Polyline {
                points: bus.stops.iter().filter_map(project).collect(),
                stroke: self.color(i),
                stroke_width: s.line_width,
            }));
        }

        for (i, bus) in buses.iter().enumerate() {
            for terminal in bus.terminals() {
                let Some(position) = project(&terminal) else {
                    continue;
                };
                doc.add(Object::Text(Text {
                    position,
                    offset: Point::new(s.bus_label_offset[0], s.bus_label_offset[1]),
                    font_size: s.bus_label_font_size,
                    bold: true,
                    content: bus.name.clone(),
                    fill: self.color(i),
                    underlayer: Some((s.underlayer_color.clone(), s.underlayer_width)),
                }));
            }
        }

        for entry in &served {
            doc.add(Object::Circle(Circle {
                center: projector.project(entry.stop.coordinates),
                radius: s.stop_radius,
                fill: "white".to_string(),
            }));
        }

        for entry in &served {
            doc.add(Object::Text(Text {
                position: projector.project(entry.stop.coordinates),
                offset: Point::new(s.stop_label_offset[0], s.stop_label_offset[1]),
                font_size: s.stop_label_font_size,
                bold: false,
                content: entry.stop.name.clone(),
                fill: "black".to_string(),
                underlayer: Some((s.underlayer_color.clone(), s.underlayer_width)),
            }));
        }

        doc
    }

    fn color(&self, index: usize) -> String {
        let palette = &self.settings.color_palette;
        if palette.is_empty() {
            return "black".to_string();
        }
        palette[index % palette.len()].clone()
    }
}
