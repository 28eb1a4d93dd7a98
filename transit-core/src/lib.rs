//! # transit-core
//!
//! Модель транспортной сети: разбор текстовых команд, сборка маршрутов,
//! статистика, карта и поиск кратчайшего пути.
//!
//! Этот крейт содержит:
//!
//! - [`protocol`] — токенизация и разбор команд `Stop` / `Bus` / `Route` / `Map`
//! - [`route`] — развёртка маршрута в полный обход
//! - [`distance`] — длины маршрута по прямой и по дорогам
//! - [`catalogue`] — справочник остановок, маршрутов и расстояний
//! - [`renderer`], [`svg`] — отрисовка карты в SVG
//! - [`router`] — граф ожиданий и поездок, поиск быстрейшего пути
//! - [`handler`] — обработчик запросов поверх всего перечисленного
//! - [`requests`] — чтение файла команд
//! - [`error`] — типы ошибок
//!
//! ## Быстрый пример
//!
//! ```rust
//! use transit_core::RequestHandler;
//!
//! let mut h = RequestHandler::new();
//! h.add_stop_from_query("Stop A: 55.611087, 37.20829").unwrap();
//! h.add_stop_from_query("Stop B: 55.595884, 37.209755").unwrap();
//! h.set_distances_from_query("Stop A: 55.611087, 37.20829, 3900m to B").unwrap();
//! h.add_bus_from_query("Bus 750: A - B").unwrap();
//!
//! let stat = h.bus_stat("750").unwrap();
//! assert_eq!(stat.stop_count, 3);
//! assert_eq!(stat.unique_stop_count, 2);
//! assert_eq!(stat.route_length, 3900);
//! assert!(h.bus_stat("751").is_none());
//! ```
//!
//! ## Пример: разбор строки
//!
//! ```rust
//! use transit_core::protocol::{parse_request, Request};
//!
//! match parse_request("Bus 256: A > B > A").unwrap() {
//!     Request::DefineBus(def) => {
//!         assert!(def.is_roundtrip());
//!         assert_eq!(def.stops, vec!["A", "B", "A"]);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Дизайн
//!
//! Всё синхронно и однопоточно. Справочник владеет остановками и
//! маршрутами, маршруты ссылаются на остановки по индексу.

#![forbid(unsafe_code)]

/// Текстовые команды
pub mod protocol;

/// Чтение файла команд
pub mod requests;

/// Доменные типы
pub mod types;

/// Развёртка маршрутов
pub mod route;

/// Длины маршрутов
pub mod distance;

/// Справочник
pub mod catalogue;

/// SVG-документ
pub mod svg;

/// Отрисовка карты
pub mod renderer;

/// Маршрутизатор
pub mod router;

/// Обработчик запросов
pub mod handler;

/// Ошибки `transit-core`.
pub mod error;

// --- Re-exports (публичный фасад API) ---

pub use crate::catalogue::TransportCatalogue;
pub use crate::error::{CatalogueError, ParseError, RouterError, TransitError};
pub use crate::handler::RequestHandler;
pub use crate::protocol::Request;
pub use crate::renderer::{MapRenderer, RenderSettings};
pub use crate::router::{RouteInfo, RouteItem, RoutingSettings, TransportRouter};
pub use crate::types::{Bus, BusId, BusStat, Coordinates, Separator, Stop, StopId, StopStat};
