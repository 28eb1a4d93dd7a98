use log::debug;
use serde_json::{Value, json};
use transit_core::protocol::Request;
use transit_core::{RequestHandler, TransitError};

const NOT_FOUND: &str = "not found";

/// Отвечает на запросы по порядку. `request_id` — номер запроса
/// среди строк, не являющихся определениями, начиная с 1.
pub(crate) fn answer_all(handler: &RequestHandler, requests: &[Request]) -> Result<Vec<Value>, TransitError> {
    requests
        .iter()
        .filter(|r| !r.is_definition())
        .enumerate()
        .map(|(i, r)| answer(handler, i + 1, r))
        .collect()
}

fn answer(handler: &RequestHandler, request_id: usize, request: &Request) -> Result<Value, TransitError> {
    debug!("request {request_id}: {request:?}");

    let body = match request {
        Request::BusStat { name } => handler.bus_stat(name).map(|s| {
            json!({
                "curvature": s.curvature,
                "route_length": s.route_length,
                "stop_count": s.stop_count,
                "unique_stop_count": s.unique_stop_count,
            })
        }),
        Request::StopStat { name } => handler.stop_stat(name).map(|s| json!({ "buses": s.buses })),
        Request::Route { from, to } => handler.route_info(from, to)?.map(|info| {
            json!({
                "total_time": info.total_time,
                "items": info.items,
            })
        }),
        Request::Map => Some(json!({ "map": handler.render_map().render() })),
        Request::DefineStop(_) | Request::DefineBus(_) => None,
    };

    let mut response = body.unwrap_or_else(|| json!({ "error_message": NOT_FOUND }));
    if let Value::Object(map) = &mut response {
        map.insert("request_id".to_string(), json!(request_id));
    }
    Ok(response)
}
