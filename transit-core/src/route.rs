use std::collections::HashSet;

use crate::catalogue::TransportCatalogue;
use crate::error::CatalogueError;
use crate::types::{Separator, StopId};

/// Обход маршрута по именам, до привязки к справочнику
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan<'a> {
    pub traversal: Vec<&'a str>,
    pub unique_stops: usize,
}

/// Строит полный обход:
/// - `>`: остановки как есть
/// - `-`: прямой путь, затем обратный без последней остановки
///   (A - B - C -> A B C B A)
///
/// Уникальные остановки считаются по входному списку.
pub fn assemble<'a>(stops: &'a [String], separator: Separator) -> RoutePlan<'a> {
    let mut traversal: Vec<&str> = stops.iter().map(String::as_str).collect();
    if separator == Separator::Dash && stops.len() > 1 {
        traversal.reserve(stops.len() - 1);
        traversal.extend(stops[..stops.len() - 1].iter().rev().map(String::as_str));
    }

    let unique_stops = stops.iter().map(String::as_str).collect::<HashSet<_>>().len();

    RoutePlan {
        traversal,
        unique_stops,
    }
}

/// Переводит имена обхода в идентификаторы справочника
pub fn resolve(
    plan: &RoutePlan<'_>,
    catalogue: &TransportCatalogue,
) -> Result<Vec<StopId>, CatalogueError> {
    plan.traversal
        .iter()
        .map(|&name| {
            catalogue
                .stop_id(name)
                .ok_or_else(|| CatalogueError::UnknownStop(name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stop;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dash_route_walks_back_through_interior() {
        let stops = names(&["A", "B", "C"]);
        let plan = assemble(&stops, Separator::Dash);
        assert_eq!(plan.traversal, vec!["A", "B", "C", "B", "A"]);
        assert_eq!(plan.unique_stops, 3);
    }

    #[test]
    fn dash_route_length_is_two_n_minus_one() {
        for n in 1..8 {
            let stops: Vec<String> = (0..n).map(|i| format!("S{i}")).collect();
            let plan = assemble(&stops, Separator::Dash);
            assert_eq!(plan.traversal.len(), 2 * n - 1);
            assert_eq!(plan.unique_stops, n);
        }
    }

    #[test]
    fn circular_route_is_kept_as_is() {
        let stops = names(&["A", "B", "C", "A"]);
        let plan = assemble(&stops, Separator::CircularArrow);
        assert_eq!(plan.traversal, vec!["A", "B", "C", "A"]);
        assert_eq!(plan.unique_stops, 3);
    }

    #[test]
    fn unique_count_ignores_repeats_on_both_legs() {
        let stops = names(&["A", "B", "A", "C"]);
        let plan = assemble(&stops, Separator::Dash);
        assert_eq!(plan.traversal, vec!["A", "B", "A", "C", "A", "B", "A"]);
        assert_eq!(plan.unique_stops, 3);
    }

    #[test]
    fn resolve_maps_names_to_ids_and_fails_on_unknown() {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop(Stop::new("A", 0.0, 0.0)).unwrap();
        let b = catalogue.add_stop(Stop::new("B", 0.0, 1.0)).unwrap();

        let stops = names(&["A", "B"]);
        let plan = assemble(&stops, Separator::Dash);
        assert_eq!(resolve(&plan, &catalogue).unwrap(), vec![a, b, a]);

        let stops = names(&["A", "Nowhere"]);
        let plan = assemble(&stops, Separator::CircularArrow);
        assert_eq!(
            resolve(&plan, &catalogue).unwrap_err(),
            CatalogueError::UnknownStop("Nowhere".to_string())
        );
    }
}
