use crate::catalogue::TransportCatalogue;
use crate::types::StopId;

/// Длины маршрута: по прямой (метры) и объявленная (метры)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteLengths {
    pub geographic: f64,
    pub actual: u64,
}

impl RouteLengths {
    /// Извилистость. Для нулевой географической длины считаем 1.0
    pub fn curvature(&self) -> f64 {
        curvature(self.actual, self.geographic)
    }
}

pub(crate) fn curvature(actual: u64, geographic: f64) -> f64 {
    if geographic > 0.0 {
        actual as f64 / geographic
    } else {
        1.0
    }
}

/// Суммирует длины по соседним парам обхода.
/// Отсутствующее объявленное расстояние даёт 0. Сумма копится в `u64`:
/// отдельный перегон ограничен `u32`, их сумма нет.
pub fn route_lengths(traversal: &[StopId], catalogue: &TransportCatalogue) -> RouteLengths {
    traversal
        .windows(2)
        .fold(RouteLengths::default(), |mut acc, pair| {
            let (from, to) = (pair[0], pair[1]);
            acc.geographic += catalogue.geographic_distance_between(from, to);
            acc.actual += u64::from(catalogue.actual_distance_between(from, to).unwrap_or(0));
            acc
        })
}
