use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum TransitError {
    /// Ошибки разбора команд
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Ошибки справочника
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Ошибки маршрутизатора
    #[error(transparent)]
    Router(#[from] RouterError),
}

/// Ошибки разбора текстовых команд
#[derive(Debug, Error)]
pub enum ParseError {
    /// пустая команда
    #[error("empty query")]
    EmptyQuery,

    /// Неизвестный вид команды (не `Stop` и не `Bus`)
    #[error("unknown query kind: {0}")]
    UnknownKind(String),

    /// Отсутствует имя сущности
    #[error("missing entity name")]
    MissingName,

    /// После двоеточия ничего нет
    #[error("missing definition body for {0}")]
    MissingPayload(String),

    /// Пустой элемент списка (`A > > B`, `55.1, , 37.2`)
    #[error("empty token in {0}")]
    EmptyToken(String),

    /// Не хватает координат
    #[error("stop {0} must have latitude and longitude")]
    MissingCoordinates(String),

    /// Координата не парсится как число
    #[error("invalid coordinate {text:?}")]
    InvalidCoordinate {
        text: String,
        #[source]
        source: ParseFloatError,
    },

    /// Клауза расстояния не похожа на `<N>m to <stop>`
    #[error("malformed distance clause {0:?}")]
    MalformedDistance(String),

    /// У расстояния нет суффикса единиц измерения
    #[error("distance {0:?} must end with 'm'")]
    MissingUnit(String),

    /// Расстояние не парсится как целое число
    #[error("invalid distance {text:?}")]
    InvalidDistance {
        text: String,
        #[source]
        source: ParseIntError,
    },
}

/// Ошибки справочника
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogueError {
    /// Маршрут ссылается на неизвестную остановку
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// Остановка с таким именем уже есть
    #[error("stop already exists: {0}")]
    DuplicateStop(String),

    /// Маршрут с таким именем уже есть
    #[error("bus already exists: {0}")]
    DuplicateBus(String),

    /// Маршрут без остановок
    #[error("bus {0} has no stops")]
    EmptyRoute(String),
}

/// Ошибки маршрутизатора: нарушение порядка вызовов и неверные параметры
#[derive(Debug, Error, PartialEq)]
pub enum RouterError {
    /// Вызов недопустим в текущем состоянии
    #[error("router is {actual}, expected {expected}")]
    WrongState {
        expected: &'static str,
        actual: &'static str,
    },

    /// Ребро ссылается на незарегистрированную остановку
    #[error("stop is not registered in router: {0}")]
    UnknownVertex(String),

    /// Запрос маршрута до построения графа
    #[error("router is not built")]
    NotBuilt,

    /// Некорректная скорость
    #[error("bus velocity must be positive, got {0}")]
    InvalidVelocity(f64),

    /// Отрицательное или неопределённое время ожидания
    #[error("bus wait time must not be negative, got {0}")]
    InvalidWaitTime(f64),
}
