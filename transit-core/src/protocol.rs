use crate::error::ParseError;
use crate::types::{Coordinates, Separator};

/// Вид определяющей команды, по первому слову строки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Stop,
    Bus,
}

impl QueryKind {
    fn from_keyword(word: &str) -> Result<Self, ParseError> {
        match word {
            "Stop" => Ok(Self::Stop),
            "Bus" => Ok(Self::Bus),
            other => Err(ParseError::UnknownKind(other.to_string())),
        }
    }
}

/// Результат токенизации одной строки.
///
/// `separator == None` означает, что двоеточия не было и строка
/// содержит только имя (запрос статистики).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub kind: QueryKind,
    pub name: String,
    pub payload: Vec<String>,
    pub separator: Option<Separator>,
}

/// Разбивает строку вида
/// "Stop A: 55.6, 37.2, 100m to B" или "Bus 750: A - B - C"
/// на имя и слова тела.
pub fn tokenize(line: &str) -> Result<Tokens, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyQuery);
    }

    let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let kind = QueryKind::from_keyword(keyword)?;

    let (name, body) = match rest.split_once(':') {
        Some((name, body)) => (name.trim(), Some(body)),
        None => (rest.trim(), None),
    };
    if name.is_empty() {
        return Err(ParseError::MissingName);
    }
    let name = name.to_string();

    let Some(body) = body else {
        return Ok(Tokens {
            kind,
            name,
            payload: Vec::new(),
            separator: None,
        });
    };
    if body.trim().is_empty() {
        return Err(ParseError::MissingPayload(name));
    }

    let (payload, separator) = match kind {
        QueryKind::Stop => (split_words(body, ',', &name)?, Separator::List),
        QueryKind::Bus => {
            // '>' решает первым: в кольцевом маршруте имена могут содержать '-'
            let separator = if body.contains('>') {
                Separator::CircularArrow
            } else if body.contains('-') {
                Separator::Dash
            } else {
                Separator::CircularArrow
            };
            let ch = if separator == Separator::Dash { '-' } else { '>' };
            (split_words(body, ch, &name)?, separator)
        }
    };

    Ok(Tokens {
        kind,
        name,
        payload,
        separator: Some(separator),
    })
}

fn split_words(body: &str, separator: char, name: &str) -> Result<Vec<String>, ParseError> {
    body.split(separator)
        .map(str::trim)
        .map(|w| {
            if w.is_empty() {
                Err(ParseError::EmptyToken(name.to_string()))
            } else {
                Ok(w.to_string())
            }
        })
        .collect()
}

/// Определение остановки вместе с объявленными расстояниями
#[derive(Debug, Clone, PartialEq)]
pub struct StopDefinition {
    pub name: String,
    pub coordinates: Coordinates,
    pub distances: Vec<(String, u32)>,
}

/// Определение маршрута: имена остановок до развёртки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusDefinition {
    pub name: String,
    pub stops: Vec<String>,
    pub separator: Separator,
}

impl BusDefinition {
    pub fn is_roundtrip(&self) -> bool {
        self.separator != Separator::Dash
    }
}

/// Одна строка входного файла
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    DefineStop(StopDefinition),
    DefineBus(BusDefinition),
    BusStat { name: String },
    StopStat { name: String },
    Route { from: String, to: String },
    Map,
}

impl Request {
    pub fn is_definition(&self) -> bool {
        matches!(self, Self::DefineStop(_) | Self::DefineBus(_))
    }
}

/// Парсит строку входного файла:
/// - "Stop A: 55.6, 37.2, 100m to B"
/// - "Bus 1: A > B > A"
/// - "Bus 1", "Stop A"
/// - "Route A > B"
/// - "Map"
pub fn parse_request(line: &str) -> Result<Request, ParseError> {
    let line = line.trim();
    if line == "Map" {
        return Ok(Request::Map);
    }
    if let Some(rest) = line.strip_prefix("Route ") {
        let (from, to) = rest
            .split_once('>')
            .ok_or_else(|| ParseError::MissingPayload("Route".to_string()))?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(ParseError::EmptyToken("Route".to_string()));
        }
        return Ok(Request::Route {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let tokens = tokenize(line)?;
    match (tokens.kind, tokens.separator) {
        (QueryKind::Stop, None) => Ok(Request::StopStat { name: tokens.name }),
        (QueryKind::Bus, None) => Ok(Request::BusStat { name: tokens.name }),
        (QueryKind::Stop, Some(_)) => stop_definition(tokens).map(Request::DefineStop),
        (QueryKind::Bus, Some(_)) => bus_definition(tokens).map(Request::DefineBus),
    }
}

/// Парсит "Stop <name>: <lat>, <lng>[, <N>m to <stop>]*"
pub fn parse_stop_definition(line: &str) -> Result<StopDefinition, ParseError> {
    let tokens = tokenize(line)?;
    match tokens.kind {
        QueryKind::Stop => stop_definition(tokens),
        QueryKind::Bus => Err(ParseError::UnknownKind("Bus".to_string())),
    }
}

/// Парсит "Bus <name>: A > B > A" или "Bus <name>: A - B"
pub fn parse_bus_definition(line: &str) -> Result<BusDefinition, ParseError> {
    let tokens = tokenize(line)?;
    match tokens.kind {
        QueryKind::Bus => bus_definition(tokens),
        QueryKind::Stop => Err(ParseError::UnknownKind("Stop".to_string())),
    }
}

fn stop_definition(tokens: Tokens) -> Result<StopDefinition, ParseError> {
    let Tokens { name, payload, .. } = tokens;
    if payload.len() < 2 {
        return Err(ParseError::MissingCoordinates(name));
    }

    let lat = parse_coordinate(&payload[0])?;
    let lng = parse_coordinate(&payload[1])?;
    let distances = payload[2..]
        .iter()
        .map(|clause| parse_distance_clause(clause))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StopDefinition {
        name,
        coordinates: Coordinates::new(lat, lng),
        distances,
    })
}

fn bus_definition(tokens: Tokens) -> Result<BusDefinition, ParseError> {
    let Tokens {
        name,
        payload,
        separator,
        ..
    } = tokens;
    let separator = separator.ok_or_else(|| ParseError::MissingPayload(name.clone()))?;

    Ok(BusDefinition {
        name,
        stops: payload,
        separator,
    })
}

fn parse_coordinate(text: &str) -> Result<f64, ParseError> {
    text.parse().map_err(|source| ParseError::InvalidCoordinate {
        text: text.to_string(),
        source,
    })
}

/// "3900m to Marushkino" -> ("Marushkino", 3900)
pub fn parse_distance_clause(clause: &str) -> Result<(String, u32), ParseError> {
    let malformed = || ParseError::MalformedDistance(clause.to_string());

    let (raw_distance, rest) = clause.trim().split_once(' ').ok_or_else(malformed)?;
    let stop = rest.trim_start().strip_prefix("to ").ok_or_else(malformed)?.trim();
    if stop.is_empty() {
        return Err(malformed());
    }

    let digits = raw_distance
        .strip_suffix('m')
        .ok_or_else(|| ParseError::MissingUnit(raw_distance.to_string()))?;
    let distance = digits.parse().map_err(|source| ParseError::InvalidDistance {
        text: raw_distance.to_string(),
        source,
    })?;

    Ok((stop.to_string(), distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_stop_definition() {
        let t = tokenize("Stop Tolstopaltsevo: 55.611087, 37.20829, 3900m to Marushkino").unwrap();
        assert_eq!(t.kind, QueryKind::Stop);
        assert_eq!(t.name, "Tolstopaltsevo");
        assert_eq!(t.payload, vec!["55.611087", "37.20829", "3900m to Marushkino"]);
        assert_eq!(t.separator, Some(Separator::List));
    }

    #[test]
    fn tokenize_circular_and_dash_routes() {
        let t = tokenize("Bus 256: Biryulyovo Zapadnoye > Biryusinka > Biryulyovo Zapadnoye").unwrap();
        assert_eq!(t.name, "256");
        assert_eq!(t.separator, Some(Separator::CircularArrow));
        assert_eq!(
            t.payload,
            vec!["Biryulyovo Zapadnoye", "Biryusinka", "Biryulyovo Zapadnoye"]
        );

        let t = tokenize("Bus 750: Tolstopaltsevo - Marushkino - Rasskazovka").unwrap();
        assert_eq!(t.name, "750");
        assert_eq!(t.separator, Some(Separator::Dash));
        assert_eq!(t.payload, vec!["Tolstopaltsevo", "Marushkino", "Rasskazovka"]);
    }

    #[test]
    fn tokenize_bus_name_may_contain_spaces() {
        let t = tokenize("Bus Night Express: A > B > A").unwrap();
        assert_eq!(t.name, "Night Express");
    }

    #[test]
    fn circular_route_keeps_hyphenated_names() {
        let t = tokenize("Bus 1: Rechnoy-Vokzal > Park > Rechnoy-Vokzal").unwrap();
        assert_eq!(t.separator, Some(Separator::CircularArrow));
        assert_eq!(t.payload, vec!["Rechnoy-Vokzal", "Park", "Rechnoy-Vokzal"]);
    }

    #[test]
    fn single_stop_route_is_circular() {
        let t = tokenize("Bus 1: A").unwrap();
        assert_eq!(t.separator, Some(Separator::CircularArrow));
        assert_eq!(t.payload, vec!["A"]);
    }

    #[test]
    fn tokenize_without_colon_is_name_only() {
        let t = tokenize("Bus 828").unwrap();
        assert_eq!(t.name, "828");
        assert!(t.payload.is_empty());
        assert_eq!(t.separator, None);

        let t = tokenize("Stop Prazhskaya  ").unwrap();
        assert_eq!(t.kind, QueryKind::Stop);
        assert_eq!(t.name, "Prazhskaya");
    }

    #[test]
    fn tokenize_rejects_degenerate_input() {
        assert!(matches!(tokenize("   "), Err(ParseError::EmptyQuery)));
        assert!(matches!(tokenize("Train 1: A > B"), Err(ParseError::UnknownKind(k)) if k == "Train"));
        assert!(matches!(tokenize("Bus : A > B"), Err(ParseError::MissingName)));
        assert!(matches!(tokenize("Bus"), Err(ParseError::MissingName)));
        assert!(matches!(tokenize("Bus 1:   "), Err(ParseError::MissingPayload(n)) if n == "1"));
        assert!(matches!(tokenize("Bus 1: A > > B"), Err(ParseError::EmptyToken(_))));
        assert!(matches!(tokenize("Stop A: 1.0,,2.0"), Err(ParseError::EmptyToken(_))));
    }

    #[test]
    fn stop_definition_with_distances() {
        let def = parse_stop_definition("Stop A: 55.5, 37.25, 3900m to B, 100m to Big Stop").unwrap();
        assert_eq!(def.name, "A");
        assert_eq!(def.coordinates, Coordinates::new(55.5, 37.25));
        assert_eq!(
            def.distances,
            vec![("B".to_string(), 3900), ("Big Stop".to_string(), 100)]
        );
    }

    #[test]
    fn stop_definition_rejects_bad_numbers() {
        assert!(matches!(
            parse_stop_definition("Stop A: 55.5"),
            Err(ParseError::MissingCoordinates(_))
        ));
        assert!(matches!(
            parse_stop_definition("Stop A: north, 37.2"),
            Err(ParseError::InvalidCoordinate { text, .. }) if text == "north"
        ));
        assert!(matches!(
            parse_stop_definition("Stop A: 1, 2, 3900 to B"),
            Err(ParseError::MissingUnit(_))
        ));
        assert!(matches!(
            parse_stop_definition("Stop A: 1, 2, 39x0m to B"),
            Err(ParseError::InvalidDistance { .. })
        ));
        assert!(matches!(
            parse_stop_definition("Stop A: 1, 2, 3900m B"),
            Err(ParseError::MalformedDistance(_))
        ));
    }

    #[test]
    fn parse_request_classifies_lines() {
        assert_eq!(parse_request("Map").unwrap(), Request::Map);
        assert_eq!(
            parse_request("Route A > Big B").unwrap(),
            Request::Route {
                from: "A".into(),
                to: "Big B".into()
            }
        );
        assert_eq!(
            parse_request("Bus 1").unwrap(),
            Request::BusStat { name: "1".into() }
        );
        assert_eq!(
            parse_request("Stop A").unwrap(),
            Request::StopStat { name: "A".into() }
        );

        let def = parse_request("Bus 1: A - B").unwrap();
        assert!(def.is_definition());
        match def {
            Request::DefineBus(bus) => {
                assert!(!bus.is_roundtrip());
                assert_eq!(bus.stops, vec!["A", "B"]);
            }
            other => panic!("expected bus definition, got {other:?}"),
        }

        assert!(matches!(parse_request("Route A"), Err(ParseError::MissingPayload(_))));
    }

    #[test]
    fn typed_parsers_reject_other_kind() {
        assert!(parse_bus_definition("Stop A: 1, 2").is_err());
        assert!(parse_stop_definition("Bus 1: A > B").is_err());
    }
}
