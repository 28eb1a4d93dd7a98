use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use transit_core::ParseError;
use transit_core::protocol::{Request, parse_request};
use transit_core::requests::CommandLine;

#[derive(Debug, Error)]
pub(crate) enum InputError {
    #[error("failed to read input file: {path:?}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin")]
    ReadStdin(#[source] io::Error),

    #[error("line {number}: {line:?}")]
    Parse {
        number: usize,
        line: String,
        #[source]
        source: ParseError,
    },
}

pub(crate) type Result<T> = std::result::Result<T, InputError>;

/// Загружает команды из источника, выбранного в CLI:
/// - `--input` -> transit_core::requests::read_requests_from_path
/// - иначе     -> stdin
pub(crate) fn load_requests(path: Option<&Path>) -> Result<Vec<Request>> {
    let lines = match path {
        Some(p) => transit_core::requests::read_requests_from_path(p).map_err(|e| InputError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?,
        None => transit_core::requests::read_requests(io::stdin().lock()).map_err(InputError::ReadStdin)?,
    };

    parse_lines(lines)
}

/// Номер в ошибке указывает на строку исходного файла
fn parse_lines(lines: Vec<CommandLine>) -> Result<Vec<Request>> {
    lines
        .into_iter()
        .map(|CommandLine { number, text }| {
            parse_request(&text).map_err(|source| InputError::Parse {
                number,
                line: text,
                source,
            })
        })
        .collect()
}
