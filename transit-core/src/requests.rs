use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const COMMENT: char = '#';

/// Строка файла команд вместе с её номером в исходном файле (с 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub number: usize,
    pub text: String,
}

/// Читает команды построчно. Пропускает пустые строки и строки,
/// первый непробельный символ которых `#`. Символ `#` внутри команды
/// остаётся частью имени: "Stop Pier #2: ...".
pub fn read_requests<R: io::Read>(reader: R) -> io::Result<Vec<CommandLine>> {
    let mut commands = Vec::new();

    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let text = line.trim().trim_start_matches('\u{feff}');
        if text.is_empty() || text.starts_with(COMMENT) {
            continue;
        }
        commands.push(CommandLine {
            number: i + 1,
            text: text.to_string(),
        });
    }

    Ok(commands)
}

pub fn read_requests_from_path(path: impl AsRef<Path>) -> io::Result<Vec<CommandLine>> {
    read_requests(File::open(path)?)
}
