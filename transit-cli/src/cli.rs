use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::config;

/// Transit - справочник транспортной сети.
///
/// Читает файл команд (`Stop ...`, `Bus ...`, `Route A > B`, `Map`),
/// применяет определения и печатает ответы на запросы в JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "transit", version, about)]
pub(crate) struct Args {
    /// Файл команд, по одной на строку (поддержка # комментариев).
    /// Без флага команды читаются из stdin
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,

    /// JSON с настройками отрисовки карты
    #[arg(long)]
    pub(crate) render_settings: Option<PathBuf>,

    /// Время ожидания автобуса на остановке, минуты
    #[arg(long, default_value = config::DEFAULT_BUS_WAIT_TIME)]
    pub(crate) bus_wait_time: f64,

    /// Скорость автобуса, км/ч
    #[arg(long, default_value = config::DEFAULT_BUS_VELOCITY)]
    pub(crate) bus_velocity: f64,

    /// Печатать JSON с отступами
    #[arg(long)]
    pub(crate) pretty: bool,
}

impl Args {
    /// Валидация аргументов (файлы существуют, параметры маршрутизации в допустимых пределах)
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.bus_velocity > 0.0) {
            bail!("--bus-velocity must be positive (got: {})", self.bus_velocity);
        }
        if !(self.bus_wait_time >= 0.0) {
            bail!("--bus-wait-time must not be negative (got: {})", self.bus_wait_time);
        }

        for path in [&self.input, &self.render_settings].into_iter().flatten() {
            let md = std::fs::metadata(path).with_context(|| format!("file not found: {:?}", path))?;
            if !md.is_file() {
                bail!("must point to a file: {:?}", path);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("transit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_are_applied() {
        let args = parse(&[]);
        assert_eq!(args.bus_wait_time, 6.0);
        assert_eq!(args.bus_velocity, 40.0);
        assert!(args.input.is_none());
        assert!(!args.pretty);
        args.validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_routing_params() {
        assert!(parse(&["--bus-velocity", "0"]).validate().is_err());
        assert!(parse(&["--bus-wait-time=-1"]).validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_input() {
        let args = parse(&["--input", "/definitely/not/here.txt"]);
        let err = args.validate().unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }
}
