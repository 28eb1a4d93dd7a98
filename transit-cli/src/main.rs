//! Точка входа `transit`.
//!
//! Жизненный цикл:
//! - парсинг CLI и загрузка файла команд
//! - применение определений: остановки, расстояния, маршруты
//! - сборка маршрутизатора, если есть запросы `Route`
//! - ответы на запросы в JSON на stdout

mod cli;
mod config;
mod input;
mod output;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use log::info;
use transit_core::protocol::Request;
use transit_core::{RequestHandler, RoutingSettings};

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let args = cli::Args::parse();
    args.validate()?;

    let requests = input::load_requests(args.input.as_deref())?;
    let render_settings = config::load_render_settings(args.render_settings.as_deref())?;

    info!(
        "Starting transit: requests={}, wait={} min, velocity={} km/h",
        requests.len(),
        args.bus_wait_time,
        args.bus_velocity
    );

    let mut handler = RequestHandler::with_render_settings(render_settings);
    handler
        .apply_definitions(&requests)
        .context("apply definitions")?;

    if requests.iter().any(|r| matches!(r, Request::Route { .. })) {
        handler.build_router(RoutingSettings {
            bus_wait_time: args.bus_wait_time,
            bus_velocity: args.bus_velocity,
        })?;
    }

    let responses = output::answer_all(&handler, &requests)?;

    let mut stdout = std::io::stdout().lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut stdout, &responses)?;
    } else {
        serde_json::to_writer(&mut stdout, &responses)?;
    }
    writeln!(stdout)?;

    Ok(())
}
