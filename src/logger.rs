use chrono::Local;
use env_logger::{Builder, Env};
use log::{Level, LevelFilter};
use std::io::{IsTerminal, Write};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m\x1b[1m",
        Level::Warn => "\x1b[33m\x1b[1m",
        Level::Info => "\x1b[32m\x1b[1m",
        Level::Debug => "\x1b[36m\x1b[1m",
        Level::Trace => "\x1b[90m\x1b[1m",
    }
}

fn builder(env: Env) -> Builder {
    let colored = std::io::stderr().is_terminal();
    let mut builder = Builder::new();
    // hyper's connection chatter drowns out the upload log at debug;
    // set before the env so RUST_LOG=hyper=... still wins
    builder.filter_module("hyper", LevelFilter::Warn);
    builder.parse_env(env);
    builder.format(move |buf, record| {
        let time = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let (color, reset) = if colored {
            (level_color(record.level()), "\x1b[0m")
        } else {
            ("", "")
        };
        writeln!(
            buf,
            "{} {}{:<5}{} [{}:{}] {}",
            time,
            color,
            record.level(),
            reset,
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args(),
        )
    });
    builder
}

pub fn init_logger() {
    builder(Env::default().default_filter_or(DEFAULT_FILTER)).init();
}
