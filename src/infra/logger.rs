use env_logger::Builder;
use std::io::Write;

pub const LOG_LEVEL_ENV: &str = "CODE2PDF_LOG_LEVEL";

pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

/// Install the stderr logger. `CODE2PDF_LOG_LEVEL` overrides the `-v` count.
pub fn setup_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().filter_or(LOG_LEVEL_ENV, level_for_verbosity(verbosity));

    Builder::from_env(env)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let target = record.target().strip_prefix("code2pdf::").unwrap_or(record.target());
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                target,
                record.args()
            )
        })
        .try_init()
}
