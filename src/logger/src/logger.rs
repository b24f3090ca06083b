use env_logger::{fmt::Color, Builder, Env};
use log::{Level, LevelFilter};
use std::io::Write;

/// Initialize the global colored logger. `verbosity` follows the usual
/// `-v`-repeated-flag convention: 0 is errors only, every repeat adds a
/// level. `ANCESTRAL_LOG` overrides the computed level if set.
pub fn init(verbosity: u8) {
    let log_level = u8_to_loglevel(verbosity);
    let env = Env::default().filter("ANCESTRAL_LOG");

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            let traceback = if record.level() == LevelFilter::Error {
                format!("(@ {}:{}) ", record.file().unwrap_or("unknown"), record.line().unwrap_or(0))
            } else {
                String::new()
            };

            let mut arg_style = buf.style();
            arg_style.set_intense(record.level() == LevelFilter::Error);

            let mut level_style = buf.style();
            let color = match record.level() {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Green,
                Level::Debug => Color::Blue,
                Level::Trace => Color::Cyan,
            };
            level_style.set_color(color).set_bold(true);

            writeln!(
                buf,
                "[{} {: <5} {}] {traceback}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                level_style.value(record.level()),
                record.target(),
                arg_style.value(record.args())
            )
        })
        .parse_env(env)
        .try_init()
        .expect("logger already initialized");
}

/// Change the active log level after [`init`] without rebuilding the
/// formatter.
pub fn set_level(verbosity: u8) {
    log::set_max_level(u8_to_loglevel(verbosity));
}

fn u8_to_loglevel(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        4..=u8::MAX => LevelFilter::Trace,
    }
}
