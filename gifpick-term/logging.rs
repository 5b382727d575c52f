use std::str::FromStr;

use eyre::Result;
use log::LevelFilter;

/// Route `log` records to the log file. The terminal belongs to the UI, so
/// nothing goes to stderr. `-v` flags win over the configured level.
pub fn setup(verbosity: u8, configured: Option<&str>) -> Result<()> {
  let level = match verbosity {
    0 => {
      configured
        .and_then(|level| LevelFilter::from_str(level).ok())
        .unwrap_or(LevelFilter::Warn)
    },
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  fern::Dispatch::new()
    .level(level)
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .chain(fern::log_file(gifpick_loader::log_file())?)
    .apply()?;
  Ok(())
}
