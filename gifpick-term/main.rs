//! Terminal front end for the GIF picker.
//!
//! Draws a one-line composer with the picker's trigger, opens the popover
//! above it, and runs committed searches on a tokio runtime. Picked GIFs are
//! collected on screen and printed to stdout on exit.

mod app;
mod input;
mod logging;
mod render;
mod terminal;
mod worker;

use std::{
  path::PathBuf,
  sync::Arc,
};

use clap::{
  ArgAction,
  Parser,
};
use eyre::{
  Result,
  WrapErr,
};
use gifpick_loader::Config;
use gifpick_search::GiphyClient;

use crate::app::App;

#[derive(Debug, Parser)]
#[command(name = "gifpick")]
#[command(about = "Search GIPHY from the terminal and pick GIFs")]
struct Cli {
  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,

  /// API key for the search service (overrides config and GIFPICK_API_KEY)
  #[arg(long, value_name = "KEY")]
  api_key: Option<String>,

  /// Base URL of the search service
  #[arg(long, value_name = "URL")]
  base_url: Option<String>,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log-file", value_name = "FILE")]
  log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  gifpick_loader::initialize_config_file(cli.config_file.clone());
  gifpick_loader::initialize_log_file(cli.log_file.clone());

  let config = Config::load_user().wrap_err("failed to load config")?;
  logging::setup(cli.verbosity, config.log.level.as_deref())?;

  let runtime = tokio::runtime::Runtime::new()?;
  let _guard = runtime.enter();

  let api_key = cli
    .api_key
    .or_else(|| std::env::var("GIFPICK_API_KEY").ok());
  let options = app::search_options(&config.search, api_key, cli.base_url);
  if options.api_key.is_empty() {
    log::warn!("no API key configured; searches will fail");
  }
  let client = Arc::new(GiphyClient::new(options)?);
  let (requests, responses) = worker::spawn(client);

  let mut app = App::new(&config, requests, responses);
  let mut terminal = terminal::Terminal::new()?;
  terminal.enter_raw_mode()?;
  let result = app.run(&mut terminal);
  terminal.leave_raw_mode()?;
  result?;

  for item in app.sent() {
    println!("{}", item.preview_url);
  }
  Ok(())
}
