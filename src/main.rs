use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dry_run_report::cli::{Cli, normalize};
use dry_run_report::{runner, util};

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing(cli.verbose);

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: resolve now (file names only)
  let now_opt = util::parse_now(cfg.now_override.as_deref())?;

  // Phase 3: extract, render and write every log
  runner::run(&cfg, now_opt)
}
