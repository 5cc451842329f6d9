mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod shell;
mod source;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::set_parse_debug;

fn main() {
    let cli = Cli::parse();
    let config = if cli.quiet || cli.json {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);
    set_parse_debug(cli.debug);

    if let Err(e) = app::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
