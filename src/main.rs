use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use textmenu::core::config::{self, CliOverrides};
use textmenu::inventory::Inventory;
use textmenu::{Behavior, StdConsole};

#[derive(Parser)]
#[command(name = "textmenu", about = "Interactive inventory menu")]
struct Args {
    /// Show the menu only once instead of looping
    #[arg(long)]
    once: bool,

    /// Keep previous output on screen between loops
    #[arg(long)]
    no_clear: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let cli = CliOverrides {
        loop_menu: args.once.then_some(false),
        clear_on_loop: args.no_clear.then_some(false),
        log_file: args.log_file,
    };
    let defaults = Behavior {
        loop_menu: true,
        ..Default::default()
    };
    let resolved = config::resolve(&file_config, &cli, defaults);

    // File logger only: stdout belongs to the menu
    if let Some(ref path) = resolved.log_file {
        let log_config = ConfigBuilder::new()
            .set_time_format_rfc3339()
            .build();
        match File::create(path) {
            Ok(log_file) => {
                let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
            }
            Err(e) => eprintln!("Could not open log file {}: {e}", path.display()),
        }
    }

    log::info!("textmenu starting with {:?}", resolved.behavior);

    let inventory = Inventory::new();
    let menu = inventory.menu(resolved.behavior);
    match menu.run(&mut StdConsole::new()) {
        Ok(outcome) => {
            log::info!("Menu ended: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Menu failed: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
