use std::io;

use clap::Parser;
use tracing::{debug, error, info};

use virin::cli::Args;
use virin::config::config_from_env;
use virin::error::AppError;
use virin::engine::Renamer;
use virin::logging;
use virin::output::{display_dry_run, display_json, display_rename_report};
use virin::progress::{should_use_colors, Progress};
use virin::session::run_session;

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = config_from_env();
    debug!(branch = %config.branch, unit_id = %config.unit_id, "Loaded configuration");

    let progress = Progress::new_with_ui(args.verbose > 0, should_use_colors());
    let mut renamer = Renamer::new(config).with_progress(progress);
    let request = args.to_request();
    let mut stdout = io::stdout();

    if args.dry {
        let plan = renamer.plan(&request)?;
        info!("Dry run: {} files planned", plan.len());
        if args.json {
            display_json(&plan, &mut stdout)?;
        } else {
            display_dry_run(&plan, &mut stdout)?;
        }
        return Ok(());
    }

    let report = renamer.rename(&request)?;
    display_rename_report(&report, args.json, &mut stdout)?;

    if args.interactive {
        info!("Entering interactive session");
        let stdin = io::stdin();
        run_session(&mut renamer, &request, args.json, stdin.lock(), &mut stdout)?;
    }

    Ok(())
}
