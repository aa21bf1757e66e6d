mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let mut cli = Cli::parse();
    if let Err(err) = commands::flags::hoist_trailing_globals(&mut cli) {
        exit_with(err);
    }

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // One request at a time: a current-thread runtime is all the CLI needs
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => exit_with(CliError::Io(err)),
    };

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = runtime.block_on(run(cli)) {
        exit_with(err);
    }
}

fn exit_with(err: CliError) -> ! {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        mut global,
        command,
    } = cli;

    match command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "dpskman", &mut std::io::stdout());
            Ok(())
        }

        // Config commands don't need a controller connection
        Command::Config(args) => {
            let cfg = config::load_config_or_default();
            global.output = Some(config::resolve_output(&global, &cfg));
            commands::config_cmd::handle(args, &global)
        }

        // Everything else talks to the controller
        cmd => {
            let cfg = config::load_config_or_default();
            global.output = Some(config::resolve_output(&global, &cfg));

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &cfg, &global).await
        }
    }
}
