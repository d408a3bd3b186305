mod cli;
mod logging;
mod reporter;

use std::process;

use clap::{CommandFactory, Parser};
use cli::{ArchiveAdvancedArgs, ArchiveOneArgs, Cli, Commands, VerifyAdvancedArgs};
use colored::*;
use dotenv::dotenv;
use reporter::CliReporter;
use sevenz_batch::archiver::{
    resolve_single_source, run_archive_job, sibling_destination, ArchiveJob,
};
use sevenz_batch::config::load_configuration;
use sevenz_batch::timestamp::TagPrecision;
use sevenz_batch::verifier::{verify_archive, TestMode};
use sevenz_batch::{
    AppConfig, ArchiveTemplate, BatchPolicy, BatchRequest, BatchRunner, ConsolePrompt,
    EngineLocation, Error, ProcessRunner,
};
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            eprintln!("{} {}", "Error loading configuration:".red(), err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let outcome = match args.command {
        Some(Commands::Archive { root }) => run_batch(&config, BatchRequest::legacy_archive(root)),
        Some(Commands::ArchiveAdvanced(args)) => run_archive_advanced(&config, args),
        Some(Commands::ArchiveOne(args)) => run_archive_one(&config, args),
        Some(Commands::Verify { root }) => run_batch(&config, BatchRequest::legacy_verify(root)),
        Some(Commands::VerifyAdvanced(args)) => run_verify_advanced(&config, args),
        Some(Commands::VerifyOne { archive }) => run_verify_one(&config, &archive),
        Some(Commands::LocateEngine) => resolve_engine(&config)
            .map(|engine| {
                println!("{}", engine.executable().display());
                true
            })
            .map_err(anyhow::Error::from),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(true)
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(true)
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            if err.downcast_ref::<Error>().is_some_and(Error::is_cancellation) {
                println!("{}", "Cancelled, nothing was changed.".yellow());
                return;
            }
            error!("Error: {:#}", err);
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            process::exit(1);
        }
    }
}

fn resolve_engine(config: &AppConfig) -> Result<EngineLocation, Error> {
    let engine = EngineLocation::resolve(config.engine_path.as_deref())?;
    info!("Using 7-Zip at {}", engine.executable().display());
    Ok(engine)
}

/// Returns `Ok(false)` when the batch finished but some items failed.
fn run_batch(config: &AppConfig, request: BatchRequest) -> anyhow::Result<bool> {
    let engine = resolve_engine(config)?;
    let reporter = CliReporter::new();
    let mut confirm = ConsolePrompt::stdio();

    let result = BatchRunner::new(&engine, &ProcessRunner, &reporter).run(&request, &mut confirm)?;

    Ok(result.failed() == 0)
}

fn run_archive_advanced(config: &AppConfig, args: ArchiveAdvancedArgs) -> anyhow::Result<bool> {
    let template = ArchiveTemplate {
        destination_dir: args.dest,
        timestamp: args.timestamp.then_some(TagPrecision::DateTime),
        suffix: config.suffix_or_default(args.suffix),
    };
    let request = BatchRequest::advanced_archive(args.root, template).with_policy(BatchPolicy {
        require_confirmation: args.confirm,
        continue_on_error: !args.stop_on_error,
    });
    run_batch(config, request)
}

fn run_verify_advanced(config: &AppConfig, args: VerifyAdvancedArgs) -> anyhow::Result<bool> {
    let request = BatchRequest::advanced_verify(args.root, args.recursive).with_policy(BatchPolicy {
        require_confirmation: args.confirm,
        continue_on_error: !args.stop_on_error,
    });
    run_batch(config, request)
}

fn run_archive_one(config: &AppConfig, args: ArchiveOneArgs) -> anyhow::Result<bool> {
    sevenz_batch::scan::ensure_root_dir(&args.source)?;
    let source = resolve_single_source(&args.source)?;
    let destination_dir = match args.dest {
        Some(dest) => dest,
        None => sibling_destination(&source)?,
    };

    let job = ArchiveJob::new(
        &source,
        &destination_dir,
        args.name.as_deref(),
        args.timestamp.then_some(TagPrecision::DateTime),
        config.suffix_or_default(args.suffix).as_deref(),
    )?;

    let engine = resolve_engine(config)?;
    let archive = run_archive_job(&engine, &ProcessRunner, &job)?;
    println!("{} {}", "✓".green(), archive.display());
    Ok(true)
}

fn run_verify_one(config: &AppConfig, archive: &std::path::Path) -> anyhow::Result<bool> {
    if !archive.is_file() {
        return Err(Error::InvalidInput {
            path: archive.to_path_buf(),
            reason: "not an archive file".to_string(),
        }
        .into());
    }

    let engine = resolve_engine(config)?;
    let output = verify_archive(&engine, &ProcessRunner, archive, TestMode::Archive)?;
    println!("{}", output.stdout.trim());
    println!("{} {}", "✓".green(), archive.display());
    Ok(true)
}
