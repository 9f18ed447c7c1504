use clap::Parser;
use iccmake_cli::{Args, Subcommands};

fn main() -> std::process::ExitCode {
    let Args {
        subcommand,
        globals,
        synthesize,
    } = Args::parse();

    if !globals.quiet {
        let filter = match globals.verbose {
            0 => tracing::level_filters::LevelFilter::INFO,
            1 => tracing::level_filters::LevelFilter::DEBUG,
            2.. => tracing::level_filters::LevelFilter::TRACE,
        };
        let env_filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(filter.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match subcommand {
        Some(Subcommands::Synthesize(args)) => iccmake_cli::synthesize::handle_synthesize(args),
        None => iccmake_cli::synthesize::handle_synthesize(synthesize.unwrap_or_default()),
        Some(Subcommands::List(args)) => iccmake_cli::synthesize::handle_list(args),
        Some(Subcommands::WriteTemplates(args)) => {
            iccmake_cli::templates::handle_write_templates(args)
        }
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        std::process::ExitCode::FAILURE
    } else {
        std::process::ExitCode::SUCCESS
    }
}
