use std::path::PathBuf;

use iccmake_core::TrcId;

pub use crate::synthesize::{ListArgs, SynthesizeArgs};
pub use crate::templates::WriteTemplatesArgs;

#[derive(Debug, clap::Parser)]
#[command(version, about = "Synthesize ICC v4 and v2 profiles for well-known color spaces")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub subcommand: Option<Subcommands>,
    #[command(flatten)]
    pub synthesize: Option<SynthesizeArgs>,
    #[command(flatten)]
    pub globals: GlobalArgs,
}

#[derive(Debug, clap::Args)]
#[non_exhaustive]
pub struct GlobalArgs {
    /// Print debug information; can be repeated.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Do not print logs to console.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommands {
    /// Build and write profiles (assumed if no subcommand is specified).
    Synthesize(SynthesizeArgs),
    /// Print the file names a run would write.
    List(ListArgs),
    /// Write the synthesized v2 templates as .icm files.
    WriteTemplates(WriteTemplatesArgs),
}

/// Catalog and curve selection shared by `synthesize` and `list`
#[derive(Debug, Default, clap::Args)]
pub struct SelectionArgs {
    /// JSON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// JSON catalog used instead of the built-in one.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Only build this catalog entry; can be repeated.
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,
    /// Only build this tone curve (g10, g18, g22, srgbtrc, rec709, labl); can be repeated.
    #[arg(long = "trc", value_name = "ID")]
    pub trcs: Vec<TrcId>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_subcommand() {
        let args = Args::parse_from(["iccmake", "-o", "out", "--trc", "g22", "--trc", "rec709"]);
        assert!(args.subcommand.is_none());
        let synthesize = args.synthesize.unwrap();
        assert_eq!(synthesize.output, Some(PathBuf::from("out")));
        assert_eq!(synthesize.selection.trcs, [TrcId::G22, TrcId::Rec709]);
    }

    #[test]
    fn test_unknown_trc_is_rejected() {
        assert!(Args::try_parse_from(["iccmake", "--trc", "g24"]).is_err());
    }

    #[test]
    fn test_list_subcommand() {
        let args = Args::parse_from(["iccmake", "-v", "list", "--only", "Gray"]);
        assert_eq!(args.globals.verbose, 1);
        match args.subcommand {
            Some(Subcommands::List(list)) => assert_eq!(list.selection.only, ["Gray"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_list_rejects_synthesize_flags() {
        assert!(Args::try_parse_from(["iccmake", "list", "-o", "out"]).is_err());
        assert!(Args::try_parse_from(["iccmake", "list", "--dry-run"]).is_err());
        assert!(Args::try_parse_from(["iccmake", "list", "--trc", "g10", "--catalog", "c.json"]).is_ok());
    }
}
