use std::path::PathBuf;

use anyhow::{Context, bail};
use iccmake_core::{DirectorySink, IdentityProfile, SynthesisConfig, Synthesizer, TemplateStore, catalog, identity};

use crate::Result;
use crate::commands::SelectionArgs;

#[derive(Debug, Default, clap::Args)]
pub struct SynthesizeArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Output directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Directory holding sampleV2*.icm templates; synthesized templates are used otherwise.
    #[arg(long)]
    pub templates: Option<PathBuf>,
    /// Build profiles on all cores.
    #[arg(long)]
    pub parallel: bool,
    /// Print what would be written without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Default, clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Configuration file values, overridden by flags
fn resolve_config(selection: &SelectionArgs) -> Result<SynthesisConfig> {
    let mut config = match &selection.config {
        Some(path) => SynthesisConfig::load(path)
            .with_context(|| format!("cannot load configuration {}", path.display()))?,
        None => SynthesisConfig::default(),
    };
    if let Some(catalog) = &selection.catalog {
        config.catalog = Some(catalog.clone());
    }
    Ok(config)
}

/// Identity profiles kept by the configuration and `--only`
fn identities(config: &SynthesisConfig, selection: &SelectionArgs) -> Vec<IdentityProfile> {
    if config.identity_profiles {
        identity::select(&selection.only)
    } else {
        Vec::new()
    }
}

fn synthesizer(
    config: &SynthesisConfig,
    selection: &SelectionArgs,
    templates: TemplateStore,
) -> Result<Synthesizer> {
    let specs = catalog::select(config.load_catalog()?, &selection.only);
    let identities = identities(config, selection);
    if specs.is_empty() && identities.is_empty() {
        bail!("no catalog entry matches {:?}", selection.only);
    }
    tracing::debug!(entries = specs.len(), identities = identities.len(), "catalog ready");

    let mut synthesizer = Synthesizer::new(specs, templates, config.naming())
        .with_trcs(&selection.trcs)
        .with_curve_table_size(config.curve_table_size)
        .with_parallel(config.parallel)
        .with_identities(&identities);
    if let Some(copyright) = &config.copyright {
        synthesizer = synthesizer.with_copyright(copyright.clone());
    }
    Ok(synthesizer)
}

/// Every file name a run writes, v4 before v2, identity profiles last
fn planned_names(synthesizer: &Synthesizer) -> Result<Vec<String>> {
    let mut names: Vec<String> = synthesizer
        .plan()?
        .into_iter()
        .flat_map(|job| [job.v4_name, job.v2_name])
        .collect();
    names.extend(synthesizer.identity_jobs().into_iter().map(|(_, name)| name));
    Ok(names)
}

pub fn handle_synthesize(args: SynthesizeArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle synthesize subcommand").entered();

    let mut config = resolve_config(&args.selection)?;
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(templates) = args.templates {
        config.template_dir = Some(templates);
    }
    config.parallel |= args.parallel;

    let templates = config
        .load_templates()
        .context("cannot load v2 templates")?;
    tracing::debug!(templates = templates.len(), "templates ready");
    let synthesizer = synthesizer(&config, &args.selection, templates)?;

    if args.dry_run {
        for name in planned_names(&synthesizer)? {
            println!("{}", config.output_dir.join(name).display());
        }
        return Ok(());
    }

    let sink = DirectorySink::create(&config.output_dir)?;
    let report = synthesizer.run(&sink)?;
    tracing::info!(
        "Wrote {} profiles to {}",
        report.profile_count(),
        config.output_dir.display()
    );
    Ok(())
}

pub fn handle_list(args: ListArgs) -> Result<()> {
    let config = resolve_config(&args.selection)?;
    let synthesizer = synthesizer(&config, &args.selection, TemplateStore::new())?;

    for job in synthesizer.plan()? {
        println!("{}\t{}", job.v4_name, job.v2_name);
    }
    for (_, name) in synthesizer.identity_jobs() {
        println!("{}", name);
    }
    Ok(())
}
