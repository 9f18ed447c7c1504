use std::path::PathBuf;

use iccmake_core::v2::DEFAULT_CURVE_TABLE_SIZE;
use iccmake_core::{DirectorySink, ProfileSink, TemplateStore};

use crate::Result;

#[derive(Debug, clap::Args)]
pub struct WriteTemplatesArgs {
    /// Directory to write the templates to.
    pub dir: PathBuf,
    /// Entries in each sampled tone curve.
    #[arg(long, default_value_t = DEFAULT_CURVE_TABLE_SIZE)]
    pub table_size: usize,
}

pub fn handle_write_templates(args: WriteTemplatesArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle write-templates subcommand").entered();

    let sink = DirectorySink::create(&args.dir)?;
    for (name, bytes) in TemplateStore::synthesized(args.table_size).encode_all() {
        sink.persist(name, &bytes)?;
    }
    Ok(())
}
