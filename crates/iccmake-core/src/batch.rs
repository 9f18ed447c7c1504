//! Batch synthesis over catalog × tone curves
//!
//! Every (entry, curve) job builds a v4 profile, derives its v2 companion
//! and hands both to a [`ProfileSink`]. File names are checked for
//! collisions before any job runs. The first failing job aborts the batch.
//! The abstract identity profiles are written after the last job.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::{debug, debug_span, info};

use crate::catalog;
use crate::config::SynthesisConfig;
use crate::error::{Error, Result};
use crate::icc::{DateTimeNumber, IccProfile};
use crate::identity::IdentityProfile;
use crate::naming::{NamingPolicy, ProfileGeneration};
use crate::profile_spec::ProfileSpec;
use crate::template::TemplateStore;
use crate::trc::TrcId;
use crate::v2::{DEFAULT_CURVE_TABLE_SIZE, V2ProfileDeriver};
use crate::v4::V4ProfileBuilder;

/// Destination of encoded profiles
pub trait ProfileSink: Sync {
    fn persist(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes each profile as a file in one directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create `dir` (and its parents) if needed
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| Error::PersistenceFailure {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ProfileSink for DirectorySink {
    fn persist(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes).map_err(|source| Error::PersistenceFailure {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "wrote profile");
        Ok(())
    }
}

/// Keeps profiles in memory, keyed by file name
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.lock().get(file_name).cloned()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn into_files(self) -> BTreeMap<String, Vec<u8>> {
        self.files.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProfileSink for MemorySink {
    fn persist(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        self.lock().insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// One (entry, curve) unit of work
#[derive(Debug, Clone)]
pub struct Job<'a> {
    pub spec: &'a ProfileSpec,
    pub trc: TrcId,
    pub v4_name: String,
    pub v2_name: String,
}

/// The two profiles built for one job
#[derive(Debug, Clone)]
pub struct ProfilePair {
    pub v4_name: String,
    pub v4: IccProfile,
    pub v2_name: String,
    pub v2: IccProfile,
}

/// File names written by a batch, in job order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: Vec<String>,
}

impl BatchReport {
    pub fn profile_count(&self) -> usize {
        self.written.len()
    }
}

pub struct Synthesizer {
    specs: Vec<ProfileSpec>,
    trcs: Vec<TrcId>,
    templates: TemplateStore,
    naming: NamingPolicy,
    builder: V4ProfileBuilder,
    curve_table_size: usize,
    parallel: bool,
    identities: Vec<IdentityProfile>,
    /// cprt of the identity profiles
    copyright: String,
}

impl Synthesizer {
    /// Synthesizer over every curve of `specs`, run sequentially
    pub fn new(specs: Vec<ProfileSpec>, templates: TemplateStore, naming: NamingPolicy) -> Self {
        Self {
            specs,
            trcs: TrcId::ALL.to_vec(),
            templates,
            builder: V4ProfileBuilder::new(naming.clone()),
            naming,
            curve_table_size: DEFAULT_CURVE_TABLE_SIZE,
            parallel: false,
            identities: IdentityProfile::ALL.to_vec(),
            copyright: catalog::COPYRIGHT.to_string(),
        }
    }

    /// Catalog, templates and naming as configured
    pub fn from_config(config: &SynthesisConfig) -> Result<Self> {
        let specs = config.load_catalog()?;
        let templates = config.load_templates()?;
        let identities: &[IdentityProfile] = if config.identity_profiles {
            &IdentityProfile::ALL
        } else {
            &[]
        };
        let mut synthesizer = Self::new(specs, templates, config.naming())
            .with_curve_table_size(config.curve_table_size)
            .with_parallel(config.parallel)
            .with_identities(identities);
        if let Some(copyright) = &config.copyright {
            synthesizer = synthesizer.with_copyright(copyright.clone());
        }
        Ok(synthesizer)
    }

    /// Restrict the batch to `trcs`; an empty list keeps all six curves
    pub fn with_trcs(mut self, trcs: &[TrcId]) -> Self {
        if !trcs.is_empty() {
            self.trcs = trcs.to_vec();
        }
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_curve_table_size(mut self, size: usize) -> Self {
        self.curve_table_size = size;
        self
    }

    pub fn with_creation_date(mut self, date: DateTimeNumber) -> Self {
        self.builder = self.builder.with_creation_date(date);
        self
    }

    /// Identity profiles to write after the catalog; empty skips them
    pub fn with_identities(mut self, identities: &[IdentityProfile]) -> Self {
        self.identities = identities.to_vec();
        self
    }

    /// Copyright text of the identity profiles
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = copyright.into();
        self
    }

    pub fn specs(&self) -> &[ProfileSpec] {
        &self.specs
    }

    /// Identity profiles with their file names, in writing order
    pub fn identity_jobs(&self) -> Vec<(IdentityProfile, String)> {
        self.identities
            .iter()
            .map(|&id| (id, id.file_name(&self.naming)))
            .collect()
    }

    /// Every job in catalog order, curves innermost
    ///
    /// Names are also checked against the identity profiles.
    pub fn plan(&self) -> Result<Vec<Job<'_>>> {
        let mut seen = HashSet::new();
        for (_, name) in self.identity_jobs() {
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateFileName(name));
            }
        }
        let mut jobs = Vec::with_capacity(self.specs.len() * self.trcs.len());

        for spec in &self.specs {
            for &trc in &self.trcs {
                let v4_name = self.naming.file_name(&spec.base_name, trc, ProfileGeneration::V4);
                let v2_name = self.naming.file_name(&spec.base_name, trc, ProfileGeneration::TrueV2);
                for name in [&v4_name, &v2_name] {
                    if !seen.insert(name.clone()) {
                        return Err(Error::DuplicateFileName(name.clone()));
                    }
                }
                jobs.push(Job {
                    spec,
                    trc,
                    v4_name,
                    v2_name,
                });
            }
        }
        Ok(jobs)
    }

    /// Build both profiles of one job
    pub fn synthesize(&self, job: &Job<'_>) -> Result<ProfilePair> {
        let deriver = V2ProfileDeriver::new(&self.templates, self.naming.clone())
            .with_curve_table_size(self.curve_table_size);

        let v4 = self.builder.build(job.spec, job.trc)?;
        let v2 = deriver.derive_for(&v4, job.spec, job.trc)?;
        Ok(ProfilePair {
            v4_name: job.v4_name.clone(),
            v4,
            v2_name: job.v2_name.clone(),
            v2,
        })
    }

    fn run_job(&self, job: &Job<'_>, sink: &dyn ProfileSink) -> Result<()> {
        let _guard = debug_span!("job", base = %job.spec.base_name, trc = %job.trc).entered();

        let pair = self
            .synthesize(job)
            .map_err(|e| e.for_entry(&job.spec.base_name, job.trc))?;
        sink.persist(&pair.v4_name, &pair.v4.encode())
            .map_err(|e| e.for_entry(&job.spec.base_name, job.trc))?;
        sink.persist(&pair.v2_name, &pair.v2.encode())
            .map_err(|e| e.for_entry(&job.spec.base_name, job.trc))?;
        debug!(v4 = %pair.v4_name, v2 = %pair.v2_name, "job done");
        Ok(())
    }

    /// Build and persist every planned profile
    pub fn run(&self, sink: &dyn ProfileSink) -> Result<BatchReport> {
        let jobs = self.plan()?;
        info!(jobs = jobs.len(), parallel = self.parallel, "synthesizing profiles");

        if self.parallel {
            jobs.par_iter().try_for_each(|job| self.run_job(job, sink))?;
        } else {
            for job in &jobs {
                self.run_job(job, sink)?;
            }
        }

        let mut written: Vec<String> = jobs
            .into_iter()
            .flat_map(|job| [job.v4_name, job.v2_name])
            .collect();

        let creation_date = self.builder.creation_date();
        for (id, name) in self.identity_jobs() {
            let profile = id.build(&self.naming, &self.copyright, creation_date);
            sink.persist(&name, &profile.encode())?;
            written.push(name);
        }
        Ok(BatchReport { written })
    }
}
