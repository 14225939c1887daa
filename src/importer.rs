use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{ImportConfig, OutputPolicy};
use crate::error::{ConversionError, SampleError};
use crate::fs_util;
use crate::genome::Gto;
use crate::sample::{AnnotatedSample, default_file_name};

/// Written by the evaluation step once a binning run has finished.
pub const MARKER_FILE: &str = "Eval/index.tbl";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub examined: usize,
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<SampleFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleFailure {
    pub sample: String,
    pub reason: String,
}

pub struct SampleImporter {
    config: ImportConfig,
}

impl SampleImporter {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<ImportSummary, SampleError> {
        info!("Copying samples from {}.", self.config.input_dir);
        prepare_output(&self.config.output_dir, self.config.policy)?;
        let candidates = discover_candidates(&self.config.input_dir)?;
        info!(
            "{} binned samples found in {}.",
            candidates.len(),
            self.config.input_dir
        );
        let summary = import_all(&candidates, &self.config.output_dir, self.config.policy)?;
        info!(
            examined = summary.examined,
            imported = summary.imported,
            skipped = summary.skipped,
            failed = summary.failed,
            "All done."
        );
        Ok(summary)
    }
}

pub fn is_complete(dir: &Utf8Path) -> bool {
    dir.join(MARKER_FILE).is_file()
}

/// Immediate sub-directories of `input_root` holding a finished binning
/// run, in name order.
pub fn discover_candidates(input_root: &Utf8Path) -> Result<Vec<Utf8PathBuf>, SampleError> {
    let entries =
        fs::read_dir(input_root.as_std_path()).map_err(|err| SampleError::io(input_root, err))?;
    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| SampleError::io(input_root, err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Ok(dir) = Utf8PathBuf::from_path_buf(path) else {
            warn!("Skipping directory with a non-UTF-8 name: {:?}.", entry.file_name());
            continue;
        };
        if is_complete(&dir) {
            candidates.push(dir);
        } else {
            debug!("Skipping {dir}: binning is not complete.");
        }
    }
    candidates.sort();
    Ok(candidates)
}

pub fn prepare_output(output_root: &Utf8Path, policy: OutputPolicy) -> Result<(), SampleError> {
    if !output_root.is_dir() {
        info!("Creating output directory {output_root}.");
        fs_util::ensure_dir(output_root)
    } else if policy == OutputPolicy::Clear {
        info!("Erasing output directory {output_root}.");
        fs_util::clean_dir(output_root)
    } else {
        info!("Samples will be copied into {output_root}.");
        Ok(())
    }
}

/// Converts and saves every candidate. A sample whose bins cannot be
/// converted is recorded as failed and the batch moves on; any other error
/// ends the run.
pub fn import_all(
    candidates: &[Utf8PathBuf],
    output_root: &Utf8Path,
    policy: OutputPolicy,
) -> Result<ImportSummary, SampleError> {
    let mut summary = ImportSummary::default();
    let total = candidates.len();

    for candidate in candidates {
        summary.examined += 1;
        let Some(sample_name) = candidate.file_name() else {
            let reason = ConversionError::InvalidName(candidate.clone()).to_string();
            error!("Sample {candidate} needs to be rerun: {reason}");
            summary.record_failure(candidate.as_str(), reason);
            continue;
        };
        let target = output_root.join(default_file_name(sample_name));

        if policy == OutputPolicy::MissingOnly && target.exists() {
            info!("Skipping sample {sample_name}: sample already exists.");
            summary.skipped += 1;
            continue;
        }

        info!(
            "Loading sample {candidate} ({} of {total}).",
            summary.examined
        );
        match AnnotatedSample::<Gto>::convert(candidate) {
            Ok(sample) => {
                info!("Saving sample to {target}.");
                sample.save(&target)?;
                summary.imported += 1;
            }
            Err(SampleError::Conversion(err)) => {
                error!("Sample {sample_name} needs to be rerun: {err}");
                summary.record_failure(sample_name, err.to_string());
            }
            Err(err) => return Err(err),
        }
    }

    Ok(summary)
}

impl ImportSummary {
    fn record_failure(&mut self, sample: &str, reason: String) {
        self.failed += 1;
        self.failures.push(SampleFailure {
            sample: sample.to_string(),
            reason,
        });
    }
}
