use camino::{Utf8Path, Utf8PathBuf};

use crate::error::SampleError;

/// How existing archives in the output directory are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputPolicy {
    /// Overwrite archives that already exist, keep everything else.
    #[default]
    Keep,
    /// Leave samples that already have an archive alone.
    MissingOnly,
    /// Empty the output directory before importing.
    Clear,
}

impl OutputPolicy {
    pub fn from_flags(missing: bool, clear: bool) -> Result<Self, SampleError> {
        match (missing, clear) {
            (true, true) => Err(SampleError::Validation(
                "--missing and --clear are mutually exclusive".to_string(),
            )),
            (true, false) => Ok(OutputPolicy::MissingOnly),
            (false, true) => Ok(OutputPolicy::Clear),
            (false, false) => Ok(OutputPolicy::Keep),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub input_dir: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
    pub policy: OutputPolicy,
}

impl ImportConfig {
    /// Validates the command-line choices. Nothing on disk is touched.
    pub fn resolve(
        input_dir: &Utf8Path,
        output_dir: &Utf8Path,
        missing: bool,
        clear: bool,
    ) -> Result<Self, SampleError> {
        let policy = OutputPolicy::from_flags(missing, clear)?;
        if !input_dir.is_dir() {
            return Err(SampleError::Validation(format!(
                "input directory {input_dir} is not found or invalid"
            )));
        }
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(SampleError::Validation(format!(
                "output path {output_dir} exists and is not a directory"
            )));
        }
        Ok(Self {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_from_flags() {
        assert_eq!(
            OutputPolicy::from_flags(false, false).unwrap(),
            OutputPolicy::Keep
        );
        assert_eq!(
            OutputPolicy::from_flags(true, false).unwrap(),
            OutputPolicy::MissingOnly
        );
        assert_eq!(
            OutputPolicy::from_flags(false, true).unwrap(),
            OutputPolicy::Clear
        );
        assert!(matches!(
            OutputPolicy::from_flags(true, true),
            Err(SampleError::Validation(_))
        ));
    }
}
