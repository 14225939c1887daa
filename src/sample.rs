use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use regex::Regex;

use crate::error::{ConversionError, SampleError};
use crate::fs_util;
use crate::genome::{GenomeParseError, GenomeRecord, Gto};
use crate::metadata::SampleMetadata;

const ARCHIVE_SUFFIX: &str = ".sample.gz";

static BIN_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^bin[0-9]+\.gto$").expect("bin file pattern is valid"));

/// One binned sample: a metadata header plus its genomes, keyed by genome
/// id.
///
/// On disk a sample is a gzip stream of newline-terminated JSON lines. The
/// first line is the metadata object and every following line is one
/// genome.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedSample<G = Gto> {
    metadata: SampleMetadata,
    genomes: BTreeMap<String, G>,
}

impl<G> Default for AnnotatedSample<G> {
    fn default() -> Self {
        Self {
            metadata: SampleMetadata::new(),
            genomes: BTreeMap::new(),
        }
    }
}

impl<G: GenomeRecord> AnnotatedSample<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        let mut sample = Self::new();
        sample.metadata.set_name(name);
        sample
    }

    /// Builds a sample from a completed binning directory.
    ///
    /// Every `bin<N>.gto` file must hold a well-formed genome that carries
    /// quality data; the first one that does not aborts the whole
    /// conversion. Other files are ignored.
    pub fn convert(dir: &Utf8Path) -> Result<Self, SampleError> {
        let name = dir
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ConversionError::InvalidName(dir.to_path_buf()))?;
        let mut sample = Self::with_name(name);
        let mut sources: HashMap<String, Utf8PathBuf> = HashMap::new();

        for path in bin_files(dir)? {
            let genome = G::from_path(path.as_std_path()).map_err(|err| match err {
                GenomeParseError::Io(source) => SampleError::io(&path, source),
                GenomeParseError::Malformed(message) => ConversionError::InvalidRecord {
                    path: path.clone(),
                    message,
                }
                .into(),
            })?;
            if !genome.has_quality() {
                return Err(ConversionError::MissingQuality { path }.into());
            }
            if let Some(previous) = sources.get(genome.id()) {
                return Err(ConversionError::DuplicateGenome {
                    id: genome.id().to_string(),
                    path,
                    previous: previous.clone(),
                }
                .into());
            }
            sources.insert(genome.id().to_string(), path);
            sample.genomes.insert(genome.id().to_string(), genome);
        }

        Ok(sample)
    }

    /// Reads a sample archive. Genomes are trusted as stored and are not
    /// re-checked for quality.
    pub fn load(path: &Utf8Path) -> Result<Self, SampleError> {
        let file = File::open(path.as_std_path()).map_err(|err| SampleError::io(path, err))?;
        let reader = BufReader::new(MultiGzDecoder::new(BufReader::new(file)));
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line.map_err(|err| read_error(path, 1, err))?,
            None => return Err(SampleError::format(path, 1, "archive has no metadata line")),
        };
        let metadata = SampleMetadata::from_json_line(&header)
            .map_err(|message| SampleError::format(path, 1, message))?;

        let mut genomes = BTreeMap::new();
        for (index, line) in lines.enumerate() {
            let number = index + 2;
            let line = line.map_err(|err| read_error(path, number, err))?;
            let genome = G::from_json(&line).map_err(|err| {
                SampleError::format(path, number, format!("invalid genome record: {err}"))
            })?;
            if genomes.contains_key(genome.id()) {
                return Err(SampleError::format(
                    path,
                    number,
                    format!("duplicate genome {}", genome.id()),
                ));
            }
            genomes.insert(genome.id().to_string(), genome);
        }

        Ok(Self { metadata, genomes })
    }

    /// Writes the archive, replacing any existing file at `path`. The file
    /// only appears once it is complete.
    pub fn save(&self, path: &Utf8Path) -> Result<(), SampleError> {
        let header = self
            .metadata
            .to_json_line()
            .map_err(|err| SampleError::io(path, err.into()))?;
        fs_util::write_atomic(path, |file| {
            let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());
            writeln!(writer, "{header}")?;
            for genome in self.genomes.values() {
                let line = genome.to_json_line().map_err(io::Error::other)?;
                writeln!(writer, "{line}")?;
            }
            writer.finish()?.flush()
        })
    }

    /// Adds a genome, returning the one it replaced.
    pub fn insert(&mut self, genome: G) -> Option<G> {
        self.genomes.insert(genome.id().to_string(), genome)
    }

    pub fn genome(&self, id: &str) -> Option<&G> {
        self.genomes.get(id)
    }

    /// All genomes in id order.
    pub fn all(&self) -> Vec<&G> {
        self.genomes.values().collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.genomes.keys().map(String::as_str)
    }
}

impl<G> AnnotatedSample<G> {
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    pub fn metadata(&self) -> &SampleMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut SampleMetadata {
        &mut self.metadata
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Where this sample lives inside `dir`.
    pub fn file_name(&self, dir: &Utf8Path) -> Utf8PathBuf {
        dir.join(default_file_name(self.name()))
    }
}

/// Archive file name for the sample called `name`.
pub fn default_file_name(name: &str) -> String {
    format!("{name}{ARCHIVE_SUFFIX}")
}

pub fn is_bin_file_name(name: &str) -> bool {
    BIN_FILE.is_match(name)
}

fn bin_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, SampleError> {
    let entries = fs::read_dir(dir.as_std_path()).map_err(|err| SampleError::io(dir, err))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| SampleError::io(dir, err))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if !is_bin_file_name(file_name) || !entry.path().is_file() {
            continue;
        }
        files.push(dir.join(file_name));
    }
    files.sort();
    Ok(files)
}

// Corrupt gzip data and non-UTF-8 text surface as these kinds; anything else
// is a genuine read failure.
fn read_error(path: &Utf8Path, line: usize, err: io::Error) -> SampleError {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof => {
            SampleError::format(path, line, err.to_string())
        }
        _ => SampleError::io(path, err),
    }
}
