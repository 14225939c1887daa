#![allow(dead_code)]

use std::fs;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};

pub fn data_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

pub fn utf8_root(temp: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
}

pub fn copy_tree(source: &Path, dest: &Path) {
    fs::create_dir_all(dest).unwrap();
    for entry in fs::read_dir(source).unwrap() {
        let entry = entry.unwrap();
        let target = dest.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}

pub fn gto_json(id: &str, name: &str, with_quality: bool) -> String {
    let quality = if with_quality {
        r#","quality":{"completeness":97.5,"contamination":0.8}"#
    } else {
        ""
    };
    format!(r#"{{"id":"{id}","scientific_name":"{name}","domain":"Bacteria"{quality}}}"#)
}

/// Lays out one binning run. `complete` controls the evaluation marker.
pub fn binning_run(
    root: &Utf8Path,
    name: &str,
    complete: bool,
    bins: &[(&str, String)],
) -> Utf8PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    if complete {
        fs::create_dir_all(dir.join("Eval")).unwrap();
        fs::write(dir.join("Eval/index.tbl"), "sample\tbin\n").unwrap();
    }
    for (file, content) in bins {
        fs::write(dir.join(file), content).unwrap();
    }
    dir
}
