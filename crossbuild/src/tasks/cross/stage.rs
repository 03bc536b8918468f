//! Copies finished executables out of cargo's target tree.
//!
//! Staging is the authoritative presence check: a build that cargo reported as
//! successful still fails here if its executable is not where it should be.

use crate::config::Config;
use crate::error::StagingError;
use crate::targets::TargetDescriptor;
use std::fs::{self, File, FileTimes, Metadata};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedArtifact {
    pub source: PathBuf,
    pub path: PathBuf,
    /// Size of the staged file in bytes.
    pub size: u64,
}

impl StagedArtifact {
    pub fn size_mib(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

pub fn stage(config: &Config, target: &'static TargetDescriptor) -> Result<StagedArtifact, StagingError> {
    let source = config.build_output_path(target);
    let dest = config.staged_path(target);

    if !source.is_file() {
        return Err(StagingError::ArtifactNotFound {
            target: target.name,
            path: source,
        });
    }

    fs::create_dir_all(&config.output_dir).map_err(io_err("create", &config.output_dir))?;

    eprintln!("\n>>> Copying {} -> {}", source.display(), dest.display());
    fs::copy(&source, &dest).map_err(io_err("copy to", &dest))?;

    let meta = fs::metadata(&source).map_err(io_err("read metadata of", &source))?;
    copy_times(&meta, &dest).map_err(io_err("set timestamps on", &dest))?;

    let size = fs::metadata(&dest).map_err(io_err("read metadata of", &dest))?.len();
    tracing::debug!(name = target.name, size, dest = %dest.display(), "staged");

    Ok(StagedArtifact {
        source,
        path: dest,
        size,
    })
}

/// `fs::copy` keeps permissions; carry access/modification times over too.
fn copy_times(src: &Metadata, dest: &Path) -> io::Result<()> {
    let mut times = FileTimes::new();
    if let Ok(t) = src.accessed() {
        times = times.set_accessed(t);
    }
    if let Ok(t) = src.modified() {
        times = times.set_modified(t);
    }
    File::open(dest)?.set_times(times)
}

fn io_err(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> StagingError {
    let path = path.to_path_buf();
    move |source| StagingError::Io {
        action,
        path,
        source,
    }
}
