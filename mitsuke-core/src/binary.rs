use crate::format::FormatResult;
use crate::identify::identify;
use crate::view::ByteView;
use anyhow::{bail, Context, Result};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::path::Path;

/// Size bounds applied when mapping a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapLimits {
    /// Files shorter than this are rejected.
    pub min_len: u64,
    /// Map at most this many bytes from the start of the file.
    pub max_len: Option<u64>,
}

/// A file mapped read-only, together with its classification.
///
/// The mapping lives exactly as long as the `Binary`; every [`ByteView`]
/// handed out borrows from it.
pub struct Binary {
    pub path: String,
    /// Length of the file on disk, before any `max_len` cap.
    pub file_len: u64,
    pub format: FormatResult,
    map: Option<Mmap>,
}

impl Binary {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, MapLimits::default())
    }

    pub fn open_with<P: AsRef<Path>>(path: P, limits: MapLimits) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let file_len = file
            .metadata()
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();

        if file_len < limits.min_len {
            bail!(
                "{} is {} bytes, shorter than the required {}",
                path.display(),
                file_len,
                limits.min_len
            );
        }

        let map_len = match limits.max_len {
            Some(max) if max < file_len => {
                log::debug!(
                    "Mapping first {} of {} bytes of {}",
                    max,
                    file_len,
                    path.display()
                );
                max
            }
            _ => file_len,
        };

        let map = if map_len == 0 {
            log::warn!("{} is empty; nothing to map", path.display());
            None
        } else {
            let len = usize::try_from(map_len)
                .with_context(|| format!("{} is too large to map", path.display()))?;
            // SAFETY: the mapping is read-only and private to this value. A
            // concurrent writer truncating the file is outside our control,
            // the same caveat as any mmap-based reader.
            let map = unsafe { MmapOptions::new().len(len).map(&file) }
                .with_context(|| format!("failed to map {}", path.display()))?;
            log::debug!("Mapped {} bytes of {}", map.len(), path.display());
            Some(map)
        };

        let format = identify(Self::view_of(map.as_ref()));
        log::info!("{}: {}", path.display(), format);

        Ok(Self {
            path: path.display().to_string(),
            file_len,
            format,
            map,
        })
    }

    /// Bounds-checked view over the mapped bytes.
    pub fn view(&self) -> ByteView<'_> {
        Self::view_of(self.map.as_ref())
    }

    /// Number of mapped bytes.
    pub fn len(&self) -> usize {
        self.view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.view().is_empty()
    }

    fn view_of(map: Option<&Mmap>) -> ByteView<'_> {
        match map {
            Some(map) => ByteView::new(map),
            None => ByteView::empty(),
        }
    }
}

/// Maps `path` and classifies it.
pub fn identify_path<P: AsRef<Path>>(path: P) -> Result<FormatResult> {
    Ok(Binary::open(path)?.format)
}
