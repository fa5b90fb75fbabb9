use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{Error, Result};

/// A whole file exposed as a contiguous read-only byte range.
///
/// The mapping (and the underlying descriptor) is released when the view is
/// dropped. All slices handed out by the parser borrow from this view, so
/// the borrow checker rules out use-after-unmap.
#[derive(Debug)]
pub struct MappedView {
    // Zero-length mappings are not portable, so empty files carry no
    // kernel mapping at all.
    map: Option<Mmap>,
}

impl MappedView {
    /// Open `path` read-only and map its full length.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| Error::open(path, err))?;

        let metadata = file.metadata().map_err(|err| Error::stat(path, err))?;

        if metadata.len() == 0 {
            return Ok(Self { map: None });
        }

        // SAFETY: the file is mapped read-only and stays open for the
        // mapping's lifetime. Concurrent truncation by another process can
        // still fault, which is inherent to file-backed mappings.
        let map = unsafe { Mmap::map(&file) }.map_err(|err| Error::map(path, err))?;

        #[cfg(target_os = "linux")]
        {
            use memmap2::Advice;

            // Hints only: ignore failure, behaviour stays correct.
            let _ = map.advise(Advice::Sequential);
            let _ = map.advise(Advice::HugePage);
        }

        Ok(Self { map: Some(map) })
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.map {
            Some(map) => map,
            None => &[],
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
