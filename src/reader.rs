use std::path::Path;
use std::thread;

use crate::error::Result;
use crate::headers::scan_headers;
use crate::mmap::MappedView;
use crate::prefetch::{Shared, ShutdownGuard, DEFAULT_AHEAD};
use crate::records::Row;
use crate::scan::scan_records;

/// Parse configuration: the structural bytes and the header row index.
///
/// All structural bytes are single-byte literals. When no quote byte is
/// configured, quote characters in the input are ordinary data.
#[derive(Debug, Clone, Copy)]
pub struct Format {
    pub(crate) delimiter: u8,
    pub(crate) terminator: u8,
    pub(crate) quote: Option<u8>,
    pub(crate) header_row: usize,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            delimiter: b',',
            terminator: b'\n',
            quote: None,
            header_row: 0,
        }
    }
}

impl Format {
    /// Create a new [`Format`] with default configuration: comma-delimited,
    /// newline-terminated, no quoting, header on the first row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    ///
    /// This delimiter must be a single byte.
    ///
    /// Will default to a comma.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the record terminator.
    ///
    /// This terminator must be a single byte. No CRLF normalisation is
    /// performed: with the default `\n`, a preceding `\r` remains part of
    /// the last field of the record.
    ///
    /// Will default to a line feed.
    pub fn terminator(&mut self, terminator: u8) -> &mut Self {
        self.terminator = terminator;
        self
    }

    /// Enable quoting with the given quote byte. Delimiters and terminators
    /// between two quote bytes are then treated as data.
    ///
    /// Off by default.
    pub fn quote(&mut self, quote: u8) -> &mut Self {
        self.quote = Some(quote);
        self
    }

    /// Set the 0-based index of the row holding the headers. Rows before it
    /// are skipped; data starts on the row after it.
    ///
    /// Will default to `0`.
    pub fn header_row(&mut self, header_row: usize) -> &mut Self {
        self.header_row = header_row;
        self
    }
}

/// A DSV reader over a memory-mapped file.
///
/// Construction maps the whole file and runs the header pass; records are
/// then streamed zero-copy through [`parse`](Reader::parse) while a
/// background worker keeps pages resident ahead of the scanner.
#[derive(Debug)]
pub struct Reader {
    view: MappedView,
    format: Format,
    headers: Vec<String>,
    data_offset: usize,
    prefetch_ahead: usize,
}

impl Reader {
    /// Open and map the file at `path`, then capture its headers.
    ///
    /// Fails if the file cannot be opened, stat-ed or mapped; scanning
    /// itself cannot fail.
    pub fn open<P: AsRef<Path>>(path: P, format: Format) -> Result<Self> {
        let view = MappedView::open(path.as_ref())?;
        let header_scan = scan_headers(view.as_bytes(), &format);

        Ok(Self {
            view,
            format,
            headers: header_scan.headers,
            data_offset: header_scan.data_offset,
            prefetch_ahead: DEFAULT_AHEAD,
        })
    }

    /// The captured header names, outer quotes trimmed.
    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of columns, fixed by the header row for the whole parse.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Set how far ahead of the scanner the prefetch worker keeps pages
    /// resident. Defaults to 16 MiB; useful values range from a couple to a
    /// few dozen MiB depending on the storage's fault latency.
    pub fn prefetch_ahead(&mut self, bytes: usize) -> &mut Self {
        self.prefetch_ahead = bytes;
        self
    }

    /// Stream every record to `consumer`.
    ///
    /// Each delivered [`Row`] holds exactly [`column_count`](Reader::column_count)
    /// fields: wider records are silently truncated, narrower ones padded
    /// with empty slices. Fields quoted with the configured quote byte have
    /// the outer quote pair trimmed; doubled quotes are not unescaped. The
    /// slices borrow the mapped file and are only valid during the call.
    ///
    /// The prefetch worker is torn down and joined on every exit path,
    /// including a panicking consumer.
    pub fn parse<F>(&self, mut consumer: F)
    where
        F: FnMut(&Row),
    {
        let data = self.view.as_bytes();

        if self.data_offset >= data.len() {
            return;
        }

        let shared = Shared::new(self.data_offset);

        thread::scope(|scope| {
            scope.spawn(|| shared.run(data, self.data_offset, self.prefetch_ahead));

            // Dropped before the scope joins, so the worker is always told
            // to stop, even when the consumer panics.
            let _stop = ShutdownGuard(&shared);

            scan_records(
                data,
                self.data_offset,
                &self.format,
                self.headers.len(),
                |pos| shared.publish(pos),
                &mut consumer,
            );
        });
    }

    /// Count the records without looking at their fields.
    pub fn count_records(&self) -> u64 {
        let mut count: u64 = 0;

        self.parse(|_| count += 1);

        count
    }
}
