use crate::config::config::{data_dir, RUSTY_DB_PAGE_SIZE_BYTES};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
#[cfg(test)]
use tempfile::NamedTempFile;

/// A page's offset (in page-size units) into the database file.
pub type PageId = u32;

/// A page-sized, page-aligned buffer. Every read from or write to disk moves
/// exactly one of these.
pub type PageBuffer = [u8; RUSTY_DB_PAGE_SIZE_BYTES];

/// Synchronous reader/writer of fixed-size pages keyed by page id. This is
/// the "block device" collaborator of the buffer pool: it knows nothing
/// about pinning, eviction, or dirty tracking, and treats disk I/O as
/// infallible (`expect`s on failure).
#[derive(Debug)]
pub struct DiskManager {
    writer: BufWriter<File>,
    reader: BufReader<File>,
}

impl DiskManager {
    /// Creates a new disk manager for the given database file, e.g. `example.db`,
    /// resolved inside [`crate::config::config::data_dir`].
    pub fn new(filename: &str) -> Self {
        let path = Path::new(data_dir()).join(filename);
        let file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .open(&path)
            .unwrap_or_else(|err| panic!("unable to create or open file {path:?}: {err}"));
        let writer = file
            .try_clone()
            .unwrap_or_else(|err| panic!("unable to clone file {path:?}: {err}"));

        DiskManager {
            writer: BufWriter::new(writer),
            reader: BufReader::new(file),
        }
    }

    pub fn new_with_handle(filename: &str) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new(filename)))
    }

    /// No-op hook: page-id allocation belongs to the owning shard, not the
    /// disk manager. Kept for symmetry with `deallocate_page` and so a
    /// shard can be built against this trait-shaped API without assuming a
    /// particular allocation scheme.
    pub fn allocate_page(&mut self) {}

    /// No-op: this design does not reuse deallocated page ids, so there is
    /// nothing for the disk manager to reclaim.
    pub fn deallocate_page(&mut self, _page_id: PageId) {}

    /// Reads `page_id` into `buffer`. A page that was allocated but never
    /// written to disk reads as past-end-of-file; that's zero-filled rather
    /// than treated as an error, since a page is born in memory and only
    /// reaches disk on its first flush.
    pub fn read_page(&mut self, page_id: PageId, buffer: &mut PageBuffer) {
        let offset = Self::calculate_offset(page_id);
        self.reader
            .seek(SeekFrom::Start(offset))
            .unwrap_or_else(|err| panic!("unable to seek to offset {offset}: {err}"));

        buffer.fill(0);
        let mut read = 0;
        while read < buffer.len() {
            match self.reader.read(&mut buffer[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(err) => panic!("unable to read page {page_id} from disk: {err}"),
            }
        }
    }

    pub fn write_page(&mut self, page_id: PageId, buffer: &PageBuffer) {
        let offset = Self::calculate_offset(page_id);
        self.writer
            .seek(SeekFrom::Start(offset))
            .unwrap_or_else(|err| panic!("unable to seek to offset {offset}: {err}"));
        self.writer
            .write_all(buffer)
            .unwrap_or_else(|err| panic!("unable to write page {page_id} at offset {offset}: {err}"));
        self.writer
            .flush()
            .unwrap_or_else(|err| panic!("unable to flush page {page_id} to disk: {err}"));
    }

    fn calculate_offset(page_id: PageId) -> u64 {
        page_id as u64 * RUSTY_DB_PAGE_SIZE_BYTES as u64
    }

    #[cfg(test)]
    /// Disk manager constructor for tests, backed by a temporary file.
    pub fn new_for_test() -> Self {
        let temp_file = NamedTempFile::new_in(data_dir()).expect("unable to create temp file");
        let writer = temp_file.reopen().expect("unable to reopen temp file");

        DiskManager {
            writer: BufWriter::new(writer),
            reader: BufReader::new(temp_file.into_file()),
        }
    }

    #[cfg(test)]
    pub fn new_with_handle_for_test() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new_for_test()))
    }
}
