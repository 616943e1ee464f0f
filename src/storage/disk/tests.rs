use crate::config::config::{data_dir, RUSTY_DB_PAGE_SIZE_BYTES};
use crate::storage::disk::disk_manager::{DiskManager, PageBuffer};
use tempfile::NamedTempFile;

fn new_disk_manager() -> DiskManager {
    DiskManager::new_for_test()
}

fn buffer_filled_with(byte: u8) -> PageBuffer {
    [byte; RUSTY_DB_PAGE_SIZE_BYTES]
}

#[test]
fn write_and_read_page_round_trips() {
    let mut dm = new_disk_manager();
    let written = buffer_filled_with(0x42);

    dm.write_page(0, &written);

    let mut read_back = [0u8; RUSTY_DB_PAGE_SIZE_BYTES];
    dm.read_page(0, &mut read_back);
    assert_eq!(read_back, written);
}

#[test]
fn data_persists_across_disk_manager_instances() {
    let temp_file = NamedTempFile::new_in(data_dir()).expect("unable to create temp file");
    let file_name = temp_file
        .path()
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    let written = buffer_filled_with(0x7A);

    {
        let mut dm = DiskManager::new(&file_name);
        dm.write_page(0, &written);
    }
    {
        let mut dm = DiskManager::new(&file_name);
        let mut read_back = [0u8; RUSTY_DB_PAGE_SIZE_BYTES];
        dm.read_page(0, &mut read_back);
        assert_eq!(read_back, written);
    }
}

#[test]
fn multiple_pages_retain_independent_contents() {
    let mut dm = new_disk_manager();
    let num_pages = 5;
    let buffers: Vec<PageBuffer> = (0..num_pages)
        .map(|i| buffer_filled_with(i as u8))
        .collect();

    for (page_id, buffer) in buffers.iter().enumerate() {
        dm.write_page(page_id as u32, buffer);
    }

    for (page_id, expected) in buffers.iter().enumerate() {
        let mut read_back = [0u8; RUSTY_DB_PAGE_SIZE_BYTES];
        dm.read_page(page_id as u32, &mut read_back);
        assert_eq!(&read_back, expected);
    }
}
