use std::fs;

use gsclog_engine::AtomicFileWriter;
use tempfile::TempDir;

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("gsclog_settings.ron", "one").unwrap();
    assert_eq!(first.file_name().unwrap(), "gsclog_settings.ron");
    assert_eq!(fs::read_to_string(&first).unwrap(), "one");

    let second = writer.write("gsclog_settings.ron", "two").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "two");
}

#[test]
fn writing_into_a_file_path_fails_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("gsclog_settings.ron", "data").is_err());
    assert!(!file_path.with_file_name("gsclog_settings.ron").exists());
}
