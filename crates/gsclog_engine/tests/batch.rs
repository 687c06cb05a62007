use std::fs;

use gsclog_core::{Location, MessageKind};
use gsclog_engine::{load_batch, parse_xml_batch, BatchError};
use tempfile::TempDir;

const XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<messages>
  <message type="error" module="maps/mp/_load.gsc" target="pc">
    <text>unknown function 'foo'</text>
    <location line="10" column="3"/>
    <location line="42" column="1"/>
  </message>
  <message type="warning" module="maps/mp/_util.gsc" target="pc">
    <text>unused variable</text>
  </message>
</messages>
"#;

#[test]
fn xml_batch_keeps_order_and_locations() {
    let batch = parse_xml_batch(XML).unwrap();
    let records: Vec<_> = batch.iter().collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind(), &MessageKind::Error);
    assert_eq!(records[0].text(), "unknown function 'foo'");
    assert_eq!(records[0].module(), "maps/mp/_load.gsc");
    assert_eq!(records[0].target(), "pc");
    assert_eq!(
        records[0].locations(),
        &[
            Location { line: 10, column: 3 },
            Location { line: 42, column: 1 }
        ]
    );
    assert_eq!(records[1].kind(), &MessageKind::Warning);
    assert_eq!(records[1].first_location(), None);
}

#[test]
fn load_batch_picks_reader_by_extension() {
    let temp = TempDir::new().unwrap();
    let xml = temp.path().join("build.XML");
    fs::write(&xml, XML).unwrap();
    let json = temp.path().join("build.json");
    fs::write(
        &json,
        r#"[{"kind":"info","text":"compiled","module":"a.gsc","locations":[{"line":1,"column":2}],"target":"pc"}]"#,
    )
    .unwrap();

    assert_eq!(load_batch(&xml).unwrap().len(), 2);
    let batch = load_batch(&json).unwrap();
    let record = batch.iter().next().unwrap();
    assert_eq!(record.kind(), &MessageKind::Info);
    assert_eq!(record.first_location(), Some(Location { line: 1, column: 2 }));
}

#[test]
fn load_batch_reports_problems() {
    let temp = TempDir::new().unwrap();
    let txt = temp.path().join("build.txt");
    fs::write(&txt, "nothing").unwrap();
    assert!(matches!(load_batch(&txt), Err(BatchError::UnsupportedFormat(_))));

    let missing = temp.path().join("missing.xml");
    assert!(matches!(load_batch(&missing), Err(BatchError::Read { .. })));

    let broken = temp.path().join("broken.json");
    fs::write(&broken, "[{").unwrap();
    assert!(matches!(load_batch(&broken), Err(BatchError::Json(_))));
}
