use anyhow::Result;
use sexptree::read::{read_file, read_str, write_file};
use std::path::Path;

#[test]
fn file_roundtrip() -> Result<()> {
    let path = std::env::temp_dir().join("sexptree-test-roundtrip.scm");
    let doc = read_str("(a (b c)) d")?;
    write_file(&path, &doc)?;
    let reread = read_file(&path)?;
    std::fs::remove_file(&path)?;
    assert_eq!(reread, doc);
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let e = read_file(Path::new("/nonexistent/sexptree-test.scm")).unwrap_err();
    assert!(e.to_string().contains("sexptree-test.scm"));
}

#[test]
fn parse_error_reports_file_and_position() -> Result<()> {
    let path = std::env::temp_dir().join("sexptree-test-bad.scm");
    std::fs::write(&path, "(a\n(b")?;
    let e = read_file(&path).unwrap_err();
    std::fs::remove_file(&path)?;
    let msg = e.to_string();
    assert!(msg.contains("not enough s-expressions"));
    assert!(msg.contains("sexptree-test-bad.scm"));
    assert!(msg.contains("@2.1"));
    Ok(())
}
