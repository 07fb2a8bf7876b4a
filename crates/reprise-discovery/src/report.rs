use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::Result;

/// Extracts candidate identifiers from a JUnit-style XML report file
/// (Surefire / Ant `TESTS-TestSuites.xml`).
pub fn scan_report_file(path: &Path, on_candidate: impl FnMut(String)) -> Result<()> {
    let xml = fs::read_to_string(path)?;
    scan_report_str(&xml, on_candidate)
}

/// Streams start-tag events over the document; every `testcase` element
/// contributes the value of its `classname` attribute. All other structure
/// is ignored.
pub fn scan_report_str(xml: &str, mut on_candidate: impl FnMut(String)) -> Result<()> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => {
                if e.name().as_ref() == b"testcase" {
                    let mut classname = None;
                    for attr in e.attributes().with_checks(false) {
                        let attr = attr?;
                        if attr.key.as_ref() == b"classname" {
                            classname = Some(attr.unescape_value()?.to_string());
                        }
                    }
                    match classname {
                        Some(name) => on_candidate(name),
                        None => tracing::debug!(
                            target: "reprise.discovery",
                            "testcase element without classname attribute"
                        ),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(())
}
