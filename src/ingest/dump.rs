//! Decode the daily region dump into `RegionRecord`s
//!
//! The dump is a gzipped `<REGIONS>` document with one `<REGION>` per region
//! in update order. Only direct children of `<REGION>` and the `<EMBASSY>`
//! entries under `<EMBASSIES>` are read; everything else is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::error::Result;
use crate::region::RegionRecord;

const REGION_TAG: &str = "REGION";
const EMBASSIES_TAG: &str = "EMBASSIES";
const EMBASSY_TAG: &str = "EMBASSY";

/// Parse an uncompressed dump, preserving document order
pub fn parse_dump<R: BufRead>(input: R) -> Result<Vec<RegionRecord>> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut current: Option<RegionRecord> = None;
    let mut records = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if path.len() == 1 && tag == REGION_TAG {
                    current = Some(RegionRecord::default());
                }
                path.push(tag);
                text.clear();
            }
            Event::Empty(e) => {
                if let (Some(record), 2) = (current.as_mut(), path.len()) {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    record.set_field(&tag, String::new());
                }
            }
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
            Event::End(_) => {
                let tag = path.pop().unwrap_or_default();
                match path.len() {
                    1 if tag == REGION_TAG => {
                        if let Some(record) = current.take() {
                            records.push(record);
                        }
                    }
                    2 => {
                        if let Some(record) = current.as_mut() {
                            record.set_field(&tag, std::mem::take(&mut text));
                        }
                    }
                    3 if tag == EMBASSY_TAG && path[2] == EMBASSIES_TAG => {
                        if let Some(record) = current.as_mut() {
                            record.embassies.push(std::mem::take(&mut text));
                        }
                    }
                    _ => {}
                }
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!("Parsed {} region records", records.len());
    Ok(records)
}

/// Parse a gzipped dump held in memory
pub fn parse_gzipped_dump(bytes: &[u8]) -> Result<Vec<RegionRecord>> {
    parse_dump(BufReader::new(GzDecoder::new(bytes)))
}

/// Parse a dump from disk, gunzipping it when the file name ends in `.gz`
pub fn read_dump_file(path: &Path) -> Result<Vec<RegionRecord>> {
    let file = File::open(path)?;
    let gzipped = path.extension().map_or(false, |ext| ext == "gz");
    if gzipped {
        parse_dump(BufReader::new(GzDecoder::new(file)))
    } else {
        parse_dump(BufReader::new(file))
    }
}
