//! Decode `regionsbytag` API responses into sets of region names

use std::collections::HashSet;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::error::{LookoutError, Result};

/// Parse `<WORLD><REGIONS>a,b,c</REGIONS></WORLD>` into `{a, b, c}`
pub fn parse_region_list(xml: &str) -> Result<HashSet<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut inside = false;
    let mut found = false;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"REGIONS" => {
                inside = true;
                found = true;
            }
            Event::Empty(e) if e.name().as_ref() == b"REGIONS" => found = true,
            Event::Text(e) if inside => text.push_str(&e.unescape()?),
            Event::End(e) if e.name().as_ref() == b"REGIONS" => inside = false,
            Event::Eof => break,
            _ => {}
        }
    }

    if !found {
        return Err(LookoutError::Xml("response has no REGIONS element".into()));
    }

    Ok(split_names(&text))
}

fn split_names(list: &str) -> HashSet<String> {
    list.split(',')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let names =
            parse_region_list("<WORLD>\n<REGIONS>Lazarus,The Pacific,Osiris</REGIONS>\n</WORLD>")
                .unwrap();
        assert_eq!(names.len(), 3);
        assert!(names.contains("Lazarus"));
        assert!(names.contains("The Pacific"));
        assert!(names.contains("Osiris"));
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_region_list("<WORLD><REGIONS></REGIONS></WORLD>").unwrap().is_empty());
        assert!(parse_region_list("<WORLD><REGIONS/></WORLD>").unwrap().is_empty());
    }

    #[test]
    fn test_entities_unescaped() {
        let names = parse_region_list("<WORLD><REGIONS>Cats &amp; Dogs</REGIONS></WORLD>").unwrap();
        assert!(names.contains("Cats & Dogs"));
    }

    #[test]
    fn test_missing_regions_element() {
        assert!(matches!(
            parse_region_list("<WORLD><NATIONS>x</NATIONS></WORLD>"),
            Err(LookoutError::Xml(_))
        ));
    }
}
