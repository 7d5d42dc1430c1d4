//! Decoding of downloaded census and status-list documents

pub mod dump;
pub mod tags;

pub use dump::{parse_dump, parse_gzipped_dump, read_dump_file};
pub use tags::parse_region_list;
