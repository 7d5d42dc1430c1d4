pub mod client;

pub use client::{NsClient, FOUNDERLESS_TAG, PASSWORD_TAG};
