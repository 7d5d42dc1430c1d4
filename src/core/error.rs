use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookoutError {
    #[error("Census has no population to estimate over")]
    EmptyDataset,

    #[error("Malformed record #{index} ({name}): {reason}")]
    MalformedRecord {
        index: usize,
        name: String,
        reason: String,
    },

    #[error(
        "Last region {last_name} updated at {last}, before the first region {first_name} at {first}"
    )]
    NonMonotonicUpdate {
        first_name: String,
        first: i64,
        last_name: String,
        last: i64,
    },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LookoutError {
    pub fn malformed(index: usize, name: &str, reason: impl Into<String>) -> Self {
        LookoutError::MalformedRecord {
            index,
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for LookoutError {
    fn from(e: reqwest::Error) -> Self {
        LookoutError::Http(e.to_string())
    }
}

impl From<quick_xml::Error> for LookoutError {
    fn from(e: quick_xml::Error) -> Self {
        LookoutError::Xml(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for LookoutError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        LookoutError::Workbook(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_region() {
        let err = LookoutError::malformed(3, "Lazarus", "NUMNATIONS is not a number");
        let msg = err.to_string();
        assert!(msg.contains("#3"));
        assert!(msg.contains("Lazarus"));
        assert!(msg.contains("NUMNATIONS"));
    }

    #[test]
    fn test_non_monotonic_message_names_regions() {
        let err = LookoutError::NonMonotonicUpdate {
            first_name: "The Pacific".into(),
            first: 2_000,
            last_name: "Lazarus".into(),
            last: 1_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("The Pacific"));
        assert!(msg.contains("Lazarus"));
        assert!(msg.contains("1000"));
    }
}
