//! Raw census entry as decoded from the region dump
//!
//! Every field is kept as the text the dump carried. Numeric parsing and
//! sentinel handling happen when a `Region` is built from the record.

/// One `<REGION>` of the daily dump, field values untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionRecord {
    pub name: String,
    pub factbook: String,
    pub numnations: String,
    pub delegate: String,
    pub delegate_auth: String,
    pub delegate_votes: String,
    pub founder: String,
    pub founder_auth: String,
    pub last_update: String,
    pub embassies: Vec<String>,
}

impl RegionRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Store the text of a `<REGION>` child element by its tag name.
    ///
    /// Returns false for tags the census model does not use.
    pub fn set_field(&mut self, tag: &str, value: String) -> bool {
        let slot = match tag {
            "NAME" => &mut self.name,
            "FACTBOOK" => &mut self.factbook,
            "NUMNATIONS" => &mut self.numnations,
            "DELEGATE" => &mut self.delegate,
            "DELEGATEAUTH" => &mut self.delegate_auth,
            "DELEGATEVOTES" => &mut self.delegate_votes,
            "FOUNDER" => &mut self.founder,
            "FOUNDERAUTH" => &mut self.founder_auth,
            "LASTUPDATE" => &mut self.last_update,
            _ => return false,
        };
        *slot = value;
        true
    }
}
