use serde::{Deserialize, Serialize};

/// Public view of a registered user. The password hash never leaves the
/// identity directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub is_premium: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: u64,
    pub body: String,
    pub author_id: u64,
}

/// Ordering of chirp listings by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses the `sort` query value. Anything other than `desc` is ascending.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub(crate) fn sort(self, chirps: &mut [Chirp]) {
        match self {
            SortOrder::Asc => chirps.sort_by(|a, b| a.id.cmp(&b.id)),
            SortOrder::Desc => chirps.sort_by(|a, b| b.id.cmp(&a.id)),
        }
    }
}
