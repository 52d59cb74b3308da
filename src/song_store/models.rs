use serde::{Deserialize, Serialize};

/// A catalog entry. `id` is assigned by the store on insert; any
/// caller-supplied value is ignored there and only meaningful for updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub id: i64,
    pub group_name: String,
    pub song_name: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Optional equality constraints for fetching songs. An absent field
/// imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
}
