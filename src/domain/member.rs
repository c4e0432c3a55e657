use serde::{Deserialize, Serialize};

pub type MemberId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

/// Normalize a member name as typed by a user.
/// Returns `None` when nothing is left after trimming.
pub fn normalize_member_name(input: &str) -> Option<String> {
    let name = input.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
