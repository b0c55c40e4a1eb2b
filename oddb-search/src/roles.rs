//! Classification of raw cast/crew role labels.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::PersonType;

static ROLE_TABLE: LazyLock<HashMap<&'static str, PersonType>> = LazyLock::new(|| {
    HashMap::from([
        ("导演", PersonType::Director),
        ("演员", PersonType::Actor),
        ("配音", PersonType::Actor),
        ("编剧", PersonType::Writer),
        ("制片人", PersonType::Producer),
        ("作曲", PersonType::Composer),
    ])
});

/// Maps a raw role label to the person taxonomy.
///
/// Unknown labels are treated as actors.
pub fn classify_role(label: &str) -> PersonType {
    ROLE_TABLE
        .get(label.trim())
        .copied()
        .unwrap_or(PersonType::Actor)
}
