use std::collections::BTreeMap;

use crate::api::models::MatchDto;

/// Queue id of Ranked Solo/Duo, the only queue that is classified.
pub const RANKED_SOLO_DUO: i32 = 420;

pub fn queue_name(queue_id: i32) -> String {
    let name = match queue_id {
        400 => "Normal Draft",
        420 => "Ranked Solo/Duo",
        430 => "Normal Blind",
        440 => "Ranked Flex",
        450 => "ARAM",
        700 => "Clash",
        830 => "Co-op vs AI (Intro)",
        840 => "Co-op vs AI (Beginner)",
        850 => "Co-op vs AI (Intermediate)",
        900 | 1900 => "URF",
        1020 => "One for All",
        1300 => "Nexus Blitz",
        1400 => "Ultimate Spellbook",
        _ => return format!("Queue ID {}", queue_id),
    };
    name.to_string()
}

/// Games per queue id across every fetched match, ranked or not.
pub fn mode_distribution<'a, I>(matches: I) -> BTreeMap<i32, usize>
where
    I: IntoIterator<Item = &'a MatchDto>,
{
    let mut modes = BTreeMap::new();
    for m in matches {
        *modes.entry(m.info.queue_id).or_insert(0) += 1;
    }
    modes
}

pub fn is_ranked(m: &MatchDto) -> bool {
    m.info.queue_id == RANKED_SOLO_DUO
}
