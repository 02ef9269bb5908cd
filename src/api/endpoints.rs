// URL builders for the account and match endpoints.
// `routing` is the regional host (`europe`, `americas`, ...), not the platform.

/// Largest page the match-id endpoint serves.
pub const MATCH_IDS_PAGE_SIZE: usize = 100;

pub fn account_by_riot_id(routing: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/riot/account/v1/accounts/by-riot-id/{}/{}",
        routing,
        urlencoding::encode(game_name),
        urlencoding::encode(tag_line)
    )
}

pub fn account_by_puuid(routing: &str, puuid: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/riot/account/v1/accounts/by-puuid/{}",
        routing, puuid
    )
}

pub fn match_ids_by_puuid(routing: &str, puuid: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids",
        routing, puuid
    )
}

pub fn match_by_id(routing: &str, match_id: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
        routing, match_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn riot_id_segments_are_percent_encoded() {
        assert_eq!(
            account_by_riot_id("europe", "Hide on bush", "KR1"),
            "https://europe.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Hide%20on%20bush/KR1"
        );
        assert!(account_by_riot_id("europe", "Ñandú", "EUW").ends_with("/%C3%91and%C3%BA/EUW"));
        assert!(account_by_riot_id("europe", "a/b", "#1").ends_with("/a%2Fb/%231"));
    }

    #[test]
    fn match_urls_use_regional_host() {
        assert_eq!(
            match_by_id("americas", "NA1_42"),
            "https://americas.api.riotgames.com/lol/match/v5/matches/NA1_42"
        );
        assert!(match_ids_by_puuid("europe", "abc").ends_with("/by-puuid/abc/ids"));
    }
}
