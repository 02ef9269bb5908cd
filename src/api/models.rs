use serde::Deserialize;

// Account V1 response
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

impl AccountDto {
    /// `gameName#tagLine`, with `UNKNOWN` standing in for missing parts.
    pub fn riot_id(&self) -> String {
        format!(
            "{}#{}",
            self.game_name.as_deref().unwrap_or("UNKNOWN"),
            self.tag_line.as_deref().unwrap_or("UNKNOWN")
        )
    }
}

// Match V5 response
#[derive(Debug, Deserialize, Clone)]
pub struct MatchDto {
    #[serde(default)]
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    #[serde(default)]
    pub match_id: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default)]
    pub queue_id: i32,
    /// Epoch milliseconds.
    #[serde(default)]
    pub game_creation: i64,
    /// Seconds.
    #[serde(default)]
    pub game_duration: i64,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    #[serde(default)]
    pub summoner_name: String,
    #[serde(default)]
    pub riot_id_game_name: String,
    #[serde(default)]
    pub riot_id_tagline: String,
    #[serde(default)]
    pub champion_name: String,
    #[serde(default)]
    pub team_id: i32,
    #[serde(default)]
    pub win: bool,
    #[serde(default)]
    pub individual_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
}

impl ParticipantDto {
    /// Name carried in the match payload itself, if any.
    pub fn display_name(&self) -> Option<String> {
        if !self.summoner_name.is_empty() {
            Some(self.summoner_name.clone())
        } else if !self.riot_id_game_name.is_empty() {
            if self.riot_id_tagline.is_empty() {
                Some(self.riot_id_game_name.clone())
            } else {
                Some(format!("{}#{}", self.riot_id_game_name, self.riot_id_tagline))
            }
        } else {
            None
        }
    }
}

impl MatchDto {
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }

    /// Same-team participants other than `puuid`, in payload order.
    pub fn teammates_of(&self, puuid: &str) -> Vec<&ParticipantDto> {
        match self.participant(puuid) {
            Some(me) => self
                .info
                .participants
                .iter()
                .filter(|p| p.team_id == me.team_id && p.puuid != puuid)
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_missing_optional_fields() {
        let body = r#"{
            "metadata": {"matchId": "EUW1_1"},
            "info": {"queueId": 420, "participants": [{"puuid": "p1"}]}
        }"#;
        let m: MatchDto = serde_json::from_str(body).unwrap();
        assert_eq!(m.metadata.match_id, "EUW1_1");
        assert_eq!(m.info.game_duration, 0);
        assert!(!m.info.participants[0].win);
        assert_eq!(m.info.participants[0].display_name(), None);
    }

    #[test]
    fn payload_without_info_is_rejected() {
        let body = r#"{"metadata": {"matchId": "EUW1_1"}}"#;
        assert!(serde_json::from_str::<MatchDto>(body).is_err());
    }

    #[test]
    fn display_name_prefers_summoner_name_then_riot_id() {
        let mut p = ParticipantDto {
            puuid: "p".into(),
            riot_id_game_name: "Alice".into(),
            riot_id_tagline: "EUW".into(),
            ..Default::default()
        };
        assert_eq!(p.display_name().as_deref(), Some("Alice#EUW"));
        p.summoner_name = "Ally".into();
        assert_eq!(p.display_name().as_deref(), Some("Ally"));
    }

    #[test]
    fn account_riot_id_falls_back_to_unknown() {
        let account: AccountDto = serde_json::from_str(r#"{"puuid": "x", "gameName": "Bob"}"#).unwrap();
        assert_eq!(account.riot_id(), "Bob#UNKNOWN");
    }
}
