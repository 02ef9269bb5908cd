use std::io::{self, BufRead, Write};

/// Game count used when the answer is not a number.
pub const DEFAULT_GAME_COUNT: usize = 500;

pub struct PlayerQuery {
    pub name: String,
    pub tag: String,
    pub games: usize,
}

pub fn parse_game_count(raw: &str) -> usize {
    raw.trim().parse().unwrap_or(DEFAULT_GAME_COUNT)
}

/// Prints `question` and returns the trimmed answer. EOF yields an
/// `UnexpectedEof` error so callers can stop looping.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

pub fn ask_player<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<PlayerQuery> {
    let name = ask(input, output, "Enter Riot Summoner Name: ")?;
    let tag = ask(input, output, "Enter Riot Tag: ")?;
    let games = parse_game_count(&ask(input, output, "Number of games to analyze: ")?);
    Ok(PlayerQuery { name, tag, games })
}

/// `y`, `Y` or an empty answer means another round.
pub fn ask_repeat<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> bool {
    match ask(input, output, "\nWould you like to perform another analysis? (Y/n): ") {
        Ok(answer) => matches!(answer.to_lowercase().as_str(), "y" | ""),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn non_numeric_game_count_defaults() {
        assert_eq!(parse_game_count("42"), 42);
        assert_eq!(parse_game_count(" 7 "), 7);
        assert_eq!(parse_game_count("lots"), 500);
        assert_eq!(parse_game_count(""), 500);
        assert_eq!(parse_game_count("-3"), 500);
    }

    #[test]
    fn reads_three_answers() {
        let mut input = Cursor::new("Hide on bush\nKR1\nabc\n");
        let mut output = Vec::new();
        let query = ask_player(&mut input, &mut output).unwrap();
        assert_eq!(query.name, "Hide on bush");
        assert_eq!(query.tag, "KR1");
        assert_eq!(query.games, 500);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Enter Riot Tag: "));
    }

    #[test]
    fn repeat_prompt_accepts_yes_and_empty() {
        for (answer, expected) in [("y\n", true), ("Y\n", true), ("\n", true), ("n\n", false), ("nope\n", false), ("", false)] {
            let mut input = Cursor::new(answer);
            assert_eq!(ask_repeat(&mut input, &mut Vec::new()), expected, "answer {:?}", answer);
        }
    }
}
