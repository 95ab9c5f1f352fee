//! Player position vocabularies per sport.
//!
//! Only the union vocabulary is enforced when a player is saved; the
//! per-sport lists are exposed so a client can narrow its choices.

use std::collections::HashSet;

/// A `(code, label)` choice.
pub type Choice = (&'static str, &'static str);

/// Value of the "unselected" option that heads the union vocabulary.
pub const EMPTY_CHOICE: Choice = ("", "---------");

pub const DEFAULT_POSITION: &str = "MF";

const FOOTBALL: &[Choice] = &[
    ("GK", "Goalkeeper"),
    ("DF", "Defender"),
    ("MF", "Midfielder"),
    ("FW", "Forward"),
];

const CRICKET: &[Choice] = &[
    ("BAT", "Batsman"),
    ("BWL", "Bowler"),
    ("AR", "All-rounder"),
    ("WK", "Wicketkeeper"),
];

const RUGBY: &[Choice] = &[
    ("PR", "Prop"),
    ("HK", "Hooker"),
    ("LO", "Lock"),
    ("FL", "Flanker"),
    ("SH", "Scrum-half"),
    ("FH", "Fly-half"),
    ("CE", "Centre"),
    ("WG", "Wing"),
    ("FB", "Fullback"),
];

const BADMINTON: &[Choice] = &[
    ("MS", "Men's Singles"),
    ("WS", "Women's Singles"),
    ("MD", "Men's Doubles"),
    ("WD", "Women's Doubles"),
    ("XD", "Mixed Doubles"),
];

const BASEBALL: &[Choice] = &[
    ("P", "Pitcher"),
    ("C", "Catcher"),
    ("1B", "First Base"),
    ("2B", "Second Base"),
    ("3B", "Third Base"),
    ("SS", "Shortstop"),
    ("LF", "Left Field"),
    ("CF", "Center Field"),
    ("RF", "Right Field"),
];

/// Sport key -> positions, in union order.
pub const SPORT_POSITIONS: &[(&str, &[Choice])] = &[
    ("football", FOOTBALL),
    ("cricket", CRICKET),
    ("rugby", RUGBY),
    ("badminton", BADMINTON),
    ("baseball", BASEBALL),
];

/// Lowercase canonical key for a sport slug or name, e.g. `"Football "` -> `"football"`.
pub fn sport_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Positions for one sport, or `None` for sports without a vocabulary.
pub fn positions_for(sport_name: &str) -> Option<&'static [Choice]> {
    let key = sport_key(sport_name);
    SPORT_POSITIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, choices)| *choices)
}

/// Every sport's positions in first-seen order, deduplicated by code and
/// headed by [`EMPTY_CHOICE`].
pub fn union_choices() -> Vec<Choice> {
    let mut seen = HashSet::new();
    let mut out = vec![EMPTY_CHOICE];
    for (_, choices) in SPORT_POSITIONS {
        for choice in choices.iter() {
            if seen.insert(choice.0) {
                out.push(*choice);
            }
        }
    }
    out
}

/// Whether `code` is a real position (the empty option is not).
pub fn is_valid_position(code: &str) -> bool {
    !code.is_empty() && union_choices().iter().any(|(c, _)| *c == code)
}

/// Label for a stored code, falling back to the code itself.
pub fn position_label(code: &str) -> &str {
    SPORT_POSITIONS
        .iter()
        .flat_map(|(_, choices)| choices.iter())
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}
