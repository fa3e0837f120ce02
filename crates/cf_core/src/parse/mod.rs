//! Deterministic freeform-text parser
//!
//! Turns a play description like `"3rd & 7 Q4 2:00 at KC 35, play action
//! deep shot right"` into a validated `PlaySpec`. Pure pattern matching
//! over word tokens and digit runs; unknown fields fall back to the
//! documented defaults rather than failing.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    ActionSpec, ActionType, HashMark, PassArea, PassDepth, Personnel, PlaySpec, StateSpec,
};

/// Freeform parse request: the raw text plus the two team codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    pub text: String,
    pub offense: String,
    pub defense: String,
}

/// Structured spec plus any autofix/advisory warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub spec: PlaySpec,
    pub warnings: Vec<String>,
}

/// Action keywords in priority order; first substring hit wins.
const ACTION_KEYWORDS: &[(&str, ActionType)] = &[
    ("field goal", ActionType::FieldGoal),
    ("fg", ActionType::FieldGoal),
    ("punt", ActionType::Punt),
    ("sneak", ActionType::QbSneak),
    ("spike", ActionType::Spike),
    ("kneel", ActionType::Kneel),
    ("trick", ActionType::Trick),
    ("pass", ActionType::Pass),
    ("throw", ActionType::Pass),
    ("rush", ActionType::Run),
    ("run", ActionType::Run),
    ("carry", ActionType::Run),
    ("handoff", ActionType::Run),
    ("draw", ActionType::Run),
    ("inside zone", ActionType::Run),
    ("outside zone", ActionType::Run),
];

/// Depth hints scanned in order; a later hit overrides an earlier one.
const PASS_DEPTH_HINTS: &[(&str, PassDepth)] = &[
    ("screen", PassDepth::Screen),
    ("quick", PassDepth::Short),
    ("short", PassDepth::Short),
    ("slant", PassDepth::Short),
    ("intermediate", PassDepth::Intermediate),
    ("dig", PassDepth::Intermediate),
    ("deep", PassDepth::Deep),
    ("shot", PassDepth::Deep),
    ("go route", PassDepth::Deep),
    ("post", PassDepth::Deep),
];

const PASS_AREA_HINTS: &[(&str, PassArea)] = &[
    ("left", PassArea::Left),
    ("middle", PassArea::Middle),
    ("right", PassArea::Right),
];

/// Alphanumeric word tokens in document order.
fn word_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whole-word containment (token equality, case-insensitive).
fn has_word(text: &str, word: &str) -> bool {
    word_tokens(text).iter().any(|t| t.eq_ignore_ascii_case(word))
}

fn parse_down(text: &str) -> u8 {
    for tok in word_tokens(text) {
        match tok.to_ascii_lowercase().as_str() {
            "1st" | "first" => return 1,
            "2nd" | "second" => return 2,
            "3rd" | "third" => return 3,
            "4th" | "fourth" => return 4,
            _ => {}
        }
    }
    1
}

/// `& N` with N a one- or two-digit run.
fn parse_distance(text: &str) -> i32 {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'&' {
            continue;
        }
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        let digits = j - start;
        if digits >= 1 && digits <= 2 {
            if let Ok(v) = text[start..j].parse() {
                return v;
            }
        }
    }
    10
}

/// `Q1`..`Q4` as a standalone token.
fn parse_quarter(text: &str) -> u8 {
    for tok in word_tokens(text) {
        let t = tok.as_bytes();
        if t.len() == 2 && (t[0] == b'Q' || t[0] == b'q') && (b'1'..=b'4').contains(&t[1]) {
            return (t[1] - b'0') as u8;
        }
    }
    1
}

/// `MM:SS` with SS in 00..59; clamped to one quarter.
fn parse_clock_seconds(text: &str) -> i32 {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b':' {
            continue;
        }
        // minutes: one or two digits, not preceded by another digit
        let mut m_start = i;
        while m_start > 0 && bytes[m_start - 1].is_ascii_digit() {
            m_start -= 1;
        }
        let m_len = i - m_start;
        if m_len == 0 || m_len > 2 {
            continue;
        }
        // seconds: exactly two digits, leading 0-5, not followed by a digit
        let s_start = i + 1;
        let s_end = s_start + 2;
        if s_end > bytes.len()
            || !bytes[s_start].is_ascii_digit()
            || !bytes[s_start + 1].is_ascii_digit()
            || bytes[s_start] > b'5'
            || (s_end < bytes.len() && bytes[s_end].is_ascii_digit())
        {
            continue;
        }
        let minutes: i32 = text[m_start..i].parse().unwrap_or(0);
        let seconds: i32 = text[s_start..s_end].parse().unwrap_or(0);
        return (minutes * 60 + seconds).clamp(0, 900);
    }
    900
}

fn parse_hash(text: &str) -> HashMark {
    for tok in word_tokens(text) {
        if tok.eq_ignore_ascii_case("left") {
            return HashMark::Left;
        }
        if tok.eq_ignore_ascii_case("right") {
            return HashMark::Right;
        }
        if tok.eq_ignore_ascii_case("middle") {
            return HashMark::Middle;
        }
    }
    HashMark::Middle
}

/// Tokens with trailing digit runs split off, so `own25` and `KC35`
/// read the same as their spaced forms.
fn yardline_tokens(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for tok in word_tokens(text) {
        let split = tok.find(|c: char| c.is_ascii_digit());
        match split {
            Some(pos) if pos > 0 && tok[pos..].bytes().all(|b| b.is_ascii_digit()) => {
                out.push(&tok[..pos]);
                out.push(&tok[pos..]);
            }
            _ => out.push(tok),
        }
    }
    out
}

/// One- or two-digit number directly following a marker word.
fn number_after_word(text: &str, markers: &[&str]) -> Option<i32> {
    let toks = yardline_tokens(text);
    for (i, tok) in toks.iter().enumerate() {
        if markers.iter().any(|&m| tok.eq_ignore_ascii_case(m)) {
            if let Some(next) = toks.get(i + 1) {
                if next.len() <= 2 && next.bytes().all(|b| b.is_ascii_digit()) {
                    return next.parse().ok();
                }
            }
        }
    }
    None
}

/// Yardline in "100 minus" convention: `own 25` → 75, `opp 30` → 30,
/// `KC 35` → side depends on which team KC is. Defaults to own 25.
fn parse_yardline_100(text: &str, offense: &str, defense: &str) -> i32 {
    if let Some(n) = number_after_word(text, &["own"]) {
        return 100 - n;
    }
    if let Some(n) = number_after_word(text, &["opp", "opponent"]) {
        return n;
    }
    // uppercase team code (2-5 letters) followed by a yard number
    let toks = yardline_tokens(text);
    for (i, tok) in toks.iter().enumerate() {
        let is_code = (2..=5).contains(&tok.len())
            && tok.bytes().all(|b| b.is_ascii_uppercase());
        if !is_code {
            continue;
        }
        if let Some(next) = toks.get(i + 1) {
            if next.len() <= 2 && next.bytes().all(|b| b.is_ascii_digit()) {
                let yd: i32 = match next.parse() {
                    Ok(v) => v,
                    Err(_) => continue,
                };
                if tok.eq_ignore_ascii_case(offense) {
                    return 100 - yd;
                }
                return yd;
            }
        }
    }
    75
}

fn parse_action(text: &str) -> ActionSpec {
    let lower = text.to_ascii_lowercase();
    let mut action_type = ActionType::Run;
    for &(kw, t) in ACTION_KEYWORDS {
        if lower.contains(kw) {
            action_type = t;
            break;
        }
    }

    let mut pass_depth = None;
    let mut pass_area = None;
    if action_type == ActionType::Pass {
        for &(kw, depth) in PASS_DEPTH_HINTS {
            if lower.contains(kw) {
                pass_depth = Some(depth);
            }
        }
        for &(kw, area) in PASS_AREA_HINTS {
            if has_word(&lower, kw) {
                pass_area = Some(area);
            }
        }
    }

    let play_action = lower.contains("play-action") || lower.contains("play action");

    let personnel = word_tokens(text)
        .into_iter()
        .find_map(Personnel::from_code);

    ActionSpec {
        action_type,
        pass_depth,
        pass_area,
        play_action,
        personnel_offense: personnel,
        route_concept: None,
    }
}

/// Parse freeform text into a validated, autofixed `PlaySpec`.
pub fn parse_freeform_to_spec(req: &ParseRequest) -> Result<ParseResponse> {
    let text = &req.text;
    let offense = req.offense.to_uppercase();
    let defense = req.defense.to_uppercase();

    let state = StateSpec {
        quarter: parse_quarter(text),
        clock_seconds: parse_clock_seconds(text),
        down: parse_down(text),
        distance: parse_distance(text),
        yardline_100: parse_yardline_100(text, &offense, &defense),
        hash: parse_hash(text),
        offense,
        defense,
        off_timeouts: 3,
        def_timeouts: 3,
        score_off: 0,
        score_def: 0,
    };
    let action = parse_action(text);

    let mut spec = PlaySpec {
        state,
        action,
        context: None,
    };
    spec.validate()?;
    let warnings = spec.autofix();
    Ok(ParseResponse { spec, warnings })
}
