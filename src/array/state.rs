// Array state classification from kernel status text.

use crate::models::{ArrayState, Protection};

use super::ini::parse_pair;

const MD_STATE: &str = "mdState";
const MD_NUM_PROTECTED: &str = "mdNumProtected";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayVerdict {
    pub state: ArrayState,
    pub protection: Protection,
}

impl ArrayVerdict {
    pub fn new(state: ArrayState, protection: Protection) -> Self {
        Self { state, protection }
    }

    /// Used when no state source could be read: an array with at least one
    /// enumerated disk is taken to be started and protected.
    pub fn inferred_from_disks(any_disk: bool) -> Self {
        if any_disk {
            Self::new(ArrayState::Started, Protection::Protected)
        } else {
            Self::new(ArrayState::Stopped, Protection::NotProtected)
        }
    }
}

/// Dispatches on content shape: `mdState=`/`mdNumProtected=` lines mean a key
/// list, anything else is treated as mdstat-like free text.
pub fn classify(text: &str) -> ArrayVerdict {
    if is_key_list(text) {
        classify_key_list(text)
    } else {
        classify_free_text(text)
    }
}

fn is_key_list(text: &str) -> bool {
    text.lines()
        .filter_map(|line| line.trim_start().split_once('='))
        .any(|(key, _)| matches!(key.trim(), MD_STATE | MD_NUM_PROTECTED))
}

/// `mdState` is reported verbatim; protection is `Protected` when
/// `mdNumProtected` parses as a positive integer. Absent keys stay `Unknown`.
pub fn classify_key_list(text: &str) -> ArrayVerdict {
    let mut verdict = ArrayVerdict::default();
    for (key, value) in text.lines().filter_map(|l| parse_pair(l.trim())) {
        match key.as_str() {
            MD_STATE => verdict.state = ArrayState::from(value),
            MD_NUM_PROTECTED => {
                verdict.protection = match value.parse::<i64>() {
                    Ok(n) if n > 0 => Protection::Protected,
                    _ => Protection::NotProtected,
                }
            }
            _ => {}
        }
    }
    verdict
}

/// Case-sensitive substring match. `inactive` is checked first because it
/// contains `active`.
pub fn classify_free_text(text: &str) -> ArrayVerdict {
    if text.contains("inactive") {
        ArrayVerdict::new(ArrayState::Stopped, Protection::NotProtected)
    } else if text.contains("active") {
        ArrayVerdict::new(ArrayState::Started, Protection::Protected)
    } else {
        ArrayVerdict::default()
    }
}
