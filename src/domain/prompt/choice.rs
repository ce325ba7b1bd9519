//! Matching a transcript against the choices offered to the caller.

use super::request::Choice;

/// Lowercases a transcript and strips the sentence punctuation recognizers
/// append to short utterances.
pub fn normalize_transcript(text: &str) -> String {
    text.trim()
        .trim_end_matches(['.', '!', '?', ','])
        .trim()
        .to_lowercase()
}

/// Adds each choice's zero-based ordinal and normalized name to its
/// variants, so "one", "One" and "0" all pick the first choice.
pub fn expand_choice_variants(choices: &mut [Choice]) {
    for (ordinal, choice) in choices.iter_mut().enumerate() {
        for variant in [ordinal.to_string(), normalize_transcript(&choice.name)] {
            if !choice.variants.contains(&variant) {
                choice.variants.push(variant);
            }
        }
    }
}

/// Finds the choice the caller named.
///
/// Names and variants go through the same normalization as the transcript,
/// so punctuated names like "Dr." still match. Also accepts the choice's
/// zero-based ordinal. The first matching choice wins.
pub fn select_choice<'a>(transcript: &str, choices: &'a [Choice]) -> Option<&'a Choice> {
    let spoken = normalize_transcript(transcript);
    if spoken.is_empty() {
        return None;
    }

    choices.iter().enumerate().find_map(|(ordinal, choice)| {
        let matched = normalize_transcript(&choice.name) == spoken
            || ordinal.to_string() == spoken
            || choice.variants.iter().any(|v| normalize_transcript(v) == spoken);
        matched.then_some(choice)
    })
}
