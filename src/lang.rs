//! Lightweight language identification for revision prompts.
//!
//! The engine only needs a language *name* to steer correction prompts, so a
//! stopword-frequency vote over a handful of common languages is enough. The
//! vote runs once per document over a short sample; unknown or too-short
//! samples stay undetected rather than guessing.

use regex::Regex;

/// Stopword tables per supported language code, in tie-break order.
const STOPWORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "the", "and", "of", "to", "in", "is", "that", "it", "for", "with", "was", "are",
            "this", "not", "have", "from",
        ],
    ),
    (
        "fr",
        &[
            "le", "la", "les", "de", "des", "et", "est", "un", "une", "dans", "que", "qui",
            "pour", "pas", "sur", "avec", "sont", "nous",
        ],
    ),
    (
        "es",
        &[
            "el", "la", "los", "las", "de", "que", "y", "en", "un", "una", "es", "por", "con",
            "para", "del", "se",
        ],
    ),
    (
        "de",
        &[
            "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "mit", "auf", "für",
            "von", "dem", "den", "zu", "sich",
        ],
    ),
    (
        "it",
        &[
            "il", "la", "di", "che", "e", "un", "una", "per", "non", "sono", "con", "del",
            "della", "gli", "nel",
        ],
    ),
    (
        "pt",
        &[
            "o", "a", "os", "as", "de", "que", "e", "do", "da", "em", "um", "uma", "para",
            "com", "não", "por",
        ],
    ),
    (
        "nl",
        &[
            "de", "het", "een", "van", "en", "is", "dat", "niet", "met", "voor", "zijn", "op",
            "aan", "ook",
        ],
    ),
];

/// Minimum stopword hits before a vote is trusted.
const MIN_HITS: usize = 2;

/// Identify the dominant language of a text sample.
///
/// Returns a language code (`"en"`, `"fr"`, ...) or `None` when the sample
/// is too short or matches no table.
pub fn detect(text: &str) -> Option<&'static str> {
    let word = Regex::new(r"[\p{Alphabetic}']+").expect("valid regex");
    let tokens: Vec<String> = word
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect();

    if tokens.is_empty() {
        return None;
    }

    let mut best: Option<(&'static str, usize)> = None;
    for (code, words) in STOPWORDS {
        let hits = tokens.iter().filter(|t| words.contains(&t.as_str())).count();
        if hits >= MIN_HITS && best.map_or(true, |(_, b)| hits > b) {
            best = Some((code, hits));
        }
    }

    best.map(|(code, _)| code)
}

/// Display name for a language code.
///
/// Codes without a known name format as `"unknown (xx)"` so prompts and
/// logs always have something to show.
pub fn language_name(code: &str) -> String {
    let name = match code {
        "en" => "English",
        "fr" => "French",
        "es" => "Spanish",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "nl" => "Dutch",
        "ru" => "Russian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh-cn" => "Chinese (simplified)",
        "zh-tw" => "Chinese (traditional)",
        "ar" => "Arabic",
        "tr" => "Turkish",
        "pl" => "Polish",
        "sv" => "Swedish",
        "da" => "Danish",
        "no" => "Norwegian",
        "fi" => "Finnish",
        _ => return format!("unknown ({code})"),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_english() {
        let text = "The report describes the results of the survey and is ready for review.";
        assert_eq!(detect(text), Some("en"));
    }

    #[test]
    fn test_detect_french() {
        let text = "Le rapport décrit les résultats de l'enquête et il est prêt pour la relecture.";
        assert_eq!(detect(text), Some("fr"));
    }

    #[test]
    fn test_detect_spanish() {
        let text = "El informe describe los resultados de la encuesta y es un documento para el equipo.";
        assert_eq!(detect(text), Some("es"));
    }

    #[test]
    fn test_short_or_empty_sample_is_undetected() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("42 17 99"), None);
        assert_eq!(detect("zzz qqq xxx"), None);
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("fr"), "French");
        assert_eq!(language_name("xx"), "unknown (xx)");
    }
}
