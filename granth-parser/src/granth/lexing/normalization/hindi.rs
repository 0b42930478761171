//! Hindi (Devanagari) tables

use super::LanguageTables;

pub(super) static TABLES: LanguageTables = LanguageTables {
    // Devanagari letters and signs, without dandas (U+0964/5), digits and the
    // abbreviation sign.
    script_class: r"[\x{0900}-\x{0963}\x{0971}-\x{097F}]",
    typos: &[
        // Independent vowels split into a base letter and a sign.
        ("अा", "आ"),
        ("अो", "ओ"),
        ("अौ", "औ"),
        ("एे", "ऐ"),
        // Two-part vowel signs read as separate glyphs.
        ("ाे", "ो"),
        ("ाै", "ौ"),
        // Anusvara read ahead of the vowel sign it belongs after.
        ("ंा", "ां"),
        ("ंी", "ीं"),
        ("ंे", "ें"),
        ("ंै", "ैं"),
        ("ंो", "ों"),
        ("ंौ", "ौं"),
    ],
    dialogue_prefixes: &[
        "प्रश्न:",
        "उत्तर:",
        "शंका:",
        "समाधान:",
        "मुमुक्षु:",
        "गुरुदेवश्री:",
    ],
    sentence_terminators: &['।', '॥', '?', '!'],
    paragraph_end_suffixes: &["।", "॥"],
};
