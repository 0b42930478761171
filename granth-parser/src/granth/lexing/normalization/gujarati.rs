//! Gujarati tables

use super::LanguageTables;

pub(super) static TABLES: LanguageTables = LanguageTables {
    // Gujarati letters and signs, without digits and the rupee/abbreviation marks.
    script_class: r"[\x{0A81}-\x{0AE3}]",
    typos: &[
        ("અા", "આ"),
        ("અો", "ઓ"),
        ("અૌ", "ઔ"),
        ("એે", "ઐ"),
        ("ાે", "ો"),
        ("ાૈ", "ૌ"),
        ("ંા", "ાં"),
        ("ંી", "ીં"),
        ("ંે", "ેં"),
        ("ંૈ", "ૈં"),
        ("ંો", "ોં"),
        ("ંૌ", "ૌં"),
    ],
    dialogue_prefixes: &[
        "પ્રશ્ન:",
        "ઉત્તર:",
        "શંકા:",
        "સમાધાન:",
        "મુમુક્ષુ:",
        "ગુરુદેવશ્રી:",
    ],
    // Gujarati prose uses the full stop alongside the danda.
    sentence_terminators: &['।', '॥', '?', '!', '.'],
    paragraph_end_suffixes: &["।", "॥", "."],
};
