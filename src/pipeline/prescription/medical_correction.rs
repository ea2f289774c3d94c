//! Post-OCR correction of medication names.
//!
//! OCR routinely confuses "rn"/"m", "u"/"n", "l"/"1" and "o"/"0" in drug
//! names. A word of a medication name is replaced only when it differs from
//! exactly one lexicon entry by those confusions or by a single edit. Names
//! further away are left alone, since a real drug missing from the lexicon
//! must not turn into a different one.

/// Common generic drug names. Lowercase and sorted (binary search).
const DRUG_LEXICON: &[&str] = &[
    "acetaminophen", "aciclovir", "albuterol", "allopurinol", "alprazolam",
    "amitriptyline", "amlodipine", "amoxicillin", "ampicillin", "aspirin",
    "atenolol", "atorvastatin", "azithromycin", "baclofen", "bisoprolol",
    "budesonide", "bupropion", "captopril", "carbamazepine", "carvedilol",
    "cefalexin", "cefixime", "ceftriaxone", "cetirizine", "ciprofloxacin",
    "citalopram", "clarithromycin", "clonazepam", "clopidogrel", "codeine",
    "colchicine", "dexamethasone", "diazepam", "diclofenac", "digoxin",
    "domperidone", "doxycycline", "duloxetine", "enalapril", "escitalopram",
    "esomeprazole", "famotidine", "fexofenadine", "fluconazole", "fluoxetine",
    "fluticasone", "furosemide", "gabapentin", "gliclazide", "glimepiride",
    "hydrochlorothiazide", "hydrocortisone", "ibuprofen", "insulin",
    "lansoprazole", "levetiracetam", "levocetirizine", "levofloxacin",
    "levothyroxine", "lisinopril", "loratadine", "lorazepam", "losartan",
    "metformin", "methotrexate", "methylprednisolone", "metoclopramide",
    "metoprolol", "metronidazole", "montelukast", "naproxen", "nitrofurantoin",
    "omeprazole", "ondansetron", "pantoprazole", "paracetamol", "prednisolone",
    "prednisone", "pregabalin", "propranolol", "quetiapine", "rabeprazole",
    "ramipril", "ranitidine", "rosuvastatin", "salbutamol", "sertraline",
    "simvastatin", "spironolactone", "tamsulosin", "telmisartan", "tramadol",
    "trimethoprim", "valsartan", "venlafaxine", "warfarin",
];

/// Words shorter than this are never corrected.
const MIN_WORD_LEN: usize = 5;
/// Plain edits allowed on top of the OCR confusion pairs.
const MAX_EDIT_DISTANCE: usize = 1;

/// Correct each word of a medication name against the drug lexicon.
/// Punctuation and spacing are kept as-is.
pub fn correct_drug_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word = String::new();

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            word.push(ch);
            continue;
        }
        if !word.is_empty() {
            out.push_str(&correct_word(&word));
            word.clear();
        }
        out.push(ch);
    }
    if !word.is_empty() {
        out.push_str(&correct_word(&word));
    }

    out
}

fn correct_word(word: &str) -> String {
    if word.chars().count() < MIN_WORD_LEN {
        return word.to_string();
    }

    let lower = word.to_lowercase();
    if DRUG_LEXICON.binary_search(&lower.as_str()).is_ok() {
        return word.to_string();
    }

    match closest_drug(&lower) {
        Some(drug) => {
            tracing::debug!(edit_limit = MAX_EDIT_DISTANCE, "Corrected OCR drug name");
            match_case(word, drug)
        }
        None => word.to_string(),
    }
}

/// The single lexicon entry the word can be an OCR misread of, if any.
///
/// Words containing digits only match through the confusion pairs.
fn closest_drug(lower: &str) -> Option<&'static str> {
    let folded = fold_ocr_confusions(lower);
    let allow_edit = !lower.chars().any(|c| c.is_ascii_digit());
    let len = lower.chars().count();
    let mut found = None;

    for &drug in DRUG_LEXICON {
        let confused = fold_ocr_confusions(drug) == folded;
        let edited = allow_edit
            && drug.len().abs_diff(len) <= MAX_EDIT_DISTANCE
            && levenshtein(lower, drug) <= MAX_EDIT_DISTANCE;
        if !(confused || edited) {
            continue;
        }
        if found.is_some() {
            return None;
        }
        found = Some(drug);
    }

    found
}

/// Map each confusable glyph sequence to one representative.
fn fold_ocr_confusions(lower: &str) -> String {
    lower
        .replace("rn", "m")
        .chars()
        .map(|c| match c {
            '1' => 'l',
            '0' => 'o',
            'u' => 'n',
            other => other,
        })
        .collect()
}

fn match_case(original: &str, replacement: &str) -> String {
    let letters = || original.chars().filter(|c| c.is_alphabetic());
    if letters().all(char::is_uppercase) {
        return replacement.to_uppercase();
    }
    if letters().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }
    replacement.to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_sorted_and_lowercase() {
        for pair in DRUG_LEXICON.windows(2) {
            assert!(pair[0] < pair[1], "{:?} >= {:?}", pair[0], pair[1]);
        }
        assert!(DRUG_LEXICON.iter().all(|d| *d == d.to_lowercase()));
    }

    #[test]
    fn fixes_common_ocr_confusions() {
        // rn → m
        assert_eq!(correct_drug_name("Metforrnin"), "Metformin");
        // n → u
        assert_eq!(correct_drug_name("Amoxicilliu"), "Amoxicillin");
        // l → 1, o → 0
        assert_eq!(correct_drug_name("Omeprazo1e"), "Omeprazole");
        assert_eq!(correct_drug_name("Ramipri1"), "Ramipril");
        assert_eq!(correct_drug_name("L0sartan"), "Losartan");
    }

    #[test]
    fn single_edit_is_corrected() {
        assert_eq!(correct_drug_name("Prednisoe"), "Prednisone");
        assert_eq!(correct_drug_name("Amoxicilin"), "Amoxicillin");
    }

    #[test]
    fn drugs_outside_lexicon_are_not_swapped() {
        // Two edits from "lisinopril" and "aciclovir" respectively.
        assert_eq!(correct_drug_name("Fosinopril"), "Fosinopril");
        assert_eq!(correct_drug_name("Famciclovir"), "Famciclovir");
    }

    #[test]
    fn keeps_exact_and_unknown_words() {
        assert_eq!(correct_drug_name("Paracetamol"), "Paracetamol");
        assert_eq!(correct_drug_name("Vitamin D3"), "Vitamin D3");
        assert_eq!(correct_drug_name("Syrup"), "Syrup");
        assert_eq!(correct_drug_name("10000"), "10000");
    }

    #[test]
    fn preserves_case_pattern() {
        assert_eq!(correct_drug_name("METFORRNIN"), "METFORMIN");
        assert_eq!(correct_drug_name("metforrnin"), "metformin");
    }

    #[test]
    fn keeps_separators() {
        assert_eq!(
            correct_drug_name("Amoxicilin/Clavulanate"),
            "Amoxicillin/Clavulanate"
        );
    }

    #[test]
    fn ambiguous_match_is_left_alone() {
        // One edit from both "prednisone" and "prednisolone".
        assert_eq!(closest_drug("prednislone"), None);
        assert_eq!(correct_drug_name("Prednislone"), "Prednislone");
    }

    #[test]
    fn folding_unifies_confusable_glyphs() {
        assert_eq!(fold_ocr_confusions("metforrnin"), fold_ocr_confusions("metformin"));
        assert_eq!(fold_ocr_confusions("ramipri1"), "ramipril");
        assert_ne!(fold_ocr_confusions("fosinopril"), fold_ocr_confusions("lisinopril"));
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("metformin", "metforrnin"), 2);
    }
}
