//! Heading anchor slugs.
//!
//! Slugs are lowercase ASCII with hyphens for separators. Common Latin
//! diacritics are folded so `Introducción` yields `introduccion`, keeping
//! anchors stable for accented headings.

/// Convert heading text to an anchor slug.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true;

    for c in text.chars().flat_map(char::to_lowercase) {
        let folded = fold_diacritic(c);
        if folded.is_ascii_alphanumeric() {
            slug.push(folded);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Fold common Latin diacritics to their ASCII base letter.
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Getting Started"), "getting-started");
    }

    #[test]
    fn test_diacritics_folded() {
        assert_eq!(slugify("Introducción"), "introduccion");
        assert_eq!(slugify("Cuándo usar Pinia"), "cuando-usar-pinia");
        assert_eq!(slugify("¿Qué es?"), "que-es");
    }

    #[test]
    fn test_punctuation_collapsed() {
        assert_eq!(slugify("Options vs. Setup Stores"), "options-vs-setup-stores");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("¿¡!?"), "");
    }
}
