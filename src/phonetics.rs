//! Cologne phonetics ("Kölner Phonetik"): a digit skeleton of German words.
//!
//! Letters map to code digits depending on their neighbours, repeated digits
//! collapse, and vowel digits (`0`) are dropped except at the start.

/// Phonetic code of one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneticWord {
    pub word: String,
    pub code: String,
}

/// Encode every token of a sentence, keeping token order
pub fn encode_tokens(tokens: &[String]) -> Vec<PhoneticWord> {
    tokens
        .iter()
        .map(|word| PhoneticWord {
            word: word.clone(),
            code: cologne(word),
        })
        .collect()
}

/// Fold a character into the A–Z alphabet the rules are defined over
fn normalize(c: char) -> Option<char> {
    let upper = match c {
        'ä' | 'Ä' => 'A',
        'ö' | 'Ö' => 'O',
        'ü' | 'Ü' => 'U',
        'ß' => 'S',
        c if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
        _ => return None,
    };
    Some(upper)
}

/// Code digits for the letter at `i`; `H` yields none
fn letter_code(letters: &[char], i: usize) -> &'static str {
    let prev = if i > 0 { letters.get(i - 1).copied() } else { None };
    let next = letters.get(i + 1).copied();
    let next_in = |set: &str| next.is_some_and(|n| set.contains(n));
    let prev_in = |set: &str| prev.is_some_and(|p| set.contains(p));

    match letters[i] {
        'A' | 'E' | 'I' | 'J' | 'O' | 'U' | 'Y' => "0",
        'H' => "",
        'B' => "1",
        'P' => {
            if next_in("H") {
                "3"
            } else {
                "1"
            }
        }
        'D' | 'T' => {
            if next_in("CSZ") {
                "8"
            } else {
                "2"
            }
        }
        'F' | 'V' | 'W' => "3",
        'G' | 'K' | 'Q' => "4",
        'C' => {
            if i == 0 {
                if next_in("AHKLOQRUX") {
                    "4"
                } else {
                    "8"
                }
            } else if prev_in("SZ") {
                "8"
            } else if next_in("AHKOQUX") {
                "4"
            } else {
                "8"
            }
        }
        'X' => {
            if prev_in("CKQ") {
                "8"
            } else {
                "48"
            }
        }
        'L' => "5",
        'M' | 'N' => "6",
        'R' => "7",
        'S' | 'Z' => "8",
        _ => "",
    }
}

/// Cologne phonetic code of `word`; empty when the word has no codable letters
pub fn cologne(word: &str) -> String {
    let letters: Vec<char> = word.chars().filter_map(normalize).collect();

    let raw: String = (0..letters.len()).map(|i| letter_code(&letters, i)).collect();

    let mut collapsed: Vec<char> = Vec::with_capacity(raw.len());
    for digit in raw.chars() {
        if collapsed.last() != Some(&digit) {
            collapsed.push(digit);
        }
    }

    collapsed
        .iter()
        .enumerate()
        .filter(|&(i, &d)| i == 0 || d != '0')
        .map(|(_, &d)| d)
        .collect()
}
