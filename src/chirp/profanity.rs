/// Words replaced by the filter, matched case-insensitively
const BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const REPLACEMENT: &str = "****";

/// Replaces banned words in a chirp body with asterisks.
///
/// Matching is exact per whitespace-separated word: a banned word with
/// trailing punctuation passes through untouched.
pub fn clean(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if BANNED_WORDS.contains(&word.to_lowercase().as_str()) {
                REPLACEMENT
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "This is a kerfuffle opinion I need to share with the world",
        "This is a **** opinion I need to share with the world"
    )]
    #[case("I hear Mastodon is better than Chirpy. sharbert I need to migrate", "I hear Mastodon is better than Chirpy. **** I need to migrate")]
    #[case("Kerfuffle SHARBERT fornax", "**** **** ****")]
    #[case("I really need a kerfuffle to go to bed sooner, Fornax !", "I really need a **** to go to bed sooner, **** !")]
    fn test_banned_words_are_replaced(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean(input), expected);
    }

    #[rstest]
    #[case("Sharbert!")]
    #[case("kerfuffle.")]
    #[case("fornax,")]
    fn test_punctuation_adjacent_words_pass_through(#[case] word: &str) {
        let input = format!("Well {word} indeed");
        assert_eq!(clean(&input), input);
    }

    #[test]
    fn test_clean_body_is_unchanged() {
        let body = "I had something interesting for breakfast";
        assert_eq!(clean(body), body);
    }
}
