//! Dictionary-form token filter.
//!
//! The Snowball stemmer reduces "cherries" to "cherri" and "leaves" to
//! "leav", which never appear in a stored ingredient list. This filter maps
//! common English plurals back to their singular so "cherries" also searches
//! for "cherry".

use tantivy::tokenizer::{Token, TokenFilter, TokenStream, Tokenizer};

/// Plurals whose singular no suffix rule recovers.
const IRREGULAR: &[(&str, &str)] = &[
    ("anchovies", "anchovy"),
    ("calves", "calf"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("mangoes", "mango"),
    ("mice", "mouse"),
    ("pies", "pie"),
    ("potatoes", "potato"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("tomatoes", "tomato"),
    ("wolves", "wolf"),
];

/// Words ending in `s` that are already singular.
const INVARIANT: &[&str] = &[
    "asparagus",
    "citrus",
    "couscous",
    "hummus",
    "molasses",
    "octopus",
    "swiss",
];

/// Return the singular form of a lowercase `word`, or `word` itself.
///
/// ```
/// use larder_web::search::singular;
///
/// assert_eq!(singular("cherries"), "cherry");
/// assert_eq!(singular("leaves"), "leaf");
/// assert_eq!(singular("olives"), "olive");
/// assert_eq!(singular("flour"), "flour");
/// ```
#[must_use]
pub fn singular(word: &str) -> String {
    if let Some((_, single)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return (*single).to_string();
    }
    if INVARIANT.contains(&word) || word.chars().count() <= 3 {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("es")
        && ["ch", "sh", "ss", "x", "z", "o"]
            .iter()
            .any(|ending| stem.ends_with(ending))
    {
        return stem.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.ends_with(['s', 'u', 'i']) => stem.to_string(),
        _ => word.to_string(),
    }
}

/// `TokenFilter` that rewrites each token to its singular form.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingularFilter;

impl TokenFilter for SingularFilter {
    type Tokenizer<T: Tokenizer> = SingularFilterWrapper<T>;

    fn transform<T: Tokenizer>(self, tokenizer: T) -> Self::Tokenizer<T> {
        SingularFilterWrapper(tokenizer)
    }
}

#[derive(Clone)]
pub struct SingularFilterWrapper<T>(T);

impl<T: Tokenizer> Tokenizer for SingularFilterWrapper<T> {
    type TokenStream<'a> = SingularTokenStream<T::TokenStream<'a>>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        SingularTokenStream {
            inner: self.0.token_stream(text),
        }
    }
}

pub struct SingularTokenStream<T> {
    inner: T,
}

impl<T: TokenStream> TokenStream for SingularTokenStream<T> {
    fn advance(&mut self) -> bool {
        if !self.inner.advance() {
            return false;
        }
        let token = self.inner.token_mut();
        token.text = singular(&token.text);
        true
    }

    fn token(&self) -> &Token {
        self.inner.token()
    }

    fn token_mut(&mut self) -> &mut Token {
        self.inner.token_mut()
    }
}
