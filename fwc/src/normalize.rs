/// Strip comments, drop C punctuation and collapse whitespace.
///
/// Quoted text is kept verbatim while stripping comments, so `"/* x */"` survives.
pub fn normalize(text: &str) -> String {
    strip_comments(text)
        .split(|c: char| c.is_whitespace() || is_punct(c))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_punct(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}' | ',' | ';')
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            // "..." or '...', only when closed
            '"' | '\'' => {
                if let Some(end) = rest[1..].find(c) {
                    let len = end + 2;
                    out.push_str(&rest[..len]);
                    rest = &rest[len..];
                    continue;
                }
            }
            '/' if rest.starts_with("/*") => {
                if let Some(end) = rest[2..].find("*/") {
                    rest = &rest[end + 4..];
                    continue;
                }
            }
            '/' if rest.starts_with("//") => {
                let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
                rest = &rest[end..];
                continue;
            }
            _ => {}
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Split normalized text into words, with `=` always standing alone.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = vec![];
    for word in text.split_whitespace() {
        let mut rest = word;
        while let Some(idx) = rest.find('=') {
            if idx > 0 {
                tokens.push(&rest[..idx]);
            }
            tokens.push("=");
            rest = &rest[idx + 1..];
        }
        if !rest.is_empty() {
            tokens.push(rest);
        }
    }
    tokens
}

/// Byte offsets where `word` stands as a whole whitespace-delimited word.
fn word_positions<'a>(text: &'a str, word: &'a str) -> impl Iterator<Item = usize> + 'a {
    text.match_indices(word).filter_map(move |(idx, _)| {
        let before = text[..idx].chars().next_back();
        let after = text[idx + word.len()..].chars().next();
        let bounded = |c: Option<char>| c.map_or(true, char::is_whitespace);
        (bounded(before) && bounded(after)).then_some(idx)
    })
}

/// Offset of the first whole-word occurrence of `word`.
pub fn find_word(text: &str, word: &str) -> Option<usize> {
    word_positions(text, word).next()
}

/// Like `str::split`, but only at whole-word occurrences of `word`.
pub fn split_word<'a>(text: &'a str, word: &'a str) -> Vec<&'a str> {
    let mut pieces = vec![];
    let mut start = 0;
    for idx in word_positions(text, word) {
        pieces.push(&text[start..idx]);
        start = idx + word.len();
    }
    pieces.push(&text[start..]);
    pieces
}
