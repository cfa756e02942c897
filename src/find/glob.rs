use regex::Regex;

/// Converts a shell glob into an anchored regex.
///
/// Supported syntax: `*` (any sequence), `?` (any character), `[abc]`,
/// `[a-z]` and `[!abc]` (character classes). A `[` without a matching `]` is
/// a literal bracket. Everything else matches literally.
pub fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::from("^");
    let mut rest = glob;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            '[' => match class_end(rest) {
                Some(end) => {
                    pattern.push_str(&translate_class(&rest[..end]));
                    rest = &rest[end + 1..];
                }
                None => pattern.push_str(r"\["),
            },
            c => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern.push('$');

    Regex::new(&pattern)
}

/// Finds the `]` closing a class whose body starts at `class`. A `]` right
/// after the opening bracket (or after `!`) belongs to the class.
fn class_end(class: &str) -> Option<usize> {
    let mut skip = if class.starts_with('!') { 1 } else { 0 };
    if class[skip..].starts_with(']') {
        skip += 1;
    }
    class[skip..].find(']').map(|i| i + skip)
}

fn translate_class(class: &str) -> String {
    let mut out = String::from("[");
    let class = match class.strip_prefix('!') {
        Some(class) => {
            out.push('^');
            class
        }
        None => class,
    };
    for c in class.chars() {
        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(']');
    out
}
