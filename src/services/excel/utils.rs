use std::collections::HashSet;

/// Makes header names usable as lookup keys: blank headers become
/// `Unnamed: {idx}` and repeated names get `.1`, `.2`, ... suffixes.
/// Case and surrounding text are otherwise kept as-is.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let raw: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.as_ref();
            if name.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut existing_names = HashSet::new();
    raw.into_iter()
        .map(|name| unique_column_name(name, &mut existing_names))
        .collect()
}

fn unique_column_name(name: String, existing_names: &mut HashSet<String>) -> String {
    let mut cleaned = name.clone();
    let mut counter = 1;
    while !existing_names.insert(cleaned.clone()) {
        cleaned = format!("{}.{}", name, counter);
        counter += 1;
    }
    cleaned
}

/// Zero-based column index to spreadsheet letters (0 -> A, 26 -> AA).
pub fn column_letters(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Drops characters XML 1.0 cannot carry.
pub fn sanitize_xml_text(text: &str) -> std::borrow::Cow<'_, str> {
    let is_valid = |c: char| matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}');
    if text.chars().all(is_valid) {
        std::borrow::Cow::Borrowed(text)
    } else {
        std::borrow::Cow::Owned(text.chars().filter(|c| is_valid(*c)).collect())
    }
}
