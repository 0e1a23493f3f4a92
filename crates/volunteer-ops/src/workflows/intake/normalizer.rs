/// Lowercase, strip a possible BOM, and collapse runs of whitespace so that
/// hand-edited export cells still match the mapping tables.
pub(crate) fn normalize_field(value: &str) -> String {
    let stripped = value.trim_start_matches('\u{feff}');
    stripped
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_field(value)
}
