/// Canonical form used to compare phone numbers: digits only, keeping a
/// leading `+`. Anything that is not a phone number (e.g. a SIP user) is
/// lowercased and kept as is.
pub fn normalize_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let looks_numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));

    if !looks_numeric {
        return trimmed.to_ascii_lowercase();
    }

    let mut out = String::with_capacity(trimmed.len());
    for (i, c) in trimmed.chars().enumerate() {
        if c.is_ascii_digit() || (c == '+' && i == 0) {
            out.push(c);
        }
    }
    out
}
