/// Characters kept at each end of a redacted secret.
pub const VISIBLE_CHARS: usize = 10;

/// Redact a secret for printing: the first and last ten characters with the
/// middle elided. Secrets too short to keep both ends hidden are replaced
/// by their length.
pub fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < VISIBLE_CHARS * 2 {
        return format!("<redacted {} chars>", chars.len());
    }

    let head: String = chars[..VISIBLE_CHARS].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE_CHARS..].iter().collect();
    format!("{}...{}", head, tail)
}
