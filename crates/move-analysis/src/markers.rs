//! Recognising "no move" strings reported by move sources

/// Whole-string markers, compared case-insensitively after trimming
const EXACT_MARKERS: &[&str] = &[
    "",
    "n/a",
    "none",
    "unavailable",
    "error",
    "no legal moves available",
    "engine not available",
];

/// Substrings that mark a failure message anywhere in the string
const FRAGMENT_MARKERS: &[&str] = &["failed", "error", "not available"];

/// Does `raw` say that its source produced no move?
pub fn is_unavailable(raw: &str, extra: &[String]) -> bool {
    let normalized = raw.trim().to_lowercase();
    EXACT_MARKERS.contains(&normalized.as_str())
        || FRAGMENT_MARKERS.iter().any(|f| normalized.contains(f))
        || extra
            .iter()
            .any(|marker| marker.trim().to_lowercase() == normalized)
}
