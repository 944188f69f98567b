// src/core/sanitize.rs

/// Trim each piece, drop the empty ones, join the rest with `sep`.
pub fn join_stripped<'a, I>(pieces: I, sep: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
