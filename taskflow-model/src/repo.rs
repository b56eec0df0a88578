//! GitHub repository label extraction.
//!
//! A board can carry an `owner/repo` label pointing at a GitHub
//! repository. The label is purely cosmetic: nothing checks that the
//! repository exists or is reachable.

/// Extracts an `owner/repo` label from a string containing
/// `github.com/<owner>/<repo>`.
///
/// The two path segments end at the next `/`; extra path segments
/// (`/issues`, `/pull/7`) are dropped. Input that does not match is
/// returned verbatim and stored as-is.
#[must_use]
pub fn repo_label(input: &str) -> String {
    const HOST: &str = "github.com/";
    let Some(pos) = input.find(HOST) else {
        return input.to_string();
    };
    let rest = &input[pos + HOST.len()..];
    let mut segments = rest.split('/');
    match (segments.next(), segments.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            format!("{owner}/{repo}")
        }
        _ => input.to_string(),
    }
}
