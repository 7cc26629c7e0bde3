use url::Url;

/// Whether `candidate` is a well-formed absolute web URL.
///
/// Purely syntactic: surrounding whitespace is ignored, the scheme must be `http` or
/// `https` and a host must be present. Shared by the inspector and the autopaste rules
/// so both agree on what counts as a link.
pub fn is_valid_url(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return false;
    }

    match Url::parse(trimmed) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
