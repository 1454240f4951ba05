use regex::Regex;

/// Compile a function-name pattern where `*` matches any run of characters.
/// Everything else is literal and the match is anchored at both ends.
pub fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body = regex::escape(pattern).replace("\\*", ".*");
    Regex::new(&format!("^{body}$"))
}
