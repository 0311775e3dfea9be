//! Required commit-message trailers.

const SOB_PREFIX: &str = "Signed-off-by:";

fn is_uploader_signoff(line: &str, name: &str, email: &str) -> bool {
    let Some(rest) = line.strip_prefix(SOB_PREFIX) else {
        return false;
    };

    let by_name = rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with(name);
    let by_email = rest.contains(&format!("<{}>", email));
    by_name || by_email
}

/// Return the required fields missing from `commit_message`.
///
/// A field is present when a line starts with `BUG=` or `TEST=`, or is a
/// `Signed-off-by:` naming the uploader or carrying their address. The
/// sign-off is not required when `ignore_sob` is set. Missing fields are
/// listed in that order, the sign-off rendered the way it should be written.
pub fn check_fields(
    commit_message: &str,
    uploader_name: &str,
    uploader_email: &str,
    ignore_sob: bool,
) -> Vec<String> {
    let mut bug = false;
    let mut test = false;
    let mut sob = ignore_sob;

    for line in commit_message.lines() {
        if line.starts_with("BUG=") {
            bug = true;
        } else if line.starts_with("TEST=") {
            test = true;
        } else if is_uploader_signoff(line, uploader_name, uploader_email) {
            sob = true;
        }
    }

    let mut missing = Vec::new();
    if !bug {
        missing.push("BUG=".to_string());
    }
    if !test {
        missing.push("TEST=".to_string());
    }
    if !sob {
        missing.push(format!("{} {} <{}>", SOB_PREFIX, uploader_name, uploader_email));
    }
    missing
}

/// Commit message part of a `git show --format=%B` patch: everything before
/// the first `diff --git` line.
pub fn commit_message_of(patch: &str) -> &str {
    if patch.starts_with("diff --git ") {
        return "";
    }
    match patch.find("\ndiff --git ") {
        Some(idx) => &patch[..idx],
        None => patch,
    }
}
