/// Human-readable label for an account or token.
///
/// Renders `"<user> (<comment>)"` when a user identity is linked and just the
/// comment otherwise.
pub fn display_name(user_name: Option<&str>, comment: &str) -> String {
    match user_name {
        Some(name) => format!("{} ({})", name, comment),
        None => comment.to_string(),
    }
}
