/// "first last", or the first name alone when there is no last name.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    let last = last_name.trim();
    if last.is_empty() {
        first_name.trim().to_string()
    } else {
        format!("{} {}", first_name.trim(), last)
    }
}
