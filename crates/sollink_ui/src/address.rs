/// Shorten a wallet identity to `ABCD...WXYZ`.
///
/// Identities shorter than 8 characters are returned unchanged. Slicing is by
/// `char`, so multi-byte input never panics.
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < 8 {
        return address.to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
