/// Convert `snake_case` or `kebab-case` to camelCase.
///
/// A `-` or `_` followed by a letter is removed and the letter upper-cased;
/// other separators are kept. The first character is then upper-cased when
/// `capitalize_first` is set and lower-cased otherwise.
pub fn to_camel_case(name: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if matches!(ch, '-' | '_') {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_alphabetic) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) if capitalize_first => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_separators() {
        assert_eq!(to_camel_case("user_name", false), "userName");
        assert_eq!(to_camel_case("user_name", true), "UserName");
        assert_eq!(to_camel_case("order-line_item", true), "OrderLineItem");
        assert_eq!(to_camel_case("ID", false), "iD");
    }

    #[test]
    fn keeps_separator_before_digit() {
        assert_eq!(to_camel_case("col_1", false), "col_1");
        assert_eq!(to_camel_case("trailing_", true), "Trailing_");
        assert_eq!(to_camel_case("", true), "");
    }
}
