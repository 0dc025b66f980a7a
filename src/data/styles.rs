//! ANSI style token resolution
//!
//! Theme values are short tokens: attribute shorthands (`b`, `i`, `u`),
//! named colors (`red`, `brightcyan`), or raw SGR parameter lists such as
//! `38;5;250` which pass through untouched. Tokens may be combined with
//! spaces or semicolons (`b red`).

use phf::phf_map;

/// Token name to SGR parameter mapping
pub static STYLE_CODES: phf::Map<&'static str, &'static str> = phf_map! {
    // Attributes
    "b" => "1",
    "bold" => "1",
    "d" => "2",
    "dim" => "2",
    "i" => "3",
    "italic" => "3",
    "u" => "4",
    "underline" => "4",
    "blink" => "5",
    "reverse" => "7",
    "strike" => "9",

    // Standard foreground colors
    "black" => "30",
    "red" => "31",
    "green" => "32",
    "yellow" => "33",
    "blue" => "34",
    "magenta" => "35",
    "cyan" => "36",
    "white" => "37",

    // Bright foreground colors
    "gray" => "90",
    "grey" => "90",
    "brightblack" => "90",
    "brightred" => "91",
    "brightgreen" => "92",
    "brightyellow" => "93",
    "brightblue" => "94",
    "brightmagenta" => "95",
    "brightcyan" => "96",
    "brightwhite" => "97",
};

/// ANSI reset sequence
pub const RESET: &str = "\x1b[0m";

/// Resolve a style token to an SGR parameter list.
///
/// Unknown non-numeric parts are dropped; an all-miss token resolves to
/// `None` so callers emit nothing rather than garbage escapes.
pub fn resolve(token: &str) -> Option<String> {
    let mut params = Vec::new();
    for part in token.split([' ', ';']).filter(|p| !p.is_empty()) {
        if let Some(code) = STYLE_CODES.get(part) {
            params.push((*code).to_string());
        } else if part.chars().all(|c| c.is_ascii_digit()) {
            // Raw SGR parameter, e.g. one segment of "38;5;250"
            params.push(part.to_string());
        }
    }
    if params.is_empty() {
        None
    } else {
        Some(params.join(";"))
    }
}

/// Append the escape sequence for `token` to `out`, if it resolves.
pub fn push_sgr(out: &mut String, token: &str) {
    if let Some(params) = resolve(token) {
        out.push_str("\x1b[");
        out.push_str(&params);
        out.push('m');
    }
}

/// Append the reset sequence to `out`.
pub fn push_reset(out: &mut String) {
    out.push_str(RESET);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_tokens() {
        assert_eq!(resolve("b").as_deref(), Some("1"));
        assert_eq!(resolve("white").as_deref(), Some("37"));
        assert_eq!(resolve("b red").as_deref(), Some("1;31"));
    }

    #[test]
    fn test_raw_params_pass_through() {
        assert_eq!(resolve("38;5;250").as_deref(), Some("38;5;250"));
    }

    #[test]
    fn test_unknown_token_is_dropped() {
        assert_eq!(resolve("sparkles"), None);
        assert_eq!(resolve("sparkles red").as_deref(), Some("31"));
    }

    #[test]
    fn test_push_sgr() {
        let mut out = String::new();
        push_sgr(&mut out, "b");
        assert_eq!(out, "\x1b[1m");

        let mut none = String::new();
        push_sgr(&mut none, "nope");
        assert_eq!(none, "");
    }
}
