//! Guide message markup
//!
//! Supports `**emphasis**` and line breaks written as `<br>`, `<br/>` or `\n`.

use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_EMPHASIS: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref RE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
}

/// Split a message into display lines
pub fn lines(message: &str) -> Vec<String> {
    RE_BREAK
        .replace_all(message, "\n")
        .lines()
        .map(|l| l.trim().to_string())
        .collect()
}

/// Markup removed
pub fn to_plain(message: &str) -> String {
    lines(message)
        .iter()
        .map(|l| RE_EMPHASIS.replace_all(l, "$1").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Emphasis rendered bold for an ANSI terminal
pub fn to_terminal(message: &str) -> String {
    lines(message)
        .iter()
        .map(|l| {
            RE_EMPHASIS
                .replace_all(l, |caps: &regex::Captures| caps[1].bold().to_string())
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        assert_eq!(lines("stand<br>still<BR/>now"), vec!["stand", "still", "now"]);
        assert_eq!(lines("one\ntwo"), vec!["one", "two"]);
        assert_eq!(lines("plain"), vec!["plain"]);
    }

    #[test]
    fn test_to_plain() {
        assert_eq!(
            to_plain("Raise your **left arm**<br>to shoulder height"),
            "Raise your left arm\nto shoulder height"
        );
    }

    #[test]
    fn test_to_terminal_bolds_emphasis() {
        colored::control::set_override(true);
        let out = to_terminal("a **b** c");
        assert!(out.contains("\x1b[1mb\x1b[0m"));
        assert!(!out.contains("**"));
    }
}
