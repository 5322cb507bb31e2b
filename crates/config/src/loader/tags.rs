//! Detection of YAML `!!` tags that the safe loader refuses.
//!
//! `serde_yaml` resolves `!!` tags itself and silently drops the ones it does
//! not know, so `!!python/object:os.system x` reaches a `Value` as the plain
//! string `"x"`. The scan below runs on the raw text before parsing and
//! reports the first `!!` tag outside the safe set.
//!
//! Invariants:
//! - Only tag tokens are inspected. Quoted scalars, plain scalars, comments
//!   and block scalar bodies never match.
//! - Local `!` tags are left to the parsed-value check in source.rs.

/// Core-schema tags a safe loader constructs without running user code.
const SAFE_TAGS: [&str; 14] = [
    "null",
    "bool",
    "int",
    "float",
    "binary",
    "timestamp",
    "omap",
    "pairs",
    "set",
    "str",
    "seq",
    "map",
    "merge",
    "value",
];

/// Returns the first `!!` tag in `text` that is not in the safe set.
pub(crate) fn find_unsafe_tag(text: &str) -> Option<String> {
    let mut scanner = Scanner::default();
    text.lines().find_map(|line| scanner.scan_line(line))
}

#[derive(Default)]
struct Scanner {
    /// Open quote character, carried across lines.
    quote: Option<char>,
    flow_depth: usize,
    /// Indentation of the line that opened a `|` or `>` block scalar.
    block_indent: Option<usize>,
}

impl Scanner {
    fn scan_line(&mut self, line: &str) -> Option<String> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if let Some(block) = self.block_indent {
            if line.trim().is_empty() || indent > block {
                return None;
            }
            self.block_indent = None;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut plain = false;
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if let Some(quote) = self.quote {
                if quote == '"' && c == '\\' {
                    i += 2;
                    continue;
                }
                if c == quote {
                    if quote == '\'' && next == Some('\'') {
                        i += 2;
                        continue;
                    }
                    self.quote = None;
                }
                i += 1;
                continue;
            }

            if plain {
                if c == ':' && next.is_none_or(char::is_whitespace) {
                    plain = false;
                } else if c == '#' && i > 0 && chars[i - 1].is_whitespace() {
                    return None;
                } else if self.flow_depth > 0 && matches!(c, ',' | ']' | '}') {
                    // Flow indicator ends the scalar; handle it below.
                    plain = false;
                    continue;
                }
                i += 1;
                continue;
            }

            match c {
                ' ' | '\t' | ',' => {}
                '#' => return None,
                '"' | '\'' => self.quote = Some(c),
                '[' | '{' => self.flow_depth += 1,
                ']' | '}' => self.flow_depth = self.flow_depth.saturating_sub(1),
                '-' | '?' | ':' if next.is_none_or(char::is_whitespace) => {}
                '!' | '&' | '*' => {
                    let end = self.token_end(&chars, i);
                    let token: String = chars[i..end].iter().collect();
                    if let Some(name) = token.strip_prefix("!!")
                        && !SAFE_TAGS.contains(&name)
                    {
                        return Some(token);
                    }
                    i = end;
                    continue;
                }
                '|' | '>' => {
                    let rest: String = chars[i + 1..].iter().collect();
                    let rest = rest
                        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '+' || c == '-')
                        .trim_start();
                    if rest.is_empty() || rest.starts_with('#') {
                        self.block_indent = Some(indent);
                    }
                    return None;
                }
                _ => plain = true,
            }
            i += 1;
        }
        None
    }

    fn token_end(&self, chars: &[char], start: usize) -> usize {
        (start..chars.len())
            .find(|&j| {
                chars[j].is_whitespace()
                    || (self.flow_depth > 0 && matches!(chars[j], ',' | ']' | '}'))
            })
            .unwrap_or(chars.len())
    }
}
