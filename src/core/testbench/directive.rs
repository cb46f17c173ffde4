//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! Grammar of the directives written inside single-line comments.
//!
//! ```text
//! testbench <name> of <entity> is
//! sync [(<clock>)] every <duration>;
//! begin
//! every [(<signal> {, <signal>})];
//! set (<statement>; {<statement>;});
//! end;
//! ```

use crate::util::strcmp::cmp_ignore_case;

#[derive(Debug, PartialEq, Clone)]
pub enum Directive {
    Testbench { name: String, entity: String },
    Sync { clock: Option<String>, duration: String },
    Begin,
    /// Signals to enumerate, or `None` to use every drivable port.
    Every(Option<Vec<String>>),
    /// Assignment statements without their terminating `;`.
    Set(Vec<String>),
    End,
    /// A comment whose leading word is not a directive keyword.
    Other(String),
}

impl Directive {
    /// Strips the comment marker and any decoration that follows it.
    pub fn strip_marker(comment: &str) -> &str {
        comment
            .trim()
            .trim_start_matches("--")
            .trim_start_matches(|c: char| c == '-' || c == '!' || c.is_whitespace())
            .trim_end()
    }

    /// Splits off the first word of the comment's text.
    pub fn leading_word(comment: &str) -> (&str, &str) {
        let text = Self::strip_marker(comment);
        let split = text
            .find(|c: char| c.is_alphanumeric() == false && c != '_')
            .unwrap_or(text.len());
        text.split_at(split)
    }

    /// Interprets the text of a single-line comment.
    ///
    /// Errors when the comment starts with a directive keyword but does not
    /// follow that directive's grammar.
    pub fn from_comment(comment: &str) -> Result<Self, String> {
        let (word, rest) = Self::leading_word(comment);
        let rest = rest.trim();
        match word.to_ascii_lowercase().as_str() {
            "testbench" => Self::parse_testbench(rest),
            "sync" => Self::parse_sync(rest),
            "begin" => Self::expect_nothing(rest, Self::Begin),
            "every" => Self::parse_every(rest),
            "set" => Self::parse_set(rest),
            "end" => Self::expect_nothing(rest, Self::End),
            _ => Ok(Self::Other(word.to_string())),
        }
    }

    /// Returns the keyword that introduced the directive.
    pub fn keyword(&self) -> &str {
        match self {
            Self::Testbench { .. } => "testbench",
            Self::Sync { .. } => "sync",
            Self::Begin => "begin",
            Self::Every(_) => "every",
            Self::Set(_) => "set",
            Self::End => "end",
            Self::Other(word) => word.as_str(),
        }
    }

    fn expect_nothing(rest: &str, dir: Self) -> Result<Self, String> {
        match rest {
            "" | ";" => Ok(dir),
            _ => Err(format!("unexpected text \"{}\"", rest)),
        }
    }

    fn parse_testbench(rest: &str) -> Result<Self, String> {
        let words: Vec<&str> = rest.split_whitespace().collect();
        match words.as_slice() {
            [name, of, entity, is] if cmp_ignore_case(of, "of") && cmp_ignore_case(is, "is") => {
                Ok(Self::Testbench {
                    name: name.to_string(),
                    entity: entity.to_string(),
                })
            }
            _ => Err(String::from("expected `testbench <name> of <entity> is`")),
        }
    }

    fn parse_sync(rest: &str) -> Result<Self, String> {
        let rest = rest.trim_end_matches(';').trim();
        let (clock, rest) = match rest.strip_prefix('(') {
            Some(inner) => match inner.split_once(')') {
                Some((clk, tail)) if clk.trim().is_empty() == false => {
                    (Some(clk.trim().to_string()), tail.trim())
                }
                _ => return Err(String::from("expected a clock signal inside parentheses")),
            },
            None => (None, rest),
        };
        let split = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (every, duration) = rest.split_at(split);
        if cmp_ignore_case(every, "every") == false || duration.trim().is_empty() == true {
            return Err(String::from("expected `sync [(<clock>)] every <duration>;`"));
        }
        Ok(Self::Sync {
            clock: clock,
            duration: duration.trim().to_string(),
        })
    }

    fn parse_every(rest: &str) -> Result<Self, String> {
        let rest = rest.trim_end_matches(';').trim();
        if rest.is_empty() == true {
            return Ok(Self::Every(None));
        }
        let signals = Self::unwrap_list(rest, ',')?;
        Ok(Self::Every(Some(signals)))
    }

    fn parse_set(rest: &str) -> Result<Self, String> {
        let rest = rest.trim_end_matches(';').trim();
        Ok(Self::Set(Self::unwrap_list(rest, ';')?))
    }

    /// Splits the parenthesized list `(a <sep> b ...)` into its trimmed items.
    fn unwrap_list(text: &str, sep: char) -> Result<Vec<String>, String> {
        let inner = text
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .ok_or(String::from("expected a parenthesized list"))?;
        let items: Vec<String> = inner
            .split(sep)
            .map(|s| s.trim())
            .filter(|s| s.is_empty() == false)
            .map(|s| s.to_string())
            .collect();
        match items.is_empty() {
            true => Err(String::from("expected at least one item in the list")),
            false => Ok(items),
        }
    }
}
