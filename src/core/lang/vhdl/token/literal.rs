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

use super::char_set;
use std::fmt::Display;

/// Transforms the VHDL integer production rule into a rust `usize` type.
///
/// Discards `_` characters. Returns `None` if a non-digit is found or the
/// value does not fit.
/// - integer ::= digit { \[ underline ] digit }
pub fn interpret_integer(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    let mut number = String::from(chars.next()?);
    while let Some(c) = chars.next() {
        if c != char_set::UNDERLINE {
            number.push(c);
        }
    }
    number.parse::<usize>().ok()
}

#[derive(Debug, PartialEq, Clone)]
pub enum AbstLiteral {
    Decimal(String),
    Based(String),
}

impl AbstLiteral {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Decimal(s) => s.as_ref(),
            Self::Based(s) => s.as_ref(),
        }
    }
}

impl Display for AbstLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Character(pub String);

impl Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct BitStrLiteral(pub String);

impl Display for BitStrLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks if `s` is a valid base specifier for a bit string literal.
pub fn is_base_spec(s: &str) -> bool {
    match s.to_ascii_lowercase().as_ref() {
        "b" | "o" | "x" | "d" | "ub" | "uo" | "ux" | "sb" | "so" | "sx" => true,
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interpret_int() {
        assert_eq!(interpret_integer("16"), Some(16));
        assert_eq!(interpret_integer("1_6"), Some(16));
        assert_eq!(interpret_integer("50_000_000"), Some(50_000_000));
        assert_eq!(interpret_integer("16a"), None);
        assert_eq!(interpret_integer(""), None);
    }

    #[test]
    fn base_specifiers() {
        assert_eq!(is_base_spec("X"), true);
        assert_eq!(is_base_spec("sx"), true);
        assert_eq!(is_base_spec("q"), false);
    }
}
