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

use super::super::lexer::TrainCar;
use std::fmt::Display;

pub mod comment;
pub mod delimiter;
pub mod identifier;
pub mod keyword;
pub mod literal;
pub mod tokenizer;

pub use tokenizer::char_set;

use literal::{AbstLiteral, BitStrLiteral, Character};

pub type Identifier = identifier::Identifier;
pub type Comment = comment::Comment;
pub type Keyword = keyword::Keyword;
pub type Delimiter = delimiter::Delimiter;
pub type VhdlTokenizer = tokenizer::VhdlTokenizer;
pub type VhdlError = super::error::VhdlError;

#[derive(Debug, PartialEq, Clone)]
pub enum VhdlToken {
    Comment(Comment),             // (String)
    Identifier(Identifier),       // (String) ...can be general or extended (case-sensitive) identifier
    AbstLiteral(AbstLiteral),     // (String)
    CharLiteral(Character),       // (String)
    StrLiteral(String),           // (String)
    BitStrLiteral(BitStrLiteral), // (String)
    Keyword(Keyword),
    Delimiter(Delimiter),
    EOF,
}

impl Display for VhdlToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Comment(note) => note.to_string(),
                Self::Identifier(id) => id.to_string(),
                Self::AbstLiteral(a) => a.to_string(),
                Self::CharLiteral(c) => c.to_string(),
                Self::StrLiteral(s) => format!("\"{}\"", s),
                Self::BitStrLiteral(b) => b.to_string(),
                Self::Keyword(kw) => kw.to_string(),
                Self::Delimiter(d) => d.to_string(),
                Self::EOF => String::from("end of file"),
            }
        )
    }
}

impl VhdlToken {
    /// Casts into a keyword.
    pub fn as_keyword(&self) -> Option<&Keyword> {
        match self {
            Self::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Casts as a delimiter.
    pub fn as_delimiter(&self) -> Option<&Delimiter> {
        match self {
            Self::Delimiter(d) => Some(d),
            _ => None,
        }
    }

    /// Checks if the element is a particular keyword `kw`.
    pub fn check_keyword(&self, kw: &Keyword) -> bool {
        match self {
            Self::Keyword(r) => r == kw,
            _ => false,
        }
    }

    /// Checks if the element is a particular delimiter `d`.
    pub fn check_delimiter(&self, d: &Delimiter) -> bool {
        match self {
            Self::Delimiter(r) => r == d,
            _ => false,
        }
    }

    pub fn is_eof(&self) -> bool {
        match self {
            Self::EOF => true,
            _ => false,
        }
    }

    /// Accesses the underlying `Identifier`, if one exists.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Self::Comment(r) => Some(r),
            _ => None,
        }
    }

    /// Attempts to match a string `s` to a valid delimiter.
    pub fn match_delimiter(s: &str) -> Result<Self, VhdlError> {
        match Delimiter::transform(s) {
            Some(d) => Ok(VhdlToken::Delimiter(d)),
            None => Err(VhdlError::Invalid(s.to_string())),
        }
    }

    /// Captures VHDL Tokens that begin with `integer` production rule:
    /// decimal literal, based_literal, and bit_string_literals.
    ///
    /// Assumes the incoming char `c0` was last char consumed as it a digit `0..=9`.
    pub fn consume_numeric(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: char,
    ) -> Result<VhdlToken, VhdlError> {
        let mut number = Self::consume_value_pattern(train, Some(c0), char_set::is_digit)?;
        let mut based = false;
        match train.peek().copied() {
            // * decimal_literal
            Some(char_set::DOT) => {
                number.push(char_set::DOT);
                train.consume();
                let fraction = Self::consume_value_pattern(train, None, char_set::is_digit)?;
                if fraction.is_empty() {
                    return Err(VhdlError::Any(String::from(
                        "cannot have trailing decimal point",
                    )));
                }
                number.push_str(&fraction);
            }
            // * based_literal
            Some(char_set::HASH) => {
                based = true;
                number.push(char_set::HASH);
                train.consume();
                let digits =
                    Self::consume_value_pattern(train, None, char_set::is_extended_digit)?;
                if digits.is_empty() {
                    return Err(VhdlError::Any(String::from(
                        "expecting digits in based literal",
                    )));
                }
                number.push_str(&digits);
                if train.peek() == Some(&char_set::DOT) {
                    number.push(char_set::DOT);
                    train.consume();
                    let fraction =
                        Self::consume_value_pattern(train, None, char_set::is_extended_digit)?;
                    number.push_str(&fraction);
                }
                match train.consume() {
                    Some(char_set::HASH) => number.push(char_set::HASH),
                    Some(c) => return Err(VhdlError::MissingClosingAndGot(char_set::HASH, c)),
                    None => return Err(VhdlError::Any(String::from("expecting closing '#'"))),
                }
            }
            // * bit string literal
            Some(c) if c != 'e' && c != 'E' && char_set::is_letter(&c) => {
                let base_spec = Self::consume_value_pattern(train, None, char_set::is_letter)?;
                if literal::is_base_spec(&base_spec) == false
                    || train.peek() != Some(&char_set::DOUBLE_QUOTE)
                {
                    return Err(VhdlError::Any(format!(
                        "invalid bit string literal base specifier {:?}",
                        base_spec
                    )));
                }
                number.push_str(&base_spec);
                // append first double quote " char
                number.push(char_set::DOUBLE_QUOTE);
                train.consume();
                return Self::consume_bit_str_literal(train, number);
            }
            _ => (),
        }
        // gather exponent
        if let Some(c) = train.peek().copied() {
            if c == 'e' || c == 'E' {
                train.consume();
                let expon = Self::consume_exponent(train, c)?;
                number.push_str(&expon);
            }
        }
        Ok(VhdlToken::AbstLiteral(match based {
            true => AbstLiteral::Based(number),
            false => AbstLiteral::Decimal(number),
        }))
    }

    /// Captures VHDL Tokens: keywords, basic identifiers, and regular bit string literals.
    ///
    /// Assumes the first `letter` char was the last char consumed before the function call.
    pub fn consume_word(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: char,
    ) -> Result<VhdlToken, VhdlError> {
        let mut word = Self::consume_value_pattern(train, Some(c0), char_set::is_letter_or_digit)?;
        match Keyword::match_keyword(&word) {
            Some(kw) => Ok(VhdlToken::Keyword(kw)),
            None => {
                // * bit string literal: check if the next char is a double quote
                if train.peek() == Some(&char_set::DOUBLE_QUOTE) && literal::is_base_spec(&word) {
                    word.push(char_set::DOUBLE_QUOTE);
                    train.consume();
                    return Self::consume_bit_str_literal(train, word);
                }
                Ok(VhdlToken::Identifier(Identifier::Basic(word)))
            }
        }
    }

    /// Captures the remaining characters for a bit string literal.
    ///
    /// Assumes the integer, base_specifier, and first " char are already consumed
    /// and moved as `s0`.
    pub fn consume_bit_str_literal(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        s0: String,
    ) -> Result<VhdlToken, VhdlError> {
        let mut literal = s0;
        let bit_value =
            Self::consume_value_pattern(train, None, char_set::is_graphic_and_not_double_quote)?;
        if train.peek() != Some(&char_set::DOUBLE_QUOTE) {
            return Err(VhdlError::Any(String::from(
                "expecting closing double quote for bit string literal",
            )));
        }
        literal.push_str(&bit_value);
        literal.push(char_set::DOUBLE_QUOTE);
        train.consume();
        Ok(VhdlToken::BitStrLiteral(BitStrLiteral(literal)))
    }

    /// Captures an extended identifier token.
    ///
    /// Errors if the identifier is empty.
    pub fn consume_extended_identifier(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<VhdlToken, VhdlError> {
        let id = Self::consume_literal(train, &char_set::BACKSLASH)?;
        if id.is_empty() {
            Err(VhdlError::Any(String::from(
                "extended identifier cannot be empty",
            )))
        } else {
            Ok(VhdlToken::Identifier(Identifier::Extended(id)))
        }
    }

    /// Captures a character literal.
    ///
    /// Assumes the first single quote '\'' was the last char consumed.
    pub fn consume_char_lit(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<VhdlToken, VhdlError> {
        let c = train
            .consume()
            .ok_or(VhdlError::Any(String::from("expecting a character")))?;
        if char_set::is_graphic(&c) == false {
            return Err(VhdlError::Any(String::from("char not graphic")));
        }
        match train.consume() {
            Some(char_set::SINGLE_QUOTE) => Ok(VhdlToken::CharLiteral(Character(c.to_string()))),
            Some(other) => Err(VhdlError::MissingClosingAndGot(char_set::SINGLE_QUOTE, other)),
            None => Err(VhdlError::Any(String::from(
                "expecting a single quote but got none",
            ))),
        }
    }

    /// Captures a string literal.
    ///
    /// Assumes the first double quote '\"' was the last char consumed before entering the function.
    pub fn consume_str_lit(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<VhdlToken, VhdlError> {
        let value = Self::consume_literal(train, &char_set::DOUBLE_QUOTE)?;
        Ok(VhdlToken::StrLiteral(value))
    }

    /// Collects a delimited comment (all characters after a `/*` up until `*/`).
    ///
    /// Assumes the opening '/' char was the last char consumed before entering the function.
    /// Also assumes the next char is '*'.
    pub fn consume_delim_comment(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<VhdlToken, VhdlError> {
        // skip over opening '*'
        train.consume();
        let mut note = String::new();
        while let Some(c) = train.consume() {
            if c == char_set::STAR && train.peek() == Some(&char_set::FWDSLASH) {
                train.consume();
                return Ok(VhdlToken::Comment(Comment::Delimited(note)));
            }
            note.push(c);
        }
        Err(VhdlError::Any(String::from("missing closing delimiter */")))
    }

    /// Collects a single-line comment (all characters after a `--` up until end-of-line).
    ///
    /// Assumes the opening '-' was the last char consumed before entering the function.
    /// Also assumes the next char is '-'. The line break is left in the stream.
    pub fn consume_comment(
        train: &mut TrainCar<impl Iterator<Item = char>>,
    ) -> Result<VhdlToken, VhdlError> {
        // skip over second '-'
        train.consume();
        let mut note = String::new();
        while let Some(c) = train.peek() {
            // cannot be vt, cr (\r), lf (\n)
            if c == &'\u{000B}' || c == &'\u{000D}' || c == &'\u{000A}' {
                break;
            }
            note.push(*c);
            train.consume();
        }
        Ok(VhdlToken::Comment(Comment::Single(note)))
    }

    /// Captures the longest VHDL delimiter that begins with `c0`.
    ///
    /// Assumes `c0` was the last char consumed before entering the function.
    pub fn collect_delimiter(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: char,
    ) -> Result<VhdlToken, VhdlError> {
        // delimiter will have at most 3 characters
        let mut delim = String::with_capacity(3);
        delim.push(c0);
        while let Some(c) = train.peek() {
            let mut attempt = delim.clone();
            attempt.push(*c);
            if Delimiter::transform(&attempt).is_some() || Delimiter::is_partial(&attempt) {
                delim = attempt;
                train.consume();
            } else {
                break;
            }
        }
        Self::match_delimiter(&delim)
    }

    /// Captures the generic pattern production rule by passing a fn as `eval` to compare.
    ///
    /// This function allows for an empty result to be returned as `Ok`.
    /// - A ::= A { \[ underline ] A }
    pub(crate) fn consume_value_pattern(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: Option<char>,
        eval: fn(&char) -> bool,
    ) -> Result<String, VhdlError> {
        let mut car = match c0 {
            Some(c) => String::from(c),
            None => String::new(),
        };
        while let Some(c) = train.peek() {
            if eval(c) == true {
                car.push(*c);
                train.consume();
            } else if c == &char_set::UNDERLINE {
                if car.is_empty() == true {
                    return Err(VhdlError::Any(String::from(
                        "expecting a digit before underline",
                    )));
                }
                car.push(char_set::UNDERLINE);
                train.consume();
                // a digit must proceed the underline
                match train.consume() {
                    Some(c_next) if eval(&c_next) == true => car.push(c_next),
                    Some(_) => {
                        return Err(VhdlError::Any(String::from(
                            "expecting a digit to follow underline",
                        )))
                    }
                    None => return Err(VhdlError::Any(String::from("expecting a digit"))),
                }
            } else {
                break;
            }
        }
        Ok(car)
    }

    /// Captures an exponent.
    ///
    /// Assumes the previous function has already consumed the 'E' passed as `c0`.
    /// - exponent ::= E \[ + ] integer | E - integer
    fn consume_exponent(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        c0: char,
    ) -> Result<String, VhdlError> {
        let mut expon = String::from(c0);
        if let Some(c) = train.peek().copied() {
            if c == char_set::PLUS || c == char_set::DASH {
                expon.push(c);
                train.consume();
            }
        }
        let value = Self::consume_value_pattern(train, None, char_set::is_digit)?;
        if value.is_empty() {
            return Err(VhdlError::Any(String::from(
                "expecting an integer exponent value but got nothing",
            )));
        }
        expon.push_str(&value);
        Ok(expon)
    }

    /// Walks through the stream to gather a `String` literal until finding the
    /// exiting character `br`.
    ///
    /// An escape is allowed by double placing the `br`, i.e. """hello"" world".
    pub(crate) fn consume_literal(
        train: &mut TrainCar<impl Iterator<Item = char>>,
        br: &char,
    ) -> Result<String, VhdlError> {
        let mut result = String::new();
        while let Some(c) = train.consume() {
            if char_set::is_graphic(&c) == false {
                return Err(VhdlError::Any(String::from("invalid character in literal")));
            }
            // detect escape sequence
            if br == &c {
                match train.peek() {
                    Some(c_next) if c_next == br => {
                        train.consume();
                    }
                    _ => return Ok(result),
                }
            }
            result.push(c);
        }
        Err(VhdlError::Any(format!("expecting closing delimiter {}", br)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lex(s: &str) -> Vec<VhdlToken> {
        VhdlTokenizer::from_source_code(s)
            .into_tokens_all()
            .into_iter()
            .map(|f| f.take())
            .collect()
    }

    #[test]
    fn lex_single_comment() {
        let tokens = lex("-- testbench tb of ha is\nentity");
        assert_eq!(
            tokens,
            vec![
                VhdlToken::Comment(Comment::Single(" testbench tb of ha is".to_owned())),
                VhdlToken::Keyword(Keyword::Entity),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn lex_delim_comment() {
        let tokens = lex("/* a\nb */ port");
        assert_eq!(
            tokens,
            vec![
                VhdlToken::Comment(Comment::Delimited(" a\nb ".to_owned())),
                VhdlToken::Keyword(Keyword::Port),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn lex_char_literal_and_attribute() {
        let tokens = lex("a <= std_logic'val(1) when b = '1';");
        assert_eq!(
            tokens,
            vec![
                VhdlToken::Identifier(Identifier::Basic("a".to_owned())),
                VhdlToken::Delimiter(Delimiter::SigAssign),
                VhdlToken::Identifier(Identifier::Basic("std_logic".to_owned())),
                VhdlToken::Delimiter(Delimiter::SingleQuote),
                VhdlToken::Identifier(Identifier::Basic("val".to_owned())),
                VhdlToken::Delimiter(Delimiter::ParenL),
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("1".to_owned())),
                VhdlToken::Delimiter(Delimiter::ParenR),
                VhdlToken::Keyword(Keyword::When),
                VhdlToken::Identifier(Identifier::Basic("b".to_owned())),
                VhdlToken::Delimiter(Delimiter::Eq),
                VhdlToken::CharLiteral(Character("1".to_owned())),
                VhdlToken::Delimiter(Delimiter::Terminator),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn lex_numeric() {
        assert_eq!(
            lex("16#FF# 1.5e3 8x\"A5\" 1_000"),
            vec![
                VhdlToken::AbstLiteral(AbstLiteral::Based("16#FF#".to_owned())),
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("1.5e3".to_owned())),
                VhdlToken::BitStrLiteral(BitStrLiteral("8x\"A5\"".to_owned())),
                VhdlToken::AbstLiteral(AbstLiteral::Decimal("1_000".to_owned())),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn lex_bit_str_from_word() {
        assert_eq!(
            lex("X\"0F\" b"),
            vec![
                VhdlToken::BitStrLiteral(BitStrLiteral("X\"0F\"".to_owned())),
                VhdlToken::Identifier(Identifier::Basic("b".to_owned())),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn lex_delimiters() {
        assert_eq!(
            lex(":= <= => ?/= ** <>"),
            vec![
                VhdlToken::Delimiter(Delimiter::VarAssign),
                VhdlToken::Delimiter(Delimiter::SigAssign),
                VhdlToken::Delimiter(Delimiter::Arrow),
                VhdlToken::Delimiter(Delimiter::MatchNE),
                VhdlToken::Delimiter(Delimiter::DoubleStar),
                VhdlToken::Delimiter(Delimiter::Box),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn lex_extended_identifier_and_string() {
        assert_eq!(
            lex("\\My Sig\\ \"he said \"\"hi\"\"\""),
            vec![
                VhdlToken::Identifier(Identifier::Extended("My Sig".to_owned())),
                VhdlToken::StrLiteral("he said \"hi\"".to_owned()),
                VhdlToken::EOF,
            ]
        );
    }

    #[test]
    fn lex_keywords_ignore_case() {
        assert_eq!(
            lex("ENTITY Is"),
            vec![
                VhdlToken::Keyword(Keyword::Entity),
                VhdlToken::Keyword(Keyword::Is),
                VhdlToken::EOF,
            ]
        );
    }
}
