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

pub mod char_set {
    pub const DOUBLE_QUOTE: char = '\"';
    pub const BACKSLASH: char = '\\';
    pub const STAR: char = '*';
    pub const DASH: char = '-';
    pub const FWDSLASH: char = '/';
    pub const UNDERLINE: char = '_';
    pub const SINGLE_QUOTE: char = '\'';
    pub const DOT: char = '.';
    pub const HASH: char = '#';
    pub const PLUS: char = '+';

    /// Checks if `c` is a space according to VHDL-2008 LRM p225.
    /// Set: space, nbsp
    pub fn is_space(c: &char) -> bool {
        c == &'\u{0020}' || c == &'\u{00A0}'
    }

    /// Checks if `c` is a digit according to VHDL-2008 LRM p225.
    pub fn is_digit(c: &char) -> bool {
        match c {
            '0'..='9' => true,
            _ => false,
        }
    }

    /// Checks if `c` is a graphic character according to VHDL-2008 LRM p230.
    pub fn is_graphic(c: &char) -> bool {
        is_letter(c) || is_digit(c) || is_special(c) || is_other_special(c) || is_space(c)
    }

    /// Checks if `c` is an upper-case letter according to VHDL-2019 LRM p257.
    pub fn is_upper(c: &char) -> bool {
        match c {
            '\u{00D7}' => false, // reject multiplication sign
            'A'..='Z' | 'À'..='Þ' => true,
            _ => false,
        }
    }

    /// Checks if `c` is a lower-case letter according to VHDL-2019 LRM p257.
    pub fn is_lower(c: &char) -> bool {
        match c {
            '\u{00F7}' => false, // reject division sign
            'a'..='z' | 'ß'..='ÿ' => true,
            _ => false,
        }
    }

    /// Checks if `c` is a special character according to VHDL-2008 LRM p225.
    /// Set: `"#&'()*+,-./:;<=>?@[]_`|`
    pub fn is_special(c: &char) -> bool {
        match c {
            '"' | '#' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/' | ':' | ';'
            | '<' | '=' | '>' | '?' | '@' | '[' | ']' | '_' | '`' | '|' => true,
            _ => false,
        }
    }

    /// Checks if `c` is an "other special character" according to VHDL-2008 LRM p225.
    pub fn is_other_special(c: &char) -> bool {
        match c {
            '!' | '$' | '%' | '\\' | '^' | '{' | '}' | '~' | '\u{00A1}'..='\u{00BF}' | '\u{00D7}'
            | '\u{00F7}' => true,
            _ => false,
        }
    }

    /// Checks if `c` is a graphic character and is NOT a double quote.
    ///
    /// This function is exclusively used in the logic for collecting a bit string literal.
    pub fn is_graphic_and_not_double_quote(c: &char) -> bool {
        c != &DOUBLE_QUOTE && is_graphic(c)
    }

    /// Checks if `c` is a letter according to VHDL-2019 LRM p257.
    pub fn is_letter(c: &char) -> bool {
        is_lower(c) || is_upper(c)
    }

    /// Checks if `c` is a digit | letter according to VHDL-2008 LRM p230.
    pub fn is_extended_digit(c: &char) -> bool {
        is_digit(c) || is_letter(c)
    }

    /// Checks if `c` is a digit | letter according to VHDL-2008 LRM p229.
    pub fn is_letter_or_digit(c: &char) -> bool {
        is_digit(c) || is_letter(c)
    }

    /// Checks if the character is a seperator according to VHDL-2019 LRM p259.
    pub fn is_separator(c: &char) -> bool {
        // whitespace: space, nbsp
        c == &'\u{0020}' || c == &'\u{00A0}' ||
        // format-effectors: ht (\t), vt, cr (\r), lf (\n)
        c == &'\u{0009}' || c == &'\u{000B}' || c == &'\u{000D}' || c == &'\u{000A}'
    }
}

use super::super::super::lexer::{Span, Token, TokenError, Tokenize, TrainCar};
use super::super::error::VhdlError;
use super::{Delimiter, VhdlToken};

#[derive(Debug, PartialEq)]
struct VhdlElement(Result<Token<VhdlToken>, TokenError<VhdlError>>);

#[derive(Debug, PartialEq)]
pub struct VhdlTokenizer {
    tokens: Vec<VhdlElement>,
}

impl VhdlTokenizer {
    /// Generates a `VhdlTokenizer` struct from source code `s`.
    pub fn from_source_code(s: &str) -> Self {
        Self {
            tokens: Self::tokenize(s).into_iter().map(|f| VhdlElement(f)).collect(),
        }
    }

    /// Transforms the list of results into a list of tokens, silently skipping over
    /// errors.
    pub fn into_tokens_all(self) -> Vec<Token<VhdlToken>> {
        self.tokens.into_iter().filter_map(|f| f.0.ok()).collect()
    }

    /// Collects the errors found while lexing.
    pub fn as_errors(&self) -> Vec<&TokenError<VhdlError>> {
        self.tokens
            .iter()
            .filter_map(|f| match &f.0 {
                Ok(_) => None,
                Err(e) => Some(e),
            })
            .collect()
    }
}

/// Decides if a `'` begins a character literal rather than an attribute tick.
///
/// An attribute tick can only follow a name or a closing bracket.
fn begins_char_literal(prev: Option<&Result<Token<VhdlToken>, TokenError<VhdlError>>>) -> bool {
    match prev {
        Some(Ok(tk)) => match tk.as_ref() {
            VhdlToken::Identifier(_) => false,
            VhdlToken::Delimiter(d) => d != &Delimiter::ParenR && d != &Delimiter::BrackR,
            _ => true,
        },
        _ => true,
    }
}

impl Tokenize for VhdlTokenizer {
    type TokenType = VhdlToken;
    type Err = VhdlError;

    fn tokenize(s: &str) -> Vec<Result<Token<Self::TokenType>, TokenError<Self::Err>>> {
        let mut train = TrainCar::new(s.chars());
        // store results here as we consume the characters
        let mut tokens: Vec<Result<Token<Self::TokenType>, TokenError<Self::Err>>> = Vec::new();
        // consume every character (lexical analysis)
        while let Some(c) = train.consume() {
            // skip over whitespace
            if char_set::is_separator(&c) {
                continue;
            }
            let tk_loc = train.locate().clone();
            let start = train.offset() - c.len_utf8();

            let result = if char_set::is_letter(&c) {
                // collect general identifier
                VhdlToken::consume_word(&mut train, c)
            } else if c == char_set::BACKSLASH {
                // collect extended identifier
                VhdlToken::consume_extended_identifier(&mut train)
            } else if c == char_set::DOUBLE_QUOTE {
                // collect string literal
                VhdlToken::consume_str_lit(&mut train)
            } else if c == char_set::SINGLE_QUOTE && begins_char_literal(tokens.last()) {
                // collect character literal
                VhdlToken::consume_char_lit(&mut train)
            } else if char_set::is_digit(&c) {
                // collect decimal literal (or bit string literal or based literal)
                VhdlToken::consume_numeric(&mut train, c)
            } else if c == char_set::DASH && train.peek() == Some(&char_set::DASH) {
                // collect a single-line comment
                VhdlToken::consume_comment(&mut train)
            } else if c == char_set::FWDSLASH && train.peek() == Some(&char_set::STAR) {
                // collect delimited (multi-line) comment
                VhdlToken::consume_delim_comment(&mut train)
            } else {
                // collect delimiter
                VhdlToken::collect_delimiter(&mut train, c)
            };
            tokens.push(match result {
                Ok(tk) => Ok(Token::new(tk, tk_loc, Span::new(start, train.offset()))),
                Err(e) => Err(TokenError::new(e, train.locate().clone())),
            });
        }
        // push final EOF token
        let mut tk_loc = train.locate().clone();
        tk_loc.next_col();
        tokens.push(Ok(Token::new(
            VhdlToken::EOF,
            tk_loc,
            Span::new(train.offset(), train.offset()),
        )));
        tokens
    }
}

#[cfg(test)]
mod test {
    use super::super::super::super::lexer::Position;
    use super::*;

    #[test]
    fn is_separator() {
        assert_eq!(char_set::is_separator(&' '), true);
        assert_eq!(char_set::is_separator(&'\u{00A0}'), true);
        assert_eq!(char_set::is_separator(&'\t'), true);
        assert_eq!(char_set::is_separator(&'\n'), true);
        assert_eq!(char_set::is_separator(&'c'), false);
    }

    #[test]
    fn locate_tokens() {
        let s = "entity ha is\n  port (a : in bit);";
        let tokens = VhdlTokenizer::from_source_code(s).into_tokens_all();
        assert_eq!(tokens[0].locate(), &Position::place(1, 1));
        assert_eq!(tokens[0].get_span().slice(s), "entity");
        assert_eq!(tokens[1].get_span().slice(s), "ha");
        assert_eq!(tokens[3].locate(), &Position::place(2, 3));
        assert_eq!(tokens[3].get_span().slice(s), "port");
        assert_eq!(tokens.last().unwrap().as_ref(), &VhdlToken::EOF);
    }

    #[test]
    fn comment_span_excludes_line_break() {
        let s = "-- begin\r\nend";
        let tokens = VhdlTokenizer::from_source_code(s).into_tokens_all();
        assert_eq!(tokens[0].get_span().slice(s), "-- begin");
        assert_eq!(tokens[1].get_span().slice(s), "end");
    }

    #[test]
    fn errors_are_kept_aside() {
        let tkn = VhdlTokenizer::from_source_code("a <= 1ns; b");
        assert_eq!(tkn.as_errors().len(), 1);
        let tokens = tkn.into_tokens_all();
        assert_eq!(tokens.last().unwrap().as_ref(), &VhdlToken::EOF);
    }
}
