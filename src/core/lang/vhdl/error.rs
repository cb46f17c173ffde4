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

use super::super::lexer::Position;
use thiserror::Error;

/// Failures raised while tokenizing or parsing vhdl source code.
#[derive(Debug, Error, PartialEq)]
pub enum VhdlError {
    #[error("{0}")]
    Any(String),
    #[error("invalid character {0}")]
    Invalid(String),
    #[error("expecting closing {0} but got {1}")]
    MissingClosingAndGot(char, char),
    #[error("{0}: expected {1} but found {2}")]
    Expecting(Position, String, String),
    #[error("{0}: unexpected end of file while parsing {1}")]
    UnexpectedEof(Position, String),
}

impl VhdlError {
    /// Returns the source position the error points to, if it has one.
    pub fn locate(&self) -> Option<&Position> {
        match self {
            Self::Expecting(pos, _, _) | Self::UnexpectedEof(pos, _) => Some(pos),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_with_position() {
        let e = VhdlError::Expecting(Position::place(3, 7), String::from("':'"), String::from("'in'"));
        assert_eq!(e.to_string(), "3:7: expected ':' but found 'in'");
        assert_eq!(e.locate(), Some(&Position::place(3, 7)));
        assert_eq!(VhdlError::Invalid(String::from("$")).locate(), None);
    }
}
