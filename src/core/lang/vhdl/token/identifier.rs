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

use super::super::super::lexer::TrainCar;
use crate::util::strcmp;
use serde_derive::Serialize;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

use super::char_set;
use super::VhdlToken;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    Basic(String),
    Extended(String),
}

impl std::cmp::Eq for Identifier {}

impl Identifier {
    // Returns the reference to the inner `String` struct.
    fn as_str(&self) -> &str {
        match self {
            Self::Basic(id) => id.as_ref(),
            Self::Extended(id) => id.as_ref(),
        }
    }

    /// Modifies the ending of the identifier with `ext`.
    pub fn into_extension(&self, ext: &str) -> Identifier {
        match self {
            Self::Basic(s) => Self::Basic(s.clone() + ext),
            Self::Extended(s) => Self::Extended(s.clone() + ext),
        }
    }

    /// Checks if `self` is an extended identifier or not.
    fn is_extended(&self) -> bool {
        match self {
            Self::Extended(_) => true,
            Self::Basic(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Basic(id) => id.len(),
            Self::Extended(id) => id.len() + 2 + (id.chars().filter(|c| c == &'\\').count()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Basic(id) => id.to_lowercase().hash(state),
            Self::Extended(id) => id.hash(state),
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum IdentifierError {
    #[error("empty identifier")]
    Empty,
    #[error("first character must be letter but found \'{0}\'")]
    InvalidFirstChar(char),
    #[error("invalid character \'{0}\' in identifier")]
    InvalidChar(char),
    #[error("characters \'{0}\' found following closing extended backslash")]
    CharsAfterDelimiter(String),
    #[error("missing closing backslash")]
    Unterminated,
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = TrainCar::new(s.chars());
        let c = chars.consume().ok_or(IdentifierError::Empty)?;
        let result = match c {
            '\\' => Self::Extended(
                VhdlToken::consume_literal(&mut chars, &char_set::BACKSLASH)
                    .map_err(|_| IdentifierError::Unterminated)?,
            ),
            _ => {
                // verify the first character was a letter
                if char_set::is_letter(&c) == false {
                    return Err(IdentifierError::InvalidFirstChar(c));
                }
                Self::Basic(
                    VhdlToken::consume_value_pattern(
                        &mut chars,
                        Some(c),
                        char_set::is_letter_or_digit,
                    )
                    .map_err(|_| IdentifierError::InvalidChar(char_set::UNDERLINE))?,
                )
            }
        };
        // gather remaining characters
        let mut rem = String::new();
        while let Some(c) = chars.consume() {
            rem.push(c);
        }
        match rem.is_empty() {
            true => Ok(result),
            false => match result {
                Self::Extended(_) => Err(IdentifierError::CharsAfterDelimiter(rem)),
                Self::Basic(_) => Err(IdentifierError::InvalidChar(rem.chars().next().unwrap_or(' '))),
            },
        }
    }
}

impl std::cmp::PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        // instantly not equal if not they are not of same type
        if self.is_extended() != other.is_extended() {
            return false;
        };
        // compare with case sensitivity
        if self.is_extended() == true {
            self.as_str() == other.as_str()
        // compare without case sensitivity
        } else {
            strcmp::cmp_ignore_case(self.as_str(), other.as_str())
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic(id) => write!(f, "{}", id),
            Self::Extended(id) => write!(f, "\\{}\\", id.replace('\\', r#"\\"#)),
        }
    }
}
