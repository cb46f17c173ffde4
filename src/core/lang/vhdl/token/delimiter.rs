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

use std::fmt::Display;

/// Declares every delimiter along with the text that spells it.
macro_rules! delimiters {
    ($($variant:ident => $text:literal,)*) => {
        #[derive(Debug, PartialEq, Clone, Copy)]
        pub enum Delimiter {
            $($variant,)*
        }

        impl Delimiter {
            /// Every delimiter in declaration order.
            pub const ALL: &'static [Delimiter] = &[$(Self::$variant,)*];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }

            fn lookup(s: &str) -> Option<Self> {
                match s {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

delimiters! {
    Ampersand => "&",
    SingleQuote => "'",
    ParenL => "(",
    ParenR => ")",
    Star => "*",
    Plus => "+",
    Comma => ",",
    Dash => "-",
    Dot => ".",
    FwdSlash => "/",
    Colon => ":",
    Terminator => ";",
    Lt => "<",
    Eq => "=",
    Gt => ">",
    BackTick => "`",
    Pipe => "|",
    BrackL => "[",
    BrackR => "]",
    Question => "?",
    AtSymbol => "@",
    Arrow => "=>",
    DoubleStar => "**",
    VarAssign => ":=",
    Inequality => "/=",
    GTE => ">=",
    SigAssign => "<=",
    Box => "<>",
    SigAssoc => "<=>",
    CondConv => "??",
    MatchEQ => "?=",
    MatchNE => "?/=",
    MatchLT => "?<",
    MatchLTE => "?<=",
    MatchGT => "?>",
    MatchGTE => "?>=",
    DoubleLT => "<<",
    DoubleGT => ">>",
}

impl Delimiter {
    /// Attempts to match the characters `s` to a delimiter.
    ///
    /// The replacement character `!` is accepted for `|`.
    pub fn transform(s: &str) -> Option<Self> {
        match s {
            "!" => Some(Self::Pipe),
            _ => Self::lookup(s),
        }
    }

    /// Checks if `s` is the beginning of a longer delimiter without being a
    /// delimiter itself.
    pub fn is_partial(s: &str) -> bool {
        Self::transform(s).is_none()
            && Self::ALL
                .iter()
                .any(|d| d.as_str().len() > s.len() && d.as_str().starts_with(s))
    }
}

impl Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
