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

//! Value domains of the port types a testbench knows how to enumerate.

use crate::core::report::Report;
use crate::util::strcmp::cmp_ignore_case;
use serde_derive::Serialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub enum Direction {
    #[serde(rename = "to")]
    To,
    #[serde(rename = "downto")]
    Downto,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if cmp_ignore_case(s, "to") == true {
            Ok(Self::To)
        } else if cmp_ignore_case(s, "downto") == true {
            Ok(Self::Downto)
        } else {
            Err(format!("expected 'to' or 'downto' but found \"{}\"", s))
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::To => write!(f, "to"),
            Self::Downto => write!(f, "downto"),
        }
    }
}

/// The `left to|downto right` part of a constraint, kept as source text.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DiscreteRange {
    left: String,
    direction: Direction,
    right: String,
}

impl DiscreteRange {
    pub fn new(left: &str, direction: Direction, right: &str) -> Self {
        Self {
            left: left.trim().to_string(),
            direction: direction,
            right: right.trim().to_string(),
        }
    }

    /// Returns the (smaller, larger) bound expressions assuming a non-null range.
    fn ordered(&self) -> (&str, &str) {
        match self.direction {
            Direction::To => (&self.left, &self.right),
            Direction::Downto => (&self.right, &self.left),
        }
    }

    /// Computes the number of elements covered by the range.
    ///
    /// The result is a literal when both bounds are integer literals and an
    /// expression otherwise.
    pub fn width(&self) -> String {
        if let (Some(l), Some(r)) = (as_integer(&self.left), as_integer(&self.right)) {
            // literal ranges too large to count fall back to the expression
            let count = l
                .checked_sub(r)
                .and_then(i64::checked_abs)
                .and_then(|d| d.checked_add(1));
            if let Some(w) = count {
                return w.to_string();
            }
        }
        let (low, high) = self.ordered();
        match as_integer(low) {
            Some(0) => format!("({}) + 1", high),
            _ => format!("({}) - ({}) + 1", high, low),
        }
    }
}

fn as_integer(s: &str) -> Option<i64> {
    s.trim().replace('_', "").parse::<i64>().ok()
}

/// Computes `2**exp` when it fits comfortably in an `i64`.
fn pow2(exp: i64) -> Option<i64> {
    match exp {
        0..=62 => Some(1i64 << exp),
        _ => None,
    }
}

/// How an integer index is turned into a value of the port's type.
#[derive(Debug, PartialEq, Clone)]
enum Converter {
    Nothing,
    /// `'val` of an enumeration type, optionally offset by the position of its first used literal.
    Enumeration { mark: String, first: Option<String> },
    /// `to_unsigned`/`to_signed` of `width` bits, optionally cast to an array type.
    Numeric {
        cast: Option<String>,
        function: &'static str,
        width: String,
    },
    Integer,
}

impl Converter {
    fn apply(&self, index: &str) -> String {
        match self {
            Self::Nothing => String::new(),
            Self::Enumeration { mark, first } => match first {
                Some(lit) => format!("{0}'val({0}'pos({1}) + {2})", mark, lit, index),
                None => format!("{}'val({})", mark, index),
            },
            Self::Numeric {
                cast,
                function,
                width,
            } => {
                let value = format!("{}({}, {})", function, index, width);
                match cast {
                    Some(c) => format!("{}({})", c, value),
                    None => value,
                }
            }
            Self::Integer => index.to_string(),
        }
    }
}

/// The enumerable domain of a type along with the rule to construct each value.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Bounds {
    low: String,
    high: String,
    #[serde(skip)]
    converter: Converter,
}

impl Bounds {
    /// Bounds that signal a port must not be enumerated.
    pub fn empty() -> Self {
        Self {
            low: String::new(),
            high: String::new(),
            converter: Converter::Nothing,
        }
    }

    fn new(low: String, high: String, converter: Converter) -> Self {
        Self {
            low: low,
            high: high,
            converter: converter,
        }
    }

    /// Determines the bounds of the type named by `type_mark`.
    ///
    /// Unknown types and array types without a range are reported as warnings
    /// and resolve to the empty bounds.
    pub fn resolve(type_mark: &str, range: Option<&DiscreteRange>, report: &mut dyn Report) -> Self {
        let mark = type_mark.trim();
        // only the final part of a selected name identifies the type
        let simple = mark.rsplit('.').next().unwrap_or(mark).to_ascii_lowercase();
        match simple.as_str() {
            "std_logic" | "std_ulogic" => Self::new(
                String::from("0"),
                String::from("1"),
                Converter::Enumeration {
                    mark: mark.to_string(),
                    first: Some(String::from("'0'")),
                },
            ),
            "bit" | "boolean" => Self::new(
                String::from("0"),
                String::from("1"),
                Converter::Enumeration {
                    mark: mark.to_string(),
                    first: None,
                },
            ),
            "std_logic_vector" | "std_ulogic_vector" | "bit_vector" | "unsigned" | "signed" => {
                let range = match range {
                    Some(r) => r,
                    None => {
                        report.warn(&format!(
                            "type \"{}\" has no range constraint and cannot be enumerated",
                            mark
                        ));
                        return Self::empty();
                    }
                };
                let width = range.width();
                let cast = match simple.as_str() {
                    "unsigned" | "signed" => None,
                    _ => Some(mark.to_string()),
                };
                if simple == "signed" {
                    Self::signed_domain(width, cast)
                } else {
                    Self::unsigned_domain(width, cast)
                }
            }
            "integer" | "natural" | "positive" => match range {
                Some(r) => {
                    let (low, high) = match (as_integer(&r.left), as_integer(&r.right)) {
                        (Some(a), Some(b)) => (a.min(b).to_string(), a.max(b).to_string()),
                        _ => {
                            let (low, high) = r.ordered();
                            (low.to_string(), high.to_string())
                        }
                    };
                    Self::new(low, high, Converter::Integer)
                }
                None => {
                    report.warn(&format!(
                        "type \"{}\" needs a range constraint to be enumerated",
                        mark
                    ));
                    Self::empty()
                }
            },
            _ => {
                report.warn(&format!("unknown type \"{}\" cannot be enumerated", mark));
                Self::empty()
            }
        }
    }

    fn unsigned_domain(width: String, cast: Option<String>) -> Self {
        let high = match as_integer(&width).and_then(pow2) {
            Some(n) => (n - 1).to_string(),
            None => format!("2**({}) - 1", width),
        };
        Self::new(
            String::from("0"),
            high,
            Converter::Numeric {
                cast: cast,
                function: "to_unsigned",
                width: width,
            },
        )
    }

    fn signed_domain(width: String, cast: Option<String>) -> Self {
        let (low, high) = match as_integer(&width)
            .and_then(|w| w.checked_sub(1))
            .and_then(pow2)
        {
            Some(n) => ((-n).to_string(), (n - 1).to_string()),
            None => (
                format!("-(2**(({}) - 1))", width),
                format!("2**(({}) - 1) - 1", width),
            ),
        };
        Self::new(
            low,
            high,
            Converter::Numeric {
                cast: cast,
                function: "to_signed",
                width: width,
            },
        )
    }

    pub fn low(&self) -> &str {
        &self.low
    }

    pub fn high(&self) -> &str {
        &self.high
    }

    /// Constructs the literal expression for the value at `index`.
    pub fn convert(&self, index: &str) -> String {
        self.converter.apply(index)
    }

    /// Checks if the port can be driven through its whole domain.
    pub fn is_enumerable(&self) -> bool {
        self.low.is_empty() == false && self.high.is_empty() == false
    }

    /// Counts the values in the domain when both bounds are literals.
    pub fn domain_size(&self) -> Option<u64> {
        match (as_integer(&self.low), as_integer(&self.high)) {
            (Some(l), Some(h)) if h >= l => ((h as i128 - l as i128) as u64).checked_add(1),
            _ => None,
        }
    }

    /// Checks if values are built with `numeric_std` conversion functions.
    pub fn needs_numeric_std(&self) -> bool {
        match self.converter {
            Converter::Numeric { .. } => true,
            _ => false,
        }
    }
}
