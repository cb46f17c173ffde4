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

use serde_derive::Serialize;
use std::fmt::Display;

/// Reserved words the front end needs to tell apart from identifiers.
///
/// Reserved words outside of this set are lexed as basic identifiers, which is
/// harmless because the parser only inspects declarations it recognizes.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum Keyword {
    After,
    All,
    Architecture,
    Begin,
    Body,
    Buffer,
    Bus,
    Component,
    Configuration,
    Constant,
    Context,
    Downto,
    End,
    Entity,
    For,
    Generic,
    In,
    Inout,
    Is,
    Library,
    Linkage,
    Loop,
    Map,
    Not,
    Of,
    Out,
    Package,
    Port,
    Process,
    Range,
    Signal,
    To,
    Unaffected,
    Use,
    View,
    Wait,
    When,
}

impl Keyword {
    /// Attempts to match the given string of characters `s` to a VHDL keyword.
    ///
    /// Compares `s` against keywords using ascii lowercase comparison.
    pub fn match_keyword(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_ref() {
            "after" => Self::After,
            "all" => Self::All,
            "architecture" => Self::Architecture,
            "begin" => Self::Begin,
            "body" => Self::Body,
            "buffer" => Self::Buffer,
            "bus" => Self::Bus,
            "component" => Self::Component,
            "configuration" => Self::Configuration,
            "constant" => Self::Constant,
            "context" => Self::Context,
            "downto" => Self::Downto,
            "end" => Self::End,
            "entity" => Self::Entity,
            "for" => Self::For,
            "generic" => Self::Generic,
            "in" => Self::In,
            "inout" => Self::Inout,
            "is" => Self::Is,
            "library" => Self::Library,
            "linkage" => Self::Linkage,
            "loop" => Self::Loop,
            "map" => Self::Map,
            "not" => Self::Not,
            "of" => Self::Of,
            "out" => Self::Out,
            "package" => Self::Package,
            "port" => Self::Port,
            "process" => Self::Process,
            "range" => Self::Range,
            "signal" => Self::Signal,
            "to" => Self::To,
            "unaffected" => Self::Unaffected,
            "use" => Self::Use,
            "view" => Self::View,
            "wait" => Self::Wait,
            "when" => Self::When,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::After => "after",
            Self::All => "all",
            Self::Architecture => "architecture",
            Self::Begin => "begin",
            Self::Body => "body",
            Self::Buffer => "buffer",
            Self::Bus => "bus",
            Self::Component => "component",
            Self::Configuration => "configuration",
            Self::Constant => "constant",
            Self::Context => "context",
            Self::Downto => "downto",
            Self::End => "end",
            Self::Entity => "entity",
            Self::For => "for",
            Self::Generic => "generic",
            Self::In => "in",
            Self::Inout => "inout",
            Self::Is => "is",
            Self::Library => "library",
            Self::Linkage => "linkage",
            Self::Loop => "loop",
            Self::Map => "map",
            Self::Not => "not",
            Self::Of => "of",
            Self::Out => "out",
            Self::Package => "package",
            Self::Port => "port",
            Self::Process => "process",
            Self::Range => "range",
            Self::Signal => "signal",
            Self::To => "to",
            Self::Unaffected => "unaffected",
            Self::Use => "use",
            Self::View => "view",
            Self::Wait => "wait",
            Self::When => "when",
        }
    }

    /// Checks if the keyword is one of the port modes.
    pub fn is_mode(&self) -> bool {
        match self {
            Self::In | Self::Out | Self::Inout | Self::Buffer | Self::Linkage => true,
            _ => false,
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
