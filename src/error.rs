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

use colored::Colorize;
use std::fmt::Display;

/// Conditions that stop testbench generation altogether.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GenError {
    #[error("entity declaration on line {0} is missing a name")]
    MissingEntityName(usize),
    #[error("entity {entity:?} declares port(s) {ports} using an unsupported {form}{hint}")]
    UnsupportedPortForm {
        entity: String,
        ports: String,
        form: String,
        hint: Hint,
    },
    #[error("no entity named {0:?} exists in the source file")]
    UnknownEntity(String),
    #[error("testbench {0:?} must end before testbench {1:?} can begin")]
    NestedTestbench(String, String),
    #[error("directive '{0}' must appear inside a testbench block{1}")]
    NoActiveTestbench(String, Hint),
    #[error("directive '{0}' cannot appear {1} the 'begin' directive{2}")]
    DirectiveOutOfOrder(String, String, Hint),
    #[error("entity {entity:?} has no port named {signal:?}")]
    UnknownSignal { entity: String, signal: String },
    #[error("signal {signal:?} of type {type_name:?} cannot be toggled as a clock{hint}")]
    UnsupportedClock {
        signal: String,
        type_name: String,
        hint: Hint,
    },
    #[error("testbench {0:?} is defined more than once")]
    DuplicateTestbench(String),
    #[error("malformed directive '{0}': {1}")]
    MalformedDirective(String, String),
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    PortSimpleForm,
    TestbenchGrammar,
    DirectiveOrder,
    OneBitClock,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::PortSimpleForm => "declare ports as `<name> : <mode> <type>` without a default or 'bus'",
            Self::TestbenchGrammar => "open a block with `testbench <name> of <entity> is`",
            Self::DirectiveOrder => "directives follow the order testbench, sync, begin, every/set, end",
            Self::OneBitClock => "a clock must be of type 'bit', 'std_logic', or 'std_ulogic'",
        };
        write!(f, "\n\n{}: {}", "hint".green(), message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        let e = GenError::UnknownSignal {
            entity: String::from("ha"),
            signal: String::from("z"),
        };
        assert_eq!(e.to_string(), "entity \"ha\" has no port named \"z\"");
        let e = GenError::MissingEntityName(4);
        assert_eq!(e.to_string(), "entity declaration on line 4 is missing a name");
        let e = GenError::UnsupportedPortForm {
            entity: String::from("d"),
            ports: String::from("a, b"),
            form: String::from("mode with default expression"),
            hint: Hint::PortSimpleForm,
        };
        assert!(e
            .to_string()
            .starts_with("entity \"d\" declares port(s) a, b using an unsupported mode with default expression"));
        let e = GenError::NoActiveTestbench(String::from("every"), Hint::TestbenchGrammar);
        assert!(e.to_string().contains("hint"));
    }
}
