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

pub mod bounds;
pub mod compose;
pub mod directive;
pub mod entity;
pub mod machine;

use crate::core::config::TestbenchFormat;
use crate::core::lang::vhdl::tree::{NodeKind, SyntaxTree};
use crate::core::report::Report;
use crate::error::GenError;
use entity::EntityTable;
use machine::Generator;

/// Runs every directive comment in `tree` and returns the text of all testbenches.
///
/// The text is empty when the source file does not define any testbench.
pub fn generate(
    tree: &SyntaxTree,
    entities: &EntityTable,
    format: &TestbenchFormat,
    report: &mut dyn Report,
) -> Result<String, GenError> {
    let mut generator = Generator::new(entities, format);
    for comment in tree.nodes(NodeKind::LineComment) {
        generator.process(tree.text(comment), report)?;
    }
    let fragments = generator.finish(report);
    match fragments.is_empty() {
        true => Ok(String::new()),
        false => Ok(compose::compose(&fragments)),
    }
}
