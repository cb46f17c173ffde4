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

use super::bounds::{Bounds, Direction, DiscreteRange};
use crate::core::lang::vhdl::token::Identifier;
use crate::core::lang::vhdl::tree::{field, Node, NodeKind, SyntaxTree};
use crate::core::report::{Report, ScopedReport};
use crate::error::{GenError, Hint};
use crate::util::strcmp::contains_ignore_case;
use serde_derive::Serialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub enum PortMode {
    #[serde(rename = "in")]
    In,
    #[serde(rename = "out")]
    Out,
    #[serde(rename = "inout")]
    Inout,
    #[serde(rename = "buffer")]
    Buffer,
    #[serde(rename = "linkage")]
    Linkage,
}

impl PortMode {
    /// Checks if the testbench is responsible for driving the port.
    pub fn is_driven(&self) -> bool {
        match self {
            Self::In | Self::Inout => true,
            _ => false,
        }
    }
}

impl FromStr for PortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "inout" => Ok(Self::Inout),
            "buffer" => Ok(Self::Buffer),
            "linkage" => Ok(Self::Linkage),
            _ => Err(format!("unknown port mode \"{}\"", s)),
        }
    }
}

impl Display for PortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Inout => "inout",
            Self::Buffer => "buffer",
            Self::Linkage => "linkage",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Port {
    name: Identifier,
    mode: PortMode,
    #[serde(rename = "type")]
    type_name: String,
    bounds: Bounds,
}

impl Port {
    pub fn get_name(&self) -> &Identifier {
        &self.name
    }

    pub fn get_mode(&self) -> PortMode {
        self.mode
    }

    pub fn get_type(&self) -> &str {
        &self.type_name
    }

    pub fn get_bounds(&self) -> &Bounds {
        &self.bounds
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Generic {
    name: Identifier,
    #[serde(rename = "type")]
    type_name: String,
    default: Option<String>,
}

impl Generic {
    pub fn get_name(&self) -> &Identifier {
        &self.name
    }

    pub fn get_type(&self) -> &str {
        &self.type_name
    }

    pub fn get_default(&self) -> Option<&String> {
        self.default.as_ref()
    }
}

/// Everything a testbench needs to know about one entity declaration.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Entity {
    name: Identifier,
    clauses: String,
    generic_head: Option<String>,
    generics: Vec<Generic>,
    port_head: Option<String>,
    ports: Vec<Port>,
}

impl Entity {
    pub fn get_name(&self) -> &Identifier {
        &self.name
    }

    /// References the context clauses that precede the entity, one per line.
    pub fn get_clauses(&self) -> &str {
        &self.clauses
    }

    pub fn get_generic_head(&self) -> Option<&String> {
        self.generic_head.as_ref()
    }

    pub fn get_generics(&self) -> &Vec<Generic> {
        &self.generics
    }

    pub fn get_port_head(&self) -> Option<&String> {
        self.port_head.as_ref()
    }

    /// References the ports in declaration order.
    pub fn get_ports(&self) -> &Vec<Port> {
        &self.ports
    }

    /// Finds the port called `name`, following VHDL's identifier comparison rules.
    pub fn get_port(&self, name: &str) -> Option<&Port> {
        let id = Identifier::from_str(name.trim()).ok()?;
        self.ports.iter().find(|p| p.name == id)
    }

    /// Checks if the generated text will call `numeric_std` functions that the
    /// copied context clauses do not already make visible.
    pub fn needs_numeric_std(&self) -> bool {
        self.ports.iter().any(|p| p.bounds.needs_numeric_std())
            && contains_ignore_case(&self.clauses, "numeric_std") == false
    }
}

/// The entities found in a source file, in the order they were declared.
#[derive(Debug, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct EntityTable {
    entities: Vec<Entity>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    pub fn get(&self, name: &Identifier) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Builds the table from every entity declaration in `tree`.
    pub fn extract(tree: &SyntaxTree, report: &mut dyn Report) -> Result<Self, GenError> {
        let mut table = Self::new();
        for unit in tree.root().children_of(NodeKind::DesignUnit) {
            let clauses: Vec<&str> = unit
                .children()
                .filter(|n| n.kind().is_context_item())
                .map(|n| tree.text(n))
                .collect();
            let clauses = clauses.join("\n");
            for decl in unit.children_of(NodeKind::EntityDeclaration) {
                let entity = Self::extract_entity(tree, decl, &clauses, report)?;
                table.entities.push(entity);
            }
        }
        Ok(table)
    }

    fn extract_entity(
        tree: &SyntaxTree,
        decl: &Node,
        clauses: &str,
        report: &mut dyn Report,
    ) -> Result<Entity, GenError> {
        let name = match decl.child_by_field(field::NAME) {
            Some(n) => to_identifier(tree.text(n)),
            None => {
                let line = tree.source()[..decl.span().start()].matches('\n').count() + 1;
                return Err(GenError::MissingEntityName(line));
            }
        };

        let mut generics = Vec::new();
        let generic_head = match decl.child_by_field(field::GENERICS) {
            Some(clause) => {
                for group in clause.children_of(NodeKind::InterfaceDeclaration) {
                    let (names, indication) = split_group(tree, group);
                    match indication.kind() {
                        NodeKind::SimpleModeIndication | NodeKind::ModeWithDefault => (),
                        _ => return Err(unsupported(&name, &names, indication)),
                    }
                    let type_name = indication
                        .child_by_field(field::SUBTYPE)
                        .map(|n| tree.text(n).to_string())
                        .unwrap_or_default();
                    let default = indication
                        .child_by_field(field::DEFAULT)
                        .map(|n| tree.text(n).to_string());
                    for n in names {
                        generics.push(Generic {
                            name: n,
                            type_name: type_name.clone(),
                            default: default.clone(),
                        });
                    }
                }
                Some(tree.text(clause).to_string())
            }
            None => None,
        };

        let mut ports = Vec::new();
        let port_head = match decl.child_by_field(field::PORTS) {
            Some(clause) => {
                for group in clause.children_of(NodeKind::InterfaceDeclaration) {
                    let (names, indication) = split_group(tree, group);
                    if indication.kind() != NodeKind::SimpleModeIndication {
                        return Err(unsupported(&name, &names, indication));
                    }
                    let mode = indication
                        .child_by_field(field::MODE)
                        .and_then(|n| PortMode::from_str(tree.text(n)).ok())
                        .unwrap_or(PortMode::In);
                    let subtype = match indication.child_by_field(field::SUBTYPE) {
                        Some(s) => s,
                        None => continue,
                    };
                    // resolve once for the entire group
                    let mut scoped = ScopedReport::new(
                        &mut *report,
                        format!("entity \"{}\" port(s) {}", name, join_names(&names)),
                    );
                    let bounds = resolve_subtype(tree, subtype, &mut scoped);
                    for n in names {
                        ports.push(Port {
                            name: n,
                            mode: mode,
                            type_name: tree.text(subtype).to_string(),
                            bounds: bounds.clone(),
                        });
                    }
                }
                Some(tree.text(clause).to_string())
            }
            None => None,
        };

        Ok(Entity {
            name: name,
            clauses: clauses.to_string(),
            generic_head: generic_head,
            generics: generics,
            port_head: port_head,
            ports: ports,
        })
    }
}

fn to_identifier(s: &str) -> Identifier {
    Identifier::from_str(s).unwrap_or_else(|_| Identifier::Basic(s.to_string()))
}

fn join_names(names: &Vec<Identifier>) -> String {
    names
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

fn unsupported(entity: &Identifier, names: &Vec<Identifier>, indication: &Node) -> GenError {
    GenError::UnsupportedPortForm {
        entity: entity.to_string(),
        ports: join_names(names),
        form: indication.kind().to_string(),
        hint: Hint::PortSimpleForm,
    }
}

/// Separates an interface group into its declared names and its mode indication.
fn split_group<'a>(tree: &SyntaxTree, group: &'a Node) -> (Vec<Identifier>, &'a Node) {
    let names = match group.child_by_field(field::NAMES) {
        Some(list) => list
            .children_of(NodeKind::Identifier)
            .map(|n| to_identifier(tree.text(n)))
            .collect(),
        None => Vec::new(),
    };
    let indication = group.child_by_field(field::MODE_INDICATION).unwrap_or(group);
    (names, indication)
}

fn resolve_subtype(tree: &SyntaxTree, subtype: &Node, report: &mut dyn Report) -> Bounds {
    let mark = match subtype.child_by_field(field::TYPE_MARK) {
        Some(m) => tree.text(m),
        None => tree.text(subtype),
    };
    let range = subtype
        .child_by_field(field::CONSTRAINT)
        .filter(|c| c.kind() == NodeKind::RangeConstraint)
        .and_then(|c| {
            let left = c.child_by_field(field::LEFT)?;
            let dir = c.child_by_field(field::DIRECTION)?;
            let right = c.child_by_field(field::RIGHT)?;
            Some(DiscreteRange::new(
                tree.text(left),
                Direction::from_str(tree.text(dir)).ok()?,
                tree.text(right),
            ))
        });
    Bounds::resolve(mark, range.as_ref(), report)
}
