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

use super::super::lexer::Span;
use super::error::VhdlError;
use super::parser::Parser;
use std::fmt::Display;

/// Named child fields used throughout the tree.
pub mod field {
    pub const NAME: &str = "name";
    pub const NAMES: &str = "names";
    pub const MODE_INDICATION: &str = "mode_indication";
    pub const MODE: &str = "mode";
    pub const SUBTYPE: &str = "subtype";
    pub const TYPE_MARK: &str = "type_mark";
    pub const CONSTRAINT: &str = "constraint";
    pub const LEFT: &str = "left";
    pub const DIRECTION: &str = "direction";
    pub const RIGHT: &str = "right";
    pub const DEFAULT: &str = "default";
    pub const GENERICS: &str = "generics";
    pub const PORTS: &str = "ports";
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum NodeKind {
    DesignFile,
    DesignUnit,
    LibraryClause,
    UseClause,
    ContextReference,
    EntityDeclaration,
    OtherUnit,
    GenericClause,
    PortClause,
    InterfaceDeclaration,
    IdentifierList,
    Identifier,
    SimpleModeIndication,
    ModeWithDefault,
    BusModeIndication,
    ViewModeIndication,
    Mode,
    SubtypeIndication,
    TypeMark,
    RangeConstraint,
    IndexConstraint,
    Direction,
    Expression,
    DefaultExpression,
    LineComment,
}

impl NodeKind {
    /// Checks if the node is one of the ways to describe a port's mode and type.
    pub fn is_mode_indication(&self) -> bool {
        match self {
            Self::SimpleModeIndication
            | Self::ModeWithDefault
            | Self::BusModeIndication
            | Self::ViewModeIndication => true,
            _ => false,
        }
    }

    /// Checks if the node is a context item that belongs in front of a design unit.
    pub fn is_context_item(&self) -> bool {
        match self {
            Self::LibraryClause | Self::UseClause | Self::ContextReference => true,
            _ => false,
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DesignFile => "design file",
            Self::DesignUnit => "design unit",
            Self::LibraryClause => "library clause",
            Self::UseClause => "use clause",
            Self::ContextReference => "context reference",
            Self::EntityDeclaration => "entity declaration",
            Self::OtherUnit => "design unit",
            Self::GenericClause => "generic clause",
            Self::PortClause => "port clause",
            Self::InterfaceDeclaration => "interface declaration",
            Self::IdentifierList => "identifier list",
            Self::Identifier => "identifier",
            Self::SimpleModeIndication => "simple mode indication",
            Self::ModeWithDefault => "mode with default expression",
            Self::BusModeIndication => "mode with bus keyword",
            Self::ViewModeIndication => "mode view indication",
            Self::Mode => "mode",
            Self::SubtypeIndication => "subtype indication",
            Self::TypeMark => "type mark",
            Self::RangeConstraint => "range constraint",
            Self::IndexConstraint => "index constraint",
            Self::Direction => "range direction",
            Self::Expression => "expression",
            Self::DefaultExpression => "default expression",
            Self::LineComment => "comment",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, PartialEq, Clone)]
struct Child {
    field: Option<&'static str>,
    node: Node,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    children: Vec<Child>,
}

impl Node {
    /// Creates a node with no children.
    pub fn leaf(kind: NodeKind, span: Span) -> Self {
        Self {
            kind: kind,
            span: span,
            children: Vec::new(),
        }
    }

    /// Appends an unnamed child.
    pub fn push(&mut self, node: Node) {
        self.children.push(Child {
            field: None,
            node: node,
        });
    }

    /// Appends a child that is reachable by `field`.
    pub fn push_field(&mut self, field: &'static str, node: Node) {
        self.children.push(Child {
            field: Some(field),
            node: node,
        });
    }

    /// Builder-style variant of `push_field`.
    pub fn with_field(mut self, field: &'static str, node: Node) -> Self {
        self.push_field(field, node);
        self
    }

    /// Grows the node's span to also cover `other`.
    pub fn stretch(&mut self, other: &Span) {
        self.span = self.span.join(other);
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Slices the raw source text covered by this node.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        self.span.slice(src)
    }

    /// References the first child stored under `field`, if it exists.
    pub fn child_by_field(&self, field: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.field == Some(field))
            .map(|c| &c.node)
    }

    /// Iterates over the direct children in source order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().map(|c| &c.node)
    }

    /// Iterates over the direct children of a particular `kind`.
    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.children().filter(move |n| n.kind == kind)
    }

    /// Collects every node of `kind` beneath (and including) `self` in pre-order.
    pub fn descendants(&self, kind: NodeKind) -> Vec<&Node> {
        let mut result = Vec::new();
        self.collect(kind, &mut result);
        result
    }

    fn collect<'a>(&'a self, kind: NodeKind, result: &mut Vec<&'a Node>) {
        if self.kind == kind {
            result.push(self);
        }
        for child in self.children() {
            child.collect(kind, result);
        }
    }

    /// Orders the direct children by where they begin in the source.
    pub fn sort_children(&mut self) {
        self.children.sort_by_key(|c| c.node.span.start());
    }
}

/// A parsed source file and the text it was parsed from.
#[derive(Debug, PartialEq)]
pub struct SyntaxTree {
    source: String,
    root: Node,
}

impl SyntaxTree {
    /// Parses VHDL source text into a tree.
    pub fn parse(source: &str) -> Result<Self, VhdlError> {
        let root = Parser::new(source).parse_design_file()?;
        Ok(Self {
            source: source.to_string(),
            root: root,
        })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Slices the raw source text covered by `node`.
    pub fn text(&self, node: &Node) -> &str {
        node.text(&self.source)
    }

    /// Collects every node of `kind` anywhere in the tree.
    pub fn nodes(&self, kind: NodeKind) -> Vec<&Node> {
        self.root.descendants(kind)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn field_lookup_and_descendants() {
        let src = "a : in bit";
        let name = Node::leaf(NodeKind::Identifier, Span::new(0, 1));
        let mode = Node::leaf(NodeKind::Mode, Span::new(4, 6));
        let mut ind = Node::leaf(NodeKind::SimpleModeIndication, Span::new(4, 10));
        ind.push_field(field::MODE, mode);
        let mut list = Node::leaf(NodeKind::IdentifierList, Span::new(0, 1));
        list.push(name);
        let decl = Node::leaf(NodeKind::InterfaceDeclaration, Span::new(0, 10))
            .with_field(field::NAMES, list)
            .with_field(field::MODE_INDICATION, ind);

        assert_eq!(decl.text(src), src);
        let ind = decl.child_by_field(field::MODE_INDICATION).unwrap();
        assert_eq!(ind.child_by_field(field::MODE).unwrap().text(src), "in");
        assert_eq!(decl.child_by_field(field::DEFAULT), None);
        assert_eq!(decl.descendants(NodeKind::Identifier).len(), 1);
        assert_eq!(decl.children_of(NodeKind::IdentifierList).count(), 1);
    }

    #[test]
    fn sorting_children_by_position() {
        let mut root = Node::leaf(NodeKind::DesignFile, Span::new(0, 20));
        root.push(Node::leaf(NodeKind::LineComment, Span::new(10, 12)));
        root.push(Node::leaf(NodeKind::DesignUnit, Span::new(0, 9)));
        root.sort_children();
        let kinds: Vec<NodeKind> = root.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::DesignUnit, NodeKind::LineComment]);
    }
}
