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

// @note: interface_signal_declaration ::= [signal] identifier_list : [ mode ] subtype_indication [ bus ] [ := static_expression ]
// @note: identifier_list ::= identifier { , identifier }

use super::super::lexer::{Span, Token};
use super::error::VhdlError;
use super::token::{Delimiter, Identifier, Keyword, VhdlToken, VhdlTokenizer};
use super::tree::{field, Node, NodeKind};

/// Builds a `Node` tree out of the token stream of a single source file.
///
/// Only the structure needed to describe entity interfaces is modeled. Every
/// other design unit is skipped over and kept as an opaque `OtherUnit`.
pub struct Parser {
    tokens: Vec<Token<VhdlToken>>,
    comments: Vec<Token<VhdlToken>>,
    index: usize,
}

fn span_of(tokens: &[Token<VhdlToken>]) -> Span {
    match (tokens.first(), tokens.last()) {
        (Some(a), Some(b)) => a.get_span().join(b.get_span()),
        _ => Span::default(),
    }
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let (comments, tokens): (Vec<Token<VhdlToken>>, Vec<Token<VhdlToken>>) =
            VhdlTokenizer::from_source_code(source)
                .into_tokens_all()
                .into_iter()
                .partition(|t| t.as_ref().as_comment().is_some());
        Self {
            tokens: tokens,
            comments: comments,
            index: 0,
        }
    }

    fn peek(&self) -> &Token<VhdlToken> {
        self.peek_nth(0)
    }

    /// References the token `n` places ahead, stopping at the final EOF token.
    fn peek_nth(&self, n: usize) -> &Token<VhdlToken> {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.index + n).min(last)]
    }

    /// Steps over the current token and returns its span.
    fn advance(&mut self) -> Span {
        let span = *self.peek().get_span();
        if self.peek().as_ref().is_eof() == false {
            self.index += 1;
        }
        span
    }

    /// Consumes tokens up to and including the next `;`.
    fn skip_through_terminator(&mut self) -> Span {
        let mut span = *self.peek().get_span();
        while self.peek().as_ref().is_eof() == false {
            let done = self.peek().as_ref().check_delimiter(&Delimiter::Terminator);
            span = span.join(&self.advance());
            if done == true {
                break;
            }
        }
        span
    }

    /// Consumes the entire token stream into a `DesignFile` node.
    pub fn parse_design_file(mut self) -> Result<Node, VhdlError> {
        let mut root = Node::leaf(NodeKind::DesignFile, Span::default());
        let mut context: Vec<Node> = Vec::new();
        loop {
            let tk = self.peek().as_ref().clone();
            let unit = match tk {
                VhdlToken::EOF => break,
                VhdlToken::Keyword(Keyword::Library) => {
                    let span = self.skip_through_terminator();
                    context.push(Node::leaf(NodeKind::LibraryClause, span));
                    continue;
                }
                VhdlToken::Keyword(Keyword::Use) => {
                    let span = self.skip_through_terminator();
                    context.push(Node::leaf(NodeKind::UseClause, span));
                    continue;
                }
                VhdlToken::Keyword(Keyword::Context)
                    if self.peek_nth(2).as_ref().check_keyword(&Keyword::Is) == false =>
                {
                    let span = self.skip_through_terminator();
                    context.push(Node::leaf(NodeKind::ContextReference, span));
                    continue;
                }
                VhdlToken::Keyword(Keyword::Entity) => self.parse_entity()?,
                VhdlToken::Keyword(Keyword::Architecture)
                | VhdlToken::Keyword(Keyword::Package)
                | VhdlToken::Keyword(Keyword::Configuration)
                | VhdlToken::Keyword(Keyword::Context) => self.parse_other_unit(tk)?,
                // stray tokens outside of any design unit
                _ => {
                    self.advance();
                    continue;
                }
            };
            root.push(Self::design_unit(context.drain(..).collect(), Some(unit)));
        }
        if context.is_empty() == false {
            root.push(Self::design_unit(context, None));
        }
        for comment in self.comments.drain(..) {
            let is_single = match comment.as_ref().as_comment() {
                Some(c) => c.is_single(),
                None => false,
            };
            if is_single == true {
                root.push(Node::leaf(NodeKind::LineComment, *comment.get_span()));
            }
        }
        root.sort_children();
        if let Some(eof) = self.tokens.last() {
            root.stretch(eof.get_span());
        }
        Ok(root)
    }

    /// Groups the context items that precede a library unit into one design unit.
    fn design_unit(context: Vec<Node>, unit: Option<Node>) -> Node {
        let mut items = context.into_iter().chain(unit.into_iter());
        let mut node = match items.next() {
            Some(first) => {
                let mut node = Node::leaf(NodeKind::DesignUnit, *first.span());
                node.push(first);
                node
            }
            None => return Node::leaf(NodeKind::DesignUnit, Span::default()),
        };
        for item in items {
            node.stretch(item.span());
            node.push(item);
        }
        node
    }

    /// Parses an entity declaration from the `entity` keyword through its closing `;`.
    fn parse_entity(&mut self) -> Result<Node, VhdlError> {
        let start = self.advance();
        let mut node = Node::leaf(NodeKind::EntityDeclaration, start);

        let name = self.peek().as_ref().as_identifier().cloned();
        if name.is_some() {
            let span = self.advance();
            node.push_field(field::NAME, Node::leaf(NodeKind::Identifier, span));
        }
        if self.peek().as_ref().check_keyword(&Keyword::Is) == true {
            self.advance();
        }
        // entity header
        loop {
            if self.peek().as_ref().check_keyword(&Keyword::Generic) == true {
                let clause = self.parse_interface_clause(NodeKind::GenericClause)?;
                node.push_field(field::GENERICS, clause);
            } else if self.peek().as_ref().check_keyword(&Keyword::Port) == true {
                let clause = self.parse_interface_clause(NodeKind::PortClause)?;
                node.push_field(field::PORTS, clause);
            } else {
                break;
            }
        }
        let end = self.skip_unit_body(name.as_ref(), &Keyword::Entity, true, NodeKind::EntityDeclaration)?;
        node.stretch(&end);
        Ok(node)
    }

    /// Skips over a design unit that does not describe an entity interface.
    fn parse_other_unit(&mut self, kw: VhdlToken) -> Result<Node, VhdlError> {
        let start = self.advance();
        if self.peek().as_ref().check_keyword(&Keyword::Body) == true {
            self.advance();
        }
        let name = self.peek().as_ref().as_identifier().cloned();
        // package instantiation declarations have no body to close
        let is_instantiation = self.peek_nth(1).as_ref().check_keyword(&Keyword::Is)
            && self.peek_nth(2).as_ref().as_identifier() == Some(&Identifier::Basic(String::from("new")));
        let end = if is_instantiation == true {
            self.skip_through_terminator()
        } else {
            let closer = kw.as_keyword().cloned().unwrap_or(Keyword::End);
            self.skip_unit_body(name.as_ref(), &closer, false, NodeKind::OtherUnit)?
        };
        Ok(Node::leaf(NodeKind::OtherUnit, start.join(&end)))
    }

    /// Consumes tokens until the `end` that closes the current design unit.
    fn skip_unit_body(
        &mut self,
        name: Option<&Identifier>,
        closer: &Keyword,
        bare_end_closes: bool,
        what: NodeKind,
    ) -> Result<Span, VhdlError> {
        let mut span = *self.peek().get_span();
        loop {
            let tk = self.peek();
            if tk.as_ref().is_eof() == true {
                return Err(VhdlError::UnexpectedEof(tk.locate().clone(), what.to_string()));
            }
            if tk.as_ref().check_keyword(&Keyword::End) == true
                && self.closes_unit(name, closer, bare_end_closes) == true
            {
                return Ok(span.join(&self.skip_through_terminator()));
            }
            span = span.join(&self.advance());
        }
    }

    /// Decides if the `end` under the cursor closes the design unit named `name`.
    fn closes_unit(&self, name: Option<&Identifier>, closer: &Keyword, bare_end_closes: bool) -> bool {
        let next = self.peek_nth(1).as_ref();
        if next.check_keyword(closer) == true {
            return true;
        }
        if next.check_delimiter(&Delimiter::Terminator) == true {
            if bare_end_closes == true {
                return true;
            }
            // a bare `end;` only closes the unit when another unit (or nothing) follows
            return match self.peek_nth(2).as_ref() {
                VhdlToken::EOF => true,
                VhdlToken::Keyword(kw) => match kw {
                    Keyword::Library
                    | Keyword::Use
                    | Keyword::Entity
                    | Keyword::Architecture
                    | Keyword::Package
                    | Keyword::Configuration
                    | Keyword::Context => true,
                    _ => false,
                },
                _ => false,
            };
        }
        match (name, next.as_identifier()) {
            (Some(n), Some(id)) => {
                n == id && self.peek_nth(2).as_ref().check_delimiter(&Delimiter::Terminator)
            }
            _ => false,
        }
    }

    /// Parses a `generic (...);` or `port (...);` clause.
    fn parse_interface_clause(&mut self, kind: NodeKind) -> Result<Node, VhdlError> {
        let start = self.advance();
        let open = self.peek().clone();
        if open.as_ref().check_delimiter(&Delimiter::ParenL) == false {
            return Err(VhdlError::Expecting(
                open.locate().clone(),
                String::from("("),
                open.as_ref().to_string(),
            ));
        }
        self.advance();

        let mut node = Node::leaf(kind, start);
        let mut depth: usize = 0;
        let mut element: Vec<Token<VhdlToken>> = Vec::new();
        let mut last = loop {
            let tk = self.peek().clone();
            match tk.as_ref() {
                VhdlToken::EOF => {
                    return Err(VhdlError::UnexpectedEof(tk.locate().clone(), kind.to_string()))
                }
                VhdlToken::Delimiter(Delimiter::ParenL) => depth += 1,
                VhdlToken::Delimiter(Delimiter::ParenR) => {
                    if depth == 0 {
                        break self.advance();
                    }
                    depth -= 1;
                }
                VhdlToken::Delimiter(Delimiter::Terminator) if depth == 0 => {
                    self.advance();
                    if let Some(decl) = Self::parse_interface_declaration(&element)? {
                        node.push(decl);
                    }
                    element.clear();
                    continue;
                }
                _ => (),
            }
            element.push(tk);
            self.advance();
        };
        if let Some(decl) = Self::parse_interface_declaration(&element)? {
            node.push(decl);
        }
        if self.peek().as_ref().check_delimiter(&Delimiter::Terminator) == true {
            last = self.advance();
        }
        node.stretch(&last);
        Ok(node)
    }

    /// Parses a single interface element (the text between two `;` of an interface list).
    fn parse_interface_declaration(
        tokens: &[Token<VhdlToken>],
    ) -> Result<Option<Node>, VhdlError> {
        let last = match tokens.last() {
            Some(t) => t,
            None => return Ok(None),
        };
        let mut i = 0;
        // skip the optional interface class
        if tokens[i].as_ref().check_keyword(&Keyword::Signal)
            || tokens[i].as_ref().check_keyword(&Keyword::Constant)
        {
            i += 1;
        }
        // collect all identifiers for this group
        let mut names: Option<Node> = None;
        while let Some(tk) = tokens.get(i) {
            if tk.as_ref().as_identifier().is_none() {
                break;
            }
            let id = Node::leaf(NodeKind::Identifier, *tk.get_span());
            match names.as_mut() {
                Some(list) => {
                    list.stretch(tk.get_span());
                    list.push(id);
                }
                None => {
                    let mut list = Node::leaf(NodeKind::IdentifierList, *tk.get_span());
                    list.push(id);
                    names = Some(list);
                }
            }
            i += 1;
            match tokens.get(i) {
                Some(t) if t.as_ref().check_delimiter(&Delimiter::Comma) => i += 1,
                _ => break,
            }
        }
        let names = match names {
            Some(n) => n,
            None => {
                let tk = tokens.get(i).unwrap_or(last);
                return Err(VhdlError::Expecting(
                    tk.locate().clone(),
                    String::from("identifier"),
                    tk.as_ref().to_string(),
                ));
            }
        };
        // skip past ':' delimiter
        match tokens.get(i) {
            Some(tk) if tk.as_ref().check_delimiter(&Delimiter::Colon) => i += 1,
            Some(tk) => {
                return Err(VhdlError::Expecting(
                    tk.locate().clone(),
                    String::from(":"),
                    tk.as_ref().to_string(),
                ))
            }
            None => {
                return Err(VhdlError::UnexpectedEof(
                    last.locate().clone(),
                    NodeKind::InterfaceDeclaration.to_string(),
                ))
            }
        }
        let rest = &tokens[i..];
        if rest.is_empty() == true {
            return Err(VhdlError::UnexpectedEof(
                last.locate().clone(),
                NodeKind::SubtypeIndication.to_string(),
            ));
        }

        let mut j = 0;
        let mode = match rest[j].as_ref().as_keyword() {
            Some(kw) if kw.is_mode() => {
                j += 1;
                Some(Node::leaf(NodeKind::Mode, *rest[0].get_span()))
            }
            _ => None,
        };
        let is_view = match rest.get(j) {
            Some(tk) if tk.as_ref().check_keyword(&Keyword::View) => {
                j += 1;
                true
            }
            _ => false,
        };
        // the subtype ends at a 'bus' keyword or ':=' delimiter
        let mut depth: usize = 0;
        let mut k = j;
        let mut bus_present = false;
        while k < rest.len() {
            match rest[k].as_ref() {
                VhdlToken::Delimiter(Delimiter::ParenL) => depth += 1,
                VhdlToken::Delimiter(Delimiter::ParenR) => depth = depth.saturating_sub(1),
                VhdlToken::Keyword(Keyword::Bus) if depth == 0 => {
                    bus_present = true;
                    break;
                }
                VhdlToken::Delimiter(Delimiter::VarAssign) if depth == 0 => break,
                _ => (),
            }
            k += 1;
        }
        if k == j {
            let tk = rest.get(k).unwrap_or(last);
            return Err(VhdlError::Expecting(
                tk.locate().clone(),
                NodeKind::SubtypeIndication.to_string(),
                tk.as_ref().to_string(),
            ));
        }
        let subtype = Self::parse_subtype(&rest[j..k])?;

        let mut tail = k;
        if bus_present == true {
            tail += 1;
        }
        let default = match rest.get(tail) {
            Some(tk) if tk.as_ref().check_delimiter(&Delimiter::VarAssign) => {
                let expr = &rest[tail + 1..];
                if expr.is_empty() == true {
                    return Err(VhdlError::UnexpectedEof(
                        last.locate().clone(),
                        NodeKind::DefaultExpression.to_string(),
                    ));
                }
                Some(Node::leaf(NodeKind::DefaultExpression, span_of(expr)))
            }
            _ => None,
        };

        let kind = if is_view == true {
            NodeKind::ViewModeIndication
        } else if default.is_some() {
            NodeKind::ModeWithDefault
        } else if bus_present == true {
            NodeKind::BusModeIndication
        } else {
            NodeKind::SimpleModeIndication
        };
        let mut indication = Node::leaf(kind, span_of(rest));
        if let Some(m) = mode {
            indication.push_field(field::MODE, m);
        }
        indication.push_field(field::SUBTYPE, subtype);
        if let Some(d) = default {
            indication.push_field(field::DEFAULT, d);
        }

        Ok(Some(
            Node::leaf(NodeKind::InterfaceDeclaration, span_of(tokens))
                .with_field(field::NAMES, names)
                .with_field(field::MODE_INDICATION, indication),
        ))
    }

    /// Parses a type mark with an optional index or range constraint.
    fn parse_subtype(tokens: &[Token<VhdlToken>]) -> Result<Node, VhdlError> {
        let mut node = Node::leaf(NodeKind::SubtypeIndication, span_of(tokens));
        let split = tokens
            .iter()
            .position(|t| {
                t.as_ref().check_delimiter(&Delimiter::ParenL)
                    || t.as_ref().check_keyword(&Keyword::Range)
            })
            .unwrap_or(tokens.len());
        if split == 0 {
            return Err(VhdlError::Expecting(
                tokens[0].locate().clone(),
                NodeKind::TypeMark.to_string(),
                tokens[0].as_ref().to_string(),
            ));
        }
        node.push_field(
            field::TYPE_MARK,
            Node::leaf(NodeKind::TypeMark, span_of(&tokens[..split])),
        );
        if split == tokens.len() {
            return Ok(node);
        }
        let inner = if tokens[split].as_ref().check_delimiter(&Delimiter::ParenL) == true {
            let mut depth: usize = 0;
            let mut close = None;
            for (i, t) in tokens.iter().enumerate().skip(split) {
                if t.as_ref().check_delimiter(&Delimiter::ParenL) == true {
                    depth += 1;
                } else if t.as_ref().check_delimiter(&Delimiter::ParenR) == true {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
            }
            match close {
                Some(c) => &tokens[split + 1..c],
                None => {
                    return Err(VhdlError::Expecting(
                        tokens[tokens.len() - 1].locate().clone(),
                        String::from(")"),
                        tokens[tokens.len() - 1].as_ref().to_string(),
                    ))
                }
            }
        } else {
            &tokens[split + 1..]
        };
        node.push_field(
            field::CONSTRAINT,
            Self::parse_range(inner, span_of(&tokens[split..])),
        );
        Ok(node)
    }

    /// Splits `left to|downto right` into its three parts.
    ///
    /// Anything that is not a single discrete range is kept as an opaque index constraint.
    fn parse_range(tokens: &[Token<VhdlToken>], span: Span) -> Node {
        let mut depth: usize = 0;
        let mut direction = None;
        for (i, t) in tokens.iter().enumerate() {
            match t.as_ref() {
                VhdlToken::Delimiter(Delimiter::ParenL) => depth += 1,
                VhdlToken::Delimiter(Delimiter::ParenR) => depth = depth.saturating_sub(1),
                // multiple dimensions are not a single range
                VhdlToken::Delimiter(Delimiter::Comma) if depth == 0 => {
                    return Node::leaf(NodeKind::IndexConstraint, span)
                }
                VhdlToken::Keyword(Keyword::To) | VhdlToken::Keyword(Keyword::Downto)
                    if depth == 0 && direction.is_none() =>
                {
                    direction = Some(i)
                }
                _ => (),
            }
        }
        match direction {
            Some(d) if d > 0 && d + 1 < tokens.len() => Node::leaf(NodeKind::RangeConstraint, span)
                .with_field(
                    field::LEFT,
                    Node::leaf(NodeKind::Expression, span_of(&tokens[..d])),
                )
                .with_field(
                    field::DIRECTION,
                    Node::leaf(NodeKind::Direction, *tokens[d].get_span()),
                )
                .with_field(
                    field::RIGHT,
                    Node::leaf(NodeKind::Expression, span_of(&tokens[d + 1..])),
                ),
            _ => Node::leaf(NodeKind::IndexConstraint, span),
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::tree::SyntaxTree;
    use super::*;

    const HALF_ADDER: &str = r#"library ieee;
use ieee.std_logic_1164.all;

entity ha is
    port (
        a, b  : in  std_logic;
        s, co : out std_logic
    );
end entity ha;

architecture rtl of ha is
begin
    s <= a xor b;
    co <= a and b;
    process(a) begin
        if a = '1' then
        end if;
    end process;
end architecture;

-- testbench tb of ha is
-- begin
-- every (a, b);
-- end;
"#;

    #[test]
    fn parse_half_adder() {
        let tree = SyntaxTree::parse(HALF_ADDER).unwrap();
        let entities = tree.nodes(NodeKind::EntityDeclaration);
        assert_eq!(entities.len(), 1);
        let name = entities[0].child_by_field(field::NAME).unwrap();
        assert_eq!(tree.text(name), "ha");
        assert_eq!(tree.text(entities[0]).ends_with("end entity ha;"), true);

        let ports = entities[0].child_by_field(field::PORTS).unwrap();
        assert_eq!(
            tree.text(ports),
            "port (\n        a, b  : in  std_logic;\n        s, co : out std_logic\n    );"
        );
        let groups: Vec<&Node> = ports.children_of(NodeKind::InterfaceDeclaration).collect();
        assert_eq!(groups.len(), 2);
        let names: Vec<&str> = groups[0]
            .descendants(NodeKind::Identifier)
            .into_iter()
            .map(|n| tree.text(n))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        let ind = groups[1].child_by_field(field::MODE_INDICATION).unwrap();
        assert_eq!(ind.kind(), NodeKind::SimpleModeIndication);
        assert_eq!(tree.text(ind.child_by_field(field::MODE).unwrap()), "out");
    }

    #[test]
    fn clauses_and_units_are_grouped() {
        let tree = SyntaxTree::parse(HALF_ADDER).unwrap();
        let units = tree.nodes(NodeKind::DesignUnit);
        assert_eq!(units.len(), 2);
        let clauses: Vec<&str> = units[0]
            .children()
            .filter(|n| n.kind().is_context_item())
            .map(|n| tree.text(n))
            .collect();
        assert_eq!(clauses, vec!["library ieee;", "use ieee.std_logic_1164.all;"]);
        assert_eq!(units[1].children_of(NodeKind::OtherUnit).count(), 1);
    }

    #[test]
    fn comments_are_collected_in_order() {
        let tree = SyntaxTree::parse(HALF_ADDER).unwrap();
        let comments: Vec<&str> = tree
            .nodes(NodeKind::LineComment)
            .into_iter()
            .map(|n| tree.text(n))
            .collect();
        assert_eq!(
            comments,
            vec![
                "-- testbench tb of ha is",
                "-- begin",
                "-- every (a, b);",
                "-- end;"
            ]
        );
    }

    #[test]
    fn parse_vector_range() {
        let src = "entity v is port (d : in std_logic_vector(WIDTH-1 downto 0); q : out unsigned (0 to 3)); end;";
        let tree = SyntaxTree::parse(src).unwrap();
        let ranges = tree.nodes(NodeKind::RangeConstraint);
        assert_eq!(ranges.len(), 2);
        let left = ranges[0].child_by_field(field::LEFT).unwrap();
        let dir = ranges[0].child_by_field(field::DIRECTION).unwrap();
        let right = ranges[0].child_by_field(field::RIGHT).unwrap();
        assert_eq!(tree.text(left), "WIDTH-1");
        assert_eq!(tree.text(dir), "downto");
        assert_eq!(tree.text(right), "0");
        assert_eq!(tree.text(ranges[1]), "(0 to 3)");
        let marks: Vec<&str> = tree
            .nodes(NodeKind::TypeMark)
            .into_iter()
            .map(|n| tree.text(n))
            .collect();
        assert_eq!(marks, vec!["std_logic_vector", "unsigned"]);
    }

    #[test]
    fn parse_integer_range_constraint() {
        let src = "entity c is port (n : in integer range 0 to 7); end entity;";
        let tree = SyntaxTree::parse(src).unwrap();
        let ranges = tree.nodes(NodeKind::RangeConstraint);
        assert_eq!(ranges.len(), 1);
        assert_eq!(tree.text(ranges[0]), "range 0 to 7");
    }

    #[test]
    fn default_and_bus_forms_are_not_simple() {
        let src = "entity d is port (a : in bit := '0'; b : inout std_logic bus; c : out bit); end d;";
        let tree = SyntaxTree::parse(src).unwrap();
        let kinds: Vec<NodeKind> = tree
            .nodes(NodeKind::InterfaceDeclaration)
            .into_iter()
            .map(|n| n.child_by_field(field::MODE_INDICATION).unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::ModeWithDefault,
                NodeKind::BusModeIndication,
                NodeKind::SimpleModeIndication
            ]
        );
        let default = tree.nodes(NodeKind::DefaultExpression);
        assert_eq!(tree.text(default[0]), "'0'");
    }

    #[test]
    fn generics_are_parsed() {
        let src = "entity g is generic (WIDTH : natural := 8); port (x : in bit_vector(WIDTH-1 downto 0)); end g;";
        let tree = SyntaxTree::parse(src).unwrap();
        let entity = tree.nodes(NodeKind::EntityDeclaration)[0];
        let generics = entity.child_by_field(field::GENERICS).unwrap();
        assert_eq!(tree.text(generics), "generic (WIDTH : natural := 8);");
        assert_eq!(generics.children_of(NodeKind::InterfaceDeclaration).count(), 1);
        assert!(entity.child_by_field(field::PORTS).is_some());
    }

    #[test]
    fn entity_without_name() {
        let src = "entity is port (a : in bit); end entity;";
        let tree = SyntaxTree::parse(src).unwrap();
        let entity = tree.nodes(NodeKind::EntityDeclaration)[0];
        assert_eq!(entity.child_by_field(field::NAME), None);
        assert!(entity.child_by_field(field::PORTS).is_some());
    }

    #[test]
    fn entity_without_ports() {
        let src = "entity top_tb is end entity top_tb; entity other is end;";
        let tree = SyntaxTree::parse(src).unwrap();
        let entities = tree.nodes(NodeKind::EntityDeclaration);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].child_by_field(field::PORTS), None);
    }

    #[test]
    fn package_units_are_skipped() {
        let src = r#"
package p is
    function f return bit;
end package p;

package body p is
    function f return bit is
    begin
        return '0';
    end;
end package body;

package q is new work.r generic map (N => 2);

entity after_pkgs is port (a : in bit); end;
"#;
        let tree = SyntaxTree::parse(src).unwrap();
        assert_eq!(tree.nodes(NodeKind::OtherUnit).len(), 3);
        assert_eq!(tree.nodes(NodeKind::EntityDeclaration).len(), 1);
    }

    #[test]
    fn unclosed_port_clause_errors() {
        let src = "entity u is port (a : in bit;";
        assert_eq!(SyntaxTree::parse(src).is_err(), true);
    }

    #[test]
    fn missing_colon_errors() {
        let src = "entity u is port (a in bit); end;";
        assert_eq!(SyntaxTree::parse(src).is_err(), true);
    }
}
