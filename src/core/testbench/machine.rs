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

use super::directive::Directive;
use super::entity::{Entity, EntityTable, Port};
use crate::core::config::TestbenchFormat;
use crate::core::lang::vhdl::token::Identifier;
use crate::core::report::Report;
use crate::error::{GenError, Hint};
use crate::util::strcmp::{cmp_ignore_case, contains_ignore_case};
use std::str::FromStr;

/// Loops beyond this many iterations are reported as likely mistakes.
const LARGE_DOMAIN: u64 = 1 << 16;

const DONE_SIGNAL: &str = "tb_done";

#[derive(Debug, PartialEq, Clone, Copy)]
enum Phase {
    /// Between `testbench` and `begin`.
    Declaring,
    /// Between `begin` and `end`.
    Running,
}

/// Generation state for the testbench block currently being written.
#[derive(Debug, PartialEq)]
struct State<'a> {
    entity: &'a Entity,
    name: Identifier,
    sync: String,
    clock: Option<Identifier>,
    phase: Phase,
}

/// Turns a stream of directive comments into testbench source text.
pub struct Generator<'a> {
    entities: &'a EntityTable,
    format: &'a TestbenchFormat,
    state: Option<State<'a>>,
    written: Vec<Identifier>,
    fragments: Vec<String>,
}

impl<'a> Generator<'a> {
    pub fn new(entities: &'a EntityTable, format: &'a TestbenchFormat) -> Self {
        Self {
            entities: entities,
            format: format,
            state: None,
            written: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// References the text emitted so far, one entry per directive.
    pub fn fragments(&self) -> &Vec<String> {
        &self.fragments
    }

    /// Checks if a testbench block is currently open.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Processes the contents of a single-line comment.
    pub fn process(&mut self, comment: &str, report: &mut dyn Report) -> Result<(), GenError> {
        let directive = match Directive::from_comment(comment) {
            Ok(d) => d,
            Err(e) => {
                let (word, _) = Directive::leading_word(comment);
                let text = Directive::strip_marker(comment);
                if cmp_ignore_case(word, "testbench") == true {
                    report.warn(&format!("ignoring malformed directive '{}': {}", text, e));
                    return Ok(());
                }
                // ordinary comments are free to start with a keyword outside of a block
                return match self.state {
                    Some(_) => Err(GenError::MalformedDirective(text.to_string(), e)),
                    None => Ok(()),
                };
            }
        };

        if let Directive::Testbench { name, entity } = &directive {
            return self.open(name, entity);
        }
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => {
                return match directive {
                    Directive::Other(_) => Ok(()),
                    _ => Err(GenError::NoActiveTestbench(
                        directive.keyword().to_string(),
                        Hint::TestbenchGrammar,
                    )),
                }
            }
        };
        // verify the directive is allowed in the current phase
        match (&directive, state.phase) {
            (Directive::Sync { .. }, Phase::Running) | (Directive::Begin, Phase::Running) => {
                return Err(GenError::DirectiveOutOfOrder(
                    directive.keyword().to_string(),
                    String::from("after"),
                    Hint::DirectiveOrder,
                ))
            }
            (Directive::Every(_), Phase::Declaring)
            | (Directive::Set(_), Phase::Declaring)
            | (Directive::End, Phase::Declaring) => {
                return Err(GenError::DirectiveOutOfOrder(
                    directive.keyword().to_string(),
                    String::from("before"),
                    Hint::DirectiveOrder,
                ))
            }
            _ => (),
        }

        match directive {
            Directive::Testbench { .. } => Ok(()),
            Directive::Sync { clock, duration } => {
                state.sync = duration;
                if let Some(clk) = clock {
                    let port = lookup(state.entity, &clk)?;
                    if is_one_bit(port.get_type()) == false {
                        return Err(GenError::UnsupportedClock {
                            signal: port.get_name().to_string(),
                            type_name: port.get_type().to_string(),
                            hint: Hint::OneBitClock,
                        });
                    }
                    state.clock = Some(port.get_name().clone());
                }
                Ok(())
            }
            Directive::Begin => {
                let text = self.begin(report);
                self.fragments.push(text);
                Ok(())
            }
            Directive::Every(signals) => {
                let text = self.every(signals, report)?;
                self.fragments.push(text);
                Ok(())
            }
            Directive::Set(statements) => {
                let text = self.set(statements)?;
                self.fragments.push(text);
                Ok(())
            }
            Directive::End => {
                let text = self.end();
                self.fragments.push(text);
                Ok(())
            }
            Directive::Other(word) => {
                report.warn(&format!("ignoring unknown directive '{}'", word));
                Ok(())
            }
        }
    }

    /// Closes any block left open and returns the emitted fragments.
    pub fn finish(mut self, report: &mut dyn Report) -> Vec<String> {
        if let Some(state) = &self.state {
            report.warn(&format!(
                "testbench \"{}\" is missing its 'end' directive",
                state.name
            ));
            if state.phase == Phase::Declaring {
                let text = self.begin(report);
                self.fragments.push(text);
            }
            let text = self.end();
            self.fragments.push(text);
        }
        self.fragments
    }

    /// Handles `testbench <name> of <entity> is`.
    fn open(&mut self, name: &str, entity: &str) -> Result<(), GenError> {
        let entities = self.entities;
        let entity = match Identifier::from_str(entity)
            .ok()
            .and_then(|id| entities.get(&id))
        {
            Some(e) => e,
            None => return Err(GenError::UnknownEntity(entity.to_string())),
        };
        let tb_name = match cmp_ignore_case(name, "tb") {
            true => entity.get_name().into_extension("_tb"),
            false => entity.get_name().into_extension(&format!("_tb_{}", name)),
        };
        if let Some(s) = &self.state {
            return Err(GenError::NestedTestbench(
                s.name.to_string(),
                tb_name.to_string(),
            ));
        }
        if self.written.contains(&tb_name) == true {
            return Err(GenError::DuplicateTestbench(tb_name.to_string()));
        }

        let mut text = String::from("\n");
        if entity.get_clauses().is_empty() == false {
            text.push_str(entity.get_clauses());
            text.push('\n');
        }
        if entity.needs_numeric_std() == true {
            if contains_ignore_case(entity.get_clauses(), "library ieee") == false {
                text.push_str("library ieee;\n");
            }
            text.push_str("use ieee.numeric_std.all;\n");
        }
        text.push_str(&format!("\nentity {} is\nend entity;\n", tb_name));
        self.fragments.push(text);

        self.written.push(tb_name.clone());
        self.state = Some(State {
            entity: entity,
            name: tb_name,
            sync: self.format.get_sync().to_string(),
            clock: None,
            phase: Phase::Declaring,
        });
        Ok(())
    }

    /// Handles `begin` by declaring the architecture up through the start of the stimulus process.
    fn begin(&mut self, report: &mut dyn Report) -> String {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return String::new(),
        };
        state.phase = Phase::Running;
        let entity = state.entity;
        let fmt = self.format;
        let (i1, i2, i3) = (fmt.indent(1), fmt.indent(2), fmt.indent(3));

        let mut text = format!(
            "\narchitecture {} of {} is\n",
            fmt.get_architecture_name(),
            state.name
        );
        // component declaration
        text.push_str(&format!("{}component {} is\n", i1, entity.get_name()));
        if let Some(head) = entity.get_generic_head() {
            text.push_str(&reindent(head, &i2, &i3));
            text.push('\n');
        }
        if let Some(head) = entity.get_port_head() {
            text.push_str(&reindent(head, &i2, &i3));
            text.push('\n');
        }
        text.push_str(&format!("{}end component;\n\n", i1));

        // constants standing in for the generics
        let mut mapped = Vec::new();
        for g in entity.get_generics() {
            match g.get_default() {
                Some(value) => {
                    text.push_str(&format!(
                        "{}constant {} : {} := {};\n",
                        i1,
                        g.get_name(),
                        g.get_type(),
                        value
                    ));
                    mapped.push(g.get_name());
                }
                None => report.warn(&format!(
                    "generic \"{}\" of entity \"{}\" has no default value and is left unmapped",
                    g.get_name(),
                    entity.get_name()
                )),
            }
        }
        for p in entity.get_ports() {
            let is_clock = state.clock.as_ref() == Some(p.get_name());
            text.push_str(&format!(
                "{}signal {} : {}{};\n",
                i1,
                p.get_name(),
                p.get_type(),
                if is_clock { " := '0'" } else { "" }
            ));
        }
        text.push_str(&format!("{}signal {} : bit := '0';\n", i1, DONE_SIGNAL));
        text.push_str("begin\n");

        // instantiation
        let mut maps = Vec::new();
        if mapped.is_empty() == false {
            maps.push(association_list("generic", mapped.into_iter(), &i2, &i3));
        }
        if entity.get_ports().is_empty() == false {
            maps.push(association_list(
                "port",
                entity.get_ports().iter().map(|p| p.get_name()),
                &i2,
                &i3,
            ));
        }
        text.push_str(&format!(
            "{}{}: {}",
            i1,
            fmt.get_instance_name(),
            entity.get_name()
        ));
        if maps.is_empty() == false {
            text.push('\n');
            text.push_str(&maps.join("\n"));
        }
        text.push_str(";\n\n");

        if let Some(clk) = &state.clock {
            text.push_str(&format!(
                "{0}{1} <= not {1} after 0.5 * {2} when {3} = '0' else unaffected;\n\n",
                i1, clk, state.sync, DONE_SIGNAL
            ));
        }
        text.push_str(&format!(
            "{}{}: process\n{}begin\n",
            i1,
            fmt.get_process_name(),
            i1
        ));
        text
    }

    /// Handles `every` by nesting one loop per signal with a single wait in the innermost body.
    fn every(
        &mut self,
        signals: Option<Vec<String>>,
        report: &mut dyn Report,
    ) -> Result<String, GenError> {
        let state = match self.state.as_ref() {
            Some(s) => s,
            None => return Ok(String::new()),
        };
        let entity = state.entity;
        let is_clock = |p: &Port| state.clock.as_ref() == Some(p.get_name());

        let ports: Vec<&Port> = match signals {
            Some(names) => {
                let mut ports = Vec::with_capacity(names.len());
                for name in names {
                    let port = lookup(entity, &name)?;
                    if port.get_bounds().is_enumerable() == false {
                        report.warn(&format!(
                            "skipping signal \"{}\" because type \"{}\" cannot be enumerated",
                            port.get_name(),
                            port.get_type()
                        ));
                    } else if is_clock(port) == true {
                        report.warn(&format!(
                            "skipping signal \"{}\" because it is driven as the clock",
                            port.get_name()
                        ));
                    } else {
                        ports.push(port);
                    }
                }
                ports
            }
            None => entity
                .get_ports()
                .iter()
                .filter(|p| {
                    p.get_mode().is_driven()
                        && is_clock(*p) == false
                        && p.get_bounds().is_enumerable()
                })
                .collect(),
        };
        if ports.is_empty() == true {
            report.warn(&format!(
                "directive 'every' in testbench \"{}\" has no signals to enumerate",
                state.name
            ));
            return Ok(String::new());
        }

        let sizes: Option<Vec<u64>> = ports
            .iter()
            .map(|p| p.get_bounds().domain_size())
            .collect();
        let total = sizes.and_then(|s| s.into_iter().try_fold(1u64, |acc, n| acc.checked_mul(n)));
        if let Some(total) = total {
            if total > LARGE_DOMAIN {
                report.warn(&format!(
                    "directive 'every' in testbench \"{}\" expands to {} iterations",
                    state.name, total
                ));
            }
        }

        let mut text = String::new();
        let depth = 2;
        let mut taken: Vec<Identifier> = Vec::with_capacity(ports.len());
        for (i, p) in ports.iter().enumerate() {
            let index = loop_index(entity, p, &taken);
            taken.push(index.clone());
            let bounds = p.get_bounds();
            text.push_str(&format!(
                "{}for {} in {} to {} loop\n",
                self.format.indent(depth + i),
                index,
                bounds.low(),
                bounds.high()
            ));
            text.push_str(&format!(
                "{}{} <= {};\n",
                self.format.indent(depth + i + 1),
                p.get_name(),
                bounds.convert(&index.to_string())
            ));
        }
        text.push_str(&format!(
            "{}wait for {};\n",
            self.format.indent(depth + ports.len()),
            state.sync
        ));
        for i in (0..ports.len()).rev() {
            text.push_str(&format!("{}end loop;\n", self.format.indent(depth + i)));
        }
        Ok(text)
    }

    /// Handles `set` by copying each assignment and holding them for one sync interval.
    fn set(&mut self, statements: Vec<String>) -> Result<String, GenError> {
        let state = match self.state.as_ref() {
            Some(s) => s,
            None => return Ok(String::new()),
        };
        let i2 = self.format.indent(2);
        let mut text = String::new();
        for stmt in statements {
            let target = match stmt.split_once("<=") {
                Some((lhs, _)) => lhs.split('(').next().unwrap_or(lhs).trim(),
                None => {
                    return Err(GenError::MalformedDirective(
                        stmt.to_string(),
                        String::from("expected a signal assignment using '<='"),
                    ))
                }
            };
            lookup(state.entity, target)?;
            text.push_str(&format!("{}{};\n", i2, stmt));
        }
        text.push_str(&format!("{}wait for {};\n", i2, state.sync));
        Ok(text)
    }

    /// Handles `end` by finishing the process and architecture, then clearing the state.
    fn end(&mut self) -> String {
        if self.state.take().is_none() {
            return String::new();
        }
        let (i1, i2) = (self.format.indent(1), self.format.indent(2));
        format!(
            "{2}{0} <= '1';\n{2}wait;\n{1}end process;\nend architecture;\n",
            DONE_SIGNAL, i1, i2
        )
    }
}

/// Checks if `type_name` names a one-bit type that can be toggled with `not`.
fn is_one_bit(type_name: &str) -> bool {
    let name = type_name.trim();
    let simple = name.rsplit('.').next().unwrap_or(name);
    ["bit", "std_logic", "std_ulogic"]
        .iter()
        .any(|t| cmp_ignore_case(simple, t))
}

/// Names the loop parameter for `port` so it hides nothing else in scope.
fn loop_index(entity: &Entity, port: &Port, taken: &[Identifier]) -> Identifier {
    let clashes = |id: &Identifier| {
        entity.get_ports().iter().any(|p| p.get_name() == id)
            || entity.get_generics().iter().any(|g| g.get_name() == id)
            || taken.contains(id)
            || cmp_ignore_case(&id.to_string(), DONE_SIGNAL)
    };
    let mut index = port.get_name().into_extension("_idx");
    let mut n = 1;
    while clashes(&index) == true {
        index = port.get_name().into_extension(&format!("_idx{}", n));
        n += 1;
    }
    index
}

/// Lays out a copied interface clause so its first line and closing parenthesis
/// start at `outer` while the lines in between start at `inner`.
///
/// Indentation between the inner lines is kept relative to the shallowest one.
fn reindent(head: &str, outer: &str, inner: &str) -> String {
    let mut lines = head.lines();
    let first = lines.next().unwrap_or("").trim();
    let rest: Vec<&str> = lines.filter(|l| l.trim().is_empty() == false).collect();
    let depth = |l: &str| l.len() - l.trim_start().len();
    let closes = |l: &str| l.trim_start().starts_with(')');
    let base = rest
        .iter()
        .filter(|l| closes(*l) == false)
        .map(|l| depth(*l))
        .min()
        .unwrap_or(0);

    let mut text = format!("{}{}", outer, first);
    for line in rest {
        text.push('\n');
        match closes(line) {
            true => text.push_str(outer),
            false => {
                text.push_str(inner);
                text.push_str(&" ".repeat(depth(line).saturating_sub(base)));
            }
        }
        text.push_str(line.trim());
    }
    text
}

fn lookup<'e>(entity: &'e Entity, name: &str) -> Result<&'e Port, GenError> {
    entity.get_port(name).ok_or(GenError::UnknownSignal {
        entity: entity.get_name().to_string(),
        signal: name.to_string(),
    })
}

/// Writes a `generic map` or `port map` that associates every name with itself.
fn association_list<'i>(
    keyword: &str,
    names: impl Iterator<Item = &'i Identifier>,
    outer: &str,
    inner: &str,
) -> String {
    let items: Vec<String> = names.map(|n| format!("{}{} => {}", inner, n, n)).collect();
    format!("{}{} map (\n{}\n{})", outer, keyword, items.join(",\n"), outer)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::lang::vhdl::tree::SyntaxTree;
    use crate::core::report::{ReportLog, Severity};

    const HALF_ADDER: &str = r#"library ieee;
use ieee.std_logic_1164.all;

entity ha is
  port (
    a, b  : in  std_logic;
    s, co : out std_logic
  );
end entity;

entity ctr is
  port (clk : in std_logic; rst : in bit; q : out std_logic_vector(3 downto 0));
end entity;
"#;

    fn table() -> EntityTable {
        let tree = SyntaxTree::parse(HALF_ADDER).unwrap();
        EntityTable::extract(&tree, &mut ReportLog::new()).unwrap()
    }

    fn run(gen: &mut Generator, log: &mut ReportLog, lines: &[&str]) -> Result<(), GenError> {
        for l in lines {
            gen.process(l, log)?;
        }
        Ok(())
    }

    #[test]
    fn opening_emits_entity_shell() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        gen.process("-- testbench tb of ha is", &mut log).unwrap();
        assert_eq!(gen.is_active(), true);
        assert_eq!(
            gen.fragments()[0],
            "\nlibrary ieee;\nuse ieee.std_logic_1164.all;\n\nentity ha_tb is\nend entity;\n"
        );
    }

    #[test]
    fn numeric_std_is_imported() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        gen.process("-- testbench tb of ctr is", &mut log).unwrap();
        assert_eq!(
            gen.fragments()[0],
            "\nlibrary ieee;\nuse ieee.numeric_std.all;\n\nentity ctr_tb is\nend entity;\n"
        );
    }

    #[test]
    fn named_testbench() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        gen.process("-- testbench reset of HA is", &mut log).unwrap();
        assert_eq!(gen.fragments()[0].contains("entity ha_tb_reset is"), true);
    }

    #[test]
    fn every_nests_loops_in_order() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        run(
            &mut gen,
            &mut log,
            &["-- testbench tb of ha is", "-- begin", "-- every (a, b);"],
        )
        .unwrap();
        assert_eq!(
            gen.fragments()[2],
            "    for a_idx in 0 to 1 loop
      a <= std_logic'val(std_logic'pos('0') + a_idx);
      for b_idx in 0 to 1 loop
        b <= std_logic'val(std_logic'pos('0') + b_idx);
        wait for 1 ns;
      end loop;
    end loop;
"
        );
    }

    #[test]
    fn every_without_list_uses_inputs() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        run(
            &mut gen,
            &mut log,
            &[
                "-- testbench tb of ctr is",
                "-- sync (clk) every 10 ns;",
                "-- begin",
                "-- every;",
            ],
        )
        .unwrap();
        let body = &gen.fragments()[2];
        assert_eq!(body.contains("for rst_idx in 0 to 1 loop"), true);
        assert_eq!(body.contains("clk_idx"), false);
        assert_eq!(body.contains("q_idx"), false);
        assert_eq!(body.contains("wait for 10 ns;"), true);

        let arch = &gen.fragments()[1];
        assert_eq!(arch.contains("  signal clk : std_logic := '0';\n"), true);
        assert_eq!(
            arch.contains("  clk <= not clk after 0.5 * 10 ns when tb_done = '0' else unaffected;\n"),
            true
        );
    }

    #[test]
    fn clock_is_not_enumerated_explicitly() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        run(
            &mut gen,
            &mut log,
            &[
                "-- testbench tb of ctr is",
                "-- sync (CLK) every 10 ns;",
                "-- begin",
                "-- every (clk, rst);",
            ],
        )
        .unwrap();
        assert_eq!(log.count(Severity::Warning), 1);
        assert_eq!(gen.fragments()[2].contains("clk_idx"), false);
    }

    #[test]
    fn set_holds_for_one_interval() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        run(
            &mut gen,
            &mut log,
            &[
                "-- testbench tb of ha is",
                "-- sync every 2 ns;",
                "-- begin",
                "-- set (a <= '1'; b <= '0');",
            ],
        )
        .unwrap();
        assert_eq!(
            gen.fragments()[2],
            "    a <= '1';\n    b <= '0';\n    wait for 2 ns;\n"
        );
        let err = gen.process("-- set (z <= '1');", &mut log).unwrap_err();
        assert_eq!(
            err,
            GenError::UnknownSignal {
                entity: String::from("ha"),
                signal: String::from("z")
            }
        );
    }

    #[test]
    fn state_resets_between_blocks() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        run(
            &mut gen,
            &mut log,
            &[
                "-- testbench tb of ctr is",
                "-- sync (clk) every 7 ns;",
                "-- begin",
                "-- end;",
                "-- testbench second of ctr is",
                "-- begin",
                "-- every (rst);",
                "-- end;",
            ],
        )
        .unwrap();
        assert_eq!(gen.is_active(), false);
        let second_arch = &gen.fragments()[4];
        assert_eq!(second_arch.contains("architecture sim of ctr_tb_second is"), true);
        assert_eq!(second_arch.contains("unaffected"), false);
        assert_eq!(second_arch.contains(":= '0';\n  signal rst"), false);
        assert_eq!(gen.fragments()[5].contains("wait for 1 ns;"), true);
        assert_eq!(gen.fragments()[5].contains("7 ns"), false);
    }

    #[test]
    fn end_closes_everything() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        run(
            &mut gen,
            &mut log,
            &["-- testbench tb of ha is", "-- begin", "-- end;"],
        )
        .unwrap();
        assert_eq!(
            gen.fragments()[2],
            "    tb_done <= '1';\n    wait;\n  end process;\nend architecture;\n"
        );
    }

    #[test]
    fn directives_require_an_open_block() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        // plain comments are skipped
        run(&mut gen, &mut log, &["-- set the outputs", "-- the adder"]).unwrap();
        assert_eq!(
            gen.process("-- every (a);", &mut log),
            Err(GenError::NoActiveTestbench(
                String::from("every"),
                Hint::TestbenchGrammar
            ))
        );
        assert_eq!(gen.fragments().len(), 0);
    }

    #[test]
    fn directives_must_follow_phase_order() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        gen.process("-- testbench tb of ha is", &mut log).unwrap();
        assert_eq!(
            gen.process("-- every;", &mut log),
            Err(GenError::DirectiveOutOfOrder(
                String::from("every"),
                String::from("before"),
                Hint::DirectiveOrder
            ))
        );
        gen.process("-- begin", &mut log).unwrap();
        assert_eq!(
            gen.process("-- sync every 3 ns;", &mut log),
            Err(GenError::DirectiveOutOfOrder(
                String::from("sync"),
                String::from("after"),
                Hint::DirectiveOrder
            ))
        );
    }

    #[test]
    fn nesting_and_duplicates_are_rejected() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        gen.process("-- testbench tb of ha is", &mut log).unwrap();
        assert_eq!(
            gen.process("-- testbench other of ha is", &mut log),
            Err(GenError::NestedTestbench(
                String::from("ha_tb"),
                String::from("ha_tb_other")
            ))
        );
        run(&mut gen, &mut log, &["-- begin", "-- end;"]).unwrap();
        assert_eq!(
            gen.process("-- testbench TB of ha is", &mut log),
            Err(GenError::DuplicateTestbench(String::from("ha_tb")))
        );
        assert_eq!(
            gen.process("-- testbench tb of fa is", &mut log),
            Err(GenError::UnknownEntity(String::from("fa")))
        );
    }

    #[test]
    fn soft_failures_warn() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        run(
            &mut gen,
            &mut log,
            &[
                "-- testbench of ha",
                "-- testbench tb of ha is",
                "-- begin",
                "-- assert the outputs",
            ],
        )
        .unwrap();
        assert_eq!(log.count(Severity::Warning), 2);
        assert_eq!(log.mentions("assert"), true);
        assert_eq!(gen.process("-- every (a", &mut log).is_err(), true);
    }

    #[test]
    fn unterminated_block_is_closed() {
        let table = table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        gen.process("-- testbench tb of ha is", &mut log).unwrap();
        let fragments = gen.finish(&mut log);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[2].ends_with("end architecture;\n"), true);
        assert_eq!(log.mentions("missing its 'end'"), true);
    }

    const ODD_NAMES: &str = r#"entity odd is
  generic (a_idx1 : natural := 0);
  port (
    a, a_idx : in bit;
    c : in std_logic_vector(1 downto 0);
    ok : in boolean
  );
end entity;
"#;

    fn odd_table() -> EntityTable {
        let tree = SyntaxTree::parse(ODD_NAMES).unwrap();
        EntityTable::extract(&tree, &mut ReportLog::new()).unwrap()
    }

    #[test]
    fn clock_must_be_one_bit() {
        let table = odd_table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        gen.process("-- testbench tb of odd is", &mut log).unwrap();
        let err = gen.process("-- sync (c) every 2 ns;", &mut log).unwrap_err();
        assert_eq!(
            err,
            GenError::UnsupportedClock {
                signal: String::from("c"),
                type_name: String::from("std_logic_vector(1 downto 0)"),
                hint: Hint::OneBitClock,
            }
        );
        assert!(gen.process("-- sync (ok) every 2 ns;", &mut log).is_err());
        gen.process("-- sync (a) every 2 ns;", &mut log).unwrap();
        assert_eq!(is_one_bit("ieee.std_logic_1164.STD_ULOGIC"), true);
        assert_eq!(is_one_bit("integer"), false);
    }

    #[test]
    fn loop_parameters_avoid_port_names() {
        let table = odd_table();
        let fmt = TestbenchFormat::new();
        let mut gen = Generator::new(&table, &fmt);
        let mut log = ReportLog::new();
        run(
            &mut gen,
            &mut log,
            &["-- testbench tb of odd is", "-- begin", "-- every (a, a_idx);"],
        )
        .unwrap();
        assert_eq!(
            gen.fragments()[2],
            "    for a_idx2 in 0 to 1 loop
      a <= bit'val(a_idx2);
      for a_idx_idx in 0 to 1 loop
        a_idx <= bit'val(a_idx_idx);
        wait for 1 ns;
      end loop;
    end loop;
"
        );
    }

    #[test]
    fn reindent_multiline_clause() {
        let head = "port (\n        a : in bit;\n          -- note\n        b : out bit\n      );";
        assert_eq!(
            reindent(head, "    ", "      "),
            "    port (\n      a : in bit;\n        -- note\n      b : out bit\n    );"
        );
        assert_eq!(reindent("port (a : in bit);", "  ", "    "), "  port (a : in bit);");
    }
}
