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

use crate::commands::helps::tbgen;
use crate::core::config::{Config, TestbenchFormat, CONFIG_FILE};
use crate::core::lang::vhdl::tree::SyntaxTree;
use crate::core::report::{ConsoleReport, Report};
use crate::core::testbench;
use crate::core::testbench::entity::EntityTable;
use crate::util::anyerror::{AnyError, CodeFault, Fault};
use std::fs;
use std::path::{Path, PathBuf};

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Help};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq)]
pub struct Tbgen {
    version: bool,
    json: bool,
    stdout: bool,
    quiet: bool,
    config: Option<PathBuf>,
    input: PathBuf,
    output: Option<PathBuf>,
}

impl Command for Tbgen {
    fn interpret(cli: &mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(tbgen::HELP))?;
        let version = cli.check(Arg::flag("version"))?;
        // the input file is not needed to print the version
        if version == true {
            return Ok(Tbgen {
                version: version,
                json: false,
                stdout: false,
                quiet: false,
                config: None,
                input: PathBuf::new(),
                output: None,
            });
        }
        Ok(Tbgen {
            version: version,
            // flags
            json: cli.check(Arg::flag("json"))?,
            stdout: cli.check(Arg::flag("stdout"))?,
            quiet: cli.check(Arg::flag("quiet"))?,
            // options
            config: cli.get(Arg::option("config").value("path"))?,
            // positionals
            input: cli.require(Arg::positional("input"))?,
            output: cli.get(Arg::positional("output"))?,
        })
    }

    fn execute(self) -> proc::Result {
        if self.version == true {
            println!("tbgen {}", VERSION);
            return Ok(());
        }
        let mut report = ConsoleReport::new().quiet(self.quiet);
        self.run(&mut report)
    }
}

impl Tbgen {
    /// Reads the input file and writes (or prints) every testbench it defines.
    fn run(&self, report: &mut dyn Report) -> Result<(), Fault> {
        let format = self.load_format()?;

        let source = fs::read_to_string(&self.input)
            .map_err(|e| CodeFault(Some(self.input.display().to_string()), Box::new(e)))?;
        let tree = SyntaxTree::parse(&source)
            .map_err(|e| CodeFault(Some(self.input.display().to_string()), Box::new(e)))?;
        let entities = EntityTable::extract(&tree, report)?;

        // print as json data
        if self.json == true {
            println!("{}", serde_json::to_string(&entities)?);
            return Ok(());
        }

        let text = testbench::generate(&tree, &entities, &format, report)?;
        if text.is_empty() == true {
            report.warn(&format!(
                "no testbench directives found in {:?}",
                self.input
            ));
            return Ok(());
        }
        if self.stdout == true {
            print!("{}", text);
            return Ok(());
        }
        let dest = match &self.output {
            Some(p) => p.clone(),
            None => output_path(&self.input)?,
        };
        fs::write(&dest, text)?;
        report.note(&format!("wrote testbench file {:?}", dest));
        Ok(())
    }

    /// Loads the formatting rules from `--config`, else from the working
    /// directory's configuration file if one exists.
    fn load_format(&self) -> Result<TestbenchFormat, Fault> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => {
                let local = Path::new(CONFIG_FILE);
                match local.exists() {
                    true => Config::from_file(local)?,
                    false => Config::default(),
                }
            }
        };
        Ok(config.into_format())
    }
}

/// Derives the default output file `<stem>_tb.<ext>` next to `input`.
///
/// Any `.` left in the stem is replaced with `_`.
pub fn output_path(input: &Path) -> Result<PathBuf, Fault> {
    let stem = match input.file_stem() {
        Some(s) => s.to_string_lossy().replace('.', "_"),
        None => {
            return Err(AnyError(format!("input path {:?} is missing a file name", input)))?
        }
    };
    let name = match input.extension() {
        Some(ext) => format!("{}_tb.{}", stem, ext.to_string_lossy()),
        None => format!("{}_tb", stem),
    };
    Ok(input.with_file_name(name))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::report::{ReportLog, Severity};

    const COUNTER: &str = r#"library ieee;
use ieee.std_logic_1164.all;

entity counter is
  port (
    clk : in std_logic;
    en  : in std_logic;
    q   : out std_logic_vector(3 downto 0)
  );
end entity;

-- testbench tb of counter is
-- sync (clk) every 10 ns;
-- begin
-- every (en);
-- end;
"#;

    fn command(input: PathBuf) -> Tbgen {
        Tbgen {
            version: false,
            json: false,
            stdout: false,
            quiet: false,
            config: None,
            input: input,
            output: None,
        }
    }

    #[test]
    fn derive_output_path() {
        assert_eq!(
            output_path(Path::new("rtl/ha.vhd")).unwrap(),
            PathBuf::from("rtl/ha_tb.vhd")
        );
        assert_eq!(
            output_path(Path::new("adder.rtl.vhdl")).unwrap(),
            PathBuf::from("adder_rtl_tb.vhdl")
        );
        assert_eq!(output_path(Path::new("ha")).unwrap(), PathBuf::from("ha_tb"));
        assert_eq!(output_path(Path::new("..")).is_err(), true);
    }

    #[test]
    fn writes_testbench_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counter.vhd");
        fs::write(&input, COUNTER).unwrap();

        let mut log = ReportLog::new();
        command(input).run(&mut log).unwrap();

        let written = fs::read_to_string(dir.path().join("counter_tb.vhd")).unwrap();
        assert_eq!(written.starts_with("library ieee;\nuse ieee.std_logic_1164.all;\n"), true);
        assert_eq!(written.contains("entity counter_tb is"), true);
        assert_eq!(
            written.contains("clk <= not clk after 0.5 * 10 ns when tb_done = '0' else unaffected;"),
            true
        );
        assert_eq!(written.ends_with("end architecture;\n"), true);
        assert_eq!(log.count(Severity::Note), 1);
        assert_eq!(log.count(Severity::Warning), 0);
    }

    #[test]
    fn explicit_output_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counter.vhd");
        fs::write(&input, COUNTER).unwrap();
        let cfg = dir.path().join("rules.toml");
        fs::write(&cfg, "[testbench]\ntab-size = 4\ninstance-name = \"uut\"\n").unwrap();

        let mut cmd = command(input);
        cmd.output = Some(dir.path().join("out.vhd"));
        cmd.config = Some(cfg);
        cmd.run(&mut ReportLog::new()).unwrap();

        let written = fs::read_to_string(dir.path().join("out.vhd")).unwrap();
        assert_eq!(written.contains("\n    uut: counter\n"), true);
        assert_eq!(written.contains("\n        for en_idx in 0 to 1 loop\n"), true);
    }

    #[test]
    fn missing_input_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = command(dir.path().join("nope.vhd"))
            .run(&mut ReportLog::new())
            .unwrap_err();
        assert_eq!(err.to_string().contains("nope.vhd"), true);
    }

    #[test]
    fn no_directives_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.vhd");
        fs::write(&input, "entity plain is end entity;\n").unwrap();
        let mut log = ReportLog::new();
        command(input).run(&mut log).unwrap();
        assert_eq!(dir.path().join("plain_tb.vhd").exists(), false);
        assert_eq!(log.count(Severity::Warning), 1);
    }
}
