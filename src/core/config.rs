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

use crate::util::anyerror::{AnyError, Fault};
use serde_derive::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const CONFIG_FILE: &str = "tbgen.toml";

/// Contents of a configuration file.
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    testbench: Option<TestbenchFormat>,
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Config {
    /// Reads and parses the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, Fault> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AnyError(format!("failed to read configuration file {:?}: {}", path, e)))?;
        Ok(Self::from_str(&text).map_err(|e| {
            AnyError(format!("failed to parse configuration file {:?}: {}", path, e))
        })?)
    }

    /// Resolves the final formatting rules, filling any missing keys with defaults.
    pub fn into_format(self) -> TestbenchFormat {
        let mut format = self.testbench.unwrap_or_default();
        format.merge(Some(TestbenchFormat::new()));
        format
    }
}

/// Rules that shape the text of a generated testbench.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestbenchFormat {
    #[serde(rename = "tab-size")]
    tab_size: Option<u8>,
    sync: Option<String>,
    #[serde(rename = "instance-name")]
    instance_name: Option<String>,
    #[serde(rename = "architecture-name")]
    architecture_name: Option<String>,
    #[serde(rename = "process-name")]
    process_name: Option<String>,
}

impl TestbenchFormat {
    pub fn new() -> Self {
        Self {
            tab_size: Some(2),
            sync: Some(String::from("1 ns")),
            instance_name: Some(String::from("dut")),
            architecture_name: Some(String::from("sim")),
            process_name: Some(String::from("stimulus")),
        }
    }

    pub fn get_tab_size(&self) -> u8 {
        self.tab_size.unwrap_or(2)
    }

    /// Creates the whitespace for `level` levels of indentation.
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.get_tab_size() as usize * level)
    }

    pub fn get_sync(&self) -> &str {
        self.sync.as_deref().unwrap_or("1 ns")
    }

    pub fn get_instance_name(&self) -> &str {
        self.instance_name.as_deref().unwrap_or("dut")
    }

    pub fn get_architecture_name(&self) -> &str {
        self.architecture_name.as_deref().unwrap_or("sim")
    }

    pub fn get_process_name(&self) -> &str {
        self.process_name.as_deref().unwrap_or("stimulus")
    }

    /// Merges any populated data from `rhs` into attributes that do not already
    /// have data defined in `self`.
    pub fn merge(&mut self, rhs: Option<Self>) -> () {
        if let Some(rhs) = rhs {
            if self.tab_size.is_some() == false {
                self.tab_size = rhs.tab_size
            }
            if self.sync.is_some() == false {
                self.sync = rhs.sync
            }
            if self.instance_name.is_some() == false {
                self.instance_name = rhs.instance_name
            }
            if self.architecture_name.is_some() == false {
                self.architecture_name = rhs.architecture_name
            }
            if self.process_name.is_some() == false {
                self.process_name = rhs.process_name
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EX1: &str = r#"
[testbench]
tab-size = 4
sync = "10 ns"
"#;

    const ERR1: &str = r#"
[testbench]
tab-width = 4
"#;

    #[test]
    fn partial_file_keeps_defaults() {
        let fmt = Config::from_str(EX1).unwrap().into_format();
        assert_eq!(fmt.get_tab_size(), 4);
        assert_eq!(fmt.indent(2), "        ");
        assert_eq!(fmt.get_sync(), "10 ns");
        assert_eq!(fmt.get_instance_name(), "dut");
        assert_eq!(fmt.get_architecture_name(), "sim");
        assert_eq!(fmt.get_process_name(), "stimulus");
    }

    #[test]
    fn empty_file_is_default() {
        let fmt = Config::from_str("").unwrap().into_format();
        assert_eq!(fmt, TestbenchFormat::new());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(Config::from_str(ERR1).is_err(), true);
        assert_eq!(Config::from_str("[format]\n").is_err(), true);
    }

    #[test]
    fn merge_only_fills_gaps() {
        let mut fmt = TestbenchFormat::default();
        fmt.sync = Some(String::from("5 ps"));
        fmt.merge(Some(TestbenchFormat::new()));
        assert_eq!(fmt.get_sync(), "5 ps");
        assert_eq!(fmt.get_tab_size(), 2);
        fmt.merge(None);
        assert_eq!(fmt.get_sync(), "5 ps");
    }

    #[test]
    fn read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, EX1).unwrap();
        let fmt = Config::from_file(&path).unwrap().into_format();
        assert_eq!(fmt.get_tab_size(), 4);
        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
