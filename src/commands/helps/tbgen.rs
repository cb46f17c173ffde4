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

pub const HELP: &str = r#"Generate vhdl testbenches from directive comments.

Usage:
    tbgen [options] <input> [<output>]

Args:
    <input>                 vhdl source file containing the directives
    <output>                destination file (default: <input>_tb.<ext>)

Options:
    --config <path>         read formatting rules from a toml file
    --json                  print the extracted entity data as json
    --stdout                print the testbenches instead of writing a file
    --quiet                 suppress informational notes
    --version               print the version and exit
    --help, -h              print this help information and exit

Directives:
    -- testbench <name> of <entity> is
    -- sync [(<clock>)] every <duration>;
    -- begin
    -- every [(<signal>, ...)];
    -- set (<signal> <= <value>; ...);
    -- end;
"#;
