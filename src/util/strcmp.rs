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

/// Compares to string references `s0` and `s1` with case conversion.
///
/// Returns `true` if they are deemed equivalent without regarding case sensivity.
pub fn cmp_ignore_case(s0: &str, s1: &str) -> bool {
    if s0.len() != s1.len() {
        return false;
    }
    let mut s1 = s1.chars();
    for c in s0.chars() {
        match s1.next() {
            Some(d) => {
                if c.to_lowercase().cmp(d.to_lowercase()) != std::cmp::Ordering::Equal {
                    return false;
                }
            }
            None => return false,
        }
    }
    s1.next().is_none()
}

/// Checks if `s` contains `pattern` while disregarding ascii case.
pub fn contains_ignore_case(s: &str, pattern: &str) -> bool {
    s.to_ascii_lowercase()
        .contains(&pattern.to_ascii_lowercase())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_works() {
        assert_eq!(cmp_ignore_case("ABC", "abc"), true);
        // different lengths
        assert_eq!(cmp_ignore_case("ABCD", "abc"), false);
        // different letter order
        assert_eq!(cmp_ignore_case("cba", "abc"), false);
        // VHDL-2008 LRM p226
        let s0 = "ABCDEFGHIJKLMNOPQRSTUVWXYZÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖØÙÚÛÜÝÞ";
        let s1 = "abcdefghijklmnopqrstuvwxyzàáâãäåæçèéêëìíîïðñòóôõöøùúûüýþ";
        assert_eq!(cmp_ignore_case(s0, s1), true);
    }

    #[test]
    fn contains() {
        assert_eq!(contains_ignore_case("use IEEE.Numeric_Std.all;", "numeric_std"), true);
        assert_eq!(contains_ignore_case("use ieee.std_logic_1164.all;", "numeric_std"), false);
    }
}
