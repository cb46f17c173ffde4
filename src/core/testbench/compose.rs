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

/// Joins the emitted fragments into the final text of the output file.
pub fn compose(fragments: &[String]) -> String {
    normalize(&fragments.concat())
}

/// Collapses every run of three or more line breaks into two and ends the
/// trimmed text with exactly one line break.
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 1);
    let mut breaks = 0;
    for c in text.chars() {
        match c {
            '\n' => {
                breaks += 1;
                if breaks > 2 {
                    continue;
                }
            }
            _ => breaks = 0,
        }
        result.push(c);
    }
    let mut result = result.trim().to_string();
    result.push('\n');
    result
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collapse_blank_lines() {
        assert_eq!(normalize("\n\na\n\n\n\nb\nc\n\n"), "a\n\nb\nc\n");
        assert_eq!(normalize("a"), "a\n");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("  \nentity x is\n\n\n\nend entity;\n\n\n");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn compose_fragments() {
        let fragments = vec![
            String::from("\nentity a_tb is\nend entity;\n"),
            String::from("\narchitecture sim of a_tb is\n"),
        ];
        assert_eq!(
            compose(&fragments),
            "entity a_tb is\nend entity;\n\narchitecture sim of a_tb is\n"
        );
    }
}
