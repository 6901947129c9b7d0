//! Materialization of command sections.

/// Strips the common leading whitespace from a materialized command string.
///
/// The minimum leading whitespace width is computed across all non-blank
/// lines; a tab counts as two columns when measuring. Leading whitespace of
/// that width is then removed from every line, and blank leading and
/// trailing lines are trimmed. The operation is idempotent. The resulting
/// line separator is `\n`.
pub fn strip_leading_whitespace(command: &str) -> String {
    let lines: Vec<&str> = command.split('\n').collect();

    /// Determines if a line contains only whitespace.
    fn is_blank(line: &str) -> bool {
        line.chars().all(|c| c == ' ' || c == '\t')
    }

    /// Measures the leading whitespace width of a line, counting a tab as
    /// two columns.
    fn leading_width(line: &str) -> usize {
        let mut width = 0;
        for c in line.chars() {
            match c {
                ' ' => width += 1,
                '\t' => width += 2,
                _ => break,
            }
        }
        width
    }

    let start = lines
        .iter()
        .position(|l| !is_blank(l))
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !is_blank(l))
        .map(|i| i + 1)
        .unwrap_or(start);
    let lines = &lines[start..end];

    let width = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| leading_width(l))
        .min()
        .unwrap_or(0);

    let mut result = String::with_capacity(command.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            result.push('\n');
        }

        let mut stripped = 0;
        let mut rest = *line;
        while stripped < width {
            match rest.as_bytes().first() {
                Some(b' ') => {
                    stripped += 1;
                    rest = &rest[1..];
                }
                Some(b'\t') => {
                    stripped += 2;
                    rest = &rest[1..];
                }
                _ => break,
            }
        }
        result.push_str(rest);
    }

    result
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn common_indentation_is_removed() {
        let command = "\n    python <<CODE\n    import os\n    CODE\n";
        assert_eq!(
            strip_leading_whitespace(command),
            "python <<CODE\nimport os\nCODE"
        );
    }

    #[test]
    fn uneven_indentation_keeps_the_difference() {
        let command = "\n    echo one\n        echo two\n";
        assert_eq!(
            strip_leading_whitespace(command),
            "echo one\n    echo two"
        );
    }

    #[test]
    fn tabs_count_as_two_columns() {
        // The tab-indented line has width two, which becomes the minimum.
        let command = "\n\techo one\n    echo two\n";
        assert_eq!(strip_leading_whitespace(command), "echo one\n  echo two");
    }

    #[test]
    fn interior_blank_lines_are_preserved() {
        let command = "\n  echo one\n\n  echo two\n";
        assert_eq!(strip_leading_whitespace(command), "echo one\n\necho two");
    }

    #[test]
    fn stripping_is_idempotent() {
        let commands = [
            "\n    python <<CODE\n    import os\n    CODE\n",
            "\n\n  two blank heads\n\n",
            "no indentation at all",
            "\t\tmixed\n        widths\n",
            "",
            "   \n\t\n",
        ];
        for command in commands {
            let once = strip_leading_whitespace(command);
            assert_eq!(
                strip_leading_whitespace(&once),
                once,
                "stripping `{command:?}` should be idempotent"
            );
        }
    }
}
