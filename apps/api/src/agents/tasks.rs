//! Normalization of free-text task lists returned by the breakdown call.

const BULLET_CHARS: &[char] = &['-', '•', '*', ' '];

/// Lazily split a model's breakdown output into candidate task strings.
///
/// Each line is trimmed, bullet characters are stripped from both ends, and a
/// leading list ordinal (`1.`, `2)`) is removed. Lines that end up empty are
/// skipped. No count validation happens here.
pub fn parse_task_candidates(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.lines()
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

fn normalize_line(line: &str) -> &str {
    let line = line.trim().trim_matches(BULLET_CHARS);
    strip_ordinal(line).trim().trim_matches(BULLET_CHARS)
}

fn strip_ordinal(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return line;
    }

    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => after,
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Vec<String> {
        parse_task_candidates(raw).collect()
    }

    #[test]
    fn strips_dash_bullets() {
        assert_eq!(
            parse("- Research topic\n- Draft post\n- Edit for clarity"),
            vec!["Research topic", "Draft post", "Edit for clarity"]
        );
    }

    #[test]
    fn strips_round_bullets_and_whitespace() {
        assert_eq!(
            parse("  • Gather data  \r\n\t•Analyse data\n"),
            vec!["Gather data", "Analyse data"]
        );
    }

    #[test]
    fn skips_blank_lines() {
        assert_eq!(parse("\n\nOne\n   \n-\nTwo\n\n"), vec!["One", "Two"]);
    }

    #[test]
    fn strips_numbered_list_markers() {
        assert_eq!(
            parse("1. Research topic\n2) Draft post\n3.Edit"),
            vec!["Research topic", "Draft post", "3.Edit"]
        );
    }

    #[test]
    fn keeps_numbers_that_are_not_ordinals() {
        assert_eq!(parse("2024 roadmap"), vec!["2024 roadmap"]);
        assert_eq!(parse("3.5 hours of review"), vec!["3.5 hours of review"]);
    }

    #[test]
    fn strips_markdown_emphasis_bullets() {
        assert_eq!(parse("* **Outline the post**"), vec!["Outline the post"]);
    }

    #[test]
    fn empty_output_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("  \n - \n•").is_empty());
    }

    #[test]
    fn iterator_is_lazy() {
        let mut iter = parse_task_candidates("First\nSecond\nThird");
        assert_eq!(iter.next().as_deref(), Some("First"));
        assert_eq!(iter.next().as_deref(), Some("Second"));
    }
}
