//! Lint: detect key-hint text (`[X]`, `[Esc]`) rendered without click registration.
//!
//! Any hint that looks like a button must be registered as a click target via
//! `push_clickable()`, otherwise it renders but cannot be tapped, which is the
//! only way to trigger it on a phone.
//!
//! This test scans the screen sources and the diagnostics overlay for plain
//! `.push(` calls, including ones spread over several lines, whose text
//! contains a key hint.

use std::fs;
use std::path::Path;

/// Longest key name inside brackets, e.g. `[Enter]`.
const MAX_KEY_LEN: usize = 5;

/// Check if a line contains a key hint like `[I]`, `[1]`, `[Esc]`, `[F2]`.
fn contains_bracket_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'[' {
            continue;
        }
        let key_len = bytes[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric())
            .count();
        let closed = bytes.get(i + 1 + key_len) == Some(&b']');
        if closed && (1..=MAX_KEY_LEN).contains(&key_len) {
            return true;
        }
        // Single punctuation keys.
        if bytes.get(i + 2) == Some(&b']') && b"-=!~{}|\\".contains(&bytes[i + 1]) {
            return true;
        }
    }
    false
}

/// Text inside the double-quoted literals of a line.
fn string_literals(line: &str) -> Vec<&str> {
    let mut literals = Vec::new();
    let mut start = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match (c, start) {
            ('\\', Some(_)) if !escaped => {
                escaped = true;
                continue;
            }
            ('"', None) => start = Some(i + 1),
            ('"', Some(s)) if !escaped => {
                literals.push(&line[s..i]);
                start = None;
            }
            _ => {}
        }
        escaped = false;
    }
    literals
}

/// Parenthesis balance of the code outside string literals.
fn paren_depth(line: &str) -> i32 {
    let mut depth = 0;
    let mut in_string = false;
    let mut escaped = false;
    for c in line.chars() {
        match c {
            '\\' if in_string && !escaped => {
                escaped = true;
                continue;
            }
            '"' if !escaped => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth -= 1,
            _ => {}
        }
        escaped = false;
    }
    depth
}

/// Scan source for non-clickable `push(` calls whose string literals contain
/// key hints. Reports the line of the hint.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();
    // Open parentheses of the `.push(` call being scanned.
    let mut depth = 0;

    for (line_num_0, line) in source.lines().enumerate() {
        let trimmed = line.trim();

        // Skip comments
        if trimmed.starts_with("//") {
            continue;
        }

        let checked = if depth > 0 {
            depth += paren_depth(line);
            line
        } else if let Some(pos) = line.find(".push(") {
            let call = &line[pos..];
            depth = paren_depth(call);
            call
        } else {
            continue;
        };

        if string_literals(checked).iter().any(|s| contains_bracket_key(s)) {
            violations.push((line_num_0 + 1, trimmed.to_string()));
        }
        depth = depth.max(0);
    }

    violations
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut all_violations = Vec::new();

    visit_sources(&root.join("src/screens"), &mut all_violations);
    check_file(&root.join("src/diagnostics.rs"), &mut all_violations);

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found key-hint text in non-clickable cl.push() calls.\n\
             These should use push_clickable() with an action ID.\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn scans_real_files() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut found = 0;
    count_sources(&root.join("src/screens"), &mut found);
    assert!(found >= 3, "expected render sources under src/screens, found {found}");
}

fn count_sources(dir: &Path, found: &mut usize) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            count_sources(&path, found);
        } else if path.file_name().map(|n| n == "render.rs").unwrap_or(false) {
            *found += 1;
        }
    }
}

fn visit_sources(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_sources(&path, violations);
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            check_file(&path, violations);
        }
    }
}

fn check_file(path: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(source) = fs::read_to_string(path) else {
        return;
    };
    let display_path = path.display().to_string();
    for (line_num, line) in find_bracket_key_in_push(&source) {
        violations.push((display_path.clone(), line_num, line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bracket_key_in_push() {
        let source = r#"cl.push(Line::from(" [X] Log out  [Esc] Back"));"#;
        let violations = find_bracket_key_in_push(source);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn detects_hint_on_continuation_line() {
        let source = "cl.push(Line::from(Span::styled(\n    \" [Esc] Back\",\n    style,\n)));";
        let violations = find_bracket_key_in_push(source);
        assert_eq!(violations, vec![(2, "\" [Esc] Back\",".to_string())]);
    }

    #[test]
    fn allows_push_clickable() {
        let source = "cl.push_clickable(\n    Line::from(\" [N] Post another job\"),\n    POST_ANOTHER,\n);";
        let violations = find_bracket_key_in_push(source);
        assert!(violations.is_empty());
    }

    #[test]
    fn indexing_is_not_a_key_hint() {
        let source = "lines.push(Line::from(format!(\" {}\", answers[0])));";
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn literals_split_on_quotes() {
        assert_eq!(string_literals(r#"a("x [Y]", "z")"#), vec!["x [Y]", "z"]);
        assert_eq!(string_literals(r#""say \"hi\"""#), vec![r#"say \"hi\""#]);
    }

    #[test]
    fn statement_end_closes_push() {
        let source = "cl.push(Line::from(\"\"));\nlet hint = \" [F2] Close\";";
        let violations = find_bracket_key_in_push(source);
        assert!(violations.is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [I] Inventory"));"#;
        let violations = find_bracket_key_in_push(source);
        assert!(violations.is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[I]"));
        assert!(contains_bracket_key("[1]"));
        assert!(contains_bracket_key("[Esc]"));
        assert!(contains_bracket_key("[Enter]"));
        assert!(contains_bracket_key("[F2]"));
        assert!(contains_bracket_key("[-]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[Escape]"));
        assert!(!contains_bracket_key("[{}]"));
        assert!(!contains_bracket_key("abc"));
    }
}
