//! Userscript metadata block.

use super::ScriptOptions;
use chrono::{DateTime, Utc};

/// Host capabilities the embedded runtime calls. Not configurable.
pub const GRANTS: [&str; 6] = [
    "GM_addStyle",
    "GM_info",
    "GM_setValue",
    "GM_getValue",
    "GM_registerMenuCommand",
    "GM_xmlhttpRequest",
];

/// `@version` value: the generation date as `YYYY.MM.DD`.
pub fn script_version(now: DateTime<Utc>) -> String {
    now.format("%Y.%m.%d").to_string()
}

/// Human-readable generation time used in `@description`.
pub fn last_updated(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Render the `// ==UserScript==` block, without a trailing newline.
pub fn render_header(options: &ScriptOptions, now: DateTime<Utc>) -> String {
    let description = format!(
        "{} Last updated: {}",
        single_line(&options.description),
        last_updated(now)
    );

    let mut lines = vec![
        "// ==UserScript==".to_string(),
        field("name", &options.name),
        field("namespace", &options.namespace),
        field("version", &script_version(now)),
        field("description", description.trim_start()),
        field("author", &options.author),
    ];
    lines.extend(options.match_patterns.iter().map(|p| field("match", p)));
    lines.extend(GRANTS.iter().map(|g| field("grant", g)));
    lines.push("// ==/UserScript==".to_string());

    lines.join("\n")
}

fn field(key: &str, value: &str) -> String {
    format!("// {:<13} {}", format!("@{}", key), single_line(value))
}

/// A line break inside a value would end the metadata line early.
fn single_line(value: &str) -> String {
    value
        .split(['\r', '\n', '\u{2028}', '\u{2029}'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, 14, 5, 9).unwrap()
    }

    #[test]
    fn version_is_dotted_date() {
        assert_eq!(script_version(at()), "2026.03.07");
    }

    #[test]
    fn header_is_delimited() {
        let header = render_header(&ScriptOptions::default(), at());
        assert!(header.starts_with("// ==UserScript==\n"));
        assert!(header.ends_with("// ==/UserScript=="));
    }

    #[test]
    fn fields_are_aligned() {
        let header = render_header(&ScriptOptions::default(), at());
        assert!(header.contains("// @name         Prompt Amplifier Enhanced Prompts\n"));
        assert!(header.contains("// @version      2026.03.07\n"));
    }

    #[test]
    fn description_carries_timestamp() {
        let header = render_header(&ScriptOptions::default(), at());
        let line = header
            .lines()
            .find(|l| l.starts_with("// @description"))
            .unwrap();
        assert!(line.ends_with("Last updated: 2026-03-07 14:05:09 UTC"));
    }

    #[test]
    fn every_match_and_grant_gets_a_line() {
        let options = ScriptOptions {
            match_patterns: vec!["https://a.example/*".into(), "https://b.example/*".into()],
            ..ScriptOptions::default()
        };
        let header = render_header(&options, at());

        let matches: Vec<_> = header.lines().filter(|l| l.starts_with("// @match")).collect();
        assert_eq!(matches.len(), 2);
        assert!(matches[1].ends_with("https://b.example/*"));

        let grants: Vec<_> = header
            .lines()
            .filter_map(|l| l.strip_prefix("// @grant"))
            .map(str::trim)
            .collect();
        assert_eq!(grants, GRANTS);
    }

    #[test]
    fn values_cannot_break_out_of_their_line() {
        let options = ScriptOptions {
            name: "Evil\n// ==/UserScript==\nalert(1)".into(),
            ..ScriptOptions::default()
        };
        let header = render_header(&options, at());
        let closers = header.lines().filter(|l| *l == "// ==/UserScript==").count();
        assert_eq!(closers, 1);
        assert!(header.contains("// @name         Evil // ==/UserScript== alert(1)\n"));
    }
}
