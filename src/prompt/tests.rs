//! Tests for prompt records, drafts, and documents.

use super::*;
use chrono::{TimeZone, Utc};

const MINIMAL_DOC: &str = "---\nid: prompt_a\ntype: QUICK_ACTION\ntitle: Fix\n---\nFix grammar";

const FULL_DOC: &str = r#"---
id: prompt_b
type: SYSTEM_PROMPT
title: Reviewer
category: Code
copy_count: 7
created: 2026-01-13T10:00:00Z
updated: 2026-01-14T09:30:00Z
pinned: true
---
You are a meticulous reviewer.

Point out `unsafe` blocks and ${placeholders}.
"#;

fn sample_prompt() -> Prompt {
    Prompt {
        id: "prompt_c".to_string(),
        prompt_type: PromptType::AppStarterPrompt,
        title: "Start: Todo app".to_string(),
        content: "Build a todo app.\r\nUse `React`.\n".to_string(),
        category: Some("Web".to_string()),
        copy_count: None,
    }
}

#[test]
fn prompt_type_wire_spellings() {
    assert_eq!(PromptType::SystemPrompt.as_str(), "SYSTEM_PROMPT");
    assert_eq!(PromptType::AppStarterPrompt.as_str(), "APP_STARTER_PROMPT");
    assert_eq!(PromptType::QuickAction.as_str(), "QUICK_ACTION");
}

#[test]
fn prompt_type_parses_aliases() {
    assert_eq!(PromptType::from_str("system"), Some(PromptType::SystemPrompt));
    assert_eq!(PromptType::from_str("APP_STARTER_PROMPT"), Some(PromptType::AppStarterPrompt));
    assert_eq!(PromptType::from_str("app-starter"), Some(PromptType::AppStarterPrompt));
    assert_eq!(PromptType::from_str("quick"), Some(PromptType::QuickAction));
    assert_eq!(PromptType::from_str("other"), None);
}

#[test]
fn prompt_json_uses_script_field_names() {
    let prompt = Prompt {
        copy_count: Some(2),
        ..sample_prompt()
    };
    let json = serde_json::to_value(&prompt).unwrap();
    assert_eq!(json["type"], "APP_STARTER_PROMPT");
    assert_eq!(json["copyCount"], 2);
    assert_eq!(json["category"], "Web");
}

#[test]
fn partial_prompt_json_fills_defaults() {
    let prompt: Prompt =
        serde_json::from_str(r#"{"id":"a","type":"SYSTEM_PROMPT","title":"T","content":"C"}"#)
            .unwrap();
    assert_eq!(prompt.category, None);
    assert_eq!(prompt.category_or_default(), "");
    assert_eq!(prompt.copy_count_or_default(), 0);
}

#[test]
fn draft_requires_title_and_content() {
    let draft = PromptDraft {
        prompt_type: Some(PromptType::SystemPrompt),
        title: "   ".to_string(),
        content: "body".to_string(),
        category: None,
    };
    let err = draft.validate().unwrap_err();
    assert!(err.to_string().contains("title"));

    let draft = PromptDraft {
        prompt_type: Some(PromptType::SystemPrompt),
        title: "Title".to_string(),
        content: "\n\t".to_string(),
        category: None,
    };
    let err = draft.validate().unwrap_err();
    assert!(err.to_string().contains("content"));
}

#[test]
fn draft_requires_type() {
    let draft = PromptDraft {
        title: "Title".to_string(),
        content: "body".to_string(),
        ..Default::default()
    };
    assert!(draft.validate().is_err());
}

#[test]
fn draft_drops_category_for_quick_actions() {
    let valid = PromptDraft {
        prompt_type: Some(PromptType::QuickAction),
        title: "Fix".to_string(),
        content: "Fix grammar".to_string(),
        category: Some("Editing".to_string()),
    }
    .validate()
    .unwrap();
    assert_eq!(valid.category, None);
}

#[test]
fn draft_normalizes_blank_category_and_trims_title() {
    let valid = PromptDraft {
        prompt_type: Some(PromptType::SystemPrompt),
        title: "  Reviewer ".to_string(),
        content: "  keep my spacing  ".to_string(),
        category: Some("   ".to_string()),
    }
    .validate()
    .unwrap();
    assert_eq!(valid.title, "Reviewer");
    assert_eq!(valid.content, "  keep my spacing  ");
    assert_eq!(valid.category, None);
}

#[test]
fn of_type_preserves_order() {
    let mk = |id: &str, t: PromptType| Prompt {
        id: id.to_string(),
        prompt_type: t,
        title: id.to_string(),
        content: "x".to_string(),
        category: None,
        copy_count: None,
    };
    let prompts = vec![
        mk("s1", PromptType::SystemPrompt),
        mk("q1", PromptType::QuickAction),
        mk("s2", PromptType::SystemPrompt),
        mk("a1", PromptType::AppStarterPrompt),
        mk("s3", PromptType::SystemPrompt),
    ];
    let ids: Vec<_> = of_type(&prompts, PromptType::SystemPrompt)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["s1", "s2", "s3"]);
}

#[test]
fn parse_minimal_document() {
    let doc = PromptDocument::parse(MINIMAL_DOC).unwrap();
    assert_eq!(doc.frontmatter.id, "prompt_a");
    assert_eq!(doc.frontmatter.prompt_type, PromptType::QuickAction);
    assert_eq!(doc.body, "Fix grammar");

    let prompt = doc.to_prompt();
    assert_eq!(prompt.title, "Fix");
    assert_eq!(prompt.category, None);
    assert_eq!(prompt.copy_count, None);
}

#[test]
fn parse_full_document_keeps_unknown_fields() {
    let doc = PromptDocument::parse(FULL_DOC).unwrap();
    assert_eq!(doc.frontmatter.category.as_deref(), Some("Code"));
    assert_eq!(doc.frontmatter.copy_count, Some(7));
    assert!(doc.frontmatter.extra.contains_key("pinned"));
    assert!(doc.body.starts_with("You are a meticulous reviewer."));
    assert!(doc.body.contains("${placeholders}"));

    let rendered = doc.render().unwrap();
    assert!(rendered.contains("pinned: true"));
}

#[test]
fn document_round_trip_preserves_body_exactly() {
    let prompt = sample_prompt();
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let doc = PromptDocument::from_prompt(&prompt, now);

    let text = doc.render().unwrap();
    let parsed = PromptDocument::parse(&text).unwrap();

    assert_eq!(parsed.to_prompt(), prompt);
    assert_eq!(parsed.frontmatter.created, Some(now));
}

#[test]
fn body_that_looks_like_a_delimiter_survives() {
    let prompt = Prompt {
        content: "---\nnot frontmatter\n---\n".to_string(),
        ..sample_prompt()
    };
    let doc = PromptDocument::from_prompt(&prompt, Utc::now());
    let parsed = PromptDocument::parse(&doc.render().unwrap()).unwrap();
    assert_eq!(parsed.body, prompt.content);
}

#[test]
fn parse_accepts_crlf_delimiters() {
    let text = "---\r\nid: p\r\ntype: SYSTEM_PROMPT\r\ntitle: T\r\n---\r\nline one\r\nline two";
    let doc = PromptDocument::parse(text).unwrap();
    assert_eq!(doc.frontmatter.title, "T");
    assert_eq!(doc.body, "line one\r\nline two");
}

#[test]
fn parse_rejects_missing_delimiters() {
    assert!(PromptDocument::parse("id: p\n").is_err());
    assert!(PromptDocument::parse("---\nid: p\ntype: SYSTEM_PROMPT\ntitle: T\n").is_err());
}

#[test]
fn parse_rejects_unknown_type() {
    let text = "---\nid: p\ntype: MACRO\ntitle: T\n---\nbody";
    assert!(PromptDocument::parse(text).is_err());
}
