use planview_tui::markdown_renderer::render_markdown;
use ratatui::style::Modifier;
use ratatui::text::Line;

fn text_of(line: &Line) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

fn texts(markdown: &str) -> Vec<String> {
    render_markdown(markdown).iter().map(text_of).collect()
}

#[test]
fn test_plain_text() {
    assert_eq!(texts("This is plain text"), vec!["This is plain text"]);
}

#[test]
fn test_bold_text() {
    let lines = render_markdown("This is **bold** text");
    assert_eq!(lines.len(), 1);
    let bold = lines[0]
        .spans
        .iter()
        .find(|span| span.content == "bold")
        .unwrap();
    assert!(bold.style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn test_italic_text() {
    let lines = render_markdown("This is *italic* text");
    let italic = lines[0]
        .spans
        .iter()
        .find(|span| span.content == "italic")
        .unwrap();
    assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
}

#[test]
fn test_code_block() {
    assert_eq!(texts("```rust\nfn main() {}\n```"), vec!["  fn main() {}"]);
}

#[test]
fn test_multiple_paragraphs() {
    assert_eq!(
        texts("First paragraph\n\nSecond paragraph"),
        vec!["First paragraph", "", "Second paragraph"]
    );
}

#[test]
fn test_inline_code() {
    assert_eq!(texts("Use `fn main()` to start"), vec!["Use `fn main()` to start"]);
}

#[test]
fn test_empty_text() {
    assert!(render_markdown("").is_empty());
}

#[test]
fn test_heading_is_followed_by_blank_line() {
    let lines = render_markdown("# Title\n\nBody");
    assert_eq!(lines.iter().map(text_of).collect::<Vec<_>>(), vec!["Title", "", "Body"]);
    assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::UNDERLINED));
}

#[test]
fn test_bullet_list_keeps_text_on_bullet_line() {
    assert_eq!(texts("- one\n- two"), vec!["• one", "• two"]);
}

#[test]
fn test_ordered_list_numbers_items() {
    assert_eq!(texts("1. first\n2. second\n3. third"), vec!["1. first", "2. second", "3. third"]);
}

#[test]
fn test_nested_list_is_indented() {
    assert_eq!(texts("- outer\n  - inner"), vec!["• outer", "  • inner"]);
}

#[test]
fn test_table_rows_are_flattened() {
    let lines = render_markdown("| Metric | Value |\n|---|---|\n| latency | 12ms |");
    assert_eq!(
        lines.iter().map(text_of).collect::<Vec<_>>(),
        vec!["| Metric | Value |", "| latency | 12ms |"]
    );
    assert!(lines[0].style.add_modifier.contains(Modifier::BOLD));
    assert!(!lines[1].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn test_block_quote_is_prefixed() {
    assert_eq!(texts("> quoted"), vec!["│ quoted"]);
}

#[test]
fn test_task_list_markers() {
    assert_eq!(texts("- [x] done\n- [ ] open"), vec!["• [x] done", "• [ ] open"]);
}
