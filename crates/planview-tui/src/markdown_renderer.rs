use crate::theme::{CODE_COLOR, HEADING_COLOR, QUOTE_COLOR};
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::prelude::Stylize;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options);
    let mut renderer = MarkdownRenderer::new();

    for event in parser {
        renderer.process_event(event);
    }

    renderer.finish()
}

struct MarkdownRenderer {
    lines: Vec<Line<'static>>,
    current_line: Vec<Span<'static>>,
    in_code_block: bool,
    code_block_content: String,
    in_emphasis: bool,
    in_strong: bool,
    in_strikethrough: bool,
    heading: Option<HeadingLevel>,
    quote_depth: usize,
    /// One entry per open list; `Some(n)` is the next number of an ordered list.
    lists: Vec<Option<u64>>,
    table_cells: Vec<String>,
    table_cell: Option<String>,
    in_table_head: bool,
}

impl MarkdownRenderer {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current_line: Vec::new(),
            in_code_block: false,
            code_block_content: String::new(),
            in_emphasis: false,
            in_strong: false,
            in_strikethrough: false,
            heading: None,
            quote_depth: 0,
            lists: Vec::new(),
            table_cells: Vec::new(),
            table_cell: None,
            in_table_head: false,
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.handle_tag_start(tag),
            Event::End(tag_end) => self.handle_tag_end(tag_end),
            Event::Text(text) => self.handle_text(text),
            Event::Code(code) => self.handle_inline_code(code),
            Event::SoftBreak | Event::HardBreak => self.handle_break(),
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.current_line.push(Span::raw(marker));
            }
            Event::Rule => {
                self.flush_line();
                self.lines.push(Line::from("─".repeat(24)).fg(QUOTE_COLOR));
                self.lines.push(Line::default());
            }
            _ => {}
        }
    }

    fn handle_tag_start(&mut self, tag: Tag) {
        match tag {
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::Emphasis => {
                self.in_emphasis = true;
            }
            Tag::Strong => {
                self.in_strong = true;
            }
            Tag::Strikethrough => {
                self.in_strikethrough = true;
            }
            Tag::Heading { level, .. } => {
                self.flush_line();
                self.heading = Some(level);
            }
            Tag::Paragraph => {
                // inside a list item the text continues after the bullet
                if self.lists.is_empty() {
                    self.flush_line();
                }
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.lists.len().saturating_sub(1);
                let bullet = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let bullet = format!("{}. ", n);
                        *n += 1;
                        bullet
                    }
                    _ => "• ".to_string(),
                };
                self.current_line
                    .push(Span::raw(format!("{}{}", "  ".repeat(depth), bullet)));
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.table_cells.clear();
            }
            Tag::TableRow => {
                self.table_cells.clear();
            }
            Tag::TableCell => {
                self.table_cell = Some(String::new());
            }
            _ => {}
        }
    }

    fn handle_tag_end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.render_code_block();
            }
            TagEnd::Emphasis => {
                self.in_emphasis = false;
            }
            TagEnd::Strong => {
                self.in_strong = false;
            }
            TagEnd::Strikethrough => {
                self.in_strikethrough = false;
            }
            TagEnd::Heading(_) => {
                self.flush_line();
                self.heading = None;
                self.lines.push(Line::default());
            }
            TagEnd::Paragraph => {
                self.flush_line();
                if self.lists.is_empty() {
                    self.push_blank();
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.push_blank();
            }
            TagEnd::Item => {
                self.flush_line();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.push_blank();
                }
            }
            TagEnd::TableCell => {
                if let Some(cell) = self.table_cell.take() {
                    self.table_cells.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead => {
                self.flush_table_row();
                self.in_table_head = false;
            }
            TagEnd::TableRow => {
                self.flush_table_row();
            }
            TagEnd::Table => {
                self.lines.push(Line::default());
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, text: CowStr) {
        if let Some(cell) = self.table_cell.as_mut() {
            cell.push_str(&text);
        } else if self.in_code_block {
            self.code_block_content.push_str(&text);
        } else {
            let style = self.inline_style();
            self.current_line.push(Span::styled(text.to_string(), style));
        }
    }

    fn handle_inline_code(&mut self, code: CowStr) {
        if let Some(cell) = self.table_cell.as_mut() {
            cell.push_str(&code);
            return;
        }
        self.current_line
            .push(Span::styled(format!("`{}`", code), Style::default().fg(CODE_COLOR)));
    }

    fn handle_break(&mut self) {
        self.flush_line();
    }

    fn inline_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(level) = self.heading {
            style = style.fg(HEADING_COLOR).bold();
            if level == HeadingLevel::H1 {
                style = style.underlined();
            }
        }
        if self.quote_depth > 0 {
            style = style.fg(QUOTE_COLOR);
        }
        if self.in_strong {
            style = style.bold();
        }
        if self.in_emphasis {
            style = style.italic();
        }
        if self.in_strikethrough {
            style = style.crossed_out();
        }
        style
    }

    fn render_code_block(&mut self) {
        if self.code_block_content.is_empty() {
            return;
        }
        for line in self.code_block_content.lines() {
            self.lines.push(Line::from(Span::styled(
                format!("  {}", line),
                Style::default().fg(CODE_COLOR),
            )));
        }
        self.code_block_content.clear();
        self.lines.push(Line::default());
    }

    fn flush_table_row(&mut self) {
        if self.table_cells.is_empty() {
            return;
        }
        let text = format!("| {} |", self.table_cells.join(" | "));
        let line = if self.in_table_head {
            Line::from(text).bold()
        } else {
            Line::from(text)
        };
        self.lines.push(line);
        self.table_cells.clear();
    }

    fn flush_line(&mut self) {
        if self.current_line.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current_line.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled("│ ".repeat(self.quote_depth), Style::default().fg(QUOTE_COLOR)));
        }
        spans.append(&mut self.current_line);
        self.lines.push(Line::from(spans));
    }

    fn push_blank(&mut self) {
        if self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            return;
        }
        self.lines.push(Line::default());
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}
