use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::Focus;
use super::layout::AppLayout;
use super::timestamps::format_timestamp;
use crate::controller::{MessageType, ResultView, Screen, UiState};
use crate::input::format_file_size;
use crate::models::{Category, HistoryEntry, MediaType};
use crate::utils::sanitize_for_display;

const EMERALD: Color = Color::Rgb(16, 185, 129);
const AMBER: Color = Color::Rgb(245, 158, 11);
const RED: Color = Color::Rgb(239, 68, 68);
const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const BACKGROUND: Color = Color::Rgb(24, 24, 27);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ANALYZING_LABEL: &str = "Analisando...";
const IDLE_HINT: &str =
    "Digite ou cole o email, arraste um arquivo .txt/.pdf para o terminal ou pressione Ctrl+O";

/// Everything the frame needs, borrowed from the app for one draw
pub struct RenderState<'a> {
    pub ui: &'a UiState,
    pub result: Option<ResultView<'a>>,
    pub history: &'a [HistoryEntry],
    pub focus: Focus,
    pub file_prompt: &'a str,
    pub history_idx: usize,
    pub spinner_frame: usize,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_input(frame, layout.input_area, state.ui, state.focus == Focus::Editor);
    render_history(
        frame,
        layout.history_area,
        state.history,
        state.history_idx,
        state.focus == Focus::History,
    );
    render_outcome(frame, layout.result_area, state);
    render_status_bar(frame, layout.status_area, state);
}

fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { EMERALD } else { MUTED })
}

fn render_input(frame: &mut Frame, area: Rect, ui: &UiState, focused: bool) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(file) = ui.input().file() {
        let kind = match file.media_type {
            MediaType::PlainText => "TXT",
            MediaType::Pdf => "PDF",
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", kind),
                Style::default().fg(BACKGROUND).bg(EMERALD).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(sanitize_for_display(&file.name), Style::default().fg(BRIGHT)),
            Span::styled(
                format!(" ({})  Ctrl+X: remover", format_file_size(file.size_bytes)),
                Style::default().fg(MUTED),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let text = sanitize_for_display(ui.input().text());
    let mut body: Vec<Line> = text.split('\n').map(|l| Line::from(l.to_string())).collect();
    if focused && !ui.is_analyzing() {
        // Block cursor at the end of the text
        match body.last_mut() {
            Some(last) => last.push_span(Span::styled("▏", Style::default().fg(EMERALD))),
            None => body.push(Line::from(Span::styled("▏", Style::default().fg(EMERALD)))),
        }
    }
    lines.extend(body);

    // Keep the end of long input in view, counting wrapped rows
    let text = Text::from(lines);
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;
    let rows = Paragraph::new(text.clone()).wrap(Wrap { trim: false }).line_count(inner_width);
    let scroll = rows.saturating_sub(inner_height) as u16;

    let style = if ui.is_analyzing() {
        Style::default().fg(MUTED)
    } else {
        Style::default().fg(BRIGHT)
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Email ")
                .border_style(border_style(focused)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_history(
    frame: &mut Frame,
    area: Rect,
    history: &[HistoryEntry],
    selected_idx: usize,
    focused: bool,
) {
    let items: Vec<ListItem> = history
        .iter()
        .map(|entry| {
            let color = match Category::from_label(&entry.category) {
                Category::Productive => EMERALD,
                Category::Unproductive => AMBER,
            };
            let preview = sanitize_for_display(entry.text.lines().next().unwrap_or(""));

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<8} ", format_timestamp(&entry.timestamp)),
                    Style::default().fg(MUTED),
                ),
                Span::styled(format!("[{}] ", entry.category), Style::default().fg(color)),
                Span::styled(preview, Style::default().fg(BRIGHT)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Histórico ({}) ", history.len()))
                .border_style(border_style(focused)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(39, 39, 42)).add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default();
    if focused && !history.is_empty() {
        list_state.select(Some(selected_idx.min(history.len() - 1)));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Result pane: spinner, classification, error or an idle hint
fn render_outcome(frame: &mut Frame, area: Rect, state: &RenderState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Resultado ")
        .border_style(Style::default().fg(MUTED));

    let text = match state.ui.screen() {
        Screen::Analyzing => {
            let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
            Text::from(Line::from(Span::styled(
                format!("{} {}", spinner, ANALYZING_LABEL),
                Style::default().fg(EMERALD).add_modifier(Modifier::BOLD),
            )))
        }
        Screen::Result => match &state.result {
            Some(view) => result_text(view),
            None => Text::default(),
        },
        Screen::Error => Text::from(Line::from(Span::styled(
            sanitize_for_display(state.ui.failure().unwrap_or_default()),
            Style::default().fg(RED).add_modifier(Modifier::BOLD),
        ))),
        Screen::Idle | Screen::HasInput => {
            Text::from(Line::from(Span::styled(IDLE_HINT, Style::default().fg(MUTED))))
        }
    };

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn badge_style(category: Category) -> Style {
    let bg = match category {
        Category::Productive => EMERALD,
        Category::Unproductive => AMBER,
    };
    Style::default().fg(BACKGROUND).bg(bg).add_modifier(Modifier::BOLD)
}

fn result_text<'a>(view: &ResultView<'a>) -> Text<'a> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", sanitize_for_display(&view.label)),
                badge_style(view.category),
            ),
            Span::raw("  "),
            Span::styled(view.caption, Style::default().fg(MUTED)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Resposta sugerida (Ctrl+Y para copiar):",
            Style::default().fg(MUTED),
        )),
    ];

    lines.extend(
        sanitize_for_display(view.reply)
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(BRIGHT)))),
    );

    if view.processed_text.is_some() || view.original_length.is_some() {
        lines.push(Line::from(""));
    }
    if let Some(length) = view.original_length {
        lines.push(Line::from(vec![
            Span::styled("Tamanho original: ", Style::default().fg(MUTED)),
            Span::raw(format!("{} caracteres", length)),
        ]));
    }
    if let Some(processed) = view.processed_text {
        lines.push(Line::from(vec![
            Span::styled("Texto processado: ", Style::default().fg(MUTED)),
            Span::raw(sanitize_for_display(processed)),
        ]));
    }

    Text::from(lines)
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = if state.focus == Focus::FilePrompt {
        (
            format!(
                " Arquivo: {}▏ | Enter: abrir | Esc: cancelar ",
                sanitize_for_display(state.file_prompt)
            ),
            Style::default().fg(BRIGHT).bg(BACKGROUND),
        )
    } else if let Some(message) = state.ui.status() {
        let fg = match message.message_type {
            MessageType::Success => EMERALD,
            MessageType::Error => RED,
        };
        (format!(" {} ", message.text), Style::default().fg(fg).bg(BACKGROUND))
    } else {
        let mut parts = vec![];

        // Trigger state
        if state.ui.is_analyzing() {
            parts.push(ANALYZING_LABEL.to_string());
        } else if state.ui.trigger_enabled() {
            parts.push("Ctrl+S: Analisar Email".to_string());
        } else {
            parts.push("(digite um email para analisar)".to_string());
        }

        if state.result.is_some() {
            parts.push("Ctrl+Y: copiar resposta".to_string());
        }
        parts.push("Ctrl+O: abrir arquivo".to_string());
        parts.push("Ctrl+N: nova análise".to_string());
        parts.push("Tab: histórico".to_string());
        parts.push("Ctrl+C: sair".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(BACKGROUND))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
