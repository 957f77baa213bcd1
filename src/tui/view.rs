//! Rendering for the single-view TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};

use crate::markdown::{segment, Segment};
use crate::tui::app::{App, BackendStatus, FetchState};

/// Draw the whole view
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + backend status
            Constraint::Length(3), // Video id input
            Constraint::Min(5),    // Transcript / notes panes
            Constraint::Length(1), // Action feedback
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    draw_header(frame, chunks[0], app);
    draw_input(frame, chunks[1], app);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    draw_transcript(frame, panes[0], app);
    draw_notes(frame, panes[1], app);

    draw_message(frame, chunks[3], app);
    draw_help(frame, chunks[4], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let status_line = match &app.backend_status {
        BackendStatus::Unknown => Line::from(vec![
            Span::raw("Backend: "),
            Span::styled("checking...", Style::default().fg(Color::DarkGray)),
        ]),
        BackendStatus::Healthy(message) => {
            // Healthy styling keys off the backend's own wording.
            let style = if message.contains("running") {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            Line::from(vec![
                Span::raw("Backend: "),
                Span::styled(message.clone(), style),
            ])
        }
        BackendStatus::Unreachable => Line::from(vec![
            Span::raw("Backend: "),
            Span::styled(
                "Error connecting to backend",
                Style::default().fg(Color::Red),
            ),
        ]),
    };

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "TubeNotes",
            Style::default().fg(Color::Cyan).bold(),
        )),
        status_line,
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App) {
    let content = if app.video_id.is_empty() {
        Line::from(Span::styled(
            "Enter YouTube Video ID",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(app.video_id.clone()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ])
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .title(" Video ID ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(input, area);
}

fn draw_transcript(frame: &mut Frame, area: Rect, app: &mut App) {
    let show_timestamps = app.settings().tui.show_timestamps;

    let lines: Vec<Line<'static>> = match &app.transcript {
        FetchState::Idle => vec![hint_line("Press [Enter] to fetch the transcript")],
        FetchState::Loading => vec![Line::from(Span::styled(
            "Fetching transcript...",
            Style::default().fg(Color::Yellow),
        ))],
        FetchState::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        FetchState::Loaded(entries) => entries
            .iter()
            .map(|entry| {
                if show_timestamps {
                    Line::from(vec![
                        Span::styled(
                            format!("{}s: ", entry.start.floor() as u64),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw(entry.text.clone()),
                    ])
                } else {
                    Line::from(entry.text.clone())
                }
            })
            .collect(),
    };

    draw_pane(
        frame,
        area,
        " Transcript ",
        lines,
        &mut app.transcript_scroll,
    );
}

fn draw_notes(frame: &mut Frame, area: Rect, app: &mut App) {
    let lines: Vec<Line<'static>> = match &app.notes {
        FetchState::Idle => vec![hint_line("Press [Ctrl+S] to generate AI notes")],
        FetchState::Loading => vec![Line::from(Span::styled(
            "Summarizing...",
            Style::default().fg(Color::Yellow),
        ))],
        FetchState::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        FetchState::Loaded(notes) => notes_lines(notes),
    };

    draw_pane(frame, area, " AI Notes ", lines, &mut app.notes_scroll);
}

/// Style the markdown segment stream for the notes pane.
fn notes_lines(notes: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut after_block = false;

    for seg in segment(notes) {
        match seg {
            Segment::Heading(level, text) => {
                let style = match level {
                    1 => Style::default().fg(Color::Magenta).bold(),
                    2 => Style::default().fg(Color::Blue).bold(),
                    _ => Style::default().fg(Color::Cyan).bold(),
                };
                lines.push(Line::from(Span::styled(text, style)));
                after_block = true;
            }
            Segment::Bullet(text) => {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(Color::DarkGray)),
                    Span::raw(text),
                ]));
                after_block = true;
            }
            Segment::Bold(text) => {
                spans.push(Span::styled(text, Style::default().bold()));
            }
            Segment::Text(text) => {
                spans.push(Span::raw(text));
            }
            Segment::Break => {
                if !spans.is_empty() {
                    lines.push(Line::from(std::mem::take(&mut spans)));
                } else if !after_block {
                    lines.push(Line::from(""));
                }
                after_block = false;
            }
        }
    }

    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }

    lines
}

/// Draw a bordered, scrollable pane with a scrollbar when the content
/// overflows. Clamps the scroll offset to the content height.
fn draw_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    scroll: &mut usize,
) {
    let content_height = lines.len();
    let visible_height = area.height.saturating_sub(2) as usize; // Account for borders
    *scroll = (*scroll).min(content_height.saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
    frame.render_widget(paragraph, area);

    if content_height > visible_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        let mut scrollbar_state = ScrollbarState::new(content_height)
            .position(*scroll)
            .viewport_content_length(visible_height);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                horizontal: 0,
                vertical: 1,
            }),
            &mut scrollbar_state,
        );
    }
}

fn draw_message(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(message) = &app.message {
        let widget = Paragraph::new(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(widget, area);
    }
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(Color::Black).bg(Color::Cyan);

    let mut spans = vec![
        Span::styled(" Enter ", key_style),
        Span::raw(" Transcript  "),
        Span::styled(" ^S ", key_style),
        Span::raw(" Summarize  "),
    ];

    // Export actions only exist once notes are loaded.
    if app.notes.loaded().is_some() {
        spans.push(Span::styled(" ^Y ", key_style));
        spans.push(Span::raw(" Copy  "));
        spans.push(Span::styled(" ^E ", key_style));
        spans.push(Span::raw(" Save PDF  "));
    }

    spans.push(Span::styled(" Esc ", key_style));
    spans.push(Span::raw(" Quit"));

    let help = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn hint_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}
