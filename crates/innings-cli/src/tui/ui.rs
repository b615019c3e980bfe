//! Locker rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use innings_core::artifact::{ResultView, RoadmapView};
use innings_db::models::FlowKind;

use super::app::{App, OpenRoadmap, View};

/// Render the current view.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // main content
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    match app.current_view {
        View::List => render_list(f, app, chunks[0]),
        View::Detail => render_detail(f, app, chunks[0]),
        View::ConfirmDelete { from_detail, .. } => {
            if from_detail {
                render_detail(f, app, chunks[0]);
            } else {
                render_list(f, app, chunks[0]);
            }
            render_confirm(f, app, chunks[0]);
        }
        View::Help => render_help(f, chunks[0]),
    }

    render_status_bar(f, app, chunks[1]);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    if app.roadmaps.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("  Your locker is empty."),
            Line::from("  Save a plan with `innings discover --save` or `innings pivot --save`."),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Locker "));
        f.render_widget(empty, area);
        return;
    }

    let header_cells = ["Title", "Flow", "Sport", "Summary", "Saved"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = app.roadmaps.iter().enumerate().map(|(i, r)| {
        let style = if i == app.selected {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(r.title.clone()),
            Cell::from(flow_colored(r.flow)),
            Cell::from(r.sport.clone()),
            Cell::from(truncate(&r.summary, 40)),
            Cell::from(r.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Percentage(35),
            Constraint::Length(17),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(format!(
        " Locker ({}, {}) ",
        app.roadmaps.len(),
        app.filter_label()
    )));

    f.render_widget(table, area);
}

fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(open) = &app.open else {
        return;
    };

    let lines = match &open.view {
        ResultView::Rendered(view) => detail_lines(view, open),
        ResultView::Unsupported { reason } => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  This roadmap format is not supported.",
                Style::default().fg(Color::Red),
            )),
            Line::from(format!("  {reason}")),
            Line::from(""),
            Line::from("  Press d to delete it or Esc to go back."),
        ],
    };

    let title = format!(
        " {} | {} | {} ",
        open.roadmap.title,
        open.roadmap.sport,
        open.roadmap.created_at.format("%Y-%m-%d")
    );
    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(detail, area);
}

fn detail_lines<'a>(view: &'a RoadmapView, open: &OpenRoadmap) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    let title_style = if view.is_error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(view.title.as_str(), title_style)));
    lines.push(Line::from(""));
    lines.push(Line::from(view.situation_analysis.as_str()));

    if !view.phases.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Execution roadmap"));
        for (i, phase) in view.phases.iter().enumerate() {
            let marker = if phase.expanded { "v" } else { ">" };
            let style = if i == open.selected_phase {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {marker} Phase {}: {}", phase.index, phase.name),
                    style,
                ),
                Span::styled(
                    format!("  {}", phase.duration),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
            if phase.expanded {
                for action in &phase.actions {
                    lines.push(Line::from(format!("     - {action}")));
                }
            }
        }
    }

    if view.show_pivot_options() {
        lines.push(Line::from(""));
        lines.push(heading("Career pivot options"));
        for option in &view.pivot_options {
            lines.push(Line::from(Span::styled(
                format!("  * {}", option.role),
                Style::default().fg(Color::Green),
            )));
            lines.push(Line::from(format!("      {}", option.description)));
            lines.push(Line::from(format!("      Pathway: {}", option.pathway)));
        }
    }

    if !view.institutions.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Key institutions"));
        for inst in &view.institutions {
            lines.push(Line::from(format!("  - {}", inst.name)));
            lines.push(Line::from(Span::styled(
                format!("      {}", inst.map_url),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if !view.aid_tips.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Financial aid"));
        for tip in &view.aid_tips {
            lines.push(Line::from(format!("  - {tip}")));
        }
    }

    lines
}

fn render_confirm(f: &mut Frame, app: &App, area: Rect) {
    let title = app.pending_delete_title().unwrap_or("this roadmap");
    let popup = centered(area, 60, 5);
    let text = vec![
        Line::from(format!(" Delete \"{title}\"?")),
        Line::from(""),
        Line::from(Span::styled(
            " y: delete   any other key: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let dialog = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn render_help(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        heading("  Navigation"),
        Line::from("    j/Down    Move down"),
        Line::from("    k/Up      Move up"),
        Line::from("    Enter     Open roadmap / expand or collapse phase"),
        Line::from("    Esc/q     Back / Quit"),
        Line::from("    Tab       Cycle flow filter (list)"),
        Line::from(""),
        heading("  Actions"),
        Line::from("    e         Export selected roadmap as Markdown"),
        Line::from("    d         Delete selected roadmap (asks first)"),
        Line::from(""),
        heading("  Other"),
        Line::from("    ?         Show this help"),
        Line::from(""),
    ];

    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let view_name = match app.current_view {
        View::List => "Locker",
        View::Detail => "Roadmap",
        View::ConfirmDelete { .. } => "Delete",
        View::Help => "Help",
    };

    let status_msg = app.status_message.as_deref().unwrap_or("");

    let bar = Line::from(vec![
        Span::styled(
            format!(" {view_name} "),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(status_msg, Style::default().fg(Color::Green)),
        Span::raw("  q:back  e:export  d:delete  ?:help"),
    ]);

    f.render_widget(Paragraph::new(bar), area);
}

// -- Helpers --

fn flow_colored(flow: FlowKind) -> Span<'static> {
    let color = match flow {
        FlowKind::Discovery => Color::Cyan,
        FlowKind::Pivot => Color::Magenta,
    };
    Span::styled(flow.to_string(), Style::default().fg(color))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}
