use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, Popup};
use crate::github::{self, Profile};
use crate::theme::Theme;

const TITLE: &str = "GitHub User Search";
const PLACEHOLDER: &str = "Enter GitHub username";
const CARD_WIDTH: u16 = 64;

/// Draw the whole screen with the given palette
pub fn draw(f: &mut Frame, app: &App, theme: &Theme) {
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.text)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Theme switch
            Constraint::Length(1), // Title
            Constraint::Length(3), // Input + button
            Constraint::Length(1), // Error line
            Constraint::Min(0),    // Result card
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_theme_switch(f, app, theme, rows[0]);
    draw_title(f, theme, centered_column(rows[1]));
    draw_search_row(f, app, theme, centered_column(rows[2]));
    draw_error_line(f, app, theme, centered_column(rows[3]));

    if let Some(profile) = app.outcome().profile() {
        draw_profile_card(f, profile, theme, centered_column(rows[4]));
    }

    draw_footer(f, app, theme, rows[5]);

    if app.popup == Popup::Help {
        draw_help_popup(f, theme);
    }
}

/// Column the card lives in, capped so it doesn't stretch across wide terminals
fn centered_column(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(CARD_WIDTH.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(area)[1]
}

fn draw_theme_switch(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let focused = app.focus == Focus::Theme;
    let track = if app.theme_mode.is_dark() { "  ●" } else { "●  " };

    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(theme.text_dim)
    };

    let line = Line::from(vec![
        Span::styled(app.theme_mode.label(), label_style),
        Span::raw(" "),
        Span::styled(track, Style::default().fg(theme.panel).bg(theme.toggle)),
        Span::raw(" "),
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

fn draw_title(f: &mut Frame, theme: &Theme, area: Rect) {
    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_search_row(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(area);

    // Username input
    let input_focused = app.focus == Focus::Input;
    let border = if input_focused { theme.accent } else { theme.inactive };
    let username = app.search.username();

    let content = if username.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(theme.text_dim))
    } else {
        Span::styled(username, Style::default().fg(theme.text))
    };
    let text_width = if username.is_empty() { 0 } else { content.width() };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title(Span::styled(" Username ", Style::default().fg(border)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.panel)),
    );
    f.render_widget(input, chunks[0]);

    if input_focused && app.popup == Popup::None {
        f.set_cursor_position((input_cursor_x(chunks[0], text_width), chunks[0].y + 1));
    }

    // Search button
    let button_style = if app.focus == Focus::Search {
        Style::default()
            .fg(theme.panel)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent)
    };
    let button = Paragraph::new(Span::styled("Search", button_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        );
    f.render_widget(button, chunks[1]);
}

/// Cursor column after `text_width` cells, clamped inside the input border
fn input_cursor_x(input: Rect, text_width: usize) -> u16 {
    let offset = u16::try_from(text_width).unwrap_or(u16::MAX);
    let max_x = input.x.saturating_add(input.width.saturating_sub(2));
    input.x.saturating_add(1).saturating_add(offset).min(max_x)
}

fn draw_error_line(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if let Some(msg) = app.error_line() {
        let line = Paragraph::new(Span::styled(msg, Style::default().fg(theme.danger)))
            .alignment(Alignment::Center);
        f.render_widget(line, area);
    }
}

fn draw_profile_card(f: &mut Frame, profile: &Profile, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.inactive))
        .style(Style::default().bg(theme.panel));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let extras = github::extra_details(profile);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),                          // Avatar, name, handle, bio
            Constraint::Length(2),                       // Stats
            Constraint::Length(extras.len() as u16 + 1), // Extra details
        ])
        .split(inner);

    let header = vec![
        Line::from(Span::styled(
            format!("󰀄 {}", profile.avatar_url),
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
        Line::from(Span::styled(
            github::display_name(profile),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            github::handle(profile),
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
        Line::from(Span::styled(
            github::display_bio(profile),
            Style::default().fg(theme.text),
        )),
    ];
    f.render_widget(
        Paragraph::new(header)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        sections[0],
    );

    let stat_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(sections[1]);

    let stats = [
        (profile.followers, "Followers"),
        (profile.following, "Following"),
        (profile.public_repos, "Repositories"),
    ];
    for ((count, label), column) in stats.into_iter().zip(stat_columns.iter()) {
        let stat = Paragraph::new(vec![
            Line::from(Span::styled(
                count.to_string(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(theme.text_dim))),
        ])
        .alignment(Alignment::Center);
        f.render_widget(stat, *column);
    }

    if !extras.is_empty() {
        let mut lines = vec![Line::from("")];
        lines.extend(extras.into_iter().map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<9}", label), Style::default().fg(theme.text_dim)),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        }));
        f.render_widget(Paragraph::new(lines), sections[2]);
    }
}

fn draw_footer(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.focus {
        Focus::Input => vec![
            ("Enter", "Search"),
            ("Tab", "Next"),
            ("^U", "Clear"),
            ("^T", "Theme"),
            ("F1", "Help"),
            ("Esc", "Quit"),
        ],
        Focus::Search => vec![
            ("Space", "Search"),
            ("Tab", "Next"),
            ("^T", "Theme"),
            ("F1", "Help"),
            ("Esc", "Quit"),
        ],
        Focus::Theme => vec![
            ("Space", "Toggle"),
            ("Tab", "Next"),
            ("F1", "Help"),
            ("Esc", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 50 { 3 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(theme.text_dim)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 90 } else { 60 },
        if area.height < 30 { 90 } else { 60 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(theme.accent)),
            Span::styled(what, Style::default().fg(theme.text)),
        ])
    };

    let help_text = vec![
        section("═══ Search ═══"),
        entry("Enter", "Look up the typed username"),
        entry("Backspace", "Delete last character"),
        entry("Ctrl-U", "Clear the username"),
        Line::from(""),
        section("═══ Navigation ═══"),
        entry("Tab", "Input → Search → Theme switch"),
        entry("Shift-Tab", "Previous element"),
        entry("Space", "Press the focused button"),
        Line::from(""),
        section("═══ Display ═══"),
        entry("Ctrl-T", "Toggle light/dark"),
        entry("Esc", "Quit (or close this help)"),
        Line::from(""),
        section("═══ One-shot ═══"),
        entry("--print", "hubpeek --print octocat [--json]"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" hubpeek Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.panel)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
