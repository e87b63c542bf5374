//! Drawing. Everything here reads app state and never mutates it.

use crate::app::{App, MatchView, Mode, ModeKind, TestView, MATCH_COLUMNS};
use flashdeck_core::match_game::format_tenths;
use flashdeck_core::{Clock, Face, LearnSession, LearnState, Side, Viewer};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};
use rand::rngs::StdRng;
use std::rc::Rc;

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
const GOOD: Color = Color::Green;
const BAD: Color = Color::Red;

/// Lines each test card occupies.
const TEST_CARD_LINES: usize = 4;

pub fn draw(f: &mut Frame, app: &App) {
    let v = screen_layout(f.area());

    draw_header(f, v[0], app);
    match app.mode() {
        Mode::Viewer(viewer) => draw_viewer(f, v[1], viewer),
        Mode::Learn(session) => draw_learn(f, v[1], session),
        Mode::Match(view) => draw_match(f, v[1], view),
        Mode::Test(view) => draw_test(f, v[1], view),
    }
    draw_footer(f, v[2], app);
}

/// Header, body and footer rows.
fn screen_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Card above, progress gauge below.
fn viewer_layout(body: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(body)
}

/// Where the viewer card sits on a screen of the given size.
pub fn viewer_card_area(screen: Rect) -> Rect {
    viewer_layout(screen_layout(screen)[1])[0]
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let set = app.set();
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", set.title),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} terms ", set.len()), Style::default().fg(MUTED)),
    ]);

    let labels: Vec<Line> = ModeKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| Line::from(format!("F{} {}", i + 1, kind.label())))
        .collect();
    let selected = ModeKind::ALL
        .iter()
        .position(|kind| *kind == app.mode().kind())
        .unwrap_or(0);

    let tabs = Tabs::new(labels)
        .select(selected)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED)),
        )
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.status() {
        Some(status) => Span::styled(status.to_string(), Style::default().fg(ACCENT)),
        None => Span::styled(help_text(app.mode()), Style::default().fg(MUTED)),
    };
    f.render_widget(Paragraph::new(Line::from(text)), area);
}

fn help_text(mode: &Mode) -> &'static str {
    match mode {
        Mode::Viewer(viewer) if viewer.search_overlay().is_some() => {
            "type to search  ↑/↓ choose  Enter jump  Esc close"
        }
        Mode::Viewer(_) => {
            "Space/click flip  ←/→ or drag move  / search  s shuffle  e export  q quit"
        }
        Mode::Learn(_) => "1-4 answer  Enter continue  r restart when done  q quit",
        Mode::Match(_) => "arrows move  Enter pick  r reset  q quit",
        Mode::Test(view) if view.exam.is_submitted() => "r retake  ↑/↓ scroll  q quit",
        Mode::Test(_) => "type answer  ↑/↓/Tab move  Ctrl+S submit  Ctrl+C quit",
    }
}

fn draw_viewer(f: &mut Frame, area: Rect, viewer: &Viewer<StdRng>) {
    let v = viewer_layout(area);

    let card = viewer.current();
    let (label, text) = match viewer.face() {
        Face::Front => ("Question", card.question.as_str()),
        Face::Back => ("Answer", card.answer.as_str()),
    };
    let block = Block::default()
        .title(Span::styled(format!(" {label} "), Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED));
    let inner = block.inner(v[0]);
    f.render_widget(block, v[0]);

    // vertically center the card text
    let body = centered_rect(90, 40, inner);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        body,
    );

    let ratio = (viewer.index() + 1) as f64 / viewer.len() as f64;
    let progress = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT))
        .ratio(ratio)
        .label(format!("{} / {}", viewer.index() + 1, viewer.len()));
    f.render_widget(progress, v[1]);

    if let Some(overlay) = viewer.search_overlay() {
        let area = centered_rect(60, 60, area);
        f.render_widget(Clear, area);
        let v = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let input = Paragraph::new(Line::from(vec![
            Span::raw(overlay.query().to_string()),
            Span::styled("▏", Style::default().fg(ACCENT)),
        ]))
        .block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );
        f.render_widget(input, v[0]);

        let cards = &viewer.set().cards;
        let items: Vec<ListItem> = if overlay.results().is_empty() {
            let hint = if overlay.query().trim().is_empty() {
                "Start typing"
            } else {
                "No matches"
            };
            vec![ListItem::new(Span::styled(hint, Style::default().fg(MUTED)))]
        } else {
            overlay
                .results()
                .iter()
                .enumerate()
                .map(|(pos, &idx)| {
                    let card = &cards[idx];
                    let style = if pos == overlay.highlighted() {
                        Style::default().fg(Color::Black).bg(ACCENT)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(card.question.clone()),
                        Span::styled(format!("  {}", card.answer), Style::default().fg(MUTED)),
                    ]))
                    .style(style)
                })
                .collect()
        };
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED)),
        );
        f.render_widget(list, v[1]);
    }
}

fn draw_learn(f: &mut Frame, area: Rect, session: &LearnSession<StdRng>) {
    let score = session.score();

    if let LearnState::Finished { .. } = session.state() {
        let lines = vec![
            Line::from(Span::styled(
                "Session complete",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "{} correct, {} incorrect ({}%)",
                score.correct,
                score.incorrect,
                score.percentage()
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to study again",
                Style::default().fg(MUTED),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered_rect(80, 50, inner),
        );
        return;
    }

    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(4),
        ])
        .split(area);

    let stats = Line::from(vec![
        Span::raw(format!(
            " Question {} of {}   ",
            session.position() + 1,
            session.len()
        )),
        Span::styled(format!("✓ {}  ", score.correct), Style::default().fg(GOOD)),
        Span::styled(format!("✗ {}", score.incorrect), Style::default().fg(BAD)),
    ]);
    f.render_widget(Paragraph::new(stats), v[0]);

    let question = Paragraph::new(session.current().question.as_str())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Question ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED)),
        );
    f.render_widget(question, v[1]);

    let selected = match session.state() {
        LearnState::Revealed { selected } => Some(selected),
        _ => None,
    };
    let correct = session.correct_option();
    let items: Vec<ListItem> = session
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = match selected {
                Some(_) if Some(i) == correct => Style::default().fg(GOOD),
                Some(s) if s == i => Style::default().fg(BAD),
                Some(_) => Style::default().fg(MUTED),
                None => Style::default(),
            };
            ListItem::new(format!("{}. {option}", i + 1)).style(style)
        })
        .collect();

    let title = match selected {
        Some(s) if Some(s) == correct => " Correct! Enter to continue ",
        Some(_) => " Incorrect. Enter to continue ",
        None => " Choose an answer ",
    };
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED)),
    );
    f.render_widget(list, v[2]);
}

fn draw_match(f: &mut Frame, area: Rect, view: &MatchView) {
    let game = &view.game;
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let mut stats = vec![
        Span::raw(format!(" Time {}   ", format_tenths(game.clock().tenths()))),
        Span::raw(format!(
            "Pairs {}/{}   ",
            game.matched_pairs(),
            game.total_pairs()
        )),
    ];
    if let Some(best) = game.best() {
        stats.push(Span::styled(
            format!("Best {}", format_tenths(best.tenths)),
            Style::default().fg(GOOD),
        ));
    }
    if let Clock::Stopped { tenths } = game.clock() {
        let message = match game.best() {
            Some(best) if best.tenths == tenths => "   New best! Press r to play again",
            _ => "   Done! Press r to play again",
        };
        stats.push(Span::styled(
            message,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(stats)), v[0]);

    let tiles = game.tiles();
    let rows = tiles.len().div_ceil(MATCH_COLUMNS).max(1);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(v[1]);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, MATCH_COLUMNS as u32);
                MATCH_COLUMNS
            ])
            .split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let index = row * MATCH_COLUMNS + col;
            let Some(tile) = tiles.get(index) else {
                continue;
            };

            let mut border = Style::default().fg(MUTED);
            if game.selected() == Some(index) {
                border = Style::default().fg(ACCENT);
            }
            if view.cursor == index {
                border = border.add_modifier(Modifier::BOLD).fg(Color::Yellow);
            }
            let text_style = if tile.matched {
                Style::default().fg(MUTED).add_modifier(Modifier::CROSSED_OUT)
            } else if tile.side == Side::Question {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let paragraph = Paragraph::new(Span::styled(tile.text.as_str(), text_style))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border),
                );
            f.render_widget(paragraph, *cell);
        }
    }
}

fn draw_test(f: &mut Frame, area: Rect, view: &TestView) {
    let exam = &view.exam;
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let banner = match (exam.score(), exam.percentage()) {
        (Some(score), Some(pct)) => Span::styled(
            format!(" Score: {score}/{} ({pct}%)", exam.len()),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        _ => Span::raw(format!(" {} questions. Ctrl+S to submit", exam.len())),
    };
    f.render_widget(Paragraph::new(Line::from(banner)), v[0]);

    let mut lines = Vec::with_capacity(exam.len() * TEST_CARD_LINES);
    for (pos, card) in exam.cards().enumerate() {
        let active = pos == view.cursor;
        let marker = if active { "▶ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(ACCENT)),
            Span::styled(
                format!("{}. {}", pos + 1, card.question),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));

        let answer = exam.answer(card.id);
        let mut answer_line = vec![Span::raw("   > "), Span::raw(answer.to_string())];
        if active && !exam.is_submitted() {
            answer_line.push(Span::styled("▏", Style::default().fg(ACCENT)));
        }
        lines.push(Line::from(answer_line));

        let feedback = match exam.result(card.id) {
            Some(result) if result.is_correct => Line::from(Span::styled(
                format!(
                    "   ✓ Correct ({}/{} key words)",
                    result.matched_words.len(),
                    result.key_words.len()
                ),
                Style::default().fg(GOOD),
            )),
            Some(_) => Line::from(Span::styled(
                format!("   ✗ Correct answer: {}", card.answer),
                Style::default().fg(BAD),
            )),
            None => Line::from(""),
        };
        lines.push(feedback);
        lines.push(Line::from(""));
    }

    let visible = usize::from(v[1].height.saturating_sub(2));
    let cursor_top = view.cursor * TEST_CARD_LINES;
    let scroll = (cursor_top + TEST_CARD_LINES).saturating_sub(visible);

    let paragraph = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .title(" Test ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED)),
        );
    f.render_widget(paragraph, v[1]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);
    horiz[1]
}
