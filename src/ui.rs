use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{App, InputMode};
use crate::game::{GameState, Phase, WAGER_STEP};
use crate::session::Session;

const ACCENT: Color = Color::Cyan;

pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(area);

    let header = Paragraph::new(header_text(&app.session.game))
        .style(Style::default().fg(ACCENT))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(chunks[1]);

    render_sidebar(frame, body[0], &app.session.game);
    match app.session.game.phase() {
        Phase::MainBoard => render_main_board(frame, body[1], app),
        Phase::FinalRound => render_final(frame, body[1], app, now),
    }

    let console = Paragraph::new(console_text(&app.session))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.help_overlay {
        render_help_overlay(frame, area);
    }
}

fn header_text(game: &GameState) -> String {
    let round = match game.phase() {
        Phase::MainBoard => "MAIN BOARD",
        Phase::FinalRound => "FINAL JEOPARDY",
    };
    format!(" [#]  CYBERSECURITY JEOPARDY | {round}\n [_]  Choose a question, reveal the answer, and keep score!")
}

fn footer_text(app: &App) -> String {
    if app.input_mode == InputMode::Answer {
        return "Type your answer | Backspace Delete | Enter/Esc Done".to_string();
    }
    match app.session.game.phase() {
        Phase::MainBoard => {
            "←/→/↑/↓ Move | Enter Select | r Reveal | a Add | s Subtract | f Final Jeopardy | ? Help | q Quit".to_string()
        }
        Phase::FinalRound => {
            "←/→ Wager | Enter Lock | t Timer | i Answer | r Reveal | y/n Right/Wrong | e End Game | ? Help | q Quit".to_string()
        }
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, game: &GameState) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let scoreboard = Paragraph::new(format!("Current Score: {}", game.score()))
        .block(Block::default().title("Scoreboard").borders(Borders::ALL));
    frame.render_widget(scoreboard, parts[0]);

    let leaderboard = Paragraph::new(format!(
        "High Score: {}\nGames Played: {}",
        game.high_score(),
        game.games_played()
    ))
    .block(
        Block::default()
            .title("Leaderboard (Single Player)")
            .borders(Borders::ALL),
    );
    frame.render_widget(leaderboard, parts[1]);
}

fn render_main_board(frame: &mut Frame, area: Rect, app: &App) {
    let rows = u16::try_from(app.board.max_rows()).unwrap_or(u16::MAX);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(rows.saturating_add(2)), Constraint::Min(1)])
        .split(area);

    let categories = app.board.categories();
    if categories.is_empty() {
        frame.render_widget(Paragraph::new("Board is empty"), sections[0]);
        return;
    }

    let total = categories.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(categories.iter().map(|_| Constraint::Ratio(1, total)))
        .split(sections[0]);

    for (col, category) in categories.iter().enumerate() {
        let lines: Vec<Line> = category
            .clues
            .keys()
            .enumerate()
            .map(|(row, value)| {
                let selected = col == app.cursor.column && row == app.cursor.row;
                let style = if selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(ACCENT)
                };
                Line::styled(format!(" {value} "), style)
            })
            .collect();
        let column = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title(category.name.as_str())
                .borders(Borders::ALL),
        );
        frame.render_widget(column, columns[col]);
    }

    let question = Paragraph::new(question_lines(&app.session.game))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Question").borders(Borders::ALL));
    frame.render_widget(question, sections[1]);
}

fn question_lines(game: &GameState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match game.current_question() {
        None => lines.push(Line::from("Pick a clue with the arrow keys and press Enter.")),
        Some(q) => {
            lines.push(Line::styled(
                format!("Question for {} points: ({})", q.value, q.category),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from(q.prompt.clone()));
            lines.push(Line::from(""));
            if q.revealed {
                lines.push(Line::styled(
                    format!("Answer: {}", q.answer),
                    Style::default().fg(Color::Green),
                ));
                lines.push(Line::from("a Add Points | s Subtract Points"));
            } else {
                lines.push(Line::from("r Reveal Answer"));
            }
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "f Start Final Jeopardy",
        Style::default().fg(Color::Red),
    ));
    lines
}

fn render_final(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    let wager = Paragraph::new(wager_lines(app))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Final Jeopardy").borders(Borders::ALL));
    frame.render_widget(wager, sections[0]);

    let question = Paragraph::new(final_lines(app, now))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Final Jeopardy Question")
                .borders(Borders::ALL),
        );
    frame.render_widget(question, sections[1]);
}

fn wager_lines(app: &App) -> Vec<Line<'static>> {
    let game = &app.session.game;
    let mut lines = vec![
        Line::from(
            "You've reached Final Jeopardy! Wager your points and answer the final question.",
        ),
        Line::from(format!(
            "Enter your wager: < {} >  (0..={}, step {WAGER_STEP})  Enter: Lock In Wager",
            app.wager_draft,
            game.max_wager()
        )),
    ];
    if game.final_wager() > 0 {
        lines.push(Line::styled(
            format!("Wager locked in: {} points", game.final_wager()),
            Style::default().fg(Color::Green),
        ));
    }
    lines
}

fn final_lines(app: &App, now: Instant) -> Vec<Line<'static>> {
    let game = &app.session.game;
    if game.final_wager() == 0 {
        let hint = if game.max_wager() == 0 {
            "No points to wager this time."
        } else {
            "Lock in a wager above 0 to see the final question."
        };
        return vec![
            Line::from(hint),
            Line::from(""),
            Line::from("e End Game & Reset Board"),
        ];
    }

    let clue = app.board.final_clue();
    let timer = match game.countdown() {
        Some(countdown) => countdown.label(now),
        None => format!("t Start {}-Second Timer", app.countdown.as_secs()),
    };
    let cursor = if app.input_mode == InputMode::Answer {
        "_"
    } else {
        ""
    };

    let mut lines = vec![
        Line::from(clue.prompt.clone()),
        Line::from(""),
        Line::styled(timer, Style::default().fg(Color::Yellow)),
        Line::from(""),
        Line::from(format!(
            "Your answer (for practice, not auto-graded): {}{cursor}",
            app.answer_draft
        )),
        Line::from(""),
    ];

    if game.final_revealed() {
        lines.push(Line::styled(
            format!("Correct Answer: {}", clue.answer),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
        match game.final_outcome() {
            None => lines.push(Line::from("y I got it right | n I got it wrong")),
            Some(outcome) if outcome.correct => lines.push(Line::styled(
                format!("You won {} points!", outcome.wager),
                Style::default().fg(Color::Green),
            )),
            Some(outcome) => lines.push(Line::styled(
                format!("You lost {} points!", outcome.wager),
                Style::default().fg(Color::Red),
            )),
        }
    } else {
        lines.push(Line::from("r Reveal Final Answer"));
    }
    lines.push(Line::from("e End Game & Reset Board"));
    lines
}

fn console_text(session: &Session) -> String {
    if session.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = session.logs.len().saturating_sub(3);
    session
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Cybersecurity Jeopardy - Help",
        "",
        "Main board:",
        "  ←/→/↑/↓ or hjkl  Move between clues",
        "  Enter / Space    Select clue",
        "  r                Reveal answer",
        "  a / s            Add / subtract points",
        "  f                Start Final Jeopardy",
        "",
        "Final Jeopardy:",
        "  ←/→ or -/+       Adjust wager",
        "  Enter            Lock in wager",
        "  t                Start timer",
        "  i                Type your answer",
        "  r                Reveal final answer",
        "  y / n            I got it right / wrong",
        "  e                End game & reset board",
        "",
        "  ?                Toggle help",
        "  q                Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
