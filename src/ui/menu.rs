use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{Mode, Theme};
use crate::game::{Notice, RoundEnd, RoundSummary};
use crate::renderer::Snapshot;

/// Draws the idle-screen notice as a centered popup.
pub fn render_notice(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let (title, lines) = notice_text(snapshot.notice, snapshot.mode);
    let mut body = vec![
        Line::from(""),
        Line::styled(title, Style::default().add_modifier(Modifier::BOLD)),
    ];
    body.extend(lines.into_iter().map(Line::from));

    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.notice))
            .block(Block::bordered().title(" snake ")),
        popup,
    );
}

/// Title and body lines for the idle screen.
#[must_use]
pub fn notice_text(notice: Option<Notice>, mode: Mode) -> (String, Vec<String>) {
    match notice {
        None => (
            "SNAKE".to_owned(),
            vec![
                String::new(),
                "Press an arrow key to start!".to_owned(),
                mode_hint(mode).to_owned(),
            ],
        ),
        Some(Notice::ModeSelected { mode }) => (
            format!("{} mode", mode.label()),
            vec![String::new(), "Press an arrow key to start!".to_owned()],
        ),
        Some(Notice::RoundOver(summary)) => (
            round_over_title(summary).to_owned(),
            vec![
                String::new(),
                format!("Score: {}", summary.score),
                "Press an arrow key to play again.".to_owned(),
                mode_hint(mode).to_owned(),
            ],
        ),
    }
}

fn round_over_title(summary: RoundSummary) -> &'static str {
    match summary.reason {
        RoundEnd::WallCollision => "The snake hit the wall",
        RoundEnd::SelfCollision => "The snake bit itself",
        RoundEnd::BoardFilled => "The snake filled the board",
    }
}

fn mode_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Easy => "Ready for hard mode? Press H.",
        Mode::Hard => "Back to easy mode? Press E.",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
