use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{Mode, Theme};
use crate::contrast;
use crate::renderer::Snapshot;

const HUD_MARGIN_X: u16 = 2;
const CONTROLS_HINT: &str = "[Arrows] Move  [Space] Reset  [E]/[H] Mode  [Q] Quit";

/// Renders the score/contrast header and the controls footer.
///
/// Returns the area left for the board.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) -> Rect {
    let [header, play_area, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let [score_area, contrast_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(inset_horizontal(header, HUD_MARGIN_X));
    let footer = inset_horizontal(footer, HUD_MARGIN_X);

    frame.render_widget(
        Paragraph::new(labelled(
            "Score ",
            score_label(snapshot.mode, snapshot.score),
            theme,
        ))
        .alignment(Alignment::Left),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(labelled(
            "Contrast ",
            format!("{}%", contrast::percent(snapshot.contrast)),
            theme,
        ))
        .alignment(Alignment::Right),
        contrast_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(CONTROLS_HINT))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud_label)),
        footer,
    );

    play_area
}

/// Score text; hard mode carries an `H` prefix.
#[must_use]
pub fn score_label(mode: Mode, score: u32) -> String {
    match mode {
        Mode::Easy => score.to_string(),
        Mode::Hard => format!("H {score}"),
    }
}

fn labelled(label: &'static str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(theme.hud_label)),
        Span::styled(
            value,
            Style::default()
                .fg(theme.hud_value)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Mode;

    use super::score_label;

    #[test]
    fn score_label_marks_hard_mode() {
        assert_eq!(score_label(Mode::Easy, 7), "7");
        assert_eq!(score_label(Mode::Hard, 7), "H 7");
    }
}
