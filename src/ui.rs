use crate::difficulty::Difficulty;
use crate::entity::{BalloonColor, BalloonContent};
use crate::game::{Game, GamePhase, MISS_LIMIT};
use crate::util::percent_to_cell;
use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const BALLOON_GLYPH: &str = "●";
const POPPED_GLYPH: &str = "✶";
/// Missed count at which the header starts warning.
const MISS_WARN: u32 = 3;

fn palette_color(color: BalloonColor) -> Color {
    match color {
        BalloonColor::Yellow => Color::Yellow,
        BalloonColor::Red => Color::Red,
        BalloonColor::Blue => Color::Blue,
        BalloonColor::Violet => Color::Magenta,
        BalloonColor::Green => Color::Green,
    }
}

impl Widget for &Game {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)].as_ref())
            .split(area);

        let missed_style = if self.missed >= MISS_WARN {
            Style::default().patch(bold_style).fg(Color::Red)
        } else {
            dim_bold_style
        };
        let header = Line::from(vec![
            Span::styled(format!(" score {}", self.score), green_bold_style),
            Span::styled(
                format!("   missed {}/{}", self.missed, MISS_LIMIT),
                missed_style,
            ),
            Span::styled(format!("   {}", self.mode), dim_bold_style),
        ]);
        Paragraph::new(header).render(chunks[0], buf);

        let field = chunks[1];
        if field.width < 4 || field.height < 2 {
            return;
        }

        // Draw in travel order so the balloons closest to the top win overlaps.
        for balloon in self
            .balloons
            .iter()
            .sorted_by(|a, b| {
                b.position
                    .partial_cmp(&a.position)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        {
            let Some(row) = percent_to_cell(balloon.position, field.height) else {
                // Off the visible field (still rising in, or on the way out).
                continue;
            };
            let Some(col) = percent_to_cell(balloon.lane as f64, field.width) else {
                continue;
            };

            let y = field.y + row;
            let color_style = Style::default()
                .patch(bold_style)
                .fg(palette_color(balloon.color));

            match &balloon.content {
                BalloonContent::Target { text, typed } => {
                    // Keep the glyph and the full label inside the field.
                    let label_width = text.width() as u16 + 1;
                    let right = field.x + field.width;
                    let max_x = right - 1;
                    let mut x = field.x + col;
                    if x + label_width > max_x {
                        x = max_x.saturating_sub(label_width).max(field.x);
                    }

                    let glyph = if balloon.is_completed() {
                        POPPED_GLYPH
                    } else {
                        BALLOON_GLYPH
                    };
                    buf.set_string(x, y, glyph, color_style);
                    let mut tx = x + 2;
                    if tx < right {
                        buf.set_stringn(tx, y, typed, (right - tx) as usize, green_bold_style);
                        tx += typed.width() as u16;
                        if tx < right {
                            buf.set_stringn(
                                tx,
                                y,
                                &text[typed.len()..],
                                (right - tx) as usize,
                                dim_bold_style,
                            );
                        }
                    }
                }
                BalloonContent::Distraction => {
                    let x = field.x + col.min(field.width - 1);
                    buf.set_string(x, y, BALLOON_GLYPH, color_style);
                }
            }
        }

        if self.paused {
            let notice = Line::from(Span::styled(
                "PAUSED - press space to resume",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ));
            let notice_area = Rect {
                x: field.x,
                y: field.y + field.height / 2,
                width: field.width,
                height: 1,
            };
            Paragraph::new(notice)
                .alignment(Alignment::Center)
                .render(notice_area, buf);
        }
    }
}

/// Menu screen: difficulty selection plus the stored best per mode.
pub fn render_home(f: &mut Frame, selected: Difficulty, bests: &[(Difficulty, u32)]) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(4)
        .constraints(
            [
                Constraint::Length(area.height / 4),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(Difficulty::ALL.len() as u16 + 1),
                Constraint::Min(2),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Span::styled(
        "s k y t y p e",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let blurb = Paragraph::new(
        "Type the letters or words on the balloons before they float away. \
         Complete the text to pop the balloon and score points!",
    )
    .style(Style::default().add_modifier(Modifier::DIM))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(blurb, chunks[2]);

    let lines: Vec<Line> = Difficulty::ALL
        .iter()
        .map(|mode| {
            let best = bests
                .iter()
                .find(|(m, _)| m == mode)
                .map(|(_, s)| *s)
                .unwrap_or(0);
            let marker = if *mode == selected { "▸ " } else { "  " };
            let style = if *mode == selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{:<28}", mode.menu_label()), style),
                Span::styled(
                    format!("best {best}"),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();
    let menu = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(menu, chunks[3]);

    let help = Paragraph::new("up/down select · enter play · (q)uit")
        .style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);
}

/// End-of-session screen: final score, stored best, restart/home actions.
pub fn render_game_over(f: &mut Frame, game: &Game, best: u32) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(4)
        .constraints(
            [
                Constraint::Length(area.height / 3),
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Min(2),
            ]
            .as_ref(),
        )
        .split(area);

    let won = matches!(game.phase, GamePhase::Ended { won: true });
    let (headline, headline_color) = if won {
        ("You popped them all!", Color::Green)
    } else {
        ("Game Over!", Color::Red)
    };
    let title = Paragraph::new(Span::styled(
        headline,
        Style::default()
            .fg(headline_color)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let mut lines = vec![Line::from(vec![
        Span::raw("Your score is "),
        Span::styled(
            game.score.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    if game.new_best {
        lines.push(Line::from(Span::styled(
            "New high score!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Best for {}: {best}", game.mode),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    let summary = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(summary, chunks[2]);

    let help = Paragraph::new("(r)estart · (h)ome · (q)uit")
        .style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}
