use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_engine::analysis::Hint;
use connect4_engine::board::{Board, Cell, Player};
use connect4_engine::config::{DisplayConfig, TokenColor};

fn to_color(color: TokenColor) -> Color {
    match color {
        TokenColor::Red => Color::Red,
        TokenColor::Yellow => Color::Yellow,
        TokenColor::Blue => Color::DarkBlue,
        TokenColor::Green => Color::Green,
        TokenColor::Magenta => Color::Magenta,
        TokenColor::Cyan => Color::Cyan,
        TokenColor::White => Color::White,
        TokenColor::Black => Color::Black,
    }
}

pub fn player_color(display: &DisplayConfig, player: Player) -> Color {
    match player {
        Player::One => to_color(display.player_one_color),
        Player::Two => to_color(display.player_two_color),
    }
}

/// Draws the board with 1-indexed column labels, colouring the labels by hint
/// when hints are given
pub fn render(board: &Board, hints: Option<&[Hint]>, display: &DisplayConfig) -> Result<()> {
    let mut stdout = stdout();
    let board_color = to_color(display.board_color);

    stdout.queue(PrintStyledContent(style("\n")))?;
    for column in 0..board.cols() {
        let label = ((column + 1) % 10).to_string();
        let label_color = match hints.and_then(|hints| hints.get(column)) {
            Some(Hint::Winning) => Color::Green,
            Some(Hint::Losing) => Color::Red,
            Some(Hint::Unplayable) => Color::DarkGrey,
            Some(Hint::Neutral) | None => Color::White,
        };
        stdout.queue(PrintStyledContent(
            style(label).attribute(Attribute::Bold).with(label_color),
        ))?;
    }
    stdout.queue(PrintStyledContent(style("\n")))?;

    for row in 0..board.rows() {
        for column in 0..board.cols() {
            let cell = board.get(row, column).unwrap_or(Cell::Empty);
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(board_color)
                    .with(match cell.player() {
                        Some(player) => player_color(display, player),
                        None => board_color,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
