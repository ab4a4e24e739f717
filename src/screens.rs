use super::types::{Rect, State};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{style, Attribute, Color, Print, PrintStyledContent, Stylize},
};
use std::io::{self, Write};

const HINT: &str = "click here to focus";

pub fn main_screen(stdout: &mut impl Write, state: &State) -> io::Result<()> {
    if let Some(panel) = state.panel.get() {
        panel_frame(stdout, panel)?;
        panel_word(stdout, state, panel)?;
    }

    print_status(stdout, state)?;
    print_help(stdout, state)?;

    Ok(())
}

fn panel_frame(stdout: &mut impl Write, panel: Rect) -> io::Result<()> {
    if panel.width < 2 || panel.height < 2 {
        return Ok(());
    }

    let (x_end, y_end) = (panel.right() - 1, panel.bottom() - 1);

    for x in panel.x..=x_end {
        queue!(
            stdout,
            MoveTo(x, panel.y),
            Print('-'),
            MoveTo(x, y_end),
            Print('-')
        )?;
    }

    for y in panel.y + 1..y_end {
        queue!(
            stdout,
            MoveTo(panel.x, y),
            Print('|'),
            MoveTo(x_end, y),
            Print('|')
        )?;
    }

    Ok(())
}

fn panel_word(stdout: &mut impl Write, state: &State, panel: Rect) -> io::Result<()> {
    let word = state.word.borrow();

    let (color, boldness) = if word.active {
        (Color::Green, Attribute::Bold)
    } else {
        (Color::DarkGrey, Attribute::NormalIntensity)
    };

    let len = u16::try_from(word.letters.len()).unwrap_or(u16::MAX);
    let x = panel.x + panel.width.saturating_sub(len) / 2;
    let y = panel.y + panel.height / 2;

    for (column, letter) in (x..panel.right()).zip(&word.letters) {
        queue!(
            stdout,
            MoveTo(column, y),
            PrintStyledContent(style(letter.value).with(color).attribute(boldness))
        )?;
    }

    if !word.active && panel.height > 2 {
        // Kept inside the frame
        let room = usize::from(panel.width.saturating_sub(2));
        let hint = &HINT[..HINT.len().min(room)];
        let hint_x = panel.x + (panel.width - hint.len() as u16) / 2;

        queue!(
            stdout,
            MoveTo(hint_x, y + 1),
            PrintStyledContent(hint.dark_grey())
        )?;
    }

    Ok(())
}

pub fn print_status(stdout: &mut impl Write, state: &State) -> io::Result<()> {
    queue!(
        stdout,
        MoveTo(0, 0),
        PrintStyledContent("Outside clicks: ".yellow().bold()),
        PrintStyledContent(style(state.outside_clicks.get()).yellow().bold())
    )?;

    if let Some((column, row)) = state.last_click {
        queue!(
            stdout,
            MoveTo(0, 1),
            PrintStyledContent(style(format!("Last click: {column}, {row}")).dark_grey())
        )?;
    }

    Ok(())
}

pub fn print_help(stdout: &mut impl Write, state: &State) -> io::Result<()> {
    queue!(
        stdout,
        MoveTo(0, state.rows.saturating_sub(1)),
        PrintStyledContent("ESC - Quit".yellow().bold())
    )?;

    Ok(())
}
