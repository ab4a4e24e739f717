use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    terminal::{self, Clear, ClearType},
};
use std::{
    io::{stdout, Stdout, Write},
    time::Duration,
};
use tracing::{error, info};
use typing_game::{
    click_outside,
    config::Config,
    events::{ClickEvent, ClickTarget},
    logging, screens,
    types::{Node, State},
    word::Word,
};

fn main_loop(stdout: &mut Stdout, state: &mut State, target: &ClickTarget) -> anyhow::Result<()> {
    // Clear the previous frame
    queue!(stdout, Clear(ClearType::All))?;

    screens::main_screen(stdout, state)?;

    // Render the queued frame
    stdout.flush()?;

    if event::poll(Duration::from_millis(16))? {
        match event::read()? {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(button),
                column,
                row,
                ..
            }) => {
                state.last_click = Some((column, row));

                let click = ClickEvent::new(column, row, button);

                if state.panel.contains(column, row) {
                    let word = state.word.clone();
                    target.dispatch_to(&click, |_| {
                        let mut word = word.borrow_mut();
                        if !word.active {
                            info!(word = %word, "word focused");
                            word.active = true;
                        }
                    });
                } else {
                    target.dispatch(&click);
                }
            }
            Event::Key(KeyEvent {
                code: KeyCode::Esc, ..
            }) => {
                state.running = false;
            }
            Event::Resize(new_columns, new_rows) => {
                state.resize(new_columns, new_rows);
            }
            _ => (),
        };
    }

    Ok(())
}

/// Steps the UI until it asks to quit. Any error ends the loop, since every
/// step is terminal I/O and retrying a dead terminal would spin.
fn run_until_quit(
    state: &mut State,
    mut step: impl FnMut(&mut State) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    while state.running {
        step(state)?;
    }

    Ok(())
}

fn restore_terminal(stdout: &mut Stdout) -> anyhow::Result<()> {
    execute!(stdout, DisableMouseCapture, Clear(ClearType::All), Show)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn run(stdout: &mut Stdout, config: &Config) -> anyhow::Result<()> {
    // Get initial terminal size
    let (columns, rows) = terminal::size().context("couldn't read terminal size")?;

    let mut state = State::new(
        columns,
        rows,
        (config.panel_width, config.panel_height),
        Word::new(0, &config.word),
    );

    let target = ClickTarget::new();

    let _blur = {
        let word = state.word.clone();
        let outside_clicks = state.outside_clicks.clone();
        click_outside::attach(&target, state.panel.clone(), move || {
            outside_clicks.set(outside_clicks.get() + 1);

            let mut word = word.borrow_mut();
            if word.active {
                info!(word = %word, "word blurred");
                word.active = false;
            }
        })
    };

    run_until_quit(&mut state, |state| main_loop(stdout, state, &target))
        .context("terminal I/O failed")?;

    info!(outside_clicks = state.outside_clicks.get(), "quitting");

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    logging::init_tracing(&config.log_file, &config.log_filter)?;

    terminal::enable_raw_mode().context("couldn't enable raw mode")?;

    let mut stdout = stdout();

    let result = execute!(stdout, EnableMouseCapture, Hide, Clear(ClearType::All))
        .map_err(anyhow::Error::from)
        .and_then(|_| run(&mut stdout, &config));

    if let Err(err) = &result {
        error!("{err:#}");
    }

    restore_terminal(&mut stdout)?;

    result
}
