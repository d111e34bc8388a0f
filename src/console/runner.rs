//! Console domain: the app runner reading commands from stdin.

use bevy::app::PluginsState;
use bevy::prelude::*;
use std::io::{self, BufRead, Write};

use crate::console::{ConsoleFlow, ConsoleOutput, dispatch, parse_command, render};
use crate::tasks::TaskBoard;

fn flush_output(app: &mut App) {
    let lines = app.world_mut().resource_mut::<ConsoleOutput>().drain();
    for line in lines {
        println!("{}", line.trim_end());
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

/// Runs one `App::update` per console line until `quit` or end of input.
pub fn console_runner(mut app: App) -> AppExit {
    if app.plugins_state() != PluginsState::Cleaned {
        while app.plugins_state() == PluginsState::Adding {
            bevy::tasks::tick_global_task_pools_on_main_thread();
        }
        app.finish();
        app.cleanup();
    }

    app.update();
    let board = render::render_board(app.world().resource::<TaskBoard>());
    app.world_mut().resource_mut::<ConsoleOutput>().push(board);
    app.world_mut()
        .resource_mut::<ConsoleOutput>()
        .push("Type 'help' for commands.");
    flush_output(&mut app);
    prompt();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read console input: {}", e);
                return AppExit::error();
            }
        };

        if line.trim().is_empty() {
            prompt();
            continue;
        }

        match parse_command(&line) {
            Ok(command) => {
                if dispatch(app.world_mut(), command) == ConsoleFlow::Quit {
                    break;
                }
                app.update();
            }
            Err(e) => println!("{}", e),
        }

        flush_output(&mut app);
        if let Some(exit) = app.should_exit() {
            return exit;
        }
        prompt();
    }

    info!("Console closed");
    AppExit::Success
}
