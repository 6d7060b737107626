//! Interactive timer session.
//!
//! Owns the one timer of this process: bus events are forwarded into an mpsc
//! channel, a spawned driver delivers the 1-second ticks, and the loop below
//! multiplexes rendering, stdin commands, and ctrl-c. Dropping the machine on
//! exit cancels the live schedule and ends the driver.

use std::error::Error;
use std::io::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};

use clap::Args;
use pomotick_core::timer::ticker;
use pomotick_core::{TimerCommand, TimerEvent, TimerState, TimerStateMachine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::{display, menu, notify};

/// Width the tick line is padded to so redraws cover the previous text.
const STATUS_WIDTH: usize = 32;

#[derive(Args)]
pub struct RunArgs {
    /// Start a work interval immediately
    #[arg(long)]
    pub work: bool,
    /// Emit events as JSON lines instead of the interactive display
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let config = Config::load();

    let mut machine = TimerStateMachine::new();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    machine.on_event(move |event| {
        let _ = event_tx.send(event.clone());
    });

    let machine = Arc::new(Mutex::new(machine));
    let driver = ticker::spawn(&machine);

    if args.work {
        TimerCommand::StartWork.execute(&mut *lock(&machine)?);
    } else if !args.json {
        println!("pomotick: type a command, 'help' for help, 'quit' to exit");
        println!("commands: {}", menu::prompt_line(&*lock(&machine)?));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(event) = event_rx.recv() => {
                if args.json {
                    println!("{}", serde_json::to_string(&event)?);
                } else {
                    render_event(&machine, &event, &config)?;
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_line(&machine, line.trim(), &config, args.json)? {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    if !args.json {
        println!();
    }

    // Ends the session: the machine drops, the schedule is canceled, and the
    // driver task sees the closed channel.
    drop(machine);
    let _ = driver.await;
    Ok(())
}

fn lock(
    machine: &Arc<Mutex<TimerStateMachine>>,
) -> Result<MutexGuard<'_, TimerStateMachine>, Box<dyn Error>> {
    machine.lock().map_err(|_| "timer state poisoned".into())
}

fn render_event(
    machine: &Arc<Mutex<TimerStateMachine>>,
    event: &TimerEvent,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    match event {
        TimerEvent::TimeUpdated { seconds, .. } => {
            let (state, pause) = {
                let machine = lock(machine)?;
                (machine.state(), machine.pause_kind())
            };
            let status = display::status_line(state, pause, *seconds, config.display.glyphs);
            print!("\r{status:<width$}", width = STATUS_WIDTH);
            std::io::stdout().flush()?;
        }
        TimerEvent::StateChanged { .. } => {
            let machine = lock(machine)?;
            let snapshot = machine.snapshot();
            let status = display::status_line(
                snapshot.state,
                snapshot.pause_type,
                snapshot.seconds,
                config.display.glyphs,
            );
            println!("\r{status:<width$}", width = STATUS_WIDTH);
            let available = menu::prompt_line(&machine);
            if !available.is_empty() {
                println!("commands: {available}");
            }
        }
        TimerEvent::TimerCompleted { state, .. } => {
            if matches!(state, TimerState::Work | TimerState::Break) {
                let banner = format!("{} finished", display::state_label(*state));
                println!("\r{banner:<width$}", width = STATUS_WIDTH);
            }
            if config.notifications.enabled {
                notify::timer_completed(*state);
            }
        }
    }
    Ok(())
}

/// Dispatch one input line. Returns false when the session should end.
fn handle_line(
    machine: &Arc<Mutex<TimerStateMachine>>,
    line: &str,
    config: &Config,
    json: bool,
) -> Result<bool, Box<dyn Error>> {
    match line {
        "" => {}
        "quit" | "q" | "exit" => return Ok(false),
        "help" | "?" => print_help(),
        "status" => {
            let machine = lock(machine)?;
            if json {
                println!("{}", serde_json::to_string(&machine.snapshot())?);
            } else {
                println!(
                    "{}",
                    display::status_line(
                        machine.state(),
                        machine.pause_kind(),
                        machine.time(),
                        config.display.glyphs,
                    )
                );
            }
        }
        word => match TimerCommand::from_name(word) {
            Ok(command) => {
                let mut machine = lock(machine)?;
                if command.can_execute(&machine) {
                    command.execute(&mut machine);
                } else {
                    println!(
                        "{command} is not available while {}",
                        display::state_label(machine.state())
                    );
                    println!("commands: {}", menu::prompt_line(&machine));
                }
            }
            Err(e) => println!("{e}; try 'help'"),
        },
    }
    Ok(true)
}

fn print_help() {
    println!("timer commands:");
    for command in TimerCommand::ALL {
        println!("  {}", command.name());
    }
    println!("session commands:");
    println!("  status  print the current timer state");
    println!("  help    this text");
    println!("  quit    exit");
}
