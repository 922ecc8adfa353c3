//! Main application entry point

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use av_core::Key;
use av_data::load_recording;

mod viewer;

use viewer::Viewer;

/// Inspect recorded JSAV exercise submissions
#[derive(Debug, Parser)]
#[command(name = "avinspect", version, about)]
struct Args {
    /// Recording file written by the submission downloader
    file: PathBuf,

    /// Open the submission with this 1-based number
    #[arg(long, value_name = "N")]
    submission: Option<String>,

    /// Open the submission with this id
    #[arg(long, value_name = "ID", conflicts_with = "submission")]
    id: Option<i64>,

    /// Playback speed passed to the animation driver
    #[arg(long, value_name = "SPEED")]
    speed: Option<f64>,

    /// Print every recorded array snapshot of the open submission
    #[arg(long)]
    dump_steps: bool,

    /// Print the generated animation script as JSON
    #[arg(long)]
    dump_script: bool,

    /// Read navigation commands from standard input
    #[arg(long)]
    interactive: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let runtime = tokio::runtime::Runtime::new()?;

    let viewer = Viewer::new();
    if let Some(speed) = args.speed {
        viewer.set_speed(speed);
    }

    // The rejection reason is the status output on failure; nothing is
    // retried and no partial state is kept.
    let loaded = runtime.block_on(load_recording(&args.file))?;
    print!("{}", loaded.summary);
    println!("Submissions: {}", loaded.summary.submission_count);

    viewer.install(loaded);

    if let Some(raw) = args.submission.as_deref() {
        let shown = viewer.submission_number_changed(raw);
        if shown != raw.trim() {
            info!(field = shown, "submission number reset");
        }
    }
    if let Some(id) = args.id {
        let shown = viewer.submission_id_changed(&id.to_string());
        if shown != id.to_string() {
            info!(field = shown, "submission id reset");
        }
    }

    if args.dump_steps {
        for line in viewer.step_dump() {
            println!("{line}");
        }
    }
    if args.dump_script {
        if let Some(json) = viewer.script_json() {
            println!("{json}");
        } else {
            println!("no animation script for the open submission");
        }
    }

    if args.interactive {
        run_command_loop(&viewer)?;
    }

    Ok(())
}

/// Interactive command loop, the CLI embodiment of the UI surface
///
/// `up`/`down`/`left`/`right`/`home`/`end` mirror the keyboard bindings;
/// `next`/`previous`/`goto N`/`id N` mirror the buttons and input fields.
fn run_command_loop(viewer: &Viewer) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "q" | "quit" | "exit" => break,
            "n" | "next" => {
                viewer.handle_key(Key::Down);
            }
            "p" | "prev" | "previous" => {
                viewer.handle_key(Key::Up);
            }
            "goto" => {
                let shown = viewer.submission_number_changed(argument);
                if shown != argument {
                    println!("submission number: {shown}");
                }
            }
            "id" => {
                let shown = viewer.submission_id_changed(argument);
                if shown != argument {
                    println!("submission id: {shown}");
                }
            }
            "left" | "right" | "up" | "down" | "home" | "end" => {
                if let Some(key) = Key::from_name(command) {
                    viewer.handle_key(key);
                }
                if let Some((position, count)) = viewer.animation_position() {
                    println!("animation step {}/{}", position, count.saturating_sub(1));
                }
            }
            "steps" => {
                for line in viewer.step_dump() {
                    println!("{line}");
                }
            }
            "script" => match viewer.script_json() {
                Some(json) => println!("{json}"),
                None => println!("no animation script for the open submission"),
            },
            "status" => match viewer.status_line() {
                Some(status) => println!("{status}"),
                None => println!("no submission open"),
            },
            _ => println!("unknown command: {line}"),
        }
    }

    Ok(())
}
