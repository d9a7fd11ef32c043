// console.rs
// Line-oriented control surface on stdin

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::achievements::AchievementId;
use crate::error::CavityError;
use crate::export::ExportFormat;
use crate::material::Material;
use crate::presets::PRESETS;
use crate::state::Parameter;
use crate::tutorial::STEPS;

use super::state::{latest_snapshot, send_command, SessionSnapshot, SimCommand, TutorialCommand};

pub const HELP: &str = "\
Commands:
  set <param> <value>        mirrorAngle | mirrorSpacing | magneticField | fieldDirection | insertedMaterial
  preset <id>                resonance | graphene-basic | topological | advanced-chiral
  start | stop | toggle      control the animation
  reset                      restore default parameters and stop
  resize <width>             canvas width in pixels (height stays 400)
  tutorial open|next|prev|skip|restart
  status                     print the current state
  materials                  list materials and whether they are unlocked
  export json|csv|md         write an export file
  snapshot <file.png>        save the current frame
  help | quit";

#[derive(Debug, PartialEq)]
pub enum ConsoleInput {
    Command(SimCommand),
    Status,
    Materials,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<ConsoleInput, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ConsoleInput::Empty);
    };
    let args: Vec<&str> = words.collect();
    let arg = |i: usize, what: &str| args.get(i).copied().ok_or_else(|| format!("{} needs {}", verb, what));

    let cmd = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let parameter: Parameter = arg(0, "a parameter")?.parse().map_err(|e: CavityError| e.to_string())?;
            let value = parameter.parse_value(arg(1, "a value")?).map_err(|e| e.to_string())?;
            SimCommand::SetParameter { parameter, value }
        }
        "preset" => SimCommand::LoadPreset(arg(0, "a preset id")?.to_string()),
        "start" => SimCommand::SetRunning(true),
        "stop" => SimCommand::SetRunning(false),
        "toggle" => SimCommand::ToggleRunning,
        "reset" => SimCommand::Reset,
        "resize" => {
            let width = arg(0, "a width")?
                .parse::<u32>()
                .map_err(|e| format!("bad width: {}", e))?;
            SimCommand::Resize { width }
        }
        "tutorial" => SimCommand::Tutorial(match arg(0, "open|next|prev|skip|restart")? {
            "open" => TutorialCommand::Open,
            "next" => TutorialCommand::Next,
            "prev" | "previous" => TutorialCommand::Previous,
            "skip" => TutorialCommand::Skip,
            "restart" => TutorialCommand::Restart,
            other => return Err(format!("unknown tutorial action '{}'", other)),
        }),
        "export" => SimCommand::Export(arg(0, "json|csv|md")?.parse::<ExportFormat>()?),
        "snapshot" => SimCommand::Snapshot(PathBuf::from(arg(0, "a file name")?)),
        "status" => return Ok(ConsoleInput::Status),
        "materials" => return Ok(ConsoleInput::Materials),
        "help" | "?" => return Ok(ConsoleInput::Help),
        "quit" | "exit" => return Ok(ConsoleInput::Quit),
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(ConsoleInput::Command(cmd))
}

pub fn format_status(snapshot: &SessionSnapshot) -> String {
    let s = &snapshot.state;
    let mut lines = vec![
        format!(
            "{} | score {} | {} particles | frame {}",
            if snapshot.running { "running" } else { "stopped" },
            snapshot.score,
            snapshot.particle_count,
            snapshot.frame
        ),
        Parameter::ALL
            .iter()
            .map(|p| format!("{} {}", p, s.display_value(*p)))
            .collect::<Vec<_>>()
            .join(" | "),
        format!(
            "energy {} μeV | coherence {}% | chirality {} | topological {}",
            s.energy, s.coherence, s.chirality, s.topological_phase
        ),
        format!("phase: {} - {}", snapshot.phase.name(), snapshot.phase.description()),
        format!(
            "unlocked: {}",
            snapshot.unlocked.iter().map(|m| m.key()).collect::<Vec<_>>().join(", ")
        ),
        format!(
            "achievements ({} pts): {}",
            snapshot.achievement_points,
            snapshot
                .achievements
                .iter()
                .map(|id: &AchievementId| id.info().name)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    ];
    if let Some(step) = snapshot.tutorial_step {
        let t = &STEPS[step];
        lines.push(format!("tutorial {}/{}: {} - {}", step + 1, STEPS.len(), t.title, t.action));
    }
    lines.join("\n")
}

/// One line per material. `none` is always available.
pub fn format_materials(unlocked: &[Material]) -> String {
    Material::ALL
        .iter()
        .map(|m| {
            let props = m.props();
            let access = if m.is_none() || unlocked.contains(m) { "available" } else { "locked" };
            format!("{:<12} [{}] {}: {} ({})", m.key(), access, props.name, props.description, props.properties)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read commands until `quit` or end of input.
pub fn run_console<R: BufRead>(input: R) -> Result<(), CavityError> {
    println!("{}", HELP);
    println!(
        "presets: {}",
        PRESETS.iter().map(|p| p.id).collect::<Vec<_>>().join(", ")
    );
    for line in input.lines() {
        match parse_line(&line?) {
            Ok(ConsoleInput::Command(cmd)) => send_command(cmd)?,
            Ok(ConsoleInput::Status) => match latest_snapshot() {
                Some(snapshot) => println!("{}", format_status(&snapshot)),
                None => println!("no state published yet"),
            },
            Ok(ConsoleInput::Materials) => {
                let unlocked = latest_snapshot().map(|s| s.unlocked).unwrap_or_else(|| Material::INITIALLY_UNLOCKED.to_vec());
                println!("{}", format_materials(&unlocked));
            }
            Ok(ConsoleInput::Help) => println!("{}", HELP),
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Empty) => {}
            Err(message) => println!("{}", message),
        }
        io::stdout().flush()?;
    }
    Ok(())
}
