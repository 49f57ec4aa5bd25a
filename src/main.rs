use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use novel_session::kernel::error::Result;
use novel_session::kernel::services::adapters::{load_settings_from, load_settings_or_default};
use novel_session::replay::replay;

mod logging;

struct Args {
    actions: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut actions = None;
    let mut settings = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => settings = Some(PathBuf::from(args.next()?)),
            _ if actions.is_none() => actions = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }
    Some(Args {
        actions: actions?,
        settings,
    })
}

fn run(args: Args) -> Result<()> {
    let settings = match &args.settings {
        Some(path) => load_settings_from(path)?,
        None => load_settings_or_default(),
    };

    let reader = BufReader::new(File::open(&args.actions)?);
    let outcome = replay(reader, settings.session)?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &outcome.snapshot)?;
    writeln!(stdout)?;
    Ok(())
}

fn main() -> ExitCode {
    let _logging = logging::init();

    let Some(args) = parse_args() else {
        eprintln!("usage: novel-session <actions.jsonl> [--settings <path>]");
        return ExitCode::from(2);
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "replay failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
