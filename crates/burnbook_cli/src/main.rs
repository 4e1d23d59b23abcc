//! Line-oriented BurnBook driver.
//!
//! # Responsibility
//! - Verify `burnbook_core` linkage with the ping/version probe.
//! - Drive one session from stdin commands and render through stdout.

use burnbook_core::{
    core_version, init_logging_from_env, ping, remaining_label, BurnBook, BurnBookConfig,
    BurnZoneVisual, DropZone, Note, NotifyKind, PointerDragAdapter, Presenter, TouchDragAdapter,
};
use log::info;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  write <text>           replace the draft
  seal                   seal the draft now
  tick [n]               advance n countdown ticks (default 1)
  wait <ms>              advance session time
  drag <index>           pick up a sealed note
  saved-drag <index>     pick up a saved note
  hover burn|save|none   move the dragged note over a zone
  touch <y> <burn_top>   touch move; y at or below burn_top is the burn zone
  drop [burn|save|none]  release the dragged note
  cancel                 abort the drag
  show                   render everything
  help                   print this text
  quit                   exit";

/// Renders presenter calls as plain lines.
struct StdoutPresenter<W: Write> {
    out: W,
}

impl<W: Write> StdoutPresenter<W> {
    fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        // Closed stdout ends the session at the next read.
        let _ = writeln!(self.out, "{text}");
    }

    fn list(&mut self, title: &str, notes: &[Note]) {
        self.line(&format!("{title} ({})", notes.len()));
        for (index, note) in notes.iter().enumerate() {
            self.line(&format!("  [{index}] {}", note.content()));
        }
    }
}

impl<W: Write> Presenter for StdoutPresenter<W> {
    fn notify(&mut self, kind: NotifyKind, message: &str) {
        self.line(&format!("[{}] {message}", kind.as_str()));
    }

    fn render_draft(&mut self, text: &str, remaining_seconds: Option<u32>) {
        self.line(&format!("draft: {text:?}"));
        if let Some(seconds) = remaining_seconds {
            self.line(&format!("  {}", remaining_label(seconds)));
        }
    }

    fn render_sealed_list(&mut self, notes: &[Note]) {
        self.list("sealed", notes);
    }

    fn render_saved_list(&mut self, notes: &[Note]) {
        self.list("saved", notes);
    }

    fn render_burn_zone_state(&mut self, hovering: bool, dropping: bool) {
        let label = match BurnZoneVisual::from_flags(hovering, dropping) {
            BurnZoneVisual::Idle => "idle",
            BurnZoneVisual::Hovering => "hovering",
            BurnZoneVisual::Dropping => "dropping",
        };
        self.line(&format!("burn zone: {label}"));
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Write(String),
    Seal,
    Tick(u32),
    Wait(u64),
    Drag(usize),
    SavedDrag(usize),
    Hover(DropZone),
    Touch { y: f64, burn_top: f64 },
    Drop(Option<DropZone>),
    Cancel,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "write" => Command::Write(rest.to_string()),
        "seal" => Command::Seal,
        "tick" if rest.is_empty() => Command::Tick(1),
        "tick" => Command::Tick(parse_arg(rest, "tick count")?),
        "wait" => Command::Wait(parse_arg(rest, "milliseconds")?),
        "drag" => Command::Drag(parse_arg(rest, "index")?),
        "saved-drag" => Command::SavedDrag(parse_arg(rest, "index")?),
        "hover" => Command::Hover(rest.parse().map_err(|err| format!("{err}"))?),
        "touch" => {
            let mut parts = rest.split_whitespace();
            let y = parse_arg(parts.next().unwrap_or_default(), "y")?;
            let burn_top = parse_arg(parts.next().unwrap_or_default(), "burn_top")?;
            Command::Touch { y, burn_top }
        }
        "drop" if rest.is_empty() => Command::Drop(None),
        "drop" => Command::Drop(Some(rest.parse().map_err(|err| format!("{err}"))?)),
        "cancel" => Command::Cancel,
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

fn parse_arg<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("expected {what}, got `{raw}`"))
}

/// Applies one command; returns `false` on quit.
fn run_command<W: Write>(
    book: &mut BurnBook<StdoutPresenter<W>>,
    command: Command,
) -> Result<bool, String> {
    let pointer = PointerDragAdapter::new();
    match command {
        Command::Write(text) => book.on_edit_draft(&text).map_err(|err| err.to_string())?,
        Command::Seal => {
            if book.on_seal_clicked().is_none() {
                book.presenter_mut().line("nothing to seal");
            }
        }
        Command::Tick(count) => {
            let step = book.config().tick_interval_ms;
            book.advance_by(u64::from(count) * step);
        }
        Command::Wait(ms) => book.advance_by(ms),
        Command::Drag(index) => {
            let id = note_at(book.sealed(), index, "sealed")?;
            pointer.drag_start(book, id).map_err(|err| err.to_string())?;
        }
        Command::SavedDrag(index) => {
            let id = note_at(book.saved(), index, "saved")?;
            pointer.drag_start(book, id).map_err(|err| err.to_string())?;
        }
        Command::Hover(zone) => pointer.drag_over(book, zone, None),
        Command::Touch { y, burn_top } => TouchDragAdapter::new(burn_top).touch_move(book, 0.0, y),
        Command::Drop(Some(zone)) => {
            pointer.drop_on(book, zone);
            pointer.drag_end(book);
        }
        Command::Drop(None) => {
            if let Some(zone) = book.gesture().map(|gesture| gesture.target_zone) {
                pointer.drop_on(book, zone);
                pointer.drag_end(book);
            }
        }
        Command::Cancel => pointer.drag_end(book),
        Command::Show => book.render_all(),
        Command::Help => book.presenter_mut().line(HELP),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn note_at(notes: &[Note], index: usize, list: &str) -> Result<burnbook_core::NoteId, String> {
    notes
        .get(index)
        .map(Note::id)
        .ok_or_else(|| format!("no {list} note at index {index}"))
}

fn main() {
    println!("burnbook_core ping={}", ping());
    println!("burnbook_core version={}", core_version());

    if let Err(err) = init_logging_from_env() {
        eprintln!("logging disabled: {err}");
    }

    let config = match BurnBookConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };
    let mut book = match BurnBook::new(config, StdoutPresenter::new(io::stdout())) {
        Ok(book) => book,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };
    info!("event=cli_start module=cli status=ok");

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let outcome = parse_command(&line)
            .and_then(|command| command.map_or(Ok(true), |command| run_command(&mut book, command)));
        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => eprintln!("error: {err}"),
        }
    }
    info!("event=cli_exit module=cli status=ok");
}

#[cfg(test)]
mod tests {
    use super::{parse_command, run_command, Command, StdoutPresenter};
    use burnbook_core::{BurnBook, BurnBookConfig, DropZone};

    fn session() -> BurnBook<StdoutPresenter<Vec<u8>>> {
        let config = BurnBookConfig {
            burn_animation_ms: 100,
            ..BurnBookConfig::default()
        };
        BurnBook::new(config, StdoutPresenter::new(Vec::new())).expect("config should be valid")
    }

    fn run(book: &mut BurnBook<StdoutPresenter<Vec<u8>>>, line: &str) {
        let command = parse_command(line)
            .expect("command should parse")
            .expect("line should not be blank");
        run_command(book, command).expect("command should succeed");
    }

    fn output(book: &BurnBook<StdoutPresenter<Vec<u8>>>) -> String {
        String::from_utf8(book.presenter().out.clone()).expect("output should be UTF-8")
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("tick"), Ok(Some(Command::Tick(1))));
        assert_eq!(parse_command("tick 5"), Ok(Some(Command::Tick(5))));
        assert_eq!(
            parse_command("write hello  world"),
            Ok(Some(Command::Write("hello  world".to_string())))
        );
        assert_eq!(
            parse_command("hover save"),
            Ok(Some(Command::Hover(DropZone::Save)))
        );
        assert_eq!(
            parse_command("touch 700 600"),
            Ok(Some(Command::Touch {
                y: 700.0,
                burn_top: 600.0
            }))
        );
        assert!(parse_command("drag x").is_err());
        assert!(parse_command("touch 1").is_err());
        assert!(parse_command("fly").is_err());
    }

    #[test]
    fn countdown_seals_after_thirty_ticks() {
        let mut book = session();
        run(&mut book, "write idea");
        run(&mut book, "tick 29");
        assert!(book.sealed().is_empty());
        run(&mut book, "tick");
        assert_eq!(book.sealed().len(), 1);

        let out = output(&book);
        assert!(out.contains("Time remaining: 30 seconds"));
        assert!(out.contains("[info] Your idea has been sealed!"));
    }

    #[test]
    fn drag_to_burn_then_wait_removes_note() {
        let mut book = session();
        run(&mut book, "write doomed");
        run(&mut book, "seal");
        run(&mut book, "drag 0");
        run(&mut book, "touch 650 600");
        run(&mut book, "drop");
        assert_eq!(book.sealed().len(), 1);
        run(&mut book, "wait 100");
        assert!(book.sealed().is_empty());
        assert!(output(&book).contains("Page burned forever!"));
    }

    #[test]
    fn drop_on_save_moves_note() {
        let mut book = session();
        run(&mut book, "write keeper");
        run(&mut book, "seal");
        run(&mut book, "drag 0");
        run(&mut book, "drop save");
        assert!(book.sealed().is_empty());
        assert_eq!(book.saved().len(), 1);
        assert!(book.gesture().is_none());
    }

    #[test]
    fn drop_releases_over_last_hovered_zone() {
        let mut book = session();
        run(&mut book, "write held");
        run(&mut book, "seal");
        run(&mut book, "drop");
        assert_eq!(book.sealed().len(), 1);

        run(&mut book, "drag 0");
        run(&mut book, "hover save");
        run(&mut book, "drop");
        assert!(book.gesture().is_none());
        assert_eq!(book.saved().len(), 1);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut book = session();
        let command = parse_command("saved-drag 3")
            .expect("command should parse")
            .expect("line should not be blank");
        let err = run_command(&mut book, command).expect_err("empty list has no index 3");
        assert!(err.contains("no saved note"));
    }
}
