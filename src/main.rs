// SPDX-License-Identifier: MIT
//
// rawkey — print the key events a terminal sends.
//
// Reads stdin in chunks, runs every chunk through a `KeyStream`, and
// prints one line per decoded key in chord notation (`ctrl+up`,
// `shift+A`). With `--hex` the raw bytes follow the chord:
//
//   f6              1b 5b 31 37 7e
//
// The terminal has to be in raw mode for keys to arrive unprocessed:
//
//   stty raw -echo; rawkey --hex; stty sane
//
// It also works on a pipe: `printf '\x1b[1;5A' | rawkey`.
//
// Logging goes to stderr through env_logger (`RUST_LOG=rawkey_input=trace`
// shows every decode step).

use std::env;
use std::io::{self, IsTerminal, Read, Write};
use std::process;

use log::{debug, info};

use rawkey_input::{HexBytes, Key, KeyEvent, KeyStream, Modifiers, Recovery, StreamConfig};

/// Bytes requested per `read()`. A keypress is 1-7 bytes, a paste can
/// be much more.
const READ_BUF_SIZE: usize = 4096;

/// Column the hex dump starts at under `--hex`.
const HEX_COLUMN: usize = 16;

const USAGE: &str = "\
usage: rawkey [--hex] [--drop] [--quit CHORD]

  --hex          print the raw bytes of each key
  --drop         drop the whole pending chunk on unrecognized input
                 (default: skip one byte and resynchronize)
  --quit CHORD   key that ends the session, e.g. `ctrl+d` (default: ctrl+c)
  -h, --help     show this help";

// ─── Options ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    hex: bool,
    recovery: Recovery,
    quit: KeyEvent,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hex: false,
            recovery: Recovery::SkipByte,
            quit: KeyEvent::with(Key::Char('c'), Modifiers::CTRL),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
}

/// Parse command-line arguments (without the program name).
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--hex" => options.hex = true,
            "--drop" => options.recovery = Recovery::DropChunk,
            "--quit" => {
                let chord = args
                    .next()
                    .ok_or_else(|| "--quit needs a key chord".to_owned())?;
                options.quit = chord.parse().map_err(|e| format!("--quit {chord}: {e}"))?;
            }
            "-h" | "--help" => return Ok(Command::Help),
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    Ok(Command::Run(options))
}

// ─── Output ─────────────────────────────────────────────────────────────────

/// One output line for a decoded key (without line ending).
fn format_line(event: &KeyEvent, raw: &[u8], hex: bool) -> String {
    let chord = event.to_string();
    if hex {
        format!("{chord:<width$} {}", HexBytes(raw), width = HEX_COLUMN - 1)
    } else {
        chord
    }
}

// ─── Main loop ──────────────────────────────────────────────────────────────

fn run(options: &Options) -> io::Result<()> {
    let mut stdin = io::stdin().lock();
    let stdout = io::stdout();
    // Raw mode also turns off output processing, so `\n` alone won't
    // return the cursor to column 0.
    let newline = if stdout.is_terminal() { "\r\n" } else { "\n" };
    let mut out = stdout.lock();

    let mut stream = KeyStream::new(StreamConfig::new().with_recovery(options.recovery));
    let mut buf = [0u8; READ_BUF_SIZE];
    info!("reading keys from stdin, {} quits", options.quit);

    loop {
        let n = match stdin.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        debug!("read {n} byte(s)");

        let mut quit = false;
        let mut result = Ok(());
        stream.feed_with(&buf[..n], |event, raw| {
            if quit || result.is_err() {
                return;
            }
            if event == options.quit {
                quit = true;
                return;
            }
            result = write!(out, "{}{newline}", format_line(&event, raw, options.hex));
        });
        result?;
        out.flush()?;

        if quit {
            break;
        }
    }

    if stream.has_pending() {
        info!("{} undecoded byte(s) at end of input", stream.pending().len());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("rawkey: {e}\n\n{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("rawkey: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn defaults() {
        assert_eq!(parse_args(args(&[])), Ok(Command::Run(Options::default())));
        assert_eq!(Options::default().quit.to_string(), "ctrl+c");
    }

    #[test]
    fn all_flags() {
        let expected = Options {
            hex: true,
            recovery: Recovery::DropChunk,
            quit: KeyEvent::with(Key::Char('d'), Modifiers::CTRL),
        };
        assert_eq!(
            parse_args(args(&["--hex", "--drop", "--quit", "ctrl+d"])),
            Ok(Command::Run(expected))
        );
    }

    #[test]
    fn help() {
        assert_eq!(parse_args(args(&["--hex", "-h"])), Ok(Command::Help));
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(
            parse_args(args(&["--verbose"])),
            Err("unknown argument `--verbose`".to_owned())
        );
        assert_eq!(
            parse_args(args(&["--quit"])),
            Err("--quit needs a key chord".to_owned())
        );
        assert_eq!(
            parse_args(args(&["--quit", "super+q"])),
            Err(
                "--quit super+q: unknown modifier `super` (expected ctrl, alt, shift or meta)"
                    .to_owned()
            )
        );
    }

    #[test]
    fn plain_line() {
        let event = KeyEvent::with(Key::Up, Modifiers::CTRL);
        assert_eq!(format_line(&event, b"\x1b[1;5A", false), "ctrl+up");
    }

    #[test]
    fn hex_line() {
        let event = KeyEvent::plain(Key::F(6));
        assert_eq!(
            format_line(&event, b"\x1b[17~", true),
            format!("f6{}1b 5b 31 37 7e", " ".repeat(14))
        );
    }

    #[test]
    fn hex_line_with_long_chord() {
        let event = KeyEvent::with(
            Key::PageDown,
            Modifiers::CTRL | Modifiers::ALT | Modifiers::SHIFT,
        );
        assert_eq!(
            format_line(&event, b"\x1b[6;8~", true),
            "ctrl+alt+shift+pagedown 1b 5b 36 3b 38 7e"
        );
    }
}
