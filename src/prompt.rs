use std::io::{self, BufRead, Write};

/// Yes/no confirmation capability.
pub trait Confirm {
    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Line-based y/n prompt over any reader/writer pair.
///
/// Anything other than `y` or `n` (either case) prints an error and asks
/// again, with no retry limit. Closed input is reported as `UnexpectedEof`.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for ConsolePrompt<R, W> {
    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        let mut input = String::new();

        loop {
            input.clear();

            write!(self.output, "{} (y/n): ", prompt)?;
            self.output.flush()?;

            if self.input.read_line(&mut input)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a y/n answer",
                ));
            }

            match input.trim().to_uppercase().as_str() {
                "Y" => return Ok(true),
                "N" => return Ok(false),
                other => {
                    writeln!(
                        self.output,
                        "Invalid response '{}'. Please enter 'y' or 'n'.",
                        other
                    )?;
                }
            }
        }
    }
}
