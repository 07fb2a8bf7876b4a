use std::io::BufRead;

use regex::Regex;

use crate::Result;

/// Line-oriented scanner extracting failed-test identifiers from CI console
/// output.
///
/// Two formats are recognized:
/// - the two-line form, a `[junit] Running <class>` start marker whose
///   verdict is on the *next* line (`[junit] Tests run: N, Failures: N,
///   Errors: N,`); the class is a failure candidate only when either count
///   is nonzero;
/// - the single-line form, `[<worker>] <class> > <method> FAILED`, which
///   needs no look-ahead.
///
/// The scanner is an explicit two-state machine (`Idle`,
/// `AwaitingSummary`); feed it literal lines with [`LogScanner::push_line`].
/// Matching is stateless beyond the one-line look-ahead: the line consumed
/// as a summary candidate is still checked for the single-line form, and a
/// start marker on the final line of a stream is dropped without a verdict.
pub struct LogScanner {
    start: Regex,
    summary: Regex,
    single_line: Regex,
    state: State,
}

enum State {
    Idle,
    AwaitingSummary { name: String },
}

impl LogScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            start: Regex::new(r"\[junit\] Running (.+)$")?,
            summary: Regex::new(r"\[junit\] Tests run: [0-9]+, Failures: ([0-9]+), Errors: ([0-9]+),")?,
            single_line: Regex::new(r"^\[.+\] (.+) > .*FAILED$")?,
            state: State::Idle,
        })
    }

    /// Feeds one line; every identifier the line completes is handed to
    /// `on_candidate`. Lines matching no pattern are ignored.
    pub fn push_line(&mut self, line: &str, on_candidate: &mut dyn FnMut(String)) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => {
                if let Some(caps) = self.start.captures(line) {
                    self.state = State::AwaitingSummary {
                        name: caps[1].to_string(),
                    };
                } else {
                    self.push_single_line(line, on_candidate);
                }
            }
            State::AwaitingSummary { name } => {
                if let Some(caps) = self.summary.captures(line) {
                    if &caps[1] != "0" || &caps[2] != "0" {
                        on_candidate(name);
                    }
                }
                self.push_single_line(line, on_candidate);
            }
        }
    }

    fn push_single_line(&self, line: &str, on_candidate: &mut dyn FnMut(String)) {
        if let Some(caps) = self.single_line.captures(line) {
            on_candidate(caps[1].to_string());
        }
    }
}

/// Drives a scanner over a newline-delimited byte stream. This is the seam
/// for sources that are not files on disk (an HTTP response body, a pipe).
pub fn scan_reader<R: BufRead>(
    scanner: &mut LogScanner,
    reader: R,
    mut on_candidate: impl FnMut(String),
) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        scanner.push_line(&line, &mut on_candidate);
    }
    Ok(())
}
