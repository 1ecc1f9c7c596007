//! Streaming CMake output with a progress indicator.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

/// Lines kept from the end of the output to explain a failure.
const TAIL_LINES: usize = 20;

/// How a CMake child process ended.
#[derive(Debug)]
pub struct StepOutput {
    pub status: ExitStatus,
    /// Last lines that looked like diagnostics, oldest first.
    pub diagnostics: VecDeque<String>,
}

impl StepOutput {
    /// Failure message built from the captured diagnostics.
    pub fn failure_message(&self) -> String {
        if self.diagnostics.is_empty() {
            "no diagnostics captured".to_string()
        } else {
            self.diagnostics
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Run `cmd`, echoing its output through a spinner (or progress bar when
/// `track_progress` is set) until it exits.
pub fn run_streaming(
    mut cmd: Command,
    message: &'static str,
    track_progress: bool,
) -> io::Result<StepOutput> {
    let pb = if track_progress {
        let pb = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            pb.set_style(style);
        }
        pb
    };
    pb.set_message(message);

    let mut child = cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn()?;

    let (tx, rx) = mpsc::channel();
    if let Some(stdout) = child.stdout.take() {
        forward_lines(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(stderr, tx);
    }

    let mut diagnostics = VecDeque::with_capacity(TAIL_LINES);
    let mut last_progress = 0;
    let mut total = 100;

    // The channel closes once both readers hit EOF.
    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(line) => {
                if track_progress
                    && let Some(progress) = parse_build_progress(&line, &mut total)
                    && progress > last_progress
                {
                    pb.set_length(total as u64);
                    pb.set_position(progress as u64);
                    last_progress = progress;
                }
                handle_line(&pb, &line, &mut diagnostics);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => pb.tick(),
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    let status = child.wait()?;
    pb.finish_and_clear();

    Ok(StepOutput {
        status,
        diagnostics,
    })
}

fn forward_lines<R: Read + Send + 'static>(source: R, tx: mpsc::Sender<String>) {
    thread::spawn(move || {
        let reader = BufReader::new(source);
        for line in reader.lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}

fn handle_line(pb: &ProgressBar, line: &str, diagnostics: &mut VecDeque<String>) {
    if line.trim().is_empty() {
        return;
    }
    debug!(target: "erlpkg::cmake", "{line}");

    if is_diagnostic(line) {
        pb.println(line);
        if diagnostics.len() == TAIL_LINES {
            diagnostics.pop_front();
        }
        diagnostics.push_back(line.to_string());
    } else if line.contains("Building") || line.contains("Linking") || line.starts_with("-- ") {
        pb.println(line);
    }

    if line.to_ascii_lowercase().contains("warning:") {
        warn!(target: "erlpkg::cmake", "{line}");
    }
}

fn is_diagnostic(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.contains("error")
        || lower.contains("fatal")
        || lower.contains("undefined reference")
        || lower.contains("cannot find")
}

/// Parse build progress from CMake output.
///
/// Recognizes Makefile style `[ 50%]` and Ninja style `[150/200]` prefixes.
/// Updates `total` with the denominator when one is present.
pub fn parse_build_progress(line: &str, total: &mut usize) -> Option<usize> {
    let start = line.find('[')?;
    let end = line[start..].find(']')?;
    let bracket_content = &line[start + 1..start + end];

    if let Some(pct_pos) = bracket_content.find('%')
        && let Ok(percent) = bracket_content[..pct_pos].trim().parse::<usize>()
    {
        *total = 100;
        return Some(percent);
    }

    if let Some(slash_pos) = bracket_content.find('/') {
        let current = bracket_content[..slash_pos].trim().parse::<usize>().ok()?;
        let denominator = bracket_content[slash_pos + 1..]
            .trim()
            .parse::<usize>()
            .ok()?;
        *total = denominator;
        return Some(current);
    }

    None
}
