//! Replay command - format JSON-lines log events
//!
//! Each stdin line is one serialized `LogEvent`. Events go through the
//! record adapter into a packet session; the configured formatter writes
//! the packets to stdout or appends them to a file.
//!
//! # Usage
//!
//! ```bash
//! echo '{"severity":"warning","message":"disk at {0}%","params":["91"],"logger":"fs"}' \
//!     | sift replay
//! app | sift replay --config sift.toml --output app.log --header
//! ```

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sift_bridge::{FormatterSink, Handler, LogEvent, PacketSession, formatter_from_config};
use sift_config::Config;

/// Replay command arguments
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to configuration file; defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append output to this file instead of writing to stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Send a log header (host and application name) first
    #[arg(long)]
    pub header: bool,
}

type ReplayHandler<W> = Handler<PacketSession<FormatterSink<W>>>;

/// Counters reported when the replay ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events handed to the adapter
    pub events: u64,
    /// Lines that were not valid events
    pub rejected: u64,
}

/// Run the replay command
pub fn run(args: ReplayArgs, config: &Config) -> Result<()> {
    let formatter = formatter_from_config(&config.format);
    let stdin = io::stdin().lock();

    match &args.output {
        Some(path) => {
            let sink = FormatterSink::append_to(path, formatter)
                .with_context(|| format!("failed to open output {}", path.display()))?;
            replay_into(stdin, sink, config, args.header)
        }
        None => {
            let sink = FormatterSink::new(formatter, BufWriter::new(io::stdout()));
            replay_into(stdin, sink, config, args.header)
        }
    }
}

fn replay_into<R: BufRead, W: Write>(
    input: R,
    sink: FormatterSink<W>,
    config: &Config,
    header: bool,
) -> Result<()> {
    let handler = build_handler(sink, config, header)?;
    let summary = replay(input, &handler)?;
    finish(&handler, summary)
}

/// Session and handler for `sink`, optionally announcing the log header
fn build_handler<W: Write>(
    sink: FormatterSink<W>,
    config: &Config,
    header: bool,
) -> Result<ReplayHandler<W>> {
    let session = PacketSession::from_config(&config.session, sink);
    if header {
        session
            .send_log_header()
            .context("failed to send log header")?;
    }
    Ok(Handler::new(session))
}

/// Publish every event in `input`; malformed lines are skipped
fn replay<R: BufRead, W: Write>(input: R, handler: &ReplayHandler<W>) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    // split on raw bytes so a badly encoded line is rejected, not fatal
    for (index, line) in input.split(b'\n').enumerate() {
        let line = line.context("failed to read input")?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line[..]);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match serde_json::from_slice::<LogEvent>(line) {
            Ok(event) => {
                handler.publish(&event);
                summary.events += 1;
            }
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "skipping malformed event");
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}

/// Close the output and report the counters
fn finish<W: Write>(handler: &ReplayHandler<W>, summary: ReplaySummary) -> Result<()> {
    let sink = handler.session().sink();
    sink.close().context("failed to close output")?;

    let stats = sink.stats();
    tracing::info!(
        events = summary.events,
        rejected = summary.rejected,
        packets = stats.packets,
        bytes = stats.bytes,
        skipped = stats.skipped,
        failures = handler.error_hook().total_count(),
        "replay finished"
    );
    Ok(())
}
