//! Timeline renderers: aligned text columns and JSON lines.

use std::io::{self, Write};

use crossterm::style::{Color, Stylize};
use gtl_core::{Event, Tone};

use crate::config::Format;

/// Shown in place of a timestamp that could not be parsed.
const NO_TIMESTAMP: &str = "-------------------";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NODE_COLORS: [Color; 3] = [Color::Blue, Color::Magenta, Color::Cyan];

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: Format,
    pub color: bool,
    pub show_raw: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: Format::Text,
            color: false,
            show_raw: false,
        }
    }
}

/// Write the whole timeline to `out`.
pub fn render<W: Write>(out: &mut W, timeline: &[Event], opts: &RenderOptions) -> io::Result<()> {
    match opts.format {
        Format::Text => timeline.iter().try_for_each(|e| write_text(out, e, opts)),
        Format::Jsonl => timeline.iter().try_for_each(|e| write_jsonl(out, e)),
    }
}

fn write_text<W: Write>(out: &mut W, event: &Event, opts: &RenderOptions) -> io::Result<()> {
    let ts = event
        .timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| NO_TIMESTAMP.to_string());
    let node = event.node_label();

    if opts.color {
        let color = NODE_COLORS[event.node % NODE_COLORS.len()];
        write!(out, "{}  {}  ", ts.with(color), node.with(color))?;
        for span in event.message.spans() {
            match span.tone {
                Tone::Plain => write!(out, "{}", span.text)?,
                Tone::Good => write!(out, "{}", span.text.as_str().green())?,
                Tone::Alert => write!(out, "{}", span.text.as_str().red())?,
            }
        }
        writeln!(out)?;
    } else {
        writeln!(out, "{ts}  {node}  {}", event.message)?;
    }

    if opts.show_raw {
        for line in event.raw_lines() {
            writeln!(out, "    {line}")?;
        }
    }
    Ok(())
}

fn write_jsonl<W: Write>(out: &mut W, event: &Event) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)
}
