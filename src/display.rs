//! Terminal rendering of a styled buffer

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::buffer::StyledBuffer;
use crate::syntax::Span;

/// What to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit 24-bit color escapes
    pub color: bool,
    /// Prefix each line with its 1-based number
    pub line_numbers: bool,
    /// Inclusive 0-based line range; None prints everything
    pub lines: Option<(usize, usize)>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            line_numbers: false,
            lines: None,
        }
    }
}

/// Write the buffer's text with its colors
pub fn render<W: Write>(buffer: &StyledBuffer, out: &mut W, options: &RenderOptions) -> io::Result<()> {
    let text = buffer.as_str();
    if text.is_empty() {
        return Ok(());
    }
    let spans: Vec<&Span> = buffer.spans().collect();

    // A trailing newline does not start a printable line
    let mut line_total = buffer.line_count();
    if text.ends_with('\n') {
        line_total -= 1;
    }
    let (first, last) = match options.lines {
        Some((a, b)) => (a.min(line_total - 1), b.min(line_total - 1)),
        None => (0, line_total - 1),
    };
    let width = (last + 1).to_string().len();

    let mut next_span = 0;
    let mut line_start = 0;
    for (line_no, line) in text.split('\n').enumerate().take(last + 1) {
        let start = line_start;
        let end = start + line.len();
        line_start = end + 1;
        if line_no < first {
            continue;
        }

        if options.line_numbers {
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(format!("{:>width$} ", line_no + 1)),
                SetAttribute(Attribute::Reset)
            )?;
        }

        if !options.color {
            queue!(out, Print(line), Print("\n"))?;
            continue;
        }

        while next_span < spans.len() && spans[next_span].end <= start {
            next_span += 1;
        }
        let mut pos = start;
        for span in spans[next_span..].iter().take_while(|s| s.start < end) {
            let seg_start = span.start.max(start);
            let seg_end = span.end.min(end);
            if seg_start > pos {
                queue!(out, Print(slice(text, pos, seg_start)))?;
            }
            queue!(
                out,
                SetForegroundColor(span.color.to_terminal()),
                Print(slice(text, seg_start, seg_end)),
                ResetColor
            )?;
            pos = seg_end;
        }
        queue!(out, Print(slice(text, pos, end)), Print("\n"))?;
    }

    out.flush()
}

fn slice(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or("")
}
