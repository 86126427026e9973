//! Marker block text rules
//!
//! A block is exactly:
//!
//! ```text
//! <prefix> >>> ezproxy >>>
//! <body>
//! <prefix> <<< ezproxy <<<
//! ```
//!
//! At most one block exists per (file, prefix). Delimiters are matched as
//! whole lines so blocks with different prefixes can share a file.

/// Sentinel opening a block
pub const START_SENTINEL: &str = ">>> ezproxy >>>";
/// Sentinel closing a block
pub const END_SENTINEL: &str = "<<< ezproxy <<<";

/// Comment prefix used to render the delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    prefix: &'static str,
}

/// Byte offsets of a located block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockSpan {
    /// First byte of the start delimiter line
    start: usize,
    /// First byte after the start delimiter line
    body_start: usize,
    /// First byte of the end delimiter line
    body_end: usize,
    /// First byte after the end delimiter line (including its newline)
    end: usize,
}

impl MarkerStyle {
    /// `#` comments: shell, INI, TOML, YAML, properties
    pub const HASH: MarkerStyle = MarkerStyle::new("#");

    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn start_marker(&self) -> String {
        format!("{} {}", self.prefix, START_SENTINEL)
    }

    pub fn end_marker(&self) -> String {
        format!("{} {}", self.prefix, END_SENTINEL)
    }

    /// Full block text for `body` (a trailing newline is added if missing)
    pub fn render(&self, body: &str) -> String {
        let mut block = self.start_marker();
        block.push('\n');
        block.push_str(body);
        if !body.is_empty() && !body.ends_with('\n') {
            block.push('\n');
        }
        block.push_str(&self.end_marker());
        block.push('\n');
        block
    }

    /// True iff a start delimiter line is present
    pub fn contains_block(&self, content: &str) -> bool {
        let start = self.start_marker();
        lines_with_offsets(content).any(|(_, line)| is_marker_line(line, &start))
    }

    /// Text strictly between the delimiters
    pub fn body<'c>(&self, content: &'c str) -> Option<&'c str> {
        self.locate(content)
            .map(|span| &content[span.body_start..span.body_end])
    }

    /// Insert or replace the block, returning the new file content
    pub fn upsert(&self, existing: &str, body: &str) -> String {
        let block = self.render(body);

        match self.locate(existing) {
            Some(span) => {
                let mut out = String::with_capacity(existing.len() + block.len());
                out.push_str(&existing[..span.start]);
                out.push_str(&block);
                out.push_str(&existing[span.end..]);
                collapse_trailing_newlines(out)
            }
            None => {
                let mut out = existing.to_string();
                if !out.is_empty() {
                    if !out.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push('\n');
                }
                out.push_str(&block);
                out
            }
        }
    }

    /// Delete the block, returning the new file content, or `None` when
    /// there is no block to remove
    pub fn remove(&self, existing: &str) -> Option<String> {
        let span = self.locate(existing)?;
        let before = existing[..span.start].trim_end_matches('\n');
        let after = existing[span.end..].trim_start_matches('\n');

        let mut out = match (before.is_empty(), after.is_empty()) {
            (false, false) => format!("{before}\n{after}"),
            (false, true) => before.to_string(),
            (true, false) => after.to_string(),
            (true, true) => String::new(),
        };
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        Some(out)
    }

    fn locate(&self, content: &str) -> Option<BlockSpan> {
        let start_marker = self.start_marker();
        let end_marker = self.end_marker();

        let mut lines = lines_with_offsets(content);
        let (start, start_line) = lines
            .by_ref()
            .find(|(_, line)| is_marker_line(line, &start_marker))?;
        let body_start = start + start_line.len();

        let (body_end, end_line) = lines.find(|(_, line)| is_marker_line(line, &end_marker))?;
        Some(BlockSpan {
            start,
            body_start,
            body_end,
            end: body_end + end_line.len(),
        })
    }
}

/// Lines (with their terminators) paired with byte offsets
fn lines_with_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split_inclusive('\n').scan(0usize, |offset, line| {
        let at = *offset;
        *offset += line.len();
        Some((at, line))
    })
}

fn is_marker_line(line: &str, marker: &str) -> bool {
    line.trim_end() == marker
}

fn collapse_trailing_newlines(mut content: String) -> String {
    if content.ends_with("\n\n\n") {
        let trimmed = content.trim_end_matches('\n').len();
        content.truncate(trimmed);
        content.push('\n');
    }
    content
}
