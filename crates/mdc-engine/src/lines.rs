//! Line table over the normalized source.

/// Tab stops used when measuring indentation.
const TAB_WIDTH: usize = 4;

/// Offsets describing a single source line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineInfo {
    /// Byte offset of the first character of the line.
    pub begin: usize,
    /// Byte offset just past the last character (the `\n` is excluded).
    pub end: usize,
    /// Bytes of leading whitespace (spaces and tabs).
    pub t_shift: usize,
    /// Leading whitespace measured in columns.
    pub s_count: usize,
}

impl LineInfo {
    /// Offset of the first non-blank character.
    #[must_use]
    pub fn content_start(&self) -> usize {
        self.begin + self.t_shift
    }
}

/// Per-line offsets plus a trailing sentinel entry.
#[derive(Clone, Debug, Default)]
pub struct LineTable {
    lines: Vec<LineInfo>,
}

impl LineTable {
    /// Scan `src` into a line table.
    ///
    /// A trailing `\n` doesn't produce an extra empty line.
    #[must_use]
    pub fn new(src: &str) -> Self {
        let bytes = src.as_bytes();
        let mut lines = Vec::new();
        let mut begin = 0;

        while begin < bytes.len() {
            let end = bytes[begin..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |i| begin + i);

            let (t_shift, s_count) = measure_indent(&bytes[begin..end]);
            lines.push(LineInfo {
                begin,
                end,
                t_shift,
                s_count,
            });
            begin = end + 1;
        }

        lines.push(LineInfo {
            begin: bytes.len(),
            end: bytes.len(),
            t_shift: 0,
            s_count: 0,
        });

        Self { lines }
    }

    /// Number of real lines (the sentinel is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offsets of `line`. Indexes past the end yield the sentinel.
    #[must_use]
    pub fn get(&self, line: usize) -> LineInfo {
        self.lines
            .get(line)
            .copied()
            .unwrap_or_else(|| self.lines[self.lines.len() - 1])
    }
}

/// Measure leading whitespace: `(bytes, columns)`.
fn measure_indent(line: &[u8]) -> (usize, usize) {
    let mut columns = 0;
    let mut bytes = 0;
    for &b in line {
        match b {
            b' ' => columns += 1,
            b'\t' => columns += TAB_WIDTH - columns % TAB_WIDTH,
            _ => break,
        }
        bytes += 1;
    }
    (bytes, columns)
}

/// Normalize line endings and NUL characters the way the tokenizer expects.
#[must_use]
pub fn normalize(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\0' => out.push('\u{FFFD}'),
            _ => out.push(c),
        }
    }
    out
}

/// Copy lines `[begin, end)` stripping up to `indent` columns from each.
///
/// Tabs that straddle the strip boundary are expanded into the spaces that
/// remain past it. Lines are joined with `\n`; the last line only gets one
/// when `keep_last_lf` is set.
#[must_use]
pub fn get_lines(
    src: &str,
    table: &LineTable,
    begin: usize,
    end: usize,
    indent: usize,
    keep_last_lf: bool,
) -> String {
    let mut out = String::new();

    for line in begin..end {
        let info = table.get(line);
        let bytes = src.as_bytes();
        let mut column = 0;
        let mut first = info.begin;
        let mut padding = 0;

        while first < info.end && column < indent {
            match bytes[first] {
                b' ' => column += 1,
                b'\t' => {
                    let width = TAB_WIDTH - column % TAB_WIDTH;
                    if column + width > indent {
                        padding = column + width - indent;
                    }
                    column += width;
                }
                _ => break,
            }
            first += 1;
        }

        for _ in 0..padding {
            out.push(' ');
        }
        out.push_str(&src[first..info.end]);
        if line + 1 < end || keep_last_lf {
            out.push('\n');
        }
    }

    out
}
