use crate::parsing::normalize::{count_timestamps, normalize};

/// Lines with at least this many timestamps open a new record block.
const START_LINE_TIMESTAMPS: usize = 3;

/// Accumulates the lines of one page into candidate record blocks.
///
/// A block starts at a line carrying three or more timestamps and runs
/// until the next such line or the end of the page. Lines seen before the
/// first start line (page headers, column titles) are dropped.
#[derive(Debug, Default)]
pub struct BlockSegmenter {
    current: String,
    blocks: Vec<String>,
}

impl BlockSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line from the page.
    pub fn push_line(&mut self, line: &str) {
        let line = normalize(line);
        if line.is_empty() {
            return;
        }

        if count_timestamps(&line) >= START_LINE_TIMESTAMPS {
            self.flush();
            self.current = line;
        } else if !self.current.is_empty() {
            self.current.push(' ');
            self.current.push_str(&line);
        }
    }

    /// Close the page and return its blocks in discovery order.
    pub fn finish(mut self) -> Vec<String> {
        self.flush();
        self.blocks
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.blocks.push(std::mem::take(&mut self.current));
        }
    }
}

/// Split the lines of one page into blocks.
pub fn segment_page<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut segmenter = BlockSegmenter::new();
    for line in lines {
        segmenter.push_line(line.as_ref());
    }
    segmenter.finish()
}
