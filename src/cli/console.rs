use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

type LineSource = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;

/// Line-oriented terminal surface.
///
/// One instance owns stdin for the whole process so the request loop and the
/// approval prompt never race for input.
pub struct Console {
    lines: Mutex<LineSource>,
}

impl Console {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let boxed: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self {
            lines: Mutex::new(boxed.lines()),
        }
    }

    /// Print `label` and read one line. `None` on end of input.
    pub async fn prompt(&self, label: &str) -> anyhow::Result<Option<String>> {
        if !label.is_empty() {
            let mut out = std::io::stdout();
            write!(out, "{label}")?;
            out.flush()?;
        }
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }

    /// Next non-empty request, or `None` once input ends or an exit keyword is typed.
    pub async fn next_request(
        &self,
        label: &str,
        exit_keywords: &[String],
    ) -> anyhow::Result<Option<String>> {
        loop {
            let Some(line) = self.prompt(label).await? else {
                return Ok(None);
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if is_exit(line, exit_keywords) {
                return Ok(None);
            }
            return Ok(Some(line.to_string()));
        }
    }
}

fn is_exit(line: &str, exit_keywords: &[String]) -> bool {
    exit_keywords
        .iter()
        .any(|keyword| line.eq_ignore_ascii_case(keyword.trim()))
}
