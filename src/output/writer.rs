use crate::OutputError;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Serialization format for saved links, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One URL per line (`.txt`, `.text`)
    Text,

    /// Single `url` column with a header row (`.csv`)
    Csv,

    /// JSON array of URL strings (`.json`)
    Json,
}

impl OutputFormat {
    /// Infers the format from a path's extension
    ///
    /// Anything other than `.txt`, `.text`, `.csv`, or `.json` is
    /// rejected, before the crawl starts.
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(OutputError::UnsupportedExtension(ext)),
        }
    }
}

/// Writes discovered links to a file, incrementally or all at once
///
/// `append` is built to be wired into the crawler's link callback: each
/// call dedupes against the file's current contents, so a link lands on
/// disk exactly once no matter how often it is reported. `save_all`
/// rewrites the file with a complete link set.
#[derive(Debug)]
pub struct LinkWriter {
    path: PathBuf,
    format: OutputFormat,
}

impl LinkWriter {
    /// Creates the output file (and parent directories) ready for appends
    ///
    /// Text starts empty, CSV starts with its header row, JSON starts as
    /// an empty array.
    pub fn create(path: PathBuf) -> Result<Self, OutputError> {
        let format = OutputFormat::from_path(&path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        match format {
            OutputFormat::Text => fs::write(&path, "")?,
            OutputFormat::Csv => fs::write(&path, "url\n")?,
            OutputFormat::Json => fs::write(&path, "[]")?,
        }

        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Appends one link, skipping it if the file already holds it
    ///
    /// Returns true when the link was written.
    pub fn append(&self, link: &str) -> Result<bool, OutputError> {
        match self.format {
            OutputFormat::Text => self.append_text(link),
            OutputFormat::Csv => self.append_csv(link),
            OutputFormat::Json => self.append_json(link),
        }
    }

    /// Rewrites the file with the full link set, sorted for stable output
    ///
    /// The JSON format goes through a temp file in the destination
    /// directory and renames over the target, so readers never observe a
    /// half-written array.
    pub fn save_all(&self, links: &HashSet<String>) -> Result<usize, OutputError> {
        let mut sorted: Vec<&String> = links.iter().collect();
        sorted.sort();

        match self.format {
            OutputFormat::Text => {
                let mut file = fs::File::create(&self.path)?;
                for link in &sorted {
                    writeln!(file, "{}", link)?;
                }
            }
            OutputFormat::Csv => {
                let mut file = fs::File::create(&self.path)?;
                writeln!(file, "url")?;
                for link in &sorted {
                    writeln!(file, "{}", csv_field(link))?;
                }
            }
            OutputFormat::Json => {
                self.replace_json(&sorted)?;
            }
        }

        tracing::info!("Saved {} links to {}", sorted.len(), self.path.display());
        Ok(sorted.len())
    }

    fn append_text(&self, link: &str) -> Result<bool, OutputError> {
        let existing = read_lines(&self.path)?;
        if existing.contains(link) {
            return Ok(false);
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", link)?;
        Ok(true)
    }

    fn append_csv(&self, link: &str) -> Result<bool, OutputError> {
        let existing: HashSet<String> = read_lines(&self.path)?
            .into_iter()
            .map(|line| csv_unquote(&line))
            .collect();
        if existing.contains(link) {
            return Ok(false);
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", csv_field(link))?;
        Ok(true)
    }

    fn append_json(&self, link: &str) -> Result<bool, OutputError> {
        let content = fs::read_to_string(&self.path)?;
        let mut links: Vec<String> = serde_json::from_str(&content)?;

        if links.iter().any(|existing| existing == link) {
            return Ok(false);
        }

        links.push(link.to_string());
        let refs: Vec<&String> = links.iter().collect();
        self.replace_json(&refs)?;
        Ok(true)
    }

    fn replace_json(&self, links: &[&String]) -> Result<(), OutputError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, links)?;
        temp.persist(&self.path).map_err(|e| OutputError::Io(e.error))?;
        Ok(())
    }
}

fn read_lines(path: &Path) -> Result<HashSet<String>, OutputError> {
    let file = fs::File::open(path)?;
    let mut lines = HashSet::new();
    for line in BufReader::new(file).lines() {
        lines.insert(line?.trim().to_string());
    }
    Ok(lines)
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_unquote(field: &str) -> String {
    let field = field.trim();
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        field[1..field.len() - 1].replace("\"\"", "\"")
    } else {
        field.to_string()
    }
}

/// Default output path: `output/links_<timestamp>.txt`
pub fn default_output_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from("output").join(format!("links_{}.txt", timestamp))
}
