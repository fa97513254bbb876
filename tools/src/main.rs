use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gamesman_tools::{
    decode_record_bytes, decode_record_json, encode_record_json, format_decode_pretty,
    format_inspect_report, format_schema, inspect_record,
};
use glob::Pattern;
use records::RecordKind;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wire::Limits;

#[derive(Parser)]
#[command(
    name = "gamesman-tools",
    version,
    about = "gamesman record inspection and conversion tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect record structure and sizes without a schema.
    Inspect {
        /// Path to the record bytes, or a directory of record files.
        record_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected files.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected files (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// Print the walk as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Decode a record into structured JSON.
    Decode {
        /// Path to the record bytes.
        record_file: PathBuf,
        /// Record kind the bytes hold.
        #[arg(long, value_enum)]
        record: KindArg,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Encode a JSON document as record bytes.
    Encode {
        /// Path to the JSON document.
        json_file: PathBuf,
        /// Record kind the document describes.
        #[arg(long, value_enum)]
        record: KindArg,
        /// Output path for the encoded bytes.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print a record kind's field table and fingerprint.
    Schema {
        /// Record kind; all kinds when omitted.
        #[arg(long, value_enum)]
        record: Option<KindArg>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Gamestate,
    GetMove,
    GetNextMove,
}

impl From<KindArg> for RecordKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Gamestate => Self::GamestateResponse,
            KindArg::GetMove => Self::GetMoveResponse,
            KindArg::GetNextMove => Self::GetNextMoveResponse,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))
                .context("build log filter")?,
        )
        .try_init()
        .context("install log subscriber")?;

    let cli = Cli::parse();
    let limits = Limits::default();
    match cli.command {
        Command::Inspect {
            record_path,
            glob,
            sort,
            limit,
            json,
        } => {
            if record_path.is_dir() {
                let entries = collect_record_entries(&record_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    inspect_file(&entry.path, &limits, json)?;
                }
            } else {
                inspect_file(&record_path, &limits, json)?;
            }
        }
        Command::Decode {
            record_file,
            record,
            format,
        } => {
            let bytes = fs::read(&record_file)
                .with_context(|| format!("read record {}", record_file.display()))?;
            let kind = RecordKind::from(record);
            match format {
                DecodeFormat::Json => {
                    let output = decode_record_json(kind, &bytes, &limits)?;
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    let output = decode_record_bytes(kind, &bytes, &limits)?;
                    println!("{}", format_decode_pretty(&output));
                }
            }
        }
        Command::Encode {
            json_file,
            record,
            output,
        } => {
            let json = fs::read_to_string(&json_file)
                .with_context(|| format!("read json {}", json_file.display()))?;
            let bytes = encode_record_json(record.into(), &json)?;
            fs::write(&output, &bytes)
                .with_context(|| format!("write record {}", output.display()))?;
            info!(path = %output.display(), bytes = bytes.len(), "wrote record");
        }
        Command::Schema { record } => match record {
            Some(record) => print!("{}", format_schema(record.into())),
            None => {
                for kind in RecordKind::ALL {
                    print!("{}", format_schema(kind));
                }
            }
        },
    }
    Ok(())
}

fn inspect_file(path: &Path, limits: &Limits, json: bool) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read record {}", path.display()))?;
    let report = inspect_record(&bytes, limits)
        .with_context(|| format!("inspect record {}", path.display()))?;
    if json {
        let json = serde_json::to_string_pretty(&report).context("serialize json")?;
        println!("{json}");
    } else {
        print!("{}", format_inspect_report(&report));
    }
    Ok(())
}

struct RecordEntry {
    path: PathBuf,
    size: u64,
}

fn collect_record_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<RecordEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(RecordEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<RecordEntry>,
    sort: Option<InspectSort>,
) -> Vec<RecordEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "gamesman-tools-{name}-{}",
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn write(&self, name: &str, len: usize) {
            fs::write(self.0.join(name), vec![0u8; len]).unwrap();
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn names(entries: &[RecordEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| entry.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn directory_walk_filters_by_glob() {
        let dir = ScratchDir::new("glob");
        dir.write("b.bin", 3);
        dir.write("a.bin", 9);
        dir.write("notes.txt", 40);
        fs::create_dir(dir.0.join("nested.bin")).unwrap();

        let entries = collect_record_entries(&dir.0, Some("*.bin")).unwrap();
        assert_eq!(names(&entries), ["a.bin", "b.bin"]);
        assert_eq!(entries[0].size, 9);

        let entries = collect_record_entries(&dir.0, None).unwrap();
        assert_eq!(names(&entries), ["a.bin", "b.bin", "notes.txt"]);
    }

    #[test]
    fn directory_walk_sorts_largest_first() {
        let dir = ScratchDir::new("sort");
        dir.write("small.bin", 1);
        dir.write("large.bin", 64);
        dir.write("tie-b.bin", 8);
        dir.write("tie-a.bin", 8);

        let entries = collect_record_entries(&dir.0, None).unwrap();
        let unsorted = names(&entries);
        assert_eq!(
            unsorted,
            ["large.bin", "small.bin", "tie-a.bin", "tie-b.bin"]
        );
        assert_eq!(names(&maybe_sort_entries(entries, None)), unsorted);

        let entries = collect_record_entries(&dir.0, None).unwrap();
        let sorted = maybe_sort_entries(entries, Some(InspectSort::Size));
        assert_eq!(
            names(&sorted),
            ["large.bin", "tie-a.bin", "tie-b.bin", "small.bin"]
        );
    }

    #[test]
    fn invalid_glob_is_reported() {
        let dir = ScratchDir::new("bad-glob");
        let err = collect_record_entries(&dir.0, Some("[")).err().unwrap();
        assert!(format!("{err:#}").contains("invalid glob pattern"));
    }

    #[test]
    fn kind_args_map_to_record_kinds() {
        assert_eq!(RecordKind::from(KindArg::Gamestate), RecordKind::GamestateResponse);
        assert_eq!(RecordKind::from(KindArg::GetMove), RecordKind::GetMoveResponse);
        assert_eq!(
            RecordKind::from(KindArg::GetNextMove),
            RecordKind::GetNextMoveResponse
        );
    }
}
