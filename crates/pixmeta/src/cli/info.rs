//! The `pixmeta info` command: metadata reports for files.

use clap::{Args, ValueEnum};
use pixmeta_core::{
    Config, FileDiscovery, ImageReader, OutputFormat as CoreOutputFormat, PixmetaError,
    ReportEntry, ReportWriter,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the `info` command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Image file or directory to read
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to `output.format` from config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Skip content hashing
    #[arg(long)]
    pub no_hash: bool,
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object or array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// Execute the info command.
pub async fn execute(args: InfoArgs, mut config: Config) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!(
            "Input path does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }
    if args.no_hash {
        config.reader.compute_hash = false;
    }

    let format = match args.format {
        Some(format) => format.into(),
        None => CoreOutputFormat::parse(&config.output.format).unwrap_or(CoreOutputFormat::Json),
    };
    let pretty = args.pretty || config.output.pretty;

    // A file named explicitly is read whatever its extension.
    let files = if args.input.is_file() {
        vec![args.input.clone()]
    } else {
        FileDiscovery::new(&config.reader).discover(&args.input)
    };
    if files.is_empty() {
        tracing::warn!("No supported image files found at {:?}", args.input);
        return Ok(());
    }
    tracing::info!("Found {} image(s) to read", files.len());

    let output = args.output.clone();
    let reader = ImageReader::new(config.reader);
    let (written, failed) = tokio::task::spawn_blocking(move || -> anyhow::Result<(usize, usize)> {
        let sink: Box<dyn Write> = match &output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        };
        write_reports(&reader, &files, ReportWriter::new(sink, format, pretty))
    })
    .await??;

    if let Some(path) = &args.output {
        tracing::info!("Output written to {:?}", path);
    }
    tracing::info!("Read {} file(s), {} failed", written - failed, failed);

    if failed > 0 && failed == written {
        anyhow::bail!("No files could be read");
    }
    Ok(())
}

fn write_reports<W: Write>(
    reader: &ImageReader,
    files: &[PathBuf],
    mut writer: ReportWriter<W>,
) -> anyhow::Result<(usize, usize)> {
    for path in files {
        let entry = match reader.read_image(path) {
            Ok(report) => report.into(),
            Err(e) => {
                tracing::error!("Failed: {:?} - {}", path, e);
                ReportEntry::failed(path, &PixmetaError::from(e))
            }
        };
        writer.write(entry)?;
    }
    let failed = writer.failures();
    let written = writer.finish()?;
    Ok((written, failed))
}
