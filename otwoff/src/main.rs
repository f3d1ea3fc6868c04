//! Convert OpenType fonts to WOFF
//!
//! The `avar` table, when present, is decoded and re-encoded against the
//! font's own `fvar` table on the way through, so a malformed or
//! inconsistent `avar` is reported instead of silently copied.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use font_tables::{
    tables::avar::{self, Avar},
    types::Tag,
    xml, FontBuilder, FontRef, Table, TableCodec, TableProvider,
};

const WOFF_EXTENSION: &str = ".woff";

#[derive(Parser, Debug)]
#[command(version, about = "Convert OpenType fonts to WOFF")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Compress a TTF or OTF font to WOFF
    Compress {
        /// The input font file
        input: PathBuf,
        /// The output file. Defaults to the input with a '.woff' extension;
        /// an existing file is never overwritten unless named explicitly.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the font's tables in their text form
    Dump {
        /// The input font file
        input: PathBuf,
    },
}

/// Errors reported to the user.
#[derive(Debug)]
enum CliError {
    Io {
        path: PathBuf,
        inner: std::io::Error,
    },
    Font {
        path: PathBuf,
        inner: font_tables::ReadError,
    },
    Table {
        tag: Tag,
        inner: font_tables::Error,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io { path, inner } => write!(f, "{}: {inner}", path.display()),
            CliError::Font { path, inner } => {
                write!(f, "{} is not a valid font: {inner}", path.display())
            }
            CliError::Table { tag, inner } => write!(f, "failed to convert '{tag}': {inner}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io { inner, .. } => Some(inner),
            CliError::Font { inner, .. } => Some(inner),
            CliError::Table { inner, .. } => Some(inner),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let result = match args.command {
        Some(Command::Compress { input, output }) => {
            compress(&input, output.as_deref()).map(|path| {
                log::info!("wrote {}", path.display());
            })
        }
        Some(Command::Dump { input }) => dump(&input).map(|text| println!("{text}")),
        None => {
            let mut cmd = Args::command();
            // nothing useful to do if stdout is closed
            let _ = cmd.print_help();
            return;
        }
    };
    if let Err(e) = result {
        let kind = match e {
            CliError::Io { .. } => clap::error::ErrorKind::Io,
            _ => clap::error::ErrorKind::InvalidValue,
        };
        Args::command().error(kind, e).exit();
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|inner| CliError::Io {
        path: path.to_owned(),
        inner,
    })
}

fn parse_font<'a>(path: &Path, data: &'a [u8]) -> Result<FontRef<'a>, CliError> {
    FontRef::new(data).map_err(|inner| CliError::Font {
        path: path.to_owned(),
        inner,
    })
}

/// Write `input` as WOFF, returning the path that was written.
fn compress(input: &Path, output: Option<&Path>) -> Result<PathBuf, CliError> {
    let data = read_file(input)?;
    let font = parse_font(input, &data)?;

    let mut builder = FontBuilder::new();
    if let Some(avar) = reencode_avar(&font)? {
        builder.add_raw(avar::TAG, avar);
    }
    let woff = builder.copy_missing_tables(&font).build_woff();

    let output = output
        .map(Path::to_owned)
        .unwrap_or_else(|| make_output_path(input, WOFF_EXTENSION));
    std::fs::write(&output, woff).map_err(|inner| CliError::Io {
        path: output.clone(),
        inner,
    })?;
    Ok(output)
}

/// Decode and re-encode the avar table, if the font has one.
fn reencode_avar(font: &FontRef) -> Result<Option<Vec<u8>>, CliError> {
    let Some(data) = font.data_for_tag(avar::TAG) else {
        return Ok(None);
    };
    let table_error = |inner| CliError::Table {
        tag: avar::TAG,
        inner,
    };
    let avar = <Avar as TableCodec>::decompile(data.as_bytes(), font).map_err(table_error)?;
    log::debug!("avar has segment maps for {} axes", avar.len());
    TableCodec::compile(&avar, font)
        .map(Some)
        .map_err(table_error)
}

/// The text form of every table in the font.
fn dump(input: &Path) -> Result<String, CliError> {
    let data = read_file(input)?;
    let font = parse_font(input, &data)?;

    let mut writer = xml::XmlWriter::new(xml::Options::default());
    writer.start_element("font");
    writer.write_attribute_fmt("sfntVersion", format_args!("0x{:08X}", font.sfnt_version()));
    for record in font.table_records() {
        let Some(data) = font.table_data(record.tag) else {
            log::warn!("data for '{}' is malformed", record.tag);
            continue;
        };
        let table_error = |inner| CliError::Table {
            tag: record.tag,
            inner,
        };
        Table::decompile(record.tag, data.as_bytes(), &font)
            .and_then(|table| table.to_xml(&mut writer, &font))
            .map_err(table_error)?;
    }
    Ok(writer.end_document())
}

/// `input` with its extension replaced, in the same directory.
///
/// If that file already exists, a `#1`, `#2`... suffix is added to the stem
/// until the name is free.
fn make_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let mut output = dir.join(format!("{stem}{extension}"));
    let mut n = 1;
    while output.exists() {
        output = dir.join(format!("{stem}#{n}{extension}"));
        n += 1;
    }
    output
}

#[cfg(test)]
mod tests {
    use font_tables::{tables::fvar, woff, FontData};

    use super::*;

    fn write_variable_font(dir: &Path, avar_data: &[u8]) -> PathBuf {
        let mut builder = FontBuilder::new();
        builder
            .add_raw(fvar::TAG, font_test_data::fvar::WDTH_WGHT)
            .add_raw(avar::TAG, avar_data);
        let path = dir.join("Test-VF.ttf");
        std::fs::write(&path, builder.build()).unwrap();
        path
    }

    #[test]
    fn cli_parses() {
        Args::command().debug_assert();
        let args = Args::try_parse_from(["otwoff", "compress", "in.ttf", "-o", "out.woff"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::Compress { output: Some(_), .. })
        ));
        let args = Args::try_parse_from(["otwoff"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn output_path_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Font.ttf");
        assert_eq!(
            make_output_path(&input, WOFF_EXTENSION),
            dir.path().join("Font.woff")
        );
        std::fs::write(dir.path().join("Font.woff"), b"").unwrap();
        assert_eq!(
            make_output_path(&input, WOFF_EXTENSION),
            dir.path().join("Font#1.woff")
        );
        std::fs::write(dir.path().join("Font#1.woff"), b"").unwrap();
        assert_eq!(
            make_output_path(&input, WOFF_EXTENSION),
            dir.path().join("Font#2.woff")
        );
    }

    #[test]
    fn compress_writes_woff() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_variable_font(dir.path(), font_test_data::avar::WDTH_WGHT);
        let output = compress(&input, None).unwrap();
        assert_eq!(output, dir.path().join("Test-VF.woff"));

        let woff = std::fs::read(&output).unwrap();
        let data = FontData::new(&woff);
        assert_eq!(data.read_at::<u32>(0), Ok(woff::WOFF_SIGNATURE));
        assert_eq!(data.read_at::<u16>(12), Ok(2));
        // the re-encoded avar is byte-identical
        let needle = font_test_data::avar::WDTH_WGHT;
        assert!(woff.windows(needle.len()).any(|window| window == needle));
    }

    #[test]
    fn compress_to_explicit_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_variable_font(dir.path(), font_test_data::avar::WDTH_WGHT);
        let explicit = dir.path().join("out.woff");
        std::fs::write(&explicit, b"old").unwrap();
        assert_eq!(compress(&input, Some(&explicit)).unwrap(), explicit);
        assert_ne!(std::fs::read(&explicit).unwrap(), b"old");
    }

    #[test]
    fn compress_reports_bad_avar() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_variable_font(dir.path(), font_test_data::avar::UNSUPPORTED_VERSION);
        let err = compress(&input, None).unwrap_err();
        assert!(matches!(
            err,
            CliError::Table {
                inner: font_tables::Error::UnsupportedVersion { .. },
                ..
            }
        ));
        assert!(!dir.path().join("Test-VF.woff").exists());
    }

    #[test]
    fn compress_reports_missing_and_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ttf");
        assert!(matches!(
            compress(&missing, None),
            Err(CliError::Io { .. })
        ));
        let garbage = dir.path().join("garbage.ttf");
        std::fs::write(&garbage, b"not a font").unwrap();
        let err = compress(&garbage, None).unwrap_err();
        assert!(matches!(err, CliError::Font { .. }));
        assert!(err.to_string().contains("garbage.ttf"));
    }

    #[test]
    fn dump_tables() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_variable_font(dir.path(), font_test_data::avar::WDTH_WGHT);
        let text = dump(&input).unwrap();
        assert!(text.starts_with(r#"<font sfntVersion="0x00010000">"#));
        assert!(text.contains(r#"<segment axis="wdth">"#));
        assert!(text.contains(r#"<mapping from="0.3" to="0.8"/>"#));
        assert!(text.contains(r#"<table tag="fvar">"#));
    }
}
