//! redimage - Convert legacy engine images to and from GIF
//!
//! A command-line tool for the fixed-size `.COL`, `.MPH`, `.RAW` and `.TM`
//! raster formats.

use clap::{Args, Parser, Subcommand};
use red_image::{decode_file, encode_file};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "redimage")]
#[command(author = "Jacob Gelling")]
#[command(version)]
#[command(about = "Convert legacy engine images to and from GIF", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Log each conversion step
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an image into a GIF
    #[command(short_flag = 'd', long_flag = "decode")]
    Decode(DecodeArgs),

    /// Encode a GIF into an image
    #[command(short_flag = 'e', long_flag = "encode")]
    Encode(EncodeArgs),
}

#[derive(Args)]
struct DecodeArgs {
    /// Input image (.COL, .MPH, .RAW or .TM)
    image: PathBuf,

    /// Output GIF, or the colour palette when a third path follows (.TM images)
    #[arg(value_name = "PALETTE|GIF")]
    second: PathBuf,

    /// Output GIF when a colour palette is given
    #[arg(value_name = "GIF")]
    third: Option<PathBuf>,
}

#[derive(Args)]
struct EncodeArgs {
    /// Input GIF with a 256 colour palette
    gif: PathBuf,

    /// Output image, or the colour palette when a third path follows (.TM images)
    #[arg(value_name = "PALETTE|IMAGE")]
    second: PathBuf,

    /// Output image when a colour palette is given
    #[arg(value_name = "IMAGE")]
    third: Option<PathBuf>,
}

/// Resolves `<output>` or `<palette> <output>` into its parts.
fn palette_and_output<'a>(
    second: &'a PathBuf,
    third: Option<&'a PathBuf>,
) -> (Option<&'a Path>, &'a Path) {
    match third {
        Some(output) => (Some(second.as_path()), output.as_path()),
        None => (None, second.as_path()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> red_image::Result<()> {
    match cli.command {
        Commands::Decode(args) => {
            let (palette, gif) = palette_and_output(&args.second, args.third.as_ref());
            let format = decode_file(&args.image, palette, gif)?;
            info!(
                "Decoded {} '{}' -> '{}'",
                format,
                args.image.display(),
                gif.display()
            );
        }

        Commands::Encode(args) => {
            let (palette, image) = palette_and_output(&args.second, args.third.as_ref());
            let format = encode_file(&args.gif, palette, image)?;
            info!(
                "Encoded '{}' -> {} '{}'",
                args.gif.display(),
                format,
                image.display()
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_embedded_mode() {
        let cli = Cli::try_parse_from(["redimage", "decode", "TITLE.RAW", "title.gif"]).unwrap();
        let Commands::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        let (palette, gif) = palette_and_output(&args.second, args.third.as_ref());
        assert!(palette.is_none());
        assert_eq!(gif, Path::new("title.gif"));
    }

    #[test]
    fn test_parse_external_mode_short_flag() {
        let cli = Cli::try_parse_from(["redimage", "-e", "map.gif", "MAP.PAL", "MAP.TM"]).unwrap();
        let Commands::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        let (palette, image) = palette_and_output(&args.second, args.third.as_ref());
        assert_eq!(palette, Some(Path::new("MAP.PAL")));
        assert_eq!(image, Path::new("MAP.TM"));
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!(Cli::try_parse_from(["redimage", "decode", "TITLE.RAW"]).is_err());
        assert!(Cli::try_parse_from(["redimage", "--decode", "a", "b", "c", "d"]).is_err());
        assert!(Cli::try_parse_from(["redimage"]).is_err());
    }
}
