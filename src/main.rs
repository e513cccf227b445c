use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use letter_huffman::config::DEFAULT_SENTINEL;
use letter_huffman::text_format;
use letter_huffman::{CodecConfig, HuffmanCodec, SymbolPolicy, TrailingBits};

const LOG_ENV: &str = "LETTER_HUFFMAN_LOG";

/// Huffman coding over the letters a-z.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// Drop non-letter characters instead of failing on them.
    #[arg(long, global = true)]
    ignore_invalid: bool,

    /// End-of-message marker for persisted messages.
    #[arg(long, global = true, default_value_t = DEFAULT_SENTINEL)]
    sentinel: char,

    /// Log at debug level unless LETTER_HUFFMAN_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a tree from INPUT and encode INPUT with it.
    Encode {
        input: PathBuf,
        /// Where to write the encoded message (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the code table here.
        #[arg(long)]
        table: Option<PathBuf>,
        /// Also write a self-contained binary container here.
        #[arg(long)]
        packed: Option<PathBuf>,
    },
    /// Decode ENCODED with the tree built from SOURCE.
    Decode {
        encoded: PathBuf,
        #[arg(short, long)]
        source: PathBuf,
        /// Fail on a trailing partial code instead of dropping it.
        #[arg(long)]
        strict: bool,
    },
    /// Decode a binary container written by `encode --packed`.
    Unpack { packed: PathBuf },
    /// Print every node of the tree built from INPUT.
    Tree {
        input: PathBuf,
        /// Draw the tree shape instead of the flat node list.
        #[arg(long)]
        shape: bool,
    },
    /// Print the code table of the tree built from INPUT.
    Table { input: PathBuf },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_from(global: &GlobalOpts) -> CodecConfig {
    let symbols = if global.ignore_invalid {
        SymbolPolicy::Ignore
    } else {
        SymbolPolicy::Reject
    };
    CodecConfig::default()
        .with_symbols(symbols)
        .with_sentinel(global.sentinel)
}

fn codec_from_source(path: &Path, config: CodecConfig) -> anyhow::Result<HuffmanCodec> {
    let text = text_format::read_source_text(path, config.sentinel)?;
    HuffmanCodec::from_text(&text, config)
        .with_context(|| format!("building tree from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    let config = config_from(&cli.global);
    config.validate()?;

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Encode { input, output, table, packed } => {
            let text = text_format::read_source_text(&input, config.sentinel)?;
            let (codec, encoded) = HuffmanCodec::build_and_encode(&text, config)
                .with_context(|| format!("encoding {}", input.display()))?;

            match output {
                Some(path) => text_format::write_encoded_message(&path, &encoded, config.sentinel)?,
                None => writeln!(stdout, "{}", encoded.persisted(config.sentinel))?,
            }
            if let Some(path) = table {
                text_format::write_code_table(&path, &codec.dump_code_table())?;
            }
            if let Some(path) = packed {
                text_format::write_packed(&path, &codec.pack(&encoded)?)?;
            }
        }
        Command::Decode { encoded, source, strict } => {
            let trailing = if strict { TrailingBits::Reject } else { TrailingBits::Drop };
            let codec = codec_from_source(&source, config.with_trailing_bits(trailing))?;
            let bits = text_format::read_encoded_message(&encoded, config.sentinel)?;
            let decoded = codec
                .decode(&bits)
                .with_context(|| format!("decoding {}", encoded.display()))?;
            writeln!(stdout, "{}", decoded.text)?;
        }
        Command::Unpack { packed } => {
            let message = text_format::read_packed(&packed)?;
            let (_, decoded) = HuffmanCodec::unpack(&message, config)
                .with_context(|| format!("decoding {}", packed.display()))?;
            writeln!(stdout, "{}", decoded.text)?;
        }
        Command::Tree { input, shape } => {
            let codec = codec_from_source(&input, config)?;
            if shape {
                codec.tree().print_structure();
            } else {
                for node in codec.dump_tree() {
                    writeln!(stdout, "{}", node)?;
                }
            }
        }
        Command::Table { input } => {
            let codec = codec_from_source(&input, config)?;
            write!(stdout, "{}", codec.dump_code_table())?;
        }
    }

    Ok(())
}
