//! DataChannel CLI
//!
//! Inspect and edit a file through a data channel.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use datachannel::prelude::*;
use datachannel::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// DataChannel CLI
#[derive(Parser, Debug)]
#[command(name = "datachannel-cli")]
#[command(about = "Random-access inspection and editing of files")]
#[command(version)]
struct Args {
    /// File to open
    file: PathBuf,

    /// Byte order for multi-byte values
    #[arg(short, long, value_enum, default_value = "native")]
    order: OrderArg,

    /// Load buffer size in bytes
    #[arg(short, long, default_value = "8192")]
    buffer_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OrderArg {
    Big,
    Little,
    Native,
}

impl From<OrderArg> for ByteOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Big => ByteOrder::BigEndian,
            OrderArg::Little => ByteOrder::LittleEndian,
            OrderArg::Native => ByteOrder::Native,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every line
    Lines {
        /// Print the last line first
        #[arg(short, long)]
        reverse: bool,
    },

    /// Print the last N lines
    Tail {
        /// Number of lines
        count: usize,
    },

    /// Print the byte at an index
    At {
        index: u64,
    },

    /// Print the bytes in [start, end) as text
    Range {
        start: u64,
        end: u64,
    },

    /// Insert text at an index
    Insert {
        index: u64,
        text: String,
    },

    /// Overwrite one byte
    Replace {
        index: u64,
        byte: u8,
    },

    /// Remove the bytes in [start, end)
    DropRange {
        start: u64,
        end: u64,
    },

    /// Print the CRC32 of the content
    Checksum,

    /// Print the size in bytes
    Size,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,datachannel=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = ChannelConfig::builder()
        .byte_order(args.order.into())
        .buffer_size(args.buffer_size)
        .create(matches!(args.command, Commands::Insert { .. }))
        .build()?;

    let mut channel = DataChannel::open(&args.file, config)?;
    tracing::info!(file = %args.file.display(), size = channel.size(), "Opened");

    let outcome = execute(&mut channel, args.command);
    // Close on every path; the command error wins
    let closed = channel.close();
    outcome?;
    closed
}

fn execute(channel: &mut DataChannel<FileSource>, command: Commands) -> Result<()> {
    match command {
        Commands::Lines { reverse } => {
            for line in channel.peek_all_lines(reverse)? {
                println!("{}", line);
            }
        }
        Commands::Tail { count } => {
            let mut lines = Vec::with_capacity(count);
            while lines.len() < count {
                match channel.peek_last_line_or_none()? {
                    Some(line) => lines.push(line),
                    None => break,
                }
            }
            for line in lines.iter().rev() {
                println!("{}", line);
            }
        }
        Commands::At { index } => {
            let byte = channel.peek_at(index)?;
            println!("{} (0x{:02x})", byte, byte);
        }
        Commands::Range { start, end } => {
            println!("{}", channel.peek_range_string(start, end, Charset::Utf8)?);
        }
        Commands::Insert { index, text } => {
            channel.push_str_to(index, &text, Charset::Utf8)?;
            tracing::info!(index, bytes = text.len(), "Inserted");
        }
        Commands::Replace { index, byte } => {
            channel.replace(index, byte)?;
        }
        Commands::DropRange { start, end } => {
            channel.drop_range(start, end)?;
            tracing::info!(start, end, size = channel.size(), "Dropped range");
        }
        Commands::Checksum => {
            println!("{:08x}", channel.checksum()?);
        }
        Commands::Size => {
            println!("{}", channel.size());
        }
    }
    Ok(())
}
