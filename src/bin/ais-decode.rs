//! Decodes AIS/NMEA sentences from a file, stdin, a socket, or a list of
//! command-line arguments into structured messages.
use aistrack::decoders::{decode, decode_from_tcp, decode_from_udp};
use aistrack::errors::Error;
use aistrack::sentence::{AisFragments, AisParser};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "ais-decode", about = "Decode AIS/NMEA sentences into structured messages")]
struct Cli {
    /// Read NMEA sentences from FILE instead of stdin
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Write decoded messages to OUT instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Exit non-zero if any sentence fails its checksum
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    source: Option<Source>,
}

#[derive(Subcommand)]
enum Source {
    /// Decode sentences arriving on a live UDP or TCP socket
    Socket {
        host: String,
        port: u16,
        #[arg(long = "type", value_enum, default_value_t = SocketKind::Udp)]
        r#type: SocketKind,
    },
    /// Decode one or more self-contained NMEA sentences given directly
    Single { messages: Vec<String> },
}

#[derive(ValueEnum, Clone, Copy)]
enum SocketKind {
    Udp,
    Tcp,
}

fn open_output(path: &Option<PathBuf>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(File::create(path)?)),
        None => Ok(Box::new(io::stdout())),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let mut out = match open_output(&cli.output) {
        Ok(out) => out,
        Err(err) => {
            eprintln!("failed to open output: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match cli.source {
        Some(Source::Single { messages }) => {
            let mut failed = false;
            for message in &messages {
                match decode(message.as_bytes(), cli.strict) {
                    Ok(decoded) => {
                        let _ = writeln!(out, "{:?}", decoded);
                    }
                    Err(err) => {
                        eprintln!("failed to decode {:?}: {}", message, err);
                        failed = true;
                    }
                }
            }
            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Some(Source::Socket { host, port, r#type }) => {
            let address = format!("{}:{}", host, port);
            let (tx, mut rx) = mpsc::channel(32);
            let feed = tokio::spawn(async move {
                match r#type {
                    SocketKind::Udp => decode_from_udp(&address, tx).await,
                    SocketKind::Tcp => decode_from_tcp(&address, tx).await,
                }
            });
            while let Some(message) = rx.recv().await {
                let _ = writeln!(out, "{:?}", message);
            }
            match feed.await {
                Ok(Ok(())) => ExitCode::SUCCESS,
                Ok(Err(err)) => {
                    eprintln!("socket feed ended: {}", err);
                    ExitCode::FAILURE
                }
                Err(err) => {
                    eprintln!("socket feed task panicked: {}", err);
                    ExitCode::FAILURE
                }
            }
        }
        None => decode_lines(&cli.file, &mut out, cli.strict),
    }
}

fn decode_lines(file: &Option<PathBuf>, out: &mut dyn Write, strict: bool) -> ExitCode {
    let stdin;
    let opened_file;
    let reader: Box<dyn BufRead> = match file {
        Some(path) => match File::open(path) {
            Ok(file) => {
                opened_file = file;
                Box::new(io::BufReader::new(&opened_file))
            }
            Err(err) => {
                eprintln!("failed to open {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => {
            stdin = io::stdin();
            Box::new(stdin.lock())
        }
    };

    let mut parser = AisParser::new();
    let mut checksum_failure = false;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("failed to read line: {}", err);
                break;
            }
        };
        if line.is_empty() {
            continue;
        }
        match parser.parse(line.as_bytes(), true, strict) {
            Ok(AisFragments::Complete(sentence)) => {
                if !sentence.valid {
                    eprintln!("{:?}: checksum mismatch, decoding anyway", line);
                }
                if let Some(message) = sentence.message {
                    let _ = writeln!(out, "{:?}", message);
                }
            }
            Ok(AisFragments::Group(members)) => {
                for sentence in members {
                    if let Some(message) = sentence.message {
                        let _ = writeln!(out, "{:?}", message);
                    }
                }
            }
            Ok(AisFragments::Incomplete(_))
            | Ok(AisFragments::Header)
            | Ok(AisFragments::GroupPending) => {}
            Err(err @ Error::InvalidChecksum { .. }) => {
                eprintln!("{:?}: {}", line, err);
                if strict {
                    checksum_failure = true;
                }
            }
            Err(err) => {
                eprintln!("{:?}: {}", line, err);
            }
        }
    }

    if checksum_failure {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
