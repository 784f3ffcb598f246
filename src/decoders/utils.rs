//! Streaming adapters that feed NMEA lines from a file, a UDP socket, or a
//! TCP socket (client or server) into an `AisParser`.
use crate::errors::{Error, Result};
use crate::messages::AisMessage;
use crate::sentence::{AisFragments, AisParser};
use std::net::SocketAddr;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::mpsc;

/// Feeds one line through `parser`, logging the outcome, and returns the
/// decoded message if the line completed a sentence (or fragment sequence).
async fn parse_nmea_line(parser: &mut AisParser, line: &[u8]) -> Result<Option<AisMessage>> {
    let line = line
        .strip_suffix(b"\n")
        .unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }
    match parser.parse(line, true, false) {
        Ok(AisFragments::Complete(sentence)) => {
            if !sentence.valid {
                log::warn!(
                    "checksum mismatch on NMEA line {:?}, forwarding anyway",
                    String::from_utf8_lossy(line)
                );
            }
            Ok(sentence.message)
        }
        Ok(AisFragments::Group(mut members)) => Ok(members.pop().and_then(|s| s.message)),
        Ok(AisFragments::Incomplete(_))
        | Ok(AisFragments::Header)
        | Ok(AisFragments::GroupPending) => Ok(None),
        Err(err) => {
            log::warn!("failed to parse NMEA line {:?}: {}", String::from_utf8_lossy(line), err);
            Err(err)
        }
    }
}

/// Decodes a stream of AIS messages arriving as UDP datagrams, one NMEA
/// sentence per datagram, forwarding each decoded message on `tx`.
pub async fn decode_from_udp(address: &str, tx: mpsc::Sender<AisMessage>) -> Result<()> {
    let socket = UdpSocket::bind(address)
        .await
        .map_err(|err| Error::InvalidNmea { msg: err.to_string() })?;
    let mut buf = [0u8; 1024];
    let mut parser = AisParser::new();

    loop {
        let (len, _) = socket
            .recv_from(&mut buf)
            .await
            .map_err(|err| Error::InvalidNmea { msg: err.to_string() })?;
        if let Ok(Some(message)) = parse_nmea_line(&mut parser, &buf[..len]).await {
            if tx.send(message).await.is_err() {
                return Ok(());
            }
        }
    }
}

/// Connects to `address` as a TCP client and decodes newline-delimited NMEA
/// sentences from the connection, forwarding each decoded message on `tx`.
pub async fn decode_from_tcp(address: &str, tx: mpsc::Sender<AisMessage>) -> Result<()> {
    let stream = TcpStream::connect(address)
        .await
        .map_err(|err| Error::InvalidNmea { msg: err.to_string() })?;
    decode_lines(stream, tx).await
}

/// Listens on `address` and decodes NMEA sentences from every client that
/// connects, multiplexing all of their decoded messages onto one `tx`.
/// Each connection is handled on its own task so a slow or silent client
/// cannot stall the others.
pub async fn decode_from_tcp_server(address: &str, tx: mpsc::Sender<AisMessage>) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|err| Error::InvalidNmea { msg: err.to_string() })?;
    loop {
        let (stream, peer): (TcpStream, SocketAddr) = listener
            .accept()
            .await
            .map_err(|err| Error::InvalidNmea { msg: err.to_string() })?;
        let tx = tx.clone();
        tokio::spawn(async move {
            log::info!("accepted AIS stream from {}", peer);
            if let Err(err) = decode_lines(stream, tx).await {
                log::warn!("connection from {} ended: {}", peer, err);
            }
        });
    }
}

async fn decode_lines(stream: TcpStream, tx: mpsc::Sender<AisMessage>) -> Result<()> {
    let mut parser = AisParser::new();
    let mut reader = BufReader::new(stream);
    let mut line = Vec::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(|err| Error::InvalidNmea { msg: err.to_string() })?;
        if bytes_read == 0 {
            return Ok(());
        }
        if let Ok(Some(message)) = parse_nmea_line(&mut parser, &line).await {
            if tx.send(message).await.is_err() {
                return Ok(());
            }
        }
    }
}

/// Decodes every NMEA sentence in the file at `path`, forwarding each
/// decoded message on `tx`.
pub async fn decode_from_file(path: &str, tx: mpsc::Sender<AisMessage>) -> Result<()> {
    let file = File::open(path)
        .await
        .map_err(|err| Error::InvalidNmea { msg: err.to_string() })?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();
    let mut parser = AisParser::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|err| Error::InvalidNmea { msg: err.to_string() })?
    {
        if let Ok(Some(message)) = parse_nmea_line(&mut parser, line.as_bytes()).await {
            let _ = tx.send(message).await;
        }
    }
    Ok(())
}

/// Decodes a single, self-contained NMEA line (not part of a multipart
/// sequence) into its AIS message. If `strict` is `true`, a checksum
/// mismatch is returned as `Error::InvalidChecksum`; otherwise the message
/// is still decoded and returned.
pub fn decode(message: &[u8], strict: bool) -> Result<AisMessage> {
    let mut parser = AisParser::new();
    match parser.parse(message, true, strict)? {
        AisFragments::Complete(sentence) => sentence.message.ok_or(Error::MissingPayload),
        AisFragments::Group(members) => members
            .into_iter()
            .rev()
            .find_map(|s| s.message)
            .ok_or(Error::MissingPayload),
        AisFragments::Incomplete(_) => Err(Error::MissingMultipart {
            msg: "message requires more fragments".into(),
        }),
        AisFragments::Header | AisFragments::GroupPending => Err(Error::MissingPayload),
    }
}
