//! Common parsers shared by every message schema
use nom::bits::{bits, complete::take as take_bits};
use nom::combinator::{map, map_res};
use nom::error::ErrorKind;
use nom::multi::count;
use nom::IResult;

/// A decoded run of 6-bit ASCII text (trailing `@` padding trimmed).
pub type AsciiString = String;

pub fn parse_year(data: (&[u8], usize)) -> IResult<(&[u8], usize), Option<u16>> {
    map(take_bits::<_, _, _, (_, _)>(14u16), |year| match year {
        0 => None,
        _ => Some(year),
    })(data)
}

pub fn parse_month(data: (&[u8], usize)) -> IResult<(&[u8], usize), Option<u8>> {
    map(take_bits::<_, _, _, (_, _)>(4u8), |month| match month {
        0 => None,
        _ => Some(month),
    })(data)
}

pub fn parse_day(data: (&[u8], usize)) -> IResult<(&[u8], usize), Option<u8>> {
    map(take_bits::<_, _, _, (_, _)>(5u8), |day| match day {
        0 => None,
        _ => Some(day),
    })(data)
}

pub fn parse_hour(data: (&[u8], usize)) -> IResult<(&[u8], usize), u8> {
    take_bits::<_, _, _, (_, _)>(5u8)(data)
}

pub fn parse_minsec(data: (&[u8], usize)) -> IResult<(&[u8], usize), Option<u8>> {
    map(take_bits::<_, _, _, (_, _)>(6u8), |minsec| match minsec {
        60 => None,
        _ => Some(minsec),
    })(data)
}

/// Returns the number of bits available to read, without otherwise modifying anything
pub fn remaining_bits(data: (&[u8], usize)) -> usize {
    data.0.len() * 8 - data.1
}

/// Converts a number of bits, represented as 6-bit ASCII, into a String.
///
/// Truncated input (fewer than `size` bits remaining) is tolerated: the
/// field decodes whatever whole 6-bit characters remain rather than
/// failing, matching how senders commonly drop trailing spare bits.
pub fn parse_6bit_ascii(input: (&[u8], usize), size: usize) -> IResult<(&[u8], usize), String> {
    let available = remaining_bits(input);
    let char_count = std::cmp::min(size, available - available % 6) / 6;
    let (input, bytes) = count(
        map_res(take_bits::<_, _, _, (_, _)>(6u8), sixbit_to_ascii),
        char_count,
    )(input)?;
    match std::str::from_utf8(&bytes) {
        Ok(val) => Ok((
            input,
            val.trim_start()
                .trim_end_matches('@')
                .trim_end()
                .to_string(),
        )),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::AlphaNumeric,
        ))),
    }
}

/// Gets the message type from the first byte of supplied data
#[inline]
pub fn message_type(data: &[u8]) -> IResult<&[u8], u8> {
    bits(message_type_bits)(data)
}

/// Gets the message type from the current bitstream position
#[inline]
pub fn message_type_bits(data: (&[u8], usize)) -> IResult<(&[u8], usize), u8> {
    take_bits(6u8)(data)
}

#[inline]
fn sixbit_to_ascii(data: u8) -> Result<u8, ()> {
    match data {
        0..=31 => Ok(data + 64),
        32..=63 => Ok(data),
        _ => Err(()),
    }
}

#[inline]
fn ascii_to_sixbit(byte: u8) -> u8 {
    match byte {
        64..=95 => byte - 64,
        32..=63 => byte,
        _ => 32, // outside the 6-bit alphabet: encode as space
    }
}

/// Packs `text` as `char_count` 6-bit ASCII characters, uppercased and
/// right-padded with `@`, the inverse of `parse_6bit_ascii`. Characters
/// outside the 6-bit alphabet's printable range are dropped to a space.
pub fn push_6bit_ascii(writer: &mut BitWriter, text: &str, char_count: usize) {
    let upper = text.to_ascii_uppercase();
    let mut bytes = upper.into_bytes();
    bytes.truncate(char_count);
    bytes.resize(char_count, b'@');
    for byte in bytes {
        writer.push(ascii_to_sixbit(byte) as u32, 6);
    }
}

/// Converts a `0` to `false`, `1` to `true`. Expects only a single bit, so
/// other values will cause a panic.
#[inline]
pub fn u8_to_bool(data: u8) -> bool {
    match data {
        0 => false,
        1 => true,
        _ => unreachable!(),
    }
}

pub fn signed_i32(input: (&[u8], usize), len: usize) -> IResult<(&[u8], usize), i32> {
    assert!(len <= std::mem::size_of::<i32>() * 8);
    let (input, num) = take_bits::<_, i32, _, (_, _)>(len)(input)?;
    let mask = !0i32 << len;
    Ok((
        input,
        match (num << (32 - len)).leading_zeros() {
            0 => num | mask,
            _ => !mask & num,
        },
    ))
}

/// Packs fixed-width fields MSB-first into a byte buffer, the inverse of
/// the `take_bits`-based parsers above. Used by the encoders that build a
/// bitstream to hand to `armor()`.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the low `width` bits of `value`, most significant bit first.
    pub fn push(&mut self, value: u32, width: usize) {
        for i in (0..width).rev() {
            let byte_idx = self.bit_len / 8;
            if byte_idx >= self.bytes.len() {
                self.bytes.push(0);
            }
            if (value >> i) & 1 != 0 {
                self.bytes[byte_idx] |= 1 << (7 - (self.bit_len % 8));
            }
            self.bit_len += 1;
        }
    }

    /// Appends the low `width` bits of a two's-complement `value`.
    pub fn push_signed(&mut self, value: i32, width: usize) {
        let mask = (1u64 << width) - 1;
        self.push((value as i64 as u64 & mask) as u32, width);
    }

    /// Consumes the writer, returning the packed bytes and the number of
    /// bits actually written (the last byte may be zero-padded).
    pub fn finish(self) -> (Vec<u8>, usize) {
        (self.bytes, self.bit_len)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_6bit_ascii_truncated_defaults_to_available_chars() {
        // "01" unarmored is 12 bits, only 2 six-bit chars even if 20 is asked for
        let bitstream = crate::messages::unarmor(b"01", 0).unwrap();
        let (_, text) = parse_6bit_ascii((&bitstream, 0), 20).unwrap();
        assert_eq!(text.len(), 2);
    }

    #[test]
    fn push_6bit_ascii_round_trips_through_parse() {
        let mut writer = BitWriter::new();
        push_6bit_ascii(&mut writer, "Ever Diadem", 20);
        let (bytes, _) = writer.finish();
        let (_, text) = parse_6bit_ascii((&bytes, 0), 120).unwrap();
        assert_eq!(text, "EVER DIADEM");
    }

    #[test]
    fn push_6bit_ascii_pads_and_truncates_to_char_count() {
        let mut writer = BitWriter::new();
        push_6bit_ascii(&mut writer, "AB", 3);
        let (bytes, bit_len) = writer.finish();
        assert_eq!(bit_len, 18);
        let (_, text) = parse_6bit_ascii((&bytes, 0), 18).unwrap();
        assert_eq!(text, "AB");
    }

    #[test]
    fn signed_i32_sign_extends_negative() {
        let bitstream = [0b1111_1111, 0b1000_0000];
        let (_, val) = signed_i32((&bitstream, 0), 9).unwrap();
        assert_eq!(val, -1);
    }
}
