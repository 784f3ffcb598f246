//! Handlers for AIS messages at the NMEA sentence layer

use crate::errors::{Error, Result};
use crate::messages::gatehouse::GatehouseHeader;
use crate::messages::tag_block::{GroupId, TagBlock};
use crate::messages::{self, AisMessage};
use nom::branch::alt;
use nom::bytes::complete::{tag, take, take_until};
use nom::character::complete::{anychar, digit1};
use nom::combinator::{map, map_res, opt, peek, verify};
use nom::number::complete::hex_u32;
use nom::sequence::{delimited, terminated};
use nom::IResult;
use std::collections::HashMap;

pub const MAX_SENTENCE_SIZE_BYTES: usize = 384;

pub type AisRawData = Vec<u8>;

#[derive(PartialEq, Eq, Debug)]
/// Represents the NMEA sentence type of an AIS message
pub enum AisReportType {
    /// Report from another ship
    VDM,
    /// Report from own ship
    VDO,
    /// Unknown report type
    Unknown,
}

impl<'a> From<&'a [u8]> for AisReportType {
    fn from(typ: &'a [u8]) -> Self {
        match typ {
            b"VDM" => Self::VDM,
            b"VDO" => Self::VDO,
            _ => Self::Unknown,
        }
    }
}

/// Talker ID for the AIS station
#[derive(PartialEq, Eq, Debug)]
pub enum TalkerId {
    /// NMEA 4.0 Base AIS station
    AB,
    /// NMEA 4.0 Dependent AIS Base station
    AD,
    /// Mobile AIS station
    AI,
    /// NMEA 4.0 Aid to Navigation AIS station
    AN,
    /// NMEA 4.0 AIS Receiving station
    AR,
    /// NMEA 4.0 Limited Base station
    AS,
    /// NMEA 4.0 AIS Transmitting station
    AT,
    /// NMEA 4.0 Repeater AIS station
    AX,
    /// Base AIS station (deprecated)
    BS,
    /// NMEA 4.0 Physical Shore AIS station
    SA,
    /// Unknown talker ID
    Unknown,
}
impl<'a> From<&'a [u8]> for TalkerId {
    fn from(talker_id: &'a [u8]) -> Self {
        match talker_id {
            b"AB" => Self::AB,
            b"AD" => Self::AD,
            b"AI" => Self::AI,
            b"AN" => Self::AN,
            b"AR" => Self::AR,
            b"AS" => Self::AS,
            b"AT" => Self::AT,
            b"AX" => Self::AX,
            b"BS" => Self::BS,
            b"SA" => Self::SA,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AisFragments {
    Complete(AisSentence),
    Incomplete(AisSentence),
    /// A Gatehouse `$PGHP` wrapper was consumed; it carries no AIS payload
    /// of its own and has been stashed to attach to the next sentence.
    Header,
    /// A sentence tagged with a tag-block `g:num-tot-id` group was buffered;
    /// it will be emitted as part of `Group` once every sentence sharing its
    /// group id has arrived.
    GroupPending,
    /// Every sentence sharing a tag-block group id has arrived, in the
    /// order their `g:` key declares (`sentence_num` ascending).
    Group(Vec<AisSentence>),
}

impl From<AisFragments> for Option<AisSentence> {
    fn from(frag: AisFragments) -> Self {
        match frag {
            AisFragments::Complete(sentence) => Some(sentence),
            AisFragments::Incomplete(_)
            | AisFragments::Header
            | AisFragments::GroupPending
            | AisFragments::Group(_) => None,
        }
    }
}

impl From<AisFragments> for Result<AisSentence> {
    fn from(frag: AisFragments) -> Self {
        match frag {
            AisFragments::Complete(sentence) => Ok(sentence),
            AisFragments::Incomplete(_) => Err(Error::MissingMultipart {
                msg: "message is incomplete".into(),
            }),
            AisFragments::Header => Err(Error::MissingPayload),
            AisFragments::GroupPending => Err(Error::MissingMultipart {
                msg: "sentence buffered pending its tag-block group".into(),
            }),
            AisFragments::Group(_) => Err(Error::MissingMultipart {
                msg: "tag-block group complete; use AisFragments::Group to access all members".into(),
            }),
        }
    }
}

/// Key that identifies one multipart sequence: NMEA allows the same
/// `message_id` to be reused concurrently across channels, or by senders
/// that don't share a clock, so fragments are grouped by both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FragmentKey {
    message_id: Option<u8>,
    channel: Option<char>,
}

/// One fragment's payload as buffered while its sequence is still filling
/// in, kept indexed by `fragment_number - 1` so fragments may arrive in any
/// order.
#[derive(Debug)]
struct FragmentSlot {
    data: AisRawData,
    fill_bit_count: u8,
    valid: bool,
}

#[derive(Debug)]
struct PendingFragments {
    num_fragments: u8,
    slots: Vec<Option<FragmentSlot>>,
}

/// One tag-block group (`g:num-tot-id`) as buffered while waiting for every
/// member sharing its group id to arrive.
#[derive(Debug)]
struct GroupBuffer {
    slots: Vec<Option<AisSentence>>,
}

/// Parses NMEA 0183 AIS sentences, reassembling multipart messages.
///
/// A single parser can track several concurrent multipart sequences (e.g.
/// interleaved fragments on channel A and B) since each is keyed by its
/// `(message_id, channel)` pair. A Gatehouse `$PGHP`/tag-block wrapper that
/// precedes a sentence is held as a single pending slot and attached to the
/// very next sentence emitted, then cleared. Tag-block `g:` groups are a
/// second, orthogonal reassembly keyed by group id, independent of the NMEA
/// fragment_number/num_fragments multipart sequence above.
#[derive(Debug, Default)]
pub struct AisParser {
    pending: HashMap<FragmentKey, PendingFragments>,
    pending_groups: HashMap<u32, GroupBuffer>,
    pending_tag_block: Option<TagBlock>,
    pending_gatehouse: Option<GatehouseHeader>,
}

impl AisParser {
    /// Creates a new `AisParser` instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `line` as an NMEA sentence, checking the checksum and returning
    /// an `AisSentence`. Note that several `AisSentence`s might be required to
    /// complete a message, if they are fragments.
    /// If `decode` is `true`, the internal AIS message will also be parsed.
    /// If it is `false`, then internal AIS messages will be ignored.
    /// In both cases, AIS data will be passed along raw.
    /// If `strict` is `true`, a checksum mismatch is raised as
    /// `Error::InvalidChecksum`. Otherwise, decoding proceeds and the
    /// mismatch is recorded on the returned sentence's `valid` field.
    pub fn parse(&mut self, line: &[u8], decode: bool, strict: bool) -> Result<AisFragments> {
        if let Some((tag_block_raw, header)) = parse_gatehouse_sentence(line)? {
            if let Some(raw) = tag_block_raw {
                self.pending_tag_block = TagBlock::parse(raw).map_err(|msg| Error::InvalidNmea { msg })?;
            }
            self.pending_gatehouse = Some(header);
            return Ok(AisFragments::Header);
        }

        let (_, (raw_tag_block, data, mut ais_sentence, checksum)) = parse_nmea_sentence(line)?;
        let found_checksum = compute_checksum(data);
        let checksum_valid = found_checksum == checksum;
        if !checksum_valid && strict {
            return Err(Error::InvalidChecksum {
                expected: checksum,
                found: found_checksum,
            });
        }
        if let Some(raw) = raw_tag_block {
            self.pending_tag_block = TagBlock::parse(raw).map_err(|msg| Error::InvalidNmea { msg })?;
        }
        ais_sentence.tag_block = self.pending_tag_block.take();
        ais_sentence.gatehouse = self.pending_gatehouse.take();

        let key = FragmentKey {
            message_id: ais_sentence.message_id,
            channel: ais_sentence.channel,
        };

        if ais_sentence.is_fragment() {
            match self.extend_pending(key, &ais_sentence, checksum_valid)? {
                None => {
                    ais_sentence.valid = checksum_valid;
                    return Ok(AisFragments::Incomplete(ais_sentence));
                }
                Some((data, fill_bit_count, all_valid)) => {
                    ais_sentence.data = data;
                    ais_sentence.fill_bit_count = fill_bit_count;
                    ais_sentence.valid = all_valid;
                }
            }
        } else {
            ais_sentence.valid = checksum_valid;
        }

        if decode {
            let unarmored =
                messages::unarmor(&ais_sentence.data, ais_sentence.fill_bit_count as usize)?;
            ais_sentence.message = Some(messages::parse(&unarmored)?)
        }

        if let Some(group) = ais_sentence.tag_block.as_ref().and_then(|tb| tb.group) {
            return Ok(self.buffer_group(group, ais_sentence));
        }
        Ok(AisFragments::Complete(ais_sentence))
    }

    /// Buffers `ais_sentence` by fragment_number, creating the pending slot
    /// set on whichever fragment_number arrives first so reordered delivery
    /// reassembles the same as in-order delivery. Returns the concatenated
    /// data, trailing fill-bit count, and AND-of-parts validity once every
    /// slot has filled, or `None` while fragments are still outstanding.
    fn extend_pending(
        &mut self,
        key: FragmentKey,
        ais_sentence: &AisSentence,
        valid: bool,
    ) -> Result<Option<(AisRawData, u8, bool)>> {
        let pending = self.pending.entry(key).or_insert_with(|| PendingFragments {
            num_fragments: ais_sentence.num_fragments,
            slots: std::iter::repeat_with(|| None)
                .take(ais_sentence.num_fragments as usize)
                .collect(),
        });
        let idx = ais_sentence
            .fragment_number
            .checked_sub(1)
            .ok_or_else(|| Error::MissingMultipart {
                msg: "fragment_number must be at least 1".into(),
            })? as usize;
        if idx >= pending.slots.len() {
            self.pending.remove(&key);
            return Err(Error::TooManyMessages {
                msg: "fragment_number exceeds num_fragments declared".into(),
            });
        }
        pending.slots[idx] = Some(FragmentSlot {
            data: ais_sentence.data.clone(),
            fill_bit_count: ais_sentence.fill_bit_count,
            valid,
        });

        if pending.slots.iter().all(Option::is_some) {
            let pending = self.pending.remove(&key).unwrap();
            let mut data = AisRawData::default();
            let mut fill_bit_count = 0;
            let mut all_valid = true;
            for slot in pending.slots.into_iter().flatten() {
                data.extend_from_slice(&slot.data);
                fill_bit_count = slot.fill_bit_count;
                all_valid &= slot.valid;
            }
            Ok(Some((data, fill_bit_count, all_valid)))
        } else {
            Ok(None)
        }
    }

    /// Buffers an already-reassembled `AisSentence` by its tag-block group
    /// id, creating the slot set on whichever group member arrives first.
    /// Returns the full ordered list once every member has arrived.
    fn buffer_group(&mut self, group: GroupId, sentence: AisSentence) -> AisFragments {
        let buffer = self.pending_groups.entry(group.group_id).or_insert_with(|| GroupBuffer {
            slots: std::iter::repeat_with(|| None)
                .take(group.total_sentences as usize)
                .collect(),
        });
        if let Some(idx) = (group.sentence_num as usize).checked_sub(1) {
            if idx < buffer.slots.len() {
                buffer.slots[idx] = Some(sentence);
            }
        }
        if buffer.slots.iter().all(Option::is_some) {
            let buffer = self.pending_groups.remove(&group.group_id).unwrap();
            AisFragments::Group(buffer.slots.into_iter().flatten().collect())
        } else {
            AisFragments::GroupPending
        }
    }
}

/// Computes the NMEA XOR checksum of `data`.
fn compute_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &item| acc ^ item)
}

#[derive(Debug, PartialEq)]
/// Represents an NMEA sentence parsed as AIS
pub struct AisSentence {
    pub talker_id: TalkerId,
    pub report_type: AisReportType,
    pub num_fragments: u8,
    pub fragment_number: u8,
    pub message_id: Option<u8>,
    pub channel: Option<char>,
    pub data: AisRawData,
    pub fill_bit_count: u8,
    pub message_type: u8,
    pub message: Option<AisMessage>,
    /// The NMEA 4.10 tag block that preceded this sentence on the wire, if
    /// any.
    pub tag_block: Option<TagBlock>,
    /// The Gatehouse `$PGHP` wrapper that preceded this sentence on the
    /// same stream, if any.
    pub gatehouse: Option<GatehouseHeader>,
    /// Whether the checksum matched. For a multipart sequence this is the
    /// AND of every fragment's checksum validity. `false` only appears here
    /// when the parser was not run in strict mode, since strict mode raises
    /// `Error::InvalidChecksum` instead of returning the sentence.
    pub valid: bool,
}

impl AisSentence {
    /// Returns whether there are more fragments to come
    pub fn has_more(&self) -> bool {
        self.fragment_number < self.num_fragments
    }

    /// Returns whether this is part of a fragmented message set
    pub fn is_fragment(&self) -> bool {
        self.num_fragments != 1
    }
}

/// Converts bytes representing an ASCII number to a string slice
fn parse_numeric_string(data: &[u8]) -> IResult<&[u8], &str> {
    map_res(digit1, std::str::from_utf8)(data)
}

/// Converts bytes representing an ASCII number to a u8
fn parse_u8_digit(data: &[u8]) -> IResult<&[u8], u8> {
    map_res(parse_numeric_string, std::str::FromStr::from_str)(data)
}

/// Named parser for the AIS portion of an NMEA sentence
fn parse_ais_sentence(data: &[u8]) -> IResult<&[u8], AisSentence> {
    let (data, talker_id) = map(take(2u8), Into::into)(data)?;
    let (data, report_type) = map(take(3u8), Into::into)(data)?;
    let (data, _) = tag(",")(data)?;
    let (data, num_fragments) = parse_u8_digit(data)?;
    let (data, _) = tag(",")(data)?;
    let (data, fragment_number) = parse_u8_digit(data)?;
    let (data, _) = tag(",")(data)?;
    let (data, message_id) = opt(parse_u8_digit)(data)?;
    let (data, _) = tag(",")(data)?;
    let (data, channel_bytes) = take_until(",")(data)?;
    let (_, channel) = opt(anychar)(channel_bytes)?;
    let (data, _) = tag(",")(data)?;
    let (data, ais_data) = take_until(",")(data)?;
    let (data, _) = tag(",")(data)?;
    let (data, fill_bit_count) = verify(parse_u8_digit, |val| *val < 6)(data)?;
    let message_type = messages::peek_message_type(ais_data)?;
    Ok((
        data,
        AisSentence {
            talker_id,
            report_type,
            num_fragments,
            fragment_number,
            message_id,
            channel,
            data: ais_data.into(),
            fill_bit_count,
            message_type,
            message: None,
            tag_block: None,
            gatehouse: None,
            valid: false,
        },
    ))
}

/// Recognizes a (possibly tag-blocked) Gatehouse `$PGHP` wrapper sentence
/// and returns its raw leading tag block text plus the parsed header.
/// Returns `Ok(None)` for any line that isn't a `$PGHP` sentence, so callers
/// can fall back to normal AIS sentence parsing.
fn parse_gatehouse_sentence(data: &[u8]) -> Result<Option<(Option<&str>, GatehouseHeader)>> {
    let Ok((data, tag_block_raw)) =
        opt(delimited(tag("\\"), take_until("\\"), tag("\\")))(data)
    else {
        return Ok(None);
    };
    if !data.starts_with(b"$PGHP,") {
        return Ok(None);
    }
    let tag_block_text = tag_block_raw
        .map(std::str::from_utf8)
        .transpose()
        .map_err(|_| Error::InvalidNmea {
            msg: "tag block is not valid UTF-8".into(),
        })?;

    let parse_body = |data: &[u8]| -> IResult<&[u8], (&[u8], u8)> {
        let (data, _) = tag("$")(data)?;
        let (data, body) = peek(take_until("*"))(data)?;
        let (data, _) = take_until("*")(data)?;
        let (data, _) = tag("*")(data)?;
        let (data, checksum) = verify(hex_u32, |val| *val <= 0xff)(data)?;
        Ok((data, (body, checksum as u8)))
    };
    let (_, (body, checksum)) = parse_body(data)
        .map_err(|_| Error::InvalidNmea { msg: "malformed $PGHP sentence".into() })?;
    let found = compute_checksum(body);
    if found != checksum {
        return Err(Error::InvalidChecksum {
            expected: checksum,
            found,
        });
    }

    let body_text = std::str::from_utf8(body).map_err(|_| Error::InvalidNmea {
        msg: "$PGHP sentence is not valid UTF-8".into(),
    })?;
    let fields = body_text
        .strip_prefix("PGHP,1,")
        .ok_or_else(|| Error::InvalidNmea {
            msg: "unsupported Gatehouse sentence number".into(),
        })?;
    let header = GatehouseHeader::parse(fields).ok_or_else(|| Error::InvalidNmea {
        msg: "malformed $PGHP fields".into(),
    })?;
    Ok(Some((tag_block_text, header)))
}

/// Named parser for an overall NMEA 0183 sentence, returning the raw tag
/// block text (if present), the payload used for the checksum, the parsed
/// sentence, and the expected checksum byte.
fn parse_nmea_sentence(data: &[u8]) -> IResult<&[u8], (Option<&str>, &[u8], AisSentence, u8)> {
    let (data, tag_block_raw) =
        opt(delimited(tag("\\"), take_until("\\"), tag("\\")))(data)?;
    let tag_block_text = tag_block_raw
        .map(std::str::from_utf8)
        .transpose()
        .map_err(|_| nom::Err::Failure(nom::error::Error::new(data, nom::error::ErrorKind::Char)))?;
    let (data, _) = alt((tag("!"), tag("$")))(data)?;
    let (data, raw) = peek(take_until("*"))(data)?;
    let (data, msg) = terminated(parse_ais_sentence, tag("*"))(data)?;
    let (data, checksum) = verify(hex_u32, |val| val <= &0xff)(data)?;
    Ok((data, (tag_block_text, raw, msg, checksum as u8)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_CHECKSUM: &[u8] =
        b"!AIVDM,1,1,,A,E>kb9I99S@0`8@:9ah;0TahI7@@;V4=v:nv;h00003vP100,0*7A";
    const BAD_CHECKSUM: &[u8] =
        b"!AIVDM,1,1,,A,E>kb9I99S@0`8@:9ah;0TahI7@@;V4=v:nv;h00003vP100,0*8D";
    const BAD_STRUCTURE: &[u8] =
        b"!AIVDM,1,1,,A,E>kb9I99S@0`8@:9ah;0,TahI7@@;V4=v:nv;h00003vP100,0*8D";
    const FRAGMENT_1: &[u8] =
        b"!AIVDM,2,1,1,B,53`soB8000010KSOW<0P4eDp4l6000000000000U0p<24t@P05H3S833CDP00000,0*78";
    const FRAGMENT_2: &[u8] = b"!AIVDM,2,2,1,B,0000000,2*26";
    const NO_CHANNEL: &[u8] = b"!AIVDM,1,1,,,34RvgN500005tLTMfjiTs3u`0>`<,0*7A";
    const AIS_START_IDX: usize = 14;
    const AIS_END_IDX: usize = 61;
    const WITH_TAG_BLOCK: &[u8] =
        b"\\s:2573345,c:1696241893*00\\!AIVDM,1,1,,A,E>kb9I99S@0`8@:9ah;0TahI7@@;V4=v:nv;h00003vP100,0*7A";
    const WITH_BAD_TAG_BLOCK: &[u8] =
        b"s:2573345,c:1696241893*00\\!AIVDM,1,1,,A,E>kb9I99S@0`8@:9ah;0TahI7@@;V4=v:nv;h00003vP100,0*8D";

    fn expected_sentence() -> AisSentence {
        AisSentence {
            talker_id: TalkerId::AI,
            report_type: AisReportType::VDM,
            num_fragments: 1,
            fragment_number: 1,
            message_id: None,
            channel: Some('A'),
            data: GOOD_CHECKSUM[AIS_START_IDX..AIS_END_IDX].into(),
            fill_bit_count: 0,
            message_type: 17,
            message: None,
            tag_block: None,
            gatehouse: None,
            valid: false,
        }
    }

    #[test]
    fn parse_valid_structure() {
        let result = parse_ais_sentence(&GOOD_CHECKSUM[1..63]).unwrap();
        assert_eq!(result.0, b"");
        assert_eq!(result.1, expected_sentence());
    }

    #[test]
    fn parse_invalid_structure() {
        assert!(parse_ais_sentence(&BAD_STRUCTURE[1..64]).is_err());
    }

    #[test]
    fn parse_valid_sentence() {
        let result = parse_nmea_sentence(GOOD_CHECKSUM).unwrap();
        assert_eq!(result.0, b"");
        assert_eq!((result.1).2, expected_sentence());
        assert_eq!((result.1).3, 122);
    }

    #[test]
    fn worked_scenario_single_position_report() {
        const LINE: &[u8] = b"!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C";
        let mut parser = AisParser::new();
        let result = parser.parse(LINE, true, true).unwrap();
        match result {
            AisFragments::Complete(sentence) => {
                assert!(sentence.valid);
                match sentence.message.unwrap() {
                    AisMessage::PositionReport(report) => {
                        assert_eq!(report.mmsi, 366053209);
                        assert_eq!(
                            report.navigation_status,
                            Some(crate::messages::position_report::NavigationStatus::RestrictedManouverability)
                        );
                        assert!((report.course_over_ground.unwrap() - 219.3).abs() < 0.05);
                        assert!((report.latitude.unwrap() - 37.802118).abs() < 1e-5);
                        assert!((report.longitude.unwrap() - -122.341618).abs() < 1e-5);
                    }
                    other => panic!("Expected PositionReport, got {:?}", other),
                }
            }
            other => panic!("Expected complete sentence, got {:?}", other),
        }
    }

    #[test]
    fn worked_scenario_multipart_static_and_voyage_data() {
        const PART_1: &[u8] =
            b"!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C";
        const PART_2: &[u8] = b"!AIVDM,2,2,1,A,88888888880,2*25";
        let mut parser = AisParser::new();
        let first = parser.parse(PART_1, true, true).unwrap();
        assert!(matches!(first, AisFragments::Incomplete(_)));
        let second = parser.parse(PART_2, true, true).unwrap();
        match second {
            AisFragments::Complete(sentence) => match sentence.message.unwrap() {
                AisMessage::StaticAndVoyageRelatedData(data) => {
                    assert_eq!(data.callsign, "3FOF8");
                    assert_eq!(data.vessel_name, "EVER DIADEM");
                    assert_eq!(data.destination, "NEW YORK");
                    assert!((data.draught - 12.2).abs() < 0.05);
                    assert_eq!(data.dimension_to_bow, 225);
                }
                other => panic!("Expected StaticAndVoyageRelatedData, got {:?}", other),
            },
            other => panic!("Expected complete sentence, got {:?}", other),
        }
    }

    #[test]
    fn parse_using_struct_valid() {
        let mut parser = AisParser::new();
        let result = parser.parse(GOOD_CHECKSUM, false, false).unwrap();
        assert_eq!(
            result,
            AisFragments::Complete(AisSentence {
                valid: true,
                ..expected_sentence()
            })
        );
    }

    #[test]
    fn parse_valid_checksum() {
        let mut parser = AisParser::new();
        let result = parser.parse(GOOD_CHECKSUM, false, false);
        assert!(result.is_ok());
    }

    #[test]
    fn parse_invalid_checksum_non_strict_attaches_invalid_flag() {
        let mut parser = AisParser::new();
        let result = parser.parse(BAD_CHECKSUM, false, false).unwrap();
        match result {
            AisFragments::Complete(sentence) => assert!(!sentence.valid),
            other => panic!("Expected complete (but invalid) sentence, got {:?}", other),
        }
    }

    #[test]
    fn parse_invalid_checksum_strict_raises_error() {
        let mut parser = AisParser::new();
        let result = parser.parse(BAD_CHECKSUM, false, true);
        assert!(matches!(result, Err(Error::InvalidChecksum { .. })));
    }

    #[test]
    fn gatehouse_header_attaches_to_next_sentence() {
        const GATEHOUSE: &[u8] = b"$PGHP,1,2023,9,18,14,22,1,500,1,2,1,NOR,A*00";
        let mut parser = AisParser::new();
        let header_result = parser.parse(GATEHOUSE, false, false).unwrap();
        assert_eq!(header_result, AisFragments::Header);

        let sentence_result = parser.parse(GOOD_CHECKSUM, false, false).unwrap();
        match sentence_result {
            AisFragments::Complete(sentence) => {
                let gatehouse = sentence.gatehouse.expect("gatehouse header should be attached");
                assert_eq!(gatehouse.year, 2023);
                assert_eq!(gatehouse.country, "NOR");
            }
            other => panic!("Expected complete sentence, got {:?}", other),
        }
    }

    #[test]
    fn parse_multiple_fragments() {
        let mut parser = AisParser::new();
        let frag1 = parser.parse(FRAGMENT_1, false, false).unwrap();
        let frag2 = parser.parse(FRAGMENT_2, false, false).unwrap();
        if let AisFragments::Complete(_) = frag1 {
            panic!("Expected frag1 to be incomplete, but it was {:?}", frag1);
        }
        if let AisFragments::Complete(complete) = frag2 {
            assert!(complete.num_fragments > 1);
        } else {
            panic!("Expected frag2 to be complete, but it was {:?}", frag2);
        }
    }

    #[test]
    fn parse_fragments_out_of_order_reassembles_identically() {
        // Spec requires permutation-invariant reassembly: delivering the
        // second fragment before the first must produce the same payload
        // as in-order delivery.
        let mut in_order = AisParser::new();
        in_order.parse(FRAGMENT_1, false, false).unwrap();
        let in_order_result = in_order.parse(FRAGMENT_2, false, false).unwrap();

        let mut reordered = AisParser::new();
        let first = reordered.parse(FRAGMENT_2, false, false).unwrap();
        assert!(matches!(first, AisFragments::Incomplete(_)));
        let reordered_result = reordered.parse(FRAGMENT_1, false, false).unwrap();

        match (in_order_result, reordered_result) {
            (AisFragments::Complete(a), AisFragments::Complete(b)) => {
                assert_eq!(a.data, b.data);
                assert_eq!(a.fill_bit_count, b.fill_bit_count);
                assert_eq!(a.valid, b.valid);
            }
            other => panic!("Expected both deliveries to complete, got {:?}", other),
        }
    }

    #[test]
    fn parse_concurrent_fragments_on_different_channels() {
        // Two independent sequences sharing message_id=1 but on different
        // channels must not clobber each other.
        let mut parser = AisParser::new();
        let a1 = parser.parse(FRAGMENT_1, false, false).unwrap();
        assert!(matches!(a1, AisFragments::Incomplete(_)));
        let b1: &[u8] =
            b"!AIVDM,2,1,1,A,53`soB8000010KSOW<0P4eDp4l6000000000000U0p<24t@P05H3S833CDP00000,0*79";
        let b1_result = parser.parse(b1, false, false).unwrap();
        assert!(matches!(b1_result, AisFragments::Incomplete(_)));
        let a2 = parser.parse(FRAGMENT_2, false, false).unwrap();
        assert!(matches!(a2, AisFragments::Complete(_)));
    }

    #[test]
    fn test_talker_id_conversions() {
        assert_eq!(TalkerId::from(b"AI".as_ref()), TalkerId::AI);
        assert_eq!(TalkerId::from(b"AB".as_ref()), TalkerId::AB);
        assert_eq!(TalkerId::from(b"BS".as_ref()), TalkerId::BS);
    }

    #[test]
    fn test_no_channel() {
        let result = parse_nmea_sentence(NO_CHANNEL).unwrap();
        let sentence = (result.1).2;
        assert_eq!(sentence.channel, None);
    }

    #[test]
    fn parse_valid_sentence_with_tag_block() {
        let result = parse_nmea_sentence(WITH_TAG_BLOCK).unwrap();
        assert_eq!(result.0, b"");
        assert_eq!((result.1).0, Some("s:2573345,c:1696241893*00"));
        assert_eq!((result.1).2, expected_sentence());
        assert_eq!((result.1).3, 122);
    }

    #[test]
    fn tag_block_attaches_to_next_sentence() {
        let mut parser = AisParser::new();
        let result = parser.parse(WITH_TAG_BLOCK, false, false).unwrap();
        match result {
            AisFragments::Complete(sentence) => {
                let tag_block = sentence.tag_block.expect("tag block should be attached");
                assert_eq!(tag_block.source_station, Some("2573345".to_string()));
            }
            other => panic!("Expected complete sentence, got {:?}", other),
        }
    }

    #[test]
    fn parse_sentence_with_invalid_tag_block() {
        assert!(parse_ais_sentence(&WITH_BAD_TAG_BLOCK[1..64]).is_err());
    }

    #[test]
    fn group_tag_block_member_buffers_until_group_completes() {
        // First member of a 2-part group: the underlying sentence decodes
        // fine on its own, but the parser holds it back since its group
        // isn't complete yet.
        const GROUP_MEMBER_1: &[u8] =
            b"\\g:1-2-73874*61\\!AIVDM,1,1,,A,15MrVH0000KH<:V:NtBLoqFP2H9:,0*2F";
        const GROUP_MEMBER_2: &[u8] = b"\\g:2-2-73874*62\\!AIVDM,1,1,,A,E>kb9I99S@0`8@:9ah;0TahI7@@;V4=v:nv;h00003vP100,0*7A";

        let mut parser = AisParser::new();
        let first = parser.parse(GROUP_MEMBER_1, true, false).unwrap();
        assert_eq!(first, AisFragments::GroupPending);

        let second = parser.parse(GROUP_MEMBER_2, true, false).unwrap();
        match second {
            AisFragments::Group(members) => {
                assert_eq!(members.len(), 2);
                assert_eq!(
                    members[0].tag_block.as_ref().unwrap().group.unwrap().sentence_num,
                    1
                );
                assert_eq!(
                    members[1].tag_block.as_ref().unwrap().group.unwrap().sentence_num,
                    2
                );
            }
            other => panic!("Expected completed group, got {:?}", other),
        }
    }

    #[test]
    fn group_tag_block_member_decodes_its_payload_independently() {
        // The scenario from the spec's worked examples: a lone group member
        // (group total 2, only part 1 present) still decodes to the AIS
        // message its payload describes, even though the group as a whole
        // is still pending.
        const GROUP_MEMBER: &[u8] =
            b"\\g:1-2-73874*61\\!AIVDM,1,1,,A,15MrVH0000KH<:V:NtBLoqFP2H9:,0*2F";
        let mut parser = AisParser::new();
        let result = parser.parse(GROUP_MEMBER, true, false).unwrap();
        assert_eq!(result, AisFragments::GroupPending);

        let unarmored = messages::unarmor(b"15MrVH0000KH<:V:NtBLoqFP2H9:", 0).unwrap();
        match messages::parse(&unarmored).unwrap() {
            AisMessage::PositionReport(report) => assert_eq!(report.mmsi, 366913120),
            other => panic!("Expected a position report, got {:?}", other),
        }
    }
}
