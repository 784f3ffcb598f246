//! Specific AIS message types
use crate::errors::{Error, Result};
use nom::bits::complete::take as take_bits;
use nom::IResult;
use std::cmp;

pub mod addressed_safety_related;
pub mod aid_to_navigation_report;
pub mod assignment_mode_command;
pub mod base_station_report;
pub mod binary_acknowledge;
pub mod binary_addressed;
pub mod binary_broadcast_message;
pub mod binary_message_multiple_slot;
pub mod binary_message_single_slot;
pub mod channel_management;
pub mod data_link_management_message;
pub mod dgnss_broadcast_binary_message;
pub mod extended_class_b_position_report;
pub mod gatehouse;
pub mod group_assignment_command;
pub mod interrogation;
pub mod long_range_ais_broadcast;
pub mod navigation;
pub mod parsers;
pub mod position_report;
pub mod radio_status;
pub mod safety_related_acknowledgment;
pub mod safety_related_broadcast;
pub mod standard_aircraft_position_report;
pub mod standard_class_b_position_report;
pub mod static_and_voyage_related_data;
pub mod static_data_report;
pub mod tag_block;
pub mod types;
pub mod utc_date_inquiry;
pub mod utc_date_response;

/// A type for storing number of bits. (AIS is a bit-oriented, rather than byte-oriented protocol.)
pub type BitCount = usize;
/// Denotes data to be parsed byte-by-byte
pub type ByteStream<'a> = &'a [u8];
/// Denotes data to be parsed bit-by-bit
pub type BitStream<'a> = &'a [u8];

/// Contains all structured messages recognized by this crate, one variant
/// per AIS message type (1-27).
#[derive(Debug)]
pub enum AisMessage {
    PositionReport(position_report::PositionReport),
    BaseStationReport(base_station_report::BaseStationReport),
    StaticAndVoyageRelatedData(static_and_voyage_related_data::StaticAndVoyageRelatedData),
    BinaryAddressedMessage(binary_addressed::BinaryAddressedMessage),
    BinaryAcknowledge(binary_acknowledge::BinaryAcknowledge),
    BinaryBroadcastMessage(binary_broadcast_message::BinaryBroadcastMessage),
    StandardSarAircraftPositionReport(
        standard_aircraft_position_report::SARPositionReport,
    ),
    UtcDateInquiry(utc_date_inquiry::UtcDateInquiry),
    UtcDateResponse(utc_date_response::UtcDateResponse),
    AddressedSafetyRelatedMessage(addressed_safety_related::AddressedSafetyRelatedMessage),
    SafetyRelatedAcknowledge(safety_related_acknowledgment::SafetyRelatedAcknowledge),
    SafetyRelatedBroadcastMessage(safety_related_broadcast::SafetyRelatedBroadcastMessage),
    Interrogation(interrogation::Message),
    AssignmentModeCommand(assignment_mode_command::AssignmentModeCommand),
    DgnssBroadcastBinaryMessage(dgnss_broadcast_binary_message::DgnssBroadcastBinaryMessage),
    StandardClassBPositionReport(
        standard_class_b_position_report::StandardClassBPositionReport,
    ),
    ExtendedClassBPositionReport(
        extended_class_b_position_report::ExtendedClassBPositionReport,
    ),
    DataLinkManagementMessage(data_link_management_message::DataLinkManagementMessage),
    AidToNavigationReport(aid_to_navigation_report::AidToNavigationReport),
    ChannelManagement(channel_management::ChannelManagement),
    GroupAssignmentCommand(group_assignment_command::GroupAssignmentCommand),
    StaticDataReport(static_data_report::StaticDataReport),
    BinaryMessageSingleSlot(binary_message_single_slot::BinaryMessageSingleSlot),
    BinaryMessageMultipleSlot(binary_message_multiple_slot::BinaryMessageMultipleSlot),
    LongRangeAisBroadcastMessage(long_range_ais_broadcast::LongRangeAisBroadcastMessage),
}

/// Trait that describes specific types of AIS messages
pub trait AisMessageType<'a>: Sized {
    /// The common name for the message type
    fn name(&self) -> &'static str;
    /// Converts a raw AIS message into a structured, queryable version
    fn parse(data: &'a [u8]) -> Result<Self>;
}

fn message_type(data: (&[u8], usize)) -> IResult<(&[u8], usize), u8> {
    // Peek only: message type lives in the first 6 bits of every payload,
    // and every per-type parser re-reads it from the start.
    take_bits::<_, u8, _, _>(6u8)(data)
}

/// Reads the message type straight out of the first armored character,
/// without unarmoring the whole payload. The first 6-bit symbol of an
/// AIVDM/AIVDO payload is always the message type, so this only needs to
/// decode that one byte.
pub fn peek_message_type(armored: &[u8]) -> Result<u8> {
    let first = armored
        .first()
        .ok_or_else(|| Error::MissingPayload)?;
    match *first {
        48..=87 => Ok(first - 48),
        96..=119 => Ok(first - 56),
        _ => Err(Error::NonPrintable { byte: *first }),
    }
}

/// Given an unarmored bitstream (see `unarmor()` for details), this
/// will return a message type object, if supported by this library
/// and the message is valid.
pub fn parse(unarmored: BitStream) -> Result<AisMessage> {
    let (_, result) = message_type((unarmored, 0)).map_err(|_| Error::InvalidNmea {
        msg: "unable to read message type".into(),
    })?;
    match result {
        // Type 0 is not formally assigned by ITU-R M.1371; in practice it's
        // sent by misconfigured transponders and is treated as type 1.
        0 | 1..=3 => Ok(AisMessage::PositionReport(position_report::PositionReport::parse(
            unarmored,
        )?)),
        4 => Ok(AisMessage::BaseStationReport(
            base_station_report::BaseStationReport::parse(unarmored)?,
        )),
        5 => Ok(AisMessage::StaticAndVoyageRelatedData(
            static_and_voyage_related_data::StaticAndVoyageRelatedData::parse(unarmored)?,
        )),
        6 => Ok(AisMessage::BinaryAddressedMessage(
            binary_addressed::BinaryAddressedMessage::parse(unarmored)?,
        )),
        7 => Ok(AisMessage::BinaryAcknowledge(
            binary_acknowledge::BinaryAcknowledge::parse(unarmored)?,
        )),
        8 => Ok(AisMessage::BinaryBroadcastMessage(
            binary_broadcast_message::BinaryBroadcastMessage::parse(unarmored)?,
        )),
        9 => Ok(AisMessage::StandardSarAircraftPositionReport(
            standard_aircraft_position_report::SARPositionReport::parse(unarmored)?,
        )),
        10 => Ok(AisMessage::UtcDateInquiry(
            utc_date_inquiry::UtcDateInquiry::parse(unarmored)?,
        )),
        11 => Ok(AisMessage::UtcDateResponse(
            utc_date_response::UtcDateResponse::parse(unarmored)?,
        )),
        12 => Ok(AisMessage::AddressedSafetyRelatedMessage(
            addressed_safety_related::AddressedSafetyRelatedMessage::parse(unarmored)?,
        )),
        13 => Ok(AisMessage::SafetyRelatedAcknowledge(
            safety_related_acknowledgment::SafetyRelatedAcknowledge::parse(unarmored)?,
        )),
        14 => Ok(AisMessage::SafetyRelatedBroadcastMessage(
            safety_related_broadcast::SafetyRelatedBroadcastMessage::parse(unarmored)?,
        )),
        15 => Ok(AisMessage::Interrogation(interrogation::Message::parse(
            unarmored,
        )?)),
        16 => Ok(AisMessage::AssignmentModeCommand(
            assignment_mode_command::AssignmentModeCommand::parse(unarmored)?,
        )),
        17 => Ok(AisMessage::DgnssBroadcastBinaryMessage(
            dgnss_broadcast_binary_message::DgnssBroadcastBinaryMessage::parse(unarmored)?,
        )),
        18 => Ok(AisMessage::StandardClassBPositionReport(
            standard_class_b_position_report::StandardClassBPositionReport::parse(unarmored)?,
        )),
        19 => Ok(AisMessage::ExtendedClassBPositionReport(
            extended_class_b_position_report::ExtendedClassBPositionReport::parse(unarmored)?,
        )),
        20 => Ok(AisMessage::DataLinkManagementMessage(
            data_link_management_message::DataLinkManagementMessage::parse(unarmored)?,
        )),
        21 => Ok(AisMessage::AidToNavigationReport(
            aid_to_navigation_report::AidToNavigationReport::parse(unarmored)?,
        )),
        22 => Ok(AisMessage::ChannelManagement(
            channel_management::ChannelManagement::parse(unarmored)?,
        )),
        23 => Ok(AisMessage::GroupAssignmentCommand(
            group_assignment_command::GroupAssignmentCommand::parse(unarmored)?,
        )),
        24 => Ok(AisMessage::StaticDataReport(
            static_data_report::StaticDataReport::parse(unarmored)?,
        )),
        25 => Ok(AisMessage::BinaryMessageSingleSlot(
            binary_message_single_slot::BinaryMessageSingleSlot::parse(unarmored)?,
        )),
        26 => Ok(AisMessage::BinaryMessageMultipleSlot(
            binary_message_multiple_slot::BinaryMessageMultipleSlot::parse(unarmored)?,
        )),
        27 => Ok(AisMessage::LongRangeAisBroadcastMessage(
            long_range_ais_broadcast::LongRangeAisBroadcastMessage::parse(unarmored)?,
        )),
        other => Err(Error::UnknownMessage {
            message_type: other,
        }),
    }
}

/// Converts 8-bit ASCII (armored) into packed 6-bit (unarmored) sequences.
///
/// AIS data is bit-, not byte-oriented. AIS data is split into 6-bit chunks,
/// which are then represented in ASCII as 8-bit characters. That process
/// is called "armoring"
///
/// The `fill_bits` parameter is a count of bits needed to pad
/// the complete message out to a 6-bit boundary. It should be supplied
/// as part of the main sentence.
///
/// Returns an error if any of the individual bytes cannot be converted
/// to a valid 6-bit chunk.
///
/// See https://gpsd.gitlab.io/gpsd/AIVDM.html for more details.
pub fn unarmor(data: ByteStream, fill_bits: BitCount) -> Result<Vec<u8>> {
    let bit_count = data.len() * 6;
    let byte_count = (bit_count / 8) + ((bit_count % 8 != 0) as usize);
    let mut output = vec![0; byte_count];
    let mut offset = 0;
    for byte in data {
        let unarmored = match *byte {
            48..=87 => byte - 48,
            96..=119 => byte - 56,
            _ => return Err(Error::NonPrintable { byte: *byte }),
        } << 2;
        let offset_byte = offset / 8;
        let offset_bit = offset % 8;
        output[offset_byte] |= unarmored >> offset_bit;
        if offset_bit > 2 {
            // Continue into the next byte
            output[offset_byte + 1] |= unarmored << (8 - offset_bit);
        }
        offset += 6;
    }
    if fill_bits != 0 {
        let bits_in_final_byte = match bit_count % 8 {
            0 => 8,
            1..=7 => bit_count % 8,
            _ => unreachable!(),
        };
        let final_idx = output.len() - 1;
        {
            let byte = &mut output[final_idx];
            let shift = (8 - bits_in_final_byte) + cmp::min(fill_bits, bits_in_final_byte);
            *byte &= match shift {
                0..=7 => 0xffu8 << shift,
                8 => 0x0u8,
                _ => unreachable!(),
            };
        }
        if fill_bits > bits_in_final_byte {
            let byte = &mut output[final_idx - 1];
            *byte &= 0xffu8 << (fill_bits - bits_in_final_byte);
        }
    }
    Ok(output)
}

/// Inverse of `unarmor`: packs a 6-bit-per-symbol bitstream back into
/// armored ASCII, returning the text and the number of fill bits needed to
/// round the final symbol out to 6 bits.
pub fn armor(data: &[u8], bit_count: BitCount) -> (String, BitCount) {
    let symbol_count = (bit_count / 6) + ((bit_count % 6 != 0) as usize);
    let fill_bits = symbol_count * 6 - bit_count;
    let mut text = String::with_capacity(symbol_count);
    let mut offset = 0;
    for _ in 0..symbol_count {
        let offset_byte = offset / 8;
        let offset_bit = offset % 8;
        let mut symbol = if offset_byte < data.len() {
            (data[offset_byte] << offset_bit) >> 2
        } else {
            0
        };
        if offset_bit > 2 && offset_byte + 1 < data.len() {
            symbol |= data[offset_byte + 1] >> (10 - offset_bit);
        }
        symbol &= 0x3f;
        let armored = match symbol {
            0..=39 => symbol + 48,
            40..=63 => symbol + 56,
            _ => unreachable!("6-bit value"),
        };
        text.push(armored as char);
        offset += 6;
    }
    (text, fill_bits)
}
