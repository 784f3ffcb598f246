//! Standard Class B Position Report (type 18)
use super::navigation::*;
use super::parsers::*;
use super::radio_status::{ItdmaMessage, RadioStatus, SotdmaMessage};
use super::types::{AssignedMode, CarrierSense};
use super::AisMessageType;
use crate::errors::Result;
use nom::bits::{bits, complete::take as take_bits};
use nom::combinator::map;
use nom::IResult;

#[derive(Debug, PartialEq)]
pub struct StandardClassBPositionReport {
    pub message_type: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    pub speed_over_ground: Option<f32>,
    pub position_accuracy: Accuracy,
    pub longitude: Option<f32>,
    pub latitude: Option<f32>,
    pub course_over_ground: Option<f32>,
    pub true_heading: Option<u16>,
    pub timestamp: u8,
    pub cs_unit: CarrierSense,
    pub has_display: bool,
    pub has_dsc: bool,
    pub whole_band: bool,
    pub accepts_message_22: bool,
    pub assigned_mode: AssignedMode,
    pub raim: bool,
    pub radio_status: RadioStatus,
}

impl<'a> AisMessageType<'a> for StandardClassBPositionReport {
    fn name(&self) -> &'static str {
        "Standard Class B Position Report"
    }

    fn parse(data: &[u8]) -> Result<Self> {
        let (_, report) = parse_base(data)?;
        Ok(report)
    }
}

fn parse_base(data: &[u8]) -> IResult<&[u8], StandardClassBPositionReport> {
    bits(move |data| -> IResult<_, _> {
        let (data, message_type) = take_bits::<_, _, _, (_, _)>(6u8)(data)?;
        let (data, repeat_indicator) = take_bits::<_, _, _, (_, _)>(2u8)(data)?;
        let (data, mmsi) = take_bits::<_, _, _, (_, _)>(30u32)(data)?;
        let (data, _regional_reserved) = take_bits::<_, u8, _, (_, _)>(8u8)(data)?;
        let (data, speed_over_ground) =
            map(take_bits::<_, _, _, (_, _)>(10u16), parse_speed_over_ground)(data)?;
        let (data, position_accuracy) =
            map(take_bits::<_, _, _, (_, _)>(1u8), Accuracy::parse)(data)?;
        let (data, longitude) = map(|data| signed_i32(data, 28), parse_longitude)(data)?;
        let (data, latitude) = map(|data| signed_i32(data, 27), parse_latitude)(data)?;
        let (data, course_over_ground) = map(take_bits::<_, _, _, (_, _)>(12u16), parse_cog)(data)?;
        let (data, true_heading) = map(take_bits::<_, _, _, (_, _)>(9u16), parse_heading)(data)?;
        let (data, timestamp) = take_bits::<_, _, _, (_, _)>(6u8)(data)?;
        let (data, _regional_reserved) = take_bits::<_, u8, _, (_, _)>(2u8)(data)?;
        let (data, cs_unit) = map(take_bits::<_, _, _, (_, _)>(1u8), CarrierSense::parse)(data)?;
        let (data, has_display) = map(take_bits::<_, _, _, (_, _)>(1u8), u8_to_bool)(data)?;
        let (data, has_dsc) = map(take_bits::<_, _, _, (_, _)>(1u8), u8_to_bool)(data)?;
        let (data, whole_band) = map(take_bits::<_, _, _, (_, _)>(1u8), u8_to_bool)(data)?;
        let (data, accepts_message_22) = map(take_bits::<_, _, _, (_, _)>(1u8), u8_to_bool)(data)?;
        let (data, assigned_mode) =
            map(take_bits::<_, _, _, (_, _)>(1u8), AssignedMode::parse)(data)?;
        let (data, raim) = map(take_bits::<_, _, _, (_, _)>(1u8), u8_to_bool)(data)?;
        let (data, cs_selector) = take_bits::<_, _, _, (_, _)>(1u8)(data)?;
        let (data, radio_status) = match cs_selector {
            0 => SotdmaMessage::parse(data)?,
            _ => ItdmaMessage::parse(data)?,
        };
        Ok((
            data,
            StandardClassBPositionReport {
                message_type,
                repeat_indicator,
                mmsi,
                speed_over_ground,
                position_accuracy,
                longitude,
                latitude,
                course_over_ground,
                true_heading,
                timestamp,
                cs_unit,
                has_display,
                has_dsc,
                whole_band,
                accepts_message_22,
                assigned_mode,
                raim,
                radio_status,
            },
        ))
    })(data)
}

/// Inputs for building a type 18 standard Class B position report. Fields
/// left `None` encode as the NMEA "not available" sentinel for that field.
#[derive(Debug, Default, Clone)]
pub struct StandardClassBPositionReportFields {
    pub mmsi: u32,
    pub speed_over_ground: Option<f32>,
    pub longitude: Option<f32>,
    pub latitude: Option<f32>,
    pub course_over_ground: Option<f32>,
    pub true_heading: Option<u16>,
}

/// Builds the 168-bit type 18 bitstream described by `fields`, reporting a
/// carrier-sense unit with no display/DSC/message-22 support, and a SOTDMA
/// comm state synced to the reporting vessel itself (UTC direct, offset 0),
/// matching the sentinel choices `position_report::encode` makes.
pub fn encode(fields: &StandardClassBPositionReportFields) -> (Vec<u8>, super::BitCount) {
    let mut writer = BitWriter::new();
    writer.push(18, 6); // message type
    writer.push(0, 2); // repeat_indicator
    writer.push(fields.mmsi, 30);
    writer.push(0, 8); // regional reserved
    let sog = fields
        .speed_over_ground
        .map(|s| (s * 10.0).round().clamp(0.0, 1022.0) as u32)
        .unwrap_or(1023);
    writer.push(sog, 10);
    writer.push(0, 1); // position accuracy: unaugmented
    let lon = fields
        .longitude
        .map(|v| (v * 600_000.0).round() as i32)
        .unwrap_or(108_600_000);
    writer.push_signed(lon, 28);
    let lat = fields
        .latitude
        .map(|v| (v * 600_000.0).round() as i32)
        .unwrap_or(54_600_000);
    writer.push_signed(lat, 27);
    let cog = fields
        .course_over_ground
        .map(|v| (v * 10.0).round().clamp(0.0, 3599.0) as u32)
        .unwrap_or(3600);
    writer.push(cog, 12);
    writer.push(fields.true_heading.map(|v| v.min(359) as u32).unwrap_or(511), 9);
    writer.push(60, 6); // timestamp: not available
    writer.push(0, 2); // regional reserved
    writer.push(1, 1); // cs_unit: carrier sense
    writer.push(0, 1); // has_display
    writer.push(0, 1); // has_dsc
    writer.push(0, 1); // whole_band
    writer.push(0, 1); // accepts_message_22
    writer.push(0, 1); // assigned_mode: autonomous
    writer.push(0, 1); // raim: not in use
    writer.push(0, 1); // cs_selector: SOTDMA
    writer.push(0, 2); // radio status sync state: UTC direct
    writer.push(0, 3); // radio status slot timeout
    writer.push_signed(0, 14); // radio status sub-message: slot offset 0
    writer.finish()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unreadable_literal)]
    use super::*;
    use crate::messages::radio_status::{SubMessage, SyncState};
    use crate::test_helpers::*;

    #[test]
    fn test_position() {
        let bytestream = b"B6:hQDh0029Pt<4TAS003h6TSP00";
        let bitstream = crate::messages::unarmor(bytestream, 0).unwrap();
        let report = StandardClassBPositionReport::parse(&bitstream).unwrap();
        assert_eq!(report.message_type, 18);
        assert_eq!(report.repeat_indicator, 0);
        assert_eq!(report.mmsi, 413933907);
        assert_eq!(report.speed_over_ground, Some(0.0));
        assert_eq!(report.position_accuracy, Accuracy::Unaugmented);
        f32_equal_naive(report.longitude.unwrap(), 120.16217);
        f32_equal_naive(report.latitude.unwrap(), 31.924133);
        assert_eq!(report.course_over_ground, Some(0.0));
        assert_eq!(report.true_heading, Some(480));
        assert_eq!(report.timestamp, 13);
        assert_eq!(report.cs_unit, CarrierSense::CarrierSense);
        assert_eq!(report.has_display, false);
        assert_eq!(report.has_dsc, false);
        assert_eq!(report.whole_band, true);
        assert_eq!(report.assigned_mode, AssignedMode::Autonomous);
        assert_eq!(report.raim, false);
        if let RadioStatus::Itdma(radio_status) = report.radio_status {
            assert_eq!(radio_status.sync_state, SyncState::NumberOfReceivedStations);
            assert_eq!(radio_status.slot_increment, 0);
            assert_eq!(radio_status.num_slots, 0);
            assert_eq!(radio_status.keep, false);
        } else {
            panic!("Expected SOTDMA message");
        }
    }

    #[test]
    fn encode_round_trips_through_parse() {
        let fields = StandardClassBPositionReportFields {
            mmsi: 413933907,
            speed_over_ground: Some(5.5),
            longitude: Some(120.16217),
            latitude: Some(31.924133),
            course_over_ground: Some(88.0),
            true_heading: Some(90),
        };
        let (bitstream, bit_count) = encode(&fields);
        assert_eq!(bit_count, 168);
        let report = StandardClassBPositionReport::parse(&bitstream).unwrap();
        assert_eq!(report.message_type, 18);
        assert_eq!(report.mmsi, 413933907);
        assert_eq!(report.speed_over_ground, Some(5.5));
        f32_equal_naive(report.longitude.unwrap(), 120.16217);
        f32_equal_naive(report.latitude.unwrap(), 31.924133);
        assert_eq!(report.course_over_ground, Some(88.0));
        assert_eq!(report.true_heading, Some(90));
        if let RadioStatus::Sotdma(radio_status) = report.radio_status {
            assert_eq!(radio_status.sync_state, SyncState::UtcDirect);
            assert_eq!(radio_status.sub_message, SubMessage::SlotOffset(0));
        } else {
            panic!("Expected SOTDMA message");
        }
    }

    #[test]
    fn encode_defaults_absent_fields_to_sentinels() {
        let fields = StandardClassBPositionReportFields {
            mmsi: 1,
            ..Default::default()
        };
        let (bitstream, _) = encode(&fields);
        let report = StandardClassBPositionReport::parse(&bitstream).unwrap();
        assert_eq!(report.speed_over_ground, None);
        assert_eq!(report.longitude, None);
        assert_eq!(report.latitude, None);
        assert_eq!(report.course_over_ground, None);
        assert_eq!(report.true_heading, None);
    }
}
