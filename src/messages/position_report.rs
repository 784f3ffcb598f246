//! Position Report (types 1-3)
use super::navigation::*;
use super::parsers::*;
use super::radio_status::{parse_radio, RadioStatus};
use super::types::ManeuverIndicator;
use super::AisMessageType;
use crate::errors::Result;
use nom::bits::{bits, complete::take as take_bits};
use nom::combinator::map;
use nom::IResult;

#[derive(Debug, PartialEq)]
pub struct PositionReport {
    pub message_type: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    pub navigation_status: Option<NavigationStatus>,
    pub rate_of_turn: Option<RateOfTurn>,
    pub speed_over_ground: Option<f32>,
    pub position_accuracy: Accuracy,
    pub longitude: Option<f32>,
    pub latitude: Option<f32>,
    pub course_over_ground: Option<f32>,
    pub true_heading: Option<u16>,
    pub timestamp: u8,
    pub maneuver_indicator: Option<ManeuverIndicator>,
    pub raim: bool,
    pub radio_status: RadioStatus,
}

impl<'a> AisMessageType<'a> for PositionReport {
    fn name(&self) -> &'static str {
        "Position Report Class A"
    }

    fn parse(data: &[u8]) -> Result<Self> {
        let (_, report) = parse_base(data)?;
        Ok(report)
    }
}

fn parse_base(data: &[u8]) -> IResult<&[u8], PositionReport> {
    bits(move |data| -> IResult<_, _> {
        let (data, message_type) = take_bits(6u8)(data)?;
        let (data, repeat_indicator) = take_bits(2u8)(data)?;
        let (data, mmsi) = take_bits(30u32)(data)?;
        let (data, navigation_status) = map(take_bits(4u8), NavigationStatus::parse)(data)?;
        let (data, rate_of_turn) = map(take_bits(8u8), RateOfTurn::parse)(data)?;
        let (data, speed_over_ground) = map(take_bits(10u16), parse_speed_over_ground)(data)?;
        let (data, position_accuracy) = map(take_bits(1u8), Accuracy::parse)(data)?;
        let (data, longitude) = map(|data| signed_i32(data, 28), parse_longitude)(data)?;
        let (data, latitude) = map(|data| signed_i32(data, 27), parse_latitude)(data)?;
        let (data, course_over_ground) = map(take_bits(12u16), parse_cog)(data)?;
        let (data, true_heading) = map(take_bits(9u16), parse_heading)(data)?;
        let (data, timestamp) = take_bits(6u8)(data)?;
        let (data, maneuver_indicator) = map(take_bits(2u8), ManeuverIndicator::parse)(data)?;
        let (data, _spare) = take_bits::<_, u8, _, _>(3u8)(data)?;
        let (data, raim) = map(take_bits(1u8), u8_to_bool)(data)?;
        let (data, radio_status) = parse_radio(data, message_type)?;
        Ok((
            data,
            PositionReport {
                message_type,
                repeat_indicator,
                mmsi,
                navigation_status,
                rate_of_turn,
                speed_over_ground,
                position_accuracy,
                longitude,
                latitude,
                course_over_ground,
                true_heading,
                timestamp,
                maneuver_indicator,
                raim,
                radio_status,
            },
        ))
    })(data)
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NavigationStatus {
    UnderWayUsingEngine,
    AtAnchor,
    NotUnderCommand,
    RestrictedManouverability,
    ConstrainedByDraught,
    Moored,
    Aground,
    EngagedInFishing,
    UnderWaySailing,
    ReservedForHSC,
    ReservedForWIG,
    Reserved01,
    Reserved02,
    Reserved03,
    AisSartIsActive,
    Unknown(u8),
}

impl NavigationStatus {
    pub fn parse(data: u8) -> Option<Self> {
        match data {
            0 => Some(Self::UnderWayUsingEngine),
            1 => Some(Self::AtAnchor),
            2 => Some(Self::NotUnderCommand),
            3 => Some(Self::RestrictedManouverability),
            4 => Some(Self::ConstrainedByDraught),
            5 => Some(Self::Moored),
            6 => Some(Self::Aground),
            7 => Some(Self::EngagedInFishing),
            8 => Some(Self::UnderWaySailing),
            9 => Some(Self::ReservedForHSC),
            10 => Some(Self::ReservedForWIG),
            11 => Some(Self::Reserved01),
            12 => Some(Self::Reserved02),
            13 => Some(Self::Reserved03),
            14 => Some(Self::AisSartIsActive),
            15 => None,
            _ => Some(Self::Unknown(data)),
        }
    }
}

/// Inputs for building a Class A position report (types 1 and 2; type 3's
/// ITDMA comm state is not supported here). Fields left `None` encode as
/// the NMEA "not available" sentinel for that field.
#[derive(Debug, Default, Clone)]
pub struct PositionReportFields {
    pub message_type: u8,
    pub mmsi: u32,
    pub navigation_status: Option<NavigationStatus>,
    pub speed_over_ground: Option<f32>,
    pub longitude: Option<f32>,
    pub latitude: Option<f32>,
    pub course_over_ground: Option<f32>,
    pub true_heading: Option<u16>,
}

fn navigation_status_code(status: NavigationStatus) -> u8 {
    match status {
        NavigationStatus::UnderWayUsingEngine => 0,
        NavigationStatus::AtAnchor => 1,
        NavigationStatus::NotUnderCommand => 2,
        NavigationStatus::RestrictedManouverability => 3,
        NavigationStatus::ConstrainedByDraught => 4,
        NavigationStatus::Moored => 5,
        NavigationStatus::Aground => 6,
        NavigationStatus::EngagedInFishing => 7,
        NavigationStatus::UnderWaySailing => 8,
        NavigationStatus::ReservedForHSC => 9,
        NavigationStatus::ReservedForWIG => 10,
        NavigationStatus::Reserved01 => 11,
        NavigationStatus::Reserved02 => 12,
        NavigationStatus::Reserved03 => 13,
        NavigationStatus::AisSartIsActive => 14,
        NavigationStatus::Unknown(code) => code,
    }
}

/// Builds the 168-bit Class A position report bitstream described by
/// `fields`, a SOTDMA comm state synced to the reporting vessel itself
/// (sync state "UTC direct", slot offset 0).
pub fn encode(fields: &PositionReportFields) -> (Vec<u8>, super::BitCount) {
    let mut writer = BitWriter::new();
    writer.push(fields.message_type as u32, 6);
    writer.push(0, 2); // repeat_indicator
    writer.push(fields.mmsi, 30);
    writer.push(
        fields
            .navigation_status
            .map(navigation_status_code)
            .unwrap_or(15) as u32,
        4,
    );
    writer.push_signed(-128, 8); // rate of turn: not available
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
    writer.push(0, 2); // maneuver indicator: not available
    writer.push(0, 3); // spare
    writer.push(0, 1); // raim: not in use
    writer.push(0, 2); // radio status sync state: UTC direct
    writer.push(0, 3); // radio status slot timeout
    writer.push_signed(0, 14); // radio status sub-message: slot offset 0
    writer.finish()
}
