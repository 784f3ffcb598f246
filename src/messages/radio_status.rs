//! Communication state (SOTDMA/ITDMA) shared by the class A position
//! reports and the base station / UTC response messages.
use super::parsers::signed_i32;
use crate::errors::Error;
use nom::bits::complete::take as take_bits;
use nom::combinator::{map, map_res};
use nom::IResult;

#[derive(Debug, PartialEq, Eq)]
pub enum RadioStatus {
    Sotdma(SotdmaMessage),
    Itdma(ItdmaMessage),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SyncState {
    UtcDirect,
    UtcIndirect,
    BaseStation,
    NumberOfReceivedStations,
}

impl SyncState {
    pub fn parse(data: u8) -> std::result::Result<Self, Error> {
        match data {
            0 => Ok(SyncState::UtcDirect),
            1 => Ok(SyncState::UtcIndirect),
            2 => Ok(SyncState::BaseStation),
            3 => Ok(SyncState::NumberOfReceivedStations),
            _ => unreachable!("2-bit field"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubMessage {
    SlotOffset(i16),
    UtcHourAndMinute(u8, u8),
    SlotNumber(u16),
    ReceivedStations(u16),
}

impl SubMessage {
    fn parse(
        input: (&[u8], usize),
        slot_timeout: u8,
    ) -> IResult<(&[u8], usize), SubMessage> {
        match slot_timeout {
            0 => map(|i| signed_i32(i, 14), |v| SubMessage::SlotOffset(v as i16))(input),
            1 => map(Self::utc_hour_and_minute, |(h, m)| {
                SubMessage::UtcHourAndMinute(h, m)
            })(input),
            2 | 4 | 6 => map(take_bits::<_, u16, _, (_, _)>(14u8), SubMessage::SlotNumber)(input),
            _ => map(
                take_bits::<_, u16, _, (_, _)>(14u8),
                SubMessage::ReceivedStations,
            )(input),
        }
    }

    fn utc_hour_and_minute(
        input: (&[u8], usize),
    ) -> IResult<(&[u8], usize), (u8, u8)> {
        let (input, hour) = take_bits::<_, u8, _, (_, _)>(5u8)(input)?;
        let (input, _) = take_bits::<_, u8, _, (_, _)>(1u8)(input)?;
        let (input, minute) = take_bits::<_, u8, _, (_, _)>(6u8)(input)?;
        let (input, _) = take_bits::<_, u8, _, (_, _)>(2u8)(input)?;
        Ok((input, (hour, minute)))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SotdmaMessage {
    pub sync_state: SyncState,
    pub slot_timeout: u8,
    pub sub_message: SubMessage,
}

impl SotdmaMessage {
    pub fn parse(data: (&[u8], usize)) -> IResult<(&[u8], usize), RadioStatus> {
        let (data, sync_state) = map_res(take_bits(2u8), SyncState::parse)(data)?;
        let (data, slot_timeout) = take_bits(3u8)(data)?;
        let (data, sub_message) = SubMessage::parse(data, slot_timeout)?;
        Ok((
            data,
            RadioStatus::Sotdma(Self {
                sync_state,
                slot_timeout,
                sub_message,
            }),
        ))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ItdmaMessage {
    pub sync_state: SyncState,
    pub slot_increment: i16,
    pub num_slots: u8,
    pub keep: bool,
}

impl ItdmaMessage {
    pub fn parse(data: (&[u8], usize)) -> IResult<(&[u8], usize), RadioStatus> {
        let (data, sync_state) = map_res(take_bits(2u8), SyncState::parse)(data)?;
        let (data, slot_increment) = map(|i| signed_i32(i, 13), |v| v as i16)(data)?;
        let (data, num_slots) = take_bits(3u8)(data)?;
        let (data, keep) = map(take_bits::<_, u8, _, (_, _)>(1u8), |v| v != 0)(data)?;
        Ok((
            data,
            RadioStatus::Itdma(Self {
                sync_state,
                slot_increment,
                num_slots,
                keep,
            }),
        ))
    }
}

/// Dispatches to the SOTDMA or ITDMA comm-state parser based on message
/// type. Types 1, 2, 4, 9 and 11 all carry a SOTDMA-style state; type 3
/// is the only one that ever carries ITDMA. Type 18 has its own
/// class-B-specific selector bit and does not go through here.
pub fn parse_radio(
    input: (&[u8], usize),
    msg_type: u8,
) -> IResult<(&[u8], usize), RadioStatus> {
    match msg_type {
        1 | 2 | 4 | 9 | 11 => SotdmaMessage::parse(input),
        3 => ItdmaMessage::parse(input),
        _ => Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Switch,
        ))),
    }
}
