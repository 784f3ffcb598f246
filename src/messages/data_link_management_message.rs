//! Data Link Management Message (type 20)
use super::AisMessageType;
use crate::errors::Result;
use nom::bits::{bits, complete::take as take_bits};
use nom::multi::many_m_n;
use nom::IResult;

#[derive(Debug, PartialEq, Eq)]
pub struct SlotReservation {
    pub offset: u16,
    pub num_slots: u8,
    pub timeout: u8,
    pub increment: u16,
}

impl SlotReservation {
    pub fn parse(data: (&[u8], usize)) -> IResult<(&[u8], usize), Self> {
        let (data, offset) = take_bits(12u16)(data)?;
        let (data, num_slots) = take_bits(4u8)(data)?;
        let (data, timeout) = take_bits(3u8)(data)?;
        let (data, increment) = take_bits(11u16)(data)?;
        Ok((
            data,
            Self {
                offset,
                num_slots,
                timeout,
                increment,
            },
        ))
    }
}

pub type SlotReservationList = Vec<SlotReservation>;

#[derive(Debug, PartialEq, Eq)]
pub struct DataLinkManagementMessage {
    pub message_type: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    pub reservations: SlotReservationList,
}

impl<'a> AisMessageType<'a> for DataLinkManagementMessage {
    fn name(&self) -> &'static str {
        "Data Link Management Message"
    }

    fn parse(data: &'a [u8]) -> Result<Self> {
        let (_, report) = parse_base(data)?;
        Ok(report)
    }
}

fn parse_base<'a>(data: &'a [u8]) -> IResult<&'a [u8], DataLinkManagementMessage> {
    bits(move |data: (&'a [u8], usize)| -> IResult<_, _> {
        let (data, message_type) = take_bits(6u8)(data)?;
        let (data, repeat_indicator) = take_bits(2u8)(data)?;
        let (data, mmsi) = take_bits(30u32)(data)?;
        let (data, _spare) = take_bits::<_, u8, _, _>(2u8)(data)?;
        let (data, reservations) = many_m_n(1, 4, SlotReservation::parse)(data)?;
        Ok((
            data,
            DataLinkManagementMessage {
                message_type,
                repeat_indicator,
                mmsi,
                reservations,
            },
        ))
    })(data)
}
