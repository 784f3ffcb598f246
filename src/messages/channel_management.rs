//! Channel Management (type 22)
use super::navigation::{parse_latitude_min10, parse_longitude_min10};
use super::parsers::*;
use super::AisMessageType;
use crate::errors::Result;
use nom::bits::{bits, complete::take as take_bits};
use nom::combinator::map;
use nom::IResult;

/// The region a base station assigns either by geographic corners
/// (broadcast) or by naming the two mobile stations directly (addressed).
#[derive(Debug, PartialEq)]
pub enum ChannelManagementTarget {
    Broadcast {
        ne_longitude: Option<f32>,
        ne_latitude: Option<f32>,
        sw_longitude: Option<f32>,
        sw_latitude: Option<f32>,
    },
    Addressed {
        dest_mmsi_1: u32,
        dest_mmsi_2: u32,
    },
}

#[derive(Debug, PartialEq)]
pub struct ChannelManagement {
    pub message_type: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    pub channel_a: u16,
    pub channel_b: u16,
    pub tx_rx_mode: u8,
    pub power_low: bool,
    pub target: ChannelManagementTarget,
    pub addressed: bool,
    pub band_a: bool,
    pub band_b: bool,
    pub zone_size: u8,
}

impl<'a> AisMessageType<'a> for ChannelManagement {
    fn name(&self) -> &'static str {
        "Channel Management"
    }

    fn parse(data: &'a [u8]) -> Result<Self> {
        let (_, report) = parse_base(data)?;
        Ok(report)
    }
}

fn parse_base(data: &[u8]) -> IResult<&[u8], ChannelManagement> {
    bits(move |data| -> IResult<_, _> {
        let (data, message_type) = take_bits(6u8)(data)?;
        let (data, repeat_indicator) = take_bits(2u8)(data)?;
        let (data, mmsi) = take_bits(30u32)(data)?;
        let (data, _spare) = take_bits::<_, u8, _, _>(2u8)(data)?;
        let (data, channel_a) = take_bits(12u16)(data)?;
        let (data, channel_b) = take_bits(12u16)(data)?;
        let (data, tx_rx_mode) = take_bits(4u8)(data)?;
        let (data, power_low) = map(take_bits(1u8), u8_to_bool)(data)?;

        // Whether the region is given as two mobile stations or as a
        // bounding box is only known from the `addressed` flag, which sits
        // after this 70-bit slot; peek past it on a throwaway cursor first.
        let addressed_peek = {
            let cursor = data;
            let (cursor, _) = take_bits::<_, u32, _, _>(32u8)(cursor)?;
            let (cursor, _) = take_bits::<_, u32, _, _>(32u8)(cursor)?;
            let (cursor, _) = take_bits::<_, u8, _, _>(6u8)(cursor)?;
            let (_, flag) = take_bits::<_, u8, _, _>(1u8)(cursor)?;
            flag
        };
        let (data, target) = if addressed_peek == 0 {
            let (data, ne_longitude) =
                map(|d| signed_i32(d, 18), parse_longitude_min10)(data)?;
            let (data, ne_latitude) = map(|d| signed_i32(d, 17), parse_latitude_min10)(data)?;
            let (data, sw_longitude) =
                map(|d| signed_i32(d, 18), parse_longitude_min10)(data)?;
            let (data, sw_latitude) = map(|d| signed_i32(d, 17), parse_latitude_min10)(data)?;
            (
                data,
                ChannelManagementTarget::Broadcast {
                    ne_longitude,
                    ne_latitude,
                    sw_longitude,
                    sw_latitude,
                },
            )
        } else {
            let (data, dest_mmsi_1) = take_bits(30u32)(data)?;
            let (data, _spare) = take_bits::<_, u8, _, _>(2u8)(data)?;
            let (data, dest_mmsi_2) = take_bits(30u32)(data)?;
            let (data, _spare) = take_bits::<_, u8, _, _>(8u8)(data)?;
            (
                data,
                ChannelManagementTarget::Addressed {
                    dest_mmsi_1,
                    dest_mmsi_2,
                },
            )
        };
        let (data, addressed) = map(take_bits(1u8), u8_to_bool)(data)?;
        let (data, band_a) = map(take_bits(1u8), u8_to_bool)(data)?;
        let (data, band_b) = map(take_bits(1u8), u8_to_bool)(data)?;
        let (data, zone_size) = take_bits(3u8)(data)?;
        Ok((
            data,
            ChannelManagement {
                message_type,
                repeat_indicator,
                mmsi,
                channel_a,
                channel_b,
                tx_rx_mode,
                power_low,
                target,
                addressed,
                band_a,
                band_b,
                zone_size,
            },
        ))
    })(data)
}
