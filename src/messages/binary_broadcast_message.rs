//! Binary Broadcast Message (type 8)
use super::parsers::parse_6bit_ascii;
use super::AisMessageType;
use crate::errors::Result;
use nom::bits::{bits, complete::take as take_bits};
use nom::IResult;

pub type MessageData = Vec<u8>;

#[derive(Debug, PartialEq, Eq)]
pub struct BinaryBroadcastMessage {
    pub message_type: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    /// Designated area code
    pub dac: u16,
    /// Functional ID
    pub fid: u8,
    pub data: MessageData,
    /// Best-effort decode of the DAC=200/FID=10 Inland AIS "ship static and
    /// voyage related data" application message. `None` for every other
    /// DAC/FID pair, or if `data` is too short to hold the fixed fields.
    pub inland_static_data: Option<InlandVesselStaticData>,
}

/// ERI (European River Information) vessel static data, carried as a
/// regional binary application message under DAC 200, FID 10.
#[derive(Debug, PartialEq, Eq)]
pub struct InlandVesselStaticData {
    /// European Vessel Identification Number, as its decimal digit string.
    pub eni_number: String,
    pub length_decimetres: u16,
    pub beam_decimetres: u16,
    /// ERI ship/combination type code (see the ERI classification table).
    pub ship_type: u16,
    pub loaded: LoadedStatus,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum LoadedStatus {
    NotAvailable,
    Loaded,
    Unloaded,
    NotUsed,
}

impl LoadedStatus {
    fn parse(code: u8) -> Self {
        match code {
            1 => Self::Loaded,
            2 => Self::Unloaded,
            3 => Self::NotUsed,
            _ => Self::NotAvailable,
        }
    }
}

impl<'a> AisMessageType<'a> for BinaryBroadcastMessage {
    fn name(&self) -> &'static str {
        "Binary Broadcast Message"
    }

    fn parse(data: &'a [u8]) -> Result<Self> {
        let (_, report) = parse_base(data)?;
        Ok(report)
    }
}

fn parse_base<'a>(data: &'a [u8]) -> IResult<&'a [u8], BinaryBroadcastMessage> {
    bits(move |data: (&'a [u8], usize)| -> IResult<_, _> {
        let (data, message_type) = take_bits(6u8)(data)?;
        let (data, repeat_indicator) = take_bits(2u8)(data)?;
        let (data, mmsi) = take_bits(30u32)(data)?;
        let (data, _spare) = take_bits::<_, u8, _, _>(2u8)(data)?;
        let (data, dac) = take_bits(10u16)(data)?;
        let (data, fid) = take_bits(6u8)(data)?;
        let data_owned = data.0.to_vec();
        let inland_static_data = if dac == 200 && fid == 10 {
            parse_inland_static_data(data).ok().map(|(_, parsed)| parsed)
        } else {
            None
        };
        Ok((
            (<&[u8]>::default(), 0),
            BinaryBroadcastMessage {
                message_type,
                repeat_indicator,
                mmsi,
                dac,
                fid,
                data: data_owned,
                inland_static_data,
            },
        ))
    })(data)
}

/// Parses the fixed-position fields of an ERI ship static data message
/// (DAC 200, FID 10) out of the binary application data that follows the
/// FID. Hazardous cargo and draught are read but not kept: the crate has no
/// ERI hazard classification table, and draught is already carried more
/// generically on the vessel's own position reports.
fn parse_inland_static_data<'a>(
    data: (&'a [u8], usize),
) -> IResult<(&'a [u8], usize), InlandVesselStaticData> {
    let (data, eni_number) = parse_6bit_ascii(data, 48)?;
    let (data, length_decimetres) = take_bits(13u16)(data)?;
    let (data, beam_decimetres) = take_bits(10u16)(data)?;
    let (data, ship_type) = take_bits(14u16)(data)?;
    let (data, _hazardous_cargo) = take_bits::<_, u8, _, _>(3u8)(data)?;
    let (data, _draught_centimetres) = take_bits::<_, u16, _, _>(11u8)(data)?;
    let (data, loaded) = take_bits::<_, u8, _, _>(2u8)(data)?;
    Ok((
        data,
        InlandVesselStaticData {
            eni_number,
            length_decimetres,
            beam_decimetres,
            ship_type,
            loaded: LoadedStatus::parse(loaded),
        },
    ))
}
