//! Assignment Mode Command (type 16)

use super::parsers::*;
use super::AisMessageType;
use crate::errors::Result;
use nom::bits::{bits, complete::take as take_bits};
use nom::IResult;

#[derive(Debug, PartialEq, Eq)]
pub struct AssignmentModeCommand {
    pub message_type: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    pub mmsi1: u32,
    pub offset1: u16,
    pub increment1: u16,
    pub mmsi2: Option<u32>,
    pub offset2: Option<u16>,
    pub increment2: Option<u16>,
}

impl<'a> AisMessageType<'a> for AssignmentModeCommand {
    fn name(&self) -> &'static str {
        "Assignment Mode Command"
    }

    fn parse(data: &'a [u8]) -> Result<Self> {
        let (_, report) = parse_base(data)?;
        Ok(report)
    }
}

fn parse_base(data: &[u8]) -> IResult<&[u8], AssignmentModeCommand> {
    bits(move |data| -> IResult<_, _> {
        let (data, message_type) = take_bits(6u8)(data)?;
        let (data, repeat_indicator) = take_bits(2u8)(data)?;
        let (data, mmsi) = take_bits(30u32)(data)?;
        let (data, _spare) = take_bits::<_, u8, _, _>(2u8)(data)?;

        let (data, mmsi1) = take_bits(30u32)(data)?;
        let (data, offset1) = take_bits(12u16)(data)?;
        let (data, increment1) = take_bits(10u16)(data)?;

        // Check for remaining bits, if there are enough bits for the second station
        let remaining_bits = remaining_bits(data);

        if remaining_bits >= 52 {
            let (data, mmsi2) = take_bits(30u32)(data)?;
            let (data, offset2) = take_bits(12u16)(data)?;
            let (data, increment2) = take_bits(10u16)(data)?;

            Ok((
                data,
                AssignmentModeCommand {
                    message_type,
                    repeat_indicator,
                    mmsi,
                    mmsi1,
                    offset1,
                    increment1,
                    mmsi2: Some(mmsi2),
                    offset2: Some(offset2),
                    increment2: Some(increment2),
                },
            ))
        } else {
            // Only one station assignment
            Ok((
                data,
                AssignmentModeCommand {
                    message_type,
                    repeat_indicator,
                    mmsi,
                    mmsi1,
                    offset1,
                    increment1,
                    mmsi2: None,
                    offset2: None,
                    increment2: None,
                },
            ))
        }
    })(data)
}
