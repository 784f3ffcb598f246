//! Binary Message, Single Slot (type 25)
use super::parsers::*;
use super::AisMessageType;
use crate::errors::Result;
use nom::bits::{bits, complete::take as take_bits};
use nom::IResult;

pub type MessageData = Vec<u8>;

/// Application identifier (DAC/FID) carried when `structured` is set.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ApplicationId {
    pub dac: u16,
    pub fid: u8,
}

/// The four shapes this message can take, selected by the `addressed` and
/// `structured` flag bits.
#[derive(Debug, PartialEq)]
pub enum BinaryMessageBody {
    Broadcast { data: MessageData },
    BroadcastStructured { app_id: ApplicationId, data: MessageData },
    Addressed { dest_mmsi: u32, data: MessageData },
    AddressedStructured {
        dest_mmsi: u32,
        app_id: ApplicationId,
        data: MessageData,
    },
}

#[derive(Debug, PartialEq)]
pub struct BinaryMessageSingleSlot {
    pub message_type: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    pub body: BinaryMessageBody,
}

impl<'a> AisMessageType<'a> for BinaryMessageSingleSlot {
    fn name(&self) -> &'static str {
        "Binary Message, Single Slot"
    }

    fn parse(data: &'a [u8]) -> Result<Self> {
        let (_, report) = parse_base(data)?;
        Ok(report)
    }
}

fn parse_base(data: &[u8]) -> IResult<&[u8], BinaryMessageSingleSlot> {
    bits(move |data| -> IResult<_, _> {
        let (data, message_type) = take_bits(6u8)(data)?;
        let (data, repeat_indicator) = take_bits(2u8)(data)?;
        let (data, mmsi) = take_bits(30u32)(data)?;
        let (data, addressed) = take_bits::<_, u8, _, _>(1u8)(data)?;
        let (data, structured) = take_bits::<_, u8, _, _>(1u8)(data)?;

        let (data, dest_mmsi) = if addressed != 0 {
            let (data, dest_mmsi) = take_bits(30u32)(data)?;
            (data, Some(dest_mmsi))
        } else {
            (data, None)
        };
        let (data, app_id) = if structured != 0 {
            let (data, dac) = take_bits(10u16)(data)?;
            let (data, fid) = take_bits(6u8)(data)?;
            (data, Some(ApplicationId { dac, fid }))
        } else {
            (data, None)
        };
        let data_owned = data.0.to_vec();

        let body = match (dest_mmsi, app_id) {
            (None, None) => BinaryMessageBody::Broadcast { data: data_owned },
            (None, Some(app_id)) => BinaryMessageBody::BroadcastStructured {
                app_id,
                data: data_owned,
            },
            (Some(dest_mmsi), None) => BinaryMessageBody::Addressed {
                dest_mmsi,
                data: data_owned,
            },
            (Some(dest_mmsi), Some(app_id)) => BinaryMessageBody::AddressedStructured {
                dest_mmsi,
                app_id,
                data: data_owned,
            },
        };
        Ok((
            (<&[u8]>::default(), 0),
            BinaryMessageSingleSlot {
                message_type,
                repeat_indicator,
                mmsi,
                body,
            },
        ))
    })(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type25_broadcast_unstructured() {
        // type=25, repeat=0, mmsi=123456, addressed=0, structured=0, data=0xABCD
        let bitstream: [u8; 8] = [0x64, 0x00, 0x07, 0x89, 0x00, 0xAB, 0xCD, 0x00];
        let message = BinaryMessageSingleSlot::parse(&bitstream).unwrap();
        assert_eq!(message.message_type, 25);
        assert_eq!(message.mmsi, 123456);
        match message.body {
            BinaryMessageBody::Broadcast { ref data } => {
                assert_eq!(data[0], 0xAB);
            }
            _ => panic!("Expected unstructured broadcast"),
        }
    }

    #[test]
    fn test_type25_addressed_structured() {
        let fields: Vec<(u64, usize)> = vec![
            (25, 6),
            (0, 2),
            (123456, 30),
            (1, 1),
            (1, 1),
            (200, 30),
            (200, 10),
            (10, 6),
        ];
        let mut bits = Vec::new();
        for (val, width) in fields {
            for i in (0..width).rev() {
                bits.push(((val >> i) & 1) as u8);
            }
        }
        while bits.len() % 8 != 0 {
            bits.push(0);
        }
        let bytes: Vec<u8> = bits
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b))
            .collect();
        let message = BinaryMessageSingleSlot::parse(&bytes).unwrap();
        match message.body {
            BinaryMessageBody::AddressedStructured {
                dest_mmsi, app_id, ..
            } => {
                assert_eq!(dest_mmsi, 200);
                assert_eq!(app_id.dac, 200);
                assert_eq!(app_id.fid, 10);
            }
            _ => panic!("Expected addressed structured"),
        }
    }
}
