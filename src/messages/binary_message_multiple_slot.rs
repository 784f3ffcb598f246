//! Binary Message, Multiple Slot (type 26)
use super::binary_message_single_slot::ApplicationId;
use super::radio_status::{ItdmaMessage, RadioStatus, SotdmaMessage};
use super::AisMessageType;
use crate::errors::Result;
use nom::bits::{bits, complete::take as take_bits};
use nom::IResult;

pub type MessageData = Vec<u8>;

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

/// Like type 25, but spans up to five slots and carries a trailing
/// communication-state field (the same SOTDMA/ITDMA shape as the position
/// reports).
#[derive(Debug, PartialEq)]
pub struct BinaryMessageMultipleSlot {
    pub message_type: u8,
    pub repeat_indicator: u8,
    pub mmsi: u32,
    pub body: BinaryMessageBody,
    pub radio_status: RadioStatus,
}

impl<'a> AisMessageType<'a> for BinaryMessageMultipleSlot {
    fn name(&self) -> &'static str {
        "Binary Message, Multiple Slot"
    }

    fn parse(data: &'a [u8]) -> Result<Self> {
        let (_, report) = parse_base(data)?;
        Ok(report)
    }
}

fn parse_base(data: &[u8]) -> IResult<&[u8], BinaryMessageMultipleSlot> {
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

        // The trailing 21 bits are the communication-state selector + value;
        // everything in between is raw application data. Pull it a byte at a
        // time so this keeps working once the payload exceeds 8 bytes (a
        // single wide take_bits read would overflow its accumulator).
        let total_remaining = data.0.len() * 8 - data.1;
        let data_bits = total_remaining.saturating_sub(21);
        let data_bytes = data_bits / 8;
        let mut data_owned = Vec::with_capacity(data_bytes);
        let mut data = data;
        for _ in 0..data_bytes {
            let (next, byte) = take_bits::<_, u8, _, _>(8u8)(data)?;
            data_owned.push(byte);
            data = next;
        }

        let (data, cs_selector) = take_bits::<_, u8, _, _>(1u8)(data)?;
        let (data, radio_status) = match cs_selector {
            0 => SotdmaMessage::parse(data)?,
            _ => ItdmaMessage::parse(data)?,
        };

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
            data,
            BinaryMessageMultipleSlot {
                message_type,
                repeat_indicator,
                mmsi,
                body,
                radio_status,
            },
        ))
    })(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::radio_status::SyncState;

    #[test]
    fn test_type26_broadcast_unstructured() {
        let fields: Vec<(u64, usize)> = vec![
            (26, 6),
            (0, 2),
            (123456, 30),
            (0, 1),
            (0, 1),
            (0xABCD, 16),
            // communication state: selector=0 (SOTDMA), sync_state=0, slot_timeout=1 (utc/hour-minute), hour=17, minute=21
            (0, 1),
            (0, 2),
            (1, 3),
            (17, 5),
            (0, 1),
            (21, 6),
            (0, 2),
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
        let message = BinaryMessageMultipleSlot::parse(&bytes).unwrap();
        assert_eq!(message.message_type, 26);
        match message.body {
            BinaryMessageBody::Broadcast { ref data } => {
                assert_eq!(data.len(), 2);
                assert_eq!(data[0], 0xAB);
                assert_eq!(data[1], 0xCD);
            }
            _ => panic!("Expected unstructured broadcast"),
        }
        if let RadioStatus::Sotdma(radio) = message.radio_status {
            assert_eq!(radio.sync_state, SyncState::UtcDirect);
        } else {
            panic!("Expected SOTDMA radio status");
        }
    }
}
