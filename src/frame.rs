use crate::message::{DataWord, Dlc, DlcError, IdentifierField};
use embedded_can::{Frame, Id};

/// Classic CAN frame as written to the transmit registers or read from the RX FIFO
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CanFrame {
    pub identifier: Id,
    pub rtr: bool,
    /// Data length code, 0-15. Codes above 8 still carry 8 bytes
    pub dlc: u8,
    pub data: [u8; 8],
}

impl CanFrame {
    /// Assembles a frame from decoded register contents
    pub(crate) fn from_parts(identifier: IdentifierField, dlc: Dlc, words: [u32; 2]) -> Self {
        let (identifier, rtr) = identifier.id();
        let mut data = [0u8; 8];

        DataWord::First.unpack(words[0], &mut data);
        DataWord::Second.unpack(words[1], &mut data);

        Self {
            identifier,
            rtr,
            dlc: dlc.value(),
            data,
        }
    }

    /// Register value of the identifier field
    pub fn identifier_field(&self) -> IdentifierField {
        IdentifierField::new(self.identifier, self.rtr)
    }

    /// Validated data length code
    pub fn length_code(&self) -> Result<Dlc, DlcError> {
        Dlc::new(self.dlc)
    }

    /// Payload packed into the two data word registers
    pub fn data_words(&self) -> [u32; 2] {
        [DataWord::First.pack(&self.data), DataWord::Second.pack(&self.data)]
    }
}

impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }

        let mut frame = CanFrame {
            identifier: id.into(),
            rtr: false,
            dlc: data.len() as u8,
            data: [0; 8],
        };
        frame.data[..data.len()].copy_from_slice(data);
        Some(frame)
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > 8 {
            return None;
        }

        Some(CanFrame {
            identifier: id.into(),
            rtr: true,
            dlc: dlc as u8,
            data: [0; 8],
        })
    }

    fn is_extended(&self) -> bool {
        matches!(self.identifier, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.rtr
    }

    fn id(&self) -> Id {
        self.identifier
    }

    fn dlc(&self) -> usize {
        self.dlc as usize
    }

    fn data(&self) -> &[u8] {
        if self.rtr {
            return &[];
        }

        &self.data[..(self.dlc as usize).min(8)]
    }
}
