//! Instruction wire format
//!
//! One discriminator byte followed by little-endian fields. All reads are
//! bounds checked and fail with `InvalidInstructionData`.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

/// Instruction discriminators
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmInstructionTag {
    Initialize = 0,
    Deposit = 1,
    Withdraw = 2,
    Swap = 3,
    Lock = 4,
    Unlock = 5,
}

impl TryFrom<u8> for AmmInstructionTag {
    type Error = ProgramError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Initialize),
            1 => Ok(Self::Deposit),
            2 => Ok(Self::Withdraw),
            3 => Ok(Self::Swap),
            4 => Ok(Self::Lock),
            5 => Ok(Self::Unlock),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}

/// Decoded instruction with its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmInstruction {
    Initialize {
        seed: u64,
        fee_bps: u16,
        authority: Option<Pubkey>,
    },
    Deposit {
        lp_amount: u64,
        max_x: u64,
        max_y: u64,
    },
    Withdraw {
        lp_amount: u64,
        min_x: u64,
        min_y: u64,
    },
    Swap {
        x_to_y: bool,
        amount_in: u64,
        min_amount_out: u64,
    },
    Lock,
    Unlock,
}

impl AmmInstruction {
    /// Longest encoding (Initialize with an authority)
    pub const MAX_LEN: usize = 1 + 8 + 2 + 1 + 32;

    pub fn tag(&self) -> AmmInstructionTag {
        match self {
            Self::Initialize { .. } => AmmInstructionTag::Initialize,
            Self::Deposit { .. } => AmmInstructionTag::Deposit,
            Self::Withdraw { .. } => AmmInstructionTag::Withdraw,
            Self::Swap { .. } => AmmInstructionTag::Swap,
            Self::Lock => AmmInstructionTag::Lock,
            Self::Unlock => AmmInstructionTag::Unlock,
        }
    }

    /// Decode from raw instruction data
    pub fn unpack(data: &[u8]) -> Result<Self, ProgramError> {
        let mut reader = InstructionReader::new(data);
        let tag = AmmInstructionTag::try_from(reader.read_u8()?)?;

        let ix = match tag {
            AmmInstructionTag::Initialize => {
                let seed = reader.read_u64()?;
                let fee_bps = reader.read_u16()?;
                let authority = match reader.read_u8()? {
                    0 => None,
                    1 => Some(reader.read_bytes::<32>()?),
                    _ => return Err(ProgramError::InvalidInstructionData),
                };
                Self::Initialize { seed, fee_bps, authority }
            }
            AmmInstructionTag::Deposit => Self::Deposit {
                lp_amount: reader.read_u64()?,
                max_x: reader.read_u64()?,
                max_y: reader.read_u64()?,
            },
            AmmInstructionTag::Withdraw => Self::Withdraw {
                lp_amount: reader.read_u64()?,
                min_x: reader.read_u64()?,
                min_y: reader.read_u64()?,
            },
            AmmInstructionTag::Swap => Self::Swap {
                x_to_y: reader.read_bool()?,
                amount_in: reader.read_u64()?,
                min_amount_out: reader.read_u64()?,
            },
            AmmInstructionTag::Lock => Self::Lock,
            AmmInstructionTag::Unlock => Self::Unlock,
        };

        Ok(ix)
    }

    /// Encode into `out`, returning the number of bytes written
    pub fn pack(&self, out: &mut [u8; Self::MAX_LEN]) -> usize {
        let mut writer = InstructionWriter::new(out);
        writer.write_u8(self.tag() as u8);

        match *self {
            Self::Initialize { seed, fee_bps, authority } => {
                writer.write_u64(seed);
                writer.write_u16(fee_bps);
                match authority {
                    Some(key) => {
                        writer.write_u8(1);
                        writer.write_bytes(&key);
                    }
                    None => writer.write_u8(0),
                }
            }
            Self::Deposit { lp_amount, max_x, max_y } => {
                writer.write_u64(lp_amount);
                writer.write_u64(max_x);
                writer.write_u64(max_y);
            }
            Self::Withdraw { lp_amount, min_x, min_y } => {
                writer.write_u64(lp_amount);
                writer.write_u64(min_x);
                writer.write_u64(min_y);
            }
            Self::Swap { x_to_y, amount_in, min_amount_out } => {
                writer.write_u8(x_to_y as u8);
                writer.write_u64(amount_in);
                writer.write_u64(min_amount_out);
            }
            Self::Lock | Self::Unlock => {}
        }

        writer.offset()
    }
}

/// Instruction data reader with tracked offset
pub struct InstructionReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Read a fixed-size byte array and advance offset
    #[inline]
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], ProgramError> {
        let end = self
            .offset
            .checked_add(N)
            .ok_or(ProgramError::InvalidInstructionData)?;
        let slice = self
            .data
            .get(self.offset..end)
            .ok_or(ProgramError::InvalidInstructionData)?;

        let mut bytes = [0u8; N];
        bytes.copy_from_slice(slice);
        self.offset = end;
        Ok(bytes)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, ProgramError> {
        Ok(self.read_bytes::<1>()?[0])
    }

    /// Strict boolean: only 0 and 1 decode
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, ProgramError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, ProgramError> {
        Ok(u16::from_le_bytes(self.read_bytes()?))
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, ProgramError> {
        Ok(u64::from_le_bytes(self.read_bytes()?))
    }
}

/// Writer over a fixed buffer sized for the longest instruction
struct InstructionWriter<'a> {
    out: &'a mut [u8; AmmInstruction::MAX_LEN],
    offset: usize,
}

impl<'a> InstructionWriter<'a> {
    fn new(out: &'a mut [u8; AmmInstruction::MAX_LEN]) -> Self {
        Self { out, offset: 0 }
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self.offset + bytes.len();
        self.out[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
    }

    fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }
}
