// felica/src/types.rs

//! Value types for identifiers, codes and block payloads.

use crate::Error;
use crate::constants::{BLOCK_SIZE, ID_LEN};
use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn id_from_slice(bytes: &[u8]) -> Result<[u8; ID_LEN], Error> {
    <[u8; ID_LEN]>::try_from(bytes).map_err(|_| Error::InvalidLength {
        expected: ID_LEN,
        actual: bytes.len(),
    })
}

/// IDm - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Idm([u8; ID_LEN]);

impl Idm {
    #[allow(missing_docs)]
    pub fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    #[allow(missing_docs)]
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// felicalib はカードが応答しなかった列挙結果の IDm を 0 で埋めて返す
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Lowercase hex without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Idm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        id_from_slice(bytes).map(Self)
    }
}

/// PMm - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pmm([u8; ID_LEN]);

#[allow(missing_docs)]
impl Pmm {
    pub fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Pmm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        id_from_slice(bytes).map(Self)
    }
}

/// SystemCode (u16)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{:04X}", _0)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemCode(u16);

impl SystemCode {
    /// Wildcard; any card answers
    pub const ANY: Self = Self(0xffff);
    /// 共通領域
    pub const COMMON: Self = Self(0xfe00);
    /// サイバネ領域
    pub const CYBERNE: Self = Self(0x0003);
    /// Edy (= 共通領域)
    pub const EDY: Self = Self::COMMON;
    /// Suica (= サイバネ領域)
    pub const SUICA: Self = Self::CYBERNE;
    /// QUICPay
    pub const QUICPAY: Self = Self(0x04c1);

    #[allow(missing_docs)]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    #[allow(missing_docs)]
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for SystemCode {
    fn default() -> Self {
        Self::ANY
    }
}

impl From<u16> for SystemCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// ServiceCode (u16)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{:04X}", _0)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServiceCode(u16);

impl ServiceCode {
    #[allow(missing_docs)]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Bit 0 set means the service is readable without a key.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// felicalib の `int servicecode` 引数
    pub(crate) fn as_c_int(&self) -> std::os::raw::c_int {
        std::os::raw::c_int::from(self.0)
    }
}

impl From<u16> for ServiceCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    #[allow(missing_docs)]
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy at most 16 bytes and zero-fill the rest.
    pub fn padded(data: &[u8]) -> Result<Self, Error> {
        if data.len() > BLOCK_SIZE {
            return Err(Error::DataTooLong {
                max: BLOCK_SIZE,
                actual: data.len(),
            });
        }
        let mut arr = [0u8; BLOCK_SIZE];
        arr[..data.len()].copy_from_slice(data);
        Ok(Self(arr))
    }

    #[allow(missing_docs)]
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Lowercase hex, bytes separated by spaces.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    /// Printable ASCII with every other byte shown as `.`.
    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

/// Area definition reported by service enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Area {
    /// First code of the area
    pub code: u16,
    /// Last service code inside the area
    pub end_service_code: u16,
}
