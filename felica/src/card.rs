// felica/src/card.rs

//! Identity of a polled card.

use crate::types::{Idm, Pmm, SystemCode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Compact information describing a FeliCa card (IDm/PMm/SystemCode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardInfo {
    /// Manufacture ID
    pub idm: Idm,
    /// Manufacture parameters
    pub pmm: Pmm,
    /// System code stored in the card record
    pub system_code: SystemCode,
}

impl CardInfo {
    #[allow(missing_docs)]
    pub fn new(idm: Idm, pmm: Pmm, system_code: SystemCode) -> Self {
        Self {
            idm,
            pmm,
            system_code,
        }
    }

    /// IDm of the card.
    pub fn idm(&self) -> &Idm {
        &self.idm
    }

    /// PMm of the card.
    pub fn pmm(&self) -> &Pmm {
        &self.pmm
    }

    /// System code the card answered with.
    pub fn system_code(&self) -> SystemCode {
        self.system_code
    }
}
