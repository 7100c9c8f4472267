//! Contact channel vocabulary shared by help requests, camps, and drop-off
//! locations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Phone,
    Whatsapp,
    Telegram,
}

pub const ALL_CONTACT_TYPES: &[ContactType] = &[
    ContactType::Phone,
    ContactType::Whatsapp,
    ContactType::Telegram,
];

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Whatsapp => "whatsapp",
            Self::Telegram => "telegram",
        }
    }
}

impl FromStr for ContactType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CONTACT_TYPES
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCode::new("contact type", s))
    }
}

impl TryFrom<String> for ContactType {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_types_round_trip() {
        for t in ALL_CONTACT_TYPES {
            assert_eq!(t.as_str().parse::<ContactType>().unwrap(), *t);
        }
    }

    #[test]
    fn unknown_contact_type_rejected() {
        assert!("fax".parse::<ContactType>().is_err());
    }
}
