//! Enumerations of the `seiprotocol.seichain.dex` package.

use wirecodec::{EnumTable, UNRECOGNIZED};

pub static POSITION_DIRECTION: EnumTable = EnumTable::new(
    "seiprotocol.seichain.dex.PositionDirection",
    &[(0, "LONG"), (1, "SHORT"), (UNRECOGNIZED, "UNRECOGNIZED")],
);

pub static POSITION_EFFECT: EnumTable = EnumTable::new(
    "seiprotocol.seichain.dex.PositionEffect",
    &[(0, "OPEN"), (1, "CLOSE"), (UNRECOGNIZED, "UNRECOGNIZED")],
);

pub static DENOM: EnumTable = EnumTable::new(
    "seiprotocol.seichain.dex.Denom",
    &[
        (0, "SEI"),
        (1, "ATOM"),
        (2, "BTC"),
        (3, "ETH"),
        (4, "SOL"),
        (5, "AVAX"),
        (6, "USDC"),
        (7, "NEAR"),
        (8, "OSMO"),
        (UNRECOGNIZED, "UNRECOGNIZED"),
    ],
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(i32)]
pub enum PositionDirection {
    #[default]
    Long = 0,
    Short = 1,
    Unrecognized = -1,
}

impl PositionDirection {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            PositionDirection::Long => "LONG",
            PositionDirection::Short => "SHORT",
            PositionDirection::Unrecognized => "UNRECOGNIZED",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        POSITION_DIRECTION
            .code_from_name(name)
            .and_then(|code| Self::try_from(code).ok())
    }
}

impl TryFrom<i32> for PositionDirection {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, i32> {
        match code {
            0 => Ok(PositionDirection::Long),
            1 => Ok(PositionDirection::Short),
            UNRECOGNIZED => Ok(PositionDirection::Unrecognized),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(i32)]
pub enum PositionEffect {
    #[default]
    Open = 0,
    Close = 1,
    Unrecognized = -1,
}

impl PositionEffect {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            PositionEffect::Open => "OPEN",
            PositionEffect::Close => "CLOSE",
            PositionEffect::Unrecognized => "UNRECOGNIZED",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        POSITION_EFFECT
            .code_from_name(name)
            .and_then(|code| Self::try_from(code).ok())
    }
}

impl TryFrom<i32> for PositionEffect {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, i32> {
        match code {
            0 => Ok(PositionEffect::Open),
            1 => Ok(PositionEffect::Close),
            UNRECOGNIZED => Ok(PositionEffect::Unrecognized),
            other => Err(other),
        }
    }
}

/// Asset denominations traded on the dex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(i32)]
pub enum Denom {
    #[default]
    Sei = 0,
    Atom = 1,
    Btc = 2,
    Eth = 3,
    Sol = 4,
    Avax = 5,
    Usdc = 6,
    Near = 7,
    Osmo = 8,
    Unrecognized = -1,
}

impl Denom {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Denom::Sei => "SEI",
            Denom::Atom => "ATOM",
            Denom::Btc => "BTC",
            Denom::Eth => "ETH",
            Denom::Sol => "SOL",
            Denom::Avax => "AVAX",
            Denom::Usdc => "USDC",
            Denom::Near => "NEAR",
            Denom::Osmo => "OSMO",
            Denom::Unrecognized => "UNRECOGNIZED",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        DENOM
            .code_from_name(name)
            .and_then(|code| Self::try_from(code).ok())
    }
}

impl TryFrom<i32> for Denom {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, i32> {
        Ok(match code {
            0 => Denom::Sei,
            1 => Denom::Atom,
            2 => Denom::Btc,
            3 => Denom::Eth,
            4 => Denom::Sol,
            5 => Denom::Avax,
            6 => Denom::Usdc,
            7 => Denom::Near,
            8 => Denom::Osmo,
            UNRECOGNIZED => Denom::Unrecognized,
            other => return Err(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_valid() {
        for table in [&POSITION_DIRECTION, &POSITION_EFFECT, &DENOM] {
            assert!(table.validate().is_ok(), "{}", table.name);
        }
    }

    #[test]
    fn test_rust_enums_agree_with_tables() {
        for code in DENOM.codes() {
            let denom = Denom::try_from(code).unwrap();
            assert_eq!(denom as i32, code);
            assert_eq!(DENOM.name_from_code(code), Some(denom.as_str_name()));
        }
        for code in POSITION_DIRECTION.codes() {
            let dir = PositionDirection::try_from(code).unwrap();
            assert_eq!(POSITION_DIRECTION.name_from_code(code), Some(dir.as_str_name()));
        }
        for code in POSITION_EFFECT.codes() {
            let effect = PositionEffect::try_from(code).unwrap();
            assert_eq!(POSITION_EFFECT.name_from_code(code), Some(effect.as_str_name()));
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(Denom::from_str_name("OSMO"), Some(Denom::Osmo));
        assert_eq!(Denom::from_str_name("DOGE"), None);
        assert_eq!(PositionEffect::try_from(9), Err(9));
        assert_eq!(
            PositionDirection::from_str_name("UNRECOGNIZED"),
            Some(PositionDirection::Unrecognized)
        );
    }
}
