use std::fmt;
use std::str::FromStr;

use crate::errors::SourceError;

/// The twelve recognized zodiac signs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aries => "aries",
            Self::Taurus => "taurus",
            Self::Gemini => "gemini",
            Self::Cancer => "cancer",
            Self::Leo => "leo",
            Self::Virgo => "virgo",
            Self::Libra => "libra",
            Self::Scorpio => "scorpio",
            Self::Sagittarius => "sagittarius",
            Self::Capricorn => "capricorn",
            Self::Aquarius => "aquarius",
            Self::Pisces => "pisces",
        }
    }

    /// Numeric identifier used by horoscope.com (aries = 1 .. pisces = 12).
    pub fn id(&self) -> u8 {
        match self {
            Self::Aries => 1,
            Self::Taurus => 2,
            Self::Gemini => 3,
            Self::Cancer => 4,
            Self::Leo => 5,
            Self::Virgo => 6,
            Self::Libra => 7,
            Self::Scorpio => 8,
            Self::Sagittarius => 9,
            Self::Capricorn => 10,
            Self::Aquarius => 11,
            Self::Pisces => 12,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacSign {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sign| sign.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SourceError::InvalidInput(format!("Unknown sign: {}", s)))
    }
}
