use std::{fmt, num::ParseIntError, str::FromStr};

/// Server-assigned identifier of a persisted location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationId(i64);

impl LocationId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn to_raw(self) -> i64 {
        self.0
    }
}

impl From<i64> for LocationId {
    fn from(from: i64) -> Self {
        Self(from)
    }
}

impl From<LocationId> for i64 {
    fn from(from: LocationId) -> Self {
        from.0
    }
}

impl FromStr for LocationId {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id: LocationId = " 42 ".parse().unwrap();
        assert_eq!(id, LocationId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("x".parse::<LocationId>().is_err());
    }
}
