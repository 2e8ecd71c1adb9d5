//! Entity classes that receive integer identifiers.

use std::fmt;

/// Each class owns a disjoint id range starting just above its base offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    User,
    Restaurant,
    Post,
    Comment,
    Reservation,
}

impl EntityClass {
    pub const ALL: [EntityClass; 5] = [
        EntityClass::User,
        EntityClass::Restaurant,
        EntityClass::Post,
        EntityClass::Comment,
        EntityClass::Reservation,
    ];

    pub fn base_offset(&self) -> i32 {
        match self {
            Self::User => 10_000_000,
            Self::Restaurant => 20_000_000,
            Self::Post => 30_000_000,
            Self::Comment => 40_000_000,
            Self::Reservation => 50_000_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Restaurant => "Restaurant",
            Self::Post => "Post",
            Self::Comment => "Comment",
            Self::Reservation => "Reservation",
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_offsets_are_disjoint_and_ordered() {
        let offsets: Vec<i32> = EntityClass::ALL.iter().map(|c| c.base_offset()).collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(EntityClass::Reservation.base_offset(), 50_000_000);
    }
}
