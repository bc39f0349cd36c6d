//! Status effect types

named_kind! {
    /// A status effect a weapon can build up.
    ///
    /// Order is the encoded order: the three per-level columns first, then the
    /// three level-independent ones.
    pub enum StatusType {
        Frost => "Frost",
        Poison => "Poison",
        Bleed => "Bleed",
        ScarletRot => "Scarlet Rot",
        Madness => "Madness",
        Sleep => "Sleep",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Kind;

    #[test]
    fn test_status_names() {
        assert_eq!(StatusType::from_name("Scarlet Rot"), Some(StatusType::ScarletRot));
        assert_eq!(StatusType::ScarletRot.to_string(), "Scarlet Rot");
        assert_eq!(StatusType::ALL.len(), 6);
    }
}
