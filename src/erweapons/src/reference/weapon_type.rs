//! Weapon categories

named_kind! {
    /// A weapon category as named in the extra data source
    pub enum WeaponType {
        Dagger => "Dagger",
        StraightSword => "Straight Sword",
        Greatsword => "Greatsword",
        ColossalSword => "Colossal Sword",
        ThrustingSword => "Thrusting Sword",
        HeavyThrustingSword => "Heavy Thrusting Sword",
        CurvedSword => "Curved Sword",
        CurvedGreatsword => "Curved Greatsword",
        Katana => "Katana",
        Twinblade => "Twinblade",
        Hammer => "Hammer",
        GreatHammer => "Great Hammer",
        Flail => "Flail",
        Axe => "Axe",
        Greataxe => "Greataxe",
        Spear => "Spear",
        GreatSpear => "Great Spear",
        Halberd => "Halberd",
        Reaper => "Reaper",
        Whip => "Whip",
        Fist => "Fist",
        Claw => "Claw",
        ColossalWeapon => "Colossal Weapon",
        LightBow => "Light Bow",
        Bow => "Bow",
        Greatbow => "Greatbow",
        Crossbow => "Crossbow",
        Ballista => "Ballista",
        GlintstoneStaff => "Glintstone Staff",
        SacredSeal => "Sacred Seal",
        SmallShield => "Small Shield",
        MediumShield => "Medium Shield",
        Greatshield => "Greatshield",
        Torch => "Torch",
    }
}

/// Upgrade ceilings a weapon can have: regular smithing stones or somber ones
pub const MAX_UPGRADE_LEVELS: &[u8] = &[25, 10];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Kind;

    #[test]
    fn test_weapon_type_lookup() {
        assert_eq!(WeaponType::from_name("Colossal Weapon"), Some(WeaponType::ColossalWeapon));
        assert_eq!(WeaponType::from_name("Torch"), Some(WeaponType::Torch));
        assert_eq!(WeaponType::from_name("Laser Blaster"), None);
    }

    #[test]
    fn test_weapon_type_codes_are_stable() {
        assert_eq!(WeaponType::Dagger.index(), 0);
        assert_eq!(WeaponType::Torch.index(), WeaponType::ALL.len() - 1);
    }
}
