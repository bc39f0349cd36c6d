//! Damage types

named_kind! {
    /// A damage type a weapon can deal, in spreadsheet column order
    pub enum DamageType {
        Physical => "physical",
        Magic => "magic",
        Fire => "fire",
        Lightning => "lightning",
        Holy => "holy",
    }
}
