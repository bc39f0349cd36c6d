//! Player attributes that weapons scale with or require

named_kind! {
    /// A player attribute, in spreadsheet column order
    pub enum Attribute {
        Str => "str",
        Dex => "dex",
        Int => "int",
        Fai => "fai",
        Arc => "arc",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Kind;

    #[test]
    fn test_attribute_lookup() {
        assert_eq!(Attribute::from_name("str"), Some(Attribute::Str));
        assert_eq!(Attribute::from_name("arc"), Some(Attribute::Arc));
        assert_eq!(Attribute::from_name("STR"), None);
        assert_eq!(Attribute::Fai.to_string(), "fai");
    }
}
