use convert_case::{Case, Casing};

/// Attribute name to store key: `LastName` -> `last_name`
pub fn to_storage_key(name: &str) -> String {
    name.to_case(Case::Snake)
}

/// Attribute name to generated parameter name: `LastName` -> `lastName`
pub fn to_param_name(name: &str) -> String {
    name.to_case(Case::Camel)
}

/// Attribute name to accessor method suffix: `last_name` -> `LastName`
pub fn to_suffix(name: &str) -> String {
    name.to_case(Case::Pascal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_storage_key() {
        assert_eq!(to_storage_key("Id"), "id");
        assert_eq!(to_storage_key("LastName"), "last_name");
        assert_eq!(to_storage_key("lastName"), "last_name");
        assert_eq!(to_storage_key("last_name"), "last_name");
    }

    #[test]
    fn test_to_param_name() {
        assert_eq!(to_param_name("Id"), "id");
        assert_eq!(to_param_name("LastName"), "lastName");
        assert_eq!(to_param_name("last_name"), "lastName");
    }

    #[test]
    fn test_to_suffix() {
        assert_eq!(to_suffix("id"), "Id");
        assert_eq!(to_suffix("last_name"), "LastName");
        assert_eq!(to_suffix("lastName"), "LastName");
        assert_eq!(to_suffix("LastName"), "LastName");
    }

    #[test]
    fn test_conversions_are_deterministic() {
        let round = to_suffix(&to_storage_key("LastName"));
        assert_eq!(round, "LastName");
    }
}
