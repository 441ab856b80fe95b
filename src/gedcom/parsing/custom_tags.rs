//! Vendor tag mapping
//!
//!     Underscore tags that have a standard equivalent are read as that equivalent. Event
//!     mappings become a generic `EVEN` whose type names what the vendor meant. Underscore
//!     tags missing from this table are kept as custom data.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The standard reading of a vendor tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomMapping {
    pub tag: &'static str,
    pub event_type: Option<&'static str>,
}

const fn event(event_type: &'static str) -> CustomMapping {
    CustomMapping {
        tag: "EVEN",
        event_type: Some(event_type),
    }
}

const fn same_as(tag: &'static str) -> CustomMapping {
    CustomMapping {
        tag,
        event_type: None,
    }
}

static MAPPINGS: Lazy<HashMap<&'static str, CustomMapping>> = Lazy::new(|| {
    HashMap::from([
        ("_MILT", event("Military Service")),
        ("_MILI", event("Military Service")),
        ("_MILITARY_SERVICE", event("Military Service")),
        ("_DEG", event("Degree")),
        ("_ELEC", event("Elected")),
        ("_EXCM", event("Excommunicated")),
        ("_FUN", event("Funeral")),
        ("_MDCL", event("Medical")),
        ("_SEPR", event("Separated")),
        ("_EMAIL", same_as("EMAIL")),
        ("_URL", same_as("WWW")),
        ("_WEB", same_as("WWW")),
    ])
});

pub fn lookup(tag: &str) -> Option<CustomMapping> {
    MAPPINGS.get(tag).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_military_spellings_share_a_mapping() {
        for tag in ["_MILT", "_MILI", "_MILITARY_SERVICE"] {
            assert_eq!(lookup(tag), Some(event("Military Service")), "{tag}");
        }
    }

    #[test]
    fn test_contact_mappings() {
        assert_eq!(lookup("_EMAIL").map(|m| m.tag), Some("EMAIL"));
        assert_eq!(lookup("_URL").map(|m| m.tag), Some("WWW"));
        assert_eq!(lookup("_UID"), None);
    }
}
