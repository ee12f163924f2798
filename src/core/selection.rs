use crate::domain::model::ServiceCatalog;
use std::collections::BTreeSet;

/// Encodes a set of chosen service names into the persisted selection string.
///
/// Each known name becomes a `[<id>]:` token, in the order the caller supplies
/// the names. Names missing from the catalog are skipped. An empty selection
/// encodes to an empty string; substituting a default set for an empty
/// selection is the save flow's job, not the codec's.
pub fn encode_selection<'a, I>(selected: I, catalog: &ServiceCatalog) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut encoded = String::new();
    for name in selected {
        if let Some(id) = catalog.service_id(name) {
            // [] 包住 ID,單碼 ID 才不會誤中多碼 ID ("1" vs "11")
            encoded.push('[');
            encoded.push_str(id);
            encoded.push_str("]:");
        }
    }
    encoded
}

/// Decodes a persisted selection string into the set of enabled service names.
///
/// Tokenizes on `:` and strips the `[` `]` delimiters instead of substring
/// scanning; the stored grammar is unchanged. Identifiers not present in the
/// catalog are ignored, so a stored string can outlive catalog changes. An
/// empty string decodes to the empty set.
pub fn decode_selection(raw: &str, catalog: &ServiceCatalog) -> BTreeSet<String> {
    let mut enabled = BTreeSet::new();
    if raw.is_empty() {
        return enabled;
    }

    let stored_ids: BTreeSet<&str> = raw
        .split(':')
        .filter_map(|token| token.strip_prefix('[')?.strip_suffix(']'))
        .collect();

    for service in catalog.services() {
        if stored_ids.contains(service.id.as_str()) {
            enabled.insert(service.name.clone());
        }
    }
    enabled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CarrierService;

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![
            CarrierService::new("03", "Ground"),
            CarrierService::new("12", "3 Day Select"),
            CarrierService::new("11", "Standard"),
            CarrierService::new("08", "Worldwide Expedited"),
        ])
    }

    #[test]
    fn test_encode_keeps_caller_order() {
        let encoded = encode_selection(["Standard", "Ground"], &catalog());
        assert_eq!(encoded, "[11]:[03]:");
    }

    #[test]
    fn test_encode_skips_unknown_names() {
        let encoded = encode_selection(["Ground", "Rocket Mail"], &catalog());
        assert_eq!(encoded, "[03]:");
    }

    #[test]
    fn test_encode_empty_selection() {
        let encoded = encode_selection([], &catalog());
        assert_eq!(encoded, "");
    }

    #[test]
    fn test_decode_empty_string() {
        assert!(decode_selection("", &catalog()).is_empty());
    }

    #[test]
    fn test_decode_ignores_stale_ids() {
        let enabled = decode_selection("[03]:[99]:", &catalog());
        assert_eq!(enabled, BTreeSet::from(["Ground".to_string()]));
    }

    #[test]
    fn test_roundtrip_is_order_independent() {
        let cat = catalog();
        let selected = ["Worldwide Expedited", "Ground", "Standard"];
        let decoded = decode_selection(&encode_selection(selected, &cat), &cat);
        let expected: BTreeSet<String> = selected.iter().map(|s| s.to_string()).collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_single_digit_id_does_not_match_inside_two_digit_id() {
        let cat = ServiceCatalog::new(vec![
            CarrierService::new("1", "Express"),
            CarrierService::new("11", "Standard"),
        ]);
        let encoded = encode_selection(["Standard"], &cat);
        assert_eq!(encoded, "[11]:");
        let decoded = decode_selection(&encoded, &cat);
        assert_eq!(decoded, BTreeSet::from(["Standard".to_string()]));
    }
}
