//! Property tests for address decoding.

use proptest::prelude::*;

use compose_deploy::domain::value_objects::Address;

fn half() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9.\\-\\[\\]]{1,32}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Decoding never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,128}") {
        let _ = Address::parse(&s);
    }

    /// PROPERTY: `ip:port` with non-empty halves splits back into its halves.
    #[test]
    fn property_split_recovers_halves(ip in half(), port in half()) {
        let raw = format!("{}:{}", ip, port);
        let address = Address::parse(&raw).unwrap();
        prop_assert_eq!(address.ip(), ip.as_str());
        prop_assert_eq!(address.port(), port.as_str());
        prop_assert_eq!(address.as_str(), raw.as_str());
    }

    /// PROPERTY: Any colon count other than one is rejected.
    #[test]
    fn property_colon_count_must_be_one(parts in proptest::collection::vec(half(), 1..5)) {
        prop_assume!(parts.len() != 2);
        let raw = parts.join(":");
        prop_assert!(Address::parse(&raw).is_err());
    }
}
