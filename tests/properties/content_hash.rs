//! Property tests for the inventory fingerprint.

use proptest::prelude::*;

use compose_deploy::domain::value_objects::ContentHash;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Same bytes, same lowercase 64-char hex digest.
    #[test]
    fn property_hash_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let a = ContentHash::from_bytes(&bytes);
        let b = ContentHash::from_bytes(&bytes);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.hex().len(), 64);
        prop_assert!(a.hex().chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    /// PROPERTY: Appending a byte changes the digest.
    #[test]
    fn property_hash_covers_every_byte(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        extra in any::<u8>(),
    ) {
        let mut longer = bytes.clone();
        longer.push(extra);
        prop_assert_ne!(ContentHash::from_bytes(&bytes), ContentHash::from_bytes(&longer));
    }
}
