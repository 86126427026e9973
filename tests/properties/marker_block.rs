//! Property tests for marker block insertion and removal.

use proptest::prelude::*;

use ezproxy::domain::services::MarkerStyle;

const STYLES: [MarkerStyle; 3] = [
    MarkerStyle::HASH,
    MarkerStyle::new("//"),
    MarkerStyle::new(";"),
];

fn style() -> impl Strategy<Value = MarkerStyle> {
    prop::sample::select(STYLES.to_vec())
}

/// A line that can never be mistaken for a delimiter
fn user_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _=:/.#-]{0,40}")
        .unwrap()
        .prop_filter("not a delimiter", |s| !s.contains("ezproxy"))
}

/// User content ending in a newline (or empty)
fn user_content() -> impl Strategy<Value = String> {
    proptest::collection::vec(user_line(), 0..=10).prop_map(|lines| {
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        content
    })
}

fn body() -> impl Strategy<Value = String> {
    proptest::collection::vec(user_line(), 1..=6).prop_map(|lines| {
        let mut body = lines.join("\n");
        body.push('\n');
        body
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: upserting the same body twice changes nothing the second time.
    #[test]
    fn property_upsert_is_idempotent(
        style in style(),
        existing in user_content(),
        body in body(),
    ) {
        let once = style.upsert(&existing, &body);
        let twice = style.upsert(&once, &body);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.matches(&style.start_marker()).count(), 1);
    }

    /// PROPERTY: a second upsert replaces the block in place.
    #[test]
    fn property_upsert_updates_in_place(
        style in style(),
        before in user_content(),
        after in user_content(),
        first in body(),
        second in body(),
    ) {
        let seeded = format!("{before}{}{after}", style.render(&first));
        let updated = style.upsert(&seeded, &second);

        prop_assert_eq!(style.body(&updated), Some(second.as_str()));
        prop_assert!(updated.starts_with(&before));
        prop_assert_eq!(updated.matches(&style.start_marker()).count(), 1);
    }

    /// PROPERTY: upsert then remove gives back the user's lines.
    #[test]
    fn property_remove_restores_user_content(
        style in style(),
        existing in user_content(),
        body in body(),
    ) {
        let patched = style.upsert(&existing, &body);
        let restored = style.remove(&patched).expect("block was just inserted");

        prop_assert!(!style.contains_block(&restored));
        prop_assert_eq!(restored.trim_end_matches('\n'), existing.trim_end_matches('\n'));
    }

    /// PROPERTY: removing from content without a block is a no-op.
    #[test]
    fn property_remove_without_block_is_none(
        style in style(),
        existing in user_content(),
    ) {
        prop_assert_eq!(style.remove(&existing), None);
    }

    /// PROPERTY: blocks with different prefixes in one file are independent.
    #[test]
    fn property_styles_do_not_interfere(
        existing in user_content(),
        hash_body in body(),
        slash_body in body(),
    ) {
        let hash = MarkerStyle::HASH;
        let slash = MarkerStyle::new("//");

        let content = slash.upsert(&hash.upsert(&existing, &hash_body), &slash_body);
        prop_assert_eq!(hash.body(&content), Some(hash_body.as_str()));
        prop_assert_eq!(slash.body(&content), Some(slash_body.as_str()));

        let without_hash = hash.remove(&content).expect("hash block present");
        prop_assert_eq!(slash.body(&without_hash), Some(slash_body.as_str()));
    }
}
