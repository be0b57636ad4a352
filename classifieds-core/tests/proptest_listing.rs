//! Property tests for listing order and filtering.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use classifieds_core::domain::query::sort_recent_first;
use classifieds_core::{Ad, AdDraft, AdQuery, Currency};

fn ad(owner: &str, title: &str, offset_secs: i64) -> Ad {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Ad::new(
        owner.to_string(),
        AdDraft {
            title: title.to_string(),
            category: "jobs".into(),
            price: "1".into(),
            currency: Currency::Rupees,
            description: "d".into(),
            location: "Peru".into(),
            thumbnail: Some("t".into()),
            images: vec!["i".into()],
        },
        base + Duration::seconds(offset_secs),
    )
}

proptest! {
    /// Listing order is newest first whatever order ads were stored in.
    #[test]
    fn sorted_listing_is_descending(offsets in prop::collection::vec(0i64..10_000, 0..40)) {
        let mut ads: Vec<Ad> = offsets.iter().map(|o| ad("a@x.com", "t", *o)).collect();
        sort_recent_first(&mut ads);
        for pair in ads.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    /// Owner filter keeps exactly the owner's ads.
    #[test]
    fn owner_filter_is_exact(owners in prop::collection::vec(0usize..3, 0..30)) {
        let emails = ["a@x.com", "b@x.com", "c@x.com"];
        let ads: Vec<Ad> = owners
            .iter()
            .enumerate()
            .map(|(i, o)| ad(emails[*o], "t", i as i64))
            .collect();

        let query = AdQuery::new().owner("b@x.com");
        let kept = ads.iter().filter(|a| query.matches(a)).count();
        let expected = owners.iter().filter(|o| **o == 1).count();
        prop_assert_eq!(kept, expected);
    }

    /// A title always matches any of its own substrings, in any case.
    #[test]
    fn title_substring_matches(title in "[a-zA-Z ]{1,20}", start in 0usize..20, len in 1usize..20) {
        let start = start.min(title.len() - 1);
        let end = (start + len).min(title.len());
        let needle = title[start..end].to_uppercase();
        prop_assume!(!needle.trim().is_empty());

        let a = ad("a@x.com", &title, 0);
        prop_assert!(AdQuery::new().text(needle).matches(&a));
    }
}
