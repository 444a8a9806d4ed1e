// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_contributor, create_test_role};
use crate::{Contributor, Role, StatusFilter, filter_contributors, filter_roles, matches_search};

fn sample_contributors() -> Vec<Contributor> {
    let dev: Role = create_test_role(1, "Developer", 0);
    let artist: Role = create_test_role(2, "Artist", 1);
    vec![
        create_test_contributor(1, "Zed", Some(&dev), 3, true),
        create_test_contributor(2, "Ann", Some(&artist), 1, true),
        create_test_contributor(3, "Bob", None, 2, false),
        create_test_contributor(4, "Cara", Some(&dev), 1, false),
    ]
}

fn ids(contributors: &[&Contributor]) -> Vec<i64> {
    contributors.iter().map(|c| c.contributor_id).collect()
}

#[test]
fn test_matches_search_is_case_insensitive() {
    assert!(matches_search("Sung Jinwoo", "jin"));
    assert!(matches_search("Sung Jinwoo", "SUNG"));
    assert!(matches_search("anything", ""));
    assert!(!matches_search("Ann", "bob"));
}

#[test]
fn test_empty_filter_returns_all_sorted_by_rank() {
    let contributors = sample_contributors();
    let visible = filter_contributors(&contributors, "", StatusFilter::All);
    // Ties on rank fall back to identifier.
    assert_eq!(ids(&visible), vec![2, 4, 3, 1]);
}

#[test]
fn test_status_filter_hides_other_statuses() {
    let contributors = sample_contributors();

    let active = filter_contributors(&contributors, "", StatusFilter::Active);
    assert_eq!(ids(&active), vec![2, 1]);

    let inactive = filter_contributors(&contributors, "", StatusFilter::Inactive);
    assert_eq!(ids(&inactive), vec![4, 3]);
}

#[test]
fn test_search_matches_role_name() {
    let contributors = sample_contributors();
    let visible = filter_contributors(&contributors, "devel", StatusFilter::All);
    assert_eq!(ids(&visible), vec![4, 1]);
}

#[test]
fn test_search_and_status_compose() {
    let contributors = sample_contributors();
    let visible = filter_contributors(&contributors, "devel", StatusFilter::Active);
    assert_eq!(ids(&visible), vec![1]);
}

#[test]
fn test_search_with_no_match_is_empty() {
    let contributors = sample_contributors();
    assert!(filter_contributors(&contributors, "nobody", StatusFilter::All).is_empty());
}

#[test]
fn test_filter_roles_by_name_in_display_order() {
    let roles = vec![
        create_test_role(1, "Translator", 2),
        create_test_role(2, "Developer", 0),
        create_test_role(3, "Designer", 1),
    ];

    let all: Vec<i64> = filter_roles(&roles, "").iter().map(|r| r.role_id).collect();
    assert_eq!(all, vec![2, 3, 1]);

    let matching: Vec<i64> = filter_roles(&roles, "DE")
        .iter()
        .map(|r| r.role_id)
        .collect();
    assert_eq!(matching, vec![2, 3]);
}
