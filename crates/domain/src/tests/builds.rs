// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{find_build, load_builds};

#[test]
fn test_embedded_builds_decode() {
    let builds = load_builds().unwrap();
    assert_eq!(builds.len(), 3);
    assert!(builds.iter().all(|b| !b.variants.is_empty()));
}

#[test]
fn test_find_build_by_character() {
    let build = find_build("cha-hae-in").unwrap().expect("build exists");
    assert_eq!(build.character_name, "Cha Hae-In");
    assert_eq!(build.element.as_deref(), Some("Light"));
}

#[test]
fn test_find_build_unknown_character() {
    assert!(find_build("unknown-hunter").unwrap().is_none());
}

#[test]
fn test_variants_carry_artifacts() {
    let build = find_build("sung-jinwoo").unwrap().expect("build exists");
    let general = &build.variants[0];
    assert_eq!(general.artifacts.len(), 8);
    assert_eq!(general.set_bonuses.len(), 2);
}
