// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator workflows across editors, services and views.

use super::helpers::create_test_persistence;
use crate::{ContributorEditor, ContributorListView, MemoryAssetStore, RoleEditor};
use hunterboard_domain::StatusFilter;

#[test]
fn test_create_role_then_contributor_then_hide_inactive() {
    let mut persistence = create_test_persistence();
    let assets = MemoryAssetStore::new();
    let mut view = ContributorListView::new();
    view.refresh(&mut persistence).unwrap();

    let mut role_editor = RoleEditor::create();
    role_editor.form_mut().name = String::from("Dev");
    role_editor.form_mut().gradient = String::from("from-violet-500 to-fuchsia-500");
    role_editor.form_mut().border_color = String::from("border-violet-400");
    let role = role_editor.submit(&mut persistence, |_| {}).unwrap();

    let mut contributor_editor = ContributorEditor::create();
    contributor_editor.form_mut().name = String::from("Ana");
    contributor_editor.form_mut().role_id = Some(role.role_id);
    contributor_editor.form_mut().rank = 0;
    let ana = contributor_editor
        .submit(&mut persistence, &assets, |p| {
            view.refresh(p).unwrap();
        })
        .unwrap();
    assert_eq!(view.all().len(), 1);
    assert_eq!(view.all()[0].role_name.as_deref(), Some("Dev"));

    view.toggle_active(&mut persistence, ana.contributor_id).unwrap();

    view.set_status(StatusFilter::Active);
    assert!(view.visible().is_empty());

    view.set_status(StatusFilter::All);
    let visible = view.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Ana");
    assert!(!visible[0].active);
}
