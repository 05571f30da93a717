use super::*;
use crate::annotation::{Annotation, AnnotationId, AnnotationKind, Geometry};
use crate::config::{EditorConfig, SelectionMode};

fn point(id: &str) -> Annotation {
    Annotation::new(id, Geometry::point([0.0, 0.0], 5.0), AnnotationKind::Point)
}

fn slideshow_of(ids: &[&str]) -> Slideshow {
    Slideshow::from_annotations("show", "Test", ids.iter().map(|id| point(id)).collect())
}

fn ids(slideshow: &Slideshow) -> Vec<String> {
    slideshow
        .iter()
        .map(|a| a.id().as_str().to_string())
        .collect()
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

#[test]
fn reorder_then_edit_then_remove_scenario() {
    let a = point("1");
    let b = point("2");
    let slideshow = Slideshow::from_annotations("s", "Scenario", vec![a.clone(), b.clone()]);

    let reordered = slideshow.reorder(0, 1);
    assert_eq!(reordered.annotations(), &[b.clone(), a.clone()]);

    let edited = reordered.edit_annotation(&a, a.with_content("hi"));
    assert_eq!(edited.annotations(), &[b.clone(), a.with_content("hi")]);

    let removed = edited.remove_annotation(&b);
    assert_eq!(removed.annotations(), &[a.with_content("hi")]);
}

#[test]
fn reorder_is_a_permutation_for_every_index_pair() {
    let slideshow = slideshow_of(&["a", "b", "c", "d", "e"]);
    let original = sorted(ids(&slideshow));
    for start in 0..slideshow.len() {
        for end in 0..slideshow.len() + 2 {
            let result = slideshow.reorder(start, end);
            assert_eq!(result.len(), slideshow.len());
            assert_eq!(sorted(ids(&result)), original, "reorder({start}, {end})");
            let expected_end = end.min(slideshow.len() - 1);
            assert_eq!(result.annotations()[expected_end], slideshow.annotations()[start]);
        }
    }
}

#[test]
fn reorder_moves_forward_and_backward() {
    let slideshow = slideshow_of(&["a", "b", "c", "d"]);
    assert_eq!(ids(&slideshow.reorder(0, 2)), ["b", "c", "a", "d"]);
    assert_eq!(ids(&slideshow.reorder(3, 1)), ["a", "d", "b", "c"]);
    assert_eq!(ids(&slideshow.reorder(1, 99)), ["a", "c", "d", "b"]);
}

#[test]
fn reorder_out_of_range_start_is_identity() {
    let slideshow = slideshow_of(&["a", "b"]);
    assert!(slideshow.reorder(2, 0).ptr_eq(&slideshow));
    assert!(slideshow.reorder(usize::MAX, 0).ptr_eq(&slideshow));
    assert!(slideshow.reorder(1, 1).ptr_eq(&slideshow));

    let empty = Slideshow::with_id("e", "Empty");
    assert!(empty.reorder(0, 0).ptr_eq(&empty));
}

#[test]
fn edit_of_missing_annotation_is_identity() {
    let slideshow = slideshow_of(&["a", "b"]);
    let stranger = point("zzz");
    let result = slideshow.edit_annotation(&stranger, stranger.with_content("nope"));
    assert!(result.ptr_eq(&slideshow));
    assert_eq!(result, slideshow);
}

#[test]
fn edit_changes_exactly_one_record() {
    let slideshow = slideshow_of(&["a", "b", "c"]);
    let old = slideshow.annotations()[1].clone();
    let new = old.with_content("updated");
    let result = slideshow.edit_annotation(&old, new.clone());

    let differing: Vec<_> = slideshow
        .iter()
        .zip(result.iter())
        .filter(|(before, after)| before != after)
        .collect();
    assert_eq!(differing.len(), 1);
    assert_eq!(differing[0].1, &new);
}

#[test]
fn edit_keeps_the_original_identifier() {
    let slideshow = slideshow_of(&["a", "b"]);
    let old = slideshow.annotations()[0].clone();
    let impostor = point("other").with_content("moved in");
    let result = slideshow.edit_annotation(&old, impostor);
    assert_eq!(ids(&result), ["a", "b"]);
    assert_eq!(result.annotations()[0].content(), "moved in");
}

#[test]
fn edit_with_identical_record_is_identity() {
    let slideshow = slideshow_of(&["a"]);
    let old = slideshow.annotations()[0].clone();
    assert!(slideshow.edit_annotation(&old, old.clone()).ptr_eq(&slideshow));
}

#[test]
fn remove_shrinks_by_at_most_one() {
    let slideshow = slideshow_of(&["a", "b", "c"]);
    let removed = slideshow.remove_annotation(&point("b"));
    assert_eq!(ids(&removed), ["a", "c"]);

    let again = removed.remove_annotation(&point("b"));
    assert!(again.ptr_eq(&removed));
    assert_eq!(again.len(), 2);
}

#[test]
fn operations_leave_previous_snapshot_untouched() {
    let before = slideshow_of(&["a", "b"]);
    let reader = before.clone();
    let _ = before.reorder(0, 1).remove_annotation(&point("a"));
    assert_eq!(ids(&reader), ["a", "b"]);
}

#[test]
fn add_appends_with_fresh_unique_ids() {
    let slideshow = Slideshow::with_id("s", "Adds");
    let (one, first) = slideshow.add_annotation(
        Geometry::rectangle([0.0, 0.0], [4.0, 4.0]),
        AnnotationKind::Rectangle,
    );
    let (two, second) = one.add_annotation(Geometry::point([1.0, 1.0], 3.0), AnnotationKind::Point);

    assert!(slideshow.is_empty());
    assert_eq!(two.len(), 2);
    assert_ne!(first.id(), second.id());
    assert_eq!(two.annotations()[1], second);
    assert_eq!(second.content(), "");
    assert_eq!(first.kind(), &AnnotationKind::Rectangle);
}

#[test]
fn rename_shares_the_annotation_snapshot() {
    let slideshow = slideshow_of(&["a"]);
    let renamed = slideshow.rename("New title");
    assert_eq!(renamed.name(), "New title");
    assert_eq!(renamed.annotations(), slideshow.annotations());
    assert!(!renamed.ptr_eq(&slideshow));
    assert!(renamed.rename("New title").ptr_eq(&renamed));
}

#[test]
fn duplicate_gets_fresh_id_and_same_annotations() {
    let slideshow = slideshow_of(&["a", "b"]);
    let copy = slideshow.duplicate("Copy");
    assert_ne!(copy.id(), slideshow.id());
    assert_eq!(copy.name(), "Copy");
    assert_eq!(copy.annotations(), slideshow.annotations());

    // Editing the copy leaves the source untouched.
    let first = copy.annotations()[0].clone();
    let trimmed = copy.remove_annotation(&first);
    assert_eq!(trimmed.len(), 1);
    assert_eq!(slideshow.len(), 2);
}

#[test]
fn selection_ignores_absent_ids() {
    let slideshow = slideshow_of(&["a", "b", "c"]);
    let selection = Selection::new(SelectionMode::Multi);

    let set = selection.set(
        vec!["c".into(), "missing".into(), "a".into(), "c".into()],
        &slideshow,
    );
    assert_eq!(set.ids(), &[AnnotationId::from("c"), AnnotationId::from("a")]);

    let toggled = set.toggle(&"missing".into(), &slideshow);
    assert_eq!(toggled, set);
}

#[test]
fn single_selection_holds_one_id() {
    let slideshow = slideshow_of(&["a", "b"]);
    let selection = Selection::new(SelectionMode::Single);

    let set = selection.set(vec!["b".into(), "a".into()], &slideshow);
    assert_eq!(set.ids(), &[AnnotationId::from("b")]);

    let toggled = set.toggle(&"a".into(), &slideshow);
    assert_eq!(toggled.ids(), &[AnnotationId::from("a")]);

    let cleared = toggled.toggle(&"a".into(), &slideshow);
    assert!(cleared.is_empty());
}

#[test]
fn multi_selection_toggles_membership() {
    let slideshow = slideshow_of(&["a", "b"]);
    let selection = Selection::new(SelectionMode::Multi)
        .toggle(&"a".into(), &slideshow)
        .toggle(&"b".into(), &slideshow);
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.first(), Some(&AnnotationId::from("a")));

    let selection = selection.toggle(&"a".into(), &slideshow);
    assert_eq!(selection.ids(), &[AnnotationId::from("b")]);
}

fn store_of(ids: &[&str], mode: SelectionMode) -> EditorStore {
    let config = EditorConfig {
        selection_mode: mode,
        ..EditorConfig::default()
    };
    EditorStore::new(slideshow_of(ids), &config)
}

#[test]
fn store_prunes_selection_after_removal() {
    let mut store = store_of(&["a", "b"], SelectionMode::Multi);
    store.apply(Command::SetSelection(vec!["a".into(), "b".into()]));
    let a = store.slideshow().annotations()[0].clone();

    assert_eq!(store.apply(Command::RemoveAnnotation(a)), ApplyOutcome::Changed);
    assert_eq!(store.selection().ids(), &[AnnotationId::from("b")]);
}

#[test]
fn store_reports_unchanged_for_missing_targets() {
    let mut store = store_of(&["a"], SelectionMode::Single);
    let stranger = point("x");
    assert_eq!(
        store.apply(Command::RemoveAnnotation(stranger.clone())),
        ApplyOutcome::Unchanged
    );
    assert_eq!(
        store.apply(Command::EditAnnotation {
            old: stranger.clone(),
            new: stranger.with_content("x"),
        }),
        ApplyOutcome::Unchanged
    );
    assert_eq!(
        store.apply(Command::Reorder { start: 4, end: 0 }),
        ApplyOutcome::Unchanged
    );
    assert_eq!(store.undo_len(), 0);
}

#[test]
fn store_snapshots_are_stable_for_readers() {
    let mut store = store_of(&["a", "b"], SelectionMode::Single);
    let reader = store.snapshot();
    store.apply(Command::Reorder { start: 0, end: 1 });
    assert_eq!(ids(&reader), ["a", "b"]);
    assert_eq!(ids(store.slideshow()), ["b", "a"]);
}

#[test]
fn store_undo_restores_previous_snapshot() {
    let mut store = store_of(&["a", "b"], SelectionMode::Single);
    store.apply(Command::Reorder { start: 0, end: 1 });
    store.apply(Command::Rename("Renamed".into()));
    assert_eq!(store.undo_len(), 2);

    assert!(store.undo());
    assert_eq!(store.slideshow().name(), "Test");
    assert!(store.undo());
    assert_eq!(ids(store.slideshow()), ["a", "b"]);
    assert!(!store.undo());
}

#[test]
fn store_undo_history_is_bounded() {
    let config = EditorConfig {
        undo_depth: 2,
        ..EditorConfig::default()
    };
    let mut store = EditorStore::new(slideshow_of(&["a", "b", "c"]), &config);
    for _ in 0..5 {
        store.apply(Command::Reorder { start: 0, end: 2 });
    }
    assert_eq!(store.undo_len(), 2);

    let no_history = EditorConfig {
        undo_depth: 0,
        ..EditorConfig::default()
    };
    let mut store = EditorStore::new(slideshow_of(&["a", "b"]), &no_history);
    store.apply(Command::Reorder { start: 0, end: 1 });
    assert!(!store.undo());
}

#[test]
fn store_refuses_adds_beyond_limit() {
    let config = EditorConfig {
        max_annotations: 1,
        ..EditorConfig::default()
    };
    let mut store = EditorStore::new(Slideshow::with_id("s", "Limited"), &config);
    let add = || Command::AddAnnotation {
        geometry: Geometry::point([0.0, 0.0], 2.0),
        kind: AnnotationKind::Point,
    };
    assert!(matches!(store.apply(add()), ApplyOutcome::Created(_)));
    assert_eq!(store.apply(add()), ApplyOutcome::Unchanged);
    assert_eq!(store.slideshow().len(), 1);
}

#[test]
fn undo_drops_selection_of_annotations_that_no_longer_exist() {
    let mut store = EditorStore::new(Slideshow::with_id("s", "Undo"), &EditorConfig::default());
    let ApplyOutcome::Created(created) = store.apply(Command::AddAnnotation {
        geometry: Geometry::point([0.0, 0.0], 2.0),
        kind: AnnotationKind::Point,
    }) else {
        panic!("add should create an annotation");
    };
    store.apply(Command::ToggleSelection(created.id().clone()));
    assert_eq!(store.selection().len(), 1);

    assert!(store.undo());
    assert!(store.slideshow().is_empty());
    assert!(store.selection().is_empty());
}
