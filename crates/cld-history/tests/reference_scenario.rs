// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Water/population walkthrough: edits, cascade delete, undo and redo.

use cld_dry_tests::{node, reference_scenario, reinforcing};
use cld_graph::{Document, EditOp, BASE_LAYER};
use cld_history::{Command, History, HistoryConfig, Outcome, StoreHandle};

fn counts(h: &History) -> (usize, usize) {
    (h.present().nodes.len(), h.present().links.len())
}

#[test]
fn walkthrough_matches_expected_states() {
    let mut h = History::default();
    assert_eq!(h.present().layers, vec![BASE_LAYER.to_owned()]);

    h.add_node(node("n1", "Water", 10.0, 20.0));
    assert_eq!(h.present().nodes, vec![node("n1", "Water", 10.0, 20.0)]);
    assert_eq!(h.undo_depth(), 1);

    h.add_node(node("n2", "Population", 30.0, 40.0));
    assert_eq!(counts(&h), (2, 0));
    assert_eq!(h.undo_depth(), 2);

    h.add_link(reinforcing("l1", "n1", "n2"));
    assert_eq!(counts(&h), (2, 1));

    h.remove_node("n1");
    assert_eq!(counts(&h), (1, 0));
    assert_eq!(h.present().nodes[0].id, "n2");

    assert!(h.undo());
    assert_eq!(counts(&h), (2, 1));

    assert!(h.undo());
    assert_eq!(counts(&h), (2, 0));

    assert!(h.redo());
    assert!(h.redo());
    assert_eq!(counts(&h), (1, 0));
    assert!(!h.can_redo());
}

#[test]
fn walkthrough_via_commands_and_shared_handle() {
    let handle = StoreHandle::new(HistoryConfig::default());
    for op in reference_scenario() {
        assert_eq!(handle.execute(Command::Edit(op)), Ok(Outcome::Applied));
    }
    let after_remove = handle.snapshot();

    assert_eq!(handle.execute(Command::Undo), Ok(Outcome::Moved));
    assert_eq!(handle.execute(Command::Undo), Ok(Outcome::Moved));
    assert_eq!(handle.execute(Command::Redo), Ok(Outcome::Moved));
    assert_eq!(handle.execute(Command::Redo), Ok(Outcome::Moved));
    assert_eq!(handle.execute(Command::Redo), Ok(Outcome::Boundary));
    assert_eq!(handle.snapshot(), after_remove);
}

#[test]
fn undo_after_edit_after_undo_cannot_reach_discarded_branch() {
    let mut h = History::default();
    for op in reference_scenario() {
        h.apply(op).unwrap();
    }
    h.undo();
    h.toggle_layer("Feedback");
    assert!(!h.redo());
    assert!(h.present().node("n1").is_some(), "removal branch is gone");
    assert!(h.undo());
    assert!(!h.present().is_layer_visible("Feedback"));
}

#[test]
fn strict_walkthrough_rejects_link_to_removed_node() {
    let mut h = History::new(HistoryConfig::permissive().with_strict(true));
    for op in reference_scenario() {
        h.apply(op).unwrap();
    }
    let before = h.present().clone();
    let err = h
        .apply(EditOp::AddLink(reinforcing("l2", "n1", "n2")))
        .unwrap_err();
    assert_eq!(err.to_string(), "edit rejected: link l2 references missing node n1");
    assert_eq!(h.present(), &before);
    assert_eq!(h.undo_depth(), 4);
}

#[test]
fn hash_tracks_document_not_history() {
    let mut h = History::default();
    let empty = Document::default().compute_hash().unwrap();
    h.add_node(node("n1", "Water", 1.0, 1.0));
    assert_ne!(h.present().compute_hash().unwrap(), empty);
    h.undo();
    assert_eq!(h.present().compute_hash().unwrap(), empty);
}
