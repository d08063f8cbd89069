//! Cross-module scenarios: persistence round trips, identity policy,
//! entity lifecycle invariants and gizmo edits surviving a save.

mod persistence;
