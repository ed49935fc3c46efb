//! Access control and masking: the only path by which sensitive object
//! fields leave the engine. Both functions are pure and idempotent.

#![warn(missing_docs)]

use std::collections::BTreeSet;

use graffiti_core::{Object, Session};

/// True if `viewer` may observe `object` at all.
///
/// - `true` if `object.allowed` is absent (the object is public).
/// - Otherwise `true` iff `viewer` is present and is either the object's
///   owner or named in `object.allowed`.
pub fn is_visible(object: &Object, viewer: Option<&Session>) -> bool {
    let Some(allowed) = &object.allowed else {
        return true;
    };
    let Some(viewer) = viewer else {
        return false;
    };
    viewer.actor == object.actor || allowed.contains(&viewer.actor)
}

/// Rewrite `object` into the shape a caller is permitted to observe.
///
/// Owners see the object unchanged. Non-owners (including anonymous
/// viewers) never see the `allowed` allow-list itself, and only see the
/// subset of `channels` they explicitly queried (I5) — a point read
/// passes an empty `queried_channels`, so non-owners observe no channels
/// at all on `get`.
pub fn mask(mut object: Object, queried_channels: &BTreeSet<String>, viewer: Option<&Session>) -> Object {
    let is_owner = viewer.is_some_and(|v| v.actor == object.actor);
    if is_owner {
        return object;
    }

    object.allowed = object.allowed.as_ref().map(|_| {
        viewer
            .map(|v| BTreeSet::from([v.actor.clone()]))
            .unwrap_or_default()
    });
    object.channels = object.channels.intersection(queried_channels).cloned().collect();
    object
}
