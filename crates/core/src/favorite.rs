// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The bookmark ledger.
//!
//! Favorites have no state machine; a toggle flips membership of one
//! `(student, offer)` pair and cannot fail on repetition.

use intern_link_domain::{Favorite, Identity, OfferId};

/// The result of toggling a bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    /// The student's bookmarks after the toggle.
    pub favorites: Vec<Favorite>,
    /// True if the toggle added the bookmark, false if it removed it.
    pub added: bool,
}

/// Toggles a student's bookmark on an offer.
///
/// Present pairs are removed, absent pairs are added. Two consecutive
/// toggles restore the original set.
///
/// # Arguments
///
/// * `favorites` - The student's current bookmarks
/// * `student` - The acting student
/// * `offer_id` - The offer to toggle
#[must_use]
pub fn toggle_favorite(
    favorites: &[Favorite],
    student: &Identity,
    offer_id: OfferId,
) -> FavoriteToggle {
    let existing = favorites
        .iter()
        .position(|favorite| favorite.student_id == student.id && favorite.offer_id == offer_id);

    let mut new_favorites: Vec<Favorite> = favorites.to_vec();
    let added: bool = match existing {
        Some(position) => {
            new_favorites.remove(position);
            false
        }
        None => {
            new_favorites.push(Favorite::new(student.id, offer_id));
            true
        }
    };

    FavoriteToggle {
        favorites: new_favorites,
        added,
    }
}
