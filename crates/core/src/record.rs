//! The [`Record`] trait every managed entity implements, plus the
//! `define_record_enum!` helper for the closed status/grade/category sets.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::config::RanchConfig;
use crate::types::{Date, RecordId, Timestamp};

/// A flat value object held by a [`RecordCollection`](crate::RecordCollection).
///
/// Each implementor pairs with a creation DTO (`New`), a sparse patch DTO
/// (`Patch`), the closed enum used for status allow-lists, an optional
/// secondary enum used for quality/grade/category allow-lists, and a
/// statistics struct computed from the whole collection.
pub trait Record: Clone + Debug + Serialize {
    type New: validator::Validate;
    type Patch;
    type Status: Copy + Eq + Ord + Debug + Serialize;
    type Quality: Copy + Eq + Debug + Serialize;
    type Stats;

    /// Entity name used in logs and errors, e.g. `"breeding_record"`.
    const ENTITY: &'static str;

    /// Prefix of generated identifiers, e.g. `"BR"`.
    const ID_PREFIX: &'static str;

    /// Build a record from a creation DTO. `now` stamps both timestamps.
    fn from_new(id: RecordId, input: Self::New, now: Timestamp) -> Self;

    fn id(&self) -> &str;

    /// Overwrite every field present in `patch` and bump `updated_at`.
    fn apply_patch(&mut self, patch: Self::Patch, now: Timestamp);

    /// Field values the free-text search term is matched against.
    fn searchable_fields(&self) -> Vec<&str>;

    fn status(&self) -> Self::Status;

    /// Value checked against the quality allow-list. `None` never matches a
    /// non-empty allow-list.
    fn quality(&self) -> Option<Self::Quality> {
        None
    }

    /// The date checked against a date-range filter.
    fn filter_date(&self) -> Option<Date>;

    /// Summary statistics over the full, unfiltered collection.
    fn summarize(records: &[Self], today: Date, config: &RanchConfig) -> Self::Stats;
}

/// Quality axis for record types that have no grade or category.
///
/// Uninhabited: an allow-list of `Ungraded` is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ungraded {}

/// Declare a closed, `snake_case`-serialised enum with an `ALL` listing and
/// an `as_str` label matching the serialised form.
#[macro_export]
macro_rules! define_record_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The serialised name of this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
