//! Callbacks a parent view hands to its record lists and cards.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Row-level actions available on a record card or table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordAction {
    View,
    Edit,
    Delete,
}

/// Handler for the view/edit/delete callbacks of a record list.
pub trait RecordActions<R: Record> {
    fn on_view(&mut self, record: &R);
    fn on_edit(&mut self, record: &R);
    fn on_delete(&mut self, record: &R);
}

/// Route `action` on `record` to the matching callback of `handler`.
pub fn dispatch<R, H>(handler: &mut H, action: RecordAction, record: &R)
where
    R: Record,
    H: RecordActions<R> + ?Sized,
{
    tracing::trace!(entity = R::ENTITY, id = record.id(), ?action, "Dispatching record action");
    match action {
        RecordAction::View => handler.on_view(record),
        RecordAction::Edit => handler.on_edit(record),
        RecordAction::Delete => handler.on_delete(record),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::records::horse::{Horse, HorseSex, HorseStatus, NewHorse};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(RecordAction, String)>,
    }

    impl RecordActions<Horse> for Recorder {
        fn on_view(&mut self, record: &Horse) {
            self.calls.push((RecordAction::View, record.id.clone()));
        }
        fn on_edit(&mut self, record: &Horse) {
            self.calls.push((RecordAction::Edit, record.id.clone()));
        }
        fn on_delete(&mut self, record: &Horse) {
            self.calls.push((RecordAction::Delete, record.id.clone()));
        }
    }

    #[test]
    fn dispatch_routes_each_action() {
        let horse = Horse::from_new(
            "HR-1".to_string(),
            NewHorse {
                name: "Duke".to_string(),
                registration_number: None,
                breed: "Arabian".to_string(),
                color: "Grey".to_string(),
                sex: HorseSex::Gelding,
                date_of_birth: NaiveDate::from_ymd_opt(2012, 3, 4).unwrap(),
                castration_date: None,
                owner: "Ranch".to_string(),
                location: "Barn".to_string(),
                status: HorseStatus::Active,
                notes: None,
            },
            Utc::now(),
        );
        let mut recorder = Recorder::default();
        for action in [RecordAction::View, RecordAction::Edit, RecordAction::Delete] {
            dispatch(&mut recorder, action, &horse);
        }
        assert_eq!(
            recorder.calls,
            vec![
                (RecordAction::View, "HR-1".to_string()),
                (RecordAction::Edit, "HR-1".to_string()),
                (RecordAction::Delete, "HR-1".to_string()),
            ]
        );
    }
}
