#[cfg(test)]
mod tests {
    use crate::habits::habit_from_document;
    use crate::value::{Document, Value};
    use habitly_common::models::Recurrence;
    use std::collections::HashMap;

    fn doc(fields: Vec<(&str, Value)>) -> Document {
        Document {
            name: "projects/p/databases/(default)/documents/habits/h1".to_string(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn base_fields() -> Vec<(&'static str, Value)> {
        vec![
            ("uid", Value::string("u1")),
            ("name", Value::string("Stretch")),
            ("alertTime", Value::string("09:00")),
        ]
    }

    #[test]
    fn explicit_repeat_type_wins_over_legacy_flag() {
        let mut fields = base_fields();
        fields.push(("repeatType", Value::string("once")));
        fields.push(("isRecurring", Value::boolean(true)));
        fields.push(("startDate", Value::string("2024-03-01")));

        let habit = habit_from_document(&doc(fields)).unwrap();
        assert_eq!(
            habit.recurrence,
            Recurrence::Once {
                date: Some("2024-03-01".to_string())
            }
        );
    }

    #[test]
    fn legacy_recurring_true_behaves_as_daily() {
        let mut fields = base_fields();
        fields.push(("isRecurring", Value::boolean(true)));

        let habit = habit_from_document(&doc(fields)).unwrap();
        assert_eq!(habit.recurrence, Recurrence::Daily);
    }

    #[test]
    fn legacy_non_recurring_falls_back_to_once_on_creation_date() {
        let mut fields = base_fields();
        fields.push(("isRecurring", Value::boolean(false)));
        fields.push(("createdAt", Value::timestamp("2024-03-01T08:30:00Z")));

        let habit = habit_from_document(&doc(fields)).unwrap();
        assert_eq!(
            habit.recurrence,
            Recurrence::Once {
                date: Some("2024-03-01".to_string())
            }
        );
        assert!(habit.is_due_on("2024-03-01", 5));
        assert!(!habit.is_due_on("2024-03-02", 6));
    }

    #[test]
    fn record_with_neither_field_is_once() {
        let habit = habit_from_document(&doc(base_fields())).unwrap();
        assert_eq!(habit.recurrence, Recurrence::Once { date: None });
        // no usable date at all: never due
        assert!(!habit.is_due_on("2024-03-01", 5));
    }

    #[test]
    fn weekly_collects_in_range_days() {
        let mut fields = base_fields();
        fields.push(("repeatType", Value::string("weekly")));
        fields.push((
            "repeatDays",
            Value::array(vec![
                Value::integer(1),
                Value::integer(3),
                Value::integer(5),
                Value::integer(9), // out of range, dropped
            ]),
        ));

        let habit = habit_from_document(&doc(fields)).unwrap();
        assert_eq!(
            habit.recurrence,
            Recurrence::Weekly {
                days: vec![1, 3, 5]
            }
        );
    }

    #[test]
    fn weekly_with_malformed_day_set_gets_empty_set() {
        let mut fields = base_fields();
        fields.push(("repeatType", Value::string("weekly")));
        fields.push(("repeatDays", Value::string("not-an-array")));

        let habit = habit_from_document(&doc(fields)).unwrap();
        assert_eq!(habit.recurrence, Recurrence::Weekly { days: vec![] });
        assert!(!habit.is_due_on("2024-03-04", 1));
    }

    #[test]
    fn unknown_repeat_type_is_treated_as_once() {
        let mut fields = base_fields();
        fields.push(("repeatType", Value::string("fortnightly")));
        fields.push(("startDate", Value::string("2024-03-01")));

        let habit = habit_from_document(&doc(fields)).unwrap();
        assert_eq!(
            habit.recurrence,
            Recurrence::Once {
                date: Some("2024-03-01".to_string())
            }
        );
    }

    #[test]
    fn empty_alert_time_reads_back_as_none() {
        let mut fields = base_fields();
        fields[2] = ("alertTime", Value::string(""));
        fields.push(("repeatType", Value::string("daily")));

        let habit = habit_from_document(&doc(fields)).unwrap();
        assert_eq!(habit.alert_time, None);
    }

    #[test]
    fn document_without_owner_is_skipped() {
        let fields = vec![
            ("name", Value::string("Orphan")),
            ("repeatType", Value::string("daily")),
        ];
        assert!(habit_from_document(&doc(fields)).is_none());
    }
}
