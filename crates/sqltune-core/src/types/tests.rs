use super::*;

mod value_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_u64_accepts_numeric_representations() {
        assert_eq!(Value::UInt64(42).as_u64(), Some(42));
        assert_eq!(Value::Int64(42).as_u64(), Some(42));
        assert_eq!(Value::String("150000".into()).as_u64(), Some(150_000));
        assert_eq!(Value::Decimal(" 7 ".into()).as_u64(), Some(7));
    }

    #[test]
    fn test_as_u64_rejects_negative_and_null() {
        assert_eq!(Value::Int64(-1).as_u64(), None);
        assert_eq!(Value::Null.as_u64(), None);
    }

    #[test]
    fn test_as_i64_from_unsigned_overflow() {
        assert_eq!(Value::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(Value::UInt64(0).as_i64(), Some(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Bytes(vec![1, 2, 3]).to_string(), "<3 bytes>");
        assert_eq!(Value::from("BTREE").to_string(), "BTREE");
    }
}

mod row_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_row() -> Row {
        Row::new(
            vec!["Key_name".into(), "NON_UNIQUE".into(), "Comment".into()],
            vec![
                Value::from("PRIMARY"),
                Value::Int64(0),
                Value::Bytes(b"Unused".to_vec()),
            ],
        )
    }

    #[test]
    fn test_get_by_name_exact() {
        let row = sample_row();
        assert_eq!(row.get_by_name("Key_name"), Some(&Value::from("PRIMARY")));
    }

    #[test]
    fn test_get_by_name_falls_back_to_case_insensitive() {
        let row = sample_row();
        assert_eq!(row.get_by_name("Non_unique"), Some(&Value::Int64(0)));
        assert_eq!(row.get_by_name("missing"), None);
    }

    #[test]
    fn test_get_string_decodes_bytes() {
        let row = sample_row();
        assert_eq!(row.get_string("Comment").as_deref(), Some("Unused"));
        assert_eq!(row.get_string("NON_UNIQUE").as_deref(), Some("0"));
    }
}

mod query_result_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_rows() {
        let result = QueryResult::from_rows(
            &["table_name"],
            vec![vec![Value::from("users")], vec![Value::from("orders")]],
        );

        assert!(result.has_rows());
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.columns[0].name, "table_name");
        assert_eq!(
            result.first_row().and_then(|r| r.get_string("table_name")),
            Some("users".to_string())
        );
    }

    #[test]
    fn test_empty() {
        let result = QueryResult::empty();
        assert!(!result.has_rows());
        assert!(result.first_row().is_none());
    }
}
