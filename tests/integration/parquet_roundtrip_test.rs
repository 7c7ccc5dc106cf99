//! Integration tests for Parquet output
//!
//! Files written by the encoder are read back with the Arrow reader and
//! compared against the loaded table and its CSV rendering.

#[cfg(test)]
mod parquet_roundtrip_tests {
    use arrow_array::{Array, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray};
    use bytes::Bytes;
    use jsontab::conversion::{convert_json_string, ConversionConfig};
    use jsontab::error::{ConversionError, EncodingError};
    use jsontab::formatter::{encode_parquet, OutputFormat};
    use jsontab::table::{load_table, Cell};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use pretty_assertions::assert_eq;

    fn read_back(bytes: Vec<u8>) -> Vec<RecordBatch> {
        let reader = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes))
            .unwrap()
            .build()
            .unwrap();
        reader.collect::<Result<Vec<_>, _>>().unwrap()
    }

    fn single_batch(json: &str) -> RecordBatch {
        let table = load_table(json.as_bytes()).unwrap();
        let mut batches = read_back(encode_parquet(&table).unwrap());
        assert_eq!(batches.len(), 1);
        batches.remove(0)
    }

    #[test]
    fn test_values_survive_round_trip() {
        let batch = single_batch(
            r#"[
                {"id":1,"score":9.5,"ok":true,"name":"a","tags":["x"]},
                {"id":2,"score":7,"ok":false,"name":null,"tags":null},
                {"id":null,"score":null,"ok":null,"name":"c","tags":{"k":1}}
            ]"#,
        );

        assert_eq!(batch.num_rows(), 3);
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["id", "score", "ok", "name", "tags"]);

        let ids = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(ids.value(0), 1);
        assert_eq!(ids.value(1), 2);
        assert!(ids.is_null(2));

        let scores = batch.column(1).as_any().downcast_ref::<Float64Array>().unwrap();
        assert_eq!(scores.value(0), 9.5);
        assert_eq!(scores.value(1), 7.0);
        assert!(scores.is_null(2));

        let oks = batch.column(2).as_any().downcast_ref::<BooleanArray>().unwrap();
        assert!(oks.value(0));
        assert!(!oks.value(1));
        assert!(oks.is_null(2));

        let names = batch.column(3).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(names.value(0), "a");
        assert!(names.is_null(1));
        assert_eq!(names.value(2), "c");

        let tags = batch.column(4).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(tags.value(0), r#"["x"]"#);
        assert!(tags.is_null(1));
        assert_eq!(tags.value(2), r#"{"k":1}"#);
    }

    fn csv_and_parquet(json: &str) -> (String, RecordBatch) {
        let report = convert_json_string(json, &ConversionConfig::default()).unwrap();
        assert!(report.all_succeeded());

        let csv = String::from_utf8(report.output(OutputFormat::Csv).unwrap().bytes.clone())
            .unwrap();
        let mut batches = read_back(report.output(OutputFormat::Parquet).unwrap().bytes.clone());
        (csv, batches.remove(0))
    }

    #[test]
    fn test_parquet_agrees_with_csv() {
        let (csv, batch) = csv_and_parquet(
            r#"[{"city":"Oslo","pop":700000,"area":454},{"city":"Bergen","pop":285000,"area":465.3}]"#,
        );

        let cities = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
        let pops = batch.column(1).as_any().downcast_ref::<Int64Array>().unwrap();
        let areas = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
        let rebuilt: Vec<String> = (0..batch.num_rows())
            .map(|row| {
                format!(
                    "{},{},{}",
                    cities.value(row),
                    pops.value(row),
                    Cell::Float(areas.value(row)).render()
                )
            })
            .collect();

        let csv_rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(csv_rows, vec!["Oslo,700000,454.0", "Bergen,285000,465.3"]);
        assert_eq!(rebuilt, csv_rows);
    }

    #[test]
    fn test_large_integers_in_float_column_agree() {
        let (csv, batch) = csv_and_parquet(r#"[{"a":9007199254740993},{"a":18446744073709551615}]"#);

        let values = batch.column(0).as_any().downcast_ref::<Float64Array>().unwrap();
        let from_csv: Vec<f64> = csv
            .lines()
            .skip(1)
            .map(|line| line.parse::<f64>().unwrap())
            .collect();
        assert_eq!(from_csv, vec![values.value(0), values.value(1)]);
        assert_eq!(values.value(0), 9007199254740992.0);
    }

    #[test]
    fn test_flattened_object_round_trip() {
        let batch = single_batch(r#"{"a":{"b":1,"c":"two"}}"#);
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.schema().field(0).name(), "a.b");
        assert_eq!(batch.schema().field(1).name(), "a.c");
    }

    #[test]
    fn test_mixed_column_fails_only_parquet() {
        let report =
            convert_json_string(r#"[{"a":1,"b":"k"},{"a":"one","b":"l"}]"#, &ConversionConfig::default())
                .unwrap();

        assert_eq!(
            report.output(OutputFormat::Csv).unwrap().bytes,
            b"a,b\n1,k\none,l\n".to_vec()
        );

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, OutputFormat::Parquet);
        match failures[0].1 {
            ConversionError::EncodingError(EncodingError::UnsupportedColumnType { column, found }) => {
                assert_eq!(column, "a");
                assert_eq!(found, "int64, string");
            }
            other => panic!("unexpected failure: {:?}", other),
        }
        assert!(failures[0].1.user_message().starts_with("Parquet encoding failed"));
    }
}
