//! Unit tests for CSV encoding of loaded tables
//!
//! Tests cover:
//! - Header and row layout
//! - Rendering of each cell kind
//! - Flattened and wrapped objects
//! - Alternate delimiters

use jsontab::conversion::{ConversionConfig, DelimiterType};
use jsontab::formatter::{encode_csv, encode_csv_with_config};
use jsontab::table::{load_table, Table};

fn table(json: &str) -> Table {
    load_table(json.as_bytes()).unwrap()
}

fn csv_text(json: &str) -> String {
    String::from_utf8(encode_csv(&table(json)).unwrap()).unwrap()
}

#[cfg(test)]
mod csv_encoding_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_then_one_line_per_row() {
        let text = csv_text(r#"[{"id":1,"name":"a"},{"id":2,"name":"b"},{"id":3,"name":"c"}]"#);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["id,name", "1,a", "2,b", "3,c"]);
    }

    #[test]
    fn test_cell_rendering() {
        let text = csv_text(
            r#"[{"n":null,"b":true,"i":-4,"f":2.0,"g":0.25,"s":"plain","j":[1,"x"],"o":{"k":null}}]"#,
        );
        assert_eq!(
            text,
            "n,b,i,f,g,s,j,o\n,true,-4,2.0,0.25,plain,\"[1,\"\"x\"\"]\",\"{\"\"k\"\":null}\"\n"
        );
    }

    #[test]
    fn test_flattened_object_is_one_record() {
        let text = csv_text(r#"{"user":{"name":"n","address":{"city":"c"}},"id":9}"#);
        assert_eq!(text, "id,user.name,user.address.city\n9,n,c\n");
    }

    #[test]
    fn test_wrapped_object_column() {
        let text = csv_text(r#"{"a.b":1,"a":{"b":2}}"#);
        assert_eq!(text, "value\n\"{\"\"a.b\"\":1,\"\"a\"\":{\"\"b\"\":2}}\"\n");
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(csv_text(r#"[{"名前":"ünïcödé"}]"#), "名前\nünïcödé\n");
    }

    #[test]
    fn test_mixed_column_still_encodes() {
        assert_eq!(csv_text(r#"[{"a":1},{"a":"one"},{"a":true}]"#), "a\n1\none\ntrue\n");
    }

    #[test]
    fn test_pipe_delimiter() {
        let config = ConversionConfig::default().with_delimiter(DelimiterType::Pipe);
        let bytes = encode_csv_with_config(&table(r#"[{"a":"x|y","b":2}]"#), &config).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a|b\n\"x|y\"|2\n");
    }
}
