use std::io::Write;

use simd_dsv::{parse_number, Format, Reader};

fn fixture(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file
}

fn read_all(reader: &Reader) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    reader.parse(|row| {
        rows.push(
            row.iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
        );
    });

    rows
}

fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[test]
fn test_default_format() {
    let file = fixture(b"a,b,c\n1,2,3\n4,5,6\n");
    let reader = Reader::open(file.path(), Format::new()).unwrap();

    assert_eq!(reader.headers(), &["a", "b", "c"]);
    assert_eq!(
        read_all(&reader),
        strings(&[&["1", "2", "3"], &["4", "5", "6"]])
    );
}

#[test]
fn test_quoted_delimiter() {
    let file = fixture(b"name,value\n\"hello,world\",123\n");

    let mut format = Format::new();
    format.quote(b'"');

    let reader = Reader::open(file.path(), format).unwrap();

    assert_eq!(reader.headers(), &["name", "value"]);
    assert_eq!(read_all(&reader), strings(&[&["hello,world", "123"]]));
}

#[test]
fn test_quoted_terminator() {
    let file = fixture(b"name,desc\n\"John\",\"Line1\nLine2\"\n");

    let mut format = Format::new();
    format.quote(b'"');

    let reader = Reader::open(file.path(), format).unwrap();

    assert_eq!(read_all(&reader), strings(&[&["John", "Line1\nLine2"]]));
}

#[test]
fn test_header_on_second_row() {
    let file = fixture(b"skip\na,b\n1,2\n");

    let mut format = Format::new();
    format.header_row(1);

    let reader = Reader::open(file.path(), format).unwrap();

    assert_eq!(reader.headers(), &["a", "b"]);
    assert_eq!(read_all(&reader), strings(&[&["1", "2"]]));
}

#[test]
fn test_no_trailing_terminator() {
    let file = fixture(b"a,b,c\n1,2,3\n4,5,6");
    let reader = Reader::open(file.path(), Format::new()).unwrap();

    assert_eq!(
        read_all(&reader),
        strings(&[&["1", "2", "3"], &["4", "5", "6"]])
    );
}

#[test]
fn test_width_mismatches() {
    let file = fixture(b"a,b,c\n1,2,3,4,5\n");
    let reader = Reader::open(file.path(), Format::new()).unwrap();

    assert_eq!(read_all(&reader), strings(&[&["1", "2", "3"]]));

    let file = fixture(b"a,b,c,d\n1,2,3\n");
    let reader = Reader::open(file.path(), Format::new()).unwrap();

    assert_eq!(read_all(&reader), strings(&[&["1", "2", "3", ""]]));
}

#[test]
fn test_tsv() {
    let file = fixture(b"a\tb\n1\t2\n");

    let mut format = Format::new();
    format.delimiter(b'\t');

    let reader = Reader::open(file.path(), format).unwrap();

    assert_eq!(reader.headers(), &["a", "b"]);
    assert_eq!(read_all(&reader), strings(&[&["1", "2"]]));
}

#[test]
fn test_crlf_is_not_normalised() {
    let file = fixture(b"a,b\r\n1,2\r\n");
    let reader = Reader::open(file.path(), Format::new()).unwrap();

    assert_eq!(reader.headers(), &["a", "b\r"]);
    assert_eq!(read_all(&reader), strings(&[&["1", "2\r"]]));
}

#[test]
fn test_doubled_quotes_are_not_unescaped() {
    let file = fixture(b"a\n\"he said \"\"hi\"\"\"\n");

    let mut format = Format::new();
    format.quote(b'"');

    let reader = Reader::open(file.path(), format).unwrap();

    // Outer pair trimmed, inner doubled quotes surfaced verbatim.
    assert_eq!(read_all(&reader), strings(&[&["he said \"\"hi\"\""]]));
}

#[test]
fn test_header_row_past_end_of_file() {
    let file = fixture(b"a,b\n1,2\n");

    let mut format = Format::new();
    format.header_row(10);

    let reader = Reader::open(file.path(), format).unwrap();

    assert!(reader.headers().is_empty());
    assert_eq!(reader.count_records(), 0);
}

#[test]
fn test_unterminated_quoted_region_extends_to_end() {
    let file = fixture(b"a,b\n1,\"unclosed\n2,3\n");

    let mut format = Format::new();
    format.quote(b'"');

    let reader = Reader::open(file.path(), format).unwrap();

    assert_eq!(read_all(&reader), strings(&[&["1", "\"unclosed\n2,3\n"]]));
}

#[test]
fn test_large_file_through_the_vector_path() {
    const ROWS: u64 = 100_000;

    let mut contents = Vec::new();
    contents.extend_from_slice(b"id,name,value\n");

    for i in 0..ROWS {
        contents.extend_from_slice(format!("{i},row-{i},{}\n", i * 3).as_bytes());
    }

    let file = fixture(&contents);

    let mut reader = Reader::open(file.path(), Format::new()).unwrap();
    reader.prefetch_ahead(2 * 1024 * 1024);

    assert_eq!(reader.headers(), &["id", "name", "value"]);

    let mut count: u64 = 0;
    let mut id_sum: u64 = 0;
    let mut value_sum: u64 = 0;

    reader.parse(|row| {
        count += 1;
        id_sum += parse_number::<u64>(&row[0]).unwrap();
        value_sum += parse_number::<u64>(&row[2]).unwrap();
    });

    assert_eq!(count, ROWS);
    assert_eq!(id_sum, ROWS * (ROWS - 1) / 2);
    assert_eq!(value_sum, 3 * id_sum);
}
