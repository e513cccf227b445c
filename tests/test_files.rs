use std::fs;

use letter_huffman::text_format::{
    read_code_table, read_encoded_message, read_packed, read_source_text, write_code_table,
    write_encoded_message, write_packed,
};
use letter_huffman::{CodecConfig, HuffmanCodec, HuffmanError, SymbolPolicy};

#[test]
fn encode_to_files_then_decode_from_them() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("input.txt");
    let encoded_path = dir.path().join("encoded.txt");
    let table_path = dir.path().join("code_table.txt");

    // everything after the sentinel is ignored
    fs::write(&source, "She sells\nsea shells*not this part").unwrap();

    let config = CodecConfig::default();
    let text = read_source_text(&source, config.sentinel).unwrap();
    assert_eq!(text, "She sells\nsea shells");

    let (codec, encoded) = HuffmanCodec::build_and_encode(&text, config).unwrap();
    write_encoded_message(&encoded_path, &encoded, config.sentinel).unwrap();
    write_code_table(&table_path, &codec.dump_code_table()).unwrap();

    let on_disk = fs::read_to_string(&encoded_path).unwrap();
    assert!(on_disk.ends_with('*'));
    assert_eq!(on_disk.matches('*').count(), 1);

    // a later decode reuses the same tree
    let bits = read_encoded_message(&encoded_path, config.sentinel).unwrap();
    assert_eq!(codec.decode(&bits).unwrap().text, "shesellsseashells");
    assert_eq!(codec.decode(&bits).unwrap().text, "shesellsseashells");

    let table = read_code_table(&table_path).unwrap();
    assert_eq!(table, codec.dump_code_table());
    assert_eq!(fs::read_to_string(&table_path).unwrap().lines().count(), 26);
}

#[test]
fn code_table_follows_collection_order() {
    let codec = HuffmanCodec::from_text("zzzzy", CodecConfig::default()).unwrap();
    let rendered = codec.dump_code_table().to_string();
    let first: Vec<&str> = rendered.lines().map(|l| &l[..1]).collect();
    // zero-frequency letters first, alphabetically, then y, then z
    assert_eq!(first[0], "a");
    assert_eq!(first[24], "y");
    assert_eq!(first[25], "z");
}

#[test]
fn packed_file_is_self_contained() {
    let dir = tempfile::tempdir().unwrap();
    let packed_path = dir.path().join("message.bin");

    let config = CodecConfig::default().with_symbols(SymbolPolicy::Ignore);
    let (codec, encoded) =
        HuffmanCodec::build_and_encode("Hello, packed world!", config).unwrap();
    write_packed(&packed_path, &codec.pack(&encoded).unwrap()).unwrap();

    let packed = read_packed(&packed_path).unwrap();
    let (_, decoded) = HuffmanCodec::unpack(&packed, config).unwrap();
    assert_eq!(decoded.text, "hellopackedworld");
}

#[test]
fn custom_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encoded.txt");
    let config = CodecConfig::default().with_sentinel('#');

    let (codec, encoded) = HuffmanCodec::build_and_encode("abcabc", config).unwrap();
    write_encoded_message(&path, &encoded, '#').unwrap();
    let bits = read_encoded_message(&path, '#').unwrap();
    assert_eq!(codec.decode(&bits).unwrap().text, "abcabc");
}

#[test]
fn unreadable_source_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let err = read_source_text(&missing, '*').unwrap_err();
    assert!(matches!(err, HuffmanError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("missing.txt"));
}
