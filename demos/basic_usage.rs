use letter_huffman::text_format;
use letter_huffman::{CodecConfig, HuffmanCodec, SymbolPolicy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_text = "The quick brown fox jumps over the lazy dog. \
                       Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    let dir = std::env::temp_dir();
    let encoded_path = dir.join("sample.huff.txt");
    let table_path = dir.join("code_table.txt");

    let config = CodecConfig::default().with_symbols(SymbolPolicy::Ignore);
    let (codec, encoded) = HuffmanCodec::build_and_encode(sample_text, config)?;

    println!(
        "Encoded {} letters into {} bits ({:.2} bits/letter, fixed width would be 5)",
        encoded.symbol_count,
        encoded.bit_len(),
        encoded.bit_len() as f64 / encoded.symbol_count as f64
    );

    text_format::write_encoded_message(&encoded_path, &encoded, config.sentinel)?;
    text_format::write_code_table(&table_path, &codec.dump_code_table())?;
    print!("{}", codec.dump_code_table());

    let bits = text_format::read_encoded_message(&encoded_path, config.sentinel)?;
    let decoded = codec.decode(&bits)?;
    println!("Decoded: {}", decoded.text);

    std::fs::remove_file(&encoded_path)?;
    std::fs::remove_file(&table_path)?;

    Ok(())
}
