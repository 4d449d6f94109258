use huffcode::HuffmanCodec;
use std::fs::File;
use std::io::{BufReader, BufWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    let dir = std::env::temp_dir();
    let sample_path = dir.join("huffcode_sample.txt");
    let packed_path = dir.join("huffcode_sample.huff");
    let restored_path = dir.join("huffcode_restored.txt");

    std::fs::write(&sample_path, sample_text)?;
    println!("Created sample file: {} bytes", sample_text.len());

    let codec = HuffmanCodec::default();

    let input = BufReader::new(File::open(&sample_path)?);
    let output = BufWriter::new(File::create(&packed_path)?);
    codec.encode_from_file(input, output)?;

    let compressed_size = std::fs::metadata(&packed_path)?.len();
    println!(
        "Compressed to: {} bytes ({:.1}% of original)",
        compressed_size,
        compressed_size as f64 / sample_text.len() as f64 * 100.0
    );

    let compressed = BufReader::new(File::open(&packed_path)?);
    let restored = BufWriter::new(File::create(&restored_path)?);
    codec.decode_from_file(compressed, restored)?;

    let restored_text = std::fs::read_to_string(&restored_path)?;
    std::fs::remove_file(&sample_path)?;
    std::fs::remove_file(&packed_path)?;
    std::fs::remove_file(&restored_path)?;

    if sample_text != restored_text {
        return Err("decompressed text does not match the original".into());
    }
    println!("Decompression successful, data matches exactly.");

    Ok(())
}
