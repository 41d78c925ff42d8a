#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // PGM ASCII 3x2
    let p2 = b"P2\n# seed\n3 2\n255\n0 64 128\n192 255 100\n";
    fs::write(format!("{dir}/p2_3x2.pgm"), p2).unwrap();

    // PPM ASCII 1x1
    let p3 = b"P3\n1 1\n255\n255 0 128\n";
    fs::write(format!("{dir}/p3_1x1.ppm"), p3).unwrap();

    // PGM 3x2, 8-bit
    let p5 = b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64";
    fs::write(format!("{dir}/p5_3x2.pgm"), p5).unwrap();

    // PGM 2x1, 16-bit big-endian
    let p5_16 = b"P5\n2 1\n300\n\x00\x0a\x01\x2c";
    fs::write(format!("{dir}/p5_16bit_2x1.pgm"), p5_16).unwrap();

    // PPM 2x2
    let p6 = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/p6_2x2.ppm"), p6).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/comments_only.bin"), b"# a\n# b\n").unwrap();
    fs::write(format!("{dir}/p5_short.bin"), b"P5\n4 4\n255\n\x00").unwrap();
    fs::write(format!("{dir}/p2_overflow.bin"), b"P2\n1 1\n9\n99999999999\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
