#![no_main]
use libfuzzer_sys::fuzz_target;
use zenanymap::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical samples
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };
    let image = &decoded.image;

    // Re-encode in the same encoding
    let reencoded = match decoded.magic.encoding() {
        Encoding::Ascii => encode_ascii(image, enough::Unstoppable),
        Encoding::Binary => encode_binary(image, SampleWidth::Standard, enough::Unstoppable),
    };

    let Ok(reencoded) = reencoded else { return };
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(image.samples(), decoded2.image.samples(), "roundtrip sample mismatch");
    assert_eq!(image.width(), decoded2.image.width());
    assert_eq!(image.height(), decoded2.image.height());
    assert_eq!(image.channels(), decoded2.image.channels());
});
