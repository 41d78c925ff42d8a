#![no_main]
use libfuzzer_sys::fuzz_target;
use zenanymap::SampleWidth;

fuzz_target!(|data: &[u8]| {
    // Standard dispatch and both wide extensions; must never panic
    let _ = zenanymap::decode(data, enough::Unstoppable);
    let _ = zenanymap::decode_wide(data, SampleWidth::Wide16, enough::Unstoppable);
    let _ = zenanymap::decode_wide(data, SampleWidth::Wide32, enough::Unstoppable);
    let _ = zenanymap::ImageInfo::from_bytes(data);
});
