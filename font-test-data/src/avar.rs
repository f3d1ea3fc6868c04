//! avar table payloads

// two axes, [wdth, wght]; the 0.3 -> 0.8 point of wdth is stored quantized
#[rustfmt::skip]
pub static WDTH_WGHT: &[u8] = &[
    0x00, 0x01, 0x00, 0x00, // version 1.0
    0x00, 0x00,             // reserved
    0x00, 0x02,             // axisCount 2
    // wdth
    0x00, 0x04,             // positionMapCount 4
    0xC0, 0x00, 0xC0, 0x00, // -1.0 -> -1.0
    0x00, 0x00, 0x00, 0x00, //  0.0 ->  0.0
    0x13, 0x33, 0x33, 0x33, //  0.2999878 -> 0.7999878
    0x40, 0x00, 0x40, 0x00, //  1.0 ->  1.0
    // wght
    0x00, 0x03,             // positionMapCount 3
    0xC0, 0x00, 0xC0, 0x00, // -1.0 -> -1.0
    0x00, 0x00, 0x00, 0x00, //  0.0 ->  0.0
    0x40, 0x00, 0x40, 0x00, //  1.0 ->  1.0
];

// major version 513, minor version 774
#[rustfmt::skip]
pub static UNSUPPORTED_VERSION: &[u8] = &[
    0x02, 0x01, 0x03, 0x06,
    0x00, 0x00, 0x00, 0x00,
];

// header claims one axis but the block is cut off after the first point
#[rustfmt::skip]
pub static TRUNCATED: &[u8] = &[
    0x00, 0x01, 0x00, 0x00,
    0x00, 0x00,
    0x00, 0x01,
    0x00, 0x02,
    0xC0, 0x00, 0xC0, 0x00,
];
