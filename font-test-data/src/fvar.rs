//! fvar table payloads

// two axes (wdth 75..100..125, wght 100..400..900), no instances
#[rustfmt::skip]
pub static WDTH_WGHT: &[u8] = &[
    0x00, 0x01, 0x00, 0x00, // version 1.0
    0x00, 0x10,             // axesArrayOffset 16
    0x00, 0x02,             // reserved
    0x00, 0x02,             // axisCount 2
    0x00, 0x14,             // axisSize 20
    0x00, 0x00,             // instanceCount 0
    0x00, 0x0C,             // instanceSize 12
    // wdth
    b'w', b'd', b't', b'h',
    0x00, 0x4B, 0x00, 0x00, // minValue 75
    0x00, 0x64, 0x00, 0x00, // defaultValue 100
    0x00, 0x7D, 0x00, 0x00, // maxValue 125
    0x00, 0x00,             // flags
    0x01, 0x00,             // axisNameID 256
    // wght
    b'w', b'g', b'h', b't',
    0x00, 0x64, 0x00, 0x00, // minValue 100
    0x01, 0x90, 0x00, 0x00, // defaultValue 400
    0x03, 0x84, 0x00, 0x00, // maxValue 900
    0x00, 0x00,             // flags
    0x01, 0x01,             // axisNameID 257
];
