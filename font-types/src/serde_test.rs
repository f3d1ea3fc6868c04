//! ensure serde is working as expected

use super::*;

#[test]
fn test_serde() {
    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
    struct MyTypes {
        f1: Fixed,
        f2: F2Dot14,
        tag: Tag,
        version: MajorMinor,
    }

    let my_instance = MyTypes {
        f1: Fixed::from_f64(521.5),
        f2: F2Dot14::from_f64(0.3),
        tag: Tag::new(b"wdth"),
        version: MajorMinor::new(1, 0),
    };

    let dumped = serde_json::to_string(&my_instance).unwrap();
    let loaded: MyTypes = serde_json::from_str(&dumped).unwrap();
    assert_eq!(my_instance, loaded)
}
