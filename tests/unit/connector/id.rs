//! Tests for connector id grammar, mates and compatibility

#[cfg(test)]
mod tests {
    use voxelwave::AlgorithmError;
    use voxelwave::connector::{BaseId, Connector, FlipClass, HorizontalForm};

    fn parse(text: &str) -> Connector {
        text.parse().expect("canonical connector id")
    }

    // Tests that canonical ids survive parse and display unchanged
    // Verified by printing the flip tag after the rotation class
    #[test]
    fn test_canonical_ids_display_as_parsed() {
        for text in [
            "h0s", "h1s", "h3", "h3f", "hws", "v0s", "v1s", "v2-0", "v2f-3", "v4x-1", "v5y-2",
            "v12-3",
        ] {
            assert_eq!(parse(text).to_string(), text);
        }
    }

    // Tests the parsed structure of each family
    // Verified by mapping the 'f' suffix to Plain
    #[test]
    fn test_parse_structure() {
        assert_eq!(
            parse("h7f"),
            Connector::horizontal(BaseId::Numbered(7), HorizontalForm::Mirrored)
        );
        assert_eq!(
            parse("hws"),
            Connector::horizontal(BaseId::Water, HorizontalForm::Symmetric)
        );
        assert_eq!(
            parse("v3x-2"),
            Connector::vertical_oriented(BaseId::Numbered(3), FlipClass::MirrorX, 2)
        );
        assert!(parse("v1s").is_vertical());
        assert!(!parse("h1s").is_vertical());
    }

    // Tests rejection of malformed ids
    // Verified by accepting rotation classes above 3
    #[test]
    fn test_malformed_ids_rejected() {
        for text in ["", "x3", "h", "hs", "v3", "v3-4", "v-1", "h3q", "v2z-0"] {
            let result = text.parse::<Connector>();
            assert!(
                matches!(result, Err(AlgorithmError::InvalidConnector { .. })),
                "'{text}' should be rejected"
            );
        }
    }

    // Tests the built-in connector constants
    // Verified by renumbering FLAT
    #[test]
    fn test_builtin_constants() {
        assert_eq!(Connector::EMPTY_HORIZONTAL.to_string(), "h0s");
        assert_eq!(Connector::EMPTY_VERTICAL.to_string(), "v0s");
        assert_eq!(Connector::FULL_HORIZONTAL.to_string(), "h1s");
        assert_eq!(Connector::FULL_VERTICAL.to_string(), "v1s");
        assert_eq!(Connector::FLAT_HORIZONTAL.to_string(), "h2s");
        assert_eq!(Connector::WATER_HORIZONTAL.to_string(), "hws");
    }

    // Tests that horizontal faces mate with the mirror and vertical faces with themselves
    // Verified by returning self for horizontal mates
    #[test]
    fn test_mate() {
        assert_eq!(parse("h3").mate(), parse("h3f"));
        assert_eq!(parse("h3f").mate(), parse("h3"));
        assert_eq!(parse("h4s").mate(), parse("h4s"));
        assert_eq!(parse("v2-1").mate(), parse("v2-1"));
        assert_eq!(parse("v2f-3").mate(), parse("v2f-3"));
    }

    // Tests strict compatibility rules
    // Verified by ignoring the base in the horizontal arm
    #[test]
    fn test_is_compatible() {
        assert!(parse("h3").is_compatible(parse("h3f")));
        assert!(parse("h3f").is_compatible(parse("h3")));
        assert!(parse("h3").is_compatible(parse("h3")));
        assert!(!parse("h3").is_compatible(parse("h4f")));
        assert!(!parse("h3s").is_compatible(parse("h3")));
        assert!(!parse("v2-0").is_compatible(parse("v2-1")));
        assert!(parse("v2-0").is_compatible(parse("v2-0")));
        assert!(!parse("h1s").is_compatible(parse("v1s")));
    }

    // Tests that loose compatibility ignores only the rotation class
    // Verified by ignoring the flip class as well
    #[test]
    fn test_is_loosely_compatible() {
        assert!(parse("v2-0").is_loosely_compatible(parse("v2-3")));
        assert!(parse("v2x-1").is_loosely_compatible(parse("v2x-2")));
        assert!(!parse("v2-0").is_loosely_compatible(parse("v2f-0")));
        assert!(!parse("v2-0").is_loosely_compatible(parse("v3-0")));
        assert!(parse("h3").is_loosely_compatible(parse("h3f")));
    }

    // Tests how flipping a module changes each flip class
    // Verified by skipping the +2 shift for odd plain rotations
    #[test]
    fn test_mirrored_rotation_classes() {
        let cases = [
            ("h3", "h3f"),
            ("h3f", "h3"),
            ("h3s", "h3s"),
            ("v2s", "v2s"),
            ("v2x-0", "v2x-0"),
            ("v2x-1", "v2x-3"),
            ("v2y-0", "v2y-2"),
            ("v2y-1", "v2y-1"),
            ("v2-0", "v2f-0"),
            ("v2-1", "v2f-3"),
            ("v2f-0", "v2-0"),
            ("v2f-3", "v2-1"),
        ];
        for (before, after) in cases {
            assert_eq!(parse(before).mirrored().to_string(), after, "mirror of {before}");
            assert_eq!(parse(after).mirrored().to_string(), before, "mirror of {after}");
        }
    }

    // Tests that a quarter turn only advances oriented vertical connectors
    // Verified by forgetting the modulo on the rotation class
    #[test]
    fn test_rotated() {
        assert_eq!(parse("v2-3").rotated(), parse("v2-0"));
        assert_eq!(parse("v2y-1").rotated(), parse("v2y-2"));
        assert_eq!(parse("v2s").rotated(), parse("v2s"));
        assert_eq!(parse("h3").rotated(), parse("h3"));
    }

    // Tests JSON as the canonical string
    // Verified by deriving Serialize on the enum
    #[test]
    fn test_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&Connector::FULL_HORIZONTAL).expect("serializable");
        assert_eq!(json, "\"h1s\"");

        let parsed: Connector = serde_json::from_str("\"v2f-1\"").expect("valid id");
        assert_eq!(parsed, parse("v2f-1"));
        assert!(serde_json::from_str::<Connector>("\"v2f-9\"").is_err());
    }
}
