//! End-to-end run over the bundled profiles

use std::fs;
use std::path::PathBuf;

use pinpilot_profiles::{
    generate_pinmap, parse_intent, parse_pinmap, render_pinmap, PeripheralRequest, PinmapArtifact,
    ProfileCatalog, ProfileError,
};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn catalog() -> ProfileCatalog {
    ProfileCatalog::load_dir(data_dir()).unwrap()
}

fn intent() -> pinpilot_profiles::HardwareIntent {
    let input = fs::read_to_string(data_dir().join("intents/smart_shelf_tag.toml")).unwrap();
    parse_intent(&input).unwrap()
}

#[test]
fn test_catalog_lists_bundled_profiles() {
    let catalog = catalog();

    assert_eq!(catalog.board_ids(), ["esp32c3"]);
    assert_eq!(
        catalog.peripheral_ids(),
        ["bme280_i2c", "epaper_spi_2p13", "ws2812"]
    );

    let board = catalog.board("esp32c3").unwrap();
    assert_eq!(board.name, "ESP32-C3 DevKitM-1");
    assert!(board.is_usb_reserved(19));
}

#[test]
fn test_smart_shelf_tag_pinmap() {
    let result = generate_pinmap(&catalog(), &intent()).unwrap();

    assert_eq!(result.board_id, "esp32c3");
    assert_eq!(
        result.peripherals,
        ["epaper_spi_2p13", "bme280_i2c", "status_led"]
    );

    // Bus pins land on the recommended IO-MUX pins
    assert_eq!(result.gpio_for("epaper_spi_2p13.SCLK"), Some(6));
    assert_eq!(result.gpio_for("epaper_spi_2p13.MOSI"), Some(7));
    assert_eq!(result.gpio_for("epaper_spi_2p13.CS"), Some(10));
    assert_eq!(result.gpio_for("bme280_i2c.SDA"), Some(4));
    assert_eq!(result.gpio_for("bme280_i2c.SCL"), Some(5));

    // Control lines, then the rest, from the remaining safe pins
    assert_eq!(result.gpio_for("epaper_spi_2p13.DC"), Some(0));
    assert_eq!(result.gpio_for("epaper_spi_2p13.RST"), Some(1));
    assert_eq!(result.gpio_for("epaper_spi_2p13.BUSY"), Some(3));
    assert_eq!(result.gpio_for("status_led.DIN"), Some(11));

    assert_eq!(
        result.rationale["epaper_spi_2p13.SCLK"],
        "preferred_free_pin;recommended_for_spi_sclk"
    );
    assert_eq!(result.rationale["epaper_spi_2p13.DC"], "preferred_free_pin");
    assert_eq!(result.rationale["status_led.DIN"], "fallback_available_pin");

    assert!(!result.has_warnings());
    assert!(result.options.reserve_usb_serial_jtag);
    assert!(result.options.strict_avoid_boot_pins);
}

#[test]
fn test_crowded_board_warns_on_strapping_pins() {
    let mut intent = intent();
    // 9 pins for the base intent + 11 LEDs fills all 20 non-USB pins
    for i in 0..11 {
        intent.peripherals.push(PeripheralRequest {
            id: "ws2812".into(),
            alias: Some(format!("led{}", i)),
        });
    }

    let result = generate_pinmap(&catalog(), &intent).unwrap();
    assert_eq!(result.assignments.len(), 20);

    // Safe pins go first, strapping pins only once they run out
    assert_eq!(result.gpio_for("led7.DIN"), Some(21));
    assert_eq!(result.gpio_for("led8.DIN"), Some(2));
    assert_eq!(result.gpio_for("led9.DIN"), Some(8));
    assert_eq!(result.gpio_for("led10.DIN"), Some(9));
    assert_eq!(result.rationale["led10.DIN"], "strapping_pin_avoided");

    assert_eq!(
        result.warnings,
        [
            "led8.DIN mapped to strapping pin GPIO2. \
             Check boot/reset behavior and external pull resistors.",
            "led9.DIN mapped to strapping pin GPIO8. \
             Check boot/reset behavior and external pull resistors.",
            "led10.DIN mapped to strapping pin GPIO9. \
             Check boot/reset behavior and external pull resistors.",
        ]
    );
    assert!(!result.used_gpios().contains(&18));
    assert!(!result.used_gpios().contains(&19));
}

#[test]
fn test_unknown_board_reported_before_allocation() {
    let mut intent = intent();
    intent.board = "esp32s3".into();

    let err = generate_pinmap(&catalog(), &intent).unwrap_err();
    assert_eq!(err.to_string(), "Unknown board: esp32s3");
}

#[test]
fn test_pool_exhaustion_reported() {
    let mut intent = intent();
    for i in 0..12 {
        intent.peripherals.push(PeripheralRequest {
            id: "ws2812".into(),
            alias: Some(format!("led{}", i)),
        });
    }

    let err = generate_pinmap(&catalog(), &intent).unwrap_err();
    assert!(matches!(err, ProfileError::Allocation(_)));
    assert_eq!(
        err.to_string(),
        "Pin mapping failed: No available GPIO pins left for led11.DIN"
    );
}

#[test]
fn test_pinmap_artifact() {
    let intent = intent();
    let result = generate_pinmap(&catalog(), &intent).unwrap();
    let artifact = PinmapArtifact::new(intent.device_name.clone(), result);

    let rendered = render_pinmap(&artifact).unwrap();
    assert!(rendered.contains("device_name = \"smart_shelf_tag\""));
    assert_eq!(parse_pinmap(&rendered).unwrap(), artifact);
}
