//! KiCad symbol library text for tests.
//!
//! The builders emit tab-indented S-expressions the way the KiCad symbol
//! editor saves them, so tests exercise realistic nesting.

/// A library with one resistor carrying a multi-line `FitPart` block.
pub const RESISTOR_WITH_FITPART: &str = "(kicad_symbol_lib
\t(version 20231120)
\t(generator \"kicad_symbol_editor\")
\t(symbol \"R\"
\t\t(property \"Reference\" \"R\"
\t\t\t(at 2.032 0 90)
\t\t)
\t\t(property \"FitPart\" \"Yes\"
\t\t\t(at 0 0 0)
\t\t\t(effects
\t\t\t\t(font
\t\t\t\t\t(size 1.27 1.27)
\t\t\t\t)
\t\t\t\t(hide yes)
\t\t\t)
\t\t)
\t\t(property \"Value\" \"R\"
\t\t\t(at 0 0 90)
\t\t)
\t)
)
";

/// `RESISTOR_WITH_FITPART` after removing `FitPart`.
pub const RESISTOR_STRIPPED: &str = "(kicad_symbol_lib
\t(version 20231120)
\t(generator \"kicad_symbol_editor\")
\t(symbol \"R\"
\t\t(property \"Reference\" \"R\"
\t\t\t(at 2.032 0 90)
\t\t)
\t\t(property \"Value\" \"R\"
\t\t\t(at 0 0 90)
\t\t)
\t)
)
";

/// A library with no `FitPart` anywhere.
pub const LED_PLAIN: &str = "(kicad_symbol_lib
\t(version 20231120)
\t(symbol \"LED\"
\t\t(property \"Reference\" \"D\"
\t\t\t(at 0 0 0)
\t\t)
\t)
)
";

/// Build a library where every symbol gets the listed `(name, value)`
/// properties, each written as a multi-line block.
pub fn symbol_library(symbols: &[(&str, &[(&str, &str)])]) -> String {
    let mut text = String::from("(kicad_symbol_lib\n\t(version 20231120)\n");
    for (symbol, properties) in symbols {
        text.push_str(&format!("\t(symbol \"{symbol}\"\n"));
        for (name, value) in properties.iter() {
            text.push_str(&property_block(name, value));
        }
        text.push_str("\t)\n");
    }
    text.push_str(")\n");
    text
}

/// One multi-line property block at symbol indentation.
pub fn property_block(name: &str, value: &str) -> String {
    format!(
        "\t\t(property \"{name}\" \"{value}\"\n\t\t\t(at 0 0 0)\n\t\t\t(effects\n\t\t\t\t(font\n\t\t\t\t\t(size 1.27 1.27)\n\t\t\t\t)\n\t\t\t\t(hide yes)\n\t\t\t)\n\t\t)\n"
    )
}

/// Convert `\n` terminators to `\r\n`.
pub fn to_crlf(text: &str) -> String {
    text.replace('\n', "\r\n")
}
