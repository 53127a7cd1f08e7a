//! Static lookup of the 26 Swiss cantons.

/// Canton code / name pairs, sorted by code.
pub const CANTONS: [(&str, &str); 26] = [
    ("AG", "Aargau"),
    ("AI", "Appenzell Innerrhoden"),
    ("AR", "Appenzell Ausserrhoden"),
    ("BE", "Bern"),
    ("BL", "Basel-Landschaft"),
    ("BS", "Basel-Stadt"),
    ("FR", "Fribourg"),
    ("GE", "Genève"),
    ("GL", "Glarus"),
    ("GR", "Graubünden"),
    ("JU", "Jura"),
    ("LU", "Luzern"),
    ("NE", "Neuchâtel"),
    ("NW", "Nidwalden"),
    ("OW", "Obwalden"),
    ("SG", "St. Gallen"),
    ("SH", "Schaffhausen"),
    ("SO", "Solothurn"),
    ("SZ", "Schwyz"),
    ("TG", "Thurgau"),
    ("TI", "Ticino"),
    ("UR", "Uri"),
    ("VD", "Vaud"),
    ("VS", "Valais"),
    ("ZG", "Zug"),
    ("ZH", "Zürich"),
];

/// Full canton name for a 2-letter code. Surrounding whitespace and case are ignored.
pub fn canton_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_uppercase();
    CANTONS
        .binary_search_by(|(candidate, _)| candidate.cmp(&code.as_str()))
        .ok()
        .map(|idx| CANTONS[idx].1)
}
