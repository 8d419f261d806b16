//! Built-in normalization rule catalog.
//!
//! These tables encode one bakery's product vocabulary and the OCR error
//! patterns observed in its receipt photos. Rule order is a semantic
//! contract: later patterns assume earlier ones already collapsed
//! whitespace and punctuation runs. Do not reorder.

/// Cleanup rewrites, applied first.
pub(crate) const CLEANUP: &[(&str, &str)] = &[
    (r"\s*\$\s*\d+(?:[.,]\d{2})?", ""), // price artifacts
    (r#"\s*["']+\s*"#, ""),             // quotes with surrounding spaces
    (r"\s*[.,]*\s*00$", ""),            // trailing "00"
    (r"\s*[.,]*$", ""),                 // trailing punctuation
    (r"\s*[-|]+\s*$", ""),              // trailing dashes/bars
    (r"[=»|?<>#¥©+—;:%\\!_,]+", ""),    // special characters
    (r"\s*\([^)]*\)", ""),              // parentheses content
    (r"\b[A-Za-z]+\s*[.,]\b", ""),      // stray letters with punctuation
    (r"\s*(?:slice|Slice)(?:\s|$)", ""),
    (r"\s*\b(?:Loaf|loaf)\b", ""),
    (r"\s*\[.*?\]", ""), // bracketed content
    (r"\s*\b(?:Ww|Ly)\b", "100% WW"),
    (r"\s+[A-Za-z]{1,2}$", ""), // trailing 1-2 letter suffixes
    (
        r"\s*\b(?:Ta|Tw|Ao|Cai|Si|Bi|Mi|Nb|Os|Ee|In|Of|On|A|I|Q|B|J|N|O|R|S|U|W|X)\b",
        "",
    ), // garbage tokens
    (r"\s*\d+\s*(?:Oz|OZ|oz)?$", ""), // size indicators
    (r"\s*[)}\\*]+$", ""),
    (r#"\s*['"`]+"#, ""), // any remaining quotes
    (r"\s*\b(?:Out|Res|Ee|Wee)\b\s*$", ""),
    (r"\s*\b(?:Jen|Cae|Le|Tw)\b", ""),
    (r"\s{2,}", " "),
    (r"(\w)\]", "$1"), // ] glued to a word
    (r"\s+$", ""),
];

/// Known OCR-garbled spellings and their canonical forms.
pub(crate) const VOCABULARY: &[(&str, &str)] = &[
    ("Bluberry", "Blueberry"),
    ("Seasonallseasonal", "Seasonal"),
    ("Yegan", "Vegan"),
    ("Whcc", "WWCC"),
    ("Wncc", "WWCC"),
    ("100 Ww", "100% WW"),
    ("Ww100", "100% WW"),
    ("Levain.00", "Levain"),
    ("Croissantf", "Croissant"),
    ("Chocolat", "Chocolate"),
    ("Pumpernicke", "Pumpernickel"),
    ("Veoa", "Vegan"),
    ("PAC00", "PAC"),
    ("Xl Ka", "XL"),
    ("Xl", "XL"),
    ("Crx", "Croissant"),
    ("Bagu", "Baguette"),
    ("Souffy", "Souffle"),
    ("Quicheo", "Quiche"),
    ("Quicheoe", "Quiche"),
    ("Quicheae", "Quiche"),
    ("Amond", "Almond"),
    ("Buerr", "Beurre"),
    ("Cheesecak", "Cheesecake"),
    ("Aman", "Amann"),
    ("Scon", "Scone"),
    ("Muff", "Muffin"),
    ("Cak", "Cake"),
    ("Ro", "Roll"),
    ("Ana", "Banana"),
    ("Bi", "Banana"),
    ("Hwcc", "WWCC"),
    ("Slic", "Slice"),
    ("Row", "Roll"),
    ("Mbi", "MB"),
    ("Pi", "Pie"),
    ("Souff]e", "Souffle"),
    ("Cook Le", "Cookie"),
    ("Cook Cae", "Cookie"),
    ("Veggie Quicheo", "Veggie Quiche"),
    ("Coffee Cake Muff", "Coffee Cake Muffin"),
    ("Jambon Buerr", "Jambon Beurre"),
    ("Santa Cruz", "Santa Cruz Sandwich"),
    ("Kouign Aman", "Kouign Amann"),
    ("Olive Ciabatta Ee", "Olive Ciabatta"),
    ("Olive Ciabatta Bread", "Olive Ciabatta"),
    ("WWCC Cookie Cae", "WWCC Cookie"),
    ("Blueberry Co", "Blueberry Coffee Cake Muffin"),
    ("Seasona Polenta", "Seasonal Polenta Cake"),
];

/// Phrase rewrites for multi-token product names that vary in word order,
/// optional words, or pluralization.
pub(crate) const PHRASES: &[(&str, &str)] = &[
    (
        r"\b(?:Vegan|Pumpkin|Almond)\s+Chocola?t?e?\s+Banana\s+Muff(?:in)?",
        "Vegan Chocolate Banana Muffin",
    ),
    (r"(?:Seasonal)?\s*Polenta\s*Cake?", "Seasonal Polenta Cake"),
    (r"\b(?:Ham & Cheese Roll?|Rol)\b", "Ham & Cheese Roll"),
    (r"\b(?:MB|Mb|MB X|MB'i)\b", "MB"),
    (r"\s*\(?GF\)?", "(GF)"),
    (r"\bNultigrain\b", "Multigrain"),
    (r"\bCo\s+(Cake|Coffee)", "Coffee$1"),
    (
        r"Chocolate\s+(?:Bi|Ana)\s+(?:Muff|Muffin)",
        "Chocolate Banana Muffin",
    ),
    (
        r"(?:Mini\s+)?Mango\s+Lassi\s+Cheesecak[e]?",
        "Mango Lassi Cheesecake",
    ),
    (r"Coconut\s+Cream\s+Pi[e]?", "Coconut Cream Pie"),
    (
        r"Blueberry\s+(?:Co|Coffee)\s+(?:Cake\s+)?(?:Muff|Muffin)(?:in)?",
        "Blueberry Coffee Cake Muffin",
    ),
    (
        r"(?:Chocolate\s+)?Almond\s+(?:Crx|Croissant)",
        "Almond Croissant",
    ),
    (r"Santa Cruz Sandwich (?:Vegan|Sandwich)", "Santa Cruz Sandwich"),
    (r"(?:% Ww%|% WW \$)", "100% WW"),
];

/// Post-standardization rewrites, applied last.
pub(crate) const POST_CLEAN: &[(&str, &str)] = &[
    (r"\s*[-|:;,]+$", ""),              // trailing punctuation
    (r"\s*[0-9]+$", ""),                // trailing numbers
    (r"\s*\.+$", ""),                   // trailing dots
    (r"\s*\b(?:In|Of|On|A|I|Q)\b$", ""), // trailing filler words
    (r"\b[0-9]+\b", ""),                // standalone numbers
    (r"\s{2,}", " "),
    (r"^\s*[&]\s*", ""),       // leading &
    (r"(\S)\s*&\s*$", "$1"),   // trailing &
    (r"\s+$", ""),
    (r#"\s*(?:'|")\s*$"#, ""), // trailing quotes
    (r"(\w)\s*\$\s*$", "$1"),  // trailing dollar signs
    (r"\s+(?:f|i)$", ""),      // trailing f or i
];

/// Tokens always rendered fully upper-case.
pub(crate) const ABBREVIATIONS: &[&str] = &["MB", "PAC", "WWCC", "GF", "WW", "XL"];

/// Waste section header phrases, matched case-insensitively with an
/// optional trailing colon after markdown emphasis is stripped.
pub(crate) const SECTION_HEADERS: &[&str] = &["WASTE", "WASTE REPORT", "WASTED", "WASTE ITEMS"];
