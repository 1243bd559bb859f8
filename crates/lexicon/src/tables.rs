// Built-in lexicon tables.
//
// Keys are lower-case, single-space separated. Values are canonical codes.

/// Commodity keyword -> (HS code, confidence).
///
/// Confidence reflects how unambiguously the keyword identifies the code:
/// a generic word like "spices" maps to a chapter heading with low confidence,
/// a specific product like "green cardamom" maps to a subheading with high
/// confidence.
pub const COMMODITIES: &[(&str, &str, f64)] = &[
    // Pepper and capsicum
    ("pepper", "0904", 0.90),
    ("black pepper", "090411", 0.95),
    ("white pepper", "090411", 0.92),
    ("peppercorn", "090411", 0.90),
    ("peppercorns", "090411", 0.90),
    ("chilli", "090421", 0.85),
    ("chili", "090421", 0.85),
    ("chillies", "090421", 0.85),
    ("chilies", "090421", 0.85),
    ("dried chilli", "090421", 0.93),
    ("paprika", "090421", 0.80),
    // Seed and bark spices
    ("cardamom", "0908", 0.90),
    ("green cardamom", "090831", 0.95),
    ("nutmeg", "090811", 0.90),
    ("mace", "090821", 0.90),
    ("cinnamon", "0906", 0.90),
    ("cassia", "090619", 0.85),
    ("clove", "0907", 0.92),
    ("cloves", "0907", 0.92),
    ("vanilla", "0905", 0.93),
    ("cumin", "090931", 0.90),
    ("cumin seed", "090931", 0.94),
    ("cumin seeds", "090931", 0.94),
    ("coriander", "090921", 0.88),
    ("fennel", "090961", 0.85),
    ("star anise", "090961", 0.85),
    ("turmeric", "091030", 0.92),
    ("ginger", "091011", 0.88),
    ("dry ginger", "091011", 0.93),
    ("saffron", "091020", 0.95),
    ("spices", "0910", 0.50),
    // Beverages
    ("coffee", "0901", 0.85),
    ("green coffee", "090111", 0.95),
    ("roasted coffee", "090121", 0.93),
    ("tea", "0902", 0.85),
    ("black tea", "090240", 0.90),
    ("green tea", "090210", 0.90),
    ("cocoa", "1801", 0.85),
    ("cocoa beans", "1801", 0.93),
    // Grains, nuts, seeds
    ("rice", "1006", 0.80),
    ("basmati", "100630", 0.90),
    ("basmati rice", "100630", 0.95),
    ("cashew", "080132", 0.90),
    ("cashews", "080132", 0.90),
    ("cashew nuts", "080132", 0.93),
    ("raw cashew", "080131", 0.92),
    ("almonds", "0802", 0.85),
    ("walnuts", "080232", 0.88),
    ("sesame", "120740", 0.90),
    ("sesame seeds", "120740", 0.93),
    ("groundnuts", "1202", 0.85),
    ("peanuts", "1202", 0.85),
    ("sugar", "1701", 0.70),
];

/// Country or region name -> market code.
pub const MARKETS: &[(&str, &str)] = &[
    // Regions
    ("europe", "EU"),
    ("eu", "EU"),
    ("european union", "EU"),
    ("middle east", "ME"),
    ("gcc", "GCC"),
    ("gulf", "GCC"),
    ("north america", "NA"),
    ("asean", "ASEAN"),
    ("southeast asia", "ASEAN"),
    ("south east asia", "ASEAN"),
    // Countries
    ("usa", "US"),
    ("u.s", "US"),
    ("u.s.a", "US"),
    ("united states", "US"),
    ("america", "US"),
    ("canada", "CA"),
    ("mexico", "MX"),
    ("uk", "GB"),
    ("united kingdom", "GB"),
    ("britain", "GB"),
    ("great britain", "GB"),
    ("england", "GB"),
    ("germany", "DE"),
    ("netherlands", "NL"),
    ("holland", "NL"),
    ("france", "FR"),
    ("italy", "IT"),
    ("spain", "ES"),
    ("belgium", "BE"),
    ("poland", "PL"),
    ("sweden", "SE"),
    ("denmark", "DK"),
    ("austria", "AT"),
    ("ireland", "IE"),
    ("portugal", "PT"),
    ("greece", "GR"),
    ("switzerland", "CH"),
    ("norway", "NO"),
    ("russia", "RU"),
    ("turkey", "TR"),
    ("uae", "AE"),
    ("united arab emirates", "AE"),
    ("dubai", "AE"),
    ("saudi arabia", "SA"),
    ("saudi", "SA"),
    ("ksa", "SA"),
    ("qatar", "QA"),
    ("kuwait", "KW"),
    ("oman", "OM"),
    ("egypt", "EG"),
    ("india", "IN"),
    ("sri lanka", "LK"),
    ("vietnam", "VN"),
    ("viet nam", "VN"),
    ("indonesia", "ID"),
    ("malaysia", "MY"),
    ("singapore", "SG"),
    ("thailand", "TH"),
    ("china", "CN"),
    ("japan", "JP"),
    ("south korea", "KR"),
    ("korea", "KR"),
    ("australia", "AU"),
    ("brazil", "BR"),
    ("south africa", "ZA"),
    ("nigeria", "NG"),
    ("kenya", "KE"),
    ("bangladesh", "BD"),
    ("pakistan", "PK"),
];

/// Region market code -> member country codes.
pub const REGIONS: &[(&str, &[&str])] = &[
    (
        "EU",
        &[
            "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE",
            "IT", "LV", "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
        ],
    ),
    ("ME", &["AE", "SA", "QA", "KW", "OM", "BH", "JO", "LB", "IQ"]),
    ("GCC", &["AE", "SA", "QA", "KW", "OM", "BH"]),
    ("NA", &["US", "CA", "MX"]),
    ("ASEAN", &["BN", "KH", "ID", "LA", "MY", "MM", "PH", "SG", "TH", "VN"]),
];

/// Certification keyword -> cert code.
pub const CERTS: &[(&str, &str)] = &[
    ("organic", "ORGANIC"),
    ("eu organic", "ORGANIC"),
    ("usda organic", "USDA_ORGANIC"),
    ("haccp", "HACCP"),
    ("iso 22000", "ISO22000"),
    ("iso22000", "ISO22000"),
    ("fssc 22000", "FSSC22000"),
    ("fssc22000", "FSSC22000"),
    ("brc", "BRCGS"),
    ("brcgs", "BRCGS"),
    ("ifs", "IFS"),
    ("fssai", "FSSAI"),
    ("halal", "HALAL"),
    ("kosher", "KOSHER"),
    ("fairtrade", "FAIRTRADE"),
    ("fair trade", "FAIRTRADE"),
    ("globalgap", "GLOBALGAP"),
    ("rainforest alliance", "RAINFOREST"),
    ("gmp", "GMP"),
];

/// Grade vocabulary -> canonical grade label.
pub const GRADES: &[(&str, &str)] = &[
    ("asta", "ASTA"),
    ("asta 500", "ASTA 500"),
    ("asta 550", "ASTA 550"),
    ("500 gl", "500 G/L"),
    ("500 g/l", "500 G/L"),
    ("550 gl", "550 G/L"),
    ("550 g/l", "550 G/L"),
    ("faq", "FAQ"),
    ("fair average quality", "FAQ"),
    ("bold", "BOLD"),
    ("extra bold", "EXTRA BOLD"),
    ("tgsea", "TGSEA"),
    ("tgea", "TGEA"),
    ("mg1", "MG1"),
    ("garbled", "GARBLED"),
    ("grade a", "GRADE A"),
    ("premium", "PREMIUM"),
    ("w180", "W180"),
    ("w240", "W240"),
    ("w320", "W320"),
    ("1121", "1121"),
];

/// Pack vocabulary -> canonical pack label.
pub const PACKS: &[(&str, &str)] = &[
    ("1kg", "1 KG POUCH"),
    ("1 kg", "1 KG POUCH"),
    ("25kg", "25 KG BAG"),
    ("25 kg", "25 KG BAG"),
    ("50kg", "50 KG BAG"),
    ("50 kg", "50 KG BAG"),
    ("pp bag", "PP BAG"),
    ("pp bags", "PP BAG"),
    ("jute bag", "JUTE BAG"),
    ("jute bags", "JUTE BAG"),
    ("vacuum pack", "VACUUM PACK"),
    ("vacuum packed", "VACUUM PACK"),
    ("carton", "CARTON"),
    ("cartons", "CARTON"),
    ("retail pack", "RETAIL PACK"),
    ("bulk", "BULK"),
];

/// Company-name tokens dropped from the end of a normalized name.
pub const LEGAL_SUFFIXES: &[&str] = &[
    "ltd", "limited", "llc", "inc", "incorporated", "corp", "corporation", "co", "company",
    "gmbh", "ag", "sa", "sas", "srl", "bv", "nv", "pvt", "private", "plc", "pte", "pty", "llp",
    "lp", "kg", "oy", "ab", "spa", "sarl", "sl", "sro", "kft", "doo", "ooo", "jsc", "tbk", "bhd",
    "sdn",
];

/// Consumer mail providers; their domains say nothing about the employer.
pub const FREE_MAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "aol.com",
    "icloud.com",
    "proton.me",
    "protonmail.com",
    "gmx.com",
    "mail.com",
    "yandex.com",
    "qq.com",
    "163.com",
    "rediffmail.com",
];

/// Job-title phrases per contact role, checked in order.
pub const ROLE_TITLES: &[(&str, &[&str])] = &[
    (
        "procurement",
        &["procurement", "purchasing", "purchase", "buyer", "sourcing"],
    ),
    ("category_manager", &["category manager", "category management", "category lead"]),
    (
        "executive",
        &[
            "owner",
            "ceo",
            "chief executive",
            "founder",
            "co founder",
            "cofounder",
            "managing director",
            "proprietor",
            "president",
        ],
    ),
];
